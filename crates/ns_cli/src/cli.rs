use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Keyword news search with sentiment scoring", long_about = None)]
pub struct Cli {
    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the NewsAPI service
    #[arg(long, env = "NEWS_API_URL", default_value = ns_news::DEFAULT_BASE_URL)]
    pub news_api_url: String,

    #[arg(long, default_value = "vader", help = "Sentiment scorer to use. Available scorers: vader (default), neutral")]
    pub scorer: String,

    /// Article language code
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, env = "NS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web application
    Serve {
        /// Address to listen on
        #[arg(long, env = "NS_BIND", default_value = "127.0.0.1:5000")]
        bind: String,
        /// Require an account to search (enables /register, /login, /logout)
        #[arg(long)]
        auth: bool,
        /// Account store backend: sqlite or memory
        #[arg(long, default_value = "sqlite")]
        storage: String,
        /// SQLite database file for accounts
        #[arg(long, env = "NS_DATABASE", default_value = ns_storage::DEFAULT_DATABASE_PATH)]
        database: PathBuf,
        /// Directory for chart images, served under /static
        #[arg(long, env = "NS_STATIC_DIR", default_value = "static")]
        static_dir: PathBuf,
        /// Articles requested per page
        #[arg(long, default_value_t = 15)]
        page_size: u32,
        /// Query used when the search form is empty
        #[arg(long, default_value = "technology")]
        default_query: String,
        /// Minutes a session may sit idle before it is dropped
        #[arg(long, default_value_t = 24 * 60)]
        session_ttl_minutes: u64,
        /// Maximum number of live sessions
        #[arg(long, default_value_t = ns_web::session::DEFAULT_MAX_SESSIONS)]
        max_sessions: usize,
    },
    /// Search once and print scored results
    Search {
        /// Keyword to search for
        #[arg(default_value = "technology")]
        query: String,
        #[arg(long, default_value_t = 5)]
        page_size: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// all, positive, negative or neutral
        #[arg(long, default_value = "all")]
        sentiment_filter: String,
    },
}

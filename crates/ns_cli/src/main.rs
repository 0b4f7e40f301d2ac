use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ns_core::{CategoryFilter, NewsQuery, NewsSource};
use ns_news::NewsApiClient;
use ns_sentiment::SentimentPipeline;
use ns_web::{AppState, WebSettings};
use tracing::info;

mod cli;
mod logging;
mod search;

use cli::{Cli, Commands};

struct ServeOptions {
    bind: String,
    auth: bool,
    storage: String,
    database: PathBuf,
    settings: WebSettings,
}

async fn serve(pipeline: SentimentPipeline, news: Arc<dyn NewsSource>, options: ServeOptions) -> anyhow::Result<()> {
    let mut state = AppState::new(pipeline, news, options.settings);

    if options.auth {
        let accounts = ns_storage::create_account_store(&options.storage, Some(&options.database)).await?;
        state = state.with_accounts(accounts);
        info!("🔐 Login required for searches");
    }

    let app = ns_web::create_app(state);
    let listener = tokio::net::TcpListener::bind(&options.bind)
        .await
        .with_context(|| format!("Failed to bind {}", options.bind))?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    let pipeline = SentimentPipeline::new(ns_sentiment::create_scorer(&cli.scorer)?);
    info!("🧠 Sentiment scorer initialized (using {})", pipeline.scorer_name());

    let news = Arc::new(NewsApiClient::with_base_url(cli.api_key.clone(), &cli.news_api_url)?);

    match cli.command {
        Commands::Serve {
            bind,
            auth,
            storage,
            database,
            static_dir,
            page_size,
            default_query,
            session_ttl_minutes,
            max_sessions,
        } => {
            let settings = WebSettings {
                default_query,
                language: cli.language,
                page_size,
                static_dir,
                session_ttl: Duration::from_secs(session_ttl_minutes.saturating_mul(60)),
                max_sessions,
                ..WebSettings::default()
            };
            let options = ServeOptions {
                bind,
                auth,
                storage,
                database,
                settings,
            };
            serve(pipeline, news, options).await
        }
        Commands::Search {
            query,
            page_size,
            page,
            sentiment_filter,
        } => {
            let query = NewsQuery::new(query, cli.language, page_size, page);
            let filter = CategoryFilter::parse(&sentiment_filter);
            let mut stdout = std::io::stdout().lock();
            search::run_search(&pipeline, news.as_ref(), &query, &filter, &mut stdout).await?;
            Ok(())
        }
    }
}

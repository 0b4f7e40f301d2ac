use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ns_core::{AccountStore, NewsSource, User};
use ns_sentiment::{SentimentPipeline, DEFAULT_BIN_COUNT};

use crate::session::{Session, SessionStore, DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL};
use crate::WebError;

/// Knobs for the search pages.
#[derive(Debug, Clone)]
pub struct WebSettings {
    /// Query used when the form does not carry one.
    pub default_query: String,
    pub language: String,
    pub page_size: u32,
    /// Where chart images are written and static files served from.
    pub static_dir: PathBuf,
    pub bin_count: usize,
    /// Idle time before a session is dropped.
    pub session_ttl: Duration,
    pub max_sessions: usize,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            default_query: "technology".to_string(),
            language: "en".to_string(),
            page_size: 15,
            static_dir: PathBuf::from("static"),
            bin_count: DEFAULT_BIN_COUNT,
            session_ttl: DEFAULT_SESSION_TTL,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

pub struct AppState {
    pub pipeline: SentimentPipeline,
    pub news: Arc<dyn NewsSource>,
    pub accounts: Option<Arc<dyn AccountStore>>,
    pub sessions: Arc<SessionStore>,
    pub settings: WebSettings,
}

impl AppState {
    pub fn new(pipeline: SentimentPipeline, news: Arc<dyn NewsSource>, settings: WebSettings) -> Self {
        Self {
            pipeline,
            news,
            accounts: None,
            sessions: Arc::new(SessionStore::new(settings.session_ttl, settings.max_sessions)),
            settings,
        }
    }

    /// Turn on the login-gated variant.
    pub fn with_accounts(mut self, accounts: Arc<dyn AccountStore>) -> Self {
        self.accounts = Some(accounts);
        self
    }

    pub fn requires_login(&self) -> bool {
        self.accounts.is_some()
    }

    pub fn accounts(&self) -> Result<&Arc<dyn AccountStore>, WebError> {
        self.accounts.as_ref().ok_or(WebError::AccountsDisabled)
    }

    /// The logged-in user, re-read from the account store. A session whose
    /// user no longer exists counts as anonymous.
    pub async fn current_user(&self, session: &Session) -> Result<Option<User>, WebError> {
        let (Some(accounts), Some(id)) = (self.accounts.as_ref(), session.user_id().await) else {
            return Ok(None);
        };
        Ok(accounts.find_by_id(id).await?)
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream returned status {status} for {url}")]
    Upstream { status: u16, url: String },

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Account already exists: {0}")]
    AccountExists(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

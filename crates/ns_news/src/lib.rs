//! Client for the NewsAPI `everything` search endpoint.

pub mod client;
mod wire;

pub use client::{NewsApiClient, DEFAULT_BASE_URL};

pub mod prelude {
    pub use super::client::NewsApiClient;
    pub use ns_core::{Article, Error, NewsQuery, NewsSource, Result};
}

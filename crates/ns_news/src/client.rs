use std::fmt;

use async_trait::async_trait;
use ns_core::{Article, Error, NewsQuery, NewsSource, Result};
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::wire::EverythingResponse;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/";

const EVERYTHING_PATH: &str = "v2/everything";

/// Keyword search against NewsAPI. The API key travels as a bearer token.
#[derive(Clone)]
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl NewsApiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        // `join` drops the last segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn everything_url(&self, query: &NewsQuery) -> Result<Url> {
        let mut url = self
            .base_url
            .join(EVERYTHING_PATH)
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("q", &query.query)
            .append_pair("language", &query.language)
            .append_pair("pageSize", &query.page_size.to_string())
            .append_pair("page", &query.page.to_string());
        Ok(url)
    }
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_articles(&self, query: &NewsQuery) -> Result<Vec<Article>> {
        let url = self.everything_url(query)?;
        debug!(%url, "Requesting articles");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), query = %query.query, "Error fetching news");
            return Err(Error::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let envelope: EverythingResponse = response.json().await?;
        info!(
            query = %query.query,
            page = query.page,
            status = envelope.status.as_deref().unwrap_or("unknown"),
            total_results = envelope.total_results.unwrap_or_default(),
            "Fetched news page"
        );
        Ok(envelope.into_articles())
    }
}

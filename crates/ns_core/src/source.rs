use async_trait::async_trait;

use crate::types::{Article, NewsQuery};
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the name of the news provider
    fn name(&self) -> &str;

    /// Fetch one page of articles matching the query, in provider order
    async fn fetch_articles(&self, query: &NewsQuery) -> Result<Vec<Article>>;
}

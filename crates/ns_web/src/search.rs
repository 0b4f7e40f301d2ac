use ns_core::{CategoryFilter, NewsQuery, ScoredArticle};
use ns_sentiment::{distribution, filter_by_category, histogram, ScoreHistogram, SentimentDistribution};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{AppState, WebSettings};

/// Raw search form, from a POST body or a GET query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    pub query: Option<String>,
    pub sentiment_filter: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub filter: CategoryFilter,
    pub page: u32,
}

impl SearchForm {
    /// Fill in defaults: a missing query becomes the configured default, a
    /// missing or unparsable page becomes 1.
    pub fn resolve(self, settings: &WebSettings) -> SearchRequest {
        SearchRequest {
            query: self.query.unwrap_or_else(|| settings.default_query.clone()),
            filter: CategoryFilter::parse(self.sentiment_filter.as_deref().unwrap_or("all")),
            page: self
                .page
                .and_then(|raw| raw.trim().parse::<u32>().ok())
                .filter(|&page| page >= 1)
                .unwrap_or(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchResults {
    pub request: SearchRequest,
    pub articles: Vec<ScoredArticle>,
    pub distribution: SentimentDistribution,
    pub histogram: ScoreHistogram,
    /// The news source failed; `articles` is empty because of it.
    pub source_unavailable: bool,
    /// The source filled the whole page, so a next page may exist.
    pub has_more: bool,
}

/// Fetch, score, filter and aggregate one page of results.
pub async fn run_search(state: &AppState, request: SearchRequest) -> SearchResults {
    let mut source_unavailable = false;
    let mut has_more = false;

    let raw = if request.query.is_empty() {
        Vec::new()
    } else {
        let query = NewsQuery::new(
            request.query.clone(),
            state.settings.language.clone(),
            state.settings.page_size,
            request.page,
        );
        match state.news.fetch_articles(&query).await {
            Ok(articles) => {
                has_more = articles.len() >= query.page_size as usize;
                articles
            }
            Err(e) => {
                warn!(error = %e, source = state.news.name(), "News source unavailable");
                source_unavailable = true;
                Vec::new()
            }
        }
    };

    let scored = state.pipeline.enrich(raw);
    let articles = filter_by_category(scored, &request.filter);
    let distribution = distribution(&articles);
    let histogram = histogram(&articles, state.settings.bin_count);

    info!(
        query = %request.query,
        filter = %request.filter.as_param(),
        page = request.page,
        count = articles.len(),
        "Search complete"
    );

    SearchResults {
        request,
        articles,
        distribution,
        histogram,
        source_unavailable,
        has_more,
    }
}

#[derive(Debug, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// JSON shape of `/api/search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub sentiment_filter: String,
    pub page: u32,
    pub source_unavailable: bool,
    pub has_more: bool,
    pub articles: Vec<ScoredArticle>,
    pub distribution: SentimentDistribution,
    pub histogram: Vec<HistogramBin>,
}

impl From<SearchResults> for SearchResponse {
    fn from(results: SearchResults) -> Self {
        let histogram = results
            .histogram
            .counts()
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let (start, end) = results.histogram.bin_edges(i);
                HistogramBin { start, end, count }
            })
            .collect();

        Self {
            query: results.request.query,
            sentiment_filter: results.request.filter.as_param(),
            page: results.request.page,
            source_unavailable: results.source_unavailable,
            has_more: results.has_more,
            articles: results.articles,
            distribution: results.distribution,
            histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_core::SentimentCategory;

    #[test]
    fn test_form_defaults() {
        let request = SearchForm::default().resolve(&WebSettings::default());
        assert_eq!(request.query, "technology");
        assert_eq!(request.filter, CategoryFilter::All);
        assert_eq!(request.page, 1);
    }

    #[test]
    fn test_form_values() {
        let form = SearchForm {
            query: Some(String::new()),
            sentiment_filter: Some("negative".to_string()),
            page: Some("3".to_string()),
        };
        let request = form.resolve(&WebSettings::default());
        assert_eq!(request.query, "");
        assert_eq!(request.filter, CategoryFilter::Only(SentimentCategory::Negative));
        assert_eq!(request.page, 3);
    }

    #[test]
    fn test_bad_page_falls_back_to_first() {
        for raw in ["abc", "0", "-2", ""] {
            let form = SearchForm {
                page: Some(raw.to_string()),
                ..SearchForm::default()
            };
            assert_eq!(form.resolve(&WebSettings::default()).page, 1, "page {:?}", raw);
        }
    }
}

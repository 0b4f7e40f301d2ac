//! Sentiment scoring, classification and aggregation over news articles.

pub mod aggregate;
pub mod filter;
pub mod models;
pub mod pipeline;

pub use aggregate::{distribution, histogram, ScoreHistogram, SentimentDistribution, DEFAULT_BIN_COUNT};
pub use filter::filter_by_category;
pub use models::create_scorer;
pub use pipeline::SentimentPipeline;

pub mod prelude {
    pub use super::aggregate::{distribution, histogram, ScoreHistogram, SentimentDistribution};
    pub use super::filter::filter_by_category;
    pub use super::models::{create_scorer, NeutralScorer, VaderScorer};
    pub use super::pipeline::SentimentPipeline;
    pub use ns_core::{Article, CategoryFilter, Error, Result, ScoredArticle, SentimentCategory};
}

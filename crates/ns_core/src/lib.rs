pub mod error;
pub mod models;
pub mod password;
pub mod source;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::{PolarityScores, SentimentScorer};
pub use source::NewsSource;
pub use storage::AccountStore;
pub use types::{
    classify, Article, CategoryFilter, NewsQuery, ScoredArticle, SentimentCategory, User,
    NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD,
};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Output of a polarity analysis. Only `compound` drives classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

/// A sentiment analyzer. Implementations are built once at start-up and shared
/// read-only across requests.
pub trait SentimentScorer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Score a piece of text. `compound` is expected in `[-1.0, 1.0]`.
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores>;
}

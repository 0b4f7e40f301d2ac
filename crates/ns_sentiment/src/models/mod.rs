use std::sync::Arc;

use ns_core::{Error, Result, SentimentScorer};

pub mod neutral;
pub mod vader;

pub use neutral::NeutralScorer;
pub use vader::VaderScorer;

/// Names accepted by [`create_scorer`].
pub const AVAILABLE_SCORERS: &[&str] = &["vader", "neutral"];

/// Build the scorer selected by name. Called once at start-up.
pub fn create_scorer(name: &str) -> Result<Arc<dyn SentimentScorer>> {
    match name.to_lowercase().as_str() {
        "vader" => Ok(Arc::new(VaderScorer::new())),
        "neutral" => Ok(Arc::new(NeutralScorer)),
        other => Err(Error::Scoring(format!(
            "Unknown scorer: {} (available: {})",
            other,
            AVAILABLE_SCORERS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_scorer() {
        assert_eq!(create_scorer("vader").unwrap().name(), "VADER");
        assert_eq!(create_scorer("Neutral").unwrap().name(), "Neutral");
        assert!(matches!(create_scorer("llm"), Err(Error::Scoring(_))));
    }
}

use std::fmt;

use ns_core::{Error, PolarityScores, Result, SentimentScorer};
use tracing::debug;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Lexicon and rule based scorer (VADER). The lexicon is loaded once when the
/// analyzer is built; scoring afterwards is read-only.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        debug!("Loading VADER lexicon");
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VaderScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaderScorer")
            .field("analyzer", &"<SentimentIntensityAnalyzer>")
            .finish()
    }
}

impl SentimentScorer for VaderScorer {
    fn name(&self) -> &str {
        "VADER"
    }

    fn polarity_scores(&self, text: &str) -> Result<PolarityScores> {
        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied();

        let compound = get("compound")
            .ok_or_else(|| Error::Scoring("analyzer returned no compound score".to_string()))?;

        Ok(PolarityScores {
            negative: get("neg").unwrap_or_default(),
            neutral: get("neu").unwrap_or_default(),
            positive: get("pos").unwrap_or_default(),
            compound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vader_polarity() {
        let scorer = VaderScorer::new();

        let positive = scorer.polarity_scores("great breakthrough").unwrap();
        assert!(positive.compound >= 0.2, "got {}", positive.compound);
        assert!(positive.positive > 0.0);

        let negative = scorer.polarity_scores("terrible disaster").unwrap();
        assert!(negative.compound <= -0.2, "got {}", negative.compound);
        assert!(negative.negative > 0.0);
    }

    #[test]
    fn test_vader_compound_is_bounded() {
        let scorer = VaderScorer::new();
        let text = "amazing wonderful excellent superb fantastic great love love love!!!";
        let compound = scorer.polarity_scores(text).unwrap().compound;
        assert!((-1.0..=1.0).contains(&compound));
    }
}

use ns_core::{PolarityScores, Result, SentimentScorer};

/// Scores every text as fully neutral. Useful when no lexicon is wanted, and
/// as a stand-in in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralScorer;

impl SentimentScorer for NeutralScorer {
    fn name(&self) -> &str {
        "Neutral"
    }

    fn polarity_scores(&self, _text: &str) -> Result<PolarityScores> {
        Ok(PolarityScores {
            neutral: 1.0,
            ..PolarityScores::default()
        })
    }
}

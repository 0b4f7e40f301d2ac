use std::sync::Arc;

use ns_core::{Article, ScoredArticle, SentimentScorer};
use tracing::{debug, warn};

/// Turns raw articles into scored, categorized ones.
///
/// The scorer is injected once and shared; enrichment itself holds no state,
/// so a pipeline can serve any number of requests.
#[derive(Debug, Clone)]
pub struct SentimentPipeline {
    scorer: Arc<dyn SentimentScorer>,
}

impl SentimentPipeline {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Compound score for `text`. Blank text, scorer failures and non-finite
    /// results all score 0.0.
    pub fn score_text(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        match self.scorer.polarity_scores(text) {
            Ok(scores) if scores.compound.is_finite() => scores.compound,
            Ok(scores) => {
                warn!(compound = scores.compound, scorer = self.scorer.name(), "Discarding non-finite score");
                0.0
            }
            Err(e) => {
                warn!(error = %e, scorer = self.scorer.name(), "Scoring failed, treating text as neutral");
                0.0
            }
        }
    }

    pub fn score_article(&self, article: Article) -> ScoredArticle {
        let score = self.score_text(article.scorable_text());
        ScoredArticle::new(article, score)
    }

    /// Score every article, one output per input, in input order.
    pub fn enrich(&self, articles: Vec<Article>) -> Vec<ScoredArticle> {
        let scored: Vec<ScoredArticle> = articles
            .into_iter()
            .map(|article| self.score_article(article))
            .collect();
        debug!(count = scored.len(), scorer = self.scorer.name(), "Enriched articles");
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::distribution;
    use crate::models::VaderScorer;
    use ns_core::{Error, PolarityScores, Result, SentimentCategory};

    /// Scores by counting a handful of marker words.
    #[derive(Debug)]
    struct KeywordScorer;

    impl SentimentScorer for KeywordScorer {
        fn name(&self) -> &str {
            "Keyword"
        }

        fn polarity_scores(&self, text: &str) -> Result<PolarityScores> {
            if text.contains("explode") {
                return Err(Error::Scoring("lexicon unavailable".to_string()));
            }
            if text.contains("weird") {
                return Ok(PolarityScores { compound: f64::NAN, ..Default::default() });
            }
            let compound = if text.contains("good") {
                0.6
            } else if text.contains("bad") {
                -0.6
            } else {
                0.05
            };
            Ok(PolarityScores { compound, ..Default::default() })
        }
    }

    fn article(title: &str, description: Option<&str>, content: Option<&str>) -> Article {
        let mut article = Article::new(title, "Test Wire", format!("http://example.com/{}", title));
        article.description = description.map(str::to_string);
        article.content = content.map(str::to_string);
        article
    }

    fn keyword_pipeline() -> SentimentPipeline {
        SentimentPipeline::new(Arc::new(KeywordScorer))
    }

    #[test]
    fn test_enrich_preserves_order_and_length() {
        let articles = vec![
            article("a", Some("good news"), None),
            article("b", Some("bad news"), None),
            article("c", None, Some("plain news")),
            article("d", Some("good again"), Some("bad content ignored")),
        ];

        let scored = keyword_pipeline().enrich(articles.clone());

        assert_eq!(scored.len(), articles.len());
        for (input, output) in articles.iter().zip(&scored) {
            assert_eq!(&output.article, input);
        }
        let categories: Vec<_> = scored.iter().map(|s| s.sentiment_category).collect();
        assert_eq!(
            categories,
            vec![
                SentimentCategory::Positive,
                SentimentCategory::Negative,
                SentimentCategory::Neutral,
                SentimentCategory::Positive,
            ]
        );
        assert_eq!(scored[2].sentiment_score, 0.05);
    }

    #[test]
    fn test_enrich_falls_back_to_content() {
        let scored = keyword_pipeline().enrich(vec![article("a", Some(""), Some("bad content"))]);
        assert_eq!(scored[0].sentiment_category, SentimentCategory::Negative);
    }

    #[test]
    fn test_failures_do_not_abort_batch() {
        let articles = vec![
            article("a", Some("good"), None),
            article("b", Some("explode"), None),
            article("c", Some("weird"), None),
            article("d", Some("bad"), None),
        ];

        let scored = keyword_pipeline().enrich(articles);

        assert_eq!(scored.len(), 4);
        assert_eq!(scored[1].sentiment_score, 0.0);
        assert_eq!(scored[1].sentiment_category, SentimentCategory::Neutral);
        assert_eq!(scored[2].sentiment_score, 0.0);
        assert_eq!(scored[3].sentiment_category, SentimentCategory::Negative);
    }

    #[test]
    fn test_missing_text_is_neutral() {
        let scored = keyword_pipeline().enrich(vec![article("a", None, None), article("b", Some("   "), None)]);
        assert!(scored.iter().all(|s| s.sentiment_score == 0.0));
        assert!(scored.iter().all(|s| s.sentiment_category == SentimentCategory::Neutral));
    }

    #[test]
    fn test_enrich_empty() {
        assert!(keyword_pipeline().enrich(Vec::new()).is_empty());
    }

    #[test]
    fn test_scorer_name() {
        assert_eq!(keyword_pipeline().scorer_name(), "Keyword");
    }

    #[test]
    fn test_end_to_end_with_vader() {
        let pipeline = SentimentPipeline::new(Arc::new(VaderScorer::new()));
        let articles = vec![
            article("one", Some("great breakthrough"), None),
            article("two", Some("terrible disaster"), None),
            article("three", Some(""), None),
        ];

        let scored = pipeline.enrich(articles);

        let categories: Vec<_> = scored.iter().map(|s| s.sentiment_category).collect();
        assert_eq!(
            categories,
            vec![
                SentimentCategory::Positive,
                SentimentCategory::Negative,
                SentimentCategory::Neutral,
            ]
        );
        let dist = distribution(&scored);
        assert_eq!(dist.positive, 1);
        assert_eq!(dist.negative, 1);
        assert_eq!(dist.neutral, 1);
    }
}

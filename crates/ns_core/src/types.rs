use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scores at or above this are Positive.
pub const POSITIVE_THRESHOLD: f64 = 0.2;
/// Scores at or below this are Negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.2;

/// A raw article as handed over by a news source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub source_name: String,
    pub url: String,
    pub description: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url_to_image: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>, source_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source_name: source_name.into(),
            url: url.into(),
            description: None,
            content: None,
            author: None,
            published_at: None,
            url_to_image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// The text sentiment is computed from: the description, falling back to
    /// the content, falling back to the empty string.
    pub fn scorable_text(&self) -> &str {
        [self.description.as_deref(), self.content.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
}

impl SentimentCategory {
    pub const ALL: [SentimentCategory; 3] = [
        SentimentCategory::Positive,
        SentimentCategory::Negative,
        SentimentCategory::Neutral,
    ];

    pub fn from_score(score: f64) -> Self {
        if score >= POSITIVE_THRESHOLD {
            SentimentCategory::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            SentimentCategory::Negative
        } else {
            SentimentCategory::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "Positive",
            SentimentCategory::Negative => "Negative",
            SentimentCategory::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SentimentCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown sentiment category: {}", s))
    }
}

/// Map a compound score to its category. NaN falls through to Neutral.
pub fn classify(score: f64) -> SentimentCategory {
    SentimentCategory::from_score(score)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: Article,
    pub sentiment_score: f64,
    pub sentiment_category: SentimentCategory,
}

impl ScoredArticle {
    pub fn new(article: Article, sentiment_score: f64) -> Self {
        Self {
            article,
            sentiment_score,
            sentiment_category: classify(sentiment_score),
        }
    }
}

/// The category a result list is narrowed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(SentimentCategory),
    /// Anything that is neither `all` nor a category name. Matches nothing.
    Unknown(String),
}

impl CategoryFilter {
    pub fn parse(requested: &str) -> Self {
        if requested == "all" {
            return CategoryFilter::All;
        }
        match requested.parse::<SentimentCategory>() {
            Ok(category) => CategoryFilter::Only(category),
            Err(_) => CategoryFilter::Unknown(requested.to_string()),
        }
    }

    pub fn matches(&self, category: SentimentCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
            CategoryFilter::Unknown(_) => false,
        }
    }

    /// The form value this filter round-trips to.
    pub fn as_param(&self) -> String {
        match self {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Only(category) => category.as_str().to_lowercase(),
            CategoryFilter::Unknown(raw) => raw.clone(),
        }
    }
}

/// Parameters for one page of a keyword search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsQuery {
    pub query: String,
    pub language: String,
    pub page_size: u32,
    pub page: u32,
}

impl NewsQuery {
    pub const MAX_PAGE_SIZE: u32 = 100;

    pub fn new(query: impl Into<String>, language: impl Into<String>, page_size: u32, page: u32) -> Self {
        Self {
            query: query.into(),
            language: language.into(),
            page_size: page_size.clamp(1, Self::MAX_PAGE_SIZE),
            page: page.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.2), SentimentCategory::Positive);
        assert_eq!(classify(-0.2), SentimentCategory::Negative);
        assert_eq!(classify(0.0), SentimentCategory::Neutral);
        assert_eq!(classify(0.1999), SentimentCategory::Neutral);
        assert_eq!(classify(-0.1999), SentimentCategory::Neutral);
        assert_eq!(classify(1.0), SentimentCategory::Positive);
        assert_eq!(classify(-1.0), SentimentCategory::Negative);
        assert_eq!(classify(f64::NAN), SentimentCategory::Neutral);
    }

    #[test]
    fn test_classify_is_threshold_partition() {
        for step in -100..=100 {
            let score = step as f64 / 100.0;
            let category = classify(score);
            assert_eq!(category == SentimentCategory::Positive, score >= POSITIVE_THRESHOLD);
            assert_eq!(category == SentimentCategory::Negative, score <= NEGATIVE_THRESHOLD);
        }
    }

    #[test]
    fn test_scorable_text_fallbacks() {
        let base = Article::new("t", "s", "http://example.com");
        assert_eq!(base.scorable_text(), "");

        let content_only = base.clone().with_content("from content");
        assert_eq!(content_only.scorable_text(), "from content");

        let empty_description = base.clone().with_description("").with_content("from content");
        assert_eq!(empty_description.scorable_text(), "from content");

        let both = base.with_description("from description").with_content("from content");
        assert_eq!(both.scorable_text(), "from description");
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("positive"),
            CategoryFilter::Only(SentimentCategory::Positive)
        );
        assert_eq!(
            CategoryFilter::parse("NEGATIVE"),
            CategoryFilter::Only(SentimentCategory::Negative)
        );
        assert_eq!(
            CategoryFilter::parse("ALL"),
            CategoryFilter::Unknown("ALL".to_string())
        );
        assert!(!CategoryFilter::parse("mixed").matches(SentimentCategory::Neutral));
        assert_eq!(CategoryFilter::parse("Neutral").as_param(), "neutral");
    }

    #[test]
    fn test_news_query_clamps() {
        let query = NewsQuery::new("rust", "en", 500, 0);
        assert_eq!(query.page_size, NewsQuery::MAX_PAGE_SIZE);
        assert_eq!(query.page, 1);
        assert_eq!(NewsQuery::new("rust", "en", 0, 3).page_size, 1);
    }

    #[test]
    fn test_scored_article_serializes_flat() {
        let scored = ScoredArticle::new(
            Article::new("Title", "Wire", "http://example.com").with_description("desc"),
            0.5,
        );
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["title"], "Title");
        assert_eq!(value["source_name"], "Wire");
        assert_eq!(value["sentiment_category"], "Positive");
    }
}

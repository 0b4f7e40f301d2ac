use ns_core::{ScoredArticle, SentimentCategory};
use serde::Serialize;

/// Number of histogram bins used for the score chart.
pub const DEFAULT_BIN_COUNT: usize = 20;

const SCORE_MIN: f64 = -1.0;
const SCORE_MAX: f64 = 1.0;

/// Article count per category. All three categories are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn record(&mut self, category: SentimentCategory) {
        match category {
            SentimentCategory::Positive => self.positive += 1,
            SentimentCategory::Negative => self.negative += 1,
            SentimentCategory::Neutral => self.neutral += 1,
        }
    }

    pub fn get(&self, category: SentimentCategory) -> usize {
        match category {
            SentimentCategory::Positive => self.positive,
            SentimentCategory::Negative => self.negative,
            SentimentCategory::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Counts in chart order: Positive, Negative, Neutral.
    pub fn iter(&self) -> impl Iterator<Item = (SentimentCategory, usize)> + '_ {
        SentimentCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

/// Equal-width histogram of compound scores over `[-1.0, 1.0]`.
///
/// Bins are half-open `[lo, hi)` except the last, which also holds `1.0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreHistogram {
    bins: Vec<usize>,
}

impl ScoreHistogram {
    /// A zero-count histogram. A bin count of 0 is bumped to 1.
    pub fn new(bin_count: usize) -> Self {
        Self {
            bins: vec![0; bin_count.max(1)],
        }
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    pub fn bin_width(&self) -> f64 {
        (SCORE_MAX - SCORE_MIN) / self.bins.len() as f64
    }

    pub fn counts(&self) -> &[usize] {
        &self.bins
    }

    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Lower and upper edge of bin `index`.
    pub fn bin_edges(&self, index: usize) -> (f64, f64) {
        (self.edge(index), self.edge(index + 1))
    }

    fn edge(&self, index: usize) -> f64 {
        if index >= self.bins.len() {
            SCORE_MAX
        } else {
            SCORE_MIN + index as f64 * self.bin_width()
        }
    }

    /// Index of the bin holding `score`. Out-of-range scores land in the edge bins.
    pub fn bin_index(&self, score: f64) -> usize {
        let last = self.bins.len() - 1;
        let score = score.clamp(SCORE_MIN, SCORE_MAX);
        let mut index = (((score - SCORE_MIN) / self.bin_width()).floor() as usize).min(last);
        // Rounding can put a score one bin off near an edge; trust the edges.
        if index < last && score >= self.edge(index + 1) {
            index += 1;
        } else if index > 0 && score < self.edge(index) {
            index -= 1;
        }
        index
    }

    pub fn record(&mut self, score: f64) {
        let index = self.bin_index(score);
        self.bins[index] += 1;
    }
}

/// Count articles per category.
pub fn distribution(articles: &[ScoredArticle]) -> SentimentDistribution {
    let mut distribution = SentimentDistribution::default();
    for article in articles {
        distribution.record(article.sentiment_category);
    }
    distribution
}

/// Bucket article scores into `bin_count` equal-width bins.
pub fn histogram(articles: &[ScoredArticle], bin_count: usize) -> ScoreHistogram {
    let mut histogram = ScoreHistogram::new(bin_count);
    for article in articles {
        histogram.record(article.sentiment_score);
    }
    histogram
}

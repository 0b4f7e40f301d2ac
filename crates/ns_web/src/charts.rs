//! SVG chart rendering for the result page. Both charts are written to fixed
//! file names inside the static directory, so the latest search wins.

use std::path::Path;

use ns_core::{Result, SentimentCategory};
use ns_sentiment::{ScoreHistogram, SentimentDistribution};
use tracing::debug;

use crate::views::escape;

pub const DISTRIBUTION_CHART: &str = "sentiment_distribution.svg";
pub const SCORES_CHART: &str = "sentiment_scores.svg";

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const LEFT: f64 = 90.0;
const RIGHT: f64 = 40.0;
const TOP: f64 = 70.0;
const BOTTOM: f64 = 80.0;

struct Plot {
    body: String,
    max_count: usize,
}

impl Plot {
    fn new(title: &str, x_label: &str, y_label: &str, max_count: usize) -> Self {
        let mut plot = Self {
            body: String::new(),
            max_count: max_count.max(1),
        };
        plot.push(format!(
            r#"<rect width="{}" height="{}" fill="white"/>"#,
            WIDTH, HEIGHT
        ));
        plot.text(WIDTH / 2.0, TOP / 2.0, "middle", 20, title);
        plot.text(WIDTH / 2.0, HEIGHT - 20.0, "middle", 14, x_label);
        plot.push(format!(
            r#"<text x="25" y="{:.1}" text-anchor="middle" font-size="14" transform="rotate(-90 25 {:.1})">{}</text>"#,
            Self::plot_top() + Self::plot_height() / 2.0,
            Self::plot_top() + Self::plot_height() / 2.0,
            escape(y_label)
        ));
        plot.axes();
        plot
    }

    fn plot_top() -> f64 {
        TOP
    }

    fn plot_height() -> f64 {
        HEIGHT - TOP - BOTTOM
    }

    fn plot_width() -> f64 {
        WIDTH - LEFT - RIGHT
    }

    fn baseline() -> f64 {
        TOP + Self::plot_height()
    }

    fn push(&mut self, element: String) {
        self.body.push_str(&element);
        self.body.push('\n');
    }

    fn text(&mut self, x: f64, y: f64, anchor: &str, size: u32, content: &str) {
        self.push(format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="{}" font-size="{}">{}</text>"#,
            x,
            y,
            anchor,
            size,
            escape(content)
        ));
    }

    fn bar_height(&self, count: usize) -> f64 {
        count as f64 / self.max_count as f64 * Self::plot_height()
    }

    /// Axes plus integer y ticks.
    fn axes(&mut self) {
        let baseline = Self::baseline();
        self.push(format!(
            r#"<line x1="{LEFT}" y1="{TOP}" x2="{LEFT}" y2="{baseline}" stroke="black"/>"#
        ));
        self.push(format!(
            r#"<line x1="{LEFT}" y1="{baseline}" x2="{:.1}" y2="{baseline}" stroke="black"/>"#,
            LEFT + Self::plot_width()
        ));

        let step = ((self.max_count as f64) / 5.0).ceil().max(1.0) as usize;
        let mut tick = 0;
        while tick <= self.max_count {
            let y = baseline - self.bar_height(tick);
            self.push(format!(
                r#"<line x1="{:.1}" y1="{y:.1}" x2="{LEFT}" y2="{y:.1}" stroke="black"/>"#,
                LEFT - 5.0
            ));
            self.text(LEFT - 10.0, y + 4.0, "end", 12, &tick.to_string());
            tick += step;
        }
    }

    fn bar(&mut self, x: f64, width: f64, count: usize, fill: &str, stroke: Option<&str>) {
        let height = self.bar_height(count);
        let stroke = stroke
            .map(|color| format!(r#" stroke="{}""#, color))
            .unwrap_or_default();
        self.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"{}/>"#,
            x,
            Self::baseline() - height,
            width,
            height,
            fill,
            stroke
        ));
    }

    fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">
{body}</svg>
"#,
            w = WIDTH,
            h = HEIGHT,
            body = self.body
        )
    }
}

fn category_color(category: SentimentCategory) -> &'static str {
    match category {
        SentimentCategory::Positive => "green",
        SentimentCategory::Negative => "red",
        SentimentCategory::Neutral => "blue",
    }
}

/// Bar chart of articles per category.
pub fn distribution_svg(distribution: &SentimentDistribution) -> String {
    let max_count = distribution.iter().map(|(_, count)| count).max().unwrap_or(0);
    let mut plot = Plot::new(
        "Sentiment Distribution of News Articles",
        "Sentiment Category",
        "Number of Articles",
        max_count,
    );

    let slot = Plot::plot_width() / SentimentCategory::ALL.len() as f64;
    for (i, (category, count)) in distribution.iter().enumerate() {
        let x = LEFT + slot * i as f64;
        plot.bar(x + slot * 0.2, slot * 0.6, count, category_color(category), None);
        plot.text(x + slot / 2.0, Plot::baseline() + 20.0, "middle", 13, category.as_str());
    }
    plot.finish()
}

/// Histogram of compound scores.
pub fn histogram_svg(histogram: &ScoreHistogram) -> String {
    let max_count = histogram.counts().iter().copied().max().unwrap_or(0);
    let mut plot = Plot::new(
        "Distribution of Sentiment Scores",
        "Sentiment Score",
        "Number of Articles",
        max_count,
    );

    let slot = Plot::plot_width() / histogram.bin_count() as f64;
    for (i, &count) in histogram.counts().iter().enumerate() {
        plot.bar(LEFT + slot * i as f64, slot, count, "purple", Some("black"));
    }
    for tick in [-1.0, -0.5, 0.0, 0.5, 1.0] {
        let x = LEFT + (tick + 1.0) / 2.0 * Plot::plot_width();
        plot.text(x, Plot::baseline() + 20.0, "middle", 13, &format!("{:.1}", tick));
    }
    plot.finish()
}

/// Write both charts into `dir`, creating it if needed.
pub async fn write_charts(
    dir: &Path,
    distribution: &SentimentDistribution,
    histogram: &ScoreHistogram,
) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(DISTRIBUTION_CHART), distribution_svg(distribution)).await?;
    tokio::fs::write(dir.join(SCORES_CHART), histogram_svg(histogram)).await?;
    debug!(dir = %dir.display(), "Wrote sentiment charts");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_distribution() -> SentimentDistribution {
        SentimentDistribution {
            positive: 4,
            negative: 2,
            neutral: 0,
        }
    }

    #[test]
    fn test_distribution_svg() {
        let svg = distribution_svg(&sample_distribution());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Sentiment Distribution of News Articles"));
        for label in ["Positive", "Negative", "Neutral"] {
            assert!(svg.contains(label));
        }
        assert!(svg.contains(r#"fill="green""#));
        assert!(svg.contains(r#"fill="red""#));
        assert!(svg.contains(r#"fill="blue""#));
    }

    #[test]
    fn test_histogram_svg_has_one_bar_per_bin() {
        let svg = histogram_svg(&ScoreHistogram::new(20));
        assert_eq!(svg.matches(r#"fill="purple""#).count(), 20);
        assert!(svg.contains("Distribution of Sentiment Scores"));
    }

    #[tokio::test]
    async fn test_write_charts() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("static");

        write_charts(&target, &sample_distribution(), &ScoreHistogram::new(20))
            .await
            .unwrap();

        let distribution = std::fs::read_to_string(target.join(DISTRIBUTION_CHART)).unwrap();
        let scores = std::fs::read_to_string(target.join(SCORES_CHART)).unwrap();
        assert!(distribution.contains("Number of Articles"));
        assert!(scores.contains("Sentiment Score"));
    }
}

use std::io::Write;

use ns_core::{CategoryFilter, NewsQuery, NewsSource};
use ns_sentiment::{distribution, filter_by_category, SentimentPipeline};
use tracing::info;

/// Fetch one page, score and filter it, and print a numbered report to `out`
/// followed by a per-category summary line. Returns how many articles were
/// printed.
pub async fn run_search<W: Write>(
    pipeline: &SentimentPipeline,
    news: &dyn NewsSource,
    query: &NewsQuery,
    filter: &CategoryFilter,
    out: &mut W,
) -> anyhow::Result<usize> {
    info!("🔎 Searching {} for {:?}", news.name(), query.query);
    let articles = news.fetch_articles(query).await?;
    let scored = filter_by_category(pipeline.enrich(articles), filter);

    for (idx, article) in scored.iter().enumerate() {
        writeln!(out, "{}. {}", idx + 1, article.article.title)?;
        writeln!(out, "    Source: {}", article.article.source_name)?;
        writeln!(out, "    URL: {}", article.article.url)?;
        writeln!(
            out,
            "    Sentiment: {} ({:.3})\n",
            article.sentiment_category, article.sentiment_score
        )?;
    }

    let counts = distribution(&scored);
    writeln!(
        out,
        "Positive: {}, Negative: {}, Neutral: {}",
        counts.positive, counts.negative, counts.neutral
    )?;
    out.flush()?;

    info!(count = scored.len(), filter = %filter.as_param(), "Search complete");
    Ok(scored.len())
}

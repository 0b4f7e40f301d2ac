use ns_core::{CategoryFilter, ScoredArticle};

/// Keep the articles whose category the filter accepts, in their original
/// order. `All` returns the input untouched; an unknown category returns
/// nothing.
pub fn filter_by_category(articles: Vec<ScoredArticle>, requested: &CategoryFilter) -> Vec<ScoredArticle> {
    match requested {
        CategoryFilter::All => articles,
        _ => articles
            .into_iter()
            .filter(|article| requested.matches(article.sentiment_category))
            .collect(),
    }
}

use chrono::{DateTime, Utc};
use ns_core::Article;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EverythingResponse {
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) total_results: Option<u64>,
    #[serde(default)]
    pub(crate) articles: Option<Vec<WireArticle>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireArticle {
    #[serde(default)]
    source: Option<WireSource>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    url_to_image: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireSource {
    #[serde(default)]
    name: Option<String>,
}

impl EverythingResponse {
    pub(crate) fn into_articles(self) -> Vec<Article> {
        self.articles
            .unwrap_or_default()
            .into_iter()
            .map(WireArticle::into_article)
            .collect()
    }
}

impl WireArticle {
    fn into_article(self) -> Article {
        Article {
            title: self.title.unwrap_or_default(),
            source_name: self.source.and_then(|s| s.name).unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            description: self.description,
            content: self.content,
            author: self.author,
            published_at: self
                .published_at
                .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
                .map(|date| date.with_timezone(&Utc)),
            url_to_image: self.url_to_image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_sparse_payload() {
        let body = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": null, "name": "The Verge"},
                    "author": "Jane Doe",
                    "title": "Chips get faster",
                    "description": "A great leap",
                    "url": "https://example.com/chips",
                    "urlToImage": null,
                    "publishedAt": "2024-05-01T12:30:00Z",
                    "content": "Full text [+120 chars]"
                },
                {"title": null, "url": "https://example.com/bare", "source": {"name": null}}
            ]
        }"#;

        let response: EverythingResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total_results, Some(2));
        let articles = response.into_articles();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source_name, "The Verge");
        assert_eq!(articles[0].author.as_deref(), Some("Jane Doe"));
        assert_eq!(
            articles[0].published_at.map(|d| d.to_rfc3339()),
            Some("2024-05-01T12:30:00+00:00".to_string())
        );
        assert_eq!(articles[1].title, "");
        assert_eq!(articles[1].source_name, "");
        assert!(articles[1].description.is_none());
    }

    #[test]
    fn test_missing_articles_field() {
        let response: EverythingResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(response.into_articles().is_empty());

        let response: EverythingResponse = serde_json::from_str(r#"{"articles":null}"#).unwrap();
        assert!(response.into_articles().is_empty());
    }
}

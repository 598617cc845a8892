pub mod http_fetcher;

use async_trait::async_trait;
use serde::Deserialize;

use crate::app::{NewsdeskError, Result};
use crate::domain::Article;

pub use http_fetcher::HttpNewsSource;

/// Remote service that yields the current top headlines.
#[async_trait]
pub trait NewsSource {
    /// Fetch the full current article list, in the order the remote returns it.
    async fn fetch_headlines(&self) -> Result<Vec<Article>>;
}

#[derive(Debug, Deserialize)]
struct HeadlinesBody {
    articles: Option<Vec<ArticleBody>>,
}

#[derive(Debug, Deserialize)]
struct ArticleBody {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Decode a successful top-headlines body.
///
/// `null` fields become empty strings; a body without an `articles` array is
/// rejected.
pub fn decode_headlines(body: &[u8]) -> Result<Vec<Article>> {
    let parsed: HeadlinesBody = serde_json::from_slice(body)?;
    let articles = parsed
        .articles
        .ok_or_else(|| NewsdeskError::Payload("response has no articles array".into()))?;

    Ok(articles
        .into_iter()
        .map(|a| Article {
            title: a.title.unwrap_or_default(),
            description: a.description.unwrap_or_default(),
            url: a.url.unwrap_or_default(),
        })
        .collect())
}

/// Pull the `message` out of an error body, falling back to the raw text.
pub(crate) fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
  "status": "ok",
  "totalResults": 2,
  "articles": [
    {
      "source": {"id": null, "name": "Example Times"},
      "author": "A. Writer",
      "title": "First headline",
      "description": "Something happened",
      "url": "https://example.com/first",
      "urlToImage": null,
      "publishedAt": "2024-01-01T00:00:00Z",
      "content": null
    },
    {
      "source": {"id": null, "name": "Example Post"},
      "title": "Second headline",
      "description": null,
      "url": "https://example.com/second"
    }
  ]
}"#;

    #[test]
    fn test_decode_headlines() {
        let articles = decode_headlines(SAMPLE.as_bytes()).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(
            articles[0],
            Article::new("First headline", "Something happened", "https://example.com/first")
        );
        assert_eq!(articles[1].title, "Second headline");
        assert_eq!(articles[1].description, "");
    }

    #[test]
    fn test_decode_empty_list() {
        let articles = decode_headlines(br#"{"status":"ok","articles":[]}"#).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_decode_rejects_missing_articles() {
        let err = decode_headlines(br#"{"status":"ok"}"#).unwrap_err();
        assert!(matches!(err, NewsdeskError::Payload(_)));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode_headlines(b"<html>nope</html>").unwrap_err();
        assert!(matches!(err, NewsdeskError::Json(_)));
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        let body = br#"{"status":"error","code":"apiKeyMissing","message":"Your API key is missing."}"#;
        assert_eq!(error_message(body), "Your API key is missing.");
        assert_eq!(error_message(b" upstream down \n"), "upstream down");
    }
}

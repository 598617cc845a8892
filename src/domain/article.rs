use serde::{Deserialize, Serialize};

/// One headline as published to the render layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_with_title() {
        let article = Article::new("Markets rally", "", "https://example.com/a");
        assert_eq!(article.display_title(), "Markets rally");
    }

    #[test]
    fn test_display_title_without_title() {
        let article = Article::new("", "body", "https://example.com/a");
        assert_eq!(article.display_title(), "(Untitled)");
    }
}

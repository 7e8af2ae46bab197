//! Result type for article extraction.
//!
//! This module defines the [`Article`] struct holding the extracted content
//! and the metadata mined from the document.

use serde::{Deserialize, Serialize};

/// The readable article extracted from an HTML document.
///
/// Metadata fields are `Option<String>` since few pages declare all of them;
/// a missing field is never an error. `content` and `text_content` may be
/// empty when the grab loop exhausted every relaxation attempt without
/// finding text, and that outcome still yields an `Article`, not an error.
///
/// The struct derives serde traits so extractions can be persisted as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// The heading that precedes the article's content.
    ///
    /// Taken from meta tags (Dublin Core, Open Graph, weibo, twitter) when
    /// present, otherwise derived from `<title>` with site-name chrome
    /// stripped, falling back to a lone `<h1>`.
    pub title: Option<String>,

    /// Printed line naming the author, from meta tags or a byline element
    /// found during extraction.
    pub byline: Option<String>,

    /// Text direction of the document ("ltr" or "rtl"), from the `dir`
    /// attribute of `<html>` or `<body>`.
    pub dir: Option<String>,

    /// The article content as HTML, wrapped in the
    /// `<div id="readability-page-1" class="page">` container.
    pub content: String,

    /// The article content with all HTML tags removed, trimmed.
    pub text_content: String,

    /// Summary of the article, from meta description tags or the first
    /// paragraph of the extracted content.
    pub excerpt: Option<String>,

    /// Name of the publishing website, from `og:site_name`.
    pub site_name: Option<String>,

    /// Largest square PNG icon declared by the page, resolved against the
    /// page URL.
    pub favicon: Option<String>,

    /// Representative image for the article, resolved against the page URL.
    pub image: Option<String>,

    /// Char count of `text_content`.
    pub length: usize,

    /// Outer HTML of the first element child of the article container, or
    /// `None` when no content was found.
    pub node: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_article_is_empty() {
        let article = Article::default();

        assert!(article.title.is_none());
        assert!(article.content.is_empty());
        assert!(article.text_content.is_empty());
        assert_eq!(article.length, 0);
        assert!(article.node.is_none());
    }

    #[test]
    fn article_round_trips_through_json() {
        let article = Article {
            title: Some("hello world".to_string()),
            content: "<p>lorem ipsum</p>".to_string(),
            text_content: "lorem ipsum".to_string(),
            length: 11,
            ..Article::default()
        };

        let json = serde_json::to_string(&article).expect("serialize");
        let back: Article = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, article);
    }
}

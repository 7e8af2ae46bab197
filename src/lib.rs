//! # rs-readability
//!
//! Rust port of the readability algorithm used by reader-mode features in
//! browsers.
//!
//! Given an HTML document and its URL, the library extracts the "readable"
//! primary article: title, byline, excerpt, site name, favicon,
//! representative image, and both HTML and plain-text renderings of the main
//! content.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_readability::parse;
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><article><p>Main content here.</p></article></body></html>"#;
//!
//! let article = parse(html, "https://example.com/post")?;
//! println!("Title: {:?}", article.title);
//! println!("Text: {}", article.text_content);
//! # Ok::<(), rs_readability::Error>(())
//! ```
//!
//! ## How it works
//!
//! Processing runs in strict phases. The document is guarded against an
//! optional element-count cap, then scripts and styles are stripped and
//! `<br>` runs are rewritten into paragraphs. Metadata is mined from meta
//! tags, link elements, and headings. The grab loop then scores elements by
//! text density, commas, and class/id signals, picks a top candidate with
//! its qualifying siblings, and cleans the result; attempts that yield too
//! little text are retried with one heuristic relaxed at a time. Finally
//! relative URLs are rewritten and class attributes stripped.
//!
//! ## Configuration
//!
//! ```rust
//! use rs_readability::{parse_with_options, Options};
//!
//! let html = "<html><body><p>short</p></body></html>";
//! let options = Options {
//!     max_elems_to_parse: 1000,
//!     char_threshold: 300,
//!     ..Options::default()
//! };
//!
//! let article = parse_with_options(html, "https://example.com/", &options)?;
//! # Ok::<(), rs_readability::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use rs_readability::{parse, Error};
//!
//! match parse("<p>hi</p>", "not a url") {
//!     Err(Error::InvalidUrl(_)) => {}
//!     other => panic!("expected an invalid URL error, got {other:?}"),
//! }
//! ```

mod article;
mod error;
mod extractor;
mod html_processing;
mod metadata;
mod options;
mod patterns;
mod readerable;
mod url_utils;

/// DOM operations adapter providing browser-style primitives.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use article::Article;
pub use error::{Error, Result};
pub use options::Options;
pub use readerable::{is_readable, is_readable_bytes};

use url::Url;

use crate::extractor::Extractor;

/// Parse an HTML document and extract the readable article, using default
/// options.
///
/// # Arguments
///
/// * `html` - The HTML document as a string slice
/// * `url` - The page URL, used to resolve relative links
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] when `url` is not an absolute URL, and
/// [`Error::TooManyElements`] when the document exceeds the configured
/// element cap. A page where no content is found is NOT an error: the
/// returned article has empty `content` and `text_content`.
pub fn parse(html: &str, url: &str) -> Result<Article> {
    parse_with_options(html, url, &Options::default())
}

/// Parse an HTML document with custom options.
///
/// # Errors
///
/// Same failure modes as [`parse`].
pub fn parse_with_options(html: &str, url: &str, options: &Options) -> Result<Article> {
    let base = Url::parse(url).map_err(|err| Error::InvalidUrl(err.to_string()))?;
    let doc = dom::parse(html);

    // Guard against oversized documents before any work happens. The root
    // element counts too.
    if options.max_elems_to_parse > 0 {
        let num_elements = dom::document_element(&doc)
            .map_or(0, |root| dom::get_elements_by_tag_name(&root, "*").len() + 1);
        if num_elements > options.max_elems_to_parse {
            return Err(Error::TooManyElements(num_elements));
        }
    }

    html_processing::remove_scripts(&doc);
    html_processing::prep_document(&doc);

    let meta = metadata::article_metadata(&doc, &base);
    let dir = metadata::article_dir(&doc);

    let mut extractor = Extractor::new(options, meta.title.clone().unwrap_or_default());
    let grabbed = extractor.grab_article(&doc);

    let mut article = Article {
        title: meta.title,
        byline: meta.byline.or_else(|| extractor.article_byline.clone()),
        dir,
        excerpt: meta.excerpt,
        site_name: meta.site_name,
        image: meta.image,
        favicon: meta.favicon,
        ..Article::default()
    };

    if let Some(content_html) = grabbed {
        // The attempt's tree is gone; reparse the serialized container for
        // post-processing and final rendering.
        let article_doc = dom::parse(&content_html);
        if let Some(container) = dom::body(&article_doc) {
            html_processing::post_process_content(&container, &base, &options.classes_to_preserve);

            // Without a metadata excerpt, the first paragraph serves as one.
            if article.excerpt.is_none() {
                if let Some(first_p) = dom::get_elements_by_tag_name(&container, "p").first() {
                    let text = dom::text_content(first_p).trim().to_string();
                    if !text.is_empty() {
                        article.excerpt = Some(text);
                    }
                }
            }

            article.node = dom::first_element_child(&container).map(|n| dom::outer_html(&n));
            article.content = dom::inner_html(&container);
            article.text_content = dom::text_content(&container).trim().to_string();
            article.length = article.text_content.chars().count();
        }
    }

    Ok(article)
}

/// Parse an HTML document supplied as raw bytes, detecting the character
/// encoding from meta tags before extraction.
///
/// # Errors
///
/// Same failure modes as [`parse`]; encoding problems never error, invalid
/// sequences are replaced.
pub fn parse_bytes(html: &[u8], url: &str) -> Result<Article> {
    parse_bytes_with_options(html, url, &Options::default())
}

/// Byte-input variant of [`parse_with_options`].
///
/// # Errors
///
/// Same failure modes as [`parse`].
pub fn parse_bytes_with_options(html: &[u8], url: &str, options: &Options) -> Result<Article> {
    let html_str = encoding::transcode_to_utf8(html);
    parse_with_options(&html_str, url, options)
}

//! URL Utility Functions
//!
//! Resolution of the relative URLs found in article content and metadata
//! against the page URL.

use url::Url;

/// Convert a URI to absolute form against a base URL.
///
/// Hash fragments are kept as-is so in-page anchors keep working after
/// extraction, and URIs that already carry a scheme and host pass through
/// unchanged. Anything else is joined against the base; when joining fails
/// the original string is returned.
#[must_use]
pub fn to_absolute_uri(uri: &str, base: &Url) -> String {
    if uri.is_empty() {
        return String::new();
    }

    if uri.starts_with('#') {
        return uri.to_string();
    }

    if let Ok(parsed) = Url::parse(uri) {
        if parsed.host().is_some() {
            return uri.to_string();
        }
    }

    match base.join(uri) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => uri.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/a/b").expect("base url")
    }

    #[test]
    fn resolves_relative_paths_against_base() {
        assert_eq!(to_absolute_uri("/x", &base()), "https://example.com/x");
        assert_eq!(to_absolute_uri("c/d", &base()), "https://example.com/a/c/d");
    }

    #[test]
    fn keeps_absolute_urls_unchanged() {
        assert_eq!(
            to_absolute_uri("https://other.org/p?q=1", &base()),
            "https://other.org/p?q=1"
        );
    }

    #[test]
    fn keeps_hash_fragments_unchanged() {
        assert_eq!(to_absolute_uri("#section-2", &base()), "#section-2");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(to_absolute_uri("", &base()), "");
    }
}

//! Error types for rs-readability.
//!
//! This module defines the error types returned by parse operations.

/// Error type for parse operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document holds more elements than `max_elems_to_parse` allows.
    #[error("too many elements: {0}")]
    TooManyElements(usize),

    /// The page URL could not be parsed as an absolute URL.
    #[error("failed to parse URL: {0}")]
    InvalidUrl(String),

    /// The input could not be interpreted as an HTML document.
    #[error("failed to parse input: {0}")]
    ParseError(String),
}

/// Result type alias for parse operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_caller_visible_strings() {
        assert_eq!(Error::TooManyElements(5).to_string(), "too many elements: 5");
        assert_eq!(
            Error::InvalidUrl("relative path".to_string()).to_string(),
            "failed to parse URL: relative path"
        );
        assert_eq!(
            Error::ParseError("empty input".to_string()).to_string(),
            "failed to parse input: empty input"
        );
    }
}

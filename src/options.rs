//! Configuration options for article extraction.
//!
//! The `Options` struct controls parse behavior: how large a document may be,
//! how many candidates compete for the top spot, and how much text an attempt
//! must produce before the relaxation loop gives up.

/// Configuration options for article extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for the reference settings.
///
/// # Example
///
/// ```rust
/// use rs_readability::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     char_threshold: 300,
///     n_top_candidates: 10,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum number of elements to parse from the document.
    ///
    /// If the document holds more elements than this, `parse` errors
    /// immediately with `Error::TooManyElements`. `0` means unlimited.
    ///
    /// Default: `0`
    pub max_elems_to_parse: usize,

    /// Number of top candidates to consider when analysing how tight the
    /// competition is among scored candidates.
    ///
    /// Default: `5`
    pub n_top_candidates: usize,

    /// Number of chars an extracted article must have for an attempt to be
    /// accepted.
    ///
    /// Shorter results trigger a retry with one heuristic flag relaxed, in
    /// order: strip-unlikelys, class weighting, conditional cleaning. Once
    /// every flag is cleared the longest attempt wins.
    ///
    /// Default: `500`
    pub char_threshold: usize,

    /// Class names preserved when class attributes are stripped during
    /// post-processing.
    ///
    /// Default: `["page"]`
    pub classes_to_preserve: Vec<String>,

    /// Element tags that are scored directly during the grab phase.
    ///
    /// Default: `["section", "h2", "h3", "h4", "h5", "h6", "p", "td", "pre"]`
    pub tags_to_score: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_elems_to_parse: 0,
            n_top_candidates: 5,
            char_threshold: 500,
            classes_to_preserve: vec!["page".to_string()],
            tags_to_score: ["section", "h2", "h3", "h4", "h5", "h6", "p", "td", "pre"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert_eq!(opts.max_elems_to_parse, 0);
        assert_eq!(opts.n_top_candidates, 5);
        assert_eq!(opts.char_threshold, 500);
        assert_eq!(opts.classes_to_preserve, vec!["page".to_string()]);
        assert_eq!(opts.tags_to_score.len(), 9);
        assert!(opts.tags_to_score.contains(&"p".to_string()));
        assert!(opts.tags_to_score.contains(&"pre".to_string()));
        assert!(!opts.tags_to_score.contains(&"div".to_string()));
    }

    #[test]
    fn test_custom_thresholds() {
        let opts = Options {
            max_elems_to_parse: 3,
            char_threshold: 120,
            ..Options::default()
        };

        assert_eq!(opts.max_elems_to_parse, 3);
        assert_eq!(opts.char_threshold, 120);
        // Untouched fields keep their defaults
        assert_eq!(opts.n_top_candidates, 5);
    }
}

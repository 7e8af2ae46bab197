//! Quick readability check without full parsing.
//!
//! [`is_readable`] predicts whether a full parse is likely to find an
//! article, by summing a score over the text-bearing blocks of the page. It
//! is far cheaper than [`parse`](crate::parse) and useful as a pre-flight
//! filter in crawlers.

use std::collections::HashSet;

use dom_query::{NodeId, NodeRef};

use crate::dom;
use crate::encoding;
use crate::patterns::{OK_MAYBE_CANDIDATE, UNLIKELY_CANDIDATES};

/// Minimum text length for a block to contribute to the score.
const MIN_CONTENT_LENGTH: usize = 140;

/// Score above which the document counts as readable.
const MIN_SCORE: f64 = 20.0;

/// Decide whether the document is worth a full parse.
///
/// Scans `<p>` and `<pre>` elements plus `<div>`s holding `<br>` children,
/// skips invisible and unlikely-classed blocks and paragraphs nested in
/// lists, and accumulates `sqrt(len - 140)` per surviving block until the
/// score passes 20.
///
/// # Example
///
/// ```rust
/// use rs_readability::is_readable;
///
/// let html = "<html><body><p>Too short.</p></body></html>";
/// assert!(!is_readable(html));
/// ```
#[must_use]
pub fn is_readable(html: &str) -> bool {
    let doc = dom::parse(html);
    let Some(root) = dom::document_element(&doc) else {
        return false;
    };

    // Collect <p>, <pre>, and divs broken up by <br>, each div only once.
    let mut nodes: Vec<NodeRef> = Vec::new();
    let mut seen: HashSet<NodeId> = HashSet::new();

    for element in dom::get_elements_by_tag_name(&root, "*") {
        let tag = dom::tag_name(&element);

        if tag == "p" || tag == "pre" {
            if seen.insert(element.id) {
                nodes.push(element);
            }
        } else if tag == "br" {
            if let Some(parent) = element.parent() {
                if dom::tag_name(&parent) == "div" && seen.insert(parent.id) {
                    nodes.push(parent);
                }
            }
        }
    }

    let mut score = 0.0;

    for node in nodes {
        if !dom::is_probably_visible(&node) {
            continue;
        }

        let match_string = format!("{} {}", dom::class_name(&node), dom::id(&node));
        if UNLIKELY_CANDIDATES.is_match(&match_string)
            && !OK_MAYBE_CANDIDATE.is_match(&match_string)
        {
            continue;
        }

        if dom::tag_name(&node) == "p" && dom::has_ancestor_tag(&node, "li", -1, None) {
            continue;
        }

        let text_length = dom::text_content(&node).trim().chars().count();
        if text_length < MIN_CONTENT_LENGTH {
            continue;
        }

        score += ((text_length - MIN_CONTENT_LENGTH) as f64).sqrt();
        if score > MIN_SCORE {
            return true;
        }
    }

    false
}

/// Byte-input variant of [`is_readable`] with charset detection.
#[must_use]
pub fn is_readable_bytes(html: &[u8]) -> bool {
    is_readable(&encoding::transcode_to_utf8(html))
}

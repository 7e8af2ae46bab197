//! Document-level HTML processing.
//!
//! Covers the passes that run outside the grab loop: script stripping and
//! document prep before extraction, and URL/class post-processing on the
//! extracted article.

use url::Url;

use crate::dom::{self, Document, NodeRef};
use crate::patterns::WHITESPACE;
use crate::url_utils;

/// Remove `<script>` and `<noscript>` subtrees from the document.
pub(crate) fn remove_scripts(doc: &Document) {
    doc.select("script").remove();
    doc.select("noscript").remove();
}

/// Prepare the document for extraction: strip styles, rewrite `<br>` runs in
/// the body into paragraphs, and rename `<font>` to `<span>`.
pub(crate) fn prep_document(doc: &Document) {
    doc.select("style").remove();

    if let Some(body) = dom::body(doc) {
        replace_brs(&body);
    }

    for font in doc.select("font").nodes() {
        dom::set_node_tag(font, "span");
    }
}

/// Find the next node, starting from the given one and skipping whitespace
/// in between. Returns the start node itself when it is an element or
/// carries non-whitespace text.
pub(crate) fn next_element<'a>(start: Option<NodeRef<'a>>) -> Option<NodeRef<'a>> {
    let mut next = start;

    while let Some(node) = next {
        if node.is_element() || !WHITESPACE.is_match(&dom::text_content(&node)) {
            return Some(node);
        }
        next = node.next_sibling();
    }

    None
}

/// Replace two or more successive `<br>` elements with a single `<p>`.
/// Whitespace between the `<br>` elements is ignored. For example:
///
/// ```html
/// <div>foo<br>bar<br> <br><br>abc</div>
/// ```
///
/// becomes
///
/// ```html
/// <div>foo<br>bar<p>abc</p></div>
/// ```
pub(crate) fn replace_brs(root: &NodeRef) {
    for br in dom::get_elements_by_tag_name(root, "br") {
        // Later entries of the snapshot may already be gone as part of an
        // earlier chain.
        if br.parent().is_none() {
            continue;
        }

        let mut next = br.next_sibling();

        // Whether two or more <br> elements have been found and replaced
        // with a <p> block.
        let mut replaced = false;

        // If we find a <br> chain, remove the <br> nodes until we hit
        // another element or non-whitespace. This leaves behind the first
        // <br> in the chain (which will be replaced with a <p> below).
        while let Some(node) = next_element(next) {
            if dom::tag_name(&node) != "br" {
                break;
            }

            replaced = true;
            let sibling = node.next_sibling();
            dom::remove_node(&node);
            next = sibling;
        }

        // If we removed a <br> chain, replace the remaining <br> with a <p>
        // and pull the following phrasing content into it, stopping at the
        // next <br> chain.
        if replaced {
            let p = dom::create_element(&br, "p");
            dom::replace_node(&br, &p);

            let mut sibling = p.next_sibling();
            while let Some(node) = sibling {
                if dom::tag_name(&node) == "br" {
                    if let Some(after) = next_element(node.next_sibling()) {
                        if dom::tag_name(&after) == "br" {
                            break;
                        }
                    }
                }

                if !dom::is_phrasing_content(&node) {
                    break;
                }

                let next_sibling = node.next_sibling();
                dom::append_child(&p, &node);
                sibling = next_sibling;
            }

            while let Some(last) = p.last_child() {
                if !dom::is_whitespace(&last) {
                    break;
                }
                dom::remove_node(&last);
            }
        }
    }
}

/// Convert each `href`/`src` in the article to an absolute URI.
/// `javascript:` links cannot work once scripts are stripped, so they are
/// replaced by their link text.
pub(crate) fn fix_relative_uris(root: &NodeRef, base: &Url) {
    for link in dom::get_elements_by_tag_name(root, "a") {
        let href = dom::get_attribute(&link, "href");
        if href.is_empty() {
            continue;
        }

        if href.starts_with("javascript:") {
            let text = dom::create_text_node(&link, &dom::text_content(&link));
            dom::replace_node(&link, &text);
            continue;
        }

        let new_href = url_utils::to_absolute_uri(&href, base);
        if new_href.is_empty() {
            dom::remove_attribute(&link, "href");
        } else {
            dom::set_attribute(&link, "href", &new_href);
        }
    }

    for img in dom::get_elements_by_tag_name(root, "img") {
        let src = dom::get_attribute(&img, "src");
        if src.is_empty() {
            continue;
        }

        let new_src = url_utils::to_absolute_uri(&src, base);
        if new_src.is_empty() {
            dom::remove_attribute(&img, "src");
        } else {
            dom::set_attribute(&img, "src", &new_src);
        }
    }
}

/// Strip class attributes from the subtree, keeping only preserved classes.
pub(crate) fn clean_classes(root: &NodeRef, classes_to_preserve: &[String]) {
    let mut targets = vec![root.clone()];
    targets.append(&mut dom::get_elements_by_tag_name(root, "*"));

    for element in targets {
        let class = dom::class_name(&element);
        let preserved: Vec<&str> = class
            .split_whitespace()
            .filter(|c| classes_to_preserve.iter().any(|p| p == c))
            .collect();

        if preserved.is_empty() {
            dom::remove_attribute(&element, "class");
        } else {
            dom::set_attribute(&element, "class", &preserved.join(" "));
        }
    }
}

/// Post-process the extracted article: absolute URIs, then class stripping.
pub(crate) fn post_process_content(root: &NodeRef, base: &Url, classes_to_preserve: &[String]) {
    fix_relative_uris(root, base);
    clean_classes(root, classes_to_preserve);
}

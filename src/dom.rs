//! DOM Operations Adapter
//!
//! Browser-style DOM primitives over the `dom_query` crate. The extraction
//! passes work node-by-node (including text nodes), so most helpers take a
//! `NodeRef` and walk sibling/child pointers explicitly rather than going
//! through CSS selection. All mutations happen in place on the arena tree.

// Re-export core types for the rest of the crate
pub use dom_query::{Document, NodeId, NodeRef, Selection};

// Re-export StrTendril for callers that want zero-copy text
pub use tendril::StrTendril;

use crate::patterns::{DIV_TO_P_ELEMS, HAS_CONTENT, NORMALIZE, PHRASING_ELEMS};

// === Parsing ===

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Deep-copy a document by serializing and reparsing it.
///
/// Node ids are tree-local, so ids taken from the original are meaningless
/// in the clone.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

/// Get the root `<html>` element of a document.
#[must_use]
pub fn document_element(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("html").nodes().first().cloned()
}

/// Get the `<body>` element of a document.
#[must_use]
pub fn body(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("body").nodes().first().cloned()
}

// === Tag/Node Information ===

/// Get the tag name of an element, lowercase. Empty string for non-elements.
#[must_use]
pub fn tag_name(node: &NodeRef) -> String {
    if !node.is_element() {
        return String::new();
    }

    node.node_name().map(|t| t.to_lowercase()).unwrap_or_default()
}

/// Get the value of the class attribute with whitespace runs collapsed to a
/// single space.
#[must_use]
pub fn class_name(node: &NodeRef) -> String {
    let class = get_attribute(node, "class");
    NORMALIZE.replace_all(class.trim(), " ").to_string()
}

/// Get the trimmed value of the id attribute.
#[must_use]
pub fn id(node: &NodeRef) -> String {
    get_attribute(node, "id").trim().to_string()
}

// === Attribute Operations ===

/// Get an attribute value, or the empty string when absent.
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> String {
    node.attr(name).map(|v| v.to_string()).unwrap_or_default()
}

/// Set an attribute value, replacing any existing value.
#[inline]
pub fn set_attribute(node: &NodeRef, name: &str, value: &str) {
    node.set_attr(name, value);
}

/// Check whether an attribute exists.
#[inline]
#[must_use]
pub fn has_attribute(node: &NodeRef, name: &str) -> bool {
    node.has_attr(name)
}

/// Remove an attribute.
#[inline]
pub fn remove_attribute(node: &NodeRef, name: &str) {
    node.remove_attr(name);
}

/// Get the values of every attribute on a node.
#[must_use]
pub fn attribute_values(node: &NodeRef) -> Vec<String> {
    node.attrs().iter().map(|attr| attr.value.to_string()).collect()
}

// === Text Content ===

/// Concatenated text of the node and its descendants.
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef) -> String {
    node.text().to_string()
}

/// Trimmed inner text, with whitespace runs collapsed when `normalize` is
/// set.
#[must_use]
pub fn inner_text(node: &NodeRef, normalize: bool) -> String {
    let text = text_content(node);
    let text = text.trim();

    if normalize {
        NORMALIZE.replace_all(text, " ").to_string()
    } else {
        text.to_string()
    }
}

/// Number of whitespace-separated words in a string.
#[inline]
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of times `pat` occurs in the normalized inner text of a node.
#[must_use]
pub fn char_count(node: &NodeRef, pat: char) -> usize {
    inner_text(node, true).matches(pat).count()
}

/// Serialize the node itself with its descendants.
#[inline]
#[must_use]
pub fn outer_html(node: &NodeRef) -> String {
    node.html().to_string()
}

/// Serialize the node's descendants only.
#[inline]
#[must_use]
pub fn inner_html(node: &NodeRef) -> String {
    node.inner_html().to_string()
}

// === Tree Navigation ===

/// First child that is an element, if any.
#[must_use]
pub fn first_element_child<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut child = node.first_child();
    while let Some(c) = child {
        if c.is_element() {
            return Some(c);
        }
        child = c.next_sibling();
    }
    None
}

/// Next sibling that is an element, if any.
#[must_use]
pub fn next_element_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sibling = node.next_sibling();
    while let Some(s) = sibling {
        if s.is_element() {
            return Some(s);
        }
        sibling = s.next_sibling();
    }
    None
}

/// Direct element children of a node.
#[must_use]
pub fn children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut list = Vec::new();
    let mut child = node.first_child();
    while let Some(c) = child {
        if c.is_element() {
            list.push(c.clone());
        }
        child = c.next_sibling();
    }
    list
}

/// All direct children of a node, text and comment nodes included.
#[must_use]
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut list = Vec::new();
    let mut child = node.first_child();
    while let Some(c) = child {
        list.push(c.clone());
        child = c.next_sibling();
    }
    list
}

/// Descendant elements with the given tag name, in document order. An
/// asterisk matches every descendant element. The node itself is never
/// included.
#[must_use]
pub fn get_elements_by_tag_name<'a>(node: &NodeRef<'a>, tag: &str) -> Vec<NodeRef<'a>> {
    let mut found = Vec::new();
    let mut stack = child_nodes(node);
    stack.reverse();

    while let Some(current) = stack.pop() {
        if current.is_element() && (tag == "*" || tag_name(&current) == tag) {
            found.push(current.clone());
        }

        let mut kids = child_nodes(&current);
        kids.reverse();
        stack.append(&mut kids);
    }

    found
}

/// Descendant elements matching any of the given tag names.
#[must_use]
pub fn get_all_nodes_with_tag<'a>(node: &NodeRef<'a>, tags: &[&str]) -> Vec<NodeRef<'a>> {
    let mut list = Vec::new();
    for tag in tags {
        list.append(&mut get_elements_by_tag_name(node, tag));
    }
    list
}

/// Ancestors of a node, nearest first. `max_depth` of 0 walks to the root.
#[must_use]
pub fn node_ancestors<'a>(node: &NodeRef<'a>, max_depth: usize) -> Vec<NodeRef<'a>> {
    let mut ancestors = Vec::new();
    let mut current = node.parent();

    while let Some(parent) = current {
        ancestors.push(parent.clone());
        if max_depth > 0 && ancestors.len() == max_depth {
            break;
        }
        current = parent.parent();
    }

    ancestors
}

/// Whether an ancestor within `max_depth` levels has the given tag name and
/// passes the filter. A negative `max_depth` removes the depth limit.
pub fn has_ancestor_tag(
    node: &NodeRef,
    tag: &str,
    max_depth: i32,
    filter: Option<&dyn Fn(&NodeRef) -> bool>,
) -> bool {
    let mut depth = 0;
    let mut current = node.clone();

    while let Some(parent) = current.parent() {
        if max_depth > 0 && depth > max_depth {
            return false;
        }

        if tag_name(&parent) == tag && filter.map_or(true, |f| f(&parent)) {
            return true;
        }

        current = parent;
        depth += 1;
    }

    false
}

/// Depth-first successor of a node, elements only. With
/// `ignore_self_and_kids` the node's own subtree is skipped, which makes
/// `next_node` usable while the current node is being removed.
#[must_use]
pub fn next_node<'a>(node: &NodeRef<'a>, ignore_self_and_kids: bool) -> Option<NodeRef<'a>> {
    if !ignore_self_and_kids {
        if let Some(first_child) = first_element_child(node) {
            return Some(first_child);
        }
    }

    if let Some(sibling) = next_element_sibling(node) {
        return Some(sibling);
    }

    // Climb the parent chain until a parent with a next sibling turns up.
    let mut current = node.parent();
    while let Some(parent) = current {
        if let Some(sibling) = next_element_sibling(&parent) {
            return Some(sibling);
        }
        current = parent.parent();
    }

    None
}

/// Remove a node and return its depth-first successor.
#[must_use]
pub fn remove_and_get_next<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let next = next_node(node, true);
    node.remove_from_parent();
    next
}

// === Tree Manipulation ===

/// Create a detached element in the same tree as `context`.
#[inline]
#[must_use]
pub fn create_element<'a>(context: &NodeRef<'a>, tag: &str) -> NodeRef<'a> {
    context.tree.new_element(tag)
}

/// Create a detached text node in the same tree as `context`.
#[inline]
#[must_use]
pub fn create_text_node<'a>(context: &NodeRef<'a>, text: &str) -> NodeRef<'a> {
    context.tree.new_text(text)
}

/// Append a child to a parent, detaching it from any current parent first.
pub fn append_child(parent: &NodeRef, child: &NodeRef) {
    child.remove_from_parent();
    parent.append_child(child);
}

/// Replace a node with another node, which is detached from any current
/// position first.
pub fn replace_node(old: &NodeRef, new: &NodeRef) {
    new.remove_from_parent();
    old.replace_with(new);
}

/// Remove a node with its subtree.
#[inline]
pub fn remove_node(node: &NodeRef) {
    node.remove_from_parent();
}

/// Rename an element in place, keeping attributes and children.
pub fn set_node_tag(node: &NodeRef, new_tag: &str) {
    Selection::from(node.clone()).rename(new_tag);
}

// === Predicates ===

/// Whitespace-only text node, or a `<br>` element.
#[must_use]
pub fn is_whitespace(node: &NodeRef) -> bool {
    if node.is_text() {
        return text_content(node).trim().is_empty();
    }

    node.is_element() && tag_name(node) == "br"
}

/// Whether the node has exactly one element child with the given tag and no
/// text content of its own.
#[must_use]
pub fn has_single_tag_inside_element(node: &NodeRef, tag: &str) -> bool {
    let elements = children(node);
    if elements.len() != 1 || tag_name(&elements[0]) != tag {
        return false;
    }

    !child_nodes(node)
        .iter()
        .any(|child| child.is_text() && HAS_CONTENT.is_match(&text_content(child)))
}

/// Element with no text and no children other than `<br>` and `<hr>`.
#[must_use]
pub fn is_element_without_content(node: &NodeRef) -> bool {
    if !node.is_element() || !text_content(node).trim().is_empty() {
        return false;
    }

    let child_count = children(node).len();
    let br_hr_count = get_elements_by_tag_name(node, "br").len()
        + get_elements_by_tag_name(node, "hr").len();

    child_count == 0 || child_count == br_hr_count
}

/// Whether any descendant of the node is a block-level element.
#[must_use]
pub fn has_child_block_element(node: &NodeRef) -> bool {
    let mut stack = child_nodes(node);

    while let Some(current) = stack.pop() {
        if DIV_TO_P_ELEMS.contains(&tag_name(&current).as_str()) {
            return true;
        }
        stack.append(&mut child_nodes(&current));
    }

    false
}

/// Whether the node qualifies as phrasing content: text, a known phrasing
/// tag, or an `<a>`/`<del>`/`<ins>` whose children are all phrasing.
#[must_use]
pub fn is_phrasing_content(node: &NodeRef) -> bool {
    if node.is_text() {
        return true;
    }

    let tag = tag_name(node);
    if PHRASING_ELEMS.contains(&tag.as_str()) {
        return true;
    }

    (tag == "a" || tag == "del" || tag == "ins")
        && child_nodes(node).iter().all(is_phrasing_content)
}

/// Not hidden by inline style or the `hidden` attribute.
#[must_use]
pub fn is_probably_visible(node: &NodeRef) -> bool {
    let style = get_attribute(node, "style");
    let no_style = style.is_empty() || !crate::patterns::DISPLAY_NONE.is_match(&style);
    no_style && !has_attribute(node, "hidden")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_and_attribute_access() {
        let doc = parse(r#"<div id=" main " class="a   b">content</div>"#);
        let div = doc.select("div").nodes().first().cloned().expect("div");

        assert_eq!(tag_name(&div), "div");
        assert_eq!(id(&div), "main");
        assert_eq!(class_name(&div), "a b");
        assert_eq!(get_attribute(&div, "missing"), "");
    }

    #[test]
    fn test_element_navigation_skips_text_nodes() {
        let doc = parse("<div>text<p>one</p> <span>two</span></div>");
        let div = doc.select("div").nodes().first().cloned().expect("div");

        let first = first_element_child(&div).expect("first element child");
        assert_eq!(tag_name(&first), "p");

        let next = next_element_sibling(&first).expect("next element sibling");
        assert_eq!(tag_name(&next), "span");
        assert!(next_element_sibling(&next).is_none());

        assert_eq!(children(&div).len(), 2);
        assert_eq!(child_nodes(&div).len(), 4);
    }

    #[test]
    fn test_get_elements_by_tag_name_descendants_in_order() {
        let doc = parse("<div><p>1</p><section><p>2</p></section><p>3</p></div>");
        let div = doc.select("div").nodes().first().cloned().expect("div");

        let ps = get_elements_by_tag_name(&div, "p");
        let texts: Vec<String> = ps.iter().map(|p| inner_text(p, true)).collect();
        assert_eq!(texts, vec!["1", "2", "3"]);

        // "*" matches every descendant element, not the div itself
        assert_eq!(get_elements_by_tag_name(&div, "*").len(), 4);
    }

    #[test]
    fn test_inner_text_normalization() {
        let doc = parse("<p>  one\n\n  two  </p>");
        let p = doc.select("p").nodes().first().cloned().expect("p");

        assert_eq!(inner_text(&p, true), "one two");
        assert!(inner_text(&p, false).contains('\n'));
    }

    #[test]
    fn test_append_child_moves_node() {
        let doc = parse("<div id='a'><p>moved</p></div><div id='b'></div>");
        let p = doc.select("p").nodes().first().cloned().expect("p");
        let b = doc.select("#b").nodes().first().cloned().expect("b");

        append_child(&b, &p);

        assert!(doc.select("#a p").is_empty());
        assert!(doc.select("#b p").exists());
    }

    #[test]
    fn test_replace_node() {
        let doc = parse("<div><span id='old'>old</span></div>");
        let old = doc.select("#old").nodes().first().cloned().expect("old");

        let p = create_element(&old, "p");
        set_attribute(&p, "id", "new");
        replace_node(&old, &p);

        assert!(doc.select("#old").is_empty());
        assert!(doc.select("div > p#new").exists());
    }

    #[test]
    fn test_set_node_tag_keeps_attributes() {
        let doc = parse(r#"<font color="red">styled</font>"#);
        let font = doc.select("font").nodes().first().cloned().expect("font");

        set_node_tag(&font, "span");

        assert!(doc.select("font").is_empty());
        let span = doc.select("span").nodes().first().cloned().expect("span");
        assert_eq!(get_attribute(&span, "color"), "red");
        assert_eq!(inner_text(&span, true), "styled");
    }

    #[test]
    fn test_next_node_walks_depth_first() {
        let doc = parse("<div id='r'><p id='1'><b id='2'>x</b></p><p id='3'>y</p></div>");
        let root = doc.select("#r").nodes().first().cloned().expect("root");

        let mut order = Vec::new();
        let mut node = Some(root);
        while let Some(n) = node {
            order.push(id(&n));
            node = next_node(&n, false);
        }

        assert_eq!(order, vec!["r", "1", "2", "3"]);
    }

    #[test]
    fn test_remove_and_get_next_skips_subtree() {
        let doc = parse("<div><p id='1'><b>x</b></p><p id='2'>y</p></div>");
        let first = doc.select("#1").nodes().first().cloned().expect("first");

        let next = remove_and_get_next(&first).expect("next");
        assert_eq!(id(&next), "2");
        assert!(doc.select("#1").is_empty());
    }

    #[test]
    fn test_node_ancestors_depth_limit() {
        let doc = parse("<div><section><article><p>x</p></article></section></div>");
        let p = doc.select("p").nodes().first().cloned().expect("p");

        let limited = node_ancestors(&p, 2);
        assert_eq!(limited.len(), 2);
        assert_eq!(tag_name(&limited[0]), "article");
        assert_eq!(tag_name(&limited[1]), "section");

        // Unlimited walk reaches past <html> to the document node
        let all = node_ancestors(&p, 0);
        assert!(all.len() > 4);
    }

    #[test]
    fn test_has_ancestor_tag_depth() {
        let doc = parse("<table><tbody><tr><td><p id='x'>x</p></td></tr></tbody></table>");
        let p = doc.select("#x").nodes().first().cloned().expect("p");

        assert!(has_ancestor_tag(&p, "table", -1, None));
        assert!(has_ancestor_tag(&p, "table", 3, None));
        assert!(!has_ancestor_tag(&p, "table", 1, None));
    }

    #[test]
    fn test_content_predicates() {
        let doc = parse("<div id='empty'><br><hr></div><div id='full'>text</div>");
        let empty = doc.select("#empty").nodes().first().cloned().expect("empty");
        let full = doc.select("#full").nodes().first().cloned().expect("full");

        assert!(is_element_without_content(&empty));
        assert!(!is_element_without_content(&full));
    }

    #[test]
    fn test_has_single_tag_inside_element() {
        let doc = parse("<div id='a'><p>only</p></div><div id='b'>text<p>and</p></div>");
        let a = doc.select("#a").nodes().first().cloned().expect("a");
        let b = doc.select("#b").nodes().first().cloned().expect("b");

        assert!(has_single_tag_inside_element(&a, "p"));
        assert!(!has_single_tag_inside_element(&a, "div"));
        assert!(!has_single_tag_inside_element(&b, "p"));
    }

    #[test]
    fn test_phrasing_content() {
        let doc = parse("<div><span>inline</span><a href='#'><b>ok</b></a><a href='#'><div>no</div></a></div>");
        let div = doc.select("div").nodes().first().cloned().expect("div");
        let kids = children(&div);

        assert!(is_phrasing_content(&kids[0]));
        assert!(is_phrasing_content(&kids[1]));
        assert!(!is_phrasing_content(&kids[2]));
    }

    #[test]
    fn test_visibility() {
        let doc = parse(
            r#"<p id='a' style="display: none">x</p><p id='b' hidden>y</p><p id='c' style="color:red">z</p>"#,
        );
        let a = doc.select("#a").nodes().first().cloned().expect("a");
        let b = doc.select("#b").nodes().first().cloned().expect("b");
        let c = doc.select("#c").nodes().first().cloned().expect("c");

        assert!(!is_probably_visible(&a));
        assert!(!is_probably_visible(&b));
        assert!(is_probably_visible(&c));
    }

    #[test]
    fn test_clone_document_is_independent() {
        let doc = parse("<div id='original'>content</div>");
        let cloned = clone_document(&doc);

        cloned.select("#original").set_attr("id", "changed");

        assert!(doc.select("#original").exists());
        assert!(cloned.select("#changed").exists());
    }
}

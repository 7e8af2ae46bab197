//! Scoring primitives for the grab loop.
//!
//! Readability scores live in a side table keyed by `NodeId` rather than in
//! attributes on the tree, so the extracted article can never leak scoring
//! state. Each grab attempt works on its own tree and gets its own store.

use std::collections::HashMap;

use dom_query::{NodeId, NodeRef};

use crate::dom;
use crate::patterns::{NEGATIVE, POSITIVE};

/// Side table of content scores for one grab attempt.
#[derive(Debug, Default)]
pub(crate) struct ScoreStore {
    scores: HashMap<NodeId, f64>,
}

impl ScoreStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the node has been initialized as a candidate.
    pub(crate) fn has(&self, id: NodeId) -> bool {
        self.scores.contains_key(&id)
    }

    /// Content score of a node, zero when unscored.
    pub(crate) fn get(&self, id: NodeId) -> f64 {
        self.scores.get(&id).copied().unwrap_or(0.0)
    }

    pub(crate) fn set(&mut self, id: NodeId, score: f64) {
        self.scores.insert(id, score);
    }
}

/// Initialize a node's score from its tag bias plus class weight, and record
/// it in the store.
pub(crate) fn initialize_node(store: &mut ScoreStore, node: &NodeRef, use_weight_classes: bool) {
    let mut score = f64::from(class_weight(node, use_weight_classes));

    score += match dom::tag_name(node).as_str() {
        "div" => 5.0,
        "pre" | "td" | "blockquote" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => -5.0,
        _ => 0.0,
    };

    store.set(node.id, score);
}

/// Class/id weight of an element: ±25 for each of class and id matching the
/// positive/negative classifiers. Zero when class weighting is relaxed.
pub(crate) fn class_weight(node: &NodeRef, use_weight_classes: bool) -> i32 {
    if !use_weight_classes {
        return 0;
    }

    let mut weight = 0;

    let class = dom::class_name(node);
    if !class.is_empty() {
        if NEGATIVE.is_match(&class) {
            weight -= 25;
        }
        if POSITIVE.is_match(&class) {
            weight += 25;
        }
    }

    let id = dom::id(node);
    if !id.is_empty() {
        if NEGATIVE.is_match(&id) {
            weight -= 25;
        }
        if POSITIVE.is_match(&id) {
            weight += 25;
        }
    }

    weight
}

/// Share of the node's text that sits inside links, in `[0, 1]`.
pub(crate) fn link_density(node: &NodeRef) -> f64 {
    let text_length = dom::inner_text(node, true).chars().count();
    if text_length == 0 {
        return 0.0;
    }

    let link_length: usize = dom::get_elements_by_tag_name(node, "a")
        .iter()
        .map(|link| dom::inner_text(link, true).chars().count())
        .sum();

    link_length as f64 / text_length as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(doc: &'a dom_query::Document, selector: &str) -> NodeRef<'a> {
        doc.select(selector)
            .nodes()
            .first()
            .cloned()
            .expect("selector should match")
    }

    #[test]
    fn score_store_defaults_to_zero() {
        let doc = dom::parse("<p>x</p>");
        let p = first(&doc, "p");

        let mut store = ScoreStore::new();
        assert!(!store.has(p.id));
        assert_eq!(store.get(p.id), 0.0);

        store.set(p.id, 12.5);
        assert!(store.has(p.id));
        assert_eq!(store.get(p.id), 12.5);
    }

    #[test]
    fn tag_biases() {
        let doc = dom::parse("<div id='d'></div><pre id='p'></pre><ul id='u'></ul><h2 id='h'></h2>");
        let mut store = ScoreStore::new();

        for (sel, expected) in [("#d", 5.0), ("#p", 3.0), ("#u", -3.0), ("#h", -5.0)] {
            let node = first(&doc, sel);
            initialize_node(&mut store, &node, true);
            assert_eq!(store.get(node.id), expected, "bias for {sel}");
        }
    }

    #[test]
    fn class_and_id_weights_stack() {
        let doc = dom::parse(
            r#"<div id="a" class="article"></div>
               <div id="b" class="sidebar"></div>
               <div id="comment" class="footer"></div>
               <div id="d" class="plain"></div>"#,
        );

        assert_eq!(class_weight(&first(&doc, "#a"), true), 25);
        assert_eq!(class_weight(&first(&doc, "#b"), true), -25);
        assert_eq!(class_weight(&first(&doc, "#comment"), true), -50);
        assert_eq!(class_weight(&first(&doc, "#d"), true), 0);
    }

    #[test]
    fn class_weight_disabled_by_flag() {
        let doc = dom::parse(r#"<div id="x" class="sidebar comment footer"></div>"#);
        assert_eq!(class_weight(&first(&doc, "#x"), false), 0);
    }

    #[test]
    fn link_density_ratio() {
        let doc = dom::parse(r##"<p id='x'>aaaaa<a href="#">bbbbb</a></p>"##);
        let density = link_density(&first(&doc, "#x"));
        assert!((density - 0.5).abs() < 1e-9);
    }

    #[test]
    fn link_density_of_empty_node_is_zero() {
        let doc = dom::parse("<p id='x'></p>");
        assert_eq!(link_density(&first(&doc, "#x")), 0.0);
    }
}

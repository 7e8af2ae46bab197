//! The grab loop: scoring candidates and assembling the article.
//!
//! Each attempt works on a fresh clone of the prepped document. Nodes are
//! prepped (hidden, bylined, and unlikely elements removed, stray divs
//! normalized to paragraphs), scored through their ancestor chain, and the
//! best-scoring candidate plus its qualifying siblings become the article.
//! An attempt that yields too little text is retried with one heuristic flag
//! relaxed, and when every flag is spent the longest attempt wins.

pub(crate) mod cleaning;
pub(crate) mod scoring;

use dom_query::{Document, NodeId, NodeRef};

use crate::dom;
use crate::options::Options;
use crate::patterns::{
    ALTER_TO_DIV_EXCEPTIONS, BYLINE, OK_MAYBE_CANDIDATE, SENTENCE_PERIOD, UNLIKELY_CANDIDATES,
};
use self::cleaning::CleanContext;
use self::scoring::ScoreStore;

/// Heuristics relaxed one per retry, in declaration order.
struct Flags {
    strip_unlikelys: bool,
    use_weight_classes: bool,
    clean_conditionally: bool,
}

/// Snapshot of a grab attempt that fell short of the char threshold. The
/// attempt's tree dies with the attempt, so the container is kept serialized.
struct ParseAttempt {
    content: String,
    text_length: usize,
}

/// State for one parse call: title context for cleaning, the byline found
/// during node prepping, and the retry bookkeeping.
pub(crate) struct Extractor<'o> {
    options: &'o Options,
    article_title: String,
    pub(crate) article_byline: Option<String>,
    flags: Flags,
    attempts: Vec<ParseAttempt>,
}

impl<'o> Extractor<'o> {
    pub(crate) fn new(options: &'o Options, article_title: String) -> Self {
        Self {
            options,
            article_title,
            article_byline: None,
            flags: Flags {
                strip_unlikelys: true,
                use_weight_classes: true,
                clean_conditionally: true,
            },
            attempts: Vec::new(),
        }
    }

    /// Run grab attempts until one produces enough text, relaxing one flag
    /// per retry. Returns the inner HTML of the article container, or `None`
    /// when every attempt came back empty.
    pub(crate) fn grab_article(&mut self, doc: &Document) -> Option<String> {
        loop {
            let attempt_doc = dom::clone_document(doc);
            let (content, text_length) = self.grab_attempt(&attempt_doc)?;

            if text_length >= self.options.char_threshold {
                return Some(content);
            }

            self.attempts.push(ParseAttempt { content, text_length });

            if self.flags.strip_unlikelys {
                self.flags.strip_unlikelys = false;
                if cfg!(debug_assertions) {
                    eprintln!(
                        "rs-readability: attempt yielded {text_length} chars; retrying without strip-unlikelys"
                    );
                }
            } else if self.flags.use_weight_classes {
                self.flags.use_weight_classes = false;
                if cfg!(debug_assertions) {
                    eprintln!(
                        "rs-readability: attempt yielded {text_length} chars; retrying without class weights"
                    );
                }
            } else if self.flags.clean_conditionally {
                self.flags.clean_conditionally = false;
                if cfg!(debug_assertions) {
                    eprintln!(
                        "rs-readability: attempt yielded {text_length} chars; retrying without conditional cleaning"
                    );
                }
            } else {
                // No flags left. Take the longest text found across the
                // attempts, unless everything came back empty.
                self.attempts
                    .sort_by(|a, b| b.text_length.cmp(&a.text_length));

                if self.attempts.first().map_or(0, |a| a.text_length) == 0 {
                    return None;
                }

                return Some(self.attempts.remove(0).content);
            }
        }
    }

    /// One full pass: prep, score, select, assemble, clean, wrap.
    fn grab_attempt(&mut self, doc: &Document) -> Option<(String, usize)> {
        let page = dom::body(doc)?;

        // --- Node prepping ---
        let mut elements_to_score: Vec<NodeRef> = Vec::new();
        let mut node_opt = dom::document_element(doc);

        while let Some(mut node) = node_opt {
            let match_string = format!("{} {}", dom::class_name(&node), dom::id(&node));

            if !dom::is_probably_visible(&node) {
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }

            if self.check_byline(&node, &match_string) {
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }

            let tag = dom::tag_name(&node);

            if self.flags.strip_unlikelys
                && UNLIKELY_CANDIDATES.is_match(&match_string)
                && !OK_MAYBE_CANDIDATE.is_match(&match_string)
                && !dom::has_ancestor_tag(&node, "table", 3, None)
                && tag != "body"
                && tag != "a"
            {
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }

            if matches!(
                tag.as_str(),
                "div" | "section" | "header" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
            ) && dom::is_element_without_content(&node)
            {
                node_opt = dom::remove_and_get_next(&node);
                continue;
            }

            if self.options.tags_to_score.iter().any(|t| t == &tag) {
                elements_to_score.push(node.clone());
            }

            if tag == "div" {
                // Wrap runs of phrasing content in synthetic paragraphs.
                let mut paragraph: Option<NodeRef> = None;
                for child in dom::child_nodes(&node) {
                    if dom::is_phrasing_content(&child) {
                        if let Some(p) = &paragraph {
                            dom::append_child(&p, &child);
                        } else if !dom::is_whitespace(&child) {
                            let p = dom::create_element(&node, "p");
                            dom::replace_node(&child, &p);
                            dom::append_child(&p, &child);
                            paragraph = Some(p);
                        }
                    } else if let Some(p) = paragraph.take() {
                        while let Some(last) = p.last_child() {
                            if !dom::is_whitespace(&last) {
                                break;
                            }
                            dom::remove_node(&last);
                        }
                    }
                }

                // A div wrapping a single paragraph is that paragraph; a div
                // without block children might as well be one.
                if dom::has_single_tag_inside_element(&node, "p")
                    && scoring::link_density(&node) < 0.25
                {
                    if let Some(inner_p) = dom::first_element_child(&node) {
                        dom::replace_node(&node, &inner_p);
                        node = inner_p;
                        elements_to_score.push(node.clone());
                    }
                } else if !dom::has_child_block_element(&node) {
                    dom::set_node_tag(&node, "p");
                    elements_to_score.push(node.clone());
                }
            }

            node_opt = dom::next_node(&node, false);
        }

        // --- Scoring ---
        let mut score_store = ScoreStore::new();
        let mut candidates: Vec<NodeRef> = Vec::new();

        for element in &elements_to_score {
            let Some(parent) = element.parent() else {
                continue;
            };
            if !parent.is_element() {
                continue;
            }

            let inner_text = dom::inner_text(element, true);
            if inner_text.chars().count() < 25 {
                continue;
            }

            let ancestors = dom::node_ancestors(element, 3);
            if ancestors.is_empty() {
                continue;
            }

            // One point for the paragraph itself, one per comma, and one per
            // 100 chars up to three.
            let mut content_score = 1.0;
            content_score += inner_text.matches(',').count() as f64;
            content_score += (inner_text.chars().count() as f64 / 100.0).floor().min(3.0);

            for (level, ancestor) in ancestors.iter().enumerate() {
                if !ancestor.is_element() {
                    continue;
                }
                let Some(ancestor_parent) = ancestor.parent() else {
                    continue;
                };
                if !ancestor_parent.is_element() {
                    continue;
                }

                if !score_store.has(ancestor.id) {
                    scoring::initialize_node(
                        &mut score_store,
                        ancestor,
                        self.flags.use_weight_classes,
                    );
                    candidates.push(ancestor.clone());
                }

                // Parent gets the full score, grandparent half, anything
                // deeper a third per level.
                let divider = match level {
                    0 => 1.0,
                    1 => 2.0,
                    _ => (level * 3) as f64,
                };
                score_store.set(
                    ancestor.id,
                    score_store.get(ancestor.id) + content_score / divider,
                );
            }
        }

        // Content should have a low link density; scale scores down by it.
        for candidate in &candidates {
            let scaled = score_store.get(candidate.id) * (1.0 - scoring::link_density(candidate));
            score_store.set(candidate.id, scaled);
        }

        // --- Top candidate selection ---
        candidates.sort_by(|a, b| {
            score_store
                .get(b.id)
                .partial_cmp(&score_store.get(a.id))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let top_candidates: Vec<NodeRef> = candidates
            .iter()
            .take(self.options.n_top_candidates)
            .cloned()
            .collect();

        let mut needed_to_create_top_candidate = false;

        let top_candidate = match top_candidates.first().cloned() {
            Some(tc) if dom::tag_name(&tc) != "body" => {
                self.refine_top_candidate(tc, &top_candidates, &mut score_store)
            }
            _ => {
                // Last resort: gather everything in the body under a new div.
                let new_top = dom::create_element(&page, "div");
                needed_to_create_top_candidate = true;
                for child in dom::child_nodes(&page) {
                    dom::append_child(&new_top, &child);
                }
                dom::append_child(&page, &new_top);
                scoring::initialize_node(&mut score_store, &new_top, self.flags.use_weight_classes);
                new_top
            }
        };

        // --- Sibling inclusion ---
        let article_content = dom::create_element(&page, "div");
        let top_score = score_store.get(top_candidate.id);
        let sibling_score_threshold = (top_score * 0.2).max(10.0);
        let top_class = dom::class_name(&top_candidate);

        let siblings = top_candidate
            .parent()
            .map(|p| dom::children(&p))
            .unwrap_or_default();

        for sibling in siblings {
            let mut append = false;

            if sibling.id == top_candidate.id {
                append = true;
            } else {
                let mut content_bonus = 0.0;

                // Siblings sharing the top candidate's class share its fate.
                if !top_class.is_empty() && dom::class_name(&sibling) == top_class {
                    content_bonus += top_score * 0.2;
                }

                if score_store.has(sibling.id)
                    && score_store.get(sibling.id) + content_bonus >= sibling_score_threshold
                {
                    append = true;
                } else if dom::tag_name(&sibling) == "p" {
                    let link_density = scoring::link_density(&sibling);
                    let node_content = dom::inner_text(&sibling, true);
                    let node_length = node_content.chars().count();

                    if node_length > 80 && link_density < 0.25 {
                        append = true;
                    } else if node_length < 80
                        && node_length > 0
                        && link_density == 0.0
                        && SENTENCE_PERIOD.is_match(&node_content)
                    {
                        append = true;
                    }
                }
            }

            if append {
                // Anything that is not a common block container is turned
                // into a div so later cleaning does not throw it out.
                if !ALTER_TO_DIV_EXCEPTIONS.contains(&dom::tag_name(&sibling).as_str()) {
                    dom::set_node_tag(&sibling, "div");
                }

                dom::append_child(&article_content, &sibling);
            }
        }

        // --- Cleaning ---
        let mut clean_ctx = CleanContext::new(
            self.options.char_threshold,
            self.article_title.clone(),
            self.flags.clean_conditionally,
            self.flags.use_weight_classes,
        );
        cleaning::prep_article(&article_content, &mut clean_ctx);

        // --- Wrapping ---
        if needed_to_create_top_candidate {
            // The synthetic div already holds everything; just tag it.
            if let Some(first_child) = dom::first_element_child(&article_content) {
                if dom::tag_name(&first_child) == "div" {
                    dom::set_attribute(&first_child, "id", "readability-page-1");
                    dom::set_attribute(&first_child, "class", "page");
                }
            }
        } else {
            let div = dom::create_element(&article_content, "div");
            dom::set_attribute(&div, "id", "readability-page-1");
            dom::set_attribute(&div, "class", "page");
            for child in dom::child_nodes(&article_content) {
                dom::append_child(&div, &child);
            }
            dom::append_child(&article_content, &div);
        }

        let text_length = dom::inner_text(&article_content, true).chars().count();
        Some((dom::inner_html(&article_content), text_length))
    }

    /// Walk up from the highest-scoring candidate looking for a better
    /// container: a shared ancestor of several strong candidates, a parent
    /// whose score still climbs, or the parent of an only child.
    fn refine_top_candidate<'d>(
        &self,
        mut top_candidate: NodeRef<'d>,
        top_candidates: &[NodeRef<'d>],
        score_store: &mut ScoreStore,
    ) -> NodeRef<'d> {
        const MINIMUM_TOP_CANDIDATES: usize = 3;

        let top_score = score_store.get(top_candidate.id);

        // Ancestor chains of the runners-up whose scores come close.
        let mut alternative_ancestors: Vec<Vec<NodeId>> = Vec::new();
        for alt in top_candidates.iter().skip(1) {
            if score_store.get(alt.id) / top_score >= 0.75 {
                alternative_ancestors
                    .push(dom::node_ancestors(alt, 0).iter().map(|a| a.id).collect());
            }
        }

        if alternative_ancestors.len() >= MINIMUM_TOP_CANDIDATES {
            let mut parent = top_candidate.parent();
            while let Some(p) = parent {
                if dom::tag_name(&p) == "body" {
                    break;
                }

                let lists_containing = alternative_ancestors
                    .iter()
                    .filter(|ancestors| ancestors.contains(&p.id))
                    .count();
                if lists_containing >= MINIMUM_TOP_CANDIDATES {
                    top_candidate = p;
                    break;
                }

                parent = p.parent();
            }
        }

        if !score_store.has(top_candidate.id) {
            scoring::initialize_node(score_store, &top_candidate, self.flags.use_weight_classes);
        }

        // A parent whose score rises on the way up points at content spread
        // across siblings; stop once scores sink below a third of the top.
        let mut parent = top_candidate.parent();
        let mut last_score = score_store.get(top_candidate.id);
        let score_threshold = last_score / 3.0;
        while let Some(p) = parent {
            if dom::tag_name(&p) == "body" {
                break;
            }
            if !score_store.has(p.id) {
                parent = p.parent();
                continue;
            }

            let parent_score = score_store.get(p.id);
            if parent_score < score_threshold {
                break;
            }
            if parent_score > last_score {
                top_candidate = p;
                break;
            }

            last_score = parent_score;
            parent = p.parent();
        }

        // An only child gains nothing from sibling joining; use the parent.
        let mut parent = top_candidate.parent();
        while let Some(p) = parent {
            if dom::tag_name(&p) == "body" || dom::children(&p).len() != 1 {
                break;
            }
            top_candidate = p;
            parent = top_candidate.parent();
        }

        if !score_store.has(top_candidate.id) {
            scoring::initialize_node(score_store, &top_candidate, self.flags.use_weight_classes);
        }

        top_candidate
    }

    /// Record the byline when the node looks like one, at most once per
    /// parse.
    fn check_byline(&mut self, node: &NodeRef, match_string: &str) -> bool {
        if self.article_byline.is_some() {
            return false;
        }

        let rel = dom::get_attribute(node, "rel");
        let itemprop = dom::get_attribute(node, "itemprop");
        let text = dom::text_content(node);

        if (rel == "author" || itemprop.contains("author") || BYLINE.is_match(match_string))
            && is_valid_byline(&text)
        {
            let byline = text.trim().split_whitespace().collect::<Vec<_>>().join(" ");
            self.article_byline = Some(byline);
            return true;
        }

        false
    }
}

/// A plausible byline is short but not empty.
fn is_valid_byline(text: &str) -> bool {
    let len = text.trim().chars().count();
    len > 0 && len < 100
}

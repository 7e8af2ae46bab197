//! Article cleaning pipeline.
//!
//! Once the grab loop has assembled the article container, these passes
//! strip presentation attributes, classify tables, and remove the chrome
//! that survived candidate selection: forms, embeds, share widgets, spurious
//! headers, and link-heavy blocks. Order matters and follows the reference
//! pipeline exactly.

use std::collections::HashSet;

use dom_query::{NodeId, NodeRef};

use crate::dom;
use crate::extractor::scoring;
use crate::html_processing::next_element;
use crate::patterns::{
    DEPRECATED_SIZE_ATTRIBUTE_ELEMS, PRESENTATIONAL_ATTRIBUTES, SHARE, VIDEOS,
};

/// Per-attempt cleaning configuration and table classification state.
pub(crate) struct CleanContext {
    pub char_threshold: usize,
    pub article_title: String,
    pub clean_conditionally: bool,
    pub use_weight_classes: bool,
    data_tables: HashSet<NodeId>,
}

impl CleanContext {
    pub(crate) fn new(
        char_threshold: usize,
        article_title: String,
        clean_conditionally: bool,
        use_weight_classes: bool,
    ) -> Self {
        Self {
            char_threshold,
            article_title,
            clean_conditionally,
            use_weight_classes,
            data_tables: HashSet::new(),
        }
    }

    fn is_data_table(&self, node: &NodeRef) -> bool {
        self.data_tables.contains(&node.id)
    }
}

/// Prepare the article container for display: strip inline styles, remove
/// junk elements, and collapse leftover table scaffolding.
pub(crate) fn prep_article(article_content: &NodeRef, ctx: &mut CleanContext) {
    clean_styles(article_content);

    // Classify tables up front so the conditional passes leave data tables
    // and their contents alone.
    mark_data_tables(ctx, article_content);

    clean_conditionally(article_content, "form", ctx);
    clean_conditionally(article_content, "fieldset", ctx);
    clean(article_content, "object");
    clean(article_content, "embed");
    clean(article_content, "h1");
    clean(article_content, "footer");
    clean(article_content, "link");
    clean(article_content, "aside");

    // Strip share widgets inside each top-level part of the article, without
    // touching the parts themselves.
    let char_threshold = ctx.char_threshold;
    for top_candidate in dom::children(article_content) {
        clean_matched_nodes(&top_candidate, &|node, class_and_id| {
            SHARE.is_match(class_and_id)
                && dom::text_content(node).chars().count() < char_threshold
        });
    }

    // A lone <h2> that substantially equals the title is a page header, not
    // a subheading.
    let h2s = dom::get_elements_by_tag_name(article_content, "h2");
    if h2s.len() == 1 {
        let h2_text = dom::text_content(&h2s[0]);
        let title_len = ctx.article_title.chars().count() as f64;
        let length_similar_rate = (h2_text.chars().count() as f64 - title_len) / title_len;

        if length_similar_rate.abs() < 0.5 {
            let titles_match = if length_similar_rate > 0.0 {
                h2_text.contains(&ctx.article_title)
            } else {
                ctx.article_title.contains(h2_text.as_str())
            };

            if titles_match {
                clean(article_content, "h2");
            }
        }
    }

    clean(article_content, "iframe");
    clean(article_content, "input");
    clean(article_content, "textarea");
    clean(article_content, "select");
    clean(article_content, "button");
    clean_headers(article_content, ctx.use_weight_classes);

    // Do these last, the passes above may have removed junk that would have
    // kept these blocks alive.
    clean_conditionally(article_content, "table", ctx);
    clean_conditionally(article_content, "ul", ctx);
    clean_conditionally(article_content, "div", ctx);

    // Remove paragraphs with neither text nor media.
    for p in dom::get_elements_by_tag_name(article_content, "p").iter().rev() {
        let media_count = dom::get_elements_by_tag_name(p, "img").len()
            + dom::get_elements_by_tag_name(p, "embed").len()
            + dom::get_elements_by_tag_name(p, "object").len()
            + dom::get_elements_by_tag_name(p, "iframe").len();

        if media_count == 0 && dom::inner_text(p, false).is_empty() {
            dom::remove_node(p);
        }
    }

    // A <br> directly before a paragraph is redundant.
    for br in dom::get_elements_by_tag_name(article_content, "br") {
        if br.parent().is_none() {
            continue;
        }
        if let Some(next) = next_element(br.next_sibling()) {
            if dom::tag_name(&next) == "p" {
                dom::remove_node(&br);
            }
        }
    }

    // Collapse single-cell tables to their cell content.
    for table in dom::get_elements_by_tag_name(article_content, "table") {
        if table.parent().is_none() {
            continue;
        }

        let tbody = if dom::has_single_tag_inside_element(&table, "tbody") {
            dom::first_element_child(&table).unwrap_or(table.clone())
        } else {
            table.clone()
        };

        if dom::has_single_tag_inside_element(&tbody, "tr") {
            let Some(row) = dom::first_element_child(&tbody) else {
                continue;
            };

            if dom::has_single_tag_inside_element(&row, "td") {
                let Some(cell) = dom::first_element_child(&row) else {
                    continue;
                };

                let all_phrasing = dom::child_nodes(&cell).iter().all(dom::is_phrasing_content);
                dom::set_node_tag(&cell, if all_phrasing { "p" } else { "div" });
                dom::replace_node(&table, &cell);
            }
        }
    }
}

/// Remove the style attribute and deprecated presentational attributes from
/// the subtree, leaving `<svg>` internals alone.
fn clean_styles(node: &NodeRef) {
    let mut stack = vec![node.clone()];

    while let Some(current) = stack.pop() {
        let tag = dom::tag_name(&current);
        if tag == "svg" {
            continue;
        }

        for attr in PRESENTATIONAL_ATTRIBUTES {
            dom::remove_attribute(&current, attr);
        }

        if DEPRECATED_SIZE_ATTRIBUTE_ELEMS.contains(&tag.as_str()) {
            dom::remove_attribute(&current, "width");
            dom::remove_attribute(&current, "height");
        }

        stack.append(&mut dom::children(&current));
    }
}

/// Classify every `<table>` in the subtree as data or layout.
fn mark_data_tables(ctx: &mut CleanContext, root: &NodeRef) {
    for table in dom::get_elements_by_tag_name(root, "table") {
        if dom::get_attribute(&table, "role") == "presentation" {
            continue;
        }

        if dom::get_attribute(&table, "datatable") == "0" {
            continue;
        }

        if dom::has_attribute(&table, "summary") {
            ctx.data_tables.insert(table.id);
            continue;
        }

        let captions = dom::get_elements_by_tag_name(&table, "caption");
        if captions
            .first()
            .map_or(false, |caption| !dom::child_nodes(caption).is_empty())
        {
            ctx.data_tables.insert(table.id);
            continue;
        }

        const DATA_TABLE_DESCENDANTS: &[&str] = &["col", "colgroup", "tfoot", "thead", "th"];
        if DATA_TABLE_DESCENDANTS
            .iter()
            .any(|tag| !dom::get_elements_by_tag_name(&table, tag).is_empty())
        {
            ctx.data_tables.insert(table.id);
            continue;
        }

        // Nested tables indicate layout.
        if !dom::get_elements_by_tag_name(&table, "table").is_empty() {
            continue;
        }

        let (rows, columns) = row_and_column_count(&table);
        if rows >= 10 || columns > 4 || rows * columns > 10 {
            ctx.data_tables.insert(table.id);
        }
    }
}

/// Count the rows and columns of a table, honoring rowspan/colspan. Missing
/// or zero spans count as one.
fn row_and_column_count(table: &NodeRef) -> (usize, usize) {
    let mut rows = 0;
    let mut columns = 0;

    for tr in dom::get_elements_by_tag_name(table, "tr") {
        let row_span = dom::get_attribute(&tr, "rowspan").parse::<usize>().unwrap_or(0);
        rows += if row_span == 0 { 1 } else { row_span };

        let mut columns_in_row = 0;
        for cell in dom::get_elements_by_tag_name(&tr, "td") {
            let col_span = dom::get_attribute(&cell, "colspan").parse::<usize>().unwrap_or(0);
            columns_in_row += if col_span == 0 { 1 } else { col_span };
        }

        columns = columns.max(columns_in_row);
    }

    (rows, columns)
}

/// Whether an embed carries a hosted-video URL in its attributes, or for
/// `<object>` in its inner HTML.
fn is_video_embed(node: &NodeRef) -> bool {
    if dom::attribute_values(node)
        .iter()
        .any(|value| VIDEOS.is_match(value))
    {
        return true;
    }

    dom::tag_name(node) == "object" && VIDEOS.is_match(&dom::inner_html(node))
}

/// Remove every element of the given tag, keeping hosted-video embeds.
fn clean(article_content: &NodeRef, tag: &str) {
    let is_embed = matches!(tag, "object" | "embed" | "iframe");

    for node in dom::get_elements_by_tag_name(article_content, tag).iter().rev() {
        if node.parent().is_none() {
            continue;
        }

        if is_embed && is_video_embed(node) {
            continue;
        }

        dom::remove_node(node);
    }
}

/// Remove elements of the given tag that look fishy: negative class weight,
/// or few commas combined with bad image/list/input/link ratios.
fn clean_conditionally(article_content: &NodeRef, tag: &str, ctx: &CleanContext) {
    if !ctx.clean_conditionally {
        return;
    }

    let is_list = tag == "ul" || tag == "ol";

    for node in dom::get_elements_by_tag_name(article_content, tag).iter().rev() {
        if node.parent().is_none() {
            continue;
        }

        // Data tables and anything inside one stay intact.
        if tag == "table" && ctx.is_data_table(node) {
            continue;
        }
        let data_table_filter: &dyn Fn(&NodeRef) -> bool = &|n| ctx.is_data_table(n);
        if dom::has_ancestor_tag(node, "table", -1, Some(data_table_filter)) {
            continue;
        }

        let weight = scoring::class_weight(node, ctx.use_weight_classes);
        if weight < 0 {
            dom::remove_node(node);
            continue;
        }

        if dom::char_count(node, ',') >= 10 {
            continue;
        }

        // Few commas: judge by the balance of paragraphs against images,
        // list items, inputs, links, and embeds.
        let p = dom::get_elements_by_tag_name(node, "p").len() as f64;
        let img = dom::get_elements_by_tag_name(node, "img").len() as f64;
        let li = dom::get_elements_by_tag_name(node, "li").len() as f64 - 100.0;
        let input = dom::get_elements_by_tag_name(node, "input").len() as f64;

        let embeds = dom::get_all_nodes_with_tag(node, &["object", "embed", "iframe"]);
        if embeds.iter().any(is_video_embed) {
            continue;
        }
        let embed_count = embeds.len();

        let link_density = scoring::link_density(node);
        let content_length = dom::inner_text(node, true).chars().count();
        let no_figure_ancestor = !dom::has_ancestor_tag(node, "figure", 3, None);

        let should_remove = (img > 1.0 && p / img < 0.5 && no_figure_ancestor)
            || (!is_list && li > p)
            || (input > (p / 3.0).floor())
            || (!is_list
                && content_length < 25
                && (img == 0.0 || img > 2.0)
                && no_figure_ancestor)
            || (!is_list && weight < 25 && link_density > 0.2)
            || (weight >= 25 && link_density > 0.5)
            || ((embed_count == 1 && content_length < 75) || embed_count > 1);

        if should_remove {
            dom::remove_node(node);
        }
    }
}

/// Remove descendants whose class/id combination passes the filter, walking
/// the subtree depth-first.
fn clean_matched_nodes(root: &NodeRef, filter: &dyn Fn(&NodeRef, &str) -> bool) {
    let end_of_search = dom::next_node(root, true);
    let mut next = dom::next_node(root, false);

    while let Some(node) = next {
        if let Some(end) = &end_of_search {
            if node.id == end.id {
                break;
            }
        }

        let class_and_id = format!("{} {}", dom::class_name(&node), dom::id(&node));
        if filter(&node, &class_and_id) {
            next = dom::remove_and_get_next(&node);
        } else {
            next = dom::next_node(&node, false);
        }
    }
}

/// Remove `<h1>` and `<h2>` headers with a negative class weight.
fn clean_headers(article_content: &NodeRef, use_weight_classes: bool) {
    for tag in ["h1", "h2"] {
        for header in dom::get_elements_by_tag_name(article_content, tag).iter().rev() {
            if header.parent().is_none() {
                continue;
            }
            if scoring::class_weight(header, use_weight_classes) < 0 {
                dom::remove_node(header);
            }
        }
    }
}

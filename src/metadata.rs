//! Metadata extraction from meta tags, link elements, and headings.
//!
//! Builds a dictionary of recognized `<meta>` keys (Dublin Core, Open Graph,
//! twitter, weibo), then fills each article field from a fixed priority
//! list. The document title falls back to the `<title>` element run through
//! the separator heuristics, and the favicon pick prefers the largest square
//! PNG the page declares.

use std::collections::HashMap;

use url::Url;

use crate::dom::{self, Document};
use crate::patterns::{
    FAVICON_SIZE, META_NAME, META_PROPERTY, NORMALIZE, TITLE_ANY_SEPARATOR,
    TITLE_HIERARCHY_SEP, TITLE_REMOVE_1ST_PART, TITLE_REMOVE_FINAL_PART, TITLE_SEPARATOR,
};

/// Metadata mined from the document before the grab loop runs.
#[derive(Debug, Default)]
pub(crate) struct Metadata {
    pub title: Option<String>,
    pub byline: Option<String>,
    pub excerpt: Option<String>,
    pub site_name: Option<String>,
    pub image: Option<String>,
    pub favicon: Option<String>,
}

/// Collect article metadata from the document.
pub(crate) fn article_metadata(doc: &Document, base: &Url) -> Metadata {
    let values = meta_values(doc);

    let mut title = first_value(
        &values,
        &[
            "dc:title",
            "dcterm:title",
            "og:title",
            "weibo:article:title",
            "weibo:webpage:title",
            "title",
            "twitter:title",
        ],
    );
    if title.is_none() {
        let fallback = article_title(doc);
        if !fallback.is_empty() {
            title = Some(fallback);
        }
    }

    let byline = first_value(&values, &["dc:creator", "dcterm:creator", "author"]);

    let excerpt = first_value(
        &values,
        &[
            "dc:description",
            "dcterm:description",
            "og:description",
            "weibo:article:description",
            "weibo:webpage:description",
            "description",
            "twitter:description",
        ],
    );

    let site_name = values.get("og:site_name").cloned();

    let image = first_value(&values, &["og:image", "image", "twitter:image"])
        .map(|uri| crate::url_utils::to_absolute_uri(&uri, base));

    let favicon = article_favicon(doc, base);

    Metadata {
        title,
        byline,
        excerpt,
        site_name,
        image,
        favicon,
    }
}

/// Build the dictionary of normalized meta keys. `property` attributes are
/// scanned for every recognized `prefix:field` pair; `name` attributes are
/// lowercased, stripped of whitespace, and have dots converted to colons.
fn meta_values(doc: &Document) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for meta in doc.select("meta").nodes() {
        let name = dom::get_attribute(meta, "name");
        let property = dom::get_attribute(meta, "property");
        let content = dom::get_attribute(meta, "content");
        if content.is_empty() {
            continue;
        }

        let mut matched_property = false;
        if !property.is_empty() {
            // Reverse order so the first recognized key in the attribute wins
            let matches: Vec<&str> = META_PROPERTY
                .find_iter(&property)
                .map(|m| m.as_str())
                .collect();
            for m in matches.iter().rev() {
                matched_property = true;
                let key: String = m.to_lowercase().split_whitespace().collect();
                values.insert(key, content.trim().to_string());
            }
        }

        if !matched_property && !name.is_empty() && META_NAME.is_match(&name) {
            let key: String = name.to_lowercase().split_whitespace().collect::<String>();
            let key = key.replace('.', ":");
            values.insert(key, content.trim().to_string());
        }
    }

    values
}

/// Pick the first present key from a priority list.
fn first_value(values: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| values.get(*key).cloned())
}

/// Derive the article title from the `<title>` element.
///
/// When the title carries separator chrome (`|`, `-`, `\`, `/`, `>`, `»`)
/// the trailing segment is dropped, or the leading one when the remainder
/// gets too short. A `": "` title is cut at the colon unless a heading
/// carries the full string. Very short or very long titles yield to a lone
/// `<h1>`. A result of four words or fewer reverts to the original unless
/// exactly one separator segment was dropped.
pub(crate) fn article_title(doc: &Document) -> String {
    let Some(html_el) = dom::document_element(doc) else {
        return String::new();
    };

    let mut orig_title = String::new();
    if let Some(title_el) = dom::get_elements_by_tag_name(&html_el, "title").first() {
        orig_title = dom::inner_text(title_el, true);
    }
    let mut cur_title = orig_title.clone();
    let mut title_had_hierarchical_separators = false;

    if TITLE_SEPARATOR.is_match(&cur_title) {
        title_had_hierarchical_separators = TITLE_HIERARCHY_SEP.is_match(&cur_title);
        cur_title = TITLE_REMOVE_FINAL_PART.replace(&orig_title, "$1").to_string();

        // If the resulting title is too short (3 words or fewer), remove
        // the first part instead
        if dom::word_count(&cur_title) < 3 {
            cur_title = TITLE_REMOVE_1ST_PART.replace(&orig_title, "$1").to_string();
        }
    } else if cur_title.contains(": ") {
        // Check whether a heading carries this exact string, in which case
        // it is the full title
        let headings = dom::get_all_nodes_with_tag(&html_el, &["h1", "h2"]);
        let trimmed_title = cur_title.trim().to_string();
        let heading_match = headings
            .iter()
            .any(|heading| dom::text_content(heading).trim() == trimmed_title);

        if !heading_match {
            if let Some(last_colon) = orig_title.rfind(':') {
                cur_title = orig_title[last_colon + 1..].to_string();

                if dom::word_count(&cur_title) < 3 {
                    // Too short, try the first colon instead
                    if let Some(first_colon) = orig_title.find(':') {
                        cur_title = orig_title[first_colon + 1..].to_string();
                    }
                } else if let Some(first_colon) = orig_title.find(':') {
                    // Too many words before the colon means the title and
                    // the headings disagree, keep the original
                    if dom::word_count(&orig_title[..first_colon]) > 5 {
                        cur_title = orig_title.clone();
                    }
                }
            }
        }
    } else if cur_title.chars().count() > 150 || cur_title.chars().count() < 15 {
        let h_ones = dom::get_elements_by_tag_name(&html_el, "h1");
        if h_ones.len() == 1 {
            cur_title = dom::inner_text(&h_ones[0], true);
        }
    }

    cur_title = NORMALIZE.replace_all(cur_title.trim(), " ").to_string();

    // A title of 4 words or fewer is suspicious unless stripping the chrome
    // removed exactly one word
    let cur_word_count = dom::word_count(&cur_title) as isize;
    let stripped_orig = TITLE_ANY_SEPARATOR.replace_all(&orig_title, "").to_string();
    if cur_word_count <= 4
        && (!title_had_hierarchical_separators
            || cur_word_count != dom::word_count(&stripped_orig) as isize - 1)
    {
        cur_title = orig_title;
    }

    cur_title
}

/// Pick the best favicon among `<link rel*=icon>` elements. Only PNG icons
/// qualify, and the one with the largest declared square size wins.
fn article_favicon(doc: &Document, base: &Url) -> Option<String> {
    let mut favicon = String::new();
    let mut favicon_size: i64 = -1;

    for link in doc.select("link").nodes() {
        let rel = dom::get_attribute(link, "rel").trim().to_string();
        let link_type = dom::get_attribute(link, "type").trim().to_string();
        let href = dom::get_attribute(link, "href").trim().to_string();
        let sizes = dom::get_attribute(link, "sizes").trim().to_string();

        if href.is_empty() || !rel.contains("icon") {
            continue;
        }

        if link_type != "image/png" && !href.contains(".png") {
            continue;
        }

        let mut size: i64 = 0;
        for location in [&sizes, &href] {
            if let Some(caps) = FAVICON_SIZE.captures(location) {
                if caps[1] == caps[2] {
                    size = caps[1].parse().unwrap_or(0);
                    break;
                }
            }
        }

        if size > favicon_size {
            favicon_size = size;
            favicon = href;
        }
    }

    if favicon.is_empty() {
        None
    } else {
        Some(crate::url_utils::to_absolute_uri(&favicon, base))
    }
}

/// Text direction of the document, from the `dir` attribute of `<html>` or
/// `<body>`.
pub(crate) fn article_dir(doc: &Document) -> Option<String> {
    for selector in ["html", "body"] {
        if let Some(node) = doc.select(selector).nodes().first() {
            let dir = dom::get_attribute(node, "dir");
            if !dir.is_empty() {
                return Some(dir);
            }
        }
    }
    None
}

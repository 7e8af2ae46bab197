//! Compiled regex classifiers and constant tag lists for article extraction.
//!
//! All patterns are compiled once at first use via `LazyLock` and shared
//! process-wide. They are data, not code: the extraction heuristics treat a
//! match as a yes/no signal and never rebuild or alter a pattern at runtime.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Candidate Classification Patterns
// =============================================================================

/// Class/id fragments that disqualify an element as an article candidate.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|foot|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote",
    )
    .expect("UNLIKELY_CANDIDATES regex")
});

/// Rescues elements matched by [`UNLIKELY_CANDIDATES`] that still look like
/// content containers.
pub static OK_MAYBE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|main|shadow").expect("OK_MAYBE_CANDIDATE regex")
});

/// Class/id fragments worth a +25 class weight.
pub static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article|body|content|entry|hentry|h-entry|main|page|pagination|post|text|blog|story")
        .expect("POSITIVE regex")
});

/// Class/id fragments worth a -25 class weight.
pub static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)hidden|^hid$| hid$| hid |^hid |banner|combx|comment|com-|contact|foot|footer|footnote|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|tool|widget",
    )
    .expect("NEGATIVE regex")
});

/// Class/id fragments marking a byline element.
pub static BYLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)byline|author|dateline|writtenby|p-author").expect("BYLINE regex")
});

/// Embed URLs that should survive cleaning (hosted video players).
pub static VIDEOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)//(www\.)?((dailymotion|youtube|youtube-nocookie|player\.vimeo|v\.qq)\.com|(archive|upload\.wikimedia)\.org|player\.twitch\.tv)",
    )
    .expect("VIDEOS regex")
});

/// Class/id fragments marking share widgets.
pub static SHARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)share").expect("SHARE regex"));

/// Inline style that hides an element.
pub static DISPLAY_NONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").expect("DISPLAY_NONE regex"));

/// A sentence-terminating period, used by the sibling-inclusion heuristic.
pub static SENTENCE_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.( |$)").expect("SENTENCE_PERIOD regex"));

// =============================================================================
// Text Normalization Patterns
// =============================================================================

/// Runs of two or more whitespace chars, collapsed to a single space.
pub static NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("NORMALIZE regex"));

/// Whitespace-only (or empty) text.
pub static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*$").expect("WHITESPACE regex"));

/// Text ending in a non-whitespace char.
pub static HAS_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S$").expect("HAS_CONTENT regex"));

// =============================================================================
// Title Heuristic Patterns
// =============================================================================

/// A separator between the article title and site chrome.
pub static TITLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i) [\|\-\\/>»] ").expect("TITLE_SEPARATOR regex"));

/// The hierarchical subset of title separators.
pub static TITLE_HIERARCHY_SEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i) [\\/>»] ").expect("TITLE_HIERARCHY_SEP regex"));

/// Captures everything before the final separator segment.
pub static TITLE_REMOVE_FINAL_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(.*)[\|\-\\/>»] .*").expect("TITLE_REMOVE_FINAL_PART regex"));

/// Captures everything after the first separator segment.
pub static TITLE_REMOVE_1ST_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[^\|\-\\/>»]*[\|\-\\/>»](.*)").expect("TITLE_REMOVE_1ST_PART regex")
});

/// Any run of title separator chars.
pub static TITLE_ANY_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[\|\-\\/>»]+").expect("TITLE_ANY_SEPARATOR regex"));

// =============================================================================
// Metadata Patterns
// =============================================================================

/// Recognized `<meta property="...">` keys.
pub static META_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(dc|dcterm|og|twitter)\s*:\s*(author|creator|description|title|site_name|image\S*)\s*")
        .expect("META_PROPERTY regex")
});

/// Recognized `<meta name="...">` keys.
pub static META_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(dc|dcterm|og|twitter|weibo:(article|webpage))\s*[\.:]\s*)?(author|creator|description|title|site_name|image)\s*$",
    )
    .expect("META_NAME regex")
});

/// Declared favicon dimensions, `NxN`.
pub static FAVICON_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)x(\d+)").expect("FAVICON_SIZE regex"));

// =============================================================================
// Constant Tag Lists
// =============================================================================

/// Tags that mark a `<div>` as holding block-level content.
pub const DIV_TO_P_ELEMS: &[&str] = &[
    "a", "blockquote", "div", "dl", "img", "ol", "p", "pre", "select", "table", "ul",
];

/// Tags kept as-is when included siblings are renamed to `<div>`.
pub const ALTER_TO_DIV_EXCEPTIONS: &[&str] = &["article", "div", "p", "section"];

/// Presentational attributes stripped from the article.
pub const PRESENTATIONAL_ATTRIBUTES: &[&str] = &[
    "align",
    "background",
    "bgcolor",
    "border",
    "cellpadding",
    "cellspacing",
    "frame",
    "hspace",
    "rules",
    "style",
    "valign",
    "vspace",
];

/// Tags whose deprecated `width`/`height` attributes are stripped.
pub const DEPRECATED_SIZE_ATTRIBUTE_ELEMS: &[&str] = &["table", "th", "td", "hr", "pre"];

/// Phrasing-content tags. `canvas`, `iframe`, `svg` and `video` qualify per
/// the HTML spec but tend to be removed when hoisted into paragraphs, so they
/// are left out.
pub const PHRASING_ELEMS: &[&str] = &[
    "abbr", "audio", "b", "bdo", "br", "button", "cite", "code", "data", "datalist", "dfn", "em",
    "embed", "i", "img", "input", "kbd", "label", "mark", "math", "meter", "noscript", "object",
    "output", "progress", "q", "ruby", "samp", "script", "select", "small", "span", "strong",
    "sub", "sup", "textarea", "time", "var", "wbr",
];

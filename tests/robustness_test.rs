use rs_readability::{is_readable, parse, parse_bytes, Error, Options};

const BASE: &str = "https://example.com/page";

#[test]
fn parse_does_not_panic_on_unclosed_tags() {
    let article = parse("<p>text<div>more", BASE).expect("parse");
    assert!(article.text_content.contains("text"));
    assert!(article.text_content.contains("more"));
}

#[test]
fn parse_does_not_panic_on_invalid_nesting() {
    let result = parse("<p><div></p></div>", BASE);
    assert!(result.is_ok());
}

#[test]
fn parse_does_not_panic_on_broken_attributes() {
    let result = parse("<div class=\"test id=broken>", BASE);
    assert!(result.is_ok());
}

#[test]
fn parse_handles_empty_and_whitespace_input() {
    for input in ["", "   \n\t  ", "<html></html>"] {
        let article = parse(input, BASE).expect("parse");
        assert!(article.text_content.is_empty());
        assert_eq!(article.length, 0);
    }
}

#[test]
fn parse_handles_null_bytes() {
    let result = parse("text\u{0}more", BASE);
    assert!(result.is_ok());
}

#[test]
fn invalid_base_url_is_rejected_eagerly() {
    let err = parse("<html><body><p>x</p></body></html>", "relative/path").expect_err("bad url");
    assert!(matches!(err, Error::InvalidUrl(_)));
    assert!(err.to_string().starts_with("failed to parse URL:"));
}

#[test]
fn parse_bytes_handles_legacy_encodings() {
    let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Na\xEFve caf\xE9 visitors linger over croissants and coffee, reading the morning paper in peace.</p></body></html>";

    let article = parse_bytes(html, BASE).expect("parse");
    assert!(article.text_content.contains("Na\u{ef}ve caf\u{e9}"));
}

#[test]
fn options_are_call_local() {
    // Two parses with different options on the same input stay independent.
    let html = r#"<html><head><title>hello world</title></head><body><p>lorem ipsum</p></body></html>"#;

    let strict = Options {
        max_elems_to_parse: 3,
        ..Options::default()
    };
    assert!(rs_readability::parse_with_options(html, BASE, &strict).is_err());
    assert!(parse(html, BASE).is_ok());
}

#[test]
fn repeated_parses_give_identical_results() {
    let html = r#"<html><body><article>
        <p class="byline">By A. Writer</p>
        <p>Stable content extraction should not depend on hidden state carried over from a previous run of the parser, however long the document.</p>
    </article></body></html>"#;

    let first = parse(html, BASE).expect("first");
    let second = parse(html, BASE).expect("second");
    assert_eq!(first, second);
}

#[test]
fn is_readable_does_not_panic_on_malformed_input() {
    assert!(!is_readable("<p>text<div>more"));
    assert!(!is_readable(""));
    assert!(!is_readable("<<<>>>"));
}

#[test]
fn large_document_parses_quickly_enough() {
    let mut html = String::from("<html><body><article>");
    for i in 0..2000 {
        html.push_str(&format!(
            "<p>Paragraph number {i} with some filler words, a comma, and a period to finish.</p>"
        ));
    }
    html.push_str("</article></body></html>");

    let start = std::time::Instant::now();
    let article = parse(&html, BASE).expect("parse");
    assert!(article.length > 10_000);
    assert!(
        start.elapsed() < std::time::Duration::from_secs(60),
        "took {:?}",
        start.elapsed()
    );
}

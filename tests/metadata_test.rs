use rs_readability::parse;

const BASE: &str = "https://news.example.com/2024/story";

fn article_body() -> String {
    let sentence = "Reporting continued through the evening, with officials confirming the timeline, the scope of the review, and the next steps for the agency. ";
    let mut text = String::new();
    while text.chars().count() < 600 {
        text.push_str(sentence);
    }
    text
}

fn page(head: &str) -> String {
    format!(
        "<html><head>{head}</head><body><article><p>{}</p></article></body></html>",
        article_body()
    )
}

#[test]
fn open_graph_metadata_is_collected() {
    let html = page(
        r#"<title>Story Title - Example News</title>
           <meta property="og:title" content="The Open Graph Story Title">
           <meta property="og:description" content="What happened, in brief.">
           <meta property="og:site_name" content="Example News">
           <meta property="og:image" content="/img/hero.jpg">"#,
    );

    let article = parse(&html, BASE).expect("parse");
    assert_eq!(article.title.as_deref(), Some("The Open Graph Story Title"));
    assert_eq!(article.excerpt.as_deref(), Some("What happened, in brief."));
    assert_eq!(article.site_name.as_deref(), Some("Example News"));
    assert_eq!(
        article.image.as_deref(),
        Some("https://news.example.com/img/hero.jpg")
    );
}

#[test]
fn dublin_core_wins_over_other_title_sources() {
    let html = page(
        r#"<meta property="og:title" content="og title">
           <meta name="dc.title" content="dc title">
           <meta name="twitter:title" content="twitter title">"#,
    );

    let article = parse(&html, BASE).expect("parse");
    assert_eq!(article.title.as_deref(), Some("dc title"));
}

#[test]
fn twitter_fields_fill_gaps() {
    let html = page(
        r#"<meta name="twitter:title" content="Twitter Card Title">
           <meta name="twitter:description" content="Card description text.">"#,
    );

    let article = parse(&html, BASE).expect("parse");
    assert_eq!(article.title.as_deref(), Some("Twitter Card Title"));
    assert_eq!(article.excerpt.as_deref(), Some("Card description text."));
}

#[test]
fn title_element_chrome_is_stripped() {
    let html = page(r#"<title>A Headline Worth Reading Twice | Example News</title>"#);

    let article = parse(&html, BASE).expect("parse");
    assert_eq!(article.title.as_deref(), Some("A Headline Worth Reading Twice"));
}

#[test]
fn weibo_title_keys_are_recognized() {
    let html = page(r#"<meta name="weibo:article:title" content="Weibo Article Title">"#);

    let article = parse(&html, BASE).expect("parse");
    assert_eq!(article.title.as_deref(), Some("Weibo Article Title"));
}

#[test]
fn byline_comes_from_creator_keys() {
    let html = page(r#"<meta name="dc.creator" content="First Author">
                      <meta name="author" content="Second Author">"#);

    let article = parse(&html, BASE).expect("parse");
    assert_eq!(article.byline.as_deref(), Some("First Author"));
}

#[test]
fn favicon_prefers_largest_square_png() {
    let html = page(
        r#"<link rel="icon" type="image/png" sizes="16x16" href="/icons/16.png">
           <link rel="icon" type="image/png" sizes="192x192" href="/icons/192.png">
           <link rel="icon" type="image/png" sizes="32x32" href="/icons/32.png">
           <link rel="shortcut icon" href="/favicon.ico">"#,
    );

    let article = parse(&html, BASE).expect("parse");
    assert_eq!(
        article.favicon.as_deref(),
        Some("https://news.example.com/icons/192.png")
    );
}

#[test]
fn excerpt_falls_back_to_first_paragraph() {
    let html = page("<title>A Reasonably Long Headline Without Chrome</title>");

    let article = parse(&html, BASE).expect("parse");
    let excerpt = article.excerpt.expect("excerpt");
    assert!(excerpt.starts_with("Reporting continued through the evening"));
}

#[test]
fn dir_attribute_is_reported() {
    let html = format!(
        "<html dir=\"rtl\"><body><article><p>{}</p></article></body></html>",
        article_body()
    );

    let article = parse(&html, BASE).expect("parse");
    assert_eq!(article.dir.as_deref(), Some("rtl"));
}

#[test]
fn missing_metadata_stays_empty_without_error() {
    let article = parse(
        &format!("<html><body><p>{}</p></body></html>", article_body()),
        BASE,
    )
    .expect("parse");

    assert!(article.title.is_none());
    assert!(article.byline.is_none());
    assert!(article.site_name.is_none());
    assert!(article.image.is_none());
    assert!(article.favicon.is_none());
    // Content was still extracted
    assert!(article.length > 500);
}

use crate::error::ContentError;
use crate::types::Marker;

use super::{capture_capacity, extract, extract_with_min, CAPTURE_CAPACITY};

fn texts(markup: &str, marker: &Marker) -> Vec<String> {
    extract(markup, marker)
        .expect("content")
        .into_iter()
        .map(|b| b.text)
        .collect()
}

#[test]
fn extracts_paragraphs_from_id_container() {
    let html = r#"<html><body><nav>Menu</nav>
        <div id="chapterText"><p>Hello   world.</p><p>Second.</p></div>
        <footer>Copyright</footer></body></html>"#;
    assert_eq!(
        texts(html, &Marker::id("chapterText")),
        ["Hello   world.\nSecond.\n"]
    );
}

#[test]
fn nested_tags_are_dropped_but_text_kept() {
    let html = r#"<div id="chapterText">The <em>quick</em> <b>brown</b> fox jumps.</div>"#;
    assert_eq!(
        texts(html, &Marker::id("chapterText")),
        ["The quick brown fox jumps."]
    );
}

#[test]
fn nested_container_tag_does_not_end_capture() {
    let html = r#"<div id="chapterText"><div class="inner">Inner text here.</div>Tail text.</div><div>Outside</div>"#;
    let blocks = texts(html, &Marker::id("chapterText"));
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].contains("Inner text here."));
    assert!(blocks[0].contains("Tail text."));
    assert!(!blocks[0].contains("Outside"));
}

#[test]
fn source_newlines_fold_to_spaces() {
    let html = "<div id=\"chapterText\">line one\nline\ttwo\r\nend of it</div>";
    assert_eq!(
        texts(html, &Marker::id("chapterText")),
        ["line one line two  end of it"]
    );
}

#[test]
fn multiple_id_matches_become_separate_blocks() {
    let html = r#"
        <div id="chapterText"><p>First part of the chapter.</p></div>
        <div class="ad">Buy now</div>
        <div id="chapterText"><p>Second part of the chapter.</p></div>"#;
    let blocks = texts(html, &Marker::id("chapterText"));
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("First part"));
    assert!(blocks[1].starts_with("Second part"));
}

#[test]
fn id_match_wins_over_class_fallback() {
    let html = r#"
        <div class="prose">Class based text that should be ignored.</div>
        <div id="chapterText">Id based text wins here.</div>"#;
    let marker = Marker::new("chapterText", ["prose"]);
    assert_eq!(texts(html, &marker), ["Id based text wins here."]);
}

#[test]
fn falls_back_to_class_substring() {
    let html = r#"
        <article class="entry chapter-content-body">Fallback prose body text.</article>
        <div class="sidebar">Not this</div>"#;
    let marker = Marker::new("chapterText", ["prose", "chapter-content"]);
    assert_eq!(texts(html, &marker), ["Fallback prose body text."]);
}

#[test]
fn scripts_and_comments_inside_container_are_skipped() {
    let html = r#"<div id="chapterText">Visible<script>var s = "</div>";</script><!-- hidden --> text stays.<noscript>enable js</noscript></div>"#;
    assert_eq!(
        texts(html, &Marker::id("chapterText")),
        ["Visible text stays."]
    );
}

#[test]
fn unclosed_container_runs_to_end_of_input() {
    let html = r#"<div id="chapterText"><p>Never closed but still readable"#;
    assert_eq!(
        texts(html, &Marker::id("chapterText")),
        ["Never closed but still readable"]
    );
}

#[test]
fn missing_marker_is_not_found() {
    let err = extract("<p>Just some page</p>", &Marker::id("chapterText")).unwrap_err();
    assert!(matches!(err, ContentError::NotFound { .. }));
    assert!(err.is_content_not_found());
}

#[test]
fn short_content_is_not_found() {
    let err = extract(r#"<div id="chapterText"> tiny </div>"#, &Marker::id("chapterText"))
        .unwrap_err();
    assert_eq!(err, ContentError::TooShort { len: 4, min: 10 });
    assert!(err.is_content_not_found());
}

#[test]
fn threshold_is_configurable() {
    let html = r#"<div id="chapterText">tiny</div>"#;
    assert!(extract_with_min(html, &Marker::id("chapterText"), 4).is_ok());
}

#[test]
fn unterminated_marker_tag_is_malformed() {
    let html = r#"<html><body><div id="chapterText" class="x"#;
    let err = extract(html, &Marker::id("chapterText")).unwrap_err();
    assert!(matches!(err, ContentError::Malformed { .. }));
    assert!(err.is_content_not_found());
}

#[test]
fn self_closing_container_yields_no_text() {
    let err = extract(r#"<div id="chapterText"/>"#, &Marker::id("chapterText")).unwrap_err();
    assert_eq!(err, ContentError::TooShort { len: 0, min: 10 });
}

#[test]
fn malformed_attributes_before_container_still_match() {
    let html = r#"<div a= b="x>y" id="chapterText">Hello world, enough text.</div>"#;
    assert_eq!(
        texts(html, &Marker::id("chapterText")),
        ["Hello world, enough text."]
    );

    let html = r#"<p a=="x>y">skip</p><div id="chapterText">Hello world, enough text.</div>"#;
    assert_eq!(
        texts(html, &Marker::id("chapterText")),
        ["Hello world, enough text."]
    );
}

#[test]
fn capture_buffers_do_not_scale_with_page_size() {
    assert_eq!(capture_capacity("<p>x</p>"), 8);
    let page = "x".repeat(4 << 20);
    assert_eq!(capture_capacity(&page), CAPTURE_CAPACITY);

    let html = format!(
        "{}{}",
        r#"<div id="chapterText">Many matches on a big page.</div>"#.repeat(200),
        " ".repeat(1 << 20)
    );
    assert_eq!(texts(&html, &Marker::id("chapterText")).len(), 200);
}

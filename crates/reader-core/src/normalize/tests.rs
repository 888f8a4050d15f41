use std::borrow::Cow;

use crate::extract::extract;
use crate::types::{ContentBlock, Marker};

use super::{decode_entities, normalize, normalize_str};

fn blocks(texts: &[&str]) -> Vec<ContentBlock> {
    texts.iter().copied().map(ContentBlock::new).collect()
}

#[test]
fn extracted_paragraphs_collapse_to_single_breaks() {
    let html = r#"<div id="chapterText"><p>Hello   world.</p><p>Second.</p></div>"#;
    let extracted = extract(html, &Marker::id("chapterText")).expect("content");
    assert_eq!(normalize(&extracted).as_str(), "Hello world.\nSecond.");
}

#[test]
fn decodes_the_fixed_entity_table() {
    assert_eq!(
        decode_entities("&lt;p&gt; &amp; &quot;hi&quot; &apos;s&apos;"),
        "<p> & \"hi\" 's'"
    );
    assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
    assert_eq!(decode_entities("a&nbsp;b"), "a\u{00A0}b");
    assert_eq!(decode_entities("&#x1F4D6;"), "\u{1F4D6}");
}

#[test]
fn unknown_and_malformed_entities_pass_through() {
    for raw in [
        "&copy;",
        "&amp",
        "AT&T rules",
        "&#;",
        "&#x;",
        "&#12a;",
        "&#0;",
        "&#xD800;",
        "&#x110000;",
        "&#99999999999;",
        "&LT;",
        "trailing &",
    ] {
        assert_eq!(decode_entities(raw), raw, "{raw}");
    }
}

#[test]
fn decoding_is_single_pass() {
    assert_eq!(decode_entities("&amp;lt;"), "&lt;");
}

#[test]
fn text_without_ampersand_is_borrowed() {
    assert!(matches!(decode_entities("plain text"), Cow::Borrowed(_)));
}

#[test]
fn entity_after_multibyte_text_is_decoded() {
    assert_eq!(decode_entities("é&amp;ü"), "é&ü");
    assert_eq!(decode_entities("&ééééé;"), "&ééééé;");
}

#[test]
fn whitespace_runs_become_one_space() {
    assert_eq!(
        normalize_str("  a \t b\u{00A0}\u{00A0}c\r\x0cd  ").as_str(),
        "a b c d"
    );
}

#[test]
fn nbsp_entities_collapse_like_spaces() {
    assert_eq!(normalize_str("one&nbsp;&nbsp; two").as_str(), "one two");
}

#[test]
fn boundary_runs_collapse_and_paragraphs_are_trimmed() {
    assert_eq!(
        normalize_str("\n\n  first  \n \n\n  second \u{2029} third\n").as_str(),
        "first\nsecond\nthird"
    );
}

#[test]
fn blocks_are_joined_with_one_break() {
    let text = normalize(&blocks(&["Part one.\n", "\n Part two.", "   ", "Part three."]));
    assert_eq!(text.as_str(), "Part one.\nPart two.\nPart three.");
    assert_eq!(text.paragraphs().count(), 3);
}

#[test]
fn invisible_characters_are_removed() {
    assert_eq!(
        normalize_str("\u{FEFF}zero\u{200B}width soft\u{00AD}hyphen").as_str(),
        "zerowidth softhyphen"
    );
}

#[test]
fn empty_input_normalizes_to_empty() {
    assert!(normalize(&[]).is_empty());
    assert!(normalize_str(" \n\t\u{00A0} ").is_empty());
}

#[test]
fn normalizing_is_idempotent() {
    let samples = [
        "",
        "plain",
        "  lead and trail  ",
        "a\n\n\nb",
        "x \u{2029} y\u{00A0}\u{00A0}z",
        "tabs\tand\r\nnewlines\n \n",
        "\u{200B}\n\u{FEFF}",
        "The quick brown fox\njumps over\n\nthe lazy dog.",
    ];
    for sample in samples {
        let once = normalize_str(sample);
        let twice = normalize_str(once.as_str());
        assert_eq!(once, twice, "{sample:?}");
    }
}

#[test]
fn normalized_text_has_no_stray_whitespace() {
    let text = normalize_str(" a  b \n\n c\t\n");
    let s = text.as_str();
    assert!(!s.starts_with(char::is_whitespace));
    assert!(!s.ends_with(char::is_whitespace));
    assert!(!s.contains("  "));
    assert!(!s.contains(" \n") && !s.contains("\n ") && !s.contains("\n\n"));
}

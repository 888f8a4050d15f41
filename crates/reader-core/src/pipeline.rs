use std::sync::Arc;

use tracing::debug;

use crate::cache::ChapterCache;
use crate::error::ContentError;
use crate::extract::extract_with_min;
use crate::normalize::normalize;
use crate::types::{Marker, NormalizedText};

/// Extracts and normalizes one page of markup.
///
/// The length threshold is checked again after normalization since entity
/// decoding and whitespace collapsing can shrink the text.
pub fn prepare(markup: &str, marker: &Marker, min_len: usize) -> Result<NormalizedText, ContentError> {
    let blocks = extract_with_min(markup, marker, min_len)?;
    let text = normalize(&blocks);
    let len = text.char_len();
    if len < min_len {
        debug!(len, min_len, "normalized text below threshold");
        return Err(ContentError::TooShort { len, min: min_len });
    }
    Ok(text)
}

/// [`prepare`] behind a cache lookup. `load` only runs on a miss and
/// failures are not cached.
pub fn prepare_cached<F, E>(
    key: &str,
    load: F,
    marker: &Marker,
    min_len: usize,
    cache: &mut ChapterCache,
) -> Result<Arc<NormalizedText>, E>
where
    F: FnOnce() -> Result<String, E>,
    E: From<ContentError>,
{
    if let Some(hit) = cache.get(key) {
        debug!(key, "chapter cache hit");
        return Ok(hit);
    }
    let markup = load()?;
    let text = Arc::new(prepare(&markup, marker, min_len)?);
    cache.insert(key, Arc::clone(&text));
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::MIN_CONTENT_LEN;

    #[test]
    fn markup_becomes_normalized_paragraphs() {
        let html = r#"<div id="chapterText"><p>Hello   world.</p><p>Second.</p></div>"#;
        let text = prepare(html, &Marker::default(), MIN_CONTENT_LEN).expect("text");
        assert_eq!(text.as_str(), "Hello world.\nSecond.");
    }

    #[test]
    fn blocks_from_several_containers_are_joined() {
        let html = r#"<div id="chapterText">First half of it.</div>
            <aside>ad</aside><div id="chapterText">Second half.</div>"#;
        let text = prepare(html, &Marker::default(), MIN_CONTENT_LEN).expect("text");
        assert_eq!(text.as_str(), "First half of it.\nSecond half.");
    }

    #[test]
    fn entities_are_decoded() {
        let html = r#"<div class="prose">Fish &amp; chips&nbsp;&#8212; &lt;cheap&gt;</div>"#;
        let text = prepare(html, &Marker::default(), MIN_CONTENT_LEN).expect("text");
        assert_eq!(text.as_str(), "Fish & chips \u{2014} <cheap>");
    }

    #[test]
    fn threshold_applies_after_collapsing() {
        let html = r#"<div id="chapterText">&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;ab</div>"#;
        let err = prepare(html, &Marker::default(), MIN_CONTENT_LEN).unwrap_err();
        assert_eq!(err, ContentError::TooShort { len: 2, min: 10 });
    }

    #[test]
    fn cached_chapters_skip_loading() {
        let mut cache = ChapterCache::new(4);
        let html = r#"<div id="chapterText">Cached chapter body.</div>"#;
        let first = prepare_cached::<_, ContentError>(
            "ch-1",
            || Ok(html.to_string()),
            &Marker::default(),
            10,
            &mut cache,
        )
        .expect("text");
        let second = prepare_cached::<_, ContentError>(
            "ch-1",
            || panic!("loaded twice"),
            &Marker::default(),
            10,
            &mut cache,
        )
        .expect("hit");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache = ChapterCache::new(4);
        let result = prepare_cached::<_, ContentError>(
            "missing",
            || Ok("<p>nothing</p>".to_string()),
            &Marker::default(),
            10,
            &mut cache,
        );
        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}

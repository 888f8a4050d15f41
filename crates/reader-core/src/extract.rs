mod tokenizer;

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::buffer::TextBuffer;
use crate::error::ContentError;
use crate::types::{ContentBlock, Marker};

pub use tokenizer::{attr_value, attributes, Attributes, TagName, Token, Tokenizer, MAX_TAG_NAME};

/// Below this many characters the page is treated as having no chapter.
pub const MIN_CONTENT_LEN: usize = 10;

const BLOCK_TAGS: [&str; 20] = [
    "p",
    "br",
    "div",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "ul",
    "ol",
    "blockquote",
    "section",
    "article",
    "header",
    "footer",
    "pre",
    "hr",
    "tr",
];

const VOID_TAGS: [&str; 6] = ["br", "hr", "img", "input", "meta", "link"];

/// Starting size of a capture buffer; it grows as needed.
const CAPTURE_CAPACITY: usize = 4096;

/// Elements whose text never belongs to the prose.
const HIDDEN_TAGS: [&str; 2] = ["noscript", "template"];

#[derive(Clone, Copy)]
enum Matcher<'m> {
    Id(&'m str),
    Class(&'m [String]),
}

impl Matcher<'_> {
    fn matches(&self, attrs: &str) -> bool {
        match self {
            Matcher::Id(id) => attr_value(attrs, "id").is_some_and(|v| v == *id),
            Matcher::Class(needles) => attr_value(attrs, "class")
                .is_some_and(|v| needles.iter().any(|n| v.contains(n.as_str()))),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Matcher::Id(_) => "id",
            Matcher::Class(_) => "class",
        }
    }
}

struct Capture {
    tag: TagName,
    depth: usize,
    hidden: usize,
    buf: TextBuffer,
}

impl Capture {
    fn new(tag: TagName, capacity: usize) -> Self {
        Self {
            tag,
            depth: 0,
            hidden: 0,
            buf: TextBuffer::with_capacity(capacity),
        }
    }

    /// Feeds one token; returns true once the container's own end tag is seen.
    fn feed(&mut self, token: Token<'_>) -> bool {
        match token {
            Token::Text(text) if self.hidden == 0 => {
                for ch in text.chars() {
                    match ch {
                        '\n' | '\r' | '\t' | '\x0c' => self.buf.push(' '),
                        _ => self.buf.push(ch),
                    }
                }
            }
            Token::StartTag {
                name, self_closing, ..
            } => {
                if name == self.tag && !self_closing {
                    self.depth += 1;
                }
                if name.is_any(&HIDDEN_TAGS) && !self_closing {
                    self.hidden += 1;
                }
                if name.is_any(&BLOCK_TAGS) {
                    self.buf.push_break();
                }
            }
            Token::EndTag { name } => {
                if name == self.tag {
                    if self.depth == 0 {
                        return true;
                    }
                    self.depth -= 1;
                }
                if name.is_any(&HIDDEN_TAGS) {
                    self.hidden = self.hidden.saturating_sub(1);
                }
                if name.is_any(&BLOCK_TAGS) {
                    self.buf.push_break();
                }
            }
            _ => {}
        }
        false
    }

    fn finish(self) -> ContentBlock {
        ContentBlock::new(self.buf.into_string())
    }
}

/// Pulls the prose out of every container matching `marker`, in document order.
pub fn extract(markup: &str, marker: &Marker) -> Result<Vec<ContentBlock>, ContentError> {
    extract_with_min(markup, marker, MIN_CONTENT_LEN)
}

pub fn extract_with_min(
    markup: &str,
    marker: &Marker,
    min_len: usize,
) -> Result<Vec<ContentBlock>, ContentError> {
    let mut blocks = Vec::new();
    if !marker.id.is_empty() {
        blocks = collect(markup, Matcher::Id(&marker.id), marker)?;
    }
    if blocks.is_empty() && !marker.class_fallbacks.is_empty() {
        blocks = collect(markup, Matcher::Class(&marker.class_fallbacks), marker)?;
    }
    if blocks.is_empty() {
        debug!(%marker, "no content container");
        return Err(ContentError::NotFound {
            marker: marker.to_string(),
        });
    }
    let len: usize = blocks.iter().map(ContentBlock::trimmed_len).sum();
    if len < min_len {
        debug!(%marker, len, min_len, "extracted text below threshold");
        return Err(ContentError::TooShort { len, min: min_len });
    }
    Ok(blocks)
}

fn capture_capacity(markup: &str) -> usize {
    CAPTURE_CAPACITY.min(markup.len())
}

fn collect(
    markup: &str,
    matcher: Matcher<'_>,
    marker: &Marker,
) -> Result<Vec<ContentBlock>, ContentError> {
    let mut blocks = Vec::new();
    let mut current: Option<Capture> = None;
    for token in Tokenizer::new(markup) {
        if let Some(capture) = current.as_mut() {
            if capture.feed(token) {
                if let Some(done) = current.take() {
                    blocks.push(done.finish());
                }
            }
            continue;
        }
        match token {
            Token::StartTag {
                name,
                attrs,
                self_closing,
            } if matcher.matches(attrs) => {
                if self_closing || name.is_any(&VOID_TAGS) {
                    blocks.push(ContentBlock::default());
                } else {
                    current = Some(Capture::new(name, capture_capacity(markup)));
                }
            }
            Token::Unterminated { attrs, .. } if matcher.matches(attrs) => {
                debug!(%marker, "content container start tag never closes");
                return Err(ContentError::Malformed {
                    marker: marker.to_string(),
                });
            }
            _ => {}
        }
    }
    // an unclosed container runs to the end of the document
    if let Some(open) = current {
        blocks.push(open.finish());
    }
    if !blocks.is_empty() {
        debug!(strategy = matcher.label(), blocks = blocks.len(), "content extracted");
    }
    Ok(blocks)
}

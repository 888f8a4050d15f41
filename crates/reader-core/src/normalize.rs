mod entities;

#[cfg(test)]
mod tests;

use crate::types::{ContentBlock, NormalizedText};

pub use entities::decode_entities;

const PARAGRAPH_SEPARATOR: char = '\u{2029}';

/// Pending separator between the last emitted character and the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Gap {
    None,
    Space,
    Break,
}

struct Collapser {
    out: String,
    gap: Gap,
}

impl Collapser {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            gap: Gap::None,
        }
    }

    fn feed(&mut self, text: &str) {
        for ch in text.chars() {
            if is_boundary(ch) {
                self.gap = Gap::Break;
            } else if ch.is_whitespace() {
                self.gap = self.gap.max(Gap::Space);
            } else if !is_invisible(ch) {
                self.emit(ch);
            }
        }
    }

    fn emit(&mut self, ch: char) {
        // leading separators of the whole text are dropped
        if !self.out.is_empty() {
            match self.gap {
                Gap::Break => self.out.push('\n'),
                Gap::Space => self.out.push(' '),
                Gap::None => {}
            }
        }
        self.gap = Gap::None;
        self.out.push(ch);
    }

    fn force_break(&mut self) {
        self.gap = Gap::Break;
    }

    fn finish(self) -> NormalizedText {
        NormalizedText::from_normalized(self.out)
    }
}

fn is_boundary(ch: char) -> bool {
    ch == '\n' || ch == PARAGRAPH_SEPARATOR
}

/// Zero-width characters and the soft hyphen never reach the screen.
fn is_invisible(ch: char) -> bool {
    matches!(ch, '\u{200B}'..='\u{200D}' | '\u{FEFF}' | '\u{00AD}')
}

/// Decodes entities in every block and joins them with a paragraph break.
pub fn normalize(blocks: &[ContentBlock]) -> NormalizedText {
    let capacity = blocks.iter().map(|b| b.text.len() + 1).sum();
    let mut collapser = Collapser::with_capacity(capacity);
    for block in blocks {
        collapser.feed(&decode_entities(&block.text));
        collapser.force_break();
    }
    collapser.finish()
}

pub fn normalize_str(text: &str) -> NormalizedText {
    let mut collapser = Collapser::with_capacity(text.len());
    collapser.feed(&decode_entities(text));
    collapser.finish()
}

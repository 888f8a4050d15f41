use unicode_segmentation::UnicodeSegmentation;

use crate::buffer::TextBuffer;
use crate::types::{Line, NormalizedText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Zero dimensions are bumped to one so every viewport can hold a cell.
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub width: usize,
    /// Insert one blank row between paragraphs.
    pub paragraph_gap: bool,
}

impl LayoutOptions {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            paragraph_gap: false,
        }
    }

    pub fn with_paragraph_gap(mut self, gap: bool) -> Self {
        self.paragraph_gap = gap;
        self
    }
}

/// Greedy word wrap. Each `'\n'`-separated paragraph is wrapped on its own;
/// an empty paragraph becomes one empty row.
pub fn wrap(text: &str, width: usize) -> Vec<Line> {
    wrap_paragraphs(text, &LayoutOptions::new(width))
}

pub fn layout(text: &NormalizedText, options: &LayoutOptions) -> Vec<Line> {
    wrap_paragraphs(text.as_str(), options)
}

fn wrap_paragraphs(text: &str, options: &LayoutOptions) -> Vec<Line> {
    let width = options.width.max(1);
    let mut out = Vec::new();
    if text.is_empty() {
        return out;
    }
    for (idx, paragraph) in text.split('\n').enumerate() {
        if idx > 0 && options.paragraph_gap {
            out.push(Line::new());
        }
        wrap_paragraph(paragraph, width, &mut out);
    }
    out
}

fn wrap_paragraph(paragraph: &str, width: usize, out: &mut Vec<Line>) {
    if paragraph.split_whitespace().next().is_none() {
        out.push(Line::new());
        return;
    }
    let mut line = TextBuffer::new();
    for token in paragraph.split_whitespace() {
        let token_len = token.graphemes(true).count();
        if !line.is_empty() {
            if line.len() + 1 + token_len <= width {
                line.push(' ');
                line.push_measured(token, token_len);
                continue;
            }
            out.push(line.take());
        }
        if token_len <= width {
            line.push_measured(token, token_len);
        } else {
            hard_split(token, width, &mut line, out);
        }
    }
    if !line.is_empty() {
        out.push(line.into_string());
    }
}

/// Cuts an oversized token into `width`-grapheme chunks. The remainder is
/// left in `line` so the next token can join it.
fn hard_split(token: &str, width: usize, line: &mut TextBuffer, out: &mut Vec<Line>) {
    for grapheme in token.graphemes(true) {
        if line.len() == width {
            out.push(line.take());
        }
        line.push_measured(grapheme, 1);
    }
}

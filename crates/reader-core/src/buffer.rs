use unicode_segmentation::UnicodeSegmentation;

/// Growable owned text buffer shared by the extractor and the wrapper.
///
/// Tracks the display length (grapheme count) of everything pushed so the
/// wrapper never rescans a row to measure it.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    len: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            len: 0,
        }
    }

    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
        self.len += 1;
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.len += s.graphemes(true).count();
    }

    /// Pushes an already measured piece.
    pub fn push_measured(&mut self, s: &str, len: usize) {
        self.text.push_str(s);
        self.len += len;
    }

    /// Appends a paragraph boundary unless the buffer is empty or already
    /// ends in one. A trailing space is dropped first.
    pub fn push_break(&mut self) {
        while self.text.ends_with(' ') {
            self.text.pop();
            self.len -= 1;
        }
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.push('\n');
        }
    }

    /// Grapheme count of the pushed content.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn ends_with_space(&self) -> bool {
        self.text.ends_with(' ')
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Hands out the contents and leaves the buffer empty.
    pub fn take(&mut self) -> String {
        self.len = 0;
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.len = 0;
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_grapheme_length() {
        let mut buf = TextBuffer::new();
        buf.push_str("héllo");
        buf.push(' ');
        buf.push_str("e\u{301}");
        assert_eq!(buf.len(), 7);
        assert_eq!(buf.as_str(), "héllo e\u{301}");
    }

    #[test]
    fn breaks_are_never_doubled_or_leading() {
        let mut buf = TextBuffer::with_capacity(8);
        buf.push_break();
        assert!(buf.is_empty());
        buf.push_str("one ");
        buf.push_break();
        buf.push_break();
        buf.push_str("two");
        assert_eq!(buf.as_str(), "one\ntwo");
        assert_eq!(buf.len(), 7);
    }

    #[test]
    fn take_resets_length() {
        let mut buf = TextBuffer::new();
        buf.push_str("row");
        assert_eq!(buf.take(), "row");
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        buf.push_str("next");
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.take(), "next");
    }
}

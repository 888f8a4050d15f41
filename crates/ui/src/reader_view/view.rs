use std::sync::Arc;

use reader_core::layout::{layout, LayoutOptions, Size};
use reader_core::types::{Line, NormalizedText};

use super::areas::content_size;
use super::Theme;

/// Scroll state of one open chapter plus what is needed to draw it.
///
/// `lines` is always the layout of `text` at `viewport.width`, and `scroll`
/// never exceeds [`ReaderView::max_scroll`].
pub struct ReaderView {
    pub text: Arc<NormalizedText>,
    pub lines: Vec<Line>,
    pub scroll: usize,
    /// Content rows and columns, excluding title, separator, footer and margins.
    pub viewport: Size,
    pub margin: u16,
    pub paragraph_gap: bool,
    pub title: String,
    pub chapter_index: usize,
    pub theme: Theme,
}

impl ReaderView {
    pub fn new(
        text: impl Into<Arc<NormalizedText>>,
        title: impl Into<String>,
        chapter_index: usize,
        terminal: Size,
        margin: u16,
        paragraph_gap: bool,
    ) -> Self {
        let mut view = Self {
            text: text.into(),
            lines: Vec::new(),
            scroll: 0,
            viewport: content_size(terminal, margin),
            margin,
            paragraph_gap,
            title: title.into(),
            chapter_index,
            theme: Theme::default(),
        };
        view.rewrap();
        view
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub(super) fn rewrap(&mut self) {
        let options = LayoutOptions::new(self.viewport.width as usize)
            .with_paragraph_gap(self.paragraph_gap);
        self.lines = layout(&self.text, &options);
    }
}

use reader_core::layout::Size;
use tracing::trace;

use crate::app::{NavigationResult, ViewerEvent};

use super::areas::content_size;
use super::ReaderView;

impl ReaderView {
    pub fn max_scroll(&self) -> usize {
        self.lines
            .len()
            .saturating_sub(self.viewport.height as usize)
    }

    pub fn clamp(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn line_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn line_down(&mut self) {
        self.scroll = (self.scroll + 1).min(self.max_scroll());
    }

    pub fn page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(self.viewport.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll = (self.scroll + self.viewport.height as usize).min(self.max_scroll());
    }

    pub fn to_start(&mut self) {
        self.scroll = 0;
    }

    pub fn to_end(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Recomputes the viewport for a new terminal size and rewraps. The first
    /// visible line keeps its relative place in the text.
    pub fn resize(&mut self, terminal: Size) {
        let viewport = content_size(terminal, self.margin);
        if viewport == self.viewport {
            return;
        }
        let old_len = self.lines.len();
        let old_scroll = self.scroll;
        self.viewport = viewport;
        self.rewrap();
        self.scroll = if old_len == 0 {
            0
        } else {
            old_scroll * self.lines.len() / old_len
        };
        self.clamp();
        trace!(
            width = viewport.width,
            height = viewport.height,
            lines = self.lines.len(),
            scroll = self.scroll,
            "rewrapped chapter"
        );
    }

    /// Applies one event. Returns the outcome when the event ends reading.
    pub fn handle(&mut self, event: ViewerEvent) -> Option<NavigationResult> {
        match event {
            ViewerEvent::LineUp => self.line_up(),
            ViewerEvent::LineDown => self.line_down(),
            ViewerEvent::PageUp => self.page_up(),
            ViewerEvent::PageDown => self.page_down(),
            ViewerEvent::Home => self.to_start(),
            ViewerEvent::End => self.to_end(),
            ViewerEvent::Resize(size) => self.resize(size),
            ViewerEvent::Open => {}
            ViewerEvent::Quit => return Some(NavigationResult::Quit),
            ViewerEvent::NextChapter => return Some(NavigationResult::NextChapter),
            ViewerEvent::PrevChapter => return Some(NavigationResult::PrevChapter),
        }
        None
    }

    pub fn visible_lines(&self) -> &[String] {
        let start = self.scroll.min(self.lines.len());
        let end = (start + self.viewport.height as usize).min(self.lines.len());
        &self.lines[start..end]
    }

    /// 1-based first visible line and the total, `(0, 0)` for an empty chapter.
    pub fn position(&self) -> (usize, usize) {
        if self.lines.is_empty() {
            (0, 0)
        } else {
            (self.scroll + 1, self.lines.len())
        }
    }

    pub fn percent(&self) -> usize {
        let max = self.max_scroll();
        if max == 0 {
            100
        } else {
            self.scroll * 100 / max
        }
    }
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use reader_core::layout::Size;

use super::ReaderView;

/// Title, separator and footer each take one row.
pub const CHROME_ROWS: u16 = 3;

pub struct ReaderAreas {
    pub title: Rect,
    pub separator: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Content viewport for a terminal of `terminal` cells.
pub fn content_size(terminal: Size, margin: u16) -> Size {
    Size {
        width: terminal.width.saturating_sub(margin.saturating_mul(2)),
        height: terminal.height.saturating_sub(CHROME_ROWS),
    }
    .clamped()
}

impl ReaderView {
    pub fn areas(&self, area: Rect) -> ReaderAreas {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);
        let content = rows[2];
        let margin = self.margin.min(content.width.saturating_sub(1) / 2);
        let body = Rect {
            x: content.x + margin,
            y: content.y,
            width: self.viewport.width.min(content.width.saturating_sub(margin)),
            height: self.viewport.height.min(content.height),
        };
        ReaderAreas {
            title: rows[0],
            separator: rows[1],
            body,
            footer: rows[3],
        }
    }
}

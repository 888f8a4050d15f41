mod areas;
mod navigation;
mod theme;
mod view;


use ratatui::{prelude::*, widgets::*};
use unicode_segmentation::UnicodeSegmentation;

pub use areas::{content_size, ReaderAreas, CHROME_ROWS};
pub use theme::{parse_color, Theme};
pub use view::ReaderView;

const KEY_HINTS: &str = "[q] Back  [↑/↓] Scroll  [PgUp/PgDn] Page  [p/n] Chapter";

impl ReaderView {
    pub fn header_text(&self) -> String {
        format!("{} - Chapter {}", self.title, self.chapter_index + 1)
    }

    pub fn footer_text(&self) -> String {
        let (line, total) = self.position();
        format!("{KEY_HINTS}  Line {line}/{total}  {}%", self.percent())
    }

    /// Draws title, separator, the visible rows and the footer. Pure read of
    /// the view; scrolling happens in [`ReaderView::handle`].
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let areas = self.areas(area);

        let header_style = Style::default()
            .bg(self.theme.header_bg)
            .fg(self.theme.header_fg)
            .add_modifier(Modifier::BOLD);
        let title = truncate_with_ellipsis(&self.header_text(), areas.title.width as usize);
        f.render_widget(
            Paragraph::new(Line::from(title)).style(header_style),
            areas.title,
        );

        let rule = "─".repeat(areas.separator.width as usize);
        f.render_widget(
            Paragraph::new(Line::from(rule)).style(Style::default().fg(self.theme.footer_bg)),
            areas.separator,
        );

        let height = areas.body.height as usize;
        let rows: Vec<Line> = (0..height)
            .map(|i| {
                self.lines
                    .get(self.scroll + i)
                    .map(|l| Line::from(l.as_str()))
                    .unwrap_or_default()
            })
            .collect();
        f.render_widget(
            Paragraph::new(rows).style(Style::default().fg(self.theme.text_fg)),
            areas.body,
        );

        let footer_style = Style::default()
            .bg(self.theme.footer_bg)
            .fg(self.theme.footer_fg);
        let footer = truncate_with_ellipsis(&self.footer_text(), areas.footer.width as usize);
        f.render_widget(
            Paragraph::new(Line::from(footer)).style(footer_style),
            areas.footer,
        );
    }
}

pub(crate) fn truncate_with_ellipsis(text: &str, max_w: usize) -> String {
    if max_w == 0 {
        return String::new();
    }
    let gs: Vec<&str> = text.graphemes(true).collect();
    if gs.len() <= max_w {
        return text.to_string();
    }
    if max_w == 1 {
        return "…".to_string();
    }
    let keep = max_w.saturating_sub(1);
    format!("{}…", gs[..keep].concat())
}

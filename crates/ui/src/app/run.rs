use std::sync::Arc;

use ratatui::prelude::{Backend, Terminal};
use reader_core::config::ReaderSettings;
use reader_core::layout::Size;
use reader_core::pipeline::prepare;
use reader_core::types::NormalizedText;
use tracing::{debug, info};

use crate::reader_view::{ReaderView, Theme};

use super::command::EventSource;
use super::state::ReaderSession;
use super::types::{NavigationResult, ViewerError};

/// Extracts the chapter from `markup` and shows it until the reader leaves.
///
/// A page without readable content comes back as [`ViewerError::Content`]
/// before anything is drawn.
pub fn render_content<B, E>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    markup: &str,
    title: &str,
    chapter_index: usize,
    viewport: Size,
    settings: &ReaderSettings,
) -> Result<NavigationResult, ViewerError>
where
    B: Backend,
    E: EventSource + ?Sized,
    ViewerError: From<B::Error>,
{
    let text = prepare(markup, &settings.marker(), settings.min_content_len)?;
    render_text(terminal, events, text, title, chapter_index, viewport, settings)
}

/// Same as [`render_content`] for text that is already normalized.
pub fn render_text<B, E>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    text: impl Into<Arc<NormalizedText>>,
    title: &str,
    chapter_index: usize,
    viewport: Size,
    settings: &ReaderSettings,
) -> Result<NavigationResult, ViewerError>
where
    B: Backend,
    E: EventSource + ?Sized,
    ViewerError: From<B::Error>,
{
    let view = ReaderView::new(
        text,
        title,
        chapter_index,
        viewport.clamped(),
        settings.margin,
        settings.paragraph_gap,
    )
    .with_theme(Theme::from_settings(&settings.theme));
    info!(
        title,
        chapter = chapter_index,
        lines = view.lines.len(),
        "opened chapter"
    );
    let mut session = ReaderSession::new(view);
    loop {
        terminal.draw(|f| {
            let area = f.area();
            session.view().render(f, area);
        })?;
        let Some(event) = events.next_event()? else {
            debug!("event source exhausted");
            return Ok(NavigationResult::Quit);
        };
        match session.step(event) {
            NavigationResult::Continue => {}
            result => {
                debug!(?result, "leaving chapter");
                return Ok(result);
            }
        }
    }
}

use std::io;

use ratatui::{prelude::*, widgets::*};
use reader_core::cache::ChapterCache;
use reader_core::config::ReaderSettings;
use reader_core::layout::Size;
use reader_core::pipeline::prepare_cached;
use tracing::{info, warn};

use crate::app::{render_text, EventSource, NavigationResult, ViewerError, ViewerEvent};
use crate::reader_view::truncate_with_ellipsis;

/// Rows moved by PgUp/PgDn in the list.
pub const CHAPTERS_PER_PAGE: usize = 15;

/// Supplies chapter markup in reading order.
pub trait ChapterSource {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn title(&self, index: usize) -> String;

    /// Cache key for a chapter.
    fn key(&self, index: usize) -> String {
        format!("chapter:{index}")
    }

    fn load(&self, index: usize) -> io::Result<String>;
}

pub struct ChapterList {
    pub novel: String,
    pub titles: Vec<String>,
    pub selected: usize,
    pub status: Option<String>,
}

impl ChapterList {
    pub fn new(novel: impl Into<String>, titles: Vec<String>) -> Self {
        Self {
            novel: novel.into(),
            titles,
            selected: 0,
            status: None,
        }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        self.select(self.selected + 1);
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(CHAPTERS_PER_PAGE);
    }

    pub fn page_down(&mut self) {
        self.select(self.selected + CHAPTERS_PER_PAGE);
    }

    /// Selects `index`, clamped to the list.
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.titles.len().saturating_sub(1));
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} (j/k, Enter, q)", self.novel));
        let max_w = vchunks[0].width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let label = format!("{:>4}. {}", i + 1, title);
                ListItem::new(Line::from(truncate_with_ellipsis(&label, max_w)))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));
        let mut state = ListState::default().with_selected(Some(self.selected));
        f.render_widget(Clear, vchunks[0]);
        f.render_stateful_widget(list, vchunks[0], &mut state);

        let status = self
            .status
            .as_deref()
            .unwrap_or("Enter to read, q to quit");
        f.render_widget(Paragraph::new(Line::from(status)), vchunks[1]);
    }
}

/// Chapter list plus the reader loop for whichever chapter is opened.
pub struct ChapterBrowser<S> {
    pub list: ChapterList,
    source: S,
    cache: ChapterCache,
    settings: ReaderSettings,
    last_opened: Option<usize>,
}

impl<S: ChapterSource> ChapterBrowser<S> {
    pub fn new(novel: impl Into<String>, source: S, settings: ReaderSettings) -> Self {
        let titles = (0..source.len()).map(|i| source.title(i)).collect();
        Self {
            list: ChapterList::new(novel, titles),
            source,
            cache: ChapterCache::new(settings.cache_capacity),
            settings,
            last_opened: None,
        }
    }

    pub fn last_opened(&self) -> Option<usize> {
        self.last_opened
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs the list until the reader quits it, optionally opening `start`
    /// first. Returns the last chapter that was shown.
    pub fn run<B, E>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
        start: Option<usize>,
    ) -> Result<Option<usize>, ViewerError>
    where
        B: Backend,
        E: EventSource + ?Sized,
        ViewerError: From<B::Error>,
    {
        if let Some(index) = start.filter(|&i| i < self.source.len()) {
            self.open(terminal, events, index)?;
        }
        loop {
            terminal.draw(|f| {
                let area = f.area();
                self.list.render(f, area);
            })?;
            let Some(event) = events.next_event()? else {
                return Ok(self.last_opened);
            };
            match event {
                ViewerEvent::Quit => return Ok(self.last_opened),
                ViewerEvent::Open | ViewerEvent::NextChapter if !self.source.is_empty() => {
                    self.open(terminal, events, self.list.selected)?;
                }
                ViewerEvent::LineUp => self.list.up(),
                ViewerEvent::LineDown => self.list.down(),
                ViewerEvent::PageUp => self.list.page_up(),
                ViewerEvent::PageDown => self.list.page_down(),
                ViewerEvent::Home => self.list.select(0),
                ViewerEvent::End => self.list.select(usize::MAX),
                _ => {}
            }
        }
    }

    fn open<B, E>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
        mut index: usize,
    ) -> Result<(), ViewerError>
    where
        B: Backend,
        E: EventSource + ?Sized,
        ViewerError: From<B::Error>,
    {
        let marker = self.settings.marker();
        let min_len = self.settings.min_content_len;
        loop {
            self.list.select(index);
            let key = self.source.key(index);
            let loaded = prepare_cached(
                &key,
                || {
                    self.source
                        .load(index)
                        .map_err(|source| ViewerError::Source { index, source })
                },
                &marker,
                min_len,
                &mut self.cache,
            );
            let text = match loaded {
                Ok(text) => text,
                Err(err) if err.is_recoverable() => {
                    warn!(index, %err, "chapter not shown");
                    self.list.status = Some(status_message(&err));
                    return Ok(());
                }
                Err(err) => return Err(err),
            };
            self.last_opened = Some(index);
            self.list.status = None;
            let area = terminal.size()?;
            let result = render_text(
                terminal,
                events,
                text,
                &self.list.novel,
                index,
                Size::new(area.width, area.height),
                &self.settings,
            )?;
            match result {
                NavigationResult::NextChapter if index + 1 < self.source.len() => index += 1,
                NavigationResult::PrevChapter if index > 0 => index -= 1,
                NavigationResult::NextChapter => {
                    self.list.status = Some("Already at the last chapter".to_string());
                    return Ok(());
                }
                NavigationResult::PrevChapter => {
                    self.list.status = Some("Already at the first chapter".to_string());
                    return Ok(());
                }
                NavigationResult::Quit | NavigationResult::Continue => {
                    info!(index, "back to chapter list");
                    return Ok(());
                }
            }
        }
    }
}

fn status_message(err: &ViewerError) -> String {
    match err {
        ViewerError::Content(_) => "No chapter content found".to_string(),
        other => other.to_string(),
    }
}

use std::collections::VecDeque;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use reader_core::layout::Size;

use super::types::ViewerEvent;

impl ViewerEvent {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => Some(ViewerEvent::Quit),
            _ if ctrl => None,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(ViewerEvent::Quit),
            KeyCode::Char('k') | KeyCode::Up => Some(ViewerEvent::LineUp),
            KeyCode::Char('j') | KeyCode::Down => Some(ViewerEvent::LineDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(ViewerEvent::PageUp),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(ViewerEvent::PageDown),
            KeyCode::Char('g') | KeyCode::Home => Some(ViewerEvent::Home),
            KeyCode::Char('G') | KeyCode::End => Some(ViewerEvent::End),
            KeyCode::Char('n') | KeyCode::Right => Some(ViewerEvent::NextChapter),
            KeyCode::Char('p') | KeyCode::Left => Some(ViewerEvent::PrevChapter),
            KeyCode::Enter => Some(ViewerEvent::Open),
            _ => None,
        }
    }
}

/// Blocking supply of viewer events. `Ok(None)` means no more input.
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<Option<ViewerEvent>>;
}

/// Reads the terminal with `crossterm`, skipping input that maps to nothing.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<Option<ViewerEvent>> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(ev) = ViewerEvent::from_key(key) {
                        return Ok(Some(ev));
                    }
                }
                Event::Resize(width, height) => {
                    return Ok(Some(ViewerEvent::Resize(Size::new(width, height))));
                }
                _ => {}
            }
        }
    }
}

/// Replays a fixed list of events, then reports exhaustion.
#[derive(Debug, Default, Clone)]
pub struct ScriptedEvents {
    events: VecDeque<ViewerEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = ViewerEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> io::Result<Option<ViewerEvent>> {
        Ok(self.events.pop_front())
    }
}

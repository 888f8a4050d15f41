use std::convert::Infallible;
use std::io;

use reader_core::error::ContentError;
use reader_core::layout::Size;
use thiserror::Error;

/// Input the reader reacts to, already decoupled from key bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerEvent {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Home,
    End,
    Quit,
    NextChapter,
    PrevChapter,
    /// Enter; only the chapter list acts on it.
    Open,
    /// New terminal size in cells.
    Resize(Size),
}

/// How a reading session ended, for the chapter browser to act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationResult {
    Quit,
    PrevChapter,
    NextChapter,
    /// Still reading.
    Continue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Reading,
    Exiting(NavigationResult),
}

#[derive(Debug, Error)]
pub enum ViewerError {
    /// No readable chapter in the markup. The caller shows a message and
    /// carries on.
    #[error("no chapter content found: {0}")]
    Content(#[from] ContentError),
    #[error("failed to load chapter {index}: {source}")]
    Source { index: usize, source: io::Error },
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

impl ViewerError {
    /// True for failures that only affect the chapter being opened.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ViewerError::Content(_) | ViewerError::Source { .. })
    }
}

// Test backends never fail.
impl From<Infallible> for ViewerError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

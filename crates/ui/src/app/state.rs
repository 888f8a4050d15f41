use crate::reader_view::ReaderView;

use super::types::{NavigationResult, Phase, ViewerEvent};

/// Drives a [`ReaderView`] through `Reading` until an event ends the session.
pub struct ReaderSession {
    view: ReaderView,
    phase: Phase,
}

impl ReaderSession {
    pub fn new(view: ReaderView) -> Self {
        Self {
            view,
            phase: Phase::Reading,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> &ReaderView {
        &self.view
    }

    pub fn into_view(self) -> ReaderView {
        self.view
    }

    /// `Exiting` is terminal: later events are ignored and the same outcome
    /// is reported again.
    pub fn step(&mut self, event: ViewerEvent) -> NavigationResult {
        if let Phase::Exiting(result) = self.phase {
            return result;
        }
        match self.view.handle(event) {
            Some(result) => {
                self.phase = Phase::Exiting(result);
                result
            }
            None => NavigationResult::Continue,
        }
    }
}

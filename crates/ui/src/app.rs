mod command;
mod run;
mod state;
mod types;

pub use command::{CrosstermEvents, EventSource, ScriptedEvents};
pub use run::{render_content, render_text};
pub use state::ReaderSession;
pub use types::{NavigationResult, Phase, ViewerError, ViewerEvent};

pub mod buffer;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod layout;
pub mod normalize;
pub mod pipeline;
pub mod state;
pub mod types;

pub use error::ContentError;
pub use layout::{layout, wrap, LayoutOptions, Size};
pub use normalize::normalize;
pub use pipeline::{prepare, prepare_cached};
pub use types::{ContentBlock, Line, Marker, NormalizedText};

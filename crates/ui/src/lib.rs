pub mod app;
pub mod chapters;
pub mod reader_view;
pub mod terminal;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("no content container matched {marker}")]
    NotFound { marker: String },
    #[error("extracted text is too short ({len} chars, need at least {min})")]
    TooShort { len: usize, min: usize },
    #[error("content container {marker} has an unterminated start tag")]
    Malformed { marker: String },
}

impl ContentError {
    /// Every variant is reported to the reader as "content not found"; none of
    /// them abort the session.
    pub fn is_content_not_found(&self) -> bool {
        matches!(
            self,
            ContentError::NotFound { .. }
                | ContentError::TooShort { .. }
                | ContentError::Malformed { .. }
        )
    }
}

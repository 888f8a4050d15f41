use std::fmt;

use serde::{Deserialize, Serialize};

/// One rendered row of wrapped text.
pub type Line = String;

pub const DEFAULT_MARKER_ID: &str = "chapterText";
pub const DEFAULT_CLASS_FALLBACKS: [&str; 2] = ["prose", "chapter-content"];

/// Identifies the container that holds the chapter prose.
///
/// An exact `id` match wins; the class substrings are only consulted when no
/// element in the document carries the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub class_fallbacks: Vec<String>,
}

impl Marker {
    pub fn new<I, S>(id: impl Into<String>, class_fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            class_fallbacks: class_fallbacks
                .into_iter()
                .map(Into::into)
                .filter(|c: &String| !c.is_empty())
                .collect(),
        }
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class_fallbacks: Vec::new(),
        }
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_ID, DEFAULT_CLASS_FALLBACKS)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)?;
        for class in &self.class_fallbacks {
            write!(f, " .*{}*", class)?;
        }
        Ok(())
    }
}

/// Plain text pulled out of one matched container.
///
/// `'\n'` marks a paragraph boundary; source whitespace has already been
/// folded to spaces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentBlock {
    pub text: String,
}

impl ContentBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn trimmed_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// Entity-decoded, whitespace-collapsed prose with `'\n'` between paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Wraps text that is already normalized. Use [`crate::normalize::normalize_str`]
    /// for anything else.
    pub(crate) fn from_normalized(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.0.split('\n')
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CACHE_CHAPTERS;
use crate::extract::MIN_CONTENT_LEN;
use crate::types::{Marker, DEFAULT_CLASS_FALLBACKS, DEFAULT_MARKER_ID};

pub const QUALIFIER: &str = "org";
pub const ORGANIZATION: &str = "proseview";
pub const APPLICATION: &str = "proseview";

pub const DEFAULT_MARGIN: u16 = 4;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

pub fn config_root() -> Option<PathBuf> {
    project_dirs().map(|p| p.config_dir().to_path_buf())
}

pub fn data_root() -> Option<PathBuf> {
    project_dirs().map(|p| p.data_dir().to_path_buf())
}

pub fn log_dir() -> Option<PathBuf> {
    data_root().map(|d| d.join("logs"))
}

/// Colors are kept as names here; the ui crate resolves them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub name: Option<String>,
    pub header_bg: Option<String>,
    pub header_fg: Option<String>,
    pub footer_bg: Option<String>,
    pub footer_fg: Option<String>,
    pub text_fg: Option<String>,
}

/// Contents of `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    pub marker_id: String,
    pub class_fallbacks: Vec<String>,
    pub min_content_len: usize,
    pub cache_capacity: usize,
    /// Blank columns on each side of the text.
    pub margin: u16,
    pub paragraph_gap: bool,
    pub theme: ThemeSettings,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            marker_id: DEFAULT_MARKER_ID.to_string(),
            class_fallbacks: DEFAULT_CLASS_FALLBACKS.iter().map(|c| c.to_string()).collect(),
            min_content_len: MIN_CONTENT_LEN,
            cache_capacity: DEFAULT_CACHE_CHAPTERS,
            margin: DEFAULT_MARGIN,
            paragraph_gap: true,
            theme: ThemeSettings::default(),
        }
    }
}

impl ReaderSettings {
    pub fn marker(&self) -> Marker {
        Marker::new(self.marker_id.clone(), self.class_fallbacks.iter().cloned())
    }
}

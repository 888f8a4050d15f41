use std::{fs, io, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const MAX_HISTORY: usize = 15;
pub const HISTORY_FILE: &str = "history.json";

/// Last chapter opened for one novel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub novel: String,
    pub chapter_index: usize,
    pub chapter_title: String,
    /// Where the chapter came from: a file path or URL.
    pub source: String,
    pub saved_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        novel: impl Into<String>,
        chapter_index: usize,
        chapter_title: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            novel: novel.into(),
            chapter_index,
            chapter_title: chapter_title.into(),
            source: source.into(),
            saved_at: Utc::now(),
        }
    }
}

/// Puts `entry` first, replacing any older entry for the same novel, and
/// drops the oldest entries past [`MAX_HISTORY`].
pub fn record(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    entries.retain(|e| e.novel != entry.novel);
    entries.insert(0, entry);
    entries.truncate(MAX_HISTORY);
}

/// A missing or unreadable file is an empty history.
pub fn load_history(path: &Path) -> Vec<HistoryEntry> {
    let Ok(data) = fs::read(path) else {
        return Vec::new();
    };
    match serde_json::from_slice(&data) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring corrupt history file");
            Vec::new()
        }
    }
}

pub fn save_history(path: &Path, entries: &[HistoryEntry]) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let s = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;
    fs::write(path, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(novel: &str, chapter: usize) -> HistoryEntry {
        HistoryEntry::new(novel, chapter, format!("Chapter {chapter}"), "file.html")
    }

    #[test]
    fn newest_entry_first_and_one_per_novel() {
        let mut entries = Vec::new();
        record(&mut entries, entry("a", 1));
        record(&mut entries, entry("b", 4));
        record(&mut entries, entry("a", 2));
        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.novel.as_str(), e.chapter_index))
            .collect();
        assert_eq!(summary, [("a", 2), ("b", 4)]);
    }

    #[test]
    fn history_is_capped() {
        let mut entries = Vec::new();
        for i in 0..20 {
            record(&mut entries, entry(&format!("novel {i}"), i));
        }
        assert_eq!(entries.len(), MAX_HISTORY);
        assert_eq!(entries[0].novel, "novel 19");
        assert_eq!(entries[MAX_HISTORY - 1].novel, "novel 5");
    }

    #[test]
    fn saves_and_loads_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(HISTORY_FILE);
        let entries = vec![entry("a", 3), entry("b", 7)];
        save_history(&path, &entries).expect("save");
        assert_eq!(load_history(&path), entries);
    }

    #[test]
    fn missing_or_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(HISTORY_FILE);
        assert!(load_history(&path).is_empty());
        fs::write(&path, "{not json").expect("write");
        assert!(load_history(&path).is_empty());
    }
}

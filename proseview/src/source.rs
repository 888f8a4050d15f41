use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ui::chapters::ChapterSource;

/// Chapters stored as one markup file each.
pub struct FileSource {
    files: Vec<PathBuf>,
}

impl FileSource {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    pub fn path(&self, index: usize) -> Option<&Path> {
        self.files.get(index).map(PathBuf::as_path)
    }

    /// Every file next to `chapter` sharing its extension, in name order,
    /// plus the position of `chapter` among them.
    pub fn siblings_of(chapter: &Path) -> io::Result<(Self, Option<usize>)> {
        let dir = match chapter.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let ext = chapter.extension();
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension() == ext {
                files.push(path);
            }
        }
        files.sort();
        let position = files
            .iter()
            .position(|p| p.file_name() == chapter.file_name());
        Ok((Self::new(files), position))
    }

    /// Name of the folder holding the first chapter, if any.
    pub fn folder_name(&self) -> Option<String> {
        let dir = fs::canonicalize(self.files.first()?).ok()?;
        dir.parent()?
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

impl ChapterSource for FileSource {
    fn len(&self) -> usize {
        self.files.len()
    }

    fn title(&self, index: usize) -> String {
        self.path(index)
            .and_then(Path::file_stem)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("Chapter {}", index + 1))
    }

    fn key(&self, index: usize) -> String {
        self.path(index)
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }

    /// Saved pages are not always valid UTF-8; bad bytes are replaced.
    fn load(&self, index: usize) -> io::Result<String> {
        let path = self
            .path(index)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "chapter index out of range"))?;
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_come_from_file_stems() {
        let source = FileSource::new(vec!["novel/001-arrival.html".into(), "novel/002.html".into()]);
        assert_eq!(source.len(), 2);
        assert_eq!(source.title(0), "001-arrival");
        assert_eq!(source.title(1), "002");
        assert_eq!(source.key(1), "novel/002.html");
    }

    #[test]
    fn loads_lossy_utf8() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("c1.html");
        fs::write(&path, b"caf\xe9 <p>ok</p>").expect("write");
        let source = FileSource::new(vec![path]);
        assert_eq!(source.load(0).expect("load"), "caf\u{FFFD} <p>ok</p>");
        assert!(source.load(1).is_err());
    }

    #[test]
    fn siblings_share_the_extension_and_sort_by_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["002.html", "001.html", "003.html", "notes.txt"] {
            fs::write(dir.path().join(name), "x").expect("write");
        }
        let (source, position) =
            FileSource::siblings_of(&dir.path().join("002.html")).expect("siblings");
        assert_eq!(source.len(), 3);
        assert_eq!(source.title(0), "001");
        assert_eq!(source.title(2), "003");
        assert_eq!(position, Some(1));
    }

    #[test]
    fn missing_folder_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(FileSource::siblings_of(&dir.path().join("gone").join("001.html")).is_err());
    }
}

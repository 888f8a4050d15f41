use std::{num::NonZeroUsize, sync::Arc};

use lru::LruCache;

use crate::types::NormalizedText;

pub const DEFAULT_CACHE_CHAPTERS: usize = 8;

fn capacity_of(chapters: usize) -> NonZeroUsize {
    NonZeroUsize::new(chapters).unwrap_or(NonZeroUsize::MIN)
}

/// Normalized chapters keyed by whatever the caller uses to fetch them.
///
/// Owned by the chapter browser and handed down by `&mut`; there is no
/// shared instance.
pub struct ChapterCache {
    entries: LruCache<String, Arc<NormalizedText>>,
}

impl ChapterCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(capacity_of(capacity)),
        }
    }

    pub fn get(&mut self, key: &str) -> Option<Arc<NormalizedText>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: impl Into<String>, text: Arc<NormalizedText>) {
        self.entries.put(key.into(), text);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ChapterCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CHAPTERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_str;

    fn text(s: &str) -> Arc<NormalizedText> {
        Arc::new(normalize_str(s))
    }

    #[test]
    fn zero_capacity_holds_one_chapter() {
        let mut cache = ChapterCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert("a", text("first"));
        cache.insert("b", text("second"));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("b").as_deref().map(NormalizedText::as_str), Some("second"));
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = ChapterCache::new(2);
        cache.insert("one", text("1"));
        cache.insert("two", text("2"));
        assert!(cache.get("one").is_some());
        cache.insert("three", text("3"));
        assert!(cache.get("two").is_none());
        assert!(cache.get("one").is_some());
        assert!(cache.get("three").is_some());
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = ChapterCache::default();
        cache.insert("k", text("v"));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), DEFAULT_CACHE_CHAPTERS);
    }
}

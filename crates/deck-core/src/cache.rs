//! Render-completion cache for underlying pages

use std::collections::BTreeSet;

/// Set of pages that completed at least one render pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentCache {
    page_count: u32,
    loaded: BTreeSet<u32>,
}

impl ContentCache {
    pub fn new(page_count: u32) -> Self {
        Self {
            page_count,
            loaded: BTreeSet::new(),
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Record a completed render.
    ///
    /// Returns `true` when the page was newly added. Pages outside
    /// `[1, page_count]` are ignored.
    pub fn mark_loaded(&mut self, page: u32) -> bool {
        if page == 0 || page > self.page_count {
            return false;
        }
        self.loaded.insert(page)
    }

    pub fn contains(&self, page: u32) -> bool {
        self.loaded.contains(&page)
    }

    pub fn loaded_count(&self) -> u32 {
        self.loaded.len() as u32
    }

    pub fn loaded(&self) -> &BTreeSet<u32> {
        &self.loaded
    }

    /// Every page of a non-empty document has rendered
    pub fn is_ready(&self) -> bool {
        self.page_count > 0 && self.loaded_count() == self.page_count
    }

    /// Fraction of pages rendered, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.page_count == 0 {
            return 0.0;
        }
        (self.loaded_count() as f64 / self.page_count as f64).min(1.0)
    }

    /// Adopt a new page count, discarding entries outside the new bound
    pub fn reset(&mut self, page_count: u32) {
        self.page_count = page_count;
        self.loaded.retain(|page| *page >= 1 && *page <= page_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_loaded_is_idempotent() {
        let mut cache = ContentCache::new(3);
        assert!(cache.mark_loaded(2));
        assert!(!cache.mark_loaded(2));
        assert_eq!(cache.loaded_count(), 1);
    }

    #[test]
    fn test_mark_loaded_ignores_out_of_range() {
        let mut cache = ContentCache::new(3);
        assert!(!cache.mark_loaded(0));
        assert!(!cache.mark_loaded(4));
        assert_eq!(cache.loaded_count(), 0);
    }

    #[test]
    fn test_ready_only_when_every_page_loaded() {
        let mut cache = ContentCache::new(3);
        for page in [3, 1] {
            cache.mark_loaded(page);
            assert!(!cache.is_ready());
        }
        cache.mark_loaded(2);
        assert!(cache.is_ready());
    }

    #[test]
    fn test_empty_document_never_ready() {
        let cache = ContentCache::new(0);
        assert!(!cache.is_ready());
        assert_eq!(cache.progress(), 0.0);
    }

    #[test]
    fn test_progress_ratio() {
        let mut cache = ContentCache::new(4);
        cache.mark_loaded(1);
        assert_eq!(cache.progress(), 0.25);
        for page in 2..=4 {
            cache.mark_loaded(page);
        }
        assert_eq!(cache.progress(), 1.0);
    }

    #[test]
    fn test_reset_discards_pages_beyond_new_count() {
        let mut cache = ContentCache::new(5);
        for page in 1..=5 {
            cache.mark_loaded(page);
        }
        cache.reset(3);
        assert_eq!(cache.loaded_count(), 3);
        assert!(cache.is_ready());
        assert!(!cache.contains(4));

        cache.reset(6);
        assert!(!cache.is_ready());
        assert_eq!(cache.progress(), 0.5);
    }
}

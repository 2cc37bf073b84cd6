//! In-memory page cache using DashMap

use chrono::DateTime;
use chrono::Utc;
use dashmap::DashMap;

use crate::model::Page;

/// A cached page plus the time it was fetched.
#[derive(Debug, Clone)]
pub struct CachedPage {
    /// The page as the source returned it.
    pub page: Page,
    /// When the page was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl CachedPage {
    /// Wraps a page fetched just now.
    pub fn new_now(page: Page) -> Self {
        Self {
            page,
            fetched_at: Utc::now(),
        }
    }
}

/// An in-memory page cache keyed by 1-based source page number.
///
/// # Example
///
/// ```
/// use artic_lib::cache::PageCache;
/// use artic_lib::model::{Page, Record};
///
/// let cache = PageCache::new();
/// cache.insert(1, Page::new(vec![Record::new(1)], 1));
/// assert_eq!(cache.get(1).unwrap().page.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PageCache {
    store: DashMap<u32, CachedPage>,
}

impl PageCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the cached page for `page`, if it has been fetched.
    pub fn get(&self, page: u32) -> Option<CachedPage> {
        self.store.get(&page).map(|entry| entry.value().clone())
    }

    /// Returns `true` if `page` is populated.
    pub fn contains(&self, page: u32) -> bool {
        self.store.contains_key(&page)
    }

    /// Stores a page.
    ///
    /// An already populated page number is left as it is.
    pub fn insert(&self, page: u32, value: Page) {
        self.store
            .entry(page)
            .or_insert_with(|| CachedPage::new_now(value));
    }

    /// Drops every cached page.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Returns the number of cached pages.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::model::RecordId;

    #[test]
    fn test_first_insert_wins() {
        let cache = PageCache::new();
        cache.insert(2, Page::new(vec![Record::new(11)], 20));
        cache.insert(2, Page::new(vec![Record::new(99)], 21));

        let cached = cache.get(2).unwrap();
        assert_eq!(cached.page.ids(), vec![RecordId(11)]);
        assert_eq!(cached.page.total(), 20);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let cache = PageCache::new();
        cache.insert(1, Page::new(vec![], 0));
        assert!(cache.contains(1));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(1).is_none());
    }
}

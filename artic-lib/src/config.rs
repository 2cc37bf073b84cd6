//! Browser configuration

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default number of page fetches the concurrent strategy keeps in flight.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;

/// How [`auto_select`](crate::selection::SelectionController::auto_select)
/// obtains the pages it needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Fetch pages one at a time in page order, stopping early at an empty page.
    #[default]
    Sequential,
    /// Fetch pages in parallel, at most
    /// [`max_concurrent_fetches`](BrowserConfig::max_concurrent_fetches) at a
    /// time; results are still combined in page order.
    Concurrent,
}

/// Configuration for a [`SelectionController`](crate::selection::SelectionController).
///
/// # Example
///
/// ```
/// use artic_lib::config::{BrowserConfig, FetchStrategy};
///
/// let config = BrowserConfig::default()
///     .with_page_size(15)
///     .with_fetch_strategy(FetchStrategy::Concurrent);
/// assert_eq!(config.page_size, 15);
/// assert!(config.cache_pages);
/// ```
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Records per page, shared by page requests and "pages needed" arithmetic.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Whether fetched pages are kept in a session page cache.
    ///
    /// Default: true
    pub cache_pages: bool,

    /// Page fetching strategy for bulk selection.
    ///
    /// Default: sequential
    pub fetch_strategy: FetchStrategy,

    /// Upper bound on fetches in flight under [`FetchStrategy::Concurrent`].
    ///
    /// Default: 4
    pub max_concurrent_fetches: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cache_pages: true,
            fetch_strategy: FetchStrategy::Sequential,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }
}

impl BrowserConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size. Zero is coerced to one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Enables or disables the page cache.
    pub fn with_cache_pages(mut self, enabled: bool) -> Self {
        self.cache_pages = enabled;
        self
    }

    /// Sets the bulk fetch strategy.
    pub fn with_fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.fetch_strategy = strategy;
        self
    }

    /// Sets the concurrent fetch limit. Zero is coerced to one.
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    /// Creates a config with the page cache disabled.
    pub fn no_cache() -> Self {
        Self {
            cache_pages: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_size_coerced() {
        assert_eq!(BrowserConfig::new().with_page_size(0).page_size, 1);
    }

    #[test]
    fn test_zero_concurrency_coerced() {
        let config = BrowserConfig::new().with_max_concurrent_fetches(0);
        assert_eq!(config.max_concurrent_fetches, 1);
        assert_eq!(
            BrowserConfig::default().max_concurrent_fetches,
            DEFAULT_MAX_CONCURRENT_FETCHES
        );
    }

    #[test]
    fn test_no_cache() {
        let config = BrowserConfig::no_cache();
        assert!(!config.cache_pages);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}

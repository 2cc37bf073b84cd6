//! Selection controller

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use futures::StreamExt;
use futures::TryStreamExt;
use futures::stream;
use tokio::sync::Mutex;

use super::PageView;
use super::Row;
use super::SelectionSet;
use crate::cache::PageCache;
use crate::config::BrowserConfig;
use crate::config::FetchStrategy;
use crate::error::TransportError;
use crate::model::Page;
use crate::model::Record;
use crate::model::RecordId;
use crate::model::page_count;
use crate::source::PageSource;

/// Owns one browsing session's selection state machine.
///
/// The controller is cheap to clone (uses `Arc` internally); clones share the
/// same session. Pages are addressed by 0-based index here; the source is
/// always asked for page `index + 1`.
///
/// State updates are applied only after every fetch they need has
/// succeeded, so a failed call leaves the session exactly as it was.
///
/// # Example
///
/// ```ignore
/// use artic_lib::config::BrowserConfig;
/// use artic_lib::selection::SelectionController;
/// use artic_lib::source::ArticClient;
///
/// let controller = SelectionController::new(ArticClient::builder().build()?, BrowserConfig::default());
///
/// let view = controller.navigate(0).await?.expect("no competing navigation");
/// let first = view.rows[0].record.clone();
/// controller.toggle_selection([first]).await;
///
/// controller.auto_select(25).await?;
/// assert_eq!(controller.selected_count().await, 25);
/// ```
#[derive(Clone)]
pub struct SelectionController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    source: Arc<dyn PageSource>,
    page_size: usize,
    fetch_strategy: FetchStrategy,
    max_concurrent_fetches: usize,
    cache: Option<PageCache>,
    state: Mutex<SessionState>,
    /// Ticket counter for `navigate`; only the newest ticket may apply.
    generation: AtomicU64,
    /// Serializes bulk selection.
    bulk: Mutex<()>,
}

#[derive(Debug, Default)]
struct SessionState {
    current_page: usize,
    total: Option<usize>,
    displayed: Vec<Record>,
    selection: SelectionSet,
}

impl SessionState {
    fn view(&self, page_size: usize) -> PageView {
        PageView {
            page_index: self.current_page,
            page_count: self.total.map(|total| page_count(total, page_size)),
            total: self.total,
            page_size,
            rows: self
                .displayed
                .iter()
                .map(|record| Row {
                    record: record.clone(),
                    is_selected: self.selection.contains(record.id()),
                })
                .collect(),
            selected_count: self.selection.len(),
        }
    }
}

impl SelectionController {
    /// Creates a controller with an empty selection.
    pub fn new<S: PageSource + 'static>(source: S, config: BrowserConfig) -> Self {
        Self::with_shared_source(Arc::new(source), config)
    }

    /// Creates a controller over a source shared with other owners.
    pub fn with_shared_source(source: Arc<dyn PageSource>, config: BrowserConfig) -> Self {
        let page_size = config.page_size.max(1);
        Self {
            inner: Arc::new(ControllerInner {
                source,
                page_size,
                fetch_strategy: config.fetch_strategy,
                max_concurrent_fetches: config.max_concurrent_fetches.max(1),
                cache: config.cache_pages.then(PageCache::new),
                state: Mutex::new(SessionState::default()),
                generation: AtomicU64::new(0),
                bulk: Mutex::new(()),
            }),
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Shows the page at `page_index` (0-based).
    ///
    /// Once the total is known the index is clamped into the valid range.
    /// Selection is not touched.
    ///
    /// Returns `Ok(None)` when a newer `navigate` call was issued while this
    /// one was fetching; the newer call owns the display and this result is
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns the fetch error of the newest call; the display is unchanged.
    /// A superseded call whose fetch failed still returns `Ok(None)`, so its
    /// error is dropped.
    pub async fn navigate(&self, page_index: usize) -> Result<Option<PageView>, TransportError> {
        let ticket = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let index = {
            let state = self.inner.state.lock().await;
            match state.total {
                Some(total) => page_index.min(page_count(total, self.inner.page_size).saturating_sub(1)),
                None => page_index,
            }
        };
        if index != page_index {
            log::debug!("page index {} clamped to {}", page_index, index);
        }

        let result = self.load_page(source_page_number(index)?).await;

        let mut state = self.inner.state.lock().await;
        if self.inner.generation.load(Ordering::SeqCst) != ticket {
            log::debug!("discarding superseded result for page index {}", index);
            return Ok(None);
        }
        let page = result?;

        state.current_page = index;
        state.total = Some(page.total());
        state.displayed = page.into_records();
        Ok(Some(state.view(self.inner.page_size)))
    }

    /// Replaces the selected subset of the visible page.
    ///
    /// `selection` is the complete set of visible records that should now be
    /// selected, not a delta. Every visible id is deselected first, then the
    /// given records are selected; selections on other pages are untouched.
    pub async fn toggle_selection<I>(&self, selection: I) -> PageView
    where
        I: IntoIterator<Item = Record>,
    {
        let mut state = self.inner.state.lock().await;
        let visible: HashSet<RecordId> = state.displayed.iter().map(Record::id).collect();

        let selection: Vec<Record> = selection.into_iter().collect();
        for record in selection.iter().filter(|r| !visible.contains(&r.id())) {
            log::warn!("selecting record {} which is not on the visible page", record.id());
        }

        let (added, removed) = state.selection.replace_page(&visible, selection);
        log::debug!(
            "page {} selection: +{} -{}, {} selected",
            state.current_page,
            added.len(),
            removed.len(),
            state.selection.len()
        );

        state.view(self.inner.page_size)
    }

    /// Sets the selection to exactly the first `n` records of the collection.
    ///
    /// This replaces the whole selection; earlier choices outside the first
    /// `n` are dropped. `n <= 0` is a no-op. Fewer than `n` records are
    /// selected when the collection is smaller. Calls against an unchanged
    /// collection are idempotent.
    ///
    /// Returns the selected count afterwards.
    pub async fn auto_select(&self, n: i64) -> Result<usize, TransportError> {
        if n <= 0 {
            return Ok(self.selected_count().await);
        }

        let _bulk = self.inner.bulk.lock().await;
        let wanted = usize::try_from(n).unwrap_or(usize::MAX);
        let pages_needed = wanted.div_ceil(self.inner.page_size);

        let records = match self.inner.fetch_strategy {
            FetchStrategy::Sequential => self.first_records_sequential(wanted, pages_needed).await?,
            FetchStrategy::Concurrent => self.first_records_concurrent(wanted, pages_needed).await?,
        };

        let mut state = self.inner.state.lock().await;
        let count = state.selection.replace_all(records);
        log::info!("auto-selected {} of {} requested records", count, wanted);
        Ok(count)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the render model for the displayed page.
    pub async fn view(&self) -> PageView {
        self.inner.state.lock().await.view(self.inner.page_size)
    }

    /// Returns the number of selected records across every page.
    pub async fn selected_count(&self) -> usize {
        self.inner.state.lock().await.selection.len()
    }

    /// Returns the selected ids, sorted.
    pub async fn selected_ids(&self) -> Vec<RecordId> {
        self.inner.state.lock().await.selection.ids()
    }

    /// Returns the selected records, sorted by id.
    pub async fn selected_records(&self) -> Vec<Record> {
        let state = self.inner.state.lock().await;
        state.selection.records().into_iter().cloned().collect()
    }

    /// Returns whether `id` is selected, wherever it lives.
    pub async fn is_selected(&self, id: RecordId) -> bool {
        self.inner.state.lock().await.selection.contains(id)
    }

    /// Returns the 0-based index of the displayed page.
    pub async fn current_page(&self) -> usize {
        self.inner.state.lock().await.current_page
    }

    /// Returns the collection total from the latest applied fetch.
    pub async fn total(&self) -> Option<usize> {
        self.inner.state.lock().await.total
    }

    /// Returns the number of pages, once the total is known.
    pub async fn page_count(&self) -> Option<usize> {
        self.total()
            .await
            .map(|total| page_count(total, self.inner.page_size))
    }

    /// Returns the fixed page size.
    pub fn page_size(&self) -> usize {
        self.inner.page_size
    }

    /// Returns the page cache, if caching is enabled.
    pub fn cache(&self) -> Option<&PageCache> {
        self.inner.cache.as_ref()
    }

    /// Drops every cached page so later calls refetch.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.inner.cache {
            cache.clear();
        }
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    async fn load_page(&self, page_number: u32) -> Result<Page, TransportError> {
        if let Some(cached) = self.inner.cache.as_ref().and_then(|c| c.get(page_number)) {
            log::debug!("page {} served from cache", page_number);
            return Ok(cached.page);
        }

        log::debug!("fetching page {} ({} per page)", page_number, self.inner.page_size);
        let page = self.inner.source.fetch(page_number, self.inner.page_size).await?;
        if let Some(cache) = &self.inner.cache {
            cache.insert(page_number, page.clone());
        }
        Ok(page)
    }

    async fn first_records_sequential(
        &self,
        wanted: usize,
        pages_needed: usize,
    ) -> Result<Vec<Record>, TransportError> {
        let mut records = Vec::new();
        for index in 0..pages_needed {
            if records.len() >= wanted {
                break;
            }
            let page = self.load_page(source_page_number(index)?).await?;
            if page.is_empty() {
                break;
            }
            records.extend(page.into_records());
        }
        records.truncate(wanted);
        Ok(records)
    }

    async fn first_records_concurrent(
        &self,
        wanted: usize,
        pages_needed: usize,
    ) -> Result<Vec<Record>, TransportError> {
        // The first page bounds the fan-out by the reported total.
        let first = self.load_page(1).await?;
        let pages_needed = pages_needed.min(page_count(first.total(), self.inner.page_size));

        let rest = (1..pages_needed)
            .map(source_page_number)
            .collect::<Result<Vec<_>, _>>()?;
        // `buffered` yields in input order whatever order fetches finish in.
        let rest: Vec<Page> = stream::iter(rest)
            .map(|page| self.load_page(page))
            .buffered(self.inner.max_concurrent_fetches)
            .try_collect()
            .await?;

        let mut records = Vec::new();
        for page in std::iter::once(first).chain(rest) {
            if page.is_empty() {
                break;
            }
            records.extend(page.into_records());
        }
        records.truncate(wanted);
        Ok(records)
    }
}

/// Converts a 0-based page index to the source's 1-based page number.
fn source_page_number(index: usize) -> Result<u32, TransportError> {
    index
        .checked_add(1)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| TransportError::InvalidRequest(format!("page index {} out of range", index)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_page_number() {
        assert_eq!(source_page_number(0).unwrap(), 1);
        assert_eq!(source_page_number(4).unwrap(), 5);
        assert!(source_page_number(u32::MAX as usize).is_err());
    }

    #[test]
    fn test_session_view_marks_selected_rows() {
        let mut state = SessionState {
            current_page: 1,
            total: Some(25),
            displayed: vec![Record::new(11), Record::new(12)],
            selection: SelectionSet::new(),
        };
        state.selection.insert(Record::new(12));
        state.selection.insert(Record::new(3));

        let view = state.view(10);
        assert_eq!(view.page_count, Some(3));
        assert_eq!(view.is_selected(RecordId(11)), Some(false));
        assert_eq!(view.is_selected(RecordId(12)), Some(true));
        assert_eq!(view.is_selected(RecordId(3)), None);
        assert_eq!(view.selected_count, 2);
        assert!(view.has_next());
        assert!(view.has_previous());
    }
}

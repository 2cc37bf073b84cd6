//! Page type for paginated listing results.

use super::Record;
use super::RecordId;

/// One fetched batch of records plus the collection's total count.
///
/// `total` is whatever the API reported for this fetch. It may change
/// between fetches if the backing collection mutates; nothing here guards
/// against that.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    records: Vec<Record>,
    total: usize,
}

impl Page {
    /// Creates a page from records in the order the source returned them.
    pub fn new(records: Vec<Record>, total: usize) -> Self {
        Self { records, total }
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Returns the ids of this page's records, in page order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(Record::id).collect()
    }

    /// Returns the total record count across all pages.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Number of pages needed to hold `total` records at `page_size` per page.
///
/// A zero page size is treated as one.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

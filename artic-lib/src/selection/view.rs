//! Render model handed to the UI layer.

use crate::model::Record;
use crate::model::RecordId;

/// One displayed row: a record plus whether it is currently selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub record: Record,
    pub is_selected: bool,
}

/// Snapshot of what the grid should show.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// 0-based index of the displayed page.
    pub page_index: usize,
    /// Number of pages, once the total is known.
    pub page_count: Option<usize>,
    /// Total records across all pages, once known.
    pub total: Option<usize>,
    /// Records per page.
    pub page_size: usize,
    /// Displayed rows in source order.
    pub rows: Vec<Row>,
    /// Number of selected records across every page.
    pub selected_count: usize,
}

impl PageView {
    /// Records on this page that are selected, in row order.
    ///
    /// This is what a grid binds as its current selection.
    pub fn selected_records(&self) -> Vec<&Record> {
        self.rows
            .iter()
            .filter(|row| row.is_selected)
            .map(|row| &row.record)
            .collect()
    }

    /// Returns whether the row holding `id` is selected, or `None` if it is not displayed.
    pub fn is_selected(&self, id: RecordId) -> Option<bool> {
        self.rows
            .iter()
            .find(|row| row.record.id() == id)
            .map(|row| row.is_selected)
    }

    /// Ids of the displayed rows, in row order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.rows.iter().map(|row| row.record.id()).collect()
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.page_count
            .is_some_and(|count| self.page_index + 1 < count)
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }
}

//! Cross-page selection set.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::model::Record;
use crate::model::RecordId;

/// Id-keyed selection state, valid across every page of the collection.
///
/// An id is present iff the user selected it and has not deselected it
/// since. Keys are unique by construction, so the set can never hold the
/// same record twice. The retained `Record` is whatever value was selected
/// last for that id.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    selected: HashMap<RecordId, Record>,
}

impl SelectionSet {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an id is selected.
    pub fn contains(&self, id: RecordId) -> bool {
        self.selected.contains_key(&id)
    }

    /// Get the number of selected records.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Get the retained record for an id.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.selected.get(&id)
    }

    /// Get all selected ids, sorted for deterministic ordering.
    pub fn ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<_> = self.selected.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Get all selected records, sorted by id.
    pub fn records(&self) -> Vec<&Record> {
        let mut records: Vec<_> = self.selected.values().collect();
        records.sort_by_key(|r| r.id());
        records
    }

    /// Select a record. Returns `true` if the id was not selected before.
    pub fn insert(&mut self, record: Record) -> bool {
        self.selected.insert(record.id(), record).is_none()
    }

    /// Deselect an id, returning the retained record.
    pub fn remove(&mut self, id: RecordId) -> Option<Record> {
        self.selected.remove(&id)
    }

    /// Clear all selection.
    /// Returns the ids that were deselected.
    pub fn clear(&mut self) -> Vec<RecordId> {
        self.selected.drain().map(|(id, _)| id).collect()
    }

    /// Replace the selected subset of one page.
    ///
    /// Every id in `page_ids` is deselected first, then every record in
    /// `selection` is selected. Ids outside `page_ids` are never removed, so
    /// afterwards `self ∩ page_ids` equals the page ids of `selection`.
    ///
    /// Returns (added, removed) ids, each sorted.
    pub fn replace_page<I>(
        &mut self,
        page_ids: &HashSet<RecordId>,
        selection: I,
    ) -> (Vec<RecordId>, Vec<RecordId>)
    where
        I: IntoIterator<Item = Record>,
    {
        let before: HashSet<RecordId> = page_ids
            .iter()
            .copied()
            .filter(|id| self.selected.remove(id).is_some())
            .collect();

        let mut added = Vec::new();
        let mut kept = HashSet::new();
        for record in selection {
            let id = record.id();
            let was_selected = before.contains(&id) || self.selected.contains_key(&id);
            self.selected.insert(id, record);
            if was_selected {
                kept.insert(id);
            } else {
                added.push(id);
            }
        }

        let mut removed: Vec<_> = before.difference(&kept).copied().collect();
        added.sort();
        removed.sort();
        (added, removed)
    }

    /// Replace the whole selection with exactly `records`.
    ///
    /// Previous selections are discarded. Returns the new selected count,
    /// which is lower than the number of records given if ids repeat.
    pub fn replace_all<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = Record>,
    {
        self.selected = records.into_iter().map(|r| (r.id(), r)).collect();
        self.selected.len()
    }
}

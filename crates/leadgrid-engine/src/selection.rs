//! Row selection and the last-applied sort indicator for one sheet.

use crate::sort::SortDirection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The sort most recently applied to a sheet. Display metadata only: later
/// edits do not re-sort.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    pub column_index: usize,
    pub direction: SortDirection,
}

/// Set of selected row indices.
///
/// Indices are never remapped; callers clear the selection whenever rows are
/// deleted or reloaded, or the column count changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    rows: BTreeSet<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row. Indices at or past `row_count` are ignored.
    pub fn toggle(&mut self, row: usize, row_count: usize) {
        if row >= row_count {
            return;
        }
        if !self.rows.remove(&row) {
            self.rows.insert(row);
        }
    }

    /// Select every row, or clear if every row is already selected.
    pub fn toggle_all(&mut self, row_count: usize) {
        if self.all_selected(row_count) {
            self.rows.clear();
        } else {
            self.rows = (0..row_count).collect();
        }
    }

    pub fn all_selected(&self, row_count: usize) -> bool {
        row_count > 0 && (0..row_count).all(|i| self.rows.contains(&i))
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    /// Selected indices in ascending order.
    pub fn rows(&self) -> &BTreeSet<usize> {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

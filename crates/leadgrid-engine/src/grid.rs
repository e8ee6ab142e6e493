//! The table model: headers, rows of raw strings, and column widths.
//!
//! Every edit returns a fresh [`Grid`]; the receiver is never touched. All
//! operations keep each row exactly as wide as the header list.

use crate::error::{Result, check_index};
use crate::sort::{SortDirection, sorted_row_order};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Width given to new columns and to every column of a freshly shaped table.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;
/// Columns can never be resized below this.
pub const MIN_COLUMN_WIDTH: u32 = 100;

/// Plain headers + rows, as produced by the CSV codec.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        TableData { headers, rows }
    }

    /// Pad or truncate every row to the header count.
    pub fn normalized(mut self) -> Self {
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
        self
    }
}

/// Which side of the anchor column a new column goes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertSide {
    Left,
    Right,
}

/// Table state for one sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "GridRepr")]
pub struct Grid {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<u32>,
}

/// Wire shape accepted on deserialize; normalized into a [`Grid`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridRepr {
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
    #[serde(default)]
    column_widths: Vec<u32>,
}

impl From<GridRepr> for Grid {
    fn from(repr: GridRepr) -> Self {
        let mut grid = Grid::from_table(TableData::new(repr.headers, repr.rows));
        if repr.column_widths.len() == grid.headers.len() {
            grid.column_widths = repr
                .column_widths
                .into_iter()
                .map(|w| w.max(MIN_COLUMN_WIDTH))
                .collect();
        }
        grid
    }
}

impl Grid {
    /// Build a grid from raw table data with default widths.
    pub fn from_table(table: TableData) -> Self {
        let table = table.normalized();
        let column_widths = vec![DEFAULT_COLUMN_WIDTH; table.headers.len()];
        Grid {
            headers: table.headers,
            rows: table.rows,
            column_widths,
        }
    }

    /// Replace the contents with freshly loaded data.
    ///
    /// Widths survive when the new table has the same column count; a
    /// differently shaped table starts over with default widths.
    pub fn reload(&self, table: TableData) -> Self {
        let mut next = Grid::from_table(table);
        if next.headers.len() == self.column_widths.len() {
            next.column_widths = self.column_widths.clone();
        }
        next
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_widths(&self) -> &[u32] {
        &self.column_widths
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Index of the first column with this exact header.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Distinct non-blank values of a column, in order of first appearance.
    pub fn distinct_values(&self, col: usize) -> Result<Vec<String>> {
        check_index(col, self.column_count())?;
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for row in &self.rows {
            let value = &row[col];
            if value.trim().is_empty() {
                continue;
            }
            if seen.insert(value.as_str()) {
                values.push(value.clone());
            }
        }
        Ok(values)
    }

    /// Copy out headers and rows (for export).
    pub fn to_table(&self) -> TableData {
        TableData::new(self.headers.clone(), self.rows.clone())
    }

    /// Headers plus only the listed rows, in ascending index order.
    pub fn select_rows(&self, indices: &BTreeSet<usize>) -> TableData {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        TableData::new(self.headers.clone(), rows)
    }

    pub fn set_cell(&self, row: usize, col: usize, value: impl Into<String>) -> Result<Self> {
        check_index(row, self.row_count())?;
        check_index(col, self.column_count())?;
        let mut next = self.clone();
        next.rows[row][col] = value.into();
        Ok(next)
    }

    /// Rename a column. Blank input keeps the previous header.
    pub fn set_header(&self, col: usize, value: &str) -> Result<Self> {
        check_index(col, self.column_count())?;
        let mut next = self.clone();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            log::debug!("Ignoring blank header for column {}", col);
        } else {
            next.headers[col] = trimmed.to_string();
        }
        Ok(next)
    }

    /// Append `Column {N+1}` at the end.
    pub fn add_column(&self) -> Self {
        let at = self.column_count();
        let header = self.next_column_name();
        self.with_column_at(at, header)
    }

    /// Insert a blank column beside `at`.
    pub fn insert_column(&self, at: usize, side: InsertSide) -> Result<Self> {
        if !(self.headers.is_empty() && at == 0) {
            check_index(at, self.column_count())?;
        }
        let index = match side {
            InsertSide::Left => at,
            InsertSide::Right => (at + 1).min(self.column_count()),
        };
        let header = self.next_column_name();
        Ok(self.with_column_at(index, header))
    }

    /// Remove a column. The last remaining column cannot be deleted; the grid
    /// comes back unchanged in that case.
    pub fn delete_column(&self, col: usize) -> Result<Self> {
        check_index(col, self.column_count())?;
        if self.column_count() <= 1 {
            log::warn!("Refusing to delete the only column");
            return Ok(self.clone());
        }
        let mut next = self.clone();
        next.headers.remove(col);
        next.column_widths.remove(col);
        for row in &mut next.rows {
            row.remove(col);
        }
        Ok(next)
    }

    pub fn add_row(&self) -> Self {
        let mut next = self.clone();
        next.rows.push(vec![String::new(); self.column_count()]);
        next
    }

    /// Drop every row whose index is listed. Unknown indices are ignored.
    pub fn delete_rows(&self, indices: &BTreeSet<usize>) -> Self {
        let mut next = self.clone();
        next.rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| !indices.contains(i))
            .map(|(_, row)| row.clone())
            .collect();
        next
    }

    /// Move column `from` to position `to`, keeping every other column in order.
    pub fn move_column(&self, from: usize, to: usize) -> Result<Self> {
        check_index(from, self.column_count())?;
        check_index(to, self.column_count())?;
        let mut next = self.clone();
        if from == to {
            return Ok(next);
        }
        move_item(&mut next.headers, from, to);
        move_item(&mut next.column_widths, from, to);
        for row in &mut next.rows {
            move_item(row, from, to);
        }
        Ok(next)
    }

    /// Drag-and-drop reorder keyed by header text.
    ///
    /// Headers are matched by value, first match wins, so with duplicate
    /// names the leftmost column is the one that moves. Unknown headers leave
    /// the grid unchanged.
    pub fn reorder_by_header(&self, dragged: &str, target: &str) -> Self {
        match (self.column_index(dragged), self.column_index(target)) {
            (Some(from), Some(to)) => self.move_column(from, to).unwrap_or_else(|_| self.clone()),
            _ => self.clone(),
        }
    }

    /// Set a column's width, never below [`MIN_COLUMN_WIDTH`].
    pub fn resize_column(&self, col: usize, width: u32) -> Result<Self> {
        check_index(col, self.column_count())?;
        let mut next = self.clone();
        next.column_widths[col] = width.max(MIN_COLUMN_WIDTH);
        Ok(next)
    }

    /// Reorder rows by one column. Headers and widths stay put.
    pub fn sort_by_column(&self, col: usize, direction: SortDirection) -> Result<Self> {
        check_index(col, self.column_count())?;
        let order = sorted_row_order(&self.rows, col, direction);
        let mut next = self.clone();
        next.rows = order.into_iter().map(|i| self.rows[i].clone()).collect();
        Ok(next)
    }

    /// Write one value per row into column `col`, appending a column named
    /// `header` when `col` is `None`. Rows are padded first.
    pub(crate) fn with_column_values(&self, col: Option<usize>, header: &str, values: Vec<String>) -> Self {
        let mut next = match col {
            Some(_) => self.clone(),
            None => self.with_column_at(self.column_count(), header.to_string()),
        };
        let col = col.unwrap_or(next.column_count() - 1);
        let width = next.column_count();
        for (row, value) in next.rows.iter_mut().zip(values) {
            row.resize(width, String::new());
            row[col] = value;
        }
        next
    }

    fn next_column_name(&self) -> String {
        format!("Column {}", self.column_count() + 1)
    }

    fn with_column_at(&self, index: usize, header: String) -> Self {
        let mut next = self.clone();
        next.headers.insert(index, header);
        next.column_widths.insert(index, DEFAULT_COLUMN_WIDTH);
        for row in &mut next.rows {
            row.insert(index, String::new());
        }
        next
    }
}

/// Array-move: remove at `from`, insert at `to`.
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}

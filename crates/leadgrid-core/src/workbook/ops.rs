use super::Workbook;
use crate::error::{LeadgridError, Result};
use leadgrid_engine::{Grid, InsertSide, ScoringEngine, SortConfig, SortDirection};
use std::collections::BTreeSet;

impl Workbook {
    /// Run a pure grid operation on the active sheet and swap the result in.
    ///
    /// The selection is cleared when the column count changes or rows
    /// disappear, and the sort indicator is dropped when the column count
    /// changes. Nothing is touched if the operation fails.
    pub fn update_active<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&Grid) -> leadgrid_engine::Result<Grid>,
    {
        let sheet = self.active_sheet_mut();
        let grid = sheet.data.as_ref().ok_or(LeadgridError::NoData)?;
        let next = op(grid)?;

        if next.column_count() != grid.column_count() {
            sheet.view.reset();
        } else if next.row_count() < grid.row_count() {
            sheet.view.selection.clear();
        }
        sheet.data = Some(next);
        Ok(())
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: &str) -> Result<()> {
        self.update_active(|g| g.set_cell(row, col, value))
    }

    pub fn set_header(&mut self, col: usize, value: &str) -> Result<()> {
        self.update_active(|g| g.set_header(col, value))
    }

    pub fn add_column(&mut self) -> Result<()> {
        self.update_active(|g| Ok(g.add_column()))
    }

    pub fn insert_column(&mut self, at: usize, side: InsertSide) -> Result<()> {
        self.update_active(|g| g.insert_column(at, side))
    }

    pub fn delete_column(&mut self, col: usize) -> Result<()> {
        self.update_active(|g| g.delete_column(col))
    }

    pub fn add_row(&mut self) -> Result<()> {
        self.update_active(|g| Ok(g.add_row()))
    }

    /// Delete the listed rows and clear the selection.
    pub fn delete_rows(&mut self, rows: &BTreeSet<usize>) -> Result<()> {
        self.update_active(|g| Ok(g.delete_rows(rows)))?;
        self.active_sheet_mut().view.selection.clear();
        Ok(())
    }

    /// Delete every selected row. Returns how many were removed.
    pub fn delete_selected_rows(&mut self) -> Result<usize> {
        let rows = self.active_view().selection.rows().clone();
        if rows.is_empty() {
            return Ok(0);
        }
        self.delete_rows(&rows)?;
        log::debug!("Deleted {} selected row(s)", rows.len());
        Ok(rows.len())
    }

    /// Move a column by index. The sort indicator no longer points at the
    /// right column afterwards, so it is dropped.
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<()> {
        self.update_active(|g| g.move_column(from, to))?;
        if from != to {
            self.active_sheet_mut().view.sort = None;
        }
        Ok(())
    }

    /// Drag-and-drop reorder by header text (first match wins).
    pub fn reorder_by_header(&mut self, dragged: &str, target: &str) -> Result<()> {
        let before = self.active_grid().map(|g| g.headers().to_vec());
        self.update_active(|g| Ok(g.reorder_by_header(dragged, target)))?;
        if self.active_grid().map(|g| g.headers().to_vec()) != before {
            self.active_sheet_mut().view.sort = None;
        }
        Ok(())
    }

    pub fn resize_column(&mut self, col: usize, width: u32) -> Result<()> {
        self.update_active(|g| g.resize_column(col, width))
    }

    /// Sort rows by a column and record the indicator. Row indices change, so
    /// the selection is cleared.
    pub fn sort(&mut self, col: usize, direction: SortDirection) -> Result<()> {
        self.update_active(|g| g.sort_by_column(col, direction))?;
        let view = &mut self.active_sheet_mut().view;
        view.selection.clear();
        view.sort = Some(SortConfig {
            column_index: col,
            direction,
        });
        Ok(())
    }

    /// Sort by a column, flipping direction when it is already the sorted
    /// column (ascending first).
    pub fn toggle_sort(&mut self, col: usize) -> Result<SortDirection> {
        let direction = match self.active_view().sort {
            Some(SortConfig {
                column_index,
                direction,
            }) if column_index == col => direction.flipped(),
            _ => SortDirection::Asc,
        };
        self.sort(col, direction)?;
        Ok(direction)
    }

    pub fn toggle_row(&mut self, row: usize) {
        let count = self.active_sheet().row_count();
        self.active_sheet_mut().view.selection.toggle(row, count);
    }

    pub fn toggle_all_rows(&mut self) {
        let count = self.active_sheet().row_count();
        self.active_sheet_mut().view.selection.toggle_all(count);
    }

    pub fn clear_selection(&mut self) {
        self.active_sheet_mut().view.selection.clear();
    }

    /// Write lead scores into the active sheet.
    pub fn apply_scoring(&mut self, engine: &ScoringEngine) -> Result<()> {
        self.update_active(|g| engine.apply_to(g))
    }
}

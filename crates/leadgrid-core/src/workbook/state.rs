use crate::error::{LeadgridError, Result};
use leadgrid_engine::{Grid, Selection, SortConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-sheet view state. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetView {
    pub selection: Selection,
    /// Last sort applied, shown as an indicator only.
    pub sort: Option<SortConfig>,
}

impl SheetView {
    pub fn reset(&mut self) {
        self.selection.clear();
        self.sort = None;
    }
}

/// A named tab holding at most one table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub data: Option<Grid>,
    #[serde(skip)]
    pub view: SheetView,
}

impl Sheet {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Sheet {
            name: format!("Sheet {}", id),
            id,
            data: None,
            view: SheetView::default(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.data.as_ref().map_or(0, Grid::row_count)
    }
}

/// Ordered sheets plus the id of the one being edited.
///
/// There is always at least one sheet and `active_sheet_id` always names one
/// of them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WorkbookRepr")]
pub struct Workbook {
    sheets: Vec<Sheet>,
    active_sheet_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkbookRepr {
    sheets: Vec<Sheet>,
    #[serde(default)]
    active_sheet_id: String,
}

impl TryFrom<WorkbookRepr> for Workbook {
    type Error = String;

    fn try_from(repr: WorkbookRepr) -> std::result::Result<Self, Self::Error> {
        let Some(first) = repr.sheets.first() else {
            return Err("sheet list is empty".to_string());
        };
        let first_id = first.id.clone();

        let mut seen = HashSet::new();
        for sheet in &repr.sheets {
            if !seen.insert(sheet.id.as_str()) {
                return Err(format!("duplicate sheet id '{}'", sheet.id));
            }
        }

        let active_sheet_id = if seen.contains(repr.active_sheet_id.as_str()) {
            repr.active_sheet_id
        } else {
            log::warn!(
                "Active sheet '{}' not found, falling back to '{}'",
                repr.active_sheet_id,
                first_id
            );
            first_id
        };

        Ok(Workbook {
            sheets: repr.sheets,
            active_sheet_id,
        })
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Workbook {
            sheets: vec![Sheet::new("1")],
            active_sheet_id: "1".to_string(),
        }
    }
}

impl Workbook {
    /// Create a workbook with one empty sheet named `Sheet 1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a single table (the pre-registry snapshot format) in a new
    /// workbook.
    pub fn from_legacy(grid: Grid) -> Self {
        let mut workbook = Self::default();
        workbook.sheets[0].data = Some(grid);
        workbook
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, id: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.id == id)
    }

    pub fn active_sheet_id(&self) -> &str {
        &self.active_sheet_id
    }

    pub fn active_sheet(&self) -> &Sheet {
        let idx = self.active_index();
        &self.sheets[idx]
    }

    pub(crate) fn active_sheet_mut(&mut self) -> &mut Sheet {
        let idx = self.active_index();
        &mut self.sheets[idx]
    }

    /// Active sheet's table, if it has one.
    pub fn active_grid(&self) -> Option<&Grid> {
        self.active_sheet().data.as_ref()
    }

    pub fn active_view(&self) -> &SheetView {
        &self.active_sheet().view
    }

    fn active_index(&self) -> usize {
        self.sheets
            .iter()
            .position(|s| s.id == self.active_sheet_id)
            .unwrap_or(0)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.sheets
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| LeadgridError::UnknownSheet(id.to_string()))
    }

    /// Id for the next sheet: one more than the largest numeric id.
    fn next_id(&self) -> String {
        let max = self
            .sheets
            .iter()
            .filter_map(|s| s.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }

    /// Append an empty sheet and make it active. Returns the new id.
    pub fn add_sheet(&mut self) -> String {
        let id = self.next_id();
        self.sheets.push(Sheet::new(id.clone()));
        self.active_sheet_id = id.clone();
        log::info!("Added sheet {}", id);
        id
    }

    /// Rename a sheet. A blank name keeps the current one.
    pub fn rename_sheet(&mut self, id: &str, name: &str) -> Result<()> {
        let idx = self.position(id)?;
        let trimmed = name.trim();
        if trimmed.is_empty() {
            log::warn!("Ignoring blank name for sheet {}", id);
            return Ok(());
        }
        self.sheets[idx].name = trimmed.to_string();
        Ok(())
    }

    /// Remove a sheet. The last sheet cannot be removed; removing the active
    /// sheet activates the first remaining one.
    pub fn delete_sheet(&mut self, id: &str) -> Result<()> {
        let idx = self.position(id)?;
        if self.sheets.len() == 1 {
            return Err(LeadgridError::LastSheet);
        }
        self.sheets.remove(idx);
        if self.active_sheet_id == id {
            self.active_sheet_id = self.sheets[0].id.clone();
        }
        log::info!("Deleted sheet {}", id);
        Ok(())
    }

    pub fn set_active(&mut self, id: &str) -> Result<()> {
        self.position(id)?;
        self.active_sheet_id = id.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadgrid_engine::TableData;

    fn grid() -> Grid {
        Grid::from_table(TableData::new(
            vec!["Name".to_string()],
            vec![vec!["Acme".to_string()]],
        ))
    }

    #[test]
    fn test_new_workbook_has_one_sheet() {
        let wb = Workbook::new();
        assert_eq!(wb.sheets().len(), 1);
        assert_eq!(wb.active_sheet_id(), "1");
        assert_eq!(wb.active_sheet().name, "Sheet 1");
        assert!(wb.active_grid().is_none());
    }

    #[test]
    fn test_add_sheet_uses_max_numeric_id() {
        let mut wb = Workbook::new();
        assert_eq!(wb.add_sheet(), "2");
        assert_eq!(wb.add_sheet(), "3");
        wb.delete_sheet("2").unwrap();
        assert_eq!(wb.add_sheet(), "4");
        assert_eq!(wb.active_sheet_id(), "4");
        assert_eq!(wb.active_sheet().name, "Sheet 4");
    }

    #[test]
    fn test_add_sheet_ignores_non_numeric_ids() {
        let json = r#"{"sheets":[{"id":"abc","name":"Imported","data":null}],"activeSheetId":"abc"}"#;
        let mut wb: Workbook = serde_json::from_str(json).unwrap();
        assert_eq!(wb.add_sheet(), "1");
    }

    #[test]
    fn test_rename_sheet_rejects_blank() {
        let mut wb = Workbook::new();
        wb.rename_sheet("1", "  Leads ").unwrap();
        assert_eq!(wb.active_sheet().name, "Leads");
        wb.rename_sheet("1", "   ").unwrap();
        assert_eq!(wb.active_sheet().name, "Leads");
        assert!(matches!(
            wb.rename_sheet("9", "x"),
            Err(LeadgridError::UnknownSheet(_))
        ));
    }

    #[test]
    fn test_delete_last_sheet_refused() {
        let mut wb = Workbook::new();
        assert!(matches!(wb.delete_sheet("1"), Err(LeadgridError::LastSheet)));
        assert_eq!(wb.sheets().len(), 1);
    }

    #[test]
    fn test_delete_active_sheet_activates_first() {
        let mut wb = Workbook::new();
        wb.add_sheet();
        wb.add_sheet();
        wb.set_active("2").unwrap();
        wb.delete_sheet("2").unwrap();
        assert_eq!(wb.active_sheet_id(), "1");

        wb.delete_sheet("1").unwrap();
        assert_eq!(wb.active_sheet_id(), "3");
    }

    #[test]
    fn test_set_active_unknown_sheet() {
        let mut wb = Workbook::new();
        assert!(wb.set_active("7").is_err());
        assert_eq!(wb.active_sheet_id(), "1");
    }

    #[test]
    fn test_from_legacy_wraps_table() {
        let wb = Workbook::from_legacy(grid());
        assert_eq!(wb.sheets().len(), 1);
        assert_eq!(wb.active_grid(), Some(&grid()));
    }

    #[test]
    fn test_snapshot_round_trip_drops_view() {
        let mut wb = Workbook::from_legacy(grid());
        wb.active_sheet_mut().view.selection.toggle(0, 1);
        let json = serde_json::to_string(&wb).unwrap();
        assert!(json.contains("\"activeSheetId\":\"1\""));
        assert!(json.contains("\"columnWidths\":[150]"));

        let back: Workbook = serde_json::from_str(&json).unwrap();
        assert_eq!(back.active_grid(), wb.active_grid());
        assert!(back.active_view().selection.is_empty());
    }

    #[test]
    fn test_snapshot_validation() {
        assert!(serde_json::from_str::<Workbook>(r#"{"sheets":[],"activeSheetId":"1"}"#).is_err());
        let dup = r#"{"sheets":[{"id":"1","name":"A"},{"id":"1","name":"B"}],"activeSheetId":"1"}"#;
        assert!(serde_json::from_str::<Workbook>(dup).is_err());

        let dangling = r#"{"sheets":[{"id":"5","name":"A"}],"activeSheetId":"9"}"#;
        let wb: Workbook = serde_json::from_str(dangling).unwrap();
        assert_eq!(wb.active_sheet_id(), "5");
    }
}

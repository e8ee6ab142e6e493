//! Action types and dispatch logic.
//!
//! Actions represent every user operation on a session. `apply_action`
//! dispatches them and writes whatever they changed back to the store.

use super::Session;
use crate::error::Result;
use leadgrid_core::{CsvExport, ImportMode};
use leadgrid_engine::{Importance, InsertSide, SortDirection};

/// All possible user actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Cells and columns of the active sheet.
    SetCell { row: usize, col: usize, value: String },
    SetHeader { col: usize, value: String },
    AddColumn,
    InsertColumn { at: usize, side: InsertSide },
    DeleteColumn(usize),
    MoveColumn { from: usize, to: usize },
    /// Drag-and-drop reorder keyed by header text.
    ReorderColumn { dragged: String, target: String },
    ResizeColumn { col: usize, width: u32 },

    // Rows.
    AddRow,
    DeleteSelectedRows,
    /// Sort by a column; `None` flips the direction when re-sorting the same
    /// column.
    Sort { col: usize, direction: Option<SortDirection> },

    // Selection.
    ToggleRow(usize),
    ToggleAllRows,
    ClearSelection,

    // Sheets.
    AddSheet,
    RenameSheet { id: String, name: String },
    DeleteSheet(String),
    SwitchSheet(String),

    // CSV.
    ImportCsv { text: String, mode: ImportMode },
    ExportCsv { selected_only: bool },

    // Scoring.
    IncludeColumn(String),
    ExcludeColumn(String),
    SetColumnWeight { column: String, weight: u32 },
    SetImportance { column: String, value: String, importance: Importance },
    ClearImportance { column: String, value: String },
    ApplyScores,
    ResetScoring,

    // Saved scoring configurations.
    SaveScore { name: String },
    LoadScore(String),
    DeleteSavedScore(String),
}

/// What an action produced, for the front end to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Status(String),
    Export(CsvExport),
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Dirty {
    Nothing,
    Workbook,
    Saved,
}

/// Apply an action to the session.
///
/// On error the session is unchanged, except when the store write itself
/// fails: the in-memory change is kept and the error reported.
pub fn apply_action(session: &mut Session, action: Action) -> Result<Outcome> {
    let (outcome, dirty) = dispatch(session, action)?;
    match dirty {
        Dirty::Nothing => {}
        Dirty::Workbook => session.persist_workbook()?,
        Dirty::Saved => session.persist_saved()?,
    }
    Ok(outcome)
}

fn dispatch(session: &mut Session, action: Action) -> Result<(Outcome, Dirty)> {
    let wb = &mut session.workbook;
    let edited = (Outcome::Done, Dirty::Workbook);

    match action {
        Action::SetCell { row, col, value } => {
            wb.set_cell(row, col, &value)?;
            Ok(edited)
        }
        Action::SetHeader { col, value } => {
            wb.set_header(col, &value)?;
            Ok(edited)
        }
        Action::AddColumn => {
            wb.add_column()?;
            Ok(edited)
        }
        Action::InsertColumn { at, side } => {
            wb.insert_column(at, side)?;
            Ok(edited)
        }
        Action::DeleteColumn(col) => {
            let before = wb.active_grid().map_or(0, |g| g.column_count());
            wb.delete_column(col)?;
            if wb.active_grid().map_or(0, |g| g.column_count()) == before {
                return Ok((
                    Outcome::Status("Cannot delete the only column".to_string()),
                    Dirty::Nothing,
                ));
            }
            Ok(edited)
        }
        Action::MoveColumn { from, to } => {
            wb.move_column(from, to)?;
            Ok(edited)
        }
        Action::ReorderColumn { dragged, target } => {
            wb.reorder_by_header(&dragged, &target)?;
            Ok(edited)
        }
        Action::ResizeColumn { col, width } => {
            wb.resize_column(col, width)?;
            Ok(edited)
        }

        Action::AddRow => {
            wb.add_row()?;
            Ok(edited)
        }
        Action::DeleteSelectedRows => {
            let removed = wb.delete_selected_rows()?;
            if removed == 0 {
                return Ok((Outcome::Done, Dirty::Nothing));
            }
            Ok((
                Outcome::Status(format!("Deleted {} row(s)", removed)),
                Dirty::Workbook,
            ))
        }
        Action::Sort { col, direction } => {
            match direction {
                Some(direction) => wb.sort(col, direction)?,
                None => {
                    wb.toggle_sort(col)?;
                }
            }
            Ok(edited)
        }

        Action::ToggleRow(row) => {
            wb.toggle_row(row);
            Ok((Outcome::Done, Dirty::Nothing))
        }
        Action::ToggleAllRows => {
            wb.toggle_all_rows();
            Ok((Outcome::Done, Dirty::Nothing))
        }
        Action::ClearSelection => {
            wb.clear_selection();
            Ok((Outcome::Done, Dirty::Nothing))
        }

        Action::AddSheet => {
            let id = wb.add_sheet();
            Ok((Outcome::Status(format!("Added Sheet {}", id)), Dirty::Workbook))
        }
        Action::RenameSheet { id, name } => {
            wb.rename_sheet(&id, &name)?;
            Ok(edited)
        }
        Action::DeleteSheet(id) => {
            wb.delete_sheet(&id)?;
            Ok(edited)
        }
        Action::SwitchSheet(id) => {
            wb.set_active(&id)?;
            Ok(edited)
        }

        Action::ImportCsv { text, mode } => {
            wb.import_csv(&text, mode)?;
            let rows = wb.active_sheet().row_count();
            Ok((
                Outcome::Status(format!("Imported {} row(s)", rows)),
                Dirty::Workbook,
            ))
        }
        Action::ExportCsv { selected_only } => {
            let export = wb.export_csv(selected_only)?;
            Ok((Outcome::Export(export), Dirty::Nothing))
        }

        Action::IncludeColumn(column) => {
            session.scoring.include(&column);
            Ok((Outcome::Done, Dirty::Nothing))
        }
        Action::ExcludeColumn(column) => {
            session.scoring.exclude(&column);
            Ok((Outcome::Done, Dirty::Nothing))
        }
        Action::SetColumnWeight { column, weight } => {
            session.scoring.set_column_weight(&column, weight)?;
            Ok((Outcome::Done, Dirty::Nothing))
        }
        Action::SetImportance {
            column,
            value,
            importance,
        } => {
            session.scoring.set_importance(&column, &value, importance)?;
            Ok((Outcome::Done, Dirty::Nothing))
        }
        Action::ClearImportance { column, value } => {
            session.scoring.clear_importance(&column, &value);
            Ok((Outcome::Done, Dirty::Nothing))
        }
        Action::ApplyScores => {
            wb.apply_scoring(&session.scoring)?;
            Ok((
                Outcome::Status("Lead scores applied".to_string()),
                Dirty::Workbook,
            ))
        }
        Action::ResetScoring => {
            session.scoring.reset();
            Ok((Outcome::Done, Dirty::Nothing))
        }

        Action::SaveScore { name } => {
            let saved = session.saved.save(&name, session.scoring.config())?;
            Ok((
                Outcome::Status(format!("Saved '{}'", saved.name)),
                Dirty::Saved,
            ))
        }
        Action::LoadScore(id) => {
            let saved = session.saved.get(&id)?;
            let message = format!("Loaded '{}'", saved.name);
            session.scoring.load(saved.config.clone());
            Ok((Outcome::Status(message), Dirty::Nothing))
        }
        Action::DeleteSavedScore(id) => {
            session.saved.delete(&id)?;
            Ok((Outcome::Done, Dirty::Saved))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionError;
    use crate::config::Settings;
    use leadgrid_core::{KeyValueStore, LeadgridError, MemoryStore};

    fn session() -> Session {
        Session::open(Box::new(MemoryStore::new()), &Settings::default()).unwrap()
    }

    fn import(session: &mut Session, text: &str) {
        let action = Action::ImportCsv {
            text: text.to_string(),
            mode: ImportMode::Replace,
        };
        apply_action(session, action).unwrap();
    }

    #[test]
    fn test_edit_persists_registry() {
        let mut s = session();
        import(&mut s, "Name\nAcme\n");
        let action = Action::SetCell {
            row: 0,
            col: 0,
            value: "Beta".to_string(),
        };
        assert_eq!(apply_action(&mut s, action).unwrap(), Outcome::Done);

        let text = s.store().get("leadgrid.sheets").unwrap().unwrap();
        assert!(text.contains("Beta"));
    }

    #[test]
    fn test_selection_is_not_persisted() {
        let mut s = session();
        import(&mut s, "Name\nAcme\n");
        let before = s.store().get("leadgrid.sheets").unwrap();
        apply_action(&mut s, Action::ToggleAllRows).unwrap();
        assert_eq!(s.store().get("leadgrid.sheets").unwrap(), before);
        assert_eq!(s.workbook().active_view().selection.len(), 1);
    }

    #[test]
    fn test_delete_only_column_reports_status() {
        let mut s = session();
        import(&mut s, "Name\nAcme\n");
        let outcome = apply_action(&mut s, Action::DeleteColumn(0)).unwrap();
        assert!(matches!(outcome, Outcome::Status(msg) if msg.contains("only column")));
        assert_eq!(s.workbook().active_grid().unwrap().column_count(), 1);
    }

    #[test]
    fn test_failed_action_reports_error() {
        let mut s = session();
        let err = apply_action(&mut s, Action::AddRow).unwrap_err();
        assert!(matches!(err, SessionError::Core(LeadgridError::NoData)));
        assert!(s.store().get("leadgrid.sheets").unwrap().is_none());
    }

    #[test]
    fn test_sort_toggles_direction() {
        let mut s = session();
        import(&mut s, "N\n2\n10\n1\n");
        let sort = Action::Sort {
            col: 0,
            direction: None,
        };
        apply_action(&mut s, sort.clone()).unwrap();
        apply_action(&mut s, sort).unwrap();
        let values: Vec<&str> = s
            .workbook()
            .active_grid()
            .unwrap()
            .rows()
            .iter()
            .map(|r| r[0].as_str())
            .collect();
        assert_eq!(values, vec!["10", "2", "1"]);
    }

    #[test]
    fn test_scoring_edits_need_included_column() {
        let mut s = session();
        let action = Action::SetColumnWeight {
            column: "Size".to_string(),
            weight: 40,
        };
        assert!(matches!(
            apply_action(&mut s, action),
            Err(SessionError::Engine(_))
        ));
    }
}

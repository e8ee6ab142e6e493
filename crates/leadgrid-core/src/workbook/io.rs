use super::Workbook;
use crate::error::{LeadgridError, Result};
use crate::storage::{export_filename, parse_csv, selected_export_filename, write_csv};
use leadgrid_engine::{Grid, TableData};

/// Where imported data goes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImportMode {
    /// Overwrite the active sheet's table.
    Replace,
    /// Put the table in a new sheet and activate it.
    New,
}

/// A CSV file ready to be handed to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub contents: String,
    pub rows: usize,
}

impl Workbook {
    /// Load a parsed table. The target sheet's selection and sort indicator
    /// start over; widths carry over when a replaced table keeps its column
    /// count.
    pub fn import(&mut self, table: TableData, mode: ImportMode) {
        if mode == ImportMode::New {
            self.add_sheet();
        }
        let sheet = self.active_sheet_mut();
        let grid = match &sheet.data {
            Some(existing) => existing.reload(table),
            None => Grid::from_table(table),
        };
        log::info!(
            "Imported {} row(s) x {} column(s) into sheet {}",
            grid.row_count(),
            grid.column_count(),
            sheet.id
        );
        sheet.data = Some(grid);
        sheet.view.reset();
    }

    /// Parse CSV text and import it. A parse error leaves the workbook as it
    /// was.
    pub fn import_csv(&mut self, text: &str, mode: ImportMode) -> Result<()> {
        let table = parse_csv(text)?;
        self.import(table, mode);
        Ok(())
    }

    /// Serialize the active sheet, or only its selected rows (in ascending
    /// row order) when `selected_only` is set.
    pub fn export_csv(&self, selected_only: bool) -> Result<CsvExport> {
        let sheet = self.active_sheet();
        let grid = sheet.data.as_ref().ok_or(LeadgridError::NoData)?;

        let (filename, table) = if selected_only {
            let rows = sheet.view.selection.rows();
            if rows.is_empty() {
                return Err(LeadgridError::NoSelection);
            }
            (
                selected_export_filename(&sheet.name, rows.len()),
                grid.select_rows(rows),
            )
        } else {
            (export_filename(&sheet.name), grid.to_table())
        };

        let export = CsvExport {
            filename,
            rows: table.rows.len(),
            contents: write_csv(&table)?,
        };
        log::info!("Exported {} row(s) to {}", export.rows, export.filename);
        Ok(export)
    }
}

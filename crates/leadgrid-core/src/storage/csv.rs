//! CSV import/export functionality

use crate::error::{LeadgridError, Result};
use leadgrid_engine::TableData;

/// Parse CSV text into headers and rows.
///
/// - The first record is the header row; it must contain a non-blank field
/// - Rows made only of blank fields are dropped
/// - Short rows are padded with `""` and long rows truncated to the header count
pub fn parse_csv(text: &str) -> Result<TableData> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(LeadgridError::EmptyFile);
    }

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| LeadgridError::ParseFailure(e.to_string()))?;
        records.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }

    let mut records = records.into_iter();
    let Some(headers) = records.next() else {
        return Err(LeadgridError::EmptyFile);
    };
    if is_blank_row(&headers) {
        return Err(LeadgridError::NoHeaders);
    }

    let rows: Vec<Vec<String>> = records.filter(|row| !is_blank_row(row)).collect();
    log::debug!("Parsed CSV: {} column(s), {} row(s)", headers.len(), rows.len());
    Ok(TableData::new(headers, rows).normalized())
}

/// Serialize headers and rows to CSV text, quoting only where needed.
pub fn write_csv(table: &TableData) -> Result<String> {
    let mut writer = ::csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| LeadgridError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| LeadgridError::ParseFailure(e.to_string()))
}

/// File name for exporting a whole sheet.
pub fn export_filename(sheet_name: &str) -> String {
    format!("{}-export.csv", sheet_name)
}

/// File name for exporting `count` selected rows of a sheet.
pub fn selected_export_filename(sheet_name: &str, count: usize) -> String {
    format!("{}-selected-{}-rows.csv", sheet_name, count)
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|field| field.trim().is_empty())
}

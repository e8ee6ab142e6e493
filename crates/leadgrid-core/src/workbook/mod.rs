//! Workbook state and logic (UI-agnostic).

mod io;
mod ops;
mod state;

pub use io::{CsvExport, ImportMode};
pub use state::{Sheet, SheetView, Workbook};

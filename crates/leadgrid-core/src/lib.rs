//! leadgrid-core - UI-agnostic workbook model + storage.

pub mod error;
pub mod saved;
pub mod storage;
pub mod workbook;

pub use error::{LeadgridError, Result};
pub use saved::{SavedScore, SavedScores};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageKeys};
pub use workbook::{CsvExport, ImportMode, Sheet, SheetView, Workbook};

pub use leadgrid_engine::{Grid, ScoringConfig, ScoringEngine, TableData};

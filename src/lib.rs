//! leadgrid - Multi-sheet lead table editing with weighted scoring.
//!
//! The [`Session`] ties the workbook, the scoring engine and the saved
//! scoring configurations to a key-value store. Front ends drive it with
//! [`Action`]s through [`apply_action`].

pub mod config;
pub mod error;
pub mod session;

pub use config::{Settings, load_settings};
pub use error::{Result, SessionError};
pub use session::{Action, Outcome, Session, apply_action};

pub use leadgrid_core::{
    CsvExport, FileStore, ImportMode, KeyValueStore, MemoryStore, SavedScore, StorageKeys,
    Workbook,
};
pub use leadgrid_engine::{Importance, InsertSide, ScoringEngine, SortDirection};

//! Error types for Leadgrid core.

use leadgrid_engine::EngineError;
use thiserror::Error;

/// Errors that can occur while editing, importing, exporting or persisting
/// a workbook
#[derive(Error, Debug)]
pub enum LeadgridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV file is empty")]
    EmptyFile,

    #[error("CSV header row is empty")]
    NoHeaders,

    #[error("CSV parse error: {0}")]
    ParseFailure(String),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt data under '{key}': {message}")]
    CorruptPersistedState { key: String, message: String },

    #[error("No sheet with id {0}")]
    UnknownSheet(String),

    #[error("Cannot delete the last sheet")]
    LastSheet,

    #[error("Active sheet has no data")]
    NoData,

    #[error("No rows selected")]
    NoSelection,

    #[error("No saved score with id {0}")]
    UnknownSavedScore(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, LeadgridError>;

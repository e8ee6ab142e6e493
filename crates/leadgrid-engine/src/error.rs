//! Error types for the Leadgrid engine.

use thiserror::Error;

/// Errors raised by pure grid and scoring operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A row or column index outside the table. Callers are expected to
    /// validate indices, so this signals a broken invariant upstream.
    #[error("Index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("Scoring weights total {total} across {included} column(s); expected 100")]
    InvalidWeight { total: u32, included: usize },

    #[error("Column not included in scoring: {0}")]
    UnknownColumn(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Check `index < len`, returning `OutOfRange` otherwise.
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(EngineError::OutOfRange { index, len })
    }
}

//! leadgrid_engine - Table model, sorting, selection and weighted scoring.
//!
//! Everything in this crate is pure state: operations take the current value
//! and hand back a new one, so callers can swap whole snapshots.
//!
//! - [`Grid`] - headers, rows and column widths with structural edits
//! - [`sort`] - numeric column detection and stable row ordering
//! - [`Selection`], [`SortConfig`] - per-sheet view state
//! - [`ScoringEngine`] - column/value weights and the Lead Score column

pub mod error;
pub mod grid;
pub mod scoring;
pub mod selection;
pub mod sort;

pub use error::{EngineError, Result};
pub use grid::{DEFAULT_COLUMN_WIDTH, Grid, InsertSide, MIN_COLUMN_WIDTH, TableData};
pub use scoring::{Contribution, Importance, LEAD_SCORE_COLUMN, Score, ScoringConfig, ScoringEngine};
pub use selection::{Selection, SortConfig};
pub use sort::SortDirection;

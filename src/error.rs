//! Error types for the Leadgrid session layer

use leadgrid_core::LeadgridError;
use leadgrid_engine::EngineError;
use thiserror::Error;

/// Errors returned while opening a session or applying an action
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] LeadgridError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("No data directory available; set data_dir in settings.toml")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, SessionError>;

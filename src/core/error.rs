//! Crate-wide error taxonomy
//!
//! Core operations return these synchronously; nothing is swallowed or
//! retried here (tracking-number regeneration lives in the lifecycle
//! engine). The CLI boundary converts them into miette diagnostics.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeskError>;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Request {0} not found")]
    RequestNotFound(String),

    #[error("Appeal {0} not found")]
    AppealNotFound(String),

    /// Operation not legal for the record's current status
    #[error("{0}")]
    InvalidState(String),

    /// Uniqueness violation at the storage layer
    #[error("duplicate {field}: {value}")]
    Conflict { field: &'static str, value: String },

    /// Schema missing; the explicit init step was never run
    #[error("database {0} is not initialized (run 'foiadesk init' first)")]
    Uninitialized(String),

    #[error("unsupported schema version {found} (this build expects {expected})")]
    SchemaVersion { found: i32, expected: i32 },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("malformed list column: {0}")]
    Codec(#[from] serde_json::Error),
}

impl DeskError {
    /// True when the error is a uniqueness conflict on the given column
    pub fn is_conflict_on(&self, column: &str) -> bool {
        matches!(self, DeskError::Conflict { field, .. } if *field == column)
    }
}

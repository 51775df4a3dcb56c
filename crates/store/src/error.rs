//! Store error types.

use thiserror::Error;

/// Errors raised by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record does not exist or belongs to another user.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Record kind, e.g. `"driver"`.
        entity: &'static str,
        /// Requested identifier.
        id: String,
    },

    /// Record with the same identifier already exists.
    #[error("{entity} already exists: {id}")]
    Duplicate {
        /// Record kind.
        entity: &'static str,
        /// Conflicting identifier.
        id: String,
    },

    /// Snapshot file could not be read or written.
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file is not valid JSON for the record model.
    #[error("snapshot is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl StoreError {
    /// Builds a `NotFound` error.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

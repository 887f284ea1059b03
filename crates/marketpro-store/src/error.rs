//! # Storage Error Types
//!
//! Failures the persistence layer can actually surface. Note what is
//! *not* here: an unreadable persisted blob is recovered by reseeding
//! (logged, never raised), and not-found conditions inside operations
//! are silent no-ops by contract.

use marketpro_core::ValidationError;
use thiserror::Error;

/// Errors surfaced by the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the state for persistence failed.
    #[error("state serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An operation rejected its input (e.g. non-positive installment).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

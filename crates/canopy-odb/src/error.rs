//! Error types for commit store operations.

use canopy_types::CommitId;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested commit was not found.
    #[error("object not found: {0}")]
    NotFound(CommitId),

    /// Encoding or decoding a commit failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

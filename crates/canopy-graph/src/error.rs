//! Error types for graph traversal and analysis.

use canopy_odb::StoreError;
use canopy_types::CommitId;

/// Errors from revision walking.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// A pushed or hidden id, or a parent edge, did not resolve to a commit.
    #[error("object not found: {0:?}")]
    ObjectNotFound(CommitId),

    /// The walk failed earlier and must be reset before reuse.
    #[error("walk is poisoned; reset before reuse")]
    Poisoned,

    /// Tips cannot be pushed or hidden once iteration has begun.
    #[error("walk already started; reset before seeding new tips")]
    AlreadyStarted,

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for walk operations.
pub type WalkResult<T> = Result<T, WalkError>;

/// Errors from commit-graph analysis.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The two tips share no history.
    #[error("no common ancestor between {a:?} and {b:?}")]
    NoCommonAncestor { a: CommitId, b: CommitId },

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for analysis operations.
pub type GraphResult<T> = Result<T, GraphError>;

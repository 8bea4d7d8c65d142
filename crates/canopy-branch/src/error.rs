//! Error types for branch operations.

use canopy_graph::{GraphError, WalkError};
use canopy_odb::StoreError;
use canopy_refs::RefError;
use canopy_types::CommitId;

/// Errors that can occur during branch operations.
#[derive(Debug, thiserror::Error)]
pub enum BranchError {
    /// No reference with this name exists.
    #[error("reference not found: {name}")]
    ReferenceNotFound { name: String },

    /// Operation on a deleted or otherwise invalidated reference.
    #[error("operation on an invalid or deleted reference")]
    InvalidReference,

    /// The reference target does not resolve to a commit.
    #[error("object not found: {0:?}")]
    ObjectNotFound(CommitId),

    /// The two branch tips share no history.
    #[error("no common ancestor between {a:?} and {b:?}")]
    NoCommonAncestor { a: CommitId, b: CommitId },

    /// The upstream of this branch is configured but could not be resolved.
    #[error("tracking resolution failed: {0}")]
    TrackingResolution(#[source] RefError),

    /// Merge-base or divergence computation failed.
    #[error("graph traversal failed: {0}")]
    GraphTraversal(#[source] GraphError),

    /// Removing the reference from storage failed.
    #[error("failed to delete {name}: {source}")]
    DeleteFailed {
        name: String,
        #[source]
        source: RefError,
    },

    /// A revision walk failed.
    #[error("enumeration failed: {0}")]
    Enumeration(#[source] WalkError),

    /// The reference resolver failed.
    #[error("resolver error: {0}")]
    Resolver(#[from] RefError),

    /// The object store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for branch operations.
pub type BranchResult<T> = Result<T, BranchError>;

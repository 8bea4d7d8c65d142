//! The [`RefResolver`] trait defining the reference resolution interface.
//!
//! Any backend (in-memory, filesystem, database) implements this trait to
//! provide named reference lookup, upstream tracking, and deletion for the
//! branch layer.

use crate::error::RefResult;
use crate::names::{LOCAL_NAMESPACE, REMOTE_NAMESPACE};
use crate::types::Reference;

/// Resolution backend for named references.
///
/// Implementations must be thread-safe (`Send + Sync`). The namespace
/// follows a hierarchical layout:
///
/// - `refs/heads/*` for local branches
/// - `refs/remotes/{remote}/*` for remote-tracking branches
pub trait RefResolver: Send + Sync {
    /// Resolve a ref by its full name (e.g. "refs/heads/main").
    ///
    /// Returns `Ok(None)` if no such ref exists.
    fn resolve(&self, name: &str) -> RefResult<Option<Reference>>;

    /// The upstream (tracking) reference configured for a local branch.
    ///
    /// Returns `Ok(None)` when no upstream is configured — that is a normal
    /// outcome, not an error. Returns `Err` when an upstream is configured
    /// but cannot be resolved.
    fn upstream_of(&self, reference: &Reference) -> RefResult<Option<Reference>>;

    /// Delete a ref from storage.
    ///
    /// Returns `Ok(true)` if the ref existed and was deleted, `Ok(false)` if
    /// it did not exist.
    fn delete(&self, reference: &Reference) -> RefResult<bool>;

    /// List all refs whose full name starts with `prefix`, sorted by name.
    ///
    /// Pass `""` to list all refs.
    fn list(&self, prefix: &str) -> RefResult<Vec<Reference>>;

    /// List all local branch refs.
    fn local_branches(&self) -> RefResult<Vec<Reference>> {
        self.list(LOCAL_NAMESPACE)
    }

    /// List all remote-tracking branch refs.
    fn remote_branches(&self) -> RefResult<Vec<Reference>> {
        self.list(REMOTE_NAMESPACE)
    }
}

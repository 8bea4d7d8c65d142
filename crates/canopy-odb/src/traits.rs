//! The [`ObjectStore`] trait defining the commit storage interface.
//!
//! Any backend (in-memory, filesystem, database) implements this trait to
//! supply commits to the branch and graph layers.

use canopy_types::CommitId;

use crate::commit::Commit;
use crate::error::{StoreError, StoreResult};

/// Content-addressed commit store.
///
/// All implementations must satisfy these invariants:
/// - Commits are immutable once written; the same content always maps to
///   the same id.
/// - Concurrent reads are always safe.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Read a commit by its content-addressed id.
    ///
    /// Returns `Ok(None)` if the commit does not exist.
    /// Returns `Err` on I/O failure or data corruption.
    fn read_commit(&self, id: &CommitId) -> StoreResult<Option<Commit>>;

    /// Write a commit and return its id.
    ///
    /// If the commit already exists, this is a no-op (idempotent).
    fn write_commit(&self, commit: &Commit) -> StoreResult<CommitId>;

    /// Check whether a commit exists in the store.
    fn contains(&self, id: &CommitId) -> StoreResult<bool>;

    /// Read a commit that is expected to exist.
    ///
    /// Maps a missing commit to [`StoreError::NotFound`]. Graph walks use
    /// this when following parent edges that should never dangle.
    fn require_commit(&self, id: &CommitId) -> StoreResult<Commit> {
        self.read_commit(id)?.ok_or(StoreError::NotFound(*id))
    }

    /// The parent ids of a commit.
    ///
    /// Fails with [`StoreError::NotFound`] if the commit is missing.
    fn parents_of(&self, id: &CommitId) -> StoreResult<Vec<CommitId>> {
        Ok(self.require_commit(id)?.parents)
    }
}

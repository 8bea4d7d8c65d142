//! In-memory commit store for tests and ephemeral use.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use canopy_types::CommitId;

use crate::commit::Commit;
use crate::error::StoreResult;
use crate::traits::ObjectStore;

/// In-memory, HashMap-based commit store.
///
/// Intended for tests and embedding. All commits are held in memory behind a
/// `RwLock` for safe concurrent access and are cloned on read.
pub struct InMemoryObjectStore {
    commits: RwLock<HashMap<CommitId, Commit>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            commits: RwLock::new(HashMap::new()),
        }
    }

    /// Number of commits currently stored.
    pub fn len(&self) -> usize {
        self.commits.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.commits.read().expect("lock poisoned").is_empty()
    }

    /// Remove all commits from the store.
    pub fn clear(&self) {
        self.commits.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read_commit(&self, id: &CommitId) -> StoreResult<Option<Commit>> {
        let map = self.commits.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    fn write_commit(&self, commit: &Commit) -> StoreResult<CommitId> {
        let mut map = self.commits.write().expect("lock poisoned");
        // Idempotent: content-addressing guarantees the same id always maps
        // to the same commit.
        map.entry(commit.id).or_insert_with(|| commit.clone());
        debug!(
            id = %commit.id.short_hex(),
            parents = commit.parents.len(),
            "stored commit"
        );
        Ok(commit.id)
    }

    fn contains(&self, id: &CommitId) -> StoreResult<bool> {
        let map = self.commits.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

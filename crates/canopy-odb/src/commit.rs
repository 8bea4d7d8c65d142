//! The commit object: an immutable snapshot node in the history graph.

use serde::{Deserialize, Serialize};

use canopy_types::{CommitId, CommitTime};

use crate::error::{StoreError, StoreResult};

/// A commit in the history graph.
///
/// Commits are immutable once written. Parents are ordered: the first parent
/// is the branch the commit was made on, later parents come from merges. A
/// commit with no parents is a root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Content-addressed identifier for this commit.
    pub id: CommitId,
    /// Ordered parent commit ids (empty for root commits).
    pub parents: Vec<CommitId>,
    /// The commit author.
    pub author: String,
    /// The full commit message.
    pub message: String,
    /// When the commit was created.
    pub timestamp: CommitTime,
}

/// The fields that participate in content addressing. The id itself is
/// excluded, since it is derived from this encoding.
#[derive(Serialize)]
struct CommitPayload<'a> {
    parents: &'a [CommitId],
    author: &'a str,
    message: &'a str,
    timestamp: &'a CommitTime,
}

impl Commit {
    /// Create a commit, computing its id from the canonical byte encoding
    /// of the payload fields.
    pub fn new(
        author: impl Into<String>,
        message: impl Into<String>,
        timestamp: CommitTime,
        parents: Vec<CommitId>,
    ) -> StoreResult<Self> {
        let author = author.into();
        let message = message.into();
        let payload = CommitPayload {
            parents: &parents,
            author: &author,
            message: &message,
            timestamp: &timestamp,
        };
        let bytes =
            bincode::serialize(&payload).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Self {
            id: CommitId::from_content(&bytes),
            parents,
            author,
            message,
            timestamp,
        })
    }

    /// Returns `true` if this commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Number of parents.
    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    /// The first line of the commit message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(message: &str, parents: Vec<CommitId>) -> Commit {
        Commit::new("alice", message, CommitTime::new(1000, 0), parents).unwrap()
    }

    #[test]
    fn id_is_deterministic() {
        let a = commit("initial", vec![]);
        let b = commit("initial", vec![]);
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn id_changes_with_message() {
        let a = commit("one", vec![]);
        let b = commit("two", vec![]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn id_changes_with_parents() {
        let root = commit("root", vec![]);
        let a = commit("child", vec![root.id]);
        let b = commit("child", vec![]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn root_detection() {
        let root = commit("root", vec![]);
        assert!(root.is_root());
        let child = commit("child", vec![root.id]);
        assert!(!child.is_root());
        assert_eq!(child.parent_count(), 1);
    }

    #[test]
    fn summary_is_first_line() {
        let c = commit("fix parser\n\nlonger body text", vec![]);
        assert_eq!(c.summary(), "fix parser");
    }
}

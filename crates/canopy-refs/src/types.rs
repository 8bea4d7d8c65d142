//! The resolved reference record.

use serde::{Deserialize, Serialize};

use canopy_types::CommitId;

use crate::names;

/// A named, resolved pointer into the commit graph.
///
/// A reference is either *valid* (its target is resolvable) or *invalid*
/// (deleted, or resolution failed). Invariant: a valid reference always has
/// a target; [`Reference::target`] reports `None` once the reference has
/// been invalidated, whatever was stored before.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    name: String,
    target: Option<CommitId>,
    valid: bool,
}

impl Reference {
    /// A valid reference pointing directly at a commit.
    pub fn direct(name: impl Into<String>, target: CommitId) -> Self {
        Self {
            name: name.into(),
            target: Some(target),
            valid: true,
        }
    }

    /// An invalid reference: the name is known but resolution failed.
    pub fn broken(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
            valid: false,
        }
    }

    /// The full ref name (e.g. `refs/heads/main`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The short display form of the name (namespace prefix stripped).
    pub fn short_name(&self) -> &str {
        names::short_name(&self.name)
    }

    /// The commit this reference points at, or `None` if invalid.
    pub fn target(&self) -> Option<CommitId> {
        if self.valid {
            self.target
        } else {
            None
        }
    }

    /// Returns `true` while the reference has not been invalidated.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns `true` if the name lives under the remote namespace.
    pub fn is_remote(&self) -> bool {
        names::is_remote_name(&self.name)
    }

    /// Returns `true` if this is a local (non-remote) reference.
    pub fn is_local(&self) -> bool {
        !self.is_remote()
    }

    /// Mark the reference defunct after its storage entry was deleted.
    ///
    /// The target is cleared; derived accessors report absence from here on.
    pub fn invalidate(&mut self) {
        self.target = None;
        self.valid = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> CommitId {
        CommitId::from_raw([byte; 32])
    }

    #[test]
    fn direct_reference_is_valid() {
        let r = Reference::direct("refs/heads/main", id(1));
        assert!(r.is_valid());
        assert_eq!(r.target(), Some(id(1)));
        assert_eq!(r.short_name(), "main");
        assert!(r.is_local());
    }

    #[test]
    fn broken_reference_has_no_target() {
        let r = Reference::broken("refs/heads/gone");
        assert!(!r.is_valid());
        assert_eq!(r.target(), None);
    }

    #[test]
    fn invalidate_clears_target() {
        let mut r = Reference::direct("refs/heads/main", id(1));
        r.invalidate();
        assert!(!r.is_valid());
        assert_eq!(r.target(), None);
        // The name survives as a defunct handle.
        assert_eq!(r.name(), "refs/heads/main");
    }

    #[test]
    fn remote_detection_from_namespace() {
        let remote = Reference::direct("refs/remotes/origin/main", id(2));
        assert!(remote.is_remote());
        assert_eq!(remote.short_name(), "origin/main");

        let local = Reference::direct("refs/heads/main", id(2));
        assert!(!local.is_remote());
    }
}

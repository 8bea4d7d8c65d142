//! The branch entity and its relative-history operations.

use std::fmt;

use tracing::debug;

use canopy_graph::{GraphError, Sort};
use canopy_odb::{Commit, ObjectStore};
use canopy_refs::{names, RefResolver, Reference};
use canopy_types::CommitId;

use crate::error::{BranchError, BranchResult};
use crate::repo::Repo;

/// Whether a branch is local or remote-tracking, derived solely from the
/// namespace its reference lives under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchKind {
    /// Lives under `refs/heads/`.
    Local,
    /// Lives under `refs/remotes/`.
    Remote,
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// A branch: one reference plus the repository context it belongs to.
///
/// Equality compares name AND target — two handles are equal only when they
/// name the same ref and point at the same commit. After [`Branch::delete`]
/// the handle survives as defunct: `short_name`, `remote_name` and `target`
/// become `None` and history operations fail with
/// [`BranchError::InvalidReference`].
#[derive(Clone)]
pub struct Branch {
    repo: Repo,
    reference: Reference,
}

impl Branch {
    /// Look a branch up by its full ref name (e.g. `refs/heads/main`).
    ///
    /// Fails with [`BranchError::ReferenceNotFound`] when no such reference
    /// exists; resolver failures surface as [`BranchError::Resolver`].
    pub fn lookup(repo: &Repo, name: &str) -> BranchResult<Branch> {
        match repo.refs().resolve(name)? {
            Some(reference) => Ok(Self::from_reference(reference, repo.clone())),
            None => Err(BranchError::ReferenceNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Wrap an already-resolved reference. Always succeeds.
    pub fn from_reference(reference: Reference, repo: Repo) -> Branch {
        Self { repo, reference }
    }

    /// The full ref name.
    pub fn name(&self) -> &str {
        self.reference.name()
    }

    /// Local or remote, from the reference namespace alone.
    pub fn kind(&self) -> BranchKind {
        if self.reference.is_remote() {
            BranchKind::Remote
        } else {
            BranchKind::Local
        }
    }

    /// The display name: the ref's short form with, for remote branches,
    /// the leading remote segment dropped. `None` once the reference is
    /// invalid.
    pub fn short_name(&self) -> Option<&str> {
        if !self.reference.is_valid() {
            return None;
        }
        let short = self.reference.short_name();
        match self.kind() {
            BranchKind::Local => Some(short),
            BranchKind::Remote => Some(
                names::split_remote(short)
                    .map(|(_, branch)| branch)
                    .unwrap_or(short),
            ),
        }
    }

    /// The remote this branch belongs to: the first segment of the short
    /// display form. Only remote branches with a valid reference have one;
    /// local branches always report `None`.
    pub fn remote_name(&self) -> Option<&str> {
        if !self.reference.is_valid() || self.kind() != BranchKind::Remote {
            return None;
        }
        names::split_remote(self.reference.short_name()).map(|(remote, _)| remote)
    }

    /// The commit the branch points at, or `None` if the reference is
    /// invalid.
    pub fn target(&self) -> Option<CommitId> {
        self.reference.target()
    }

    /// Materialize the commit at the branch tip.
    ///
    /// Fails with [`BranchError::InvalidReference`] when there is no target
    /// and with [`BranchError::ObjectNotFound`] when the hash dangles.
    pub fn target_commit(&self) -> BranchResult<Commit> {
        let tip = self.tip()?;
        self.repo
            .objects()
            .read_commit(&tip)?
            .ok_or(BranchError::ObjectNotFound(tip))
    }

    /// Total number of commits reachable from the branch tip, tip included.
    pub fn commit_count(&self) -> BranchResult<usize> {
        let tip = self.tip()?;
        let mut walk = self.repo.walk(Sort::Time);
        walk.push(tip).map_err(BranchError::Enumeration)?;
        walk.count_remaining().map_err(BranchError::Enumeration)
    }

    /// The commits on this branch that are not in `other`'s history:
    /// everything reachable from this tip minus the ancestry of the merge
    /// base of the two tips, most recent first.
    ///
    /// Fails with [`BranchError::NoCommonAncestor`] when the branches share
    /// no history, and [`BranchError::InvalidReference`] when either side
    /// has no target.
    pub fn unique_commits(&self, other: &Branch) -> BranchResult<Vec<Commit>> {
        let tip = self.tip()?;
        let other_tip = other.tip()?;

        let base = self
            .repo
            .analyzer()
            .merge_base(tip, other_tip)
            .map_err(|e| match e {
                GraphError::NoCommonAncestor { a, b } => BranchError::NoCommonAncestor { a, b },
                other => BranchError::GraphTraversal(other),
            })?;

        let mut walk = self.repo.walk(Sort::Time);
        walk.push(tip).map_err(BranchError::Enumeration)?;
        walk.hide(base).map_err(BranchError::Enumeration)?;
        walk.all().map_err(BranchError::Enumeration)
    }

    /// Divergence between this branch and `other`.
    ///
    /// With no branch to compare against there is no divergence: `None`
    /// gives `(0, 0)`. Otherwise `ahead` counts commits only on this
    /// branch, `behind` commits only on `other`.
    pub fn ahead_behind(&self, other: Option<&Branch>) -> BranchResult<(usize, usize)> {
        let Some(other) = other else {
            return Ok((0, 0));
        };
        let tip = self.tip()?;
        let other_tip = other.tip()?;
        self.repo
            .analyzer()
            .ahead_behind(tip, other_tip)
            .map_err(BranchError::GraphTraversal)
    }

    /// The remote branch this branch tracks.
    ///
    /// A remote branch tracks itself and is returned unchanged. For a local
    /// branch the resolver is asked for the configured upstream: none
    /// configured is `Ok(None)`, a resolution failure is
    /// [`BranchError::TrackingResolution`].
    pub fn tracking_branch(&self) -> BranchResult<Option<Branch>> {
        if self.kind() == BranchKind::Remote {
            return Ok(Some(self.clone()));
        }
        if !self.reference.is_valid() {
            return Err(BranchError::InvalidReference);
        }
        match self.repo.refs().upstream_of(&self.reference) {
            Ok(None) => Ok(None),
            Ok(Some(upstream)) => Ok(Some(Self::from_reference(upstream, self.repo.clone()))),
            Err(e) => Err(BranchError::TrackingResolution(e)),
        }
    }

    /// Remove the underlying reference from storage and invalidate this
    /// handle.
    ///
    /// Fails with [`BranchError::InvalidReference`] when already deleted,
    /// [`BranchError::ReferenceNotFound`] when the ref vanished underneath
    /// this handle, and [`BranchError::DeleteFailed`] on a storage-level
    /// failure. Never retried.
    pub fn delete(&mut self) -> BranchResult<()> {
        if !self.reference.is_valid() {
            return Err(BranchError::InvalidReference);
        }
        match self.repo.refs().delete(&self.reference) {
            Ok(true) => {
                debug!(name = self.reference.name(), "deleted branch");
                self.reference.invalidate();
                Ok(())
            }
            Ok(false) => Err(BranchError::ReferenceNotFound {
                name: self.reference.name().to_string(),
            }),
            Err(e) => Err(BranchError::DeleteFailed {
                name: self.reference.name().to_string(),
                source: e,
            }),
        }
    }

    fn tip(&self) -> BranchResult<CommitId> {
        self.target().ok_or(BranchError::InvalidReference)
    }
}

impl PartialEq for Branch {
    /// Branches are equal iff both name and target are equal.
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.target() == other.target()
    }
}

impl Eq for Branch {}

impl fmt::Debug for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branch")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("target", &self.target())
            .finish()
    }
}

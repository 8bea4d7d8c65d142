//! The branch layer of Canopy.
//!
//! A [`Branch`] wraps one resolved [`Reference`] together with a [`Repo`]
//! handle, and exposes the relative-history operations built on the graph
//! engine: unique-commit enumeration, ahead/behind divergence, tracking
//! (upstream) resolution, commit counting, and deletion.
//!
//! A branch survives the deletion of its reference as a defunct handle: its
//! derived accessors report absence and history operations fail with
//! [`BranchError::InvalidReference`].
//!
//! [`Reference`]: canopy_refs::Reference

pub mod branch;
pub mod error;
pub mod repo;

pub use branch::{Branch, BranchKind};
pub use error::{BranchError, BranchResult};
pub use repo::Repo;

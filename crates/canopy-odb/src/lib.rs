//! Commit object storage for Canopy.
//!
//! This crate defines the [`Commit`] value type and the [`ObjectStore`]
//! capability trait that the branch and graph layers consume. Commits are
//! content-addressed: the [`CommitId`] of a commit is the BLAKE3 hash of its
//! canonical byte encoding, so identical commits always share an id.
//!
//! # Modules
//!
//! - [`error`] — Error types for store operations
//! - [`commit`] — The [`Commit`] value type
//! - [`traits`] — The [`ObjectStore`] trait defining the storage interface
//! - [`memory`] — In-memory [`InMemoryObjectStore`] for tests and embedding
//!
//! [`CommitId`]: canopy_types::CommitId

pub mod commit;
pub mod error;
pub mod memory;
pub mod traits;

pub use commit::Commit;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use traits::ObjectStore;

//! Reference resolution for Canopy.
//!
//! References are named pointers into the commit graph. Local branches live
//! under `refs/heads/`, remote-tracking branches under `refs/remotes/`. A
//! [`Reference`] is the resolved record a branch wraps; the [`RefResolver`]
//! trait is the capability interface the branch layer consumes to look up,
//! delete, and upstream-resolve references.
//!
//! A reference can be *invalidated*: once its backing storage entry is
//! deleted, the record stays around as a defunct handle whose target and
//! derived names are no longer available.
//!
//! # Modules
//!
//! - [`error`] — Error types for reference operations
//! - [`types`] — The [`Reference`] record
//! - [`traits`] — The [`RefResolver`] trait defining the resolution interface
//! - [`names`] — Ref-name namespaces, parsing, and validation
//! - [`memory`] — In-memory [`InMemoryRefResolver`] for tests

pub mod error;
pub mod memory;
pub mod names;
pub mod traits;
pub mod types;

pub use error::{RefError, RefResult};
pub use memory::InMemoryRefResolver;
pub use names::{split_remote, validate_branch_name, LOCAL_NAMESPACE, REMOTE_NAMESPACE};
pub use traits::RefResolver;
pub use types::Reference;

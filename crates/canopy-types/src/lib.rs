//! Foundation types for Canopy.
//!
//! This crate provides the identifier and timestamp types used throughout
//! the Canopy branch and commit-graph subsystem. Every other Canopy crate
//! depends on `canopy-types`.
//!
//! # Key Types
//!
//! - [`CommitId`] — Content-addressed commit identifier (BLAKE3 hash)
//! - [`CommitTime`] — Commit timestamp with timezone offset, totally ordered
//! - [`TypeError`] — Parse and conversion failures

pub mod error;
pub mod id;
pub mod time;

pub use error::TypeError;
pub use id::CommitId;
pub use time::CommitTime;

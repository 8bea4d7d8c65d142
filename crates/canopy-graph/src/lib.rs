//! Commit-graph traversal and analysis for Canopy.
//!
//! Two engines over the [`ObjectStore`] capability:
//!
//! - [`RevWalk`] — a restartable revision walk with push/hide semantics:
//!   pushed tips seed inclusion, hidden tips exclude their entire ancestry,
//!   and output comes in time-descending or topological order.
//! - [`GraphAnalyzer`] — relative-history queries between two tips: merge
//!   base discovery and ahead/behind divergence counting.
//!
//! Both run to completion or fail outright; there is no cancellation. All
//! traversal uses explicit visited-set bookkeeping and terminates on
//! arbitrarily shared history.
//!
//! [`ObjectStore`]: canopy_odb::ObjectStore

pub mod analyze;
pub mod error;
pub mod walk;

pub use analyze::GraphAnalyzer;
pub use error::{GraphError, GraphResult, WalkError, WalkResult};
pub use walk::{RevWalk, Sort};

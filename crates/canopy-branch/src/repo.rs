//! The repository context handle.

use std::fmt;
use std::sync::Arc;

use canopy_graph::{GraphAnalyzer, RevWalk, Sort};
use canopy_odb::ObjectStore;
use canopy_refs::RefResolver;

/// Shared handle over the two collaborators a branch needs: the commit
/// object store and the reference resolver.
///
/// Cloning is cheap (two `Arc`s). The store is read-mostly and safe to share
/// across callers; reference deletion on branches sharing a reference needs
/// external synchronization.
#[derive(Clone)]
pub struct Repo {
    objects: Arc<dyn ObjectStore>,
    refs: Arc<dyn RefResolver>,
}

impl Repo {
    /// Create a context over the given collaborators.
    pub fn new(objects: Arc<dyn ObjectStore>, refs: Arc<dyn RefResolver>) -> Self {
        Self { objects, refs }
    }

    /// The commit object store.
    pub fn objects(&self) -> &Arc<dyn ObjectStore> {
        &self.objects
    }

    /// The reference resolver.
    pub fn refs(&self) -> &Arc<dyn RefResolver> {
        &self.refs
    }

    /// A fresh revision walk over this repository's store.
    pub fn walk(&self, sort: Sort) -> RevWalk {
        RevWalk::new(self.objects.clone(), sort)
    }

    /// A graph analyzer over this repository's store.
    pub fn analyzer(&self) -> GraphAnalyzer {
        GraphAnalyzer::new(self.objects.clone())
    }
}

impl fmt::Debug for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repo").finish_non_exhaustive()
    }
}

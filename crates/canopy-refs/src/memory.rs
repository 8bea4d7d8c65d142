//! In-memory reference resolver for testing and ephemeral use.
//!
//! [`InMemoryRefResolver`] keeps ref targets and upstream configuration in
//! `HashMap`s protected by `RwLock`s. It implements the full [`RefResolver`]
//! trait and is suitable for unit tests and short-lived processes.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use canopy_types::CommitId;

use crate::error::{RefError, RefResult};
use crate::names::{self, validate_branch_name};
use crate::traits::RefResolver;
use crate::types::Reference;

/// An in-memory implementation of [`RefResolver`].
///
/// Data is lost when the resolver is dropped. Upstream configuration maps a
/// local ref name to the full name of the remote ref it tracks.
#[derive(Debug, Default)]
pub struct InMemoryRefResolver {
    refs: RwLock<HashMap<String, CommitId>>,
    upstreams: RwLock<HashMap<String, String>>,
}

impl InMemoryRefResolver {
    /// Create a new empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or update a ref. The short form of the name is validated.
    pub fn set_ref(&self, name: &str, target: CommitId) -> RefResult<()> {
        validate_branch_name(names::short_name(name))?;
        let mut refs = self.lock_refs_mut()?;
        refs.insert(name.to_string(), target);
        debug!(name, target = %target.short_hex(), "set ref");
        Ok(())
    }

    /// Configure `local` (a full local ref name) to track `remote` (a full
    /// remote ref name). The remote ref does not have to exist yet; a
    /// dangling upstream surfaces as an error at resolution time.
    pub fn set_upstream(&self, local: &str, remote: &str) -> RefResult<()> {
        if !names::is_remote_name(remote) {
            return Err(RefError::InvalidName {
                name: remote.to_string(),
                reason: "upstream must live under refs/remotes/".into(),
            });
        }
        let mut upstreams = self
            .upstreams
            .write()
            .map_err(|e| RefError::Backend(format!("lock poisoned: {e}")))?;
        upstreams.insert(local.to_string(), remote.to_string());
        debug!(local, remote, "set upstream");
        Ok(())
    }

    fn lock_refs(&self) -> RefResult<std::sync::RwLockReadGuard<'_, HashMap<String, CommitId>>> {
        self.refs
            .read()
            .map_err(|e| RefError::Backend(format!("lock poisoned: {e}")))
    }

    fn lock_refs_mut(
        &self,
    ) -> RefResult<std::sync::RwLockWriteGuard<'_, HashMap<String, CommitId>>> {
        self.refs
            .write()
            .map_err(|e| RefError::Backend(format!("lock poisoned: {e}")))
    }
}

impl RefResolver for InMemoryRefResolver {
    fn resolve(&self, name: &str) -> RefResult<Option<Reference>> {
        let refs = self.lock_refs()?;
        Ok(refs.get(name).map(|id| Reference::direct(name, *id)))
    }

    fn upstream_of(&self, reference: &Reference) -> RefResult<Option<Reference>> {
        let upstream_name = {
            let upstreams = self
                .upstreams
                .read()
                .map_err(|e| RefError::Backend(format!("lock poisoned: {e}")))?;
            match upstreams.get(reference.name()) {
                Some(name) => name.clone(),
                None => return Ok(None),
            }
        };

        let refs = self.lock_refs()?;
        match refs.get(&upstream_name) {
            Some(id) => Ok(Some(Reference::direct(&upstream_name, *id))),
            None => Err(RefError::UpstreamResolution {
                name: reference.name().to_string(),
                reason: format!("configured upstream {upstream_name} does not exist"),
            }),
        }
    }

    fn delete(&self, reference: &Reference) -> RefResult<bool> {
        let existed = {
            let mut refs = self.lock_refs_mut()?;
            refs.remove(reference.name()).is_some()
        };
        if existed {
            let mut upstreams = self
                .upstreams
                .write()
                .map_err(|e| RefError::Backend(format!("lock poisoned: {e}")))?;
            upstreams.remove(reference.name());
            debug!(name = reference.name(), "deleted ref");
        }
        Ok(existed)
    }

    fn list(&self, prefix: &str) -> RefResult<Vec<Reference>> {
        let refs = self.lock_refs()?;
        let mut result: Vec<Reference> = refs
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, id)| Reference::direct(name, *id))
            .collect();
        result.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> CommitId {
        CommitId::from_raw([byte; 32])
    }

    // ---- Resolution ----

    #[test]
    fn resolve_existing_ref() {
        let resolver = InMemoryRefResolver::new();
        resolver.set_ref("refs/heads/main", id(1)).unwrap();

        let r = resolver.resolve("refs/heads/main").unwrap().unwrap();
        assert_eq!(r.name(), "refs/heads/main");
        assert_eq!(r.target(), Some(id(1)));
        assert!(r.is_valid());
    }

    #[test]
    fn resolve_missing_ref_returns_none() {
        let resolver = InMemoryRefResolver::new();
        assert!(resolver.resolve("refs/heads/nope").unwrap().is_none());
    }

    #[test]
    fn set_ref_rejects_invalid_names() {
        let resolver = InMemoryRefResolver::new();
        let err = resolver.set_ref("refs/heads/bad..name", id(1)).unwrap_err();
        assert!(matches!(err, RefError::InvalidName { .. }));
    }

    // ---- Upstream tracking ----

    #[test]
    fn upstream_not_configured_is_none() {
        let resolver = InMemoryRefResolver::new();
        resolver.set_ref("refs/heads/main", id(1)).unwrap();
        let r = resolver.resolve("refs/heads/main").unwrap().unwrap();

        assert!(resolver.upstream_of(&r).unwrap().is_none());
    }

    #[test]
    fn upstream_resolves_to_remote_ref() {
        let resolver = InMemoryRefResolver::new();
        resolver.set_ref("refs/heads/main", id(1)).unwrap();
        resolver.set_ref("refs/remotes/origin/main", id(2)).unwrap();
        resolver
            .set_upstream("refs/heads/main", "refs/remotes/origin/main")
            .unwrap();

        let r = resolver.resolve("refs/heads/main").unwrap().unwrap();
        let upstream = resolver.upstream_of(&r).unwrap().unwrap();
        assert_eq!(upstream.name(), "refs/remotes/origin/main");
        assert_eq!(upstream.target(), Some(id(2)));
        assert!(upstream.is_remote());
    }

    #[test]
    fn dangling_upstream_is_an_error() {
        let resolver = InMemoryRefResolver::new();
        resolver.set_ref("refs/heads/main", id(1)).unwrap();
        resolver
            .set_upstream("refs/heads/main", "refs/remotes/origin/main")
            .unwrap();

        let r = resolver.resolve("refs/heads/main").unwrap().unwrap();
        let err = resolver.upstream_of(&r).unwrap_err();
        assert!(matches!(err, RefError::UpstreamResolution { .. }));
    }

    #[test]
    fn set_upstream_requires_remote_namespace() {
        let resolver = InMemoryRefResolver::new();
        let err = resolver
            .set_upstream("refs/heads/main", "refs/heads/other")
            .unwrap_err();
        assert!(matches!(err, RefError::InvalidName { .. }));
    }

    // ---- Deletion ----

    #[test]
    fn delete_existing_ref() {
        let resolver = InMemoryRefResolver::new();
        resolver.set_ref("refs/heads/feature", id(3)).unwrap();
        let r = resolver.resolve("refs/heads/feature").unwrap().unwrap();

        assert!(resolver.delete(&r).unwrap());
        assert!(resolver.resolve("refs/heads/feature").unwrap().is_none());
    }

    #[test]
    fn delete_missing_ref_returns_false() {
        let resolver = InMemoryRefResolver::new();
        let ghost = Reference::direct("refs/heads/ghost", id(9));
        assert!(!resolver.delete(&ghost).unwrap());
    }

    #[test]
    fn delete_drops_upstream_configuration() {
        let resolver = InMemoryRefResolver::new();
        resolver.set_ref("refs/heads/main", id(1)).unwrap();
        resolver.set_ref("refs/remotes/origin/main", id(2)).unwrap();
        resolver
            .set_upstream("refs/heads/main", "refs/remotes/origin/main")
            .unwrap();

        let r = resolver.resolve("refs/heads/main").unwrap().unwrap();
        resolver.delete(&r).unwrap();

        // Re-creating the branch starts without an upstream.
        resolver.set_ref("refs/heads/main", id(4)).unwrap();
        let r = resolver.resolve("refs/heads/main").unwrap().unwrap();
        assert!(resolver.upstream_of(&r).unwrap().is_none());
    }

    // ---- Listing ----

    #[test]
    fn list_filters_by_prefix_and_sorts() {
        let resolver = InMemoryRefResolver::new();
        resolver.set_ref("refs/heads/main", id(1)).unwrap();
        resolver.set_ref("refs/heads/develop", id(2)).unwrap();
        resolver.set_ref("refs/remotes/origin/main", id(3)).unwrap();

        let locals = resolver.local_branches().unwrap();
        assert_eq!(locals.len(), 2);
        assert_eq!(locals[0].name(), "refs/heads/develop");
        assert_eq!(locals[1].name(), "refs/heads/main");

        let remotes = resolver.remote_branches().unwrap();
        assert_eq!(remotes.len(), 1);
        assert_eq!(remotes[0].name(), "refs/remotes/origin/main");
    }
}

//! Push/hide revision walking.
//!
//! A [`RevWalk`] starts from *pushed* tips and yields them and their full
//! ancestry, minus everything reachable from *hidden* tips. Hidden ancestry
//! wins: a commit reachable from both a pushed and a hidden tip is excluded.
//!
//! The walk is prepared lazily on first consumption and is not restartable
//! mid-walk — call [`RevWalk::reset`] to start over. A failed push or hide
//! poisons the walk; a poisoned walk yields nothing and its draining
//! operations fail until reset.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tracing::debug;

use canopy_odb::{Commit, ObjectStore};
use canopy_types::{CommitId, CommitTime};

use crate::error::{WalkError, WalkResult};

/// Output ordering for a revision walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sort {
    /// Commit timestamp descending; ties break by discovery order.
    Time,
    /// Topological: a commit is yielded only after every output-eligible
    /// child has been yielded.
    Topological,
}

/// A restartable revision walk over the commit graph.
pub struct RevWalk {
    store: Arc<dyn ObjectStore>,
    sort: Sort,
    pushed: Vec<CommitId>,
    hidden: Vec<CommitId>,
    prepared: Option<VecDeque<Commit>>,
    poisoned: bool,
}

impl RevWalk {
    /// Create an empty walk over the given store.
    pub fn new(store: Arc<dyn ObjectStore>, sort: Sort) -> Self {
        Self {
            store,
            sort,
            pushed: Vec::new(),
            hidden: Vec::new(),
            prepared: None,
            poisoned: false,
        }
    }

    /// Seed the walk with a tip to include, along with its full ancestry.
    ///
    /// Fails with [`WalkError::ObjectNotFound`] if the id does not resolve;
    /// the walk is poisoned afterwards and must be reset before reuse.
    pub fn push(&mut self, id: CommitId) -> WalkResult<()> {
        self.seed(id, true)
    }

    /// Seed the walk with a tip whose entire ancestry is excluded from
    /// output, even where it overlaps pushed ancestry.
    ///
    /// Same failure behavior as [`RevWalk::push`].
    pub fn hide(&mut self, id: CommitId) -> WalkResult<()> {
        self.seed(id, false)
    }

    fn seed(&mut self, id: CommitId, push: bool) -> WalkResult<()> {
        if self.poisoned {
            return Err(WalkError::Poisoned);
        }
        if self.prepared.is_some() {
            return Err(WalkError::AlreadyStarted);
        }
        let known = match self.store.contains(&id) {
            Ok(known) => known,
            Err(e) => {
                self.poisoned = true;
                return Err(WalkError::Store(e));
            }
        };
        if !known {
            self.poisoned = true;
            return Err(WalkError::ObjectNotFound(id));
        }
        if push {
            self.pushed.push(id);
        } else {
            self.hidden.push(id);
        }
        Ok(())
    }

    /// Clear all state (pushed/hidden tips, any in-progress iteration, the
    /// poisoned flag) and select a new output ordering.
    pub fn reset(&mut self, sort: Sort) {
        self.sort = sort;
        self.pushed.clear();
        self.hidden.clear();
        self.prepared = None;
        self.poisoned = false;
    }

    /// Drain the remaining sequence, returning how many commits it held.
    pub fn count_remaining(&mut self) -> WalkResult<usize> {
        if self.poisoned {
            return Err(WalkError::Poisoned);
        }
        if let Err(e) = self.prepare() {
            self.poisoned = true;
            return Err(e);
        }
        Ok(match self.prepared.as_mut() {
            Some(queue) => {
                let n = queue.len();
                queue.clear();
                n
            }
            None => 0,
        })
    }

    /// Drain the remaining sequence into a vector in the configured order.
    pub fn all(&mut self) -> WalkResult<Vec<Commit>> {
        if self.poisoned {
            return Err(WalkError::Poisoned);
        }
        if let Err(e) = self.prepare() {
            self.poisoned = true;
            return Err(e);
        }
        Ok(self
            .prepared
            .as_mut()
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default())
    }

    /// Resolve the traversal set and order it. Idempotent.
    fn prepare(&mut self) -> WalkResult<()> {
        if self.prepared.is_some() {
            return Ok(());
        }

        let hidden = ancestry_closure(self.store.as_ref(), &self.hidden)?;

        // Discover everything reachable from the pushed tips that is not
        // shadowed by hidden ancestry. Discovery order is BFS order.
        let mut visited: HashSet<CommitId> = HashSet::new();
        let mut queue: VecDeque<CommitId> = VecDeque::new();
        for id in &self.pushed {
            if !hidden.contains(id) && visited.insert(*id) {
                queue.push_back(*id);
            }
        }
        let mut discovered: Vec<Commit> = Vec::new();
        while let Some(id) = queue.pop_front() {
            let commit = fetch(self.store.as_ref(), &id)?;
            for parent in &commit.parents {
                if !hidden.contains(parent) && visited.insert(*parent) {
                    queue.push_back(*parent);
                }
            }
            discovered.push(commit);
        }

        let ordered = match self.sort {
            Sort::Time => {
                let mut commits = discovered;
                // Stable sort: equal timestamps keep discovery order.
                commits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                commits
            }
            Sort::Topological => topological(discovered),
        };

        debug!(
            pushed = self.pushed.len(),
            hidden = self.hidden.len(),
            commits = ordered.len(),
            "prepared revision walk"
        );
        self.prepared = Some(ordered.into());
        Ok(())
    }
}

impl Iterator for RevWalk {
    type Item = WalkResult<Commit>;

    /// Pull the next commit in the configured order.
    ///
    /// Exhaustion is idempotent: once the sequence ends, every further call
    /// returns `None`. A poisoned walk also returns `None`; the error was
    /// already reported by the failing push or hide.
    fn next(&mut self) -> Option<Self::Item> {
        if self.poisoned {
            return None;
        }
        if self.prepared.is_none() {
            if let Err(e) = self.prepare() {
                self.poisoned = true;
                return Some(Err(e));
            }
        }
        self.prepared.as_mut()?.pop_front().map(Ok)
    }
}

/// Read a commit that a traversal expects to exist.
fn fetch(store: &dyn ObjectStore, id: &CommitId) -> WalkResult<Commit> {
    match store.read_commit(id)? {
        Some(commit) => Ok(commit),
        None => Err(WalkError::ObjectNotFound(*id)),
    }
}

/// Everything reachable from the given tips, tips inclusive.
fn ancestry_closure(store: &dyn ObjectStore, tips: &[CommitId]) -> WalkResult<HashSet<CommitId>> {
    let mut seen: HashSet<CommitId> = tips.iter().copied().collect();
    let mut queue: VecDeque<CommitId> = tips.iter().copied().collect();
    while let Some(id) = queue.pop_front() {
        for parent in fetch(store, &id)?.parents {
            if seen.insert(parent) {
                queue.push_back(parent);
            }
        }
    }
    Ok(seen)
}

/// Order commits so that parents always come after their children.
///
/// `pending` tracks, per commit, how many of its children are still
/// unemitted; a commit becomes ready once that count drains to zero. The
/// seed set (commits with no included children) is ordered newest first,
/// discovery order breaking ties.
fn topological(discovered: Vec<Commit>) -> Vec<Commit> {
    let included: HashSet<CommitId> = discovered.iter().map(|c| c.id).collect();

    let mut pending: HashMap<CommitId, usize> = HashMap::new();
    for commit in &discovered {
        for parent in &commit.parents {
            if included.contains(parent) {
                *pending.entry(*parent).or_insert(0) += 1;
            }
        }
    }

    let mut seeds: Vec<(CommitTime, CommitId)> = discovered
        .iter()
        .filter(|c| !pending.contains_key(&c.id))
        .map(|c| (c.timestamp, c.id))
        .collect();
    seeds.sort_by(|a, b| b.0.cmp(&a.0));

    let mut by_id: HashMap<CommitId, Commit> =
        discovered.into_iter().map(|c| (c.id, c)).collect();
    let mut queue: VecDeque<CommitId> = seeds.into_iter().map(|(_, id)| id).collect();
    let mut out = Vec::with_capacity(by_id.len());

    while let Some(id) = queue.pop_front() {
        let Some(commit) = by_id.remove(&id) else {
            continue;
        };
        for parent in &commit.parents {
            if let Some(n) = pending.get_mut(parent) {
                *n -= 1;
                if *n == 0 {
                    pending.remove(parent);
                    queue.push_back(*parent);
                }
            }
        }
        out.push(commit);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_odb::InMemoryObjectStore;

    fn write(store: &InMemoryObjectStore, seconds: i64, msg: &str, parents: Vec<CommitId>) -> CommitId {
        let commit = Commit::new("alice", msg, CommitTime::new(seconds, 0), parents).unwrap();
        store.write_commit(&commit).unwrap()
    }

    /// Linear chain: c1 <- c2 <- c3 (c3 newest).
    fn linear() -> (Arc<InMemoryObjectStore>, CommitId, CommitId, CommitId) {
        let store = Arc::new(InMemoryObjectStore::new());
        let c1 = write(&store, 1000, "c1", vec![]);
        let c2 = write(&store, 2000, "c2", vec![c1]);
        let c3 = write(&store, 3000, "c3", vec![c2]);
        (store, c1, c2, c3)
    }

    /// Diamond: a <- b, a <- c, {b, c} <- d.
    fn diamond() -> (Arc<InMemoryObjectStore>, [CommitId; 4]) {
        let store = Arc::new(InMemoryObjectStore::new());
        let a = write(&store, 1000, "a", vec![]);
        let b = write(&store, 2000, "b", vec![a]);
        let c = write(&store, 2500, "c", vec![a]);
        let d = write(&store, 3000, "d", vec![b, c]);
        (store, [a, b, c, d])
    }

    // ---- Push semantics ----

    #[test]
    fn walk_yields_tip_and_ancestry() {
        let (store, c1, c2, c3) = linear();
        let mut walk = RevWalk::new(store, Sort::Time);
        walk.push(c3).unwrap();

        let all = walk.all().unwrap();
        let ids: Vec<CommitId> = all.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![c3, c2, c1]);
    }

    #[test]
    fn time_order_is_most_recent_first() {
        let (store, ids) = diamond();
        let mut walk = RevWalk::new(store, Sort::Time);
        walk.push(ids[3]).unwrap();

        let all = walk.all().unwrap();
        let got: Vec<CommitId> = all.iter().map(|c| c.id).collect();
        // d (3000), c (2500), b (2000), a (1000).
        assert_eq!(got, vec![ids[3], ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn count_remaining_drains() {
        let (store, _, _, c3) = linear();
        let mut walk = RevWalk::new(store, Sort::Time);
        walk.push(c3).unwrap();
        assert_eq!(walk.count_remaining().unwrap(), 3);
        // Already drained.
        assert_eq!(walk.count_remaining().unwrap(), 0);
    }

    // ---- Hide semantics ----

    #[test]
    fn hide_excludes_ancestry() {
        let (store, _, c2, c3) = linear();
        let mut walk = RevWalk::new(store, Sort::Time);
        walk.push(c3).unwrap();
        walk.hide(c2).unwrap();

        let all = walk.all().unwrap();
        let ids: Vec<CommitId> = all.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![c3]);
    }

    #[test]
    fn hiding_the_pushed_tip_yields_nothing() {
        let (store, _, _, c3) = linear();
        let mut walk = RevWalk::new(store, Sort::Time);
        walk.push(c3).unwrap();
        walk.hide(c3).unwrap();
        assert_eq!(walk.count_remaining().unwrap(), 0);
    }

    #[test]
    fn shared_ancestry_stays_hidden() {
        // Hiding one side of the diamond removes the shared root too.
        let (store, ids) = diamond();
        let mut walk = RevWalk::new(store, Sort::Time);
        walk.push(ids[3]).unwrap();
        walk.hide(ids[1]).unwrap();

        let all = walk.all().unwrap();
        let got: Vec<CommitId> = all.iter().map(|c| c.id).collect();
        assert_eq!(got, vec![ids[3], ids[2]]);
    }

    // ---- Topological order ----

    #[test]
    fn topological_children_before_parents() {
        let (store, ids) = diamond();
        let mut walk = RevWalk::new(store, Sort::Topological);
        walk.push(ids[3]).unwrap();

        let all = walk.all().unwrap();
        let pos: HashMap<CommitId, usize> =
            all.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        assert!(pos[&ids[3]] < pos[&ids[1]]);
        assert!(pos[&ids[3]] < pos[&ids[2]]);
        assert!(pos[&ids[1]] < pos[&ids[0]]);
        assert!(pos[&ids[2]] < pos[&ids[0]]);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn topological_with_multiple_tips() {
        let (store, ids) = diamond();
        let mut walk = RevWalk::new(store, Sort::Topological);
        walk.push(ids[1]).unwrap();
        walk.push(ids[2]).unwrap();

        let all = walk.all().unwrap();
        let pos: HashMap<CommitId, usize> =
            all.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        // The root is emitted only after both of its children.
        assert!(pos[&ids[1]] < pos[&ids[0]]);
        assert!(pos[&ids[2]] < pos[&ids[0]]);
        assert_eq!(all.len(), 3);
    }

    // ---- Failure and lifecycle ----

    #[test]
    fn push_unknown_id_fails_and_poisons() {
        let (store, _, _, _) = linear();
        let mut walk = RevWalk::new(store, Sort::Time);
        let ghost = CommitId::from_content(b"ghost");

        let err = walk.push(ghost).unwrap_err();
        assert!(matches!(err, WalkError::ObjectNotFound(id) if id == ghost));

        // Poisoned: draining fails, iteration ends.
        assert!(matches!(walk.count_remaining(), Err(WalkError::Poisoned)));
        assert!(walk.next().is_none());
    }

    #[test]
    fn hide_unknown_id_fails_and_poisons() {
        let (store, _, _, c3) = linear();
        let mut walk = RevWalk::new(store, Sort::Time);
        walk.push(c3).unwrap();
        assert!(walk.hide(CommitId::from_content(b"ghost")).is_err());
        assert!(matches!(walk.all(), Err(WalkError::Poisoned)));
    }

    #[test]
    fn reset_recovers_a_poisoned_walk() {
        let (store, _, _, c3) = linear();
        let mut walk = RevWalk::new(store, Sort::Time);
        walk.push(CommitId::from_content(b"ghost")).unwrap_err();

        walk.reset(Sort::Time);
        walk.push(c3).unwrap();
        assert_eq!(walk.count_remaining().unwrap(), 3);
    }

    #[test]
    fn exhaustion_is_idempotent() {
        let (store, c1, _, _) = linear();
        let mut walk = RevWalk::new(store, Sort::Time);
        walk.push(c1).unwrap();

        assert_eq!(walk.next().unwrap().unwrap().id, c1);
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());
    }

    #[test]
    fn seeding_after_iteration_started_is_rejected() {
        let (store, _, c2, c3) = linear();
        let mut walk = RevWalk::new(store, Sort::Time);
        walk.push(c3).unwrap();
        let _ = walk.next();

        assert!(matches!(walk.push(c2), Err(WalkError::AlreadyStarted)));

        // Reset makes seeding possible again.
        walk.reset(Sort::Time);
        walk.push(c2).unwrap();
        assert_eq!(walk.count_remaining().unwrap(), 2);
    }

    #[test]
    fn empty_walk_yields_nothing() {
        let (store, _, _, _) = linear();
        let mut walk = RevWalk::new(store, Sort::Time);
        assert_eq!(walk.count_remaining().unwrap(), 0);
    }
}

//! Relative-history analysis between two commit tips.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tracing::debug;

use canopy_odb::{Commit, ObjectStore};
use canopy_types::CommitId;

use crate::error::{GraphError, GraphResult};

/// Origin flag: reached from the first tip.
const FROM_A: u8 = 0b01;
/// Origin flag: reached from the second tip.
const FROM_B: u8 = 0b10;

/// Answers merge-base and divergence questions over an [`ObjectStore`].
///
/// All queries use explicit visited-set bookkeeping over parent edges and
/// terminate on graphs with arbitrarily shared history.
pub struct GraphAnalyzer {
    store: Arc<dyn ObjectStore>,
}

impl GraphAnalyzer {
    /// Create an analyzer over the given store.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// The best common ancestor of two tips.
    ///
    /// Computes the ancestor sets of both tips (tips inclusive), intersects
    /// them, and discards every common commit dominated by another common
    /// commit (i.e. reachable from it through parent edges). Among the
    /// remaining lowest common ancestors the winner is the one with the
    /// greatest timestamp; equal timestamps break toward the smallest id
    /// bytes, so the choice is deterministic.
    ///
    /// Fails with [`GraphError::NoCommonAncestor`] when the tips share no
    /// history. `merge_base(x, x)` is `x`.
    pub fn merge_base(&self, a: CommitId, b: CommitId) -> GraphResult<CommitId> {
        if a == b {
            self.store.require_commit(&a)?;
            return Ok(a);
        }

        let mut commits: HashMap<CommitId, Commit> = HashMap::new();
        let from_a = self.ancestry(a, &mut commits)?;
        let from_b = self.ancestry(b, &mut commits)?;

        let common: HashSet<CommitId> = from_a.intersection(&from_b).copied().collect();
        if common.is_empty() {
            return Err(GraphError::NoCommonAncestor { a, b });
        }

        // Every path between two common commits runs through common commits,
        // so marking the common parents of each common commit finds all
        // dominated entries in one pass.
        let mut dominated: HashSet<CommitId> = HashSet::new();
        for id in &common {
            if let Some(commit) = commits.get(id) {
                for parent in &commit.parents {
                    if common.contains(parent) {
                        dominated.insert(*parent);
                    }
                }
            }
        }

        let mut best: Option<&Commit> = None;
        for id in &common {
            if dominated.contains(id) {
                continue;
            }
            let Some(candidate) = commits.get(id) else {
                continue;
            };
            let replace = match best {
                None => true,
                Some(current) => match candidate.timestamp.cmp(&current.timestamp) {
                    Ordering::Greater => true,
                    Ordering::Equal => candidate.id < current.id,
                    Ordering::Less => false,
                },
            };
            if replace {
                best = Some(candidate);
            }
        }

        let base = best
            .map(|c| c.id)
            .ok_or(GraphError::NoCommonAncestor { a, b })?;
        debug!(
            a = %a.short_hex(),
            b = %b.short_hex(),
            base = %base.short_hex(),
            common = common.len(),
            "merge base"
        );
        Ok(base)
    }

    /// Divergence counts between two tips.
    ///
    /// `ahead` is the number of commits reachable from `a` but not from `b`;
    /// `behind` the number reachable from `b` but not from `a`. A single
    /// combined traversal paints origin flags down the parent edges; a
    /// commit is re-enqueued only when its flags change, so shared history
    /// is classified once and traversal always terminates. Commits reached
    /// from both sides count toward neither.
    pub fn ahead_behind(&self, a: CommitId, b: CommitId) -> GraphResult<(usize, usize)> {
        if a == b {
            self.store.require_commit(&a)?;
            return Ok((0, 0));
        }

        let mut flags: HashMap<CommitId, u8> = HashMap::new();
        let mut queue: VecDeque<CommitId> = VecDeque::new();
        flags.insert(a, FROM_A);
        queue.push_back(a);
        *flags.entry(b).or_insert(0) |= FROM_B;
        queue.push_back(b);

        while let Some(id) = queue.pop_front() {
            let reached = flags.get(&id).copied().unwrap_or(0);
            for parent in self.store.parents_of(&id)? {
                let entry = flags.entry(parent).or_insert(0);
                if *entry | reached != *entry {
                    *entry |= reached;
                    queue.push_back(parent);
                }
            }
        }

        let mut ahead = 0;
        let mut behind = 0;
        for &f in flags.values() {
            match f {
                FROM_A => ahead += 1,
                FROM_B => behind += 1,
                _ => {}
            }
        }
        debug!(
            a = %a.short_hex(),
            b = %b.short_hex(),
            ahead,
            behind,
            visited = flags.len(),
            "ahead/behind"
        );
        Ok((ahead, behind))
    }

    /// Everything reachable from `tip`, tip inclusive. Visited commits are
    /// cached in `commits` so overlapping walks read each object once.
    fn ancestry(
        &self,
        tip: CommitId,
        commits: &mut HashMap<CommitId, Commit>,
    ) -> GraphResult<HashSet<CommitId>> {
        let mut seen: HashSet<CommitId> = HashSet::new();
        let mut queue: VecDeque<CommitId> = VecDeque::new();
        seen.insert(tip);
        queue.push_back(tip);

        while let Some(id) = queue.pop_front() {
            if !commits.contains_key(&id) {
                let commit = self.store.require_commit(&id)?;
                commits.insert(id, commit);
            }
            // Presence is guaranteed by the insert above.
            if let Some(commit) = commits.get(&id) {
                for parent in &commit.parents {
                    if seen.insert(*parent) {
                        queue.push_back(*parent);
                    }
                }
            }
        }

        Ok(seen)
    }
}

//! A collection of branches sharing a common root, with a designated
//! *current* branch for new appends.

use crate::branch::Branch;
use crate::error::VersionHistoryError;
use crate::item::Item;

/// Non-empty ordered collection of [`Branch`]es plus a `current_index`
/// marking the branch considered live for new appends. All branches share
/// the same `items[0].version`; they descend from a common root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSet {
    histories: Vec<Branch>,
    current_index: usize,
}

impl BranchSet {
    /// A `BranchSet` containing just `root_branch`, current by construction.
    pub fn new(root_branch: Branch) -> Self { Self { histories: vec![root_branch], current_index: 0 } }

    /// Adds a deep copy of `new_branch` to this set. Fails if its root
    /// version does not match the current branch's root version. Branches
    /// in one `BranchSet` must share a common ancestor. If `new_branch`'s
    /// frontier outranks the current branch's (higher last-item version,
    /// the most recent failover authority), the current pointer moves to
    /// it.
    pub fn add_branch(&mut self, new_branch: Branch) -> Result<(bool, usize), VersionHistoryError> {
        let current_first = self.get_current_branch().first_item()?;
        let new_first = new_branch.first_item()?;
        if new_first.version != current_first.version {
            return Err(VersionHistoryError::FirstItemMismatch { added: new_first.version, current: current_first.version });
        }

        let new_last = new_branch.last_item()?;
        let current_last = self.get_current_branch().last_item()?;

        self.histories.push(new_branch.duplicate());
        let new_index = self.histories.len() - 1;

        let current_changed = new_last.version > current_last.version;
        if current_changed {
            tracing::debug!(old_index = self.current_index, new_index, "current branch switched after add_branch");
            self.current_index = new_index;
        }
        Ok((current_changed, new_index))
    }

    /// Computes the pairwise LCA of `incoming` against every local branch
    /// and picks the best one: higher LCA `event_id` wins; ties prefer the
    /// shorter local history (fewer transition points); further ties keep
    /// the first occurrence. Logs once with the winner, not once per
    /// candidate, since this runs in a tight loop over `histories`.
    pub fn find_lca_across(&self, incoming: &Branch) -> Result<(usize, Item), VersionHistoryError> {
        let mut best: Option<(usize, Item)> = None;
        for (index, branch) in self.histories.iter().enumerate() {
            let lca = branch.find_lca(incoming)?;
            best = match best {
                None => Some((index, lca)),
                Some((best_index, best_lca)) => {
                    if lca.event_id > best_lca.event_id
                        || (lca.event_id == best_lca.event_id
                            && self.histories[index].transition_count() < self.histories[best_index].transition_count())
                    {
                        Some((index, lca))
                    } else {
                        Some((best_index, best_lca))
                    }
                }
            };
        }
        let (index, item) = best.expect("BranchSet.histories is never empty");
        tracing::debug!(index, event_id = item.event_id, version = item.version, "selected lca across branch set");
        Ok((index, item))
    }

    /// Linear scan for the first branch containing `item`.
    pub fn find_first_containing(&self, item: Item) -> Result<(usize, &Branch), VersionHistoryError> {
        self.histories
            .iter()
            .enumerate()
            .find(|(_, branch)| branch.contains(item))
            .ok_or(VersionHistoryError::NotFound { event_id: item.event_id, version: item.version })
    }

    /// True iff some branch's last-item version exceeds the current
    /// branch's last-item version. The current pointer lags the
    /// authoritative maximum and the workflow state must be rebuilt from the
    /// winning branch.
    pub fn is_rebuilt(&self) -> bool {
        let current_version = self.get_current_branch().last_item().expect("current branch must be non-empty").version;
        let rebuilt = self
            .histories
            .iter()
            .any(|branch| branch.last_item().expect("every branch in a live set must be non-empty").version > current_version);
        if rebuilt {
            tracing::warn!(current_index = self.current_index, "current branch outranked; workflow state needs rebuild");
        }
        rebuilt
    }

    pub fn set_current_index(&mut self, index: usize) -> Result<(), VersionHistoryError> {
        if index >= self.histories.len() {
            return Err(VersionHistoryError::IndexOutOfRange { index, len: self.histories.len() });
        }
        self.current_index = index;
        Ok(())
    }

    pub fn current_index(&self) -> usize { self.current_index }

    pub fn get_current_branch(&self) -> &Branch { &self.histories[self.current_index] }

    pub fn get_branch(&self, index: usize) -> Result<&Branch, VersionHistoryError> {
        self.histories.get(index).ok_or(VersionHistoryError::IndexOutOfRange { index, len: self.histories.len() })
    }

    /// Number of branches currently tracked.
    pub fn branch_count(&self) -> usize { self.histories.len() }

    /// Independent, deep-copied snapshot of every branch in insertion order.
    /// Used at the persistence boundary ([`crate::convert`]); callers inside
    /// the core should prefer [`BranchSet::get_branch`].
    pub fn histories(&self) -> Vec<Branch> { self.histories.iter().map(Branch::duplicate).collect() }

    pub fn duplicate(&self) -> BranchSet {
        BranchSet { histories: self.histories.iter().map(Branch::duplicate).collect(), current_index: self.current_index }
    }

    /// Field-wise equality with `other`, as the named operation from the
    /// spec surface. Equivalent to `==` (`BranchSet` also derives
    /// `PartialEq`).
    pub fn equals(&self, other: &BranchSet) -> bool { self == other }
}

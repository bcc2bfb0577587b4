//! Mirror types for the persistence boundary (§6 of the design). These carry
//! `serde::{Serialize, Deserialize}`, public fields, and no invariants of
//! their own. A persistence layer (out of scope for this core) decodes a
//! blob into one of these and hands it to the matching `TryFrom`/`From` impl
//! to get back a validated in-memory value.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::branch_set::BranchSet;
use crate::error::VersionHistoryError;
use crate::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInternal {
    pub event_id: i64,
    pub version: i64,
}

impl From<Item> for ItemInternal {
    fn from(item: Item) -> Self { Self { event_id: item.event_id, version: item.version } }
}

impl From<ItemInternal> for Item {
    /// Re-validates via [`Item::new`]. A corrupted persisted value (negative
    /// `event_id`, or a negative `version` other than
    /// [`crate::EMPTY_VERSION`]) is fatal, matching `Item::new`'s own
    /// fatal/recoverable split. It is not surfaced as a `Result` here.
    fn from(internal: ItemInternal) -> Self { Item::new(internal.event_id, internal.version) }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchInternal {
    pub branch_token: Vec<u8>,
    pub items: Vec<ItemInternal>,
}

impl From<&Branch> for BranchInternal {
    fn from(branch: &Branch) -> Self {
        Self { branch_token: branch.branch_token(), items: branch.items().into_iter().map(ItemInternal::from).collect() }
    }
}

impl TryFrom<BranchInternal> for Branch {
    type Error = VersionHistoryError;

    /// Rebuilds the branch via repeated [`Branch::append`] so ordering
    /// invariants are re-checked rather than trusted from the wire,
    /// matching the reference codebase's re-validation path for persisted
    /// lineage data.
    fn try_from(internal: BranchInternal) -> Result<Self, Self::Error> {
        let mut branch = Branch::new(internal.branch_token);
        for item in internal.items {
            branch.append(Item::from(item))?;
        }
        Ok(branch)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchSetInternal {
    pub current_version_history_index: usize,
    pub histories: Vec<BranchInternal>,
}

impl From<&BranchSet> for BranchSetInternal {
    fn from(set: &BranchSet) -> Self {
        Self { current_version_history_index: set.current_index(), histories: set.histories().iter().map(BranchInternal::from).collect() }
    }
}

impl TryFrom<BranchSetInternal> for BranchSet {
    type Error = VersionHistoryError;

    /// Replays `add_branch` over the incoming histories to both rebuild the
    /// set and derive what `current_index` should be. Zero histories, or a
    /// derived index that disagrees with `current_version_history_index`,
    /// indicates corrupted input and is fatal rather than a `BadRequest` --
    /// ordinary structural problems within a single branch (e.g. a
    /// decreasing version) still surface as a recoverable `Err` from the
    /// underlying `append`/`add_branch` calls.
    fn try_from(internal: BranchSetInternal) -> Result<Self, Self::Error> {
        if internal.histories.is_empty() {
            panic!("BranchSetInternal has zero histories; persisted state is corrupted");
        }

        let mut histories = internal.histories.into_iter();
        let root: Branch = histories.next().expect("checked non-empty above").try_into()?;
        let mut set = BranchSet::new(root);

        let mut derived_current = 0usize;
        for branch_internal in histories {
            let branch: Branch = branch_internal.try_into()?;
            let (changed, new_index) = set.add_branch(branch)?;
            if changed {
                derived_current = new_index;
            }
        }

        if derived_current != internal.current_version_history_index {
            panic!(
                "BranchSetInternal.current_version_history_index ({}) does not match the index derived by replaying add_branch ({derived_current}); persisted state is corrupted",
                internal.current_version_history_index
            );
        }
        set.set_current_index(derived_current).expect("derived_current is always a valid index into the rebuilt histories");
        Ok(set)
    }
}

//! A single branch: an ordered run of transition points tagged by an opaque
//! persistence identifier.

use crate::error::VersionHistoryError;
use crate::item::{Item, FIRST_EVENT_ID};

/// An ordered sequence of [`Item`]s plus an opaque `branch_token`.
///
/// `items` is sorted strictly increasing in both `event_id` and `version`.
/// Item `i` means "from the previous transition up to and including
/// `event_id = items[i].event_id`, all events carry `items[i].version`".
/// The only way to build or extend one is [`Branch::append`], which is the
/// sole guardian of that invariant; there is no public way to push an item
/// directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    branch_token: Vec<u8>,
    items: Vec<Item>,
}

impl Branch {
    /// An empty branch carrying the given token. Populate it with
    /// [`Branch::append`].
    pub fn new(branch_token: Vec<u8>) -> Self { Self { branch_token, items: Vec::new() } }

    /// The central mutation. Opens a new transition point when `item`
    /// carries a strictly higher version than the current frontier;
    /// otherwise extends the frontier's `event_id` in place when the
    /// version is unchanged. Rejects a lower version or a non-advancing
    /// `event_id`.
    pub fn append(&mut self, item: Item) -> Result<(), VersionHistoryError> {
        let Some(last) = self.items.last_mut() else {
            tracing::debug!(event_id = item.event_id, version = item.version, "opened first transition point");
            self.items.push(item);
            return Ok(());
        };

        if item.version < last.version {
            tracing::warn!(
                rejected_event_id = item.event_id,
                rejected_version = item.version,
                frontier_version = last.version,
                "append rejected: lower version"
            );
            return Err(VersionHistoryError::LowerVersion { event_id: item.event_id, version: item.version, current_version: last.version });
        }
        if item.event_id <= last.event_id {
            tracing::warn!(
                rejected_event_id = item.event_id,
                rejected_version = item.version,
                frontier_event_id = last.event_id,
                "append rejected: lower event id"
            );
            return Err(VersionHistoryError::LowerEventId {
                event_id: item.event_id,
                version: item.version,
                current_event_id: last.event_id,
            });
        }

        if item.version > last.version {
            tracing::debug!(event_id = item.event_id, version = item.version, "opened new transition point");
            self.items.push(item);
        } else {
            tracing::trace!(event_id = item.event_id, version = item.version, "extended transition run");
            last.event_id = item.event_id;
        }
        Ok(())
    }

    /// True iff some transition `k` satisfies `items[k].version ==
    /// item.version` and `item.event_id` falls within its run. Short
    /// circuits as soon as a transition with a strictly greater version is
    /// seen, since `items` is version-sorted.
    pub fn contains(&self, item: Item) -> bool {
        let mut prev_event_id = FIRST_EVENT_ID - 1;
        for transition in &self.items {
            if transition.version > item.version {
                return false;
            }
            if transition.version == item.version {
                return prev_event_id < item.event_id && item.event_id <= transition.event_id;
            }
            prev_event_id = transition.event_id;
        }
        false
    }

    /// Walks both item sequences from the tail inward, peeling the suffix of
    /// whichever side has the larger version at each step, until the
    /// versions at the two cursors agree; that is the join point. Returns
    /// the item with the smaller `event_id` (ties: either side, they are
    /// equal). Fails if either side is exhausted before a match, which
    /// signals the branches share no common ancestor.
    pub fn find_lca(&self, other: &Branch) -> Result<Item, VersionHistoryError> {
        let mut i = self.items.len();
        let mut j = other.items.len();
        loop {
            if i == 0 || j == 0 {
                return Err(VersionHistoryError::MalformedLca);
            }
            let a = self.items[i - 1];
            let b = other.items[j - 1];
            if a.version == b.version {
                return Ok(if a.event_id <= b.event_id { a } else { b });
            } else if a.version > b.version {
                i -= 1;
            } else {
                j -= 1;
            }
        }
    }

    /// True iff `item` is exactly this branch's current frontier. Appending
    /// further events onto a branch past LCA `item` is only legal when
    /// `item` is exactly the branch's frontier; otherwise a fork is
    /// required. Panics if the branch is empty; there is no frontier to
    /// compare against, which can only happen if a caller is driving an
    /// uninitialized branch.
    pub fn is_lca_appendable(&self, item: Item) -> bool {
        let last = self.items.last().expect("is_lca_appendable called on an empty branch");
        *last == item
    }

    /// Builds a new, unrelated-token branch holding the prefix of this
    /// branch's transitions up to and including `lca`. Transitions strictly
    /// below `lca`'s version are copied as-is; the transition at `lca`'s
    /// version is replaced by `lca` itself, truncating any run past it.
    ///
    /// Note: for the `version < lca.version` case this mirrors the
    /// reference behavior of not separately re-checking that `lca`'s
    /// `event_id` is reachable from that prefix. The final
    /// equal-version/event_id check below is what actually validates
    /// containment. See the design notes for why this is intentional.
    pub fn duplicate_until_lca(&self, lca: Item) -> Result<Branch, VersionHistoryError> {
        let mut result = Branch::new(Vec::new());
        for &transition in &self.items {
            if transition.version < lca.version {
                result.append(transition).expect("a strict prefix of a valid branch re-appends without violating invariants");
            } else if transition.version == lca.version {
                if lca.event_id > transition.event_id {
                    return Err(VersionHistoryError::NotContained { version: lca.version });
                }
                result.append(lca).expect("lca strictly extends the duplicated prefix by construction");
                return Ok(result);
            } else {
                return Err(VersionHistoryError::NotContained { version: lca.version });
            }
        }
        Err(VersionHistoryError::NotContained { version: lca.version })
    }

    /// The version in effect at `event_id`: the version of the first
    /// transition whose `event_id` is at least `event_id`. Out of range
    /// (below [`FIRST_EVENT_ID`] or past the branch's frontier) is an error.
    pub fn event_version(&self, event_id: i64) -> Result<i64, VersionHistoryError> {
        let last = self.items.last().ok_or(VersionHistoryError::Empty)?;
        if event_id < FIRST_EVENT_ID || event_id > last.event_id {
            return Err(VersionHistoryError::EventIdOutOfRange { event_id, first: FIRST_EVENT_ID, last: last.event_id });
        }
        self.items
            .iter()
            .find(|transition| transition.event_id >= event_id)
            .map(|transition| transition.version)
            .ok_or(VersionHistoryError::EventIdOutOfRange { event_id, first: FIRST_EVENT_ID, last: last.event_id })
    }

    pub fn first_item(&self) -> Result<Item, VersionHistoryError> { self.items.first().copied().ok_or(VersionHistoryError::Empty) }

    pub fn last_item(&self) -> Result<Item, VersionHistoryError> { self.items.last().copied().ok_or(VersionHistoryError::Empty) }

    /// Defensive copy in; callers cannot alias internal state through the
    /// slice they passed in.
    pub fn set_branch_token(&mut self, token: &[u8]) { self.branch_token = token.to_vec(); }

    /// Defensive copy out; mutating the returned buffer never affects this
    /// branch.
    pub fn branch_token(&self) -> Vec<u8> { self.branch_token.clone() }

    /// Independent copy of this branch's transitions.
    pub fn items(&self) -> Vec<Item> { self.items.clone() }

    /// Number of transition points currently recorded.
    pub fn transition_count(&self) -> usize { self.items.len() }

    /// Deep copy, rebuilt via repeated [`Branch::append`] so invariants are
    /// re-validated rather than assumed.
    pub fn duplicate(&self) -> Branch {
        let mut copy = Branch::new(self.branch_token.clone());
        for &item in &self.items {
            copy.append(item).expect("a valid branch's own items re-append without violating invariants");
        }
        copy
    }

    /// Field-wise equality with `other`, as the named operation from the
    /// spec surface. Equivalent to `==` (`Branch` also derives `PartialEq`).
    pub fn equals(&self, other: &Branch) -> bool { self == other }
}

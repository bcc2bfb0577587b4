//! Recoverable error type for the version-history core.
//!
//! Every variant here is a caller-visible, recoverable failure: lower
//! version/event_id on append, an out-of-range branch index, an empty
//! history accessed where a frontier is expected, a malformed (disjoint)
//! pair of branches during LCA search, and so on. Callers that branch on
//! error kind should match the variant, not the `Display` string.
//!
//! Fatal, corruption-signalling failures (a negative `event_id` at
//! construction, zero histories or a mismatched `current_index` coming off
//! the persistence boundary) are not represented here. They panic, per the
//! fatal/recoverable split documented on [`crate::Item::new`] and
//! [`crate::convert::BranchSetInternal`].

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionHistoryError {
    #[error("cannot append event_id={event_id} version={version}: version is lower than the current frontier version {current_version}")]
    LowerVersion { event_id: i64, version: i64, current_version: i64 },

    #[error("cannot append event_id={event_id} version={version}: event_id does not advance past the current frontier event_id {current_event_id}")]
    LowerEventId { event_id: i64, version: i64, current_event_id: i64 },

    #[error("branch index {index} out of range (have {len} branches)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("branch has no items")]
    Empty,

    #[error("malformed branches, no joint point found")]
    MalformedLca,

    #[error("first item of added branch (version {added}) does not match the current branch's first item version {current}")]
    FirstItemMismatch { added: i64, current: i64 },

    #[error("branch does not contain a transition with version {version} reachable from the duplicated prefix")]
    NotContained { version: i64 },

    #[error("event_id {event_id} out of range [{first}, {last}]")]
    EventIdOutOfRange { event_id: i64, first: i64, last: i64 },

    #[error("no branch contains item (event_id={event_id}, version={version})")]
    NotFound { event_id: i64, version: i64 },
}

//! The leaf value type of the version-history core: a single transition point.

/// The first event id assigned on any branch. Event ids below this value
/// never appear once construction has completed.
pub const FIRST_EVENT_ID: i64 = 1;

/// Sentinel for an uninitialized version. The only negative value a
/// [`Item::version`] may legally hold.
pub const EMPTY_VERSION: i64 = -24;

/// A single transition point in a [`crate::Branch`]: "events up to and
/// including `event_id` carry `version`".
///
/// `Item` is a plain `Copy` value. There is nothing behind it worth
/// sharing, and passing it by value keeps the rest of the module free of
/// lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    pub event_id: i64,
    pub version: i64,
}

impl Item {
    /// Constructs an `Item`, panicking if the fields describe corrupted
    /// state: a negative `event_id`, or a negative `version` other than
    /// [`EMPTY_VERSION`]. This is a fatal, non-recoverable check. It denotes
    /// a programming bug or corrupted persisted data, never caller misuse of
    /// a live branch (that is instead `Branch::append`'s job, which returns a
    /// `Result`).
    pub fn new(event_id: i64, version: i64) -> Self {
        assert!(event_id >= 0, "item event_id must be >= 0, got {event_id}");
        assert!(version >= 0 || version == EMPTY_VERSION, "item version must be >= 0 or EMPTY_VERSION ({EMPTY_VERSION}), got {version}");
        Self { event_id, version }
    }

    /// Deep copy. Trivial given `Copy`, retained to mirror the reference API.
    pub fn duplicate(&self) -> Item { *self }

    /// Field-wise equality, as the named operation from the spec surface.
    /// Equivalent to `==` (`Item` also derives `PartialEq`).
    pub fn equals(&self, other: &Item) -> bool { self == other }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "({}, {})", self.event_id, self.version) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_accepts_zero_and_empty_version() {
        let _ = Item::new(0, 0);
        let _ = Item::new(5, EMPTY_VERSION);
    }

    #[test]
    #[should_panic(expected = "event_id must be >= 0")]
    fn construct_rejects_negative_event_id() { Item::new(-1, 0); }

    #[test]
    #[should_panic(expected = "version must be >= 0")]
    fn construct_rejects_negative_non_sentinel_version() { Item::new(1, -2); }

    #[test]
    fn equals_is_field_wise() {
        assert!(Item::new(3, 1).equals(&Item::new(3, 1)));
        assert!(!Item::new(3, 1).equals(&Item::new(3, 2)));
        assert!(!Item::new(3, 1).equals(&Item::new(4, 1)));
    }

    #[test]
    fn duplicate_is_independent() {
        let a = Item::new(7, 2);
        let b = a.duplicate();
        assert_eq!(a, b);
    }
}

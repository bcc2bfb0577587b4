//! Dedicated scenario-style integration tests (S1-S6) exercising the concrete
//! walkthroughs from the design.

mod common;

use history_core::{Branch, BranchSet, Item, VersionHistoryError};

fn branch(token: &[u8], items: &[(i64, i64)]) -> Branch {
    let mut b = Branch::new(token.to_vec());
    for &(event_id, version) in items {
        b.append(Item::new(event_id, version)).unwrap();
    }
    b
}

/// S1 -- simple append chain.
#[test]
fn s1_simple_append_chain() {
    let mut b = Branch::new(b"s1".to_vec());
    for &(event_id, version) in &[(1, 0), (2, 0), (5, 1), (8, 1)] {
        b.append(Item::new(event_id, version)).unwrap();
    }
    assert_eq!(b.items(), vec![Item::new(2, 0), Item::new(8, 1)]);

    assert_eq!(b.event_version(1).unwrap(), 0);
    assert_eq!(b.event_version(2).unwrap(), 0);
    assert_eq!(b.event_version(3).unwrap(), 1);
    assert_eq!(b.event_version(8).unwrap(), 1);
    assert!(matches!(b.event_version(9), Err(VersionHistoryError::EventIdOutOfRange { .. })));
}

/// S2 -- reject decreasing version.
#[test]
fn s2_reject_decreasing_version() {
    let mut b = branch(b"s2", &[(5, 2)]);
    assert!(matches!(b.append(Item::new(6, 1)), Err(VersionHistoryError::LowerVersion { .. })));
}

/// S3 -- LCA of two simply diverging branches.
#[test]
fn s3_lca_simple() {
    let a = branch(b"a", &[(3, 0), (7, 1)]);
    let b = branch(b"b", &[(3, 0), (5, 1), (9, 2)]);
    assert_eq!(a.find_lca(&b).unwrap(), Item::new(5, 1));
}

/// S4 -- LCA across a branch set, preferring the higher joining event_id.
#[test]
fn s4_lca_across_branch_set() {
    let b1 = branch(b"b1", &[(10, 0)]);
    let b2 = branch(b"b2", &[(5, 0), (12, 1)]);
    let mut set = BranchSet::new(b1);
    set.add_branch(b2).unwrap();

    let incoming = branch(b"incoming", &[(6, 0), (8, 1)]);
    let (index, item) = set.find_lca_across(&incoming).unwrap();
    assert_eq!(index, 1);
    assert_eq!(item, Item::new(8, 1));
}

/// S5 -- adding a higher-versioned branch moves the current pointer.
#[test]
fn s5_add_branch_switches_current() {
    let b0 = branch(b"b0", &[(1, 0), (5, 1)]);
    let mut set = BranchSet::new(b0);
    let b1 = branch(b"b1", &[(1, 0), (4, 2)]);
    let (current_changed, new_index) = set.add_branch(b1).unwrap();
    assert!(current_changed);
    assert_eq!(new_index, 1);
    assert_eq!(set.current_index(), 1);
}

/// S6 -- rebuilt detection fires on version, not event_id, precedence.
#[test]
fn s6_rebuilt_detection() {
    let b0 = branch(b"b0", &[(1, 0), (10, 1)]);
    let b1 = branch(b"b1", &[(1, 0), (8, 2)]);
    let mut set = BranchSet::new(b0);
    set.add_branch(b1).unwrap();
    // The add already followed the higher version, so pin current back to b0
    // to exercise the lagging-pointer case directly.
    set.set_current_index(0).unwrap();
    assert!(set.is_rebuilt());
}

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn visited_set_tracks_identity_not_content() {
    let a = Handle::word("x");
    let b = Handle::word("x");
    let mut set = VisitedSet::new();
    assert!(set.insert(&a));
    assert!(!set.insert(&a.clone()));
    assert!(set.insert(&b));
    set.remove(&a);
    assert!(!set.contains(&a));
    assert_eq!(set.len(), 1);
}

#[test]
fn visited_map_records_progress_and_results() {
    let a = Handle::word("a");
    let b = Handle::word("b");
    let mut map = VisitedMap::new();
    assert_eq!(map.enter(&a, &b), PairState::Fresh);
    assert_eq!(map.enter(&a, &b), PairState::InProgress);
    map.finish(&a, &b, false);
    assert_eq!(map.enter(&a, &b), PairState::Known(false));
    assert_eq!(map.enter(&b, &a), PairState::Fresh);
    assert_eq!(map.visit_count(&a), 2);
    assert_eq!(map.visit_count(&Handle::word("c")), 0);
}

use super::*;
use crate::value::Constants;
use pretty_assertions::assert_eq;

fn words(c: &Constants, items: &[&str]) -> Handle {
    c.list(items.iter().map(|s| Handle::word(*s)))
}

#[test]
fn numbers_compare_by_value() {
    assert!(equal(&Handle::word("1"), &Handle::word("1.0"), CaseMode::Ignore));
    assert!(equal(&Handle::number(2.0), &Handle::word("2"), CaseMode::Sensitive));
    assert!(!equal(&Handle::word("1"), &Handle::word("2"), CaseMode::Ignore));
}

#[test]
fn case_mode_controls_word_comparison() {
    let a = Handle::word("Hello");
    let b = Handle::word("hello");
    assert!(equal(&a, &b, CaseMode::Ignore));
    assert!(!equal(&a, &b, CaseMode::Sensitive));
}

#[test]
fn lists_compare_elementwise() {
    let c = Constants::new();
    let a = c.list([Handle::word("a"), words(&c, &["b", "c"])]);
    let b = c.list([Handle::word("A"), words(&c, &["b", "c"])]);
    assert!(equal(&a, &b, CaseMode::Ignore));
    assert!(!equal(&a, &words(&c, &["a"]), CaseMode::Ignore));
    assert!(equal(&c.empty_list(), &c.empty_list(), CaseMode::Ignore));
    assert!(!equal(&c.empty_list(), &Handle::word(""), CaseMode::Ignore));
}

#[test]
fn arrays_compare_by_identity() {
    let a = Handle::array(1, vec![Handle::word("x")]);
    let b = Handle::array(1, vec![Handle::word("x")]);
    assert!(equal(&a, &a.clone(), CaseMode::Ignore));
    assert!(!equal(&a, &b, CaseMode::Ignore));
}

#[test]
fn shared_sub_node_is_visited_once_per_query() {
    let c = Constants::new();
    let shared = words(&c, &["1", "2"]);
    let copy = words(&c, &["1", "2"]);
    let left = c.list([shared.clone(), shared.clone()]);
    let right = c.list([copy.clone(), copy]);
    let mut visited = VisitedMap::new();
    assert!(equal_with(&left, &right, CaseMode::Ignore, &mut visited));
    assert_eq!(visited.visit_count(&shared), 1);
}

#[test]
fn mutually_cyclic_lists_compare_equal() {
    let c = Constants::new();
    let a = words(&c, &["x"]);
    let b = words(&c, &["x"]);
    if let (Some(na), Some(nb)) = (a.as_list_node(), b.as_list_node()) {
        na.set_tail(a.clone());
        nb.set_tail(b.clone());
    }
    assert!(equal(&a, &b, CaseMode::Ignore));
}

#[test]
fn memberp_on_lists_words_and_arrays() {
    let c = Constants::new();
    let list = words(&c, &["a", "b", "c"]);
    assert!(memberp(&Handle::word("B"), &list, CaseMode::Ignore));
    assert!(!memberp(&Handle::word("B"), &list, CaseMode::Sensitive));
    assert!(memberp(&Handle::word("o"), &Handle::word("logo"), CaseMode::Ignore));
    assert!(!memberp(&Handle::word("lo"), &Handle::word("logo"), CaseMode::Ignore));
    let array = Handle::array(0, vec![Handle::word("z")]);
    assert!(memberp(&Handle::word("z"), &array, CaseMode::Ignore));
}

#[test]
fn member_returns_the_shared_tail() {
    let c = Constants::new();
    let list = words(&c, &["a", "b", "c"]);
    let Some(rest) = member(&Handle::word("b"), &list, CaseMode::Ignore) else {
        panic!("b should be a member");
    };
    assert_eq!(rest.show(), "[b c]");
    let tail = list.as_list_node().map(crate::value::ListNode::tail);
    assert!(tail.is_some_and(|t| t.ptr_eq(&rest)));
    let word = member(&Handle::word("g"), &Handle::word("logo"), CaseMode::Ignore);
    assert_eq!(word.map(|w| w.to_string()), Some("go".to_string()));
}

#[test]
fn memberp_terminates_on_cycles() {
    let c = Constants::new();
    let list = words(&c, &["a", "b"]);
    if let Some(first) = list.as_list_node() {
        if let Some(second) = first.tail().as_list_node() {
            second.set_tail(list.clone());
        }
    }
    assert!(!memberp(&Handle::word("z"), &list, CaseMode::Ignore));
    assert!(memberp(&Handle::word("b"), &list, CaseMode::Ignore));
}

#[test]
fn contains_searches_nested_structure() {
    let c = Constants::new();
    let inner = words(&c, &["needle"]);
    let outer = c.list([Handle::word("hay"), c.list([inner.clone()])]);
    assert!(contains(&outer, &Handle::word("needle"), CaseMode::Ignore));
    assert!(contains(&outer, &words(&c, &["needle"]), CaseMode::Ignore));
    assert!(!contains(&outer, &Handle::word("pin"), CaseMode::Ignore));

    if let Some(node) = inner.as_list_node() {
        node.set_head(outer.clone());
    }
    assert!(!contains(&outer, &Handle::word("pin"), CaseMode::Ignore));
}

#[test]
fn containment_compares_shared_node_once() {
    let c = Constants::new();
    let shared = words(&c, &["1"]);
    let container = c.list([shared.clone(), c.list([shared.clone()])]);
    let probe = words(&c, &["2"]);
    let mut visited = VisitedMap::new();
    let found = contains_with(
        &container,
        &probe,
        CaseMode::Ignore,
        &mut VisitedSet::new(),
        &mut visited,
    );
    assert!(!found);
    assert_eq!(visited.visit_count(&shared), 1);
}

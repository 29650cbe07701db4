use super::*;
use crate::value::Constants;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn words(constants: &Constants, items: &[&str]) -> Handle {
    constants.list(items.iter().map(|s| Handle::word(*s)))
}

fn show(value: &Handle) -> String {
    value.show()
}

/// Cons cells of a list, at most `limit` of them.
fn cells(list: &Handle, limit: usize) -> Vec<Handle> {
    let mut out = Vec::new();
    let mut current = list.clone();
    while let Some(node) = current.as_list_node() {
        if out.len() == limit {
            break;
        }
        out.push(current.clone());
        let next = node.tail();
        current = next;
    }
    out
}

#[test]
fn print_omits_outer_brackets() {
    let c = Constants::new();
    let inner = words(&c, &["2", "3"]);
    let list = c.list([Handle::word("1"), inner]);
    assert_eq!(list.to_string(), "1 [2 3]");
    assert_eq!(show(&list), "[1 [2 3]]");
    assert_eq!(c.empty_list().to_string(), "");
    assert_eq!(show(&c.empty_list()), "[]");
}

#[test]
fn head_cycle_is_truncated() {
    let c = Constants::new();
    let list = words(&c, &["a", "b"]);
    if let Some(node) = list.as_list_node() {
        node.set_head(list.clone());
    }
    assert_eq!(show(&list), "[... b]");
}

#[test]
fn tail_cycle_is_truncated() {
    let c = Constants::new();
    let list = words(&c, &["a", "b"]);
    let all = cells(&list, 2);
    if let Some(last) = all[1].as_list_node() {
        last.set_tail(list.clone());
    }
    assert_eq!(show(&list), "[a b ...]");
}

#[test]
fn siblings_may_revisit_a_shared_node() {
    let c = Constants::new();
    let shared = words(&c, &["x"]);
    let list = c.list([shared.clone(), shared]);
    assert_eq!(show(&list), "[[x] [x]]");
}

#[test]
fn depth_and_width_limits() {
    let c = Constants::new();
    let nested = c.list([c.list([Handle::word("1")])]);
    let depth_one = PrintLimits::new(Some(1), None);
    assert_eq!(
        nested.to_logo_string(PrintFlags::SHOW_BRACKETS, depth_one, None),
        "[...]"
    );
    let wide = words(&c, &["1", "2", "3"]);
    let width_two = PrintLimits::new(None, Some(2));
    assert_eq!(
        wide.to_logo_string(PrintFlags::SHOW_BRACKETS, width_two, None),
        "[1 2 ...]"
    );
}

#[test]
fn arrays_show_origin_when_not_one() {
    let array = Handle::array(0, vec![Handle::word("a"), Handle::word("b")]);
    assert_eq!(show(&array), "{a b}@0");
    let default = Handle::array(1, vec![Handle::word("a")]);
    assert_eq!(show(&default), "{a}");
}

#[test]
fn full_print_bar_quotes_awkward_words() {
    let flags = PrintFlags::FULL_PRINT;
    assert_eq!(
        Handle::word("a b").to_logo_string(flags, PrintLimits::NONE, None),
        "|a b|"
    );
    assert_eq!(
        Handle::word("").to_logo_string(flags, PrintLimits::NONE, None),
        "||"
    );
    assert_eq!(
        Handle::word("plain").to_logo_string(flags, PrintLimits::NONE, None),
        "plain"
    );
}

#[test]
fn external_guard_is_respected_and_restored() {
    let c = Constants::new();
    let list = words(&c, &["a"]);
    let mut guard = VisitedSet::new();
    guard.insert(&list);
    let text = list.to_logo_string(PrintFlags::SHOW_BRACKETS, PrintLimits::NONE, Some(&mut guard));
    assert_eq!(text, "...");
    assert!(guard.contains(&list));

    let mut fresh = VisitedSet::new();
    let text = list.to_logo_string(PrintFlags::SHOW_BRACKETS, PrintLimits::NONE, Some(&mut fresh));
    assert_eq!(text, "[a]");
    assert!(fresh.is_empty());
}

/// A list per entry. Each item byte is either a word or a reference to
/// another list; the optional byte redirects the last tail.
type GraphSpec = Vec<(Vec<u8>, Option<u8>)>;

fn build_graph(spec: &GraphSpec) -> Vec<Handle> {
    let c = Constants::new();
    let lists: Vec<Handle> = spec
        .iter()
        .map(|(items, _)| c.list(items.iter().map(|b| Handle::word(format!("w{b}")))))
        .collect();
    let n = lists.len();
    for (i, (items, tail)) in spec.iter().enumerate() {
        let list_cells = cells(&lists[i], items.len());
        for (cell, b) in list_cells.iter().zip(items) {
            if b % 3 != 0 {
                if let Some(node) = cell.as_list_node() {
                    node.set_head(lists[usize::from(*b) % n].clone());
                }
            }
        }
        if let (Some(t), Some(last)) = (tail, list_cells.last()) {
            if let Some(node) = last.as_list_node() {
                node.set_tail(lists[usize::from(*t) % n].clone());
            }
        }
    }
    lists
}

/// Longest output possible for a list entered at `depth`.
fn bound(depth: usize, depth_limit: usize, width: usize) -> usize {
    if depth >= depth_limit {
        return TRUNCATED.len();
    }
    let item = bound(depth + 1, depth_limit, width).max("w255".len());
    2 + (width + 1) * (item + 1)
}

fn graph_spec() -> impl Strategy<Value = GraphSpec> {
    prop::collection::vec(
        (
            prop::collection::vec(any::<u8>(), 0..5),
            prop::option::of(any::<u8>()),
        ),
        1..6,
    )
}

proptest! {
    #[test]
    fn rendering_terminates_within_limits(
        spec in graph_spec(),
        depth in 1usize..4,
        width in 1usize..5,
    ) {
        let lists = build_graph(&spec);
        let limits = PrintLimits::new(Some(depth), Some(width));
        for list in &lists {
            let text = list.to_logo_string(PrintFlags::SHOW_BRACKETS, limits, None);
            prop_assert!(text.len() <= bound(0, depth, width));
        }
    }
}

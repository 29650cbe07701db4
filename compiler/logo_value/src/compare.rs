//! Equality and containment.
//!
//! Every query owns one [`VisitedMap`], so a pair of nodes is compared at
//! most once per query even when the lists share structure or loop.

use crate::guard::{PairState, VisitedMap, VisitedSet};
use crate::value::{Atom, Datum, Handle};

/// Case handling for word comparison. Mirrors the CASEIGNOREDP variable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CaseMode {
    #[default]
    Ignore,
    Sensitive,
}

/// Deep equality.
///
/// Words are equal when both are numbers with the same value, otherwise
/// when their texts match under `mode`. Lists compare elementwise. Arrays
/// and every other kind compare by identity.
pub fn equal(a: &Handle, b: &Handle, mode: CaseMode) -> bool {
    equal_with(a, b, mode, &mut VisitedMap::new())
}

/// Deep equality sharing a visited map with an enclosing query.
pub fn equal_with(a: &Handle, b: &Handle, mode: CaseMode, visited: &mut VisitedMap) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    match (a.datum(), b.datum()) {
        (Datum::Atom(x), Datum::Atom(y)) => atoms_equal(x, y, mode),
        (Datum::EmptyList, Datum::EmptyList) | (Datum::Nothing, Datum::Nothing) => true,
        (Datum::List(_), Datum::List(_)) => lists_equal(a, b, mode, visited),
        _ => false,
    }
}

fn atoms_equal(x: &Atom, y: &Atom, mode: CaseMode) -> bool {
    if let (Some(m), Some(n)) = (x.number(), y.number()) {
        return m == n;
    }
    texts_equal(x.text(), y.text(), mode)
}

fn texts_equal(x: &str, y: &str, mode: CaseMode) -> bool {
    match mode {
        CaseMode::Sensitive => x == y,
        CaseMode::Ignore => x == y || x.to_lowercase() == y.to_lowercase(),
    }
}

fn lists_equal(a: &Handle, b: &Handle, mode: CaseMode, visited: &mut VisitedMap) -> bool {
    let mut entered = Vec::new();
    let result = walk_lists(a, b, mode, visited, &mut entered);
    for (x, y) in &entered {
        visited.finish(x, y, result);
    }
    result
}

fn walk_lists(
    a: &Handle,
    b: &Handle,
    mode: CaseMode,
    visited: &mut VisitedMap,
    entered: &mut Vec<(Handle, Handle)>,
) -> bool {
    let mut x = a.clone();
    let mut y = b.clone();
    loop {
        if x.ptr_eq(&y) {
            return true;
        }
        let (Some(nx), Some(ny)) = (x.as_list_node(), y.as_list_node()) else {
            return equal_with(&x, &y, mode, visited);
        };
        match visited.enter(&x, &y) {
            PairState::Fresh => entered.push((x.clone(), y.clone())),
            // Still being compared further up: a cycle, equal so far.
            PairState::InProgress => return true,
            PairState::Known(result) => return result,
        }
        if !equal_with(&nx.head(), &ny.head(), mode, visited) {
            return false;
        }
        let (next_x, next_y) = (nx.tail(), ny.tail());
        x = next_x;
        y = next_y;
    }
}

/// Is `thing` an element of `container`?
///
/// For a word container, `thing` must be a single character of it.
pub fn memberp(thing: &Handle, container: &Handle, mode: CaseMode) -> bool {
    member_position(thing, container, mode, &mut VisitedMap::new()).is_some()
}

/// The part of `container` starting at the first occurrence of `thing`.
///
/// Lists yield the sublist (sharing structure), words the rest of the word.
/// Arrays have no tail to return, so they yield `None` even on a match.
pub fn member(thing: &Handle, container: &Handle, mode: CaseMode) -> Option<Handle> {
    match member_position(thing, container, mode, &mut VisitedMap::new())? {
        Position::Cell(cell) => Some(cell),
        Position::Char(offset) => container.text().map(|text| Handle::word(&text[offset..])),
        Position::Index => None,
    }
}

enum Position {
    Cell(Handle),
    Char(usize),
    Index,
}

fn member_position(
    thing: &Handle,
    container: &Handle,
    mode: CaseMode,
    visited: &mut VisitedMap,
) -> Option<Position> {
    match container.datum() {
        Datum::Atom(atom) => {
            let needle = thing.as_atom()?;
            if needle.char_count() != 1 {
                return None;
            }
            atom.text()
                .char_indices()
                .find(|&(_, c)| {
                    let mut buf = [0u8; 4];
                    texts_equal(c.encode_utf8(&mut buf), needle.text(), mode)
                })
                .map(|(i, _)| Position::Char(i))
        }
        Datum::List(_) => {
            let mut seen = VisitedSet::new();
            let mut current = container.clone();
            while let Some(node) = current.as_list_node() {
                if !seen.insert(&current) {
                    return None;
                }
                if equal_with(thing, &node.head(), mode, visited) {
                    return Some(Position::Cell(current.clone()));
                }
                let next = node.tail();
                current = next;
            }
            None
        }
        Datum::Array(array) => array
            .items()
            .iter()
            .any(|item| equal_with(thing, item, mode, visited))
            .then_some(Position::Index),
        _ => None,
    }
}

/// Does `thing` occur anywhere inside `container`, at any depth?
pub fn contains(container: &Handle, thing: &Handle, mode: CaseMode) -> bool {
    contains_with(
        container,
        thing,
        mode,
        &mut VisitedSet::new(),
        &mut VisitedMap::new(),
    )
}

pub(crate) fn contains_with(
    container: &Handle,
    thing: &Handle,
    mode: CaseMode,
    searched: &mut VisitedSet,
    visited: &mut VisitedMap,
) -> bool {
    let items = match container.datum() {
        Datum::List(_) => {
            if !searched.insert(container) {
                return false;
            }
            container.to_vec()
        }
        Datum::Array(array) => {
            if !searched.insert(container) {
                return false;
            }
            array.items()
        }
        _ => return false,
    };
    items.iter().any(|item| {
        equal_with(thing, item, mode, visited)
            || contains_with(item, thing, mode, searched, visited)
    })
}

#[cfg(test)]
mod tests;

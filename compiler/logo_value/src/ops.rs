//! Word, list and array operations shared by the primitives and the
//! runtime ABI.
//!
//! Each operation reports a bad input as a "doesn't like" error naming
//! the primitive it implements.

use crate::control::{EvalResult, Unwind};
use crate::errors::doesnt_like;
use crate::guard::VisitedSet;
use crate::value::{Constants, Datum, Handle};

fn char_word(c: char) -> Handle {
    Handle::word(c.to_string())
}

pub fn first(value: &Handle) -> EvalResult {
    match value.datum() {
        Datum::List(node) => Ok(node.head()),
        Datum::Atom(atom) => match atom.text().chars().next() {
            Some(c) => Ok(char_word(c)),
            None => Err(doesnt_like("first", value)),
        },
        Datum::Array(array) => Ok(Handle::number(array.origin() as f64)),
        _ => Err(doesnt_like("first", value)),
    }
}

pub fn last(value: &Handle) -> EvalResult {
    match value.datum() {
        Datum::List(_) => value
            .to_vec()
            .pop()
            .ok_or_else(|| doesnt_like("last", value)),
        Datum::Atom(atom) => match atom.text().chars().next_back() {
            Some(c) => Ok(char_word(c)),
            None => Err(doesnt_like("last", value)),
        },
        _ => Err(doesnt_like("last", value)),
    }
}

/// All but the first element. Lists share their tail.
pub fn butfirst(value: &Handle) -> EvalResult {
    match value.datum() {
        Datum::List(node) => Ok(node.tail()),
        Datum::Atom(atom) => {
            let mut chars = atom.text().chars();
            match chars.next() {
                Some(_) => Ok(Handle::word(chars.as_str())),
                None => Err(doesnt_like("butfirst", value)),
            }
        }
        _ => Err(doesnt_like("butfirst", value)),
    }
}

/// All but the last element. Lists are copied.
pub fn butlast(constants: &Constants, value: &Handle) -> EvalResult {
    match value.datum() {
        Datum::List(_) => {
            let mut items = value.to_vec();
            items.pop();
            Ok(constants.list(items))
        }
        Datum::Atom(atom) => {
            let mut chars = atom.text().chars();
            match chars.next_back() {
                Some(_) => Ok(Handle::word(chars.as_str())),
                None => Err(doesnt_like("butlast", value)),
            }
        }
        _ => Err(doesnt_like("butlast", value)),
    }
}

/// Prepend `thing`, sharing `list` as the tail.
///
/// A one-character word can be put in front of a word.
pub fn fput(thing: &Handle, list: &Handle) -> EvalResult {
    if list.is_list() {
        return Ok(Handle::cons(thing.clone(), list.clone()));
    }
    match (thing.as_atom(), list.as_atom()) {
        (Some(head), Some(rest)) if head.char_count() == 1 => {
            Ok(Handle::word(format!("{}{}", head.text(), rest.text())))
        }
        _ => Err(doesnt_like("fput", list)),
    }
}

/// Append `thing` to a copy of `list`.
pub fn lput(constants: &Constants, thing: &Handle, list: &Handle) -> EvalResult {
    if list.is_list() {
        let mut items = list.to_vec();
        items.push(thing.clone());
        return Ok(constants.list(items));
    }
    match (thing.as_atom(), list.as_atom()) {
        (Some(tail), Some(rest)) if tail.char_count() == 1 => {
            Ok(Handle::word(format!("{}{}", rest.text(), tail.text())))
        }
        _ => Err(doesnt_like("lput", list)),
    }
}

fn index_of(procedure: &str, index: &Handle) -> Result<i64, Unwind> {
    match index.as_number() {
        Some(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => Ok(n as i64),
        _ => Err(doesnt_like(procedure, index)),
    }
}

/// Largest array ARRAY will allocate.
pub const MAX_ARRAY_SIZE: usize = 1 << 24;

/// A fresh array of `size` empty lists starting at `origin`.
pub fn new_array(constants: &Constants, size: i64, origin: i64) -> EvalResult {
    match usize::try_from(size) {
        Ok(len) if len <= MAX_ARRAY_SIZE => Ok(Handle::array(
            origin,
            vec![constants.empty_list(); len],
        )),
        _ => Err(doesnt_like("array", &Handle::word(size.to_string()))),
    }
}

/// Element at `index`: 1-based for words and lists, origin-based for
/// arrays.
pub fn item(index: &Handle, container: &Handle) -> EvalResult {
    let i = index_of("item", index)?;
    let found = match container.datum() {
        Datum::List(_) => usize::try_from(i - 1)
            .ok()
            .and_then(|offset| container.to_vec().into_iter().nth(offset)),
        Datum::Atom(atom) => usize::try_from(i - 1)
            .ok()
            .and_then(|offset| atom.text().chars().nth(offset))
            .map(char_word),
        Datum::Array(array) => array.get(i),
        _ => return Err(doesnt_like("item", container)),
    };
    found.ok_or_else(|| doesnt_like("item", index))
}

/// Store `value` in an array slot.
pub fn set_item(index: &Handle, array: &Handle, value: &Handle) -> Result<(), Unwind> {
    let i = index_of("setitem", index)?;
    let Some(target) = array.as_array() else {
        return Err(doesnt_like("setitem", array));
    };
    if target.set(i, value.clone()) {
        Ok(())
    } else {
        Err(doesnt_like("setitem", index))
    }
}

/// Replace the first element of a list in place.
pub fn set_first(list: &Handle, value: &Handle) -> Result<(), Unwind> {
    match list.as_list_node() {
        Some(node) => {
            node.set_head(value.clone());
            Ok(())
        }
        None => Err(doesnt_like(".setfirst", list)),
    }
}

/// Replace the tail of a list in place. The new tail must be a list.
pub fn set_butfirst(list: &Handle, value: &Handle) -> Result<(), Unwind> {
    let Some(node) = list.as_list_node() else {
        return Err(doesnt_like(".setbf", list));
    };
    if !value.is_list() {
        return Err(doesnt_like(".setbf", value));
    }
    node.set_tail(value.clone());
    Ok(())
}

/// Number of elements.
///
/// On a cyclic list the count stops at the first cell seen twice, so it
/// reports the number of distinct cells reachable from the start.
pub fn count(value: &Handle) -> usize {
    match value.datum() {
        Datum::List(_) => {
            let mut seen = VisitedSet::new();
            let mut n = 0;
            let mut current = value.clone();
            while let Some(node) = current.as_list_node() {
                if !seen.insert(&current) {
                    break;
                }
                n += 1;
                let next = node.tail();
                current = next;
            }
            n
        }
        Datum::Atom(atom) => atom.char_count(),
        Datum::Array(array) => array.len(),
        _ => 0,
    }
}

/// Concatenate words.
pub fn word(parts: &[Handle]) -> EvalResult {
    let mut text = String::new();
    for part in parts {
        match part.text() {
            Some(t) => text.push_str(t),
            None => return Err(doesnt_like("word", part)),
        }
    }
    Ok(Handle::word(text))
}

/// Flatten words and lists, one level deep, into a new list.
pub fn sentence(constants: &Constants, parts: &[Handle]) -> EvalResult {
    let mut items = Vec::new();
    for part in parts {
        match part.datum() {
            Datum::List(_) => items.extend(part.to_vec()),
            Datum::EmptyList => {}
            Datum::Atom(_) | Datum::Array(_) => items.push(part.clone()),
            _ => return Err(doesnt_like("sentence", part)),
        }
    }
    Ok(constants.list(items))
}

use std::cell::RefCell;
use std::rc::Rc;

use super::{Datum, Handle};

thread_local! {
    // Placeholder swapped into a dying node's tail so long lists drop
    // iteratively instead of recursing once per cell. An empty word, so
    // the session's empty list and Nothing stay the only ones of their kind.
    static DROP_SENTINEL: Handle = Handle::word("");
}

/// A mutable cons cell.
///
/// The cell also carries an optional artifact: a parse of the list this
/// cell heads, cached by the evaluator. Any mutation of the cell clears it.
pub struct ListNode {
    head: RefCell<Handle>,
    tail: RefCell<Handle>,
    artifact: RefCell<Option<Handle>>,
}

impl ListNode {
    pub(crate) fn new(head: Handle, tail: Handle) -> Self {
        ListNode {
            head: RefCell::new(head),
            tail: RefCell::new(tail),
            artifact: RefCell::new(None),
        }
    }

    #[inline]
    pub fn head(&self) -> Handle {
        self.head.borrow().clone()
    }

    #[inline]
    pub fn tail(&self) -> Handle {
        self.tail.borrow().clone()
    }

    /// Replace the head in place.
    pub fn set_head(&self, value: Handle) {
        let old = self.head.replace(value);
        self.invalidate();
        drop(old);
    }

    /// Replace the tail in place. The new tail may point backward.
    pub fn set_tail(&self, value: Handle) {
        let old = self.tail.replace(value);
        self.invalidate();
        drop(old);
    }

    pub fn artifact(&self) -> Option<Handle> {
        self.artifact.borrow().clone()
    }

    pub fn set_artifact(&self, artifact: Handle) {
        *self.artifact.borrow_mut() = Some(artifact);
    }

    pub fn invalidate(&self) {
        self.artifact.borrow_mut().take();
    }
}

impl Drop for ListNode {
    fn drop(&mut self) {
        let mut next = take_tail(self.tail.get_mut());
        while let Some(handle) = next {
            match Rc::try_unwrap(handle.0) {
                Ok(Datum::List(mut node)) => next = take_tail(node.tail.get_mut()),
                _ => break,
            }
        }
    }
}

fn take_tail(slot: &mut Handle) -> Option<Handle> {
    DROP_SENTINEL
        .try_with(|sentinel| std::mem::replace(slot, sentinel.clone()))
        .ok()
}

/// Restartable cursor over the live structure of a list.
///
/// The cursor follows tails as they are when it reaches them; it is not a
/// snapshot. Mutating the list while a cursor walks it gives unspecified
/// (but memory-safe) results. On a cyclic list the cursor never ends, so
/// bounded callers should use `Handle::to_vec` or `count` instead.
pub struct ListCursor {
    start: Handle,
    current: Handle,
}

impl ListCursor {
    pub(crate) fn new(list: &Handle) -> Self {
        ListCursor {
            start: list.clone(),
            current: list.clone(),
        }
    }

    /// Go back to the first item.
    pub fn restart(&mut self) {
        self.current = self.start.clone();
    }

    /// The cell the next item will be read from.
    pub fn position(&self) -> &Handle {
        &self.current
    }
}

impl Iterator for ListCursor {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        let (head, tail) = {
            let node = self.current.as_list_node()?;
            (node.head(), node.tail())
        };
        self.current = tail;
        Some(head)
    }
}

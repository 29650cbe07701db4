use std::cell::RefCell;

use super::Handle;

/// An origin-indexed, mutable, growable array.
///
/// Valid indices satisfy `origin <= i < origin + len`.
pub struct ArrayValue {
    origin: i64,
    items: RefCell<Vec<Handle>>,
}

impl ArrayValue {
    pub(crate) fn new(origin: i64, items: Vec<Handle>) -> Self {
        ArrayValue {
            origin,
            items: RefCell::new(items),
        }
    }

    #[inline]
    pub fn origin(&self) -> i64 {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn offset(&self, index: i64) -> Option<usize> {
        let offset = usize::try_from(index.checked_sub(self.origin)?).ok()?;
        (offset < self.len()).then_some(offset)
    }

    pub fn get(&self, index: i64) -> Option<Handle> {
        let offset = self.offset(index)?;
        self.items.borrow().get(offset).cloned()
    }

    /// Store `value` at `index`. Returns `false` when out of bounds.
    pub fn set(&self, index: i64, value: Handle) -> bool {
        match self.offset(index) {
            Some(offset) => {
                let old = std::mem::replace(&mut self.items.borrow_mut()[offset], value);
                drop(old);
                true
            }
            None => false,
        }
    }

    pub fn push(&self, value: Handle) {
        self.items.borrow_mut().push(value);
    }

    /// Snapshot of the current contents.
    pub fn items(&self) -> Vec<Handle> {
        self.items.borrow().clone()
    }
}

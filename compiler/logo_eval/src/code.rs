//! Session table of natively compiled procedure entry points.
//!
//! Compiled bodies never touch interpreter internals directly. An entry
//! receives the session and the activation's argument list and returns a
//! value handle, which may hold a control value (return, goto,
//! continuation, error).

use std::rc::Rc;

use logo_value::{EntryId, Handle};

use crate::interpreter::Interpreter;

/// A natively compiled entry point.
pub trait CompiledEntry {
    fn invoke(&self, interp: &mut Interpreter, args: &Handle) -> Handle;
}

#[derive(Default)]
pub struct CodeTable {
    entries: Vec<Rc<dyn CompiledEntry>>,
}

impl CodeTable {
    pub fn insert(&mut self, entry: Rc<dyn CompiledEntry>) -> EntryId {
        let id = EntryId(u32::try_from(self.entries.len()).unwrap_or(u32::MAX));
        self.entries.push(entry);
        id
    }

    pub fn get(&self, id: EntryId) -> Option<Rc<dyn CompiledEntry>> {
        self.entries.get(id.0 as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

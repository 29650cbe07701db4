//! Logo Runtime Library (`liblogo_rt`)
//!
//! C-ABI entry points called by natively compiled Logo procedure bodies.
//! A compiled body sees the interpreter only through these functions.
//!
//! # Build Modes
//!
//! - **rlib**: for Rust consumers (the driver and tests)
//! - **staticlib**: for linking generated code
//!
//! # Values
//!
//! Values cross the boundary as [`ValueRef`] slot indices into the
//! activation's [`HandleTable`]. Every entry point that creates a value
//! registers it there; it lives until the activation ends, or until it
//! is retained and then released. Control values (return, goto,
//! continuation, error) are ordinary values: generated code checks
//! `logo_rt_is_control` after every call that can produce one and
//! returns it unchanged.
//!
//! # Function Categories
//!
//! - **Introspection**: `logo_rt_number`, `logo_rt_bool`, `logo_rt_lookup`, ...
//! - **Construction**: `logo_rt_word`, `logo_rt_cons`, `logo_rt_list`, ...
//! - **Control**: `logo_rt_return`, `logo_rt_goto`, `logo_rt_error_*`, ...
//! - **Comparison**: `logo_rt_equal`, `logo_rt_memberp`, `logo_rt_member`
//! - **Bookkeeping**: `logo_rt_begin_catch`, `logo_rt_end_catch`, `logo_rt_set_test`
//! - **Effects**: console, turtle and picture entry points
//!
//! # Safety
//!
//! All raw pointer handling lives in the `abi` module. Entry points are
//! called by generated code with the context pointer it was handed;
//! a null context makes every entry point a no-op returning its
//! failure value.

#![allow(
    clippy::not_unsafe_ptr_arg_deref,
    reason = "FFI entry points receive pointers from generated code"
)]

mod abi;
mod table;

use std::rc::Rc;

use tracing::trace;

use logo_eval::{CompiledEntry, Interpreter};
use logo_value::{Handle, Unwind};

pub use abi::*;
pub use table::HandleTable;

/// Opaque value reference: a slot in the activation's handle table.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValueRef(pub u32);

impl ValueRef {
    /// No value. Entry points return it for a bad reference.
    pub const NULL: ValueRef = ValueRef(0);

    #[inline]
    pub fn is_null(self) -> bool {
        self == Self::NULL
    }
}

/// Execution context of one compiled activation.
pub struct RtContext<'a> {
    interp: &'a mut Interpreter,
    table: HandleTable,
}

impl<'a> RtContext<'a> {
    pub fn new(interp: &'a mut Interpreter) -> Self {
        RtContext {
            interp,
            table: HandleTable::new(),
        }
    }

    pub fn interpreter(&mut self) -> &mut Interpreter {
        &mut *self.interp
    }

    pub fn table(&self) -> &HandleTable {
        &self.table
    }

    /// Watch a value and hand out its reference.
    pub fn register(&mut self, value: Handle) -> ValueRef {
        self.table.register(value)
    }

    pub fn value(&self, value: ValueRef) -> Option<Handle> {
        self.table.get(value).cloned()
    }

    /// Register the outcome of an interpreter call: the value, or the
    /// control value it unwound with.
    pub(crate) fn register_result(&mut self, result: Result<Handle, Unwind>) -> ValueRef {
        match result {
            Ok(value) => self.register(value),
            Err(unwind) => self.register(unwind.into_handle()),
        }
    }
}

impl Drop for RtContext<'_> {
    fn drop(&mut self) {
        trace!(live = self.table.len(), "activation handle table torn down");
    }
}

/// Signature of a compiled procedure body: the context and the argument
/// list in, the result (possibly a control value) out.
pub type NativeEntryFn = for<'a> extern "C" fn(*mut RtContext<'a>, ValueRef) -> ValueRef;

/// Adapts a compiled body to the interpreter's code table.
pub struct NativeEntry {
    func: NativeEntryFn,
}

impl NativeEntry {
    pub fn new(func: NativeEntryFn) -> Self {
        NativeEntry { func }
    }
}

impl CompiledEntry for NativeEntry {
    fn invoke(&self, interp: &mut Interpreter, args: &Handle) -> Handle {
        let nothing = interp.nothing();
        let mut ctx = RtContext::new(interp);
        let args = ctx.register(args.clone());
        let result = (self.func)(&mut ctx, args);
        ctx.value(result).unwrap_or(nothing)
    }
}

/// Install a compiled procedure. `source` is its Logo text, header first;
/// `tags` gives a separate entry for each GOTO target.
pub fn define_native(
    interp: &mut Interpreter,
    source: &str,
    main: NativeEntryFn,
    tags: &[(&str, NativeEntryFn)],
) -> Result<Handle, Unwind> {
    let tags = tags
        .iter()
        .map(|(tag, func)| (*tag, Rc::new(NativeEntry::new(*func)) as Rc<dyn CompiledEntry>))
        .collect();
    interp.define_compiled(source, Rc::new(NativeEntry::new(main)), tags)
}

#[cfg(test)]
mod tests;

//! Logo Value - value model for the Logo runtime.
//!
//! This crate provides:
//! - Reference-counted runtime values (`Handle`, `Datum`) with factory methods
//! - Words with memoized numeric and boolean interpretations (`Atom`)
//! - Mutable cons-cell lists, origin-indexed arrays and procedure values
//! - Control values (`Control`, `Unwind`) for the explicit unwind protocol
//! - Error payloads carrying UCBLogo-compatible error codes
//! - Cycle-safe rendering, equality and membership
//!
//! # Sharing
//!
//! Every value lives behind an `Rc`. Lists are mutable through
//! `.SETFIRST`/`.SETBF`, so they may share structure and may contain
//! cycles. All traversals that can revisit a node go through the guards
//! in [`guard`] and terminate on cyclic input.
//!
//! Cycles are not collected. A program that builds a cyclic list keeps
//! that list alive until the session ends.

mod compare;
mod control;
mod errors;
pub mod guard;
mod ops;
mod print;
mod value;

pub use compare::{contains, equal, equal_with, member, memberp, CaseMode};
pub use control::{Control, EvalResult, Unwind};
pub use errors::{ErrorKind, ErrorPayload, ERROR_TAG};
pub use guard::{PairState, VisitedMap, VisitedSet};
pub use ops::{
    butfirst, butlast, count, first, fput, item, last, lput, new_array, sentence, set_butfirst,
    set_first, set_item, word, MAX_ARRAY_SIZE,
};
pub use print::{PrintFlags, PrintLimits};
pub use value::{
    fold_name, parse_number, Arity, ArrayValue, AstKind, AstNode, Atom, Body, Constants, Datum,
    EntryId, EntryPoint, Handle, ListCursor, ListNode, OptionalParam, Procedure,
};

// Re-export error constructors for use by other crates
pub use errors::{
    didnt_output, doesnt_like, dont_know_how, dont_say_what_to_do, file_system, iftrue_without_test,
    macro_returned, no_catch, no_tag, no_value, not_enough_inputs, outside_procedure,
    paren_not_found, return_to_toplevel, stack_overflow, terminate, throw, to_inside_procedure,
    too_much_inside_parens, unexpected_bracket, unexpected_paren, user_error,
};

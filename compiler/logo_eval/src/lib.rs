//! Logo Eval - interpreter session for the Logo runtime.
//!
//! This crate provides:
//! - `FrameStack`: dynamically scoped variable frames with a recursion limit
//! - `ProcedureRegistry`: primitives and user procedures by case-folded name
//! - The reader (text to lists) and the parser (lists to cached ASTs)
//! - `Interpreter`: evaluation, procedure calls, CATCH/THROW, GOTO, PAUSE
//! - The primitive library and the built-in Logo library procedures
//! - `Toplevel`: the read loop shared by the console session and LOAD
//!
//! # Collaborators
//!
//! The session talks to the outside world only through the traits
//! [`TextConsole`], [`DrawingSink`] and [`ProcedureTextStore`], chosen
//! with [`InterpreterBuilder`].
//!
//! # Re-exports
//!
//! Value types from `logo_value` are re-exported for convenience.

mod canvas;
mod code;
mod config;
mod console;
mod control;
pub mod definition;
mod frames;
pub mod interpreter;
mod parse;
mod primitives;
pub mod reader;
mod registry;
mod signals;
mod stack;
mod text_store;
pub mod toplevel;

pub use logo_value::{
    CaseMode, Constants, ErrorKind, ErrorPayload, EvalResult, Handle, PrintFlags, PrintLimits,
    Unwind,
};

pub use canvas::{Canvas, DrawCommand, DrawingSink, NullCanvas, Point, RecordingCanvas, PALETTE};
pub use code::{CodeTable, CompiledEntry};
pub use config::{Config, DEFAULT_RECURSION_LIMIT};
pub use console::{BufferConsole, StdConsole, TextConsole};
pub use control::{CatchState, PauseState};
pub use frames::{Frame, FrameStack};
pub use interpreter::{Interpreter, InterpreterBuilder, ProcedureScope, RunMode};
pub use parse::{parse, parse_cached};
pub use registry::{Capability, PrimitiveDescriptor, PrimitiveFn, ProcedureRegistry, Resolved};
pub use signals::{signal_channel, Signal, SignalQueue};
pub use stack::ensure_sufficient_stack;
pub use text_store::{BuiltinTexts, ProcedureTextStore};
pub use toplevel::{load_source, run_session, Outcome, Toplevel};

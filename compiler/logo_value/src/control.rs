//! Control values and the unwind protocol.
//!
//! A non-local transfer (OUTPUT, STOP, GOTO, a continuation or an error) is
//! an ordinary [`Handle`] holding a [`Control`]. Evaluation code carries it
//! in the `Err` side of [`EvalResult`] so `?` propagates it; compiled code on
//! the far side of the runtime ABI sees the same handle as a plain return
//! value and must test for it after every call.

use std::fmt;

use crate::errors::ErrorPayload;
use crate::value::Handle;

/// Result of evaluation: a value, or a control value unwinding the stack.
pub type EvalResult = Result<Handle, Unwind>;

#[derive(Clone, Debug)]
pub enum Control {
    /// OUTPUT (with a value) or STOP (with Nothing).
    Return(Handle),
    /// Replace the current activation with a call of `target` on `args`.
    ///
    /// `target` is a procedure value or a word naming one; `args` is a list.
    Continuation { target: Handle, args: Handle },
    /// Restart the current procedure at a tag.
    Goto(String),
    Error(ErrorPayload),
}

impl Control {
    pub fn short_name(&self) -> &'static str {
        match self {
            Control::Return(_) => "return",
            Control::Continuation { .. } => "continuation",
            Control::Goto(_) => "goto",
            Control::Error(_) => "error",
        }
    }
}

/// A handle that is known to hold a [`Control`].
#[derive(Clone)]
pub struct Unwind(Handle);

impl Unwind {
    pub fn new(control: Control) -> Self {
        Unwind(Handle::control(control))
    }

    /// Wrap a handle if it holds a control value.
    pub fn from_handle(handle: Handle) -> Option<Self> {
        handle.is_control().then_some(Unwind(handle))
    }

    pub fn ret(value: Handle) -> Self {
        Unwind::new(Control::Return(value))
    }

    pub fn continuation(target: Handle, args: Handle) -> Self {
        Unwind::new(Control::Continuation { target, args })
    }

    pub fn goto(tag: impl Into<String>) -> Self {
        Unwind::new(Control::Goto(tag.into()))
    }

    pub fn error(payload: ErrorPayload) -> Self {
        Unwind::new(Control::Error(payload))
    }

    pub fn control(&self) -> &Control {
        match self.0.as_control() {
            Some(control) => control,
            // Every constructor checks the variant.
            None => unreachable!("Unwind without a control value"),
        }
    }

    pub fn as_error(&self) -> Option<&ErrorPayload> {
        match self.control() {
            Control::Error(payload) => Some(payload),
            _ => None,
        }
    }

    #[inline]
    pub fn handle(&self) -> &Handle {
        &self.0
    }

    #[inline]
    pub fn into_handle(self) -> Handle {
        self.0
    }
}

impl fmt::Debug for Unwind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.control() {
            Control::Error(payload) => write!(f, "Unwind(error {}: {})", payload.code(), payload.message),
            Control::Return(value) => write!(f, "Unwind(return {value:?})"),
            Control::Continuation { target, args } => {
                write!(f, "Unwind(continuation {target:?} {args:?})")
            }
            Control::Goto(tag) => write!(f, "Unwind(goto {tag})"),
        }
    }
}

impl From<ErrorPayload> for Unwind {
    fn from(payload: ErrorPayload) -> Self {
        Unwind::error(payload)
    }
}

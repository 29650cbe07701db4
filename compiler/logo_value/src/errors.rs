//! Error taxonomy for the Logo runtime.
//!
//! Errors are control values like any other: an [`ErrorPayload`] wrapped in
//! `Control::Error` travels through the `Err` side of `EvalResult` until a
//! CATCH or the top-level loop intercepts it.
//!
//! `ErrorKind` carries the structured data for each condition; its
//! `Display` impl is the user-visible message and `code()` the stable
//! UCBLogo error number reported by the ERROR primitive. Factory functions
//! (`no_value`, `doesnt_like`, ...) are the public way to build errors.

use std::fmt;

use crate::control::Unwind;
use crate::print::{PrintFlags, PrintLimits};
use crate::value::{fold_name, Handle};

/// Tag carried by every runtime error.
pub const ERROR_TAG: &str = "ERROR";
const TOPLEVEL_TAG: &str = "TOPLEVEL";
const SYSTEM_TAG: &str = "SYSTEM";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    StackOverflow,
    DoesntLike { procedure: String, datum: String },
    DidntOutput { procedure: String, to: String },
    NotEnoughInputs { procedure: String },
    TooMuchInsideParens,
    DontSayWhatToDo { datum: String },
    ParenNotFound,
    NoValue { name: String },
    UnexpectedParen,
    DontKnowHow { name: String },
    /// THROW with no active CATCH for its tag.
    NoCatch { tag: String },
    FileSystem { detail: String },
    ToInsideProcedure,
    NoTag { tag: String },
    IftrueWithoutTest { procedure: String },
    UnexpectedBracket,
    OutsideProcedure { procedure: String },
    MacroReturned { datum: String },
    /// `THROW "ERROR message`
    Custom { message: String },
    /// THROW with a user tag that some CATCH is waiting for.
    Throw { tag: String },
    /// Return-to-top-level signal.
    Toplevel,
    /// Terminate signal or BYE.
    Terminate,
}

impl ErrorKind {
    /// UCBLogo error number.
    pub fn code(&self) -> i32 {
        match self {
            ErrorKind::StackOverflow => 2,
            ErrorKind::DidntOutput { .. } => 5,
            ErrorKind::NotEnoughInputs { .. } => 6,
            ErrorKind::DoesntLike { .. } => 7,
            ErrorKind::TooMuchInsideParens => 8,
            ErrorKind::DontSayWhatToDo { .. } => 9,
            ErrorKind::ParenNotFound => 10,
            ErrorKind::NoValue { .. } => 11,
            ErrorKind::UnexpectedParen => 12,
            ErrorKind::DontKnowHow { .. } => 13,
            ErrorKind::NoCatch { .. } => 14,
            ErrorKind::Toplevel | ErrorKind::Terminate => 16,
            ErrorKind::FileSystem { .. } => 18,
            ErrorKind::Throw { .. } => 21,
            ErrorKind::ToInsideProcedure => 23,
            ErrorKind::NoTag { .. } => 24,
            ErrorKind::IftrueWithoutTest { .. } => 25,
            ErrorKind::UnexpectedBracket => 26,
            ErrorKind::MacroReturned { .. } => 29,
            ErrorKind::OutsideProcedure { .. } => 31,
            ErrorKind::Custom { .. } => 35,
        }
    }

    /// Catch tag this kind of error travels under.
    pub fn tag(&self) -> &str {
        match self {
            ErrorKind::Throw { tag } => tag,
            ErrorKind::Toplevel => TOPLEVEL_TAG,
            ErrorKind::Terminate => SYSTEM_TAG,
            _ => ERROR_TAG,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::StackOverflow => write!(f, "Stack overflow"),
            ErrorKind::DoesntLike { procedure, datum } => {
                write!(f, "{procedure} doesn't like {datum} as input")
            }
            ErrorKind::DidntOutput { procedure, to } => {
                write!(f, "{procedure} didn't output to {to}")
            }
            ErrorKind::NotEnoughInputs { procedure } => {
                write!(f, "not enough inputs to {procedure}")
            }
            ErrorKind::TooMuchInsideParens => write!(f, "too much inside ()'s"),
            ErrorKind::DontSayWhatToDo { datum } => {
                write!(f, "You don't say what to do with {datum}")
            }
            ErrorKind::ParenNotFound => write!(f, "')' not found"),
            ErrorKind::NoValue { name } => write!(f, "{name} has no value"),
            ErrorKind::UnexpectedParen => write!(f, "unexpected ')'"),
            ErrorKind::DontKnowHow { name } => write!(f, "I don't know how to {name}"),
            ErrorKind::NoCatch { tag } => write!(f, "Can't find catch tag for {tag}"),
            ErrorKind::FileSystem { detail } => write!(f, "File system error: {detail}"),
            ErrorKind::ToInsideProcedure => write!(f, "can't use TO inside a procedure"),
            ErrorKind::NoTag { tag } => write!(f, "Can't find tag {tag}"),
            ErrorKind::IftrueWithoutTest { procedure } => {
                write!(f, "{procedure} without TEST")
            }
            ErrorKind::UnexpectedBracket => write!(f, "unexpected ']'"),
            ErrorKind::OutsideProcedure { procedure } => {
                write!(f, "Can only use {procedure} inside a procedure")
            }
            ErrorKind::MacroReturned { datum } => {
                write!(f, "Macro returned {datum} instead of a list")
            }
            ErrorKind::Custom { message } => write!(f, "{message}"),
            ErrorKind::Throw { tag } => write!(f, "Throw {tag}"),
            ErrorKind::Toplevel => write!(f, "Stopping..."),
            ErrorKind::Terminate => write!(f, "Terminated"),
        }
    }
}

/// The data carried by an Error control value.
#[derive(Clone, Debug)]
pub struct ErrorPayload {
    pub kind: ErrorKind,
    /// Catch tag, as written.
    pub tag: String,
    pub message: String,
    /// Procedure that was running when the error was raised.
    pub procedure: Option<String>,
    /// Instruction line that was running.
    pub line: Option<Handle>,
    /// Value a matching CATCH outputs (THROW's second input).
    pub value: Option<Handle>,
}

impl ErrorPayload {
    pub fn new(kind: ErrorKind) -> Self {
        ErrorPayload {
            tag: kind.tag().to_string(),
            message: kind.to_string(),
            kind,
            procedure: None,
            line: None,
            value: None,
        }
    }

    #[inline]
    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    #[must_use]
    pub fn with_value(mut self, value: Handle) -> Self {
        self.value = Some(value);
        self
    }

    /// Fill in the running procedure and line if not already known.
    #[must_use]
    pub fn with_context(mut self, procedure: Option<&str>, line: Option<&Handle>) -> Self {
        if self.procedure.is_none() {
            self.procedure = procedure.map(str::to_string);
        }
        if self.line.is_none() {
            self.line = line.cloned();
        }
        self
    }

    pub fn has_context(&self) -> bool {
        self.procedure.is_some() || self.line.is_some()
    }

    /// Case-insensitive tag comparison.
    pub fn matches_tag(&self, tag: &str) -> bool {
        fold_name(&self.tag) == fold_name(tag)
    }

    /// Return-to-top-level or terminate.
    pub fn is_system(&self) -> bool {
        matches!(self.kind, ErrorKind::Toplevel | ErrorKind::Terminate)
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn describe(datum: &Handle) -> String {
    datum.to_logo_string(
        PrintFlags::SHOW_BRACKETS,
        PrintLimits::new(Some(4), Some(10)),
        None,
    )
}

#[inline]
fn raise(kind: ErrorKind) -> Unwind {
    Unwind::error(ErrorPayload::new(kind))
}

// Error constructors

#[cold]
pub fn stack_overflow() -> Unwind {
    raise(ErrorKind::StackOverflow)
}

#[cold]
pub fn doesnt_like(procedure: &str, datum: &Handle) -> Unwind {
    raise(ErrorKind::DoesntLike {
        procedure: procedure.to_string(),
        datum: describe(datum),
    })
}

#[cold]
pub fn didnt_output(procedure: &str, to: &str) -> Unwind {
    raise(ErrorKind::DidntOutput {
        procedure: procedure.to_string(),
        to: to.to_string(),
    })
}

#[cold]
pub fn not_enough_inputs(procedure: &str) -> Unwind {
    raise(ErrorKind::NotEnoughInputs {
        procedure: procedure.to_string(),
    })
}

#[cold]
pub fn too_much_inside_parens() -> Unwind {
    raise(ErrorKind::TooMuchInsideParens)
}

#[cold]
pub fn dont_say_what_to_do(datum: &Handle) -> Unwind {
    raise(ErrorKind::DontSayWhatToDo {
        datum: describe(datum),
    })
}

#[cold]
pub fn paren_not_found() -> Unwind {
    raise(ErrorKind::ParenNotFound)
}

#[cold]
pub fn no_value(name: &str) -> Unwind {
    raise(ErrorKind::NoValue {
        name: name.to_string(),
    })
}

#[cold]
pub fn unexpected_paren() -> Unwind {
    raise(ErrorKind::UnexpectedParen)
}

#[cold]
pub fn dont_know_how(name: &str) -> Unwind {
    raise(ErrorKind::DontKnowHow {
        name: name.to_string(),
    })
}

#[cold]
pub fn no_catch(tag: &str, value: Option<Handle>) -> Unwind {
    let mut payload = ErrorPayload::new(ErrorKind::NoCatch {
        tag: tag.to_string(),
    });
    payload.value = value;
    Unwind::error(payload)
}

#[cold]
pub fn file_system(detail: impl fmt::Display) -> Unwind {
    raise(ErrorKind::FileSystem {
        detail: detail.to_string(),
    })
}

#[cold]
pub fn to_inside_procedure() -> Unwind {
    raise(ErrorKind::ToInsideProcedure)
}

#[cold]
pub fn no_tag(tag: &str) -> Unwind {
    raise(ErrorKind::NoTag {
        tag: tag.to_string(),
    })
}

#[cold]
pub fn iftrue_without_test(procedure: &str) -> Unwind {
    raise(ErrorKind::IftrueWithoutTest {
        procedure: procedure.to_string(),
    })
}

#[cold]
pub fn unexpected_bracket() -> Unwind {
    raise(ErrorKind::UnexpectedBracket)
}

#[cold]
pub fn outside_procedure(procedure: &str) -> Unwind {
    raise(ErrorKind::OutsideProcedure {
        procedure: procedure.to_string(),
    })
}

#[cold]
pub fn macro_returned(datum: &Handle) -> Unwind {
    raise(ErrorKind::MacroReturned {
        datum: describe(datum),
    })
}

/// `THROW "ERROR message`
#[cold]
pub fn user_error(message: impl Into<String>) -> Unwind {
    raise(ErrorKind::Custom {
        message: message.into(),
    })
}

/// THROW with a user tag that an active CATCH is waiting for.
pub fn throw(tag: &str, value: Option<Handle>) -> Unwind {
    let mut payload = ErrorPayload::new(ErrorKind::Throw {
        tag: tag.to_string(),
    });
    payload.value = value;
    Unwind::error(payload)
}

#[cold]
pub fn return_to_toplevel() -> Unwind {
    raise(ErrorKind::Toplevel)
}

#[cold]
pub fn terminate() -> Unwind {
    raise(ErrorKind::Terminate)
}

#[cfg(test)]
mod tests;

//! CATCH/THROW bracketing, the pending-error state, and PAUSE.
//!
//! `begin_catch` and `end_catch` are the two halves of a CATCH. Between
//! them ERRACT is unbound, so an error inside the protected region reaches
//! the CATCH instead of the error action. `end_catch` classifies the body
//! result:
//!
//! | Body result                        | CATCH result                   |
//! |------------------------------------|--------------------------------|
//! | a value                            | that value                     |
//! | Error whose tag matches            | the thrown value, or Nothing   |
//! | Error with another tag             | the same error, re-raised      |
//! | Return, Goto, Continuation         | passed through                 |

use tracing::debug;

use logo_value::{
    fold_name, no_catch, outside_procedure, return_to_toplevel, terminate,
    throw, user_error, Control, ErrorPayload, EvalResult, Handle, Unwind,
};

use crate::interpreter::{Interpreter, RunMode};
use crate::reader::{needs_continuation, read_line};

const ERRACT: &str = "erract";

struct CatchFrame {
    /// Case-folded tag.
    tag: String,
    /// ERRACT's value when the CATCH began.
    saved_erract: Option<Handle>,
}

/// Active catches and the error most recently caught by `CATCH "ERROR`.
#[derive(Default)]
pub struct CatchState {
    frames: Vec<CatchFrame>,
    last_error: Option<ErrorPayload>,
}

impl CatchState {
    pub(crate) fn clear_frames(&mut self) {
        self.frames.clear();
    }

    pub(crate) fn set_last_error(&mut self, error: Option<ErrorPayload>) {
        self.last_error = error;
    }

    fn is_catching(&self, tag: &str) -> bool {
        self.frames.iter().any(|frame| frame.tag == tag)
    }
}

/// Nested PAUSE loops and the value CONTINUE hands back.
#[derive(Default)]
pub struct PauseState {
    pub(crate) depth: usize,
    pub(crate) resume: Option<Handle>,
}

impl Interpreter {
    /// Open a CATCH for `tag`: save and unbind ERRACT.
    pub fn begin_catch(&mut self, tag: &str) {
        let saved_erract = self
            .frames
            .lookup(ERRACT)
            .filter(|value| !value.is_nothing());
        if saved_erract.is_some() {
            let nothing = self.nothing();
            self.frames.assign(ERRACT, nothing);
        }
        self.catches.frames.push(CatchFrame {
            tag: fold_name(tag),
            saved_erract,
        });
    }

    /// Close the innermost CATCH, restoring ERRACT, and classify `result`.
    pub fn end_catch(&mut self, result: EvalResult, tag: &str) -> EvalResult {
        if let Some(frame) = self.catches.frames.pop() {
            if let Some(erract) = frame.saved_erract {
                self.frames.assign(ERRACT, erract);
            }
        }
        let unwind = match result {
            Ok(value) => return Ok(value),
            Err(unwind) => unwind,
        };
        let caught = match unwind.control() {
            Control::Error(payload) if payload.matches_tag(tag) => payload.clone(),
            _ => return Err(unwind),
        };
        debug!(tag, code = caught.code(), "caught");
        self.erract_active = false;
        let value = caught.value.clone().unwrap_or_else(|| self.nothing());
        let is_error_tag = fold_name(tag) == fold_name(logo_value::ERROR_TAG);
        self.catches
            .set_last_error(if is_error_tag { Some(caught) } else { None });
        Ok(value)
    }

    /// CATCH: run `list` with `tag` caught.
    pub fn catch(&mut self, tag: &str, list: &Handle) -> EvalResult {
        self.begin_catch(tag);
        let result = self.run_list(list, RunMode::Expression);
        self.end_catch(result, tag)
    }

    /// Is some active CATCH waiting for `tag`?
    pub fn is_catching(&self, tag: &str) -> bool {
        self.catches.is_catching(&fold_name(tag))
    }

    /// The error THROW raises for `tag`.
    ///
    /// `ERROR` raises a custom error, `TOPLEVEL` and `SYSTEM` raise the
    /// system signals, a tag some CATCH is waiting for raises a throw, and
    /// any other tag is the unmatched-tag error.
    pub fn throw(&self, tag: &str, value: Option<Handle>) -> Unwind {
        match fold_name(tag).as_str() {
            "error" => match value {
                Some(value) => user_error(value.to_string()),
                None => user_error("Throw \"Error"),
            },
            "toplevel" => return_to_toplevel(),
            "system" => terminate(),
            folded if self.catches.is_catching(folded) => throw(tag, value),
            _ => no_catch(tag, value),
        }
    }

    /// The pending error, if any.
    pub fn last_error(&self) -> Option<&ErrorPayload> {
        self.catches.last_error.as_ref()
    }

    /// Take the pending error, clearing it.
    pub fn take_error(&mut self) -> Option<ErrorPayload> {
        self.catches.last_error.take()
    }

    /// ERROR's output: `[code message procedure line]`, or `[]` when no
    /// error is pending. Clears the pending error.
    pub fn error_list(&mut self) -> Handle {
        let Some(error) = self.take_error() else {
            return self.constants.empty_list();
        };
        let procedure = match &error.procedure {
            Some(name) => Handle::word(name.as_str()),
            None => self.constants.empty_list(),
        };
        let line = error
            .line
            .clone()
            .unwrap_or_else(|| self.constants.empty_list());
        self.constants.list([
            Handle::number(f64::from(error.code())),
            Handle::word(error.message.as_str()),
            procedure,
            line,
        ])
    }

    /// PAUSE: run a nested read loop in the current frame until CONTINUE,
    /// then resume through a continuation carrying CONTINUE's value.
    pub fn pause(&mut self) -> EvalResult {
        let prompt = match self.frames.current_procedure() {
            Some(name) => format!("{name}? "),
            None => "? ".to_string(),
        };
        self.print("Pausing...\n");
        self.pause.depth += 1;
        let resumed = self.pause_loop(&prompt);
        self.pause.depth -= 1;
        let value = resumed?;
        let args = self.constants.list([value]);
        Err(Unwind::continuation(Handle::word(".resume"), args))
    }

    fn pause_loop(&mut self, prompt: &str) -> EvalResult {
        loop {
            let Some(mut text) = self.request_line(prompt)? else {
                return Ok(self.nothing());
            };
            while needs_continuation(&text) {
                match self.request_line("~ ")? {
                    Some(more) => {
                        text.push('\n');
                        text.push_str(&more);
                    }
                    None => break,
                }
            }
            let result = read_line(&self.constants, &text)
                .and_then(|line| self.run_list(&line, RunMode::Command));
            if let Err(unwind) = result {
                match unwind.as_error() {
                    Some(error) if !error.is_system() => {
                        let error = error.clone();
                        self.report_error(&error);
                    }
                    _ => return Err(unwind),
                }
            }
            if let Some(value) = self.pause.resume.take() {
                return Ok(value);
            }
        }
    }

    /// CONTINUE: end the innermost PAUSE with `value`.
    pub fn continue_pause(&mut self, value: Handle) -> Result<(), Unwind> {
        if self.pause.depth == 0 {
            return Err(outside_procedure("continue"));
        }
        self.pause.resume = Some(value);
        Ok(())
    }
}

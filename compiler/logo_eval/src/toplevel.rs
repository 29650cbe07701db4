//! The top-level read loop.
//!
//! [`Toplevel`] turns console lines into work for the interpreter. It
//! joins continuation lines, collects `TO ... END` definitions, runs
//! everything else as a command list, and reports uncaught errors. LOAD
//! uses the same machinery quietly, with errors propagated instead of
//! reported.

use tracing::debug;

use logo_value::{ErrorKind, Unwind};

use crate::definition::{from_source, is_definition_start, is_end_line, parse_header};
use crate::interpreter::{Interpreter, RunMode};
use crate::reader::{needs_continuation, read_line};

/// What the session does after a line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// End the session with this exit status.
    Exit(i32),
}

#[derive(Debug, Default)]
pub struct Toplevel {
    /// Source lines of a definition being typed in.
    definition: Option<Vec<String>>,
    /// An instruction line still waiting for its continuation.
    partial: Option<String>,
    /// Suppress the "NAME defined" acknowledgement.
    quiet: bool,
}

impl Toplevel {
    pub fn new(quiet: bool) -> Self {
        Toplevel {
            definition: None,
            partial: None,
            quiet,
        }
    }

    pub fn prompt(&self) -> &'static str {
        if self.definition.is_some() {
            "> "
        } else if self.partial.is_some() {
            "~ "
        } else {
            "? "
        }
    }

    /// Handle one console line, reporting any error.
    pub fn feed(&mut self, interp: &mut Interpreter, text: &str) -> Outcome {
        match self.step(interp, text) {
            Ok(()) => Outcome::Continue,
            Err(unwind) => self.fail(interp, unwind),
        }
    }

    fn step(&mut self, interp: &mut Interpreter, text: &str) -> Result<(), Unwind> {
        if let Some(lines) = &mut self.definition {
            lines.push(text.to_string());
            if is_end_line(&read_line(interp.constants(), text)?) {
                return self.define(interp);
            }
            return Ok(());
        }
        let text = match self.partial.take() {
            Some(mut partial) => {
                partial.push('\n');
                partial.push_str(text);
                partial
            }
            None => text.to_string(),
        };
        if needs_continuation(&text) {
            self.partial = Some(text);
            return Ok(());
        }
        self.run_text(interp, &text)
    }

    fn run_text(&mut self, interp: &mut Interpreter, text: &str) -> Result<(), Unwind> {
        interp.yield_now()?;
        let line = read_line(interp.constants(), text)?;
        if is_definition_start(&line) {
            parse_header(interp.constants(), &line)?;
            self.definition = Some(vec![text.to_string()]);
            return Ok(());
        }
        interp.run_list(&line, RunMode::Command).map(|_| ())
    }

    fn define(&mut self, interp: &mut Interpreter) -> Result<(), Unwind> {
        let Some(lines) = self.definition.take() else {
            return Ok(());
        };
        let procedure = from_source(interp.constants(), &lines)?;
        let name = procedure.name.clone();
        interp.define(procedure);
        if !self.quiet {
            interp.print(&format!("{name} defined\n"));
        }
        Ok(())
    }

    /// Handle an error that reached the top level. ERRACT gets a chance
    /// first; a terminate signal ends the session.
    pub fn fail(&mut self, interp: &mut Interpreter, unwind: Unwind) -> Outcome {
        self.definition = None;
        self.partial = None;
        let outcome = match interp.recover(unwind) {
            Ok(_) => Outcome::Continue,
            Err(unwind) => match unwind.as_error().cloned() {
                Some(error) if matches!(error.kind, ErrorKind::Terminate) => Outcome::Exit(0),
                Some(error) if matches!(error.kind, ErrorKind::Toplevel) => Outcome::Continue,
                Some(error) => {
                    interp.report_error(&error);
                    Outcome::Continue
                }
                None => {
                    debug!(control = unwind.control().short_name(), "stray control value at top level");
                    Outcome::Continue
                }
            },
        };
        interp.reset_after_error();
        outcome
    }

    /// End of input: finish whatever is pending.
    pub fn finish(&mut self, interp: &mut Interpreter) -> Outcome {
        let result = match self.partial.take() {
            Some(text) => self.run_text(interp, &text),
            None => self.define(interp),
        };
        match result {
            Ok(()) => Outcome::Exit(0),
            Err(unwind) => match self.fail(interp, unwind) {
                Outcome::Continue => Outcome::Exit(0),
                exit => exit,
            },
        }
    }

    /// Read and run console lines until end of input or BYE.
    pub fn run(mut self, interp: &mut Interpreter) -> i32 {
        debug!("session started");
        loop {
            let outcome = match interp.request_line(self.prompt()) {
                Ok(Some(text)) => self.feed(interp, &text),
                Ok(None) => self.finish(interp),
                Err(unwind) => self.fail(interp, unwind),
            };
            if let Outcome::Exit(code) = outcome {
                debug!(code, "session ended");
                return code;
            }
        }
    }
}

/// Run an interactive session on the interpreter's console.
pub fn run_session(interp: &mut Interpreter) -> i32 {
    Toplevel::new(false).run(interp)
}

/// Run Logo source text line by line, as LOAD does. The first error
/// stops loading and is returned.
pub fn load_source(interp: &mut Interpreter, text: &str) -> Result<(), Unwind> {
    let mut toplevel = Toplevel::new(true);
    for line in text.lines() {
        toplevel.step(interp, line)?;
    }
    match toplevel.partial.take() {
        Some(text) => toplevel.run_text(interp, &text),
        None => toplevel.define(interp),
    }
}

#[cfg(test)]
mod tests;

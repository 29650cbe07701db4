//! The interpreter session.
//!
//! An [`Interpreter`] owns everything a Logo session needs: the session
//! constants, the frame stack, the procedure registry, the collaborators
//! (console, canvas, procedure texts), the signal queue, and the table of
//! natively compiled entry points. It lives on one worker thread and is
//! never shared.
//!
//! # Evaluation
//!
//! Instruction lists are parsed into AST values (see [`crate::parse`]) and
//! walked here. Non-local control travels as the `Err` side of
//! [`EvalResult`]: OUTPUT and STOP as `Control::Return`, GOTO as
//! `Control::Goto`, tail calls and PAUSE resumption as
//! `Control::Continuation`, and errors as `Control::Error`. Procedure
//! activations intercept what belongs to them (see `call.rs`); everything
//! else unwinds to a CATCH or the top level.

mod builder;
mod call;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ProcedureScope;

use smallvec::SmallVec;
use tracing::debug;

use logo_value::{
    didnt_output, doesnt_like, dont_say_what_to_do, no_value, AstKind, CaseMode, Constants,
    ErrorPayload, EvalResult, Handle, PrintFlags, PrintLimits, Unwind,
};

use crate::canvas::Canvas;
use crate::code::CodeTable;
use crate::config::Config;
use crate::console::TextConsole;
use crate::control::{CatchState, PauseState};
use crate::frames::FrameStack;
use crate::parse::parse_cached;
use crate::reader::read_line;
use crate::registry::ProcedureRegistry;
use crate::signals::SignalQueue;
use crate::text_store::ProcedureTextStore;

/// How the value of the last instruction in a list is treated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Every instruction must be a command.
    Command,
    /// The last instruction may output; its value is the result.
    Expression,
}

pub struct Interpreter {
    pub(crate) constants: Constants,
    pub(crate) frames: FrameStack,
    pub(crate) registry: ProcedureRegistry,
    pub(crate) config: Config,
    pub(crate) console: Box<dyn TextConsole>,
    pub(crate) canvas: Canvas,
    pub(crate) texts: Box<dyn ProcedureTextStore>,
    pub(crate) signals: SignalQueue,
    pub(crate) catches: CatchState,
    pub(crate) pause: PauseState,
    pub(crate) code: CodeTable,
    /// Iteration counters of the active REPEATs, innermost last.
    pub(crate) repcounts: Vec<i64>,
    /// Set while ERRACT runs, so an error inside it is not recovered again.
    pub(crate) erract_active: bool,
}

impl Interpreter {
    #[inline]
    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    #[inline]
    pub fn nothing(&self) -> Handle {
        self.constants.nothing()
    }

    pub fn frames(&self) -> &FrameStack {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FrameStack {
        &mut self.frames
    }

    pub fn registry(&self) -> &ProcedureRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProcedureRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.code
    }

    pub fn texts(&self) -> &dyn ProcedureTextStore {
        self.texts.as_ref()
    }

    pub fn signals_mut(&mut self) -> &mut SignalQueue {
        &mut self.signals
    }

    /// Write text to the console.
    pub fn print(&mut self, text: &str) {
        self.console.print(text);
    }

    /// Word comparison mode: CASEIGNOREDP when it holds a boolean,
    /// otherwise the configured mode.
    pub fn case_mode(&self) -> CaseMode {
        match self.frames.lookup("caseignoredp").and_then(|v| v.as_bool()) {
            Some(true) => CaseMode::Ignore,
            Some(false) => CaseMode::Sensitive,
            None => self.config.case_mode,
        }
    }

    fn limit_variable(&self, name: &str, fallback: Option<usize>) -> Option<usize> {
        match self.frames.lookup(name).and_then(|v| v.as_number()) {
            Some(n) if n >= 0.0 => Some(n as usize),
            _ => fallback,
        }
    }

    /// PRINT's depth and width limits.
    pub fn print_limits(&self) -> PrintLimits {
        PrintLimits::new(
            self.limit_variable("printdepthlimit", self.config.print_depth_limit),
            self.limit_variable("printwidthlimit", self.config.print_width_limit),
        )
    }

    /// Render a value for output under the session's print limits.
    pub fn render(&self, value: &Handle, flags: PrintFlags) -> String {
        value.to_logo_string(flags, self.print_limits(), None)
    }

    /// The value of a variable, or a "has no value" error.
    pub fn thing(&self, name: &str) -> EvalResult {
        match self.frames.lookup(name) {
            Some(value) if !value.is_nothing() => Ok(value),
            _ => Err(no_value(name)),
        }
    }

    /// Turn a word into an instruction list by reading it.
    fn as_instruction_list(&self, list: &Handle, who: &str) -> EvalResult {
        if list.is_list() {
            return Ok(list.clone());
        }
        match list.text() {
            Some(text) => read_line(&self.constants, text),
            None => Err(doesnt_like(who, list)),
        }
    }

    /// Parse and run an instruction list (or a word, read as one).
    pub fn run_list(&mut self, list: &Handle, mode: RunMode) -> EvalResult {
        let list = self.as_instruction_list(list, "run")?;
        let parsed = parse_cached(&self.registry, &list)?;
        self.run_parsed(&parsed, mode)
    }

    /// Run a parsed sequence.
    pub(crate) fn run_parsed(&mut self, parsed: &Handle, mode: RunMode) -> EvalResult {
        let Some(sequence) = parsed.as_ast() else {
            return Ok(self.nothing());
        };
        let mut result = self.nothing();
        let count = sequence.children.len();
        for (index, statement) in sequence.children.iter().enumerate() {
            self.check_signal()?;
            let value = self.eval(statement)?;
            if !value.is_nothing() && (mode == RunMode::Command || index + 1 < count) {
                return Err(dont_say_what_to_do(&value));
            }
            result = value;
        }
        Ok(result)
    }

    /// Evaluate one expression.
    pub fn eval(&mut self, ast: &Handle) -> EvalResult {
        let Some(node) = ast.as_ast() else {
            return Ok(ast.clone());
        };
        match &node.kind {
            AstKind::Literal(value) => Ok(value.clone()),
            AstKind::Variable(name) => self.thing(name),
            AstKind::Call(name) => {
                let args = self.eval_inputs(&node.children, name)?;
                self.call_procedure(name, &args)
            }
            AstKind::Sequence { .. } => self.run_parsed(ast, RunMode::Expression),
        }
    }

    /// Evaluate the inputs of a call to `callee`. Each must output.
    fn eval_inputs(
        &mut self,
        children: &[Handle],
        callee: &str,
    ) -> Result<SmallVec<[Handle; 4]>, Unwind> {
        let mut args = SmallVec::with_capacity(children.len());
        for child in children {
            let value = self.eval(child)?;
            if value.is_nothing() {
                let name = child.as_ast().map_or("", |n| n.name());
                return Err(didnt_output(name, callee));
            }
            args.push(value);
        }
        Ok(args)
    }

    /// Raise the pending signal, if any, as an error.
    pub fn check_signal(&mut self) -> Result<(), Unwind> {
        match self.signals.take() {
            Some(signal) => Err(signal.to_unwind()),
            None => Ok(()),
        }
    }

    /// Explicit yield: drain queued signals and act on them.
    pub fn yield_now(&mut self) -> Result<(), Unwind> {
        self.signals.drain();
        self.check_signal()
    }

    /// Read a line from the console. A suspension point.
    pub fn request_line(&mut self, prompt: &str) -> Result<Option<String>, Unwind> {
        let line = self.console.request_line(prompt);
        self.yield_now()?;
        Ok(line)
    }

    /// Read one character from the console. A suspension point.
    pub fn request_char(&mut self) -> Result<Option<char>, Unwind> {
        let c = self.console.request_char();
        self.yield_now()?;
        Ok(c)
    }

    /// Write an uncaught error to the console.
    pub fn report_error(&mut self, error: &ErrorPayload) {
        let mut text = error.message.clone();
        if let Some(procedure) = &error.procedure {
            text.push_str(" in ");
            text.push_str(procedure);
        }
        text.push('\n');
        if error.procedure.is_some() {
            if let Some(line) = &error.line {
                text.push_str(&line.to_logo_string(
                    PrintFlags::SHOW_BRACKETS,
                    PrintLimits::NONE,
                    None,
                ));
                text.push('\n');
            }
        }
        self.console.print(&text);
    }

    /// Return to a clean top level after an error: drop procedure frames,
    /// active catches, REPEAT counters and pause state. Variables and
    /// procedures are kept.
    pub fn reset_after_error(&mut self) {
        self.frames.unwind_to_global();
        self.catches.clear_frames();
        self.repcounts.clear();
        self.pause = PauseState::default();
        self.erract_active = false;
    }

    /// ERALL plus a frame reset. Buried names survive.
    pub fn reset_workspace(&mut self) {
        self.reset_after_error();
        self.registry.erase_all();
        let registry = &self.registry;
        self.frames.erase_all(|name| registry.is_buried(name));
        debug!("workspace reset");
    }

    /// Record a TEST result in the current frame.
    pub fn set_test(&mut self, result: bool) {
        self.frames.set_test(result);
    }

    /// The most recent visible TEST result.
    pub fn test_result(&self) -> Option<bool> {
        self.frames.test_result()
    }

    /// REPEAT's iteration counter, or -1 outside REPEAT.
    pub fn repcount(&self) -> i64 {
        self.repcounts.last().copied().unwrap_or(-1)
    }
}

#[cfg(test)]
mod tests;

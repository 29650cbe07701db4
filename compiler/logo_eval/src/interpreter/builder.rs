//! `InterpreterBuilder` for creating sessions with chosen collaborators.

use crossbeam::channel::Receiver;
use tracing::{debug, warn};

use logo_value::Constants;

use super::Interpreter;
use crate::canvas::{Canvas, DrawingSink, NullCanvas};
use crate::code::CodeTable;
use crate::config::Config;
use crate::console::{StdConsole, TextConsole};
use crate::control::{CatchState, PauseState};
use crate::definition::from_source;
use crate::frames::FrameStack;
use crate::primitives;
use crate::reader::read_line;
use crate::registry::ProcedureRegistry;
use crate::signals::{Signal, SignalQueue};
use crate::text_store::{BuiltinTexts, ProcedureTextStore};

/// Builder for [`Interpreter`].
///
/// Defaults: stdin/stdout console, a canvas that discards drawing, the
/// built-in library texts, no signal channel, and `Config::default()`.
#[derive(Default)]
pub struct InterpreterBuilder {
    console: Option<Box<dyn TextConsole>>,
    canvas: Option<Box<dyn DrawingSink>>,
    texts: Option<Box<dyn ProcedureTextStore>>,
    signals: Option<Receiver<Signal>>,
    config: Config,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn console(mut self, console: impl TextConsole + 'static) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    #[must_use]
    pub fn canvas(mut self, canvas: impl DrawingSink + 'static) -> Self {
        self.canvas = Some(Box::new(canvas));
        self
    }

    /// Source of library procedures and help text.
    #[must_use]
    pub fn help(mut self, texts: impl ProcedureTextStore + 'static) -> Self {
        self.texts = Some(Box::new(texts));
        self
    }

    #[must_use]
    pub fn signals(mut self, receiver: Receiver<Signal>) -> Self {
        self.signals = Some(receiver);
        self
    }

    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build the session: register primitives, then define and bury the
    /// library procedures.
    pub fn build(self) -> Interpreter {
        let mut registry = ProcedureRegistry::new();
        primitives::register_all(&mut registry);
        let mut interp = Interpreter {
            constants: Constants::new(),
            frames: FrameStack::new(self.config.recursion_limit),
            registry,
            console: self.console.unwrap_or_else(|| Box::new(StdConsole::new())),
            canvas: Canvas::new(self.canvas.unwrap_or_else(|| Box::new(NullCanvas))),
            texts: self.texts.unwrap_or_else(|| Box::new(BuiltinTexts)),
            signals: self.signals.map(SignalQueue::new).unwrap_or_default(),
            catches: CatchState::default(),
            pause: PauseState::default(),
            code: CodeTable::default(),
            repcounts: Vec::new(),
            erract_active: false,
            config: self.config,
        };
        interp.load_library();
        interp.install_erract();
        interp
    }
}

impl Interpreter {
    fn load_library(&mut self) {
        let sources: Vec<(String, String)> = self
            .texts
            .library_names()
            .into_iter()
            .filter_map(|name| {
                let text = self.texts.procedure_text(name)?;
                Some((name.to_string(), text.to_string()))
            })
            .collect();
        for (name, text) in sources {
            let lines: Vec<String> = text.lines().map(str::to_string).collect();
            match from_source(&self.constants, &lines) {
                Ok(procedure) => {
                    self.registry.define(procedure);
                    self.registry.bury(&name);
                }
                Err(err) => warn!(name = %name, error = ?err, "library procedure failed to load"),
            }
        }
        debug!(generation = self.registry.generation(), "library loaded");
    }

    fn install_erract(&mut self) {
        let Some(text) = self.config.erract.clone() else {
            return;
        };
        match read_line(&self.constants, &text) {
            Ok(list) => self.frames.assign("erract", list),
            Err(err) => warn!(error = ?err, "ignoring unreadable erract"),
        }
    }
}

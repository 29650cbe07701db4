//! The worker thread and its side of the protocol.
//!
//! The interpreter is built on the worker and never leaves it. Its console
//! and canvas are channel endpoints: every read sends a request and blocks
//! until the front end answers.

use std::thread::{self, JoinHandle};

use crossbeam::channel::{Receiver, Sender};
use tracing::{debug, warn};

use logo_eval::{
    load_source, Config, DrawCommand, DrawingSink, InterpreterBuilder, Outcome, Signal,
    TextConsole, Toplevel,
};

use crate::error::DriverError;
use crate::messages::{FrontEndMessage, WorkerMessage};

/// A source file read by the driver, loaded before the session starts.
#[derive(Clone, Debug)]
pub struct Source {
    pub name: String,
    pub text: String,
}

/// Console that forwards to the front end.
pub struct ChannelConsole {
    to_front: Sender<WorkerMessage>,
    from_front: Receiver<FrontEndMessage>,
}

impl ChannelConsole {
    pub fn new(to_front: Sender<WorkerMessage>, from_front: Receiver<FrontEndMessage>) -> Self {
        ChannelConsole { to_front, from_front }
    }

    fn request(&self, message: WorkerMessage) -> Option<FrontEndMessage> {
        if self.to_front.send(message).is_err() {
            warn!("front end gone; treating as end of input");
            return None;
        }
        match self.from_front.recv() {
            Ok(answer) => Some(answer),
            Err(_) => {
                warn!("front end gone; treating as end of input");
                None
            }
        }
    }
}

impl TextConsole for ChannelConsole {
    fn print(&mut self, text: &str) {
        if self.to_front.send(WorkerMessage::Print(text.to_string())).is_err() {
            warn!("front end gone; output dropped");
        }
    }

    fn request_line(&mut self, prompt: &str) -> Option<String> {
        match self.request(WorkerMessage::RequestLine(prompt.to_string()))? {
            FrontEndMessage::Line(line) => line,
            FrontEndMessage::Char(c) => {
                warn!(?c, "front end answered a line request with a character");
                c.map(String::from)
            }
        }
    }

    fn request_char(&mut self) -> Option<char> {
        match self.request(WorkerMessage::RequestChar)? {
            FrontEndMessage::Char(c) => c,
            FrontEndMessage::Line(line) => {
                warn!("front end answered a character request with a line");
                line.and_then(|line| line.chars().next())
            }
        }
    }
}

/// Canvas that forwards drawing updates to the front end.
pub struct ChannelCanvas {
    to_front: Sender<WorkerMessage>,
}

impl ChannelCanvas {
    pub fn new(to_front: Sender<WorkerMessage>) -> Self {
        ChannelCanvas { to_front }
    }
}

impl DrawingSink for ChannelCanvas {
    fn submit(&mut self, command: DrawCommand) {
        // Drawing without a front end is not an error worth stopping for.
        let _ = self.to_front.send(WorkerMessage::Draw(command));
    }
}

/// Everything the worker needs, all of it `Send`.
pub(crate) struct WorkerSetup {
    pub config: Config,
    pub quiet: bool,
    pub sources: Vec<Source>,
    pub signals: Receiver<Signal>,
    pub to_front: Sender<WorkerMessage>,
    pub from_front: Receiver<FrontEndMessage>,
}

pub(crate) fn spawn(setup: WorkerSetup) -> Result<JoinHandle<()>, DriverError> {
    thread::Builder::new()
        .name("logo-worker".to_string())
        .spawn(move || run_worker(setup))
        .map_err(DriverError::Spawn)
}

fn run_worker(setup: WorkerSetup) {
    debug!(sources = setup.sources.len(), "worker started");
    let to_front = setup.to_front.clone();
    let mut interp = InterpreterBuilder::new()
        .console(ChannelConsole::new(setup.to_front.clone(), setup.from_front))
        .canvas(ChannelCanvas::new(setup.to_front))
        .signals(setup.signals)
        .config(setup.config)
        .build();

    let mut code = None;
    for source in &setup.sources {
        debug!(name = %source.name, "loading");
        if let Err(unwind) = load_source(&mut interp, &source.text) {
            if let Outcome::Exit(exit) = Toplevel::new(true).fail(&mut interp, unwind) {
                code = Some(exit);
                break;
            }
        }
    }
    let code = code.unwrap_or_else(|| Toplevel::new(setup.quiet).run(&mut interp));

    debug!(code, "worker exiting");
    if to_front.send(WorkerMessage::Exit(code)).is_err() {
        warn!("front end gone before exit");
    }
}

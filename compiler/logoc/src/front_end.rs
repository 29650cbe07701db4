//! The text-mode front end.
//!
//! Runs on the main thread. It owns the terminal: it writes what the
//! worker prints, answers its input requests from a reader, and hands
//! drawing updates to an optional sink. It never touches a Logo value.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crossbeam::channel::{Receiver, Sender};
use tracing::trace;

use logo_eval::DrawingSink;

use crate::error::DriverError;
use crate::messages::{FrontEndMessage, WorkerMessage};

pub struct FrontEnd<R, W> {
    input: R,
    output: W,
    /// Rest of a line read to answer a character request.
    pending: VecDeque<char>,
    canvas: Option<Box<dyn DrawingSink>>,
}

impl<R: BufRead, W: Write> FrontEnd<R, W> {
    pub fn new(input: R, output: W) -> Self {
        FrontEnd {
            input,
            output,
            pending: VecDeque::new(),
            canvas: None,
        }
    }

    /// Hand drawing updates to `canvas` instead of dropping them.
    #[must_use]
    pub fn with_canvas(mut self, canvas: impl DrawingSink + 'static) -> Self {
        self.canvas = Some(Box::new(canvas));
        self
    }

    /// Serve the worker until it exits. Returns its exit status.
    pub(crate) fn serve(
        &mut self,
        from_worker: &Receiver<WorkerMessage>,
        to_worker: &Sender<FrontEndMessage>,
    ) -> Result<i32, DriverError> {
        loop {
            let Ok(message) = from_worker.recv() else {
                return Err(DriverError::WorkerGone);
            };
            match message {
                WorkerMessage::Print(text) => self.write(&text)?,
                WorkerMessage::RequestLine(prompt) => {
                    self.write(&prompt)?;
                    let line = self.read_line()?;
                    reply(to_worker, FrontEndMessage::Line(line))?;
                }
                WorkerMessage::RequestChar => {
                    let c = self.read_char()?;
                    reply(to_worker, FrontEndMessage::Char(c))?;
                }
                WorkerMessage::Draw(command) => match &mut self.canvas {
                    Some(canvas) => canvas.submit(command),
                    None => trace!(?command, "no canvas; drawing dropped"),
                },
                WorkerMessage::Exit(code) => {
                    self.output.flush()?;
                    return Ok(code);
                }
            }
        }
    }

    fn write(&mut self, text: &str) -> Result<(), DriverError> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    fn read_raw_line(&mut self) -> Result<Option<String>, DriverError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn read_line(&mut self) -> Result<Option<String>, DriverError> {
        let line = if self.pending.is_empty() {
            self.read_raw_line()?
        } else {
            Some(self.pending.drain(..).collect())
        };
        Ok(line.map(|line| line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn read_char(&mut self) -> Result<Option<char>, DriverError> {
        if self.pending.is_empty() {
            match self.read_raw_line()? {
                Some(line) => self.pending.extend(line.chars()),
                None => return Ok(None),
            }
        }
        Ok(self.pending.pop_front())
    }
}

fn reply(to_worker: &Sender<FrontEndMessage>, message: FrontEndMessage) -> Result<(), DriverError> {
    to_worker.send(message).map_err(|_| DriverError::WorkerGone)
}

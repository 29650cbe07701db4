//! Text console collaborator.
//!
//! The worker writes text and asks for input through [`TextConsole`].
//! A request blocks the worker until the other side answers, so every
//! read is a suspension point.
//!
//! - [`StdConsole`]: process stdin/stdout.
//! - [`BufferConsole`]: scripted input and captured output, for tests and
//!   embedding.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use parking_lot::Mutex;

pub trait TextConsole {
    /// Write text as is. Callers add newlines.
    fn print(&mut self, text: &str);

    /// Show `prompt` and wait for a line. `None` at end of input.
    fn request_line(&mut self, prompt: &str) -> Option<String>;

    /// Wait for one character. `None` at end of input.
    fn request_char(&mut self) -> Option<char>;
}

/// Console on the process's standard streams.
#[derive(Default)]
pub struct StdConsole {
    pending: VecDeque<char>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_stdin_line() -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

impl TextConsole for StdConsole {
    fn print(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        // A closed stdout has nowhere to report to.
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    fn request_line(&mut self, prompt: &str) -> Option<String> {
        self.print(prompt);
        if !self.pending.is_empty() {
            let line: String = self.pending.drain(..).collect();
            return Some(line.trim_end_matches(['\n', '\r']).to_string());
        }
        Self::read_stdin_line().map(|line| line.trim_end_matches(['\n', '\r']).to_string())
    }

    fn request_char(&mut self) -> Option<char> {
        if self.pending.is_empty() {
            self.pending.extend(Self::read_stdin_line()?.chars());
        }
        self.pending.pop_front()
    }
}

/// Console with scripted input and captured output.
///
/// Output goes to a shared buffer so it can be inspected after the
/// console has been handed to an interpreter.
#[derive(Default)]
pub struct BufferConsole {
    output: Arc<Mutex<String>>,
    input: VecDeque<char>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// A console whose input is `lines`, each ended by a newline.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut console = Self::new();
        for line in lines {
            console.input.extend(line.as_ref().chars());
            console.input.push_back('\n');
        }
        console
    }

    /// Shared handle on the captured output.
    pub fn output_handle(&self) -> Arc<Mutex<String>> {
        Arc::clone(&self.output)
    }

    pub fn output(&self) -> String {
        self.output.lock().clone()
    }
}

impl TextConsole for BufferConsole {
    fn print(&mut self, text: &str) {
        self.output.lock().push_str(text);
    }

    fn request_line(&mut self, _prompt: &str) -> Option<String> {
        if self.input.is_empty() {
            return None;
        }
        let mut line = String::new();
        while let Some(c) = self.input.pop_front() {
            if c == '\n' {
                break;
            }
            line.push(c);
        }
        Some(line)
    }

    fn request_char(&mut self) -> Option<char> {
        self.input.pop_front()
    }
}

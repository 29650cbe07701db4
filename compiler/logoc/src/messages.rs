//! The message protocol between the worker and the front end.
//!
//! Nothing here refers to a Logo value: everything the front end sees is
//! copied into plain data first.

use logo_eval::DrawCommand;

/// Worker to front end.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkerMessage {
    /// Text to show as is.
    Print(String),
    /// Show the prompt and answer with [`FrontEndMessage::Line`].
    RequestLine(String),
    /// Answer with [`FrontEndMessage::Char`].
    RequestChar,
    Draw(DrawCommand),
    /// The session is over.
    Exit(i32),
}

/// Front end to worker. Only ever sent in answer to a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrontEndMessage {
    /// A line without its terminator; `None` at end of input.
    Line(Option<String>),
    Char(Option<char>),
}

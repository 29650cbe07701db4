//! Asynchronous signals from the front end.
//!
//! The front end queues signals on a channel at any time. The worker only
//! looks at the channel at its drain points (after a console read, at each
//! top-level statement, and at explicit yields); a drained signal waits in
//! the pending slot until the next instruction boundary turns it into an
//! error.

use crossbeam::channel::{unbounded, Receiver, Sender, TryRecvError};
use tracing::{debug, warn};

use logo_value::{return_to_toplevel, terminate, Unwind};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Abandon the running program and return to the top-level prompt.
    Toplevel,
    /// End the session.
    Terminate,
}

impl Signal {
    /// The error this signal unwinds the worker with.
    pub fn to_unwind(self) -> Unwind {
        match self {
            Signal::Toplevel => return_to_toplevel(),
            Signal::Terminate => terminate(),
        }
    }
}

/// Create a signal channel.
pub fn signal_channel() -> (Sender<Signal>, Receiver<Signal>) {
    unbounded()
}

/// Worker-side end of the signal channel.
#[derive(Default)]
pub struct SignalQueue {
    receiver: Option<Receiver<Signal>>,
    pending: Option<Signal>,
}

impl SignalQueue {
    pub fn new(receiver: Receiver<Signal>) -> Self {
        SignalQueue {
            receiver: Some(receiver),
            pending: None,
        }
    }

    /// Move every queued signal into the pending slot. Terminate wins over
    /// return-to-top-level.
    pub fn drain(&mut self) {
        let Some(receiver) = self.receiver.clone() else {
            return;
        };
        loop {
            match receiver.try_recv() {
                Ok(signal) => {
                    debug!(?signal, "drained signal");
                    self.raise(signal);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("signal channel closed");
                    self.receiver = None;
                    break;
                }
            }
        }
    }

    /// Set a signal pending directly.
    pub fn raise(&mut self, signal: Signal) {
        if self.pending != Some(Signal::Terminate) {
            self.pending = Some(signal);
        }
    }

    /// Take the pending signal, if any.
    pub fn take(&mut self) -> Option<Signal> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

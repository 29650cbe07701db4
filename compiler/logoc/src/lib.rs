//! The `logo` command-line driver.
//!
//! The interpreter runs on a worker thread; the terminal belongs to a
//! front end on the calling thread. They talk only through the messages
//! in [`messages`], and asynchronous signals travel on their own channel.

pub mod error;
pub mod front_end;
pub mod messages;
pub mod options;
pub mod worker;

use std::sync::Once;

use crossbeam::channel::{unbounded, Receiver, Sender};
use tracing::debug;

use logo_eval::{signal_channel, Signal};

pub use error::DriverError;
pub use front_end::FrontEnd;
pub use messages::{FrontEndMessage, WorkerMessage};
pub use options::{Options, USAGE};
pub use worker::{ChannelCanvas, ChannelConsole, Source};

use worker::WorkerSetup;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=logo_eval=debug`.
/// With `LOGO_TRACE_TREE` also set, spans are shown as an indented tree.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
        if std::env::var_os("LOGO_TRACE_TREE").is_some() {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

/// One run of the driver: load the files, then serve a session.
pub struct Driver {
    options: Options,
    signal_tx: Sender<Signal>,
    signal_rx: Receiver<Signal>,
}

impl Driver {
    pub fn new(options: Options) -> Self {
        let (signal_tx, signal_rx) = signal_channel();
        Driver {
            options,
            signal_tx,
            signal_rx,
        }
    }

    /// Sender for asynchronous signals to the worker. The worker looks at
    /// them only at its drain points.
    pub fn signals(&self) -> Sender<Signal> {
        self.signal_tx.clone()
    }

    /// Read the source files, start the worker and serve it until it
    /// exits. Returns the session's exit status.
    pub fn run<R, W>(self, mut front_end: FrontEnd<R, W>) -> Result<i32, DriverError>
    where
        R: std::io::BufRead,
        W: std::io::Write,
    {
        let sources = self.read_sources()?;
        let (to_front, from_worker) = unbounded();
        let (to_worker, from_front) = unbounded();
        let handle = worker::spawn(WorkerSetup {
            config: self.options.config.clone(),
            quiet: self.options.quiet,
            sources,
            signals: self.signal_rx,
            to_front,
            from_front,
        })?;

        let served = front_end.serve(&from_worker, &to_worker);
        if served.is_err() {
            // Stops a worker that is busy rather than waiting on us.
            let _ = self.signal_tx.send(Signal::Terminate);
        }
        // Unblocks a worker still waiting for an answer.
        drop(to_worker);
        let joined = handle.join();
        debug!(ok = served.is_ok(), "worker joined");
        match (served, joined) {
            (_, Err(_)) => Err(DriverError::WorkerPanicked),
            (served, Ok(())) => served,
        }
    }

    fn read_sources(&self) -> Result<Vec<Source>, DriverError> {
        self.options
            .files
            .iter()
            .map(|path| {
                let text = std::fs::read_to_string(path).map_err(|source| DriverError::File {
                    path: path.clone(),
                    source,
                })?;
                Ok(Source {
                    name: path.display().to_string(),
                    text,
                })
            })
            .collect()
    }
}

//! Host-level failures of the driver.
//!
//! Logo errors never show up here: they are values inside the worker and
//! are reported through the console. These are the failures around it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("unknown option `{0}` (try --help)")]
    UnknownOption(String),

    #[error("option `{option}` needs a number, got `{value}`")]
    BadNumber { option: String, value: String },

    #[error("cannot read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot start the worker thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("the worker thread stopped without saying goodbye")]
    WorkerGone,

    #[error("the worker thread panicked")]
    WorkerPanicked,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

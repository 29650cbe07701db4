//! Command-line options.

use std::path::PathBuf;

use logo_eval::{CaseMode, Config};

use crate::error::DriverError;

pub const USAGE: &str = "\
Usage: logo [FILE...] [options]

Loads each FILE, then reads instructions from standard input.

Options:
  --print-depth=N       Deepest sublist level PRINT shows
  --print-width=N       Most items PRINT shows per list
  --recursion-limit=N   Most nested procedure calls
  --case-sensitive      Compare words with case
  --quiet               Do not acknowledge definitions
  -h, --help            Show this message
";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Source files loaded before the session starts, in order.
    pub files: Vec<PathBuf>,
    pub config: Config,
    pub quiet: bool,
    pub help: bool,
}

impl Options {
    /// Parse arguments, program name excluded.
    pub fn parse<I, S>(args: I) -> Result<Self, DriverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Options::default();
        for arg in args {
            let arg = arg.as_ref();
            if let Some(value) = arg.strip_prefix("--print-depth=") {
                options.config.print_depth_limit = Some(number("--print-depth", value)?);
            } else if let Some(value) = arg.strip_prefix("--print-width=") {
                options.config.print_width_limit = Some(number("--print-width", value)?);
            } else if let Some(value) = arg.strip_prefix("--recursion-limit=") {
                options.config.recursion_limit = number("--recursion-limit", value)?;
            } else if arg == "--case-sensitive" {
                options.config.case_mode = CaseMode::Sensitive;
            } else if arg == "--quiet" || arg == "-q" {
                options.quiet = true;
            } else if arg == "--help" || arg == "-h" {
                options.help = true;
            } else if arg.starts_with('-') && arg != "-" {
                return Err(DriverError::UnknownOption(arg.to_string()));
            } else {
                options.files.push(PathBuf::from(arg));
            }
        }
        Ok(options)
    }
}

fn number(option: &str, value: &str) -> Result<usize, DriverError> {
    value.parse().map_err(|_| DriverError::BadNumber {
        option: option.to_string(),
        value: value.to_string(),
    })
}

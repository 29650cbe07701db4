//! Logo interpreter CLI.

use std::io;
use std::process::ExitCode;

use logoc::{init_tracing, Driver, FrontEnd, Options, USAGE};

fn main() -> ExitCode {
    init_tracing();

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("logo: {err}");
            return ExitCode::from(2);
        }
    };
    if options.help {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let front_end = FrontEnd::new(io::stdin().lock(), io::stdout().lock());
    match Driver::new(options).run(front_end) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            eprintln!("logo: {err}");
            ExitCode::FAILURE
        }
    }
}

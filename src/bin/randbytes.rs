//! `randbytes`: write N cryptographically secure random bytes to stdout.

#![allow(clippy::print_stderr)]

use bitkit::cli::{RandbytesCli, format_error, init_logging, parse_args, run_randbytes};
use bitkit::io::Sink;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli: RandbytesCli = match parse_args() {
        Ok(cli) => cli,
        Err(code) => return code,
    };
    init_logging(cli.verbose);

    let mut sink = Sink::stdout();
    match run_randbytes(&cli, &mut sink) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", format_error(&e));
            ExitCode::FAILURE
        }
    }
}

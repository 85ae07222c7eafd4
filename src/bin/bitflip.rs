//! `bitflip`: copy a file with one random bit inverted.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use bitkit::cli::{BitflipCli, format_error, init_logging, parse_args, run_bitflip};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli: BitflipCli = match parse_args() {
        Ok(cli) => cli,
        Err(code) => return code,
    };
    init_logging(cli.verbose);

    match run_bitflip(&cli) {
        Ok(output) => {
            if let Err(e) = write!(io::stdout(), "{output}")
                && e.kind() != io::ErrorKind::BrokenPipe
            {
                eprintln!("Error writing to stdout: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", format_error(&e));
            ExitCode::FAILURE
        }
    }
}

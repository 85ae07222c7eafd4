//! CLI layer for bitkit.
//!
//! Argument parsers, command implementations, summary formatting and
//! logging setup shared by the `bitflip`, `randbytes` and `xorfiles`
//! executables.

pub mod commands;
pub mod logging;
pub mod output;
pub mod parser;

pub use commands::{run_bitflip, run_randbytes, run_xorfiles};
pub use logging::init_logging;
pub use output::{OutputFormat, format_error};
pub use parser::{BitflipCli, RandbytesCli, XorfilesCli};

use clap::Parser;
use std::process::ExitCode;

/// Parses arguments, exiting with status 1 on usage errors.
///
/// `--help` and `--version` print and exit with status 0.
///
/// # Errors
///
/// Returns the exit code to use when parsing does not produce arguments.
pub fn parse_args<T: Parser>() -> std::result::Result<T, ExitCode> {
    T::try_parse().map_err(|e| {
        let _ = e.print();
        if e.use_stderr() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    })
}

//! CLI command implementations.
//!
//! Each executable parses its arguments and hands them to one of these
//! functions. Tools that emit raw bytes take the sink as a parameter.

use crate::cli::output::{OutputFormat, format_flip_report};
use crate::cli::parser::{BitflipCli, RandbytesCli, XorfilesCli};
use crate::error::Result;
use crate::flip::{FlipOptions, flip_copy};
use crate::io::Sink;
use crate::{random, xor};
use std::io::Write;

/// Runs `bitflip` and returns the summary to print.
///
/// # Errors
///
/// Returns an error if the copy fails.
pub fn run_bitflip(cli: &BitflipCli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let options = FlipOptions {
        seed: cli.seed,
        bit_index: cli.bit_index,
    };

    let report = flip_copy(&cli.source, &cli.destination, options)?;
    Ok(format_flip_report(&report, format))
}

/// Runs `randbytes`, writing the bytes to `sink`.
///
/// # Errors
///
/// Returns an error if the bytes cannot be produced or written.
pub fn run_randbytes<W: Write>(cli: &RandbytesCli, sink: &mut Sink<W>) -> Result<u64> {
    random::emit(cli.length, sink)
}

/// Runs `xorfiles`, writing the XOR to `sink`.
///
/// # Errors
///
/// Returns an error if either file cannot be read or the sink fails.
pub fn run_xorfiles<W: Write>(cli: &XorfilesCli, sink: &mut Sink<W>) -> Result<u64> {
    xor::xor_files(&cli.first, &cli.second, sink)
}

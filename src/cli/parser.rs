//! Command-line argument parsing.
//!
//! One clap parser per executable.

use crate::random::parse_length;
use clap::Parser;
use std::num::NonZeroU64;
use std::path::PathBuf;

/// Copy a file, flipping exactly one randomly chosen bit.
///
/// The destination is created or overwritten and must have room for the
/// whole source.
#[derive(Parser, Debug)]
#[command(name = "bitflip")]
#[command(version, about, long_about = None)]
pub struct BitflipCli {
    /// File to copy.
    pub source: PathBuf,

    /// File to write (created or truncated).
    pub destination: PathBuf,

    /// Seed for bit selection (defaults to the current time).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Flip this bit index instead of a random one (LSB-first).
    #[arg(long = "bit", value_name = "INDEX", conflicts_with = "seed")]
    pub bit_index: Option<u64>,

    /// Summary format (text, json).
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Write cryptographically secure random bytes to stdout.
#[derive(Parser, Debug)]
#[command(name = "randbytes")]
#[command(version, about, long_about = None)]
pub struct RandbytesCli {
    /// Number of bytes to emit (positive integer).
    #[arg(value_parser = parse_length, allow_negative_numbers = true)]
    pub length: NonZeroU64,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// XOR two files byte by byte and write the result to stdout.
///
/// Output length is that of the shorter file.
#[derive(Parser, Debug)]
#[command(name = "xorfiles")]
#[command(version, about, long_about = None)]
pub struct XorfilesCli {
    /// First input file.
    pub first: PathBuf,

    /// Second input file.
    pub second: PathBuf,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

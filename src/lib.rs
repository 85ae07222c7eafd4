//! # bitkit
//!
//! Small utilities for raw byte files.
//!
//! - [`flip`]: copy a file while inverting exactly one randomly chosen bit,
//!   streaming in fixed-size chunks so arbitrarily large files fit.
//! - [`random`]: produce N bytes from the operating system's secure
//!   generator.
//! - [`xor`]: XOR two byte streams pairwise, truncating to the shorter one.
//!
//! Each operation has a matching executable (`bitflip`, `randbytes`,
//! `xorfiles`) built on the [`cli`] module.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod flip;
pub mod io;
pub mod random;
pub mod xor;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

pub use flip::{BitPosition, CHUNK_SIZE, FlipOptions, FlipReport, flip_copy, flip_stream};
pub use io::{Sink, Source};
pub use random::{emit, parse_length, random_bytes};
pub use xor::{xor_files, xor_streams};

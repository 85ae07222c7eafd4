//! I/O plumbing for bitkit.
//!
//! Provides named sources and sinks that attach the file path or stream
//! name to every failure.

pub mod stream;

pub use stream::{STDOUT_NAME, Sink, Source};

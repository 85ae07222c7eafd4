//! Pairwise XOR of two byte streams.
//!
//! Output stops at the end of the shorter input. A read fault on either
//! input aborts with an error instead of being treated as end of input.

use crate::error::Result;
use crate::io::{Sink, Source};
use std::io::{Read, Write};
use std::path::Path;

/// Writes `first[i] ^ second[i]` to `sink` until either source ends.
///
/// Returns the number of bytes written, `min(len(first), len(second))`.
///
/// # Errors
///
/// Returns an I/O error naming the failing source or sink.
pub fn xor_streams<A: Read, B: Read, W: Write>(
    first: &mut Source<A>,
    second: &mut Source<B>,
    sink: &mut Sink<W>,
) -> Result<u64> {
    let mut count: u64 = 0;

    while let Some(a) = first.read_byte()? {
        let Some(b) = second.read_byte()? else {
            break;
        };
        sink.write_all(&[a ^ b])?;
        count += 1;
    }

    sink.flush()?;
    tracing::debug!(
        bytes = count,
        first = first.name(),
        second = second.name(),
        "xor complete"
    );
    Ok(count)
}

/// Opens two files and XORs them into `sink`.
///
/// # Errors
///
/// Returns an I/O error if either file cannot be opened or read, or if the
/// sink rejects a write.
pub fn xor_files<P: AsRef<Path>, Q: AsRef<Path>, W: Write>(
    first: P,
    second: Q,
    sink: &mut Sink<W>,
) -> Result<u64> {
    let mut first = Source::open(first)?.buffered();
    let mut second = Source::open(second)?.buffered();
    xor_streams(&mut first, &mut second, sink)
}

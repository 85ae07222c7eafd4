//! Cryptographically secure random bytes.
//!
//! Bytes come from the operating system generator and are written out as a
//! single contiguous block.

use crate::error::{ResourceError, Result, UsageError};
use crate::io::Sink;
use rand::RngCore;
use rand::rngs::OsRng;
use std::io::Write;
use std::num::NonZeroU64;

/// Parses a byte count that must be a positive decimal integer.
///
/// # Errors
///
/// Returns [`UsageError::InvalidLength`] for zero, negative or non-numeric
/// input.
///
/// # Examples
///
/// ```
/// use bitkit::random::parse_length;
///
/// assert_eq!(parse_length("16").unwrap().get(), 16);
/// assert!(parse_length("0").is_err());
/// ```
pub fn parse_length(value: &str) -> Result<NonZeroU64> {
    value
        .parse::<u64>()
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or_else(|| {
            UsageError::InvalidLength {
                value: value.to_string(),
            }
            .into()
        })
}

/// Returns `len` bytes from the operating system generator.
///
/// # Errors
///
/// Returns [`ResourceError::AllocationFailed`] if the buffer cannot be
/// allocated and [`ResourceError::EntropyUnavailable`] if the generator
/// fails.
pub fn random_bytes(len: NonZeroU64) -> Result<Vec<u8>> {
    let requested = len.get();
    let size =
        usize::try_from(requested).map_err(|_| ResourceError::AllocationFailed { requested })?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| ResourceError::AllocationFailed { requested })?;
    buf.resize(size, 0);

    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| ResourceError::EntropyUnavailable {
            reason: e.to_string(),
        })?;

    Ok(buf)
}

/// Writes `len` random bytes to `sink` and flushes it.
///
/// # Errors
///
/// Returns a resource error if the bytes cannot be produced and an I/O
/// error if the sink accepts fewer than `len` bytes.
pub fn emit<W: Write>(len: NonZeroU64, sink: &mut Sink<W>) -> Result<u64> {
    let bytes = random_bytes(len)?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    tracing::debug!(bytes = len.get(), sink = sink.name(), "emitted random bytes");
    Ok(len.get())
}

//! Copy a byte stream while inverting exactly one bit.
//!
//! The target bit is chosen uniformly over the `8 * len` bit positions of
//! the input before any data moves, then the input is streamed through a
//! fixed-size buffer so memory use does not depend on the input size.
//!
//! Bits are numbered least-significant first: bit index `8 * k + j` is mask
//! `1 << j` of byte `k`.

use crate::error::{IoError, Result, UsageError};
use crate::io::{Sink, Source};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Size of the streaming buffer (64 KiB).
pub const CHUNK_SIZE: usize = 64 * 1024;

/// A bit position split into byte offset and bit-within-byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitPosition {
    /// Byte offset from the start of the input.
    pub byte: u64,
    /// Bit within the byte, 0 is the least significant.
    pub bit: u8,
}

impl BitPosition {
    /// Splits a flat bit index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(index: u64) -> Self {
        Self {
            byte: index / 8,
            bit: (index % 8) as u8,
        }
    }

    /// Returns the flat bit index.
    #[must_use]
    pub const fn index(self) -> u64 {
        self.byte * 8 + self.bit as u64
    }

    /// Returns the XOR mask for the target byte.
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << self.bit
    }
}

/// Optional knobs for [`flip_copy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlipOptions {
    /// PRNG seed. Defaults to [`time_seed`].
    pub seed: Option<u64>,
    /// Force this bit index instead of drawing one. Takes precedence over `seed`.
    pub bit_index: Option<u64>,
}

/// Result of streaming a source through [`flip_stream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Bytes written to the destination.
    pub bytes_copied: u64,
    /// The bit that was inverted, if the target lay inside the data.
    pub flipped: Option<BitPosition>,
}

/// Summary of a file-level copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlipReport {
    /// Source path.
    pub source: String,
    /// Destination path.
    pub destination: String,
    /// Bytes written to the destination.
    pub bytes_copied: u64,
    /// Seed used to draw the bit, absent when the bit was forced.
    pub seed: Option<u64>,
    /// Flat index of the flipped bit.
    pub bit_index: Option<u64>,
    /// Position of the flipped bit.
    pub flipped: Option<BitPosition>,
}

/// Returns a seed derived from the current time in nanoseconds.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

/// Draws a bit position uniformly over `8 * len_bytes` positions.
///
/// Returns `None` for empty input. The byte and the bit within it are drawn
/// independently, which is uniform over all positions and cannot overflow.
pub fn pick_bit<R: Rng + ?Sized>(len_bytes: u64, rng: &mut R) -> Option<BitPosition> {
    if len_bytes == 0 {
        return None;
    }
    Some(BitPosition {
        byte: rng.gen_range(0..len_bytes),
        bit: rng.gen_range(0..8),
    })
}

/// Streams `source` into `sink`, inverting the bit at `target`.
///
/// The flip is applied in place on the chunk that holds the target byte.
/// A target past the end of the data is left unapplied and reported as
/// `flipped: None`.
///
/// # Errors
///
/// Returns an I/O error if any read, write or the final flush fails.
pub fn flip_stream<R: Read, W: Write>(
    source: &mut Source<R>,
    sink: &mut Sink<W>,
    target: Option<BitPosition>,
) -> Result<CopyOutcome> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut offset: u64 = 0;
    let mut flipped = None;

    loop {
        let n = source.read_chunk(&mut buf)?;
        if n == 0 {
            break;
        }
        let chunk = &mut buf[..n];
        let end = offset + n as u64;

        if let Some(pos) = target
            && flipped.is_none()
            && (offset..end).contains(&pos.byte)
        {
            #[allow(clippy::cast_possible_truncation)]
            let i = (pos.byte - offset) as usize;
            chunk[i] ^= pos.mask();
            flipped = Some(pos);
            tracing::debug!(byte = pos.byte, bit = pos.bit, "flipped bit");
        }

        sink.write_all(chunk)?;
        offset = end;
    }

    sink.flush()?;
    tracing::debug!(bytes = offset, source = source.name(), "copy complete");

    Ok(CopyOutcome {
        bytes_copied: offset,
        flipped,
    })
}

/// Checks that a copy moved exactly `expected` bytes and, for non-empty
/// input, flipped a bit.
fn verify_copy(source: &str, expected: u64, outcome: CopyOutcome) -> Result<()> {
    if outcome.bytes_copied != expected || (expected > 0 && outcome.flipped.is_none()) {
        return Err(IoError::LengthMismatch {
            path: source.to_string(),
            expected,
            actual: outcome.bytes_copied,
        }
        .into());
    }
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copies `source_path` to `dest_path` with one bit inverted.
///
/// The destination is created or truncated. An empty source produces an
/// empty destination and no flip.
///
/// # Errors
///
/// Returns [`UsageError::BitOutOfRange`] if a forced bit index is outside
/// the source and [`UsageError::SameFile`] if both paths name one file,
/// before the destination is touched. Returns an I/O error if either file
/// cannot be opened, any read or write fails, or the source yields a
/// different number of bytes than measured at open
/// ([`IoError::LengthMismatch`], e.g. `/proc` files or pipes).
pub fn flip_copy<P: AsRef<Path>, Q: AsRef<Path>>(
    source_path: P,
    dest_path: Q,
    options: FlipOptions,
) -> Result<FlipReport> {
    let (source_path, dest_path) = (source_path.as_ref(), dest_path.as_ref());
    let mut source = Source::open(source_path)?;
    let len = source.len().unwrap_or(0);

    if same_file(source_path, dest_path) {
        return Err(UsageError::SameFile {
            path: source.name().to_string(),
        }
        .into());
    }

    let (target, seed) = match options.bit_index {
        Some(index) => {
            let bits = len.saturating_mul(8);
            if index >= bits {
                return Err(UsageError::BitOutOfRange { index, bits }.into());
            }
            (Some(BitPosition::from_index(index)), None)
        }
        None => {
            let seed = options.seed.unwrap_or_else(time_seed);
            let mut rng = StdRng::seed_from_u64(seed);
            (pick_bit(len, &mut rng), Some(seed))
        }
    };
    tracing::debug!(len, ?seed, ?target, "selected bit");

    let mut sink = Sink::create(dest_path)?;
    let outcome = flip_stream(&mut source, &mut sink, target)?;
    verify_copy(source.name(), len, outcome)?;

    Ok(FlipReport {
        source: source.name().to_string(),
        destination: sink.name().to_string(),
        bytes_copied: outcome.bytes_copied,
        seed,
        bit_index: outcome.flipped.map(BitPosition::index),
        flipped: outcome.flipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn flip_bytes(data: &[u8], target: Option<BitPosition>) -> (Vec<u8>, CopyOutcome) {
        let mut source = Source::new("mem", Cursor::new(data.to_vec()));
        let mut sink = Sink::new("out", Vec::new());
        let outcome = flip_stream(&mut source, &mut sink, target).unwrap();
        (sink.into_inner(), outcome)
    }

    #[test]
    fn test_bit_position_roundtrip() {
        let pos = BitPosition::from_index(13);
        assert_eq!(pos, BitPosition { byte: 1, bit: 5 });
        assert_eq!(pos.index(), 13);
        assert_eq!(pos.mask(), 0b0010_0000);
    }

    #[test]
    fn test_flip_single_zero_byte() {
        let (out, outcome) = flip_bytes(&[0x00], Some(BitPosition::from_index(0)));
        assert_eq!(out, vec![0x01]);
        assert_eq!(outcome.bytes_copied, 1);
        assert_eq!(outcome.flipped, Some(BitPosition { byte: 0, bit: 0 }));
    }

    #[test]
    fn test_flip_high_bit() {
        let (out, _) = flip_bytes(&[0xFF, 0x00], Some(BitPosition::from_index(15)));
        assert_eq!(out, vec![0xFF, 0x80]);
    }

    #[test]
    fn test_empty_input_no_flip() {
        let (out, outcome) = flip_bytes(&[], None);
        assert!(out.is_empty());
        assert_eq!(outcome.bytes_copied, 0);
        assert_eq!(outcome.flipped, None);
    }

    #[test]
    fn test_target_beyond_data_not_applied() {
        let (out, outcome) = flip_bytes(&[1, 2, 3], Some(BitPosition::from_index(100)));
        assert_eq!(out, vec![1, 2, 3]);
        assert_eq!(outcome.flipped, None);
    }

    #[test]
    fn test_flip_in_later_chunk() {
        let data = vec![0u8; CHUNK_SIZE * 2 + 17];
        let target = BitPosition {
            byte: (CHUNK_SIZE + 5) as u64,
            bit: 3,
        };
        let (out, outcome) = flip_bytes(&data, Some(target));

        assert_eq!(out.len(), data.len());
        assert_eq!(out[CHUNK_SIZE + 5], 0b0000_1000);
        assert_eq!(out.iter().filter(|&&b| b != 0).count(), 1);
        assert_eq!(outcome.flipped, Some(target));
    }

    #[test]
    fn test_pick_bit_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_bit(0, &mut rng), None);
    }

    #[test]
    fn test_pick_bit_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in [1u64, 2, 9, 1000] {
            for _ in 0..100 {
                let pos = pick_bit(len, &mut rng).unwrap();
                assert!(pos.index() < len * 8);
                assert!(pos.bit < 8);
            }
        }
    }

    #[test]
    fn test_pick_bit_covers_single_byte() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = [false; 8];
        for _ in 0..1000 {
            let pos = pick_bit(1, &mut rng).unwrap();
            seen[pos.bit as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_time_seed_nonzero() {
        assert_ne!(time_seed(), 0);
    }

    #[test]
    fn test_flip_copy_same_seed_same_bit() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src.bin");
        std::fs::write(&src, vec![0x5Au8; 256]).unwrap();

        let options = FlipOptions {
            seed: Some(42),
            bit_index: None,
        };
        let a = flip_copy(&src, temp_dir.path().join("a.bin"), options).unwrap();
        let b = flip_copy(&src, temp_dir.path().join("b.bin"), options).unwrap();

        assert_eq!(a.bit_index, b.bit_index);
        assert_eq!(a.seed, Some(42));
        assert_eq!(
            std::fs::read(temp_dir.path().join("a.bin")).unwrap(),
            std::fs::read(temp_dir.path().join("b.bin")).unwrap()
        );
    }

    #[test]
    fn test_flip_copy_forced_out_of_range() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src.bin");
        let dst = temp_dir.path().join("dst.bin");
        std::fs::write(&src, [0u8; 2]).unwrap();

        let result = flip_copy(
            &src,
            &dst,
            FlipOptions {
                seed: None,
                bit_index: Some(16),
            },
        );
        assert!(matches!(
            result,
            Err(crate::Error::Usage(UsageError::BitOutOfRange {
                index: 16,
                bits: 16
            }))
        ));
        assert!(!dst.exists());
    }

    #[test]
    fn test_verify_copy_rejects_short_read() {
        let outcome = CopyOutcome {
            bytes_copied: 60,
            flipped: None,
        };
        let err = verify_copy("disk.img", 100, outcome).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Io(IoError::LengthMismatch {
                expected: 100,
                actual: 60,
                ..
            })
        ));
    }

    #[test]
    fn test_verify_copy_rejects_missing_flip() {
        let outcome = CopyOutcome {
            bytes_copied: 10,
            flipped: None,
        };
        assert!(verify_copy("a.bin", 10, outcome).is_err());
    }

    #[test]
    fn test_verify_copy_accepts_complete_copy() {
        let flipped = CopyOutcome {
            bytes_copied: 10,
            flipped: Some(BitPosition::from_index(3)),
        };
        assert!(verify_copy("a.bin", 10, flipped).is_ok());

        let empty = CopyOutcome {
            bytes_copied: 0,
            flipped: None,
        };
        assert!(verify_copy("empty.bin", 0, empty).is_ok());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_flip_copy_zero_metadata_source_fails() {
        // procfs reports size 0 and refuses SEEK_END, yet yields data.
        let temp_dir = TempDir::new().unwrap();
        let result = flip_copy(
            "/proc/version",
            temp_dir.path().join("dst.bin"),
            FlipOptions::default(),
        );
        assert!(matches!(
            result,
            Err(crate::Error::Io(IoError::LengthMismatch { expected: 0, .. }))
        ));
    }

    #[test]
    fn test_flip_copy_same_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.bin");
        std::fs::write(&path, [0x11u8; 100]).unwrap();

        let result = flip_copy(&path, &path, FlipOptions::default());
        assert!(matches!(
            result,
            Err(crate::Error::Usage(UsageError::SameFile { .. }))
        ));
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x11u8; 100]);
    }

    #[test]
    fn test_flip_copy_missing_source_leaves_no_destination() {
        let temp_dir = TempDir::new().unwrap();
        let dst = temp_dir.path().join("dst.bin");

        let result = flip_copy(
            temp_dir.path().join("missing.bin"),
            &dst,
            FlipOptions::default(),
        );
        assert!(result.is_err());
        assert!(!dst.exists());
    }
}

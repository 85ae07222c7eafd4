//! Error types for bitkit operations.
//!
//! Errors fall into three families: usage errors (bad arguments, raised
//! before any work starts), I/O errors (open, read or write failures on a
//! named file or stream) and resource errors (allocation or entropy).

use thiserror::Error;

/// Result type alias for bitkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid arguments.
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),

    /// I/O errors on files and standard streams.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Resource exhaustion.
    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),
}

/// Argument validation errors.
#[derive(Error, Debug)]
pub enum UsageError {
    /// Length argument is not a positive integer.
    #[error("invalid length: {value}")]
    InvalidLength {
        /// The rejected argument text.
        value: String,
    },

    /// Forced bit index lies outside the source.
    #[error("bit index {index} out of range for {bits} bits")]
    BitOutOfRange {
        /// Requested bit index.
        index: u64,
        /// Number of bits available in the source.
        bits: u64,
    },

    /// Source and destination name the same file.
    #[error("source and destination are the same file: {path}")]
    SameFile {
        /// The shared path.
        path: String,
    },
}

/// I/O errors, each tagged with the file path or stream name.
#[derive(Error, Debug)]
pub enum IoError {
    /// File does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: String,
    },

    /// File exists but could not be opened for reading.
    #[error("failed to open {path}: {reason}")]
    OpenFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Destination could not be created or truncated.
    #[error("failed to create {path}: {reason}")]
    CreateFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Read failed mid-stream.
    #[error("failed to read {path}: {reason}")]
    ReadFailed {
        /// Path or stream name.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Write or flush failed, including short writes.
    #[error("failed to write {path}: {reason}")]
    WriteFailed {
        /// Path or stream name.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Source yielded a different number of bytes than it measured at open.
    #[error("length of {path} changed: expected {expected} bytes, copied {actual}")]
    LengthMismatch {
        /// Path to the source.
        path: String,
        /// Length measured when the source was opened.
        expected: u64,
        /// Bytes actually read.
        actual: u64,
    },
}

/// Resource errors.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// Buffer allocation failed.
    #[error("cannot allocate {requested} bytes")]
    AllocationFailed {
        /// Requested size in bytes.
        requested: u64,
    },

    /// The operating system random source failed.
    #[error("entropy source unavailable: {reason}")]
    EntropyUnavailable {
        /// Reason for failure.
        reason: String,
    },
}

impl IoError {
    /// Returns the path or stream name the error refers to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::FileNotFound { path }
            | Self::OpenFailed { path, .. }
            | Self::CreateFailed { path, .. }
            | Self::ReadFailed { path, .. }
            | Self::WriteFailed { path, .. }
            | Self::LengthMismatch { path, .. } => path,
        }
    }
}

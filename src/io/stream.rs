//! Named byte sources and sinks.
//!
//! Wraps any `Read` or `Write` together with the path (or stream name) it
//! belongs to, so every failure is reported against the file that caused it.

use crate::error::{IoError, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, StdoutLock, Write};
use std::path::Path;

/// Name used for standard output in error messages.
pub const STDOUT_NAME: &str = "<stdout>";

/// A readable byte source with a name for diagnostics.
///
/// # Examples
///
/// ```
/// use bitkit::io::Source;
///
/// let mut source = Source::new("inline", &b"ab"[..]);
/// assert_eq!(source.read_byte().unwrap(), Some(b'a'));
/// ```
#[derive(Debug)]
pub struct Source<R> {
    reader: R,
    name: String,
    len: Option<u64>,
}

impl Source<File> {
    /// Opens a file for reading and records its length.
    ///
    /// The length is measured by seeking to the end, which also covers
    /// block devices whose metadata reports 0. Files that cannot seek fall
    /// back to the metadata length.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] if the path does not exist and
    /// [`IoError::OpenFailed`] if it cannot be opened or inspected.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let name = path_ref.to_string_lossy().to_string();

        let mut file = File::open(path_ref).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                IoError::FileNotFound { path: name.clone() }
            } else {
                IoError::OpenFailed {
                    path: name.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        let len = measure_len(&mut file).map_err(|e| IoError::OpenFailed {
            path: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            reader: file,
            name,
            len: Some(len),
        })
    }
}

/// Returns the byte length of an open file, rewinding it afterwards.
fn measure_len(file: &mut File) -> io::Result<u64> {
    match file.seek(SeekFrom::End(0)) {
        Ok(end) => {
            file.rewind()?;
            Ok(end)
        }
        Err(_) => Ok(file.metadata()?.len()),
    }
}

impl<R: Read> Source<R> {
    /// Wraps an arbitrary reader of unknown length.
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            reader,
            name: name.into(),
            len: None,
        }
    }

    /// Sets the expected length in bytes.
    #[must_use]
    pub const fn with_len(mut self, len: u64) -> Self {
        self.len = Some(len);
        self
    }

    /// Adds a read buffer, keeping the name and length.
    pub fn buffered(self) -> Source<BufReader<R>> {
        Source {
            reader: BufReader::new(self.reader),
            name: self.name,
            len: self.len,
        }
    }

    /// Returns the source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the length in bytes, if known.
    #[must_use]
    pub const fn len(&self) -> Option<u64> {
        self.len
    }

    /// Reads up to `buf.len()` bytes. Returns 0 only at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::ReadFailed`] on any read fault.
    pub fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
        loop {
            match self.reader.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(self.read_failed(&e)),
            }
        }
    }

    /// Reads a single byte, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::ReadFailed`] on any read fault.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.read_chunk(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    fn read_failed(&self, err: &io::Error) -> crate::Error {
        IoError::ReadFailed {
            path: self.name.clone(),
            reason: err.to_string(),
        }
        .into()
    }
}

/// A writable byte sink with a name for diagnostics.
///
/// Counts the bytes accepted so callers can report totals.
#[derive(Debug)]
pub struct Sink<W: Write> {
    writer: W,
    name: String,
    written: u64,
}

impl Sink<BufWriter<File>> {
    /// Creates or truncates a file for writing.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::CreateFailed`] if the file cannot be opened.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let name = path_ref.to_string_lossy().to_string();

        let file = File::create(path_ref).map_err(|e| IoError::CreateFailed {
            path: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self::new(name, BufWriter::new(file)))
    }
}

impl Sink<BufWriter<StdoutLock<'static>>> {
    /// Locks standard output behind a write buffer.
    pub fn stdout() -> Self {
        Self::new(STDOUT_NAME, BufWriter::new(io::stdout().lock()))
    }
}

impl<W: Write> Sink<W> {
    /// Wraps an arbitrary writer.
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            writer,
            name: name.into(),
            written: 0,
        }
    }

    /// Returns the sink name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub const fn written(&self) -> u64 {
        self.written
    }

    /// Writes the whole buffer.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFailed`] if the writer fails or accepts
    /// fewer bytes than offered.
    pub fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.writer
            .write_all(buf)
            .map_err(|e| self.write_failed(&e))?;
        self.written += buf.len() as u64;
        Ok(())
    }

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFailed`] if flushing fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.write_failed(&e))
    }

    /// Consumes the sink and returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_failed(&self, err: &io::Error) -> crate::Error {
        IoError::WriteFailed {
            path: self.name.clone(),
            reason: err.to_string(),
        }
        .into()
    }
}

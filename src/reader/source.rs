//! Seekable byte source with fixed-width integer and text line reads.

use crate::utils::config::INT_WIDTH;
use crate::utils::error::TraceError;
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Buffered, seekable view over a trace file
///
/// All integers are unsigned, 4 bytes wide, little-endian.
pub struct TraceSource<R> {
    inner: BufReader<R>,
}

impl TraceSource<File> {
    /// Open a trace file for binary reading
    ///
    /// # Errors
    /// * `TraceError::FileOpen` - Path missing or unreadable
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        debug!("Opening trace file: {}", path.display());

        let file = File::open(path).map_err(|source| TraceError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(file))
    }
}

impl<R: Read + Seek> TraceSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
        }
    }

    /// Read one integer, advancing the cursor
    pub fn read_int(&mut self) -> io::Result<u32> {
        let mut buf = [0u8; INT_WIDTH as usize];
        self.inner.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Read `N` consecutive integers
    pub fn read_ints<const N: usize>(&mut self) -> io::Result<[u32; N]> {
        let mut out = [0u32; N];
        for value in out.iter_mut() {
            *value = self.read_int()?;
        }
        Ok(out)
    }

    /// Read `count` consecutive integers into a vector
    ///
    /// `count` comes from the file itself, so capacity is only reserved
    /// up front for modest sizes; a bogus count fails on the short read.
    pub fn read_int_vec(&mut self, count: usize) -> io::Result<Vec<u32>> {
        let mut out = Vec::with_capacity(count.min(1 << 16));
        for _ in 0..count {
            out.push(self.read_int()?);
        }
        Ok(out)
    }

    /// Read one newline-terminated line, trimmed
    ///
    /// Returns `None` at end of stream. Bytes that are not valid UTF-8 are
    /// replaced rather than rejected, since file paths need not be UTF-8.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        let read = self.inner.read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }

    /// Read a line that must be present
    pub fn read_required_line(&mut self, what: &str) -> io::Result<String> {
        self.read_line()?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("unexpected end of file while reading {}", what),
            )
        })
    }

    /// Move the cursor to an absolute byte offset
    pub fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Move the cursor relative to its current position
    pub fn skip(&mut self, delta: i64) -> io::Result<()> {
        self.inner.seek_relative(delta)
    }

    /// Current absolute byte offset
    pub fn position(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }
}

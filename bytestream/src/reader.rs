//! Forward-only byte reader over any [`Read`] source.

use std::io::{self, Read};

use crate::error::{CursorError, CursorResult};

/// Upper bound on speculative buffer reservation for length-prefixed reads.
pub const MAX_PREALLOC: usize = 64 * 1024;

/// A big-endian byte reader that tracks its absolute stream offset.
///
/// The reader never seeks backward. Skipping forward consumes and discards
/// bytes from the underlying source, so it works on pipes and sockets as well
/// as on files and slices.
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ByteReader<R> {
    /// Creates a reader positioned at offset 0.
    pub const fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Creates a reader whose first byte is at `position` in the enclosing stream.
    pub const fn at(inner: R, position: u64) -> Self {
        Self { inner, position }
    }

    /// Returns the current stream offset.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Consumes the reader and returns the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Fills `buf` completely or fails.
    pub fn read_into(&mut self, buf: &mut [u8]) -> CursorResult<()> {
        let offset = self.position;
        self.inner
            .read_exact(buf)
            .map_err(|err| CursorError::from_io(&err, offset, buf.len()))?;
        self.position += buf.len() as u64;
        Ok(())
    }

    /// Reads exactly `len` bytes into a new buffer.
    ///
    /// The buffer grows as bytes arrive, so a bogus `len` taken from a
    /// corrupt header fails with an EOF instead of a huge allocation.
    pub fn read_bytes(&mut self, len: usize) -> CursorResult<Vec<u8>> {
        let offset = self.position;
        let mut out = Vec::with_capacity(len.min(MAX_PREALLOC));
        let read = (&mut self.inner)
            .take(len as u64)
            .read_to_end(&mut out)
            .map_err(|err| CursorError::from_io(&err, offset, len))?;
        self.position += read as u64;
        if read < len {
            return Err(CursorError::UnexpectedEof {
                offset,
                requested: len,
            });
        }
        Ok(out)
    }

    /// Reads a `u8`.
    pub fn read_u8(&mut self) -> CursorResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16(&mut self) -> CursorResult<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Reads a big-endian `i16`.
    pub fn read_i16(&mut self) -> CursorResult<i16> {
        self.read_array().map(i16::from_be_bytes)
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32(&mut self) -> CursorResult<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Reads a big-endian `i32`.
    pub fn read_i32(&mut self) -> CursorResult<i32> {
        self.read_array().map(i32::from_be_bytes)
    }

    /// Reads a big-endian `i64`.
    pub fn read_i64(&mut self) -> CursorResult<i64> {
        self.read_array().map(i64::from_be_bytes)
    }

    /// Discards `len` bytes.
    pub fn skip(&mut self, len: u64) -> CursorResult<()> {
        let offset = self.position;
        let copied = io::copy(&mut (&mut self.inner).take(len), &mut io::sink())
            .map_err(|err| CursorError::from_io(&err, offset, 0))?;
        self.position += copied;
        if copied < len {
            return Err(CursorError::UnexpectedEof {
                offset,
                requested: usize::try_from(len).unwrap_or(usize::MAX),
            });
        }
        Ok(())
    }

    /// Skips forward to the absolute offset `target`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::BackwardSeek`] if `target` is behind the current position.
    pub fn skip_to(&mut self, target: u64) -> CursorResult<()> {
        if target < self.position {
            return Err(CursorError::BackwardSeek {
                position: self.position,
                target,
            });
        }
        self.skip(target - self.position)
    }

    /// Returns `true` if the source has no more bytes.
    ///
    /// This consumes at most one byte; a byte that is read is treated as
    /// trailing data and the method reports `false`.
    pub fn at_end(&mut self) -> CursorResult<bool> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(true),
                Ok(_) => {
                    self.position += 1;
                    return Ok(false);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(CursorError::from_io(&err, self.position, 1)),
            }
        }
    }

    fn read_array<const N: usize>(&mut self) -> CursorResult<[u8; N]> {
        let mut out = [0u8; N];
        self.read_into(&mut out)?;
        Ok(out)
    }
}

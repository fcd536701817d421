//! Error types for byte cursor operations.

use std::fmt;
use std::io;

/// Result type for byte cursor operations.
pub type CursorResult<T> = Result<T, CursorError>;

/// Errors that can occur while reading from a [`ByteReader`](crate::ByteReader).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// The underlying stream ended before the requested bytes were read.
    UnexpectedEof {
        /// Stream offset at which the read started.
        offset: u64,
        /// Number of bytes requested.
        requested: usize,
    },

    /// A skip targeted an offset behind the current position.
    ///
    /// The cursor is forward-only; sections must be visited in file order.
    BackwardSeek {
        /// Current stream offset.
        position: u64,
        /// Requested target offset.
        target: u64,
    },

    /// The underlying reader failed with something other than end of stream.
    Io {
        /// Stream offset at which the read started.
        offset: u64,
        /// Kind of the I/O failure.
        kind: io::ErrorKind,
    },
}

impl CursorError {
    pub(crate) fn from_io(err: &io::Error, offset: u64, requested: usize) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::UnexpectedEof { offset, requested },
            kind => Self::Io { offset, kind },
        }
    }

    /// Returns the stream offset the failing operation started at.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        match self {
            Self::UnexpectedEof { offset, .. } | Self::Io { offset, .. } => *offset,
            Self::BackwardSeek { position, .. } => *position,
        }
    }
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof { offset, requested } => {
                write!(
                    f,
                    "unexpected end of stream reading {requested} bytes at offset {offset}"
                )
            }
            Self::BackwardSeek { position, target } => {
                write!(
                    f,
                    "cannot seek backward from offset {position} to offset {target}"
                )
            }
            Self::Io { offset, kind } => {
                write!(f, "i/o error at offset {offset}: {kind}")
            }
        }
    }
}

impl std::error::Error for CursorError {}

//! Error types for SCF header and section layout operations.

use std::fmt;

use bytestream::CursorError;

use crate::section::SectionKind;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// High-level decode errors for the SCF header and section layout.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Buffer is too small to contain the header.
    HeaderTooSmall { actual: usize, required: usize },

    /// Invalid magic number in the header.
    InvalidMagic { found: u32 },

    /// Unsupported SCF version string.
    UnsupportedVersion { found: [u8; 4] },

    /// Sample size is neither 1 nor 2.
    InvalidSampleSize { found: u32 },

    /// Two sections claim overlapping byte ranges, or a section overlaps the header.
    SectionOverlap {
        first: SectionKind,
        second: SectionKind,
    },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// Reading the header from a stream failed.
    Stream(CursorError),
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Bases,
    Samples,
    CommentBytes,
    PrivateBytes,
}

/// Errors that can occur during header encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    BufferTooSmall { needed: usize, available: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeaderTooSmall { actual, required } => {
                write!(
                    f,
                    "header too small: {actual} bytes, need at least {required}"
                )
            }
            Self::InvalidMagic { found } => {
                write!(f, "invalid magic number: 0x{found:08X}")
            }
            Self::UnsupportedVersion { found } => {
                write!(
                    f,
                    "unsupported scf version: {:?}",
                    String::from_utf8_lossy(found)
                )
            }
            Self::InvalidSampleSize { found } => {
                write!(f, "invalid sample size {found}, expected 1 or 2")
            }
            Self::SectionOverlap { first, second } => {
                write!(f, "section {first} overlaps section {second}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::Stream(err) => write!(f, "header read failed: {err}"),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bases => "bases",
            Self::Samples => "samples",
            Self::CommentBytes => "comment bytes",
            Self::PrivateBytes => "private data bytes",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {needed}, have {available}")
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stream(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for EncodeError {}

impl From<CursorError> for DecodeError {
    fn from(err: CursorError) -> Self {
        Self::Stream(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display_invalid_magic() {
        let err = DecodeError::InvalidMagic { found: 0xDEAD_BEEF };
        let msg = err.to_string();
        assert!(msg.contains("DEADBEEF"));
    }

    #[test]
    fn decode_error_display_version() {
        let err = DecodeError::UnsupportedVersion { found: *b"9.99" };
        assert!(err.to_string().contains("9.99"));
    }

    #[test]
    fn decode_error_display_limits_exceeded() {
        let err = DecodeError::LimitsExceeded {
            kind: LimitKind::Bases,
            limit: 4,
            actual: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("bases"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn decode_error_display_overlap() {
        let err = DecodeError::SectionOverlap {
            first: SectionKind::Samples,
            second: SectionKind::Bases,
        };
        let msg = err.to_string();
        assert!(msg.contains("samples"));
        assert!(msg.contains("bases"));
    }

    #[test]
    fn stream_error_has_source() {
        let err = DecodeError::from(CursorError::UnexpectedEof {
            offset: 0,
            requested: 128,
        });
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn encode_error_display() {
        let err = EncodeError::BufferTooSmall {
            needed: 128,
            available: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("buffer too small"));
    }
}

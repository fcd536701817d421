//! Error types for codec operations.

use std::fmt;

use bytestream::CursorError;
use wire::SectionKind;

use crate::types::Channel;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding SCF data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Header or section layout error.
    Header(wire::DecodeError),

    /// Low-level read failure: truncated input, backward seek or I/O error.
    Stream(CursorError),

    /// Input bytes do not have the shape the codec expects.
    Malformed { reason: MalformedReason },

    /// A decoded count or length is outside its legal range.
    IllegalEncodedValue { reason: ValueReason },

    /// A failure inside a named section of a file.
    Section {
        section: SectionKind,
        /// Offset of the first byte of the section.
        offset: u64,
        source: Box<CodecError>,
    },

    /// Parallel arrays passed to an encoder disagree in length.
    LengthMismatch {
        field: FieldKind,
        expected: usize,
        actual: usize,
    },

    /// Random access past the end of an encoded sequence.
    IndexOutOfRange { index: usize, len: usize },

    /// A comment entry cannot be written as a `key=value` line.
    InvalidComment { key: String },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Coarse classification of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Declared layout inconsistent with the bytes, or a backward seek.
    Malformed,
    /// Input ended mid-record.
    Truncated,
    /// A decoded value outside its legal range.
    IllegalValue,
    /// The underlying reader failed.
    Io,
    /// The caller passed inconsistent data to an encoder.
    Contract,
    /// A configured limit was exceeded.
    Limits,
}

/// Details for malformed input errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// Byte length is not a whole number of values.
    UnalignedLength { len: usize, width: usize },
    /// Payload is shorter than its fixed preamble.
    MissingPreamble { len: usize, required: usize },
    /// Bytes remain after the declared number of elements was produced.
    TrailingBytes,
}

/// Details for illegal encoded value errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueReason {
    /// Element count field is negative.
    NegativeCount { value: i32 },
    /// Run length field is negative.
    NegativeRunLength { value: i16 },
    /// Runs produce more elements than the declared count.
    RunOverflow { declared: usize, produced: usize },
}

/// Encoder input fields checked for consistent lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Peaks,
    Confidences(Channel),
    Substitution,
    Insertion,
    Deletion,
    Positions(Channel),
}

/// Specific codec limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Glyphs,
    /// A count or offset that does not fit a 32-bit header field.
    HeaderField,
}

impl CodecError {
    /// Wraps `self` with the section it occurred in.
    ///
    /// Errors that already carry a section are returned unchanged.
    #[must_use]
    pub fn in_section(self, section: SectionKind, offset: u64) -> Self {
        match self {
            Self::Section { .. } => self,
            other => Self::Section {
                section,
                offset,
                source: Box::new(other),
            },
        }
    }

    /// Returns the section the error occurred in, if known.
    #[must_use]
    pub const fn section(&self) -> Option<SectionKind> {
        match self {
            Self::Section { section, .. } => Some(*section),
            _ => None,
        }
    }

    /// Classifies the error, looking through section wrappers.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Header(wire::DecodeError::LimitsExceeded { .. })
            | Self::LimitsExceeded { .. } => ErrorClass::Limits,
            Self::Header(wire::DecodeError::Stream(err)) | Self::Stream(err) => cursor_class(err),
            Self::Header(_) | Self::Malformed { .. } => ErrorClass::Malformed,
            Self::IllegalEncodedValue { .. } => ErrorClass::IllegalValue,
            Self::Section { source, .. } => source.class(),
            Self::LengthMismatch { .. }
            | Self::IndexOutOfRange { .. }
            | Self::InvalidComment { .. } => ErrorClass::Contract,
        }
    }
}

const fn cursor_class(err: &CursorError) -> ErrorClass {
    match err {
        CursorError::UnexpectedEof { .. } => ErrorClass::Truncated,
        CursorError::BackwardSeek { .. } => ErrorClass::Malformed,
        CursorError::Io { .. } => ErrorClass::Io,
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header(e) => write!(f, "header error: {e}"),
            Self::Stream(e) => write!(f, "stream error: {e}"),
            Self::Malformed { reason } => write!(f, "malformed input: {reason}"),
            Self::IllegalEncodedValue { reason } => {
                write!(f, "illegal encoded value: {reason}")
            }
            Self::Section {
                section,
                offset,
                source,
            } => {
                write!(f, "{section} section at offset {offset}: {source}")
            }
            Self::LengthMismatch {
                field,
                expected,
                actual,
            } => {
                write!(f, "{field} has {actual} entries, expected {expected}")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::InvalidComment { key } => {
                write!(f, "comment {key:?} has an empty key or contains '=', NUL or a line break")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnalignedLength { len, width } => {
                write!(f, "{len} bytes is not a multiple of value width {width}")
            }
            Self::MissingPreamble { len, required } => {
                write!(f, "payload has {len} bytes, preamble needs {required}")
            }
            Self::TrailingBytes => write!(f, "trailing bytes after last element"),
        }
    }
}

impl fmt::Display for ValueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeCount { value } => write!(f, "negative element count {value}"),
            Self::NegativeRunLength { value } => write!(f, "negative run length {value}"),
            Self::RunOverflow { declared, produced } => {
                write!(f, "runs produce {produced} elements, declared {declared}")
            }
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Peaks => write!(f, "peaks"),
            Self::Confidences(ch) => write!(f, "{ch} confidences"),
            Self::Substitution => write!(f, "substitution confidences"),
            Self::Insertion => write!(f, "insertion confidences"),
            Self::Deletion => write!(f, "deletion confidences"),
            Self::Positions(ch) => write!(f, "{ch} positions"),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Glyphs => "glyphs",
            Self::HeaderField => "header field",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Header(e) => Some(e),
            Self::Stream(e) => Some(e),
            Self::Section { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Header(err)
    }
}

impl From<CursorError> for CodecError {
    fn from(err: CursorError) -> Self {
        Self::Stream(err)
    }
}

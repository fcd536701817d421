//! Fixed-width integer access for width-agnostic algorithms.

use std::io::Read;

use crate::error::CursorResult;
use crate::reader::ByteReader;
use crate::writer::ByteWriter;

/// Width of a stored integer value.
///
/// Values travel through a 64-bit signed working type. Byte and short widths
/// are zero-extended on read; int and long widths are sign-extended. Writes
/// truncate to the configured width without range checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueWidth {
    /// 1 byte, unsigned.
    Byte,
    /// 2 bytes, unsigned.
    Short,
    /// 4 bytes, signed.
    Int,
    /// 8 bytes, signed.
    Long,
}

impl ValueWidth {
    /// Returns the width for a byte count of 1, 2, 4 or 8.
    #[must_use]
    pub const fn from_bytes(bytes: usize) -> Option<Self> {
        match bytes {
            1 => Some(Self::Byte),
            2 => Some(Self::Short),
            4 => Some(Self::Int),
            8 => Some(Self::Long),
            _ => None,
        }
    }

    /// Returns the number of bytes one value occupies.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Short => 2,
            Self::Int => 4,
            Self::Long => 8,
        }
    }

    /// Reads one value and widens it to the working type.
    pub fn read<R: Read>(self, reader: &mut ByteReader<R>) -> CursorResult<i64> {
        Ok(match self {
            Self::Byte => i64::from(reader.read_u8()?),
            Self::Short => i64::from(reader.read_u16()?),
            Self::Int => i64::from(reader.read_i32()?),
            Self::Long => reader.read_i64()?,
        })
    }

    /// Writes one value, truncated to this width.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn write(self, writer: &mut ByteWriter, value: i64) {
        match self {
            Self::Byte => writer.write_u8(value as u8),
            Self::Short => writer.write_u16(value as u16),
            Self::Int => writer.write_i32(value as i32),
            Self::Long => writer.write_i64(value),
        }
    }

    /// Truncates `value` to this width and widens it back, as a write
    /// followed by a read would.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn normalize(self, value: i64) -> i64 {
        match self {
            Self::Byte => value as u8 as i64,
            Self::Short => value as u16 as i64,
            Self::Int => value as i32 as i64,
            Self::Long => value,
        }
    }
}

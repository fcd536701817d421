//! SCF header types and constants.

use std::io::Read;

use bytestream::{ByteReader, ByteWriter, ValueWidth};

use crate::error::{DecodeError, EncodeError, WireResult};

/// Magic number identifying SCF files.
pub const MAGIC: u32 = 0x2E73_6366; // ".scf" in ASCII

/// Header size in bytes.
pub const HEADER_SIZE: usize = 128;

/// Number of reserved trailing `u32` words in the header.
pub const SPARE_WORDS: usize = 18;

/// Section layout generation of an SCF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScfVersion {
    /// Interleaved layouts, used by SCF 1.x and 2.x.
    V2,
    /// Columnar, delta-compressed layouts.
    #[default]
    V3,
}

impl ScfVersion {
    /// Parses the four-byte version field.
    ///
    /// Only the major digit is significant; `1.xx` files share the v2 layouts.
    pub fn parse(raw: [u8; 4]) -> WireResult<Self> {
        match raw[0] {
            b'1' | b'2' => Ok(Self::V2),
            b'3' => Ok(Self::V3),
            _ => Err(DecodeError::UnsupportedVersion { found: raw }),
        }
    }

    /// Returns the canonical four-byte version field.
    #[must_use]
    pub const fn to_raw(self) -> [u8; 4] {
        match self {
            Self::V2 => *b"2.00",
            Self::V3 => *b"3.00",
        }
    }
}

/// Byte width of one trace sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleWidth {
    One,
    #[default]
    Two,
}

impl SampleWidth {
    /// Parses the header's `sample_size` field.
    pub const fn parse(raw: u32) -> WireResult<Self> {
        match raw {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            found => Err(DecodeError::InvalidSampleSize { found }),
        }
    }

    /// Returns the width in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Returns the matching unsigned value width.
    #[must_use]
    pub const fn value_width(self) -> ValueWidth {
        match self {
            Self::One => ValueWidth::Byte,
            Self::Two => ValueWidth::Short,
        }
    }
}

/// The fixed 128-byte SCF header.
///
/// All fields are stored big-endian. Counts and offsets are consumed as-is
/// by the section codecs; nothing here is recomputed on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScfHeader {
    /// Number of sample points per channel.
    pub samples: u32,
    /// Byte offset of the samples section.
    pub samples_offset: u32,
    /// Number of called bases.
    pub bases: u32,
    /// Bases clipped from the left end (0 when unclipped).
    pub bases_left_clip: u32,
    /// Bases clipped from the right end (0 when unclipped).
    pub bases_right_clip: u32,
    /// Byte offset of the bases section.
    pub bases_offset: u32,
    /// Size of the comments section in bytes, including the trailing NUL.
    pub comments_size: u32,
    /// Byte offset of the comments section.
    pub comments_offset: u32,
    /// Version string, e.g. `3.00`.
    pub version: [u8; 4],
    /// Bytes per sample value (1 or 2).
    pub sample_size: u32,
    /// Uncertainty code set.
    pub code_set: u32,
    /// Size of the private data section in bytes.
    pub private_size: u32,
    /// Byte offset of the private data section.
    pub private_offset: u32,
    /// Reserved words, preserved verbatim.
    pub spare: [u32; SPARE_WORDS],
}

impl ScfHeader {
    /// Creates an empty header for the given version with 2-byte samples.
    #[must_use]
    pub const fn new(version: ScfVersion) -> Self {
        Self {
            samples: 0,
            samples_offset: 0,
            bases: 0,
            bases_left_clip: 0,
            bases_right_clip: 0,
            bases_offset: 0,
            comments_size: 0,
            comments_offset: 0,
            version: version.to_raw(),
            sample_size: 2,
            code_set: 0,
            private_size: 0,
            private_offset: 0,
            spare: [0; SPARE_WORDS],
        }
    }

    /// Returns the parsed version.
    pub fn scf_version(&self) -> WireResult<ScfVersion> {
        ScfVersion::parse(self.version)
    }

    /// Returns the parsed sample width.
    pub const fn sample_width(&self) -> WireResult<SampleWidth> {
        SampleWidth::parse(self.sample_size)
    }

    /// Serializes the header into its 128-byte form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut writer = ByteWriter::with_capacity(HEADER_SIZE);
        writer.write_u32(MAGIC);
        writer.write_u32(self.samples);
        writer.write_u32(self.samples_offset);
        writer.write_u32(self.bases);
        writer.write_u32(self.bases_left_clip);
        writer.write_u32(self.bases_right_clip);
        writer.write_u32(self.bases_offset);
        writer.write_u32(self.comments_size);
        writer.write_u32(self.comments_offset);
        writer.write_bytes(&self.version);
        writer.write_u32(self.sample_size);
        writer.write_u32(self.code_set);
        writer.write_u32(self.private_size);
        writer.write_u32(self.private_offset);
        for word in self.spare {
            writer.write_u32(word);
        }

        let mut out = [0u8; HEADER_SIZE];
        out.copy_from_slice(&writer.finish());
        out
    }
}

/// Decodes a header from the start of `buf`.
pub fn decode_header(buf: &[u8]) -> WireResult<ScfHeader> {
    if buf.len() < HEADER_SIZE {
        return Err(DecodeError::HeaderTooSmall {
            actual: buf.len(),
            required: HEADER_SIZE,
        });
    }
    read_header(&mut ByteReader::new(&buf[..HEADER_SIZE]))
}

/// Reads a header from a stream positioned at offset 0.
///
/// On success the reader is positioned at [`HEADER_SIZE`].
pub fn read_header<R: Read>(reader: &mut ByteReader<R>) -> WireResult<ScfHeader> {
    let magic = reader.read_u32()?;
    if magic != MAGIC {
        return Err(DecodeError::InvalidMagic { found: magic });
    }

    let samples = reader.read_u32()?;
    let samples_offset = reader.read_u32()?;
    let bases = reader.read_u32()?;
    let bases_left_clip = reader.read_u32()?;
    let bases_right_clip = reader.read_u32()?;
    let bases_offset = reader.read_u32()?;
    let comments_size = reader.read_u32()?;
    let comments_offset = reader.read_u32()?;
    let mut version = [0u8; 4];
    reader.read_into(&mut version)?;
    let sample_size = reader.read_u32()?;
    let code_set = reader.read_u32()?;
    let private_size = reader.read_u32()?;
    let private_offset = reader.read_u32()?;
    let mut spare = [0u32; SPARE_WORDS];
    for word in &mut spare {
        *word = reader.read_u32()?;
    }

    let header = ScfHeader {
        samples,
        samples_offset,
        bases,
        bases_left_clip,
        bases_right_clip,
        bases_offset,
        comments_size,
        comments_offset,
        version,
        sample_size,
        code_set,
        private_size,
        private_offset,
        spare,
    };
    header.scf_version()?;
    Ok(header)
}

/// Encodes a header into the provided output buffer.
pub fn encode_header(header: &ScfHeader, out: &mut [u8]) -> Result<usize, EncodeError> {
    if out.len() < HEADER_SIZE {
        return Err(EncodeError::BufferTooSmall {
            needed: HEADER_SIZE,
            available: out.len(),
        });
    }
    out[..HEADER_SIZE].copy_from_slice(&header.to_bytes());
    Ok(HEADER_SIZE)
}

//! Per-base calls, peak positions and confidences.
//!
//! Version 2 stores one 12-byte record per base. Version 3 stores the same
//! fields column by column: all peaks, then the A, C, G and T confidences,
//! then the basecalls, then the three spare confidence columns.

use std::io::Read;

use bytestream::{ByteReader, ByteWriter};
use wire::{ScfHeader, ScfVersion, SectionKind, BASE_RECORD_SIZE};

use crate::error::{CodecError, CodecResult, FieldKind};
use crate::sections::{capped, header_field, read_section};
use crate::types::{Channel, ChannelGroup};

/// Basecall stored as a zero byte decodes to this call.
const UNKNOWN_BASE: u8 = b'N';

/// Optional substitution, insertion and deletion confidences.
///
/// Each column is either present for every base or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpareConfidences {
    pub substitution: Option<Vec<u8>>,
    pub insertion: Option<Vec<u8>>,
    pub deletion: Option<Vec<u8>>,
}

impl SpareConfidences {
    fn columns(&self) -> [(FieldKind, Option<&Vec<u8>>); 3] {
        [
            (FieldKind::Substitution, self.substitution.as_ref()),
            (FieldKind::Insertion, self.insertion.as_ref()),
            (FieldKind::Deletion, self.deletion.as_ref()),
        ]
    }

    /// Builds spare columns from raw bytes, keeping only columns with data.
    fn from_raw(substitution: Vec<u8>, insertion: Vec<u8>, deletion: Vec<u8>) -> Self {
        let keep = |kind: FieldKind, column: Vec<u8>| {
            if column.iter().any(|&b| b != 0) {
                Some(column)
            } else {
                tracing::warn!(
                    field = ?kind,
                    bases = column.len(),
                    "spare confidence column dropped"
                );
                None
            }
        };
        Self {
            substitution: keep(FieldKind::Substitution, substitution),
            insertion: keep(FieldKind::Insertion, insertion),
            deletion: keep(FieldKind::Deletion, deletion),
        }
    }
}

/// Decoded contents of the bases section, stored column-wise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasesSection {
    /// Sample index of each base's peak.
    pub peaks: Vec<u32>,
    pub confidences: ChannelGroup<Vec<u8>>,
    /// ASCII basecalls.
    pub basecalls: Vec<u8>,
    pub spare: SpareConfidences,
}

/// One base, assembled from the section's columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasesRecord {
    pub basecall: char,
    pub peak: u32,
    pub confidences: ChannelGroup<u8>,
    pub substitution: Option<u8>,
    pub insertion: Option<u8>,
    pub deletion: Option<u8>,
}

impl BasesSection {
    /// Number of bases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.basecalls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.basecalls.is_empty()
    }

    /// Checks that every column has one entry per basecall.
    pub fn validate(&self) -> CodecResult<()> {
        let expected = self.len();
        let check = |field: FieldKind, actual: usize| {
            if actual == expected {
                Ok(())
            } else {
                Err(CodecError::LengthMismatch {
                    field,
                    expected,
                    actual,
                })
            }
        };

        check(FieldKind::Peaks, self.peaks.len())?;
        for (channel, column) in self.confidences.iter() {
            check(FieldKind::Confidences(channel), column.len())?;
        }
        for (field, column) in self.spare.columns() {
            if let Some(column) = column {
                check(field, column.len())?;
            }
        }
        Ok(())
    }

    /// Returns the record for base `index`, or `None` if out of range or
    /// if a column is too short.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<BasesRecord> {
        let spare = |column: &Option<Vec<u8>>| match column {
            Some(values) => values.get(index).copied().map(Some),
            None => Some(None),
        };
        Some(BasesRecord {
            basecall: char::from(*self.basecalls.get(index)?),
            peak: *self.peaks.get(index)?,
            confidences: ChannelGroup::new(
                *self.confidences.a.get(index)?,
                *self.confidences.c.get(index)?,
                *self.confidences.g.get(index)?,
                *self.confidences.t.get(index)?,
            ),
            substitution: spare(&self.spare.substitution)?,
            insertion: spare(&self.spare.insertion)?,
            deletion: spare(&self.spare.deletion)?,
        })
    }

    /// Iterates records in base order.
    pub fn records(&self) -> impl Iterator<Item = BasesRecord> + '_ {
        (0..self.len()).map_while(|i| self.record(i))
    }

    /// Basecalls as a string.
    #[must_use]
    pub fn sequence(&self) -> String {
        self.basecalls.iter().map(|&b| char::from(b)).collect()
    }

    /// Confidence of the called base at `index`, if the call is A, C, G or T.
    #[must_use]
    pub fn called_confidence(&self, index: usize) -> Option<u8> {
        let channel = match self.basecalls.get(index)?.to_ascii_uppercase() {
            b'A' => Channel::A,
            b'C' => Channel::C,
            b'G' => Channel::G,
            b'T' => Channel::T,
            _ => return None,
        };
        self.confidences.get(channel).get(index).copied()
    }
}

/// Byte layout of the bases section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasesLayout {
    /// Interleaved 12-byte records.
    V2,
    /// Columnar arrays.
    V3,
}

impl BasesLayout {
    #[must_use]
    pub const fn for_version(version: ScfVersion) -> Self {
        match version {
            ScfVersion::V2 => Self::V2,
            ScfVersion::V3 => Self::V3,
        }
    }

    /// Decodes `header.bases` records starting at `header.bases_offset`.
    ///
    /// An empty section is returned without moving the reader.
    pub fn decode<R: Read>(
        self,
        reader: &mut ByteReader<R>,
        header: &ScfHeader,
    ) -> CodecResult<BasesSection> {
        if header.bases == 0 {
            return Ok(BasesSection::default());
        }
        let count = header.bases as usize;
        let offset = u64::from(header.bases_offset);
        read_section(reader, SectionKind::Bases, offset, |reader| match self {
            Self::V2 => decode_interleaved(reader, count),
            Self::V3 => decode_columnar(reader, count),
        })
    }

    /// Encodes `bases` and records the base count in `header`.
    ///
    /// Absent spare columns are written as zeros.
    pub fn encode(self, bases: &BasesSection, header: &mut ScfHeader) -> CodecResult<Vec<u8>> {
        bases.validate()?;
        let count = bases.len();
        header.bases = header_field(count)?;

        let zeros = vec![0u8; count];
        let substitution = column_or(&bases.spare.substitution, &zeros);
        let insertion = column_or(&bases.spare.insertion, &zeros);
        let deletion = column_or(&bases.spare.deletion, &zeros);

        let mut writer = ByteWriter::with_capacity(count * BASE_RECORD_SIZE);
        match self {
            Self::V2 => {
                for i in 0..count {
                    writer.write_u32(bases.peaks[i]);
                    for (_, column) in bases.confidences.iter() {
                        writer.write_u8(column[i]);
                    }
                    writer.write_u8(bases.basecalls[i]);
                    writer.write_u8(substitution[i]);
                    writer.write_u8(insertion[i]);
                    writer.write_u8(deletion[i]);
                }
            }
            Self::V3 => {
                for &peak in &bases.peaks {
                    writer.write_u32(peak);
                }
                for (_, column) in bases.confidences.iter() {
                    writer.write_bytes(column);
                }
                writer.write_bytes(&bases.basecalls);
                writer.write_bytes(substitution);
                writer.write_bytes(insertion);
                writer.write_bytes(deletion);
            }
        }

        debug_assert_eq!(writer.len(), count * BASE_RECORD_SIZE);
        tracing::debug!(layout = ?self, bases = count, "bases encoded");
        Ok(writer.finish())
    }
}

fn column_or<'a>(column: &'a Option<Vec<u8>>, zeros: &'a [u8]) -> &'a [u8] {
    column.as_deref().unwrap_or(zeros)
}

fn basecall(raw: u8) -> u8 {
    if raw == 0 {
        UNKNOWN_BASE
    } else {
        raw
    }
}

fn decode_interleaved<R: Read>(
    reader: &mut ByteReader<R>,
    count: usize,
) -> CodecResult<BasesSection> {
    let mut peaks = Vec::with_capacity(capped(count));
    let mut confidences = ChannelGroup::from_fn(|_| Vec::with_capacity(capped(count)));
    let mut basecalls = Vec::with_capacity(capped(count));
    let mut spare: [Vec<u8>; 3] = Default::default();

    for _ in 0..count {
        peaks.push(reader.read_u32()?);
        for channel in Channel::ALL {
            confidences.get_mut(channel).push(reader.read_u8()?);
        }
        basecalls.push(basecall(reader.read_u8()?));
        for column in &mut spare {
            column.push(reader.read_u8()?);
        }
    }

    let [substitution, insertion, deletion] = spare;
    Ok(BasesSection {
        peaks,
        confidences,
        basecalls,
        spare: SpareConfidences::from_raw(substitution, insertion, deletion),
    })
}

fn decode_columnar<R: Read>(reader: &mut ByteReader<R>, count: usize) -> CodecResult<BasesSection> {
    let mut peaks = Vec::with_capacity(capped(count));
    for _ in 0..count {
        peaks.push(reader.read_u32()?);
    }
    let a = reader.read_bytes(count)?;
    let c = reader.read_bytes(count)?;
    let g = reader.read_bytes(count)?;
    let t = reader.read_bytes(count)?;
    let mut basecalls = reader.read_bytes(count)?;
    for call in &mut basecalls {
        *call = basecall(*call);
    }
    let substitution = reader.read_bytes(count)?;
    let insertion = reader.read_bytes(count)?;
    let deletion = reader.read_bytes(count)?;

    Ok(BasesSection {
        peaks,
        confidences: ChannelGroup::new(a, c, g, t),
        basecalls,
        spare: SpareConfidences::from_raw(substitution, insertion, deletion),
    })
}

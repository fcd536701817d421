//! Trace sample arrays, one per channel.
//!
//! Version 2 interleaves the channels as `A[i], C[i], G[i], T[i]` and stores
//! raw values. Version 3 stores each channel as its own array, in A, C, G, T
//! order, with values replaced by second-order delta residuals.

use std::io::Read;

use bytestream::{ByteReader, ByteWriter, ValueWidth};
use wire::{SampleWidth, ScfHeader, ScfVersion, SectionKind, CHANNELS};

use crate::delta::{DeltaCodec, DeltaEncoder};
use crate::error::{CodecError, CodecResult, FieldKind};
use crate::sections::{capped, header_field, read_section};
use crate::types::{Channel, ChannelGroup};

/// Byte layout of the samples section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplesLayout {
    V2,
    V3,
}

impl SamplesLayout {
    #[must_use]
    pub const fn for_version(version: ScfVersion) -> Self {
        match version {
            ScfVersion::V2 => Self::V2,
            ScfVersion::V3 => Self::V3,
        }
    }

    /// Decodes `header.samples` positions per channel, as actual values.
    pub fn decode<R: Read>(
        self,
        reader: &mut ByteReader<R>,
        header: &ScfHeader,
    ) -> CodecResult<ChannelGroup<Vec<u16>>> {
        if header.samples == 0 {
            return Ok(ChannelGroup::default());
        }
        let count = header.samples as usize;
        let offset = u64::from(header.samples_offset);

        read_section(reader, SectionKind::Samples, offset, |reader| {
            let width = header.sample_width()?;
            let mut positions = self.read_stored(reader, count, width.value_width())?;
            self.extract_actual_positions(&mut positions, width);
            Ok(positions)
        })
    }

    fn read_stored<R: Read>(
        self,
        reader: &mut ByteReader<R>,
        count: usize,
        width: ValueWidth,
    ) -> CodecResult<ChannelGroup<Vec<u16>>> {
        let mut positions = ChannelGroup::from_fn(|_| Vec::with_capacity(capped(count)));
        match self {
            Self::V2 => {
                for _ in 0..count {
                    for channel in Channel::ALL {
                        positions.get_mut(channel).push(read_sample(reader, width)?);
                    }
                }
            }
            Self::V3 => {
                for channel in Channel::ALL {
                    let column = positions.get_mut(channel);
                    for _ in 0..count {
                        column.push(read_sample(reader, width)?);
                    }
                }
            }
        }
        Ok(positions)
    }

    /// Converts stored values to actual positions, in place.
    ///
    /// A no-op for version 2; undoes the delta compression for version 3.
    pub fn extract_actual_positions(
        self,
        positions: &mut ChannelGroup<Vec<u16>>,
        width: SampleWidth,
    ) {
        if let Some(codec) = self.delta_codec(width) {
            for channel in Channel::ALL {
                apply(positions.get_mut(channel), |values| codec.decode_values(values));
            }
        }
    }

    /// Converts actual positions to stored values, in place. Inverse of
    /// [`extract_actual_positions`](Self::extract_actual_positions).
    pub fn compress_positions(self, positions: &mut ChannelGroup<Vec<u16>>, width: SampleWidth) {
        if let Some(codec) = self.delta_codec(width) {
            for channel in Channel::ALL {
                apply(positions.get_mut(channel), |values| codec.encode_values(values));
            }
        }
    }

    fn delta_codec(self, width: SampleWidth) -> Option<DeltaCodec> {
        match self {
            Self::V2 => None,
            Self::V3 => Some(DeltaCodec::new(
                DeltaEncoder::SecondOrder,
                width.value_width(),
            )),
        }
    }

    /// Encodes positions and records the sample count and width in `header`.
    ///
    /// Values wider than `width` are truncated.
    pub fn encode(
        self,
        positions: &ChannelGroup<Vec<u16>>,
        width: SampleWidth,
        header: &mut ScfHeader,
    ) -> CodecResult<Vec<u8>> {
        let count = positions.a.len();
        for (channel, column) in positions.iter() {
            if column.len() != count {
                return Err(CodecError::LengthMismatch {
                    field: FieldKind::Positions(channel),
                    expected: count,
                    actual: column.len(),
                });
            }
        }
        header.samples = header_field(count)?;
        header.sample_size = width.bytes() as u32;

        if width == SampleWidth::One {
            let clipped = positions
                .iter()
                .map(|(_, column)| column.iter().filter(|&&v| v > 0xFF).count())
                .sum::<usize>();
            if clipped > 0 {
                tracing::warn!(clipped, "sample values truncated to one byte");
            }
        }

        let mut stored = positions.clone();
        self.compress_positions(&mut stored, width);

        let value_width = width.value_width();
        let mut writer = ByteWriter::with_capacity(count * CHANNELS * width.bytes());
        match self {
            Self::V2 => {
                for i in 0..count {
                    for (_, column) in stored.iter() {
                        value_width.write(&mut writer, i64::from(column[i]));
                    }
                }
            }
            Self::V3 => {
                for (_, column) in stored.iter() {
                    for &value in column {
                        value_width.write(&mut writer, i64::from(value));
                    }
                }
            }
        }
        tracing::debug!(layout = ?self, samples = count, width = width.bytes(), "samples encoded");
        Ok(writer.finish())
    }
}

fn read_sample<R: Read>(reader: &mut ByteReader<R>, width: ValueWidth) -> CodecResult<u16> {
    // sample widths are at most two bytes and read unsigned
    Ok(width.read(reader)? as u16)
}

fn apply(column: &mut Vec<u16>, transform: impl FnOnce(&mut [i64])) {
    let mut values: Vec<i64> = column.iter().map(|&v| i64::from(v)).collect();
    transform(&mut values);
    for (slot, value) in column.iter_mut().zip(values) {
        *slot = value as u16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;

    fn positions() -> ChannelGroup<Vec<u16>> {
        ChannelGroup::new(
            vec![0, 10, 20, 30],
            vec![5, 5, 5, 5],
            vec![100, 90, 200, 1],
            vec![65_535, 0, 65_535, 7],
        )
    }

    fn header(version: ScfVersion) -> ScfHeader {
        ScfHeader::new(version)
    }

    #[test]
    fn v2_is_interleaved_and_raw() {
        let group = ChannelGroup::new(vec![1, 2], vec![3, 4], vec![5, 6], vec![7, 8]);
        let mut h = header(ScfVersion::V2);
        let bytes = SamplesLayout::V2
            .encode(&group, SampleWidth::Two, &mut h)
            .unwrap();
        assert_eq!(
            bytes,
            vec![0, 1, 0, 3, 0, 5, 0, 7, 0, 2, 0, 4, 0, 6, 0, 8]
        );
        assert_eq!(h.samples, 2);
        assert_eq!(h.sample_size, 2);
    }

    #[test]
    fn v3_is_columnar_and_delta_compressed() {
        let group = ChannelGroup::new(vec![10, 20, 25], vec![0; 3], vec![0; 3], vec![0; 3]);
        let mut h = header(ScfVersion::V3);
        let bytes = SamplesLayout::V3
            .encode(&group, SampleWidth::Two, &mut h)
            .unwrap();
        // 10, 20 - 2*10, 25 - (2*20 - 10)
        assert_eq!(&bytes[..6], &[0, 10, 0, 0, 0xFF, 0xFB]);
        assert_eq!(bytes.len(), 3 * 4 * 2);
    }

    #[test]
    fn roundtrip_both_layouts_and_widths() {
        for layout in [SamplesLayout::V2, SamplesLayout::V3] {
            let mut h = header(ScfVersion::V3);
            let bytes = layout
                .encode(&positions(), SampleWidth::Two, &mut h)
                .unwrap();
            let decoded = layout
                .decode(&mut ByteReader::new(&bytes[..]), &h)
                .unwrap();
            assert_eq!(decoded, positions());

            let small = positions().map(|c| c.into_iter().map(|v| v & 0xFF).collect::<Vec<_>>());
            let mut h = header(ScfVersion::V3);
            let bytes = layout.encode(&small, SampleWidth::One, &mut h).unwrap();
            assert_eq!(bytes.len(), 4 * 4);
            let decoded = layout
                .decode(&mut ByteReader::new(&bytes[..]), &h)
                .unwrap();
            assert_eq!(decoded, small);
        }
    }

    #[test]
    fn one_byte_encode_truncates() {
        let group = ChannelGroup::new(vec![0x1FF], vec![1], vec![2], vec![3]);
        let mut h = header(ScfVersion::V2);
        let bytes = SamplesLayout::V2
            .encode(&group, SampleWidth::One, &mut h)
            .unwrap();
        assert_eq!(bytes, vec![0xFF, 1, 2, 3]);
    }

    #[test]
    fn extract_is_noop_for_v2() {
        let mut group = positions();
        SamplesLayout::V2.extract_actual_positions(&mut group, SampleWidth::Two);
        assert_eq!(group, positions());
    }

    #[test]
    fn extract_inverts_compress_for_v3() {
        let mut group = positions();
        SamplesLayout::V3.compress_positions(&mut group, SampleWidth::Two);
        assert_ne!(group, positions());
        SamplesLayout::V3.extract_actual_positions(&mut group, SampleWidth::Two);
        assert_eq!(group, positions());
    }

    #[test]
    fn unequal_channels_rejected() {
        let mut group = positions();
        group.t.push(1);
        let err = SamplesLayout::V3
            .encode(&group, SampleWidth::Two, &mut header(ScfVersion::V3))
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::LengthMismatch {
                field: FieldKind::Positions(Channel::T),
                expected: 4,
                actual: 5
            }
        );
    }

    #[test]
    fn truncated_section_names_samples() {
        let mut h = header(ScfVersion::V3);
        let bytes = SamplesLayout::V3
            .encode(&positions(), SampleWidth::Two, &mut h)
            .unwrap();
        let err = SamplesLayout::V3
            .decode(&mut ByteReader::new(&bytes[..bytes.len() - 1]), &h)
            .unwrap_err();
        assert_eq!(err.section(), Some(SectionKind::Samples));
        assert_eq!(err.class(), ErrorClass::Truncated);
    }

    #[test]
    fn bad_sample_size_names_samples() {
        let mut h = header(ScfVersion::V3);
        let bytes = SamplesLayout::V3
            .encode(&positions(), SampleWidth::Two, &mut h)
            .unwrap();
        h.sample_size = 3;
        let err = SamplesLayout::V3
            .decode(&mut ByteReader::new(&bytes[..]), &h)
            .unwrap_err();
        assert_eq!(err.section(), Some(SectionKind::Samples));
        assert!(matches!(err, CodecError::Section { offset: 0, .. }));
    }

    #[test]
    fn empty_samples() {
        let mut h = header(ScfVersion::V3);
        let bytes = SamplesLayout::V3
            .encode(&ChannelGroup::default(), SampleWidth::Two, &mut h)
            .unwrap();
        assert!(bytes.is_empty());
        let decoded = SamplesLayout::V3
            .decode(&mut ByteReader::new(&[][..]), &h)
            .unwrap();
        assert_eq!(decoded, ChannelGroup::default());
    }
}

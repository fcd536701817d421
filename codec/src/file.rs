//! Whole-file decode and encode.
//!
//! Decoding reads the header, plans the sections from its counts and
//! offsets, and decodes them in ascending offset order over a single
//! forward-only reader. Encoding lays sections out contiguously after the
//! header as samples, bases, comments, private data.

use std::io::Read;

use bytestream::ByteReader;
use wire::{plan_sections, read_header, SampleWidth, ScfHeader, ScfVersion, SectionKind, HEADER_SIZE};

use crate::chromatogram::Chromatogram;
use crate::error::{CodecError, CodecResult};
use crate::sections::{
    decode_comments, decode_private_data, encode_comments, encode_private_data, header_field,
    BasesLayout, SamplesLayout,
};
use crate::types::ClipRange;
use crate::visitor::{emit_bases, emit_positions, ChromatogramBuilder, ChromatogramVisitor};

/// A decoded file: its header and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScfFile {
    pub header: ScfHeader,
    pub chromatogram: Chromatogram,
}

/// Output format selection for [`encode_scf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    pub version: ScfVersion,
    pub sample_width: SampleWidth,
}

impl EncodeOptions {
    #[must_use]
    pub const fn new(version: ScfVersion, sample_width: SampleWidth) -> Self {
        Self {
            version,
            sample_width,
        }
    }
}

/// Bytes produced by [`encode_scf`] and the header written at their start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedScf {
    pub header: ScfHeader,
    pub bytes: Vec<u8>,
}

/// Decodes a complete file into memory.
pub fn decode_scf<R: Read>(reader: R, limits: &wire::Limits) -> CodecResult<ScfFile> {
    let mut builder = ChromatogramBuilder::new();
    let header = decode_scf_with_visitor(reader, limits, &mut builder)?;
    Ok(ScfFile {
        header,
        chromatogram: builder.build(),
    })
}

/// Decodes a file, pushing each field to `visitor` as its section is read.
///
/// Returns the header. On error the visitor may have received the fields of
/// sections decoded before the failing one. Bytes after the last section are
/// ignored.
pub fn decode_scf_with_visitor<R, V>(
    reader: R,
    limits: &wire::Limits,
    visitor: &mut V,
) -> CodecResult<ScfHeader>
where
    R: Read,
    V: ChromatogramVisitor + ?Sized,
{
    let mut reader = ByteReader::new(reader);
    let header = read_header(&mut reader)
        .map_err(|err| CodecError::from(err).in_section(SectionKind::Header, 0))?;
    let version = header.scf_version()?;
    let spans = plan_sections(&header, limits)?;
    tracing::debug!(
        ?version,
        samples = header.samples,
        bases = header.bases,
        sections = spans.len(),
        "header decoded"
    );

    visitor.visit_header(&header);
    visitor.visit_clip(ClipRange {
        left: header.bases_left_clip,
        right: header.bases_right_clip,
    });

    for span in spans {
        match span.kind {
            SectionKind::Samples => {
                let positions = SamplesLayout::for_version(version).decode(&mut reader, &header)?;
                emit_positions(visitor, positions);
            }
            SectionKind::Bases => {
                let bases = BasesLayout::for_version(version).decode(&mut reader, &header)?;
                emit_bases(visitor, bases);
            }
            SectionKind::Comments => {
                visitor.visit_comments(decode_comments(&mut reader, &header)?);
            }
            SectionKind::PrivateData => {
                visitor.visit_private_data(decode_private_data(&mut reader, &header)?);
            }
            SectionKind::Header => {}
        }
    }

    if !reader.at_end()? {
        tracing::debug!(offset = reader.position() - 1, "trailing bytes after last section");
    }
    visitor.visit_end();
    Ok(header)
}

/// Encodes a chromatogram as a complete file.
pub fn encode_scf(chromatogram: &Chromatogram, options: &EncodeOptions) -> CodecResult<EncodedScf> {
    let mut header = ScfHeader::new(options.version);
    header.bases_left_clip = chromatogram.clip.left;
    header.bases_right_clip = chromatogram.clip.right;

    let samples = SamplesLayout::for_version(options.version).encode(
        &chromatogram.positions,
        options.sample_width,
        &mut header,
    )?;
    let bases = BasesLayout::for_version(options.version).encode(&chromatogram.bases, &mut header)?;
    let comments = encode_comments(&chromatogram.comments, &mut header)?;
    let private = encode_private_data(&chromatogram.private_data, &mut header)?;

    let mut offset = HEADER_SIZE;
    let mut place = |len: usize| -> CodecResult<u32> {
        let start = header_field(offset)?;
        offset += len;
        Ok(start)
    };
    header.samples_offset = place(samples.len())?;
    header.bases_offset = place(bases.len())?;
    header.comments_offset = place(comments.len())?;
    header.private_offset = place(private.len())?;
    header_field(offset)?;

    let mut bytes = Vec::with_capacity(offset);
    bytes.extend_from_slice(&header.to_bytes());
    for section in [&samples, &bases, &comments, &private] {
        bytes.extend_from_slice(section);
    }
    debug_assert_eq!(bytes.len(), offset);

    tracing::debug!(
        version = ?options.version,
        bytes = bytes.len(),
        samples = header.samples,
        bases = header.bases,
        "file encoded"
    );
    Ok(EncodedScf { header, bytes })
}

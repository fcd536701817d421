//! Section naming and layout planning.

use std::fmt;

use crate::error::{DecodeError, LimitKind, WireResult};
use crate::header::{ScfHeader, HEADER_SIZE};
use crate::limits::Limits;

/// Bytes per base in either bases layout: a 4-byte peak, four channel
/// confidences, the basecall and three spare confidences.
pub const BASE_RECORD_SIZE: usize = 12;

/// Number of trace channels (A, C, G, T).
pub const CHANNELS: usize = 4;

/// Named regions of an SCF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SectionKind {
    Header = 0,
    Samples = 1,
    Bases = 2,
    Comments = 3,
    PrivateData = 4,
}

impl SectionKind {
    /// Returns a lowercase name suitable for messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Samples => "samples",
            Self::Bases => "bases",
            Self::Comments => "comments",
            Self::PrivateData => "private data",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A section's byte range within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub kind: SectionKind,
    pub offset: u64,
    pub len: u64,
}

impl SectionSpan {
    /// Returns the offset one past the last byte of the section.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.offset + self.len
    }
}

/// Returns the byte length of the samples section for a header.
pub fn samples_section_len(header: &ScfHeader) -> WireResult<u64> {
    if header.samples == 0 {
        return Ok(0);
    }
    let width = header.sample_width()?;
    Ok(u64::from(header.samples) * (CHANNELS * width.bytes()) as u64)
}

/// Returns the byte length of the bases section for a header.
#[must_use]
pub fn bases_section_len(header: &ScfHeader) -> u64 {
    u64::from(header.bases) * BASE_RECORD_SIZE as u64
}

/// Checks header counts against `limits`.
pub fn check_limits(header: &ScfHeader, limits: &Limits) -> WireResult<()> {
    let checks = [
        (LimitKind::Bases, header.bases, limits.max_bases),
        (LimitKind::Samples, header.samples, limits.max_samples),
        (
            LimitKind::CommentBytes,
            header.comments_size,
            limits.max_comment_bytes,
        ),
        (
            LimitKind::PrivateBytes,
            header.private_size,
            limits.max_private_bytes,
        ),
    ];
    for (kind, actual, limit) in checks {
        let actual = usize::try_from(actual).unwrap_or(usize::MAX);
        if actual > limit {
            return Err(DecodeError::LimitsExceeded {
                kind,
                limit,
                actual,
            });
        }
    }
    Ok(())
}

/// Lists the non-empty sections of a file in ascending offset order.
///
/// Offsets come from the header and are not recomputed. Sections may appear
/// in any order on disk, but they must not overlap each other or the header.
pub fn plan_sections(header: &ScfHeader, limits: &Limits) -> WireResult<Vec<SectionSpan>> {
    check_limits(header, limits)?;

    let candidates = [
        SectionSpan {
            kind: SectionKind::Samples,
            offset: u64::from(header.samples_offset),
            len: samples_section_len(header)?,
        },
        SectionSpan {
            kind: SectionKind::Bases,
            offset: u64::from(header.bases_offset),
            len: bases_section_len(header),
        },
        SectionSpan {
            kind: SectionKind::Comments,
            offset: u64::from(header.comments_offset),
            len: u64::from(header.comments_size),
        },
        SectionSpan {
            kind: SectionKind::PrivateData,
            offset: u64::from(header.private_offset),
            len: u64::from(header.private_size),
        },
    ];

    let mut spans: Vec<SectionSpan> = candidates.into_iter().filter(|s| s.len > 0).collect();
    spans.sort_by_key(|s| (s.offset, s.kind as u8));

    let mut previous = SectionSpan {
        kind: SectionKind::Header,
        offset: 0,
        len: HEADER_SIZE as u64,
    };
    for span in &spans {
        if span.offset < previous.end() {
            return Err(DecodeError::SectionOverlap {
                first: previous.kind,
                second: span.kind,
            });
        }
        previous = *span;
    }

    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::ScfVersion;

    fn v3_header() -> ScfHeader {
        ScfHeader {
            samples: 10,
            samples_offset: 128,
            bases: 3,
            bases_offset: 208,
            comments_size: 6,
            comments_offset: 244,
            sample_size: 2,
            ..ScfHeader::new(ScfVersion::V3)
        }
    }

    #[test]
    fn section_lengths() {
        let header = v3_header();
        assert_eq!(samples_section_len(&header).unwrap(), 80);
        assert_eq!(bases_section_len(&header), 36);
    }

    #[test]
    fn plan_in_offset_order() {
        let spans = plan_sections(&v3_header(), &Limits::for_testing()).unwrap();
        let kinds: Vec<_> = spans.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Samples, SectionKind::Bases, SectionKind::Comments]
        );
        assert_eq!(spans[1].offset, 208);
        assert_eq!(spans[1].end(), 244);
    }

    #[test]
    fn plan_sorts_reordered_sections() {
        let mut header = v3_header();
        header.comments_offset = 128;
        header.samples_offset = 134;
        header.bases_offset = 214;
        let spans = plan_sections(&header, &Limits::for_testing()).unwrap();
        assert_eq!(spans[0].kind, SectionKind::Comments);
        assert_eq!(spans[2].kind, SectionKind::Bases);
    }

    #[test]
    fn plan_skips_empty_sections() {
        let mut header = v3_header();
        header.comments_size = 0;
        header.samples = 0;
        header.sample_size = 0;
        let spans = plan_sections(&header, &Limits::for_testing()).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SectionKind::Bases);
    }

    #[test]
    fn plan_rejects_overlap() {
        let mut header = v3_header();
        header.bases_offset = 200;
        let err = plan_sections(&header, &Limits::for_testing()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::SectionOverlap {
                first: SectionKind::Samples,
                second: SectionKind::Bases
            }
        );
    }

    #[test]
    fn plan_rejects_section_inside_header() {
        let mut header = v3_header();
        header.samples_offset = 64;
        let err = plan_sections(&header, &Limits::for_testing()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SectionOverlap {
                first: SectionKind::Header,
                ..
            }
        ));
    }

    #[test]
    fn plan_rejects_bad_sample_size() {
        let mut header = v3_header();
        header.sample_size = 3;
        assert_eq!(
            plan_sections(&header, &Limits::for_testing()),
            Err(DecodeError::InvalidSampleSize { found: 3 })
        );
    }

    #[test]
    fn plan_enforces_limits() {
        let mut header = v3_header();
        header.bases = 5000;
        let err = plan_sections(&header, &Limits::for_testing()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::LimitsExceeded {
                kind: LimitKind::Bases,
                ..
            }
        ));
    }

    #[test]
    fn section_names() {
        assert_eq!(SectionKind::PrivateData.to_string(), "private data");
        assert_eq!(SectionKind::Bases.name(), "bases");
    }
}

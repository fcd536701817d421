//! Inspection, decoding and conversion tools for SCF trace files.
//!
//! This crate provides the reports behind the `scf-tools` binary:
//!
//! - Summarize a file's header and section layout without decoding it
//! - Decode a file to JSON or a per-base listing
//! - Re-encode a file in another SCF version or sample width
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see what a file contains.

use std::fmt::Write as _;

use codec::{
    decode_scf, encode_scf, Chromatogram, CodecResult, EncodeOptions, EncodedScf, ScfFile,
    WireLimits,
};
use serde::Serialize;
use wire::{decode_header, plan_sections, ScfHeader, ScfVersion, SectionSpan};

/// Header and section layout of a file, gathered without decoding sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub header: ScfHeader,
    pub version: ScfVersion,
    pub sections: Vec<SectionSpan>,
    /// Length of the inspected input.
    pub file_len: u64,
}

impl InspectReport {
    /// Sections whose declared end lies past the end of the input.
    pub fn truncated_sections(&self) -> impl Iterator<Item = &SectionSpan> + '_ {
        self.sections
            .iter()
            .filter(move |span| span.end() > self.file_len)
    }

    /// Bytes after the last section.
    #[must_use]
    pub fn trailing_bytes(&self) -> u64 {
        let end = self
            .sections
            .iter()
            .map(SectionSpan::end)
            .max()
            .unwrap_or(wire::HEADER_SIZE as u64);
        self.file_len.saturating_sub(end)
    }
}

/// Reads the header of `bytes` and plans its sections.
pub fn inspect_scf(bytes: &[u8], limits: &WireLimits) -> CodecResult<InspectReport> {
    let header = decode_header(bytes)?;
    let version = header.scf_version()?;
    let sections = plan_sections(&header, limits)?;
    Ok(InspectReport {
        header,
        version,
        sections,
        file_len: bytes.len() as u64,
    })
}

/// Decoded file in the shape printed as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeOutput {
    pub header: ScfHeader,
    pub sequence: String,
    pub chromatogram: Chromatogram,
}

/// Decodes `bytes` into a serializable report.
pub fn decode_scf_json(bytes: &[u8], limits: &WireLimits) -> CodecResult<DecodeOutput> {
    let file = decode_scf(bytes, limits)?;
    Ok(DecodeOutput {
        header: file.header,
        sequence: file.chromatogram.bases.sequence(),
        chromatogram: file.chromatogram,
    })
}

/// Formats a decoded file as a header summary and one line per base.
#[must_use]
pub fn format_decode_pretty(file: &ScfFile) -> String {
    let chromatogram = &file.chromatogram;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "version: {} samples: {} x {} bytes bases: {}",
        String::from_utf8_lossy(&file.header.version),
        chromatogram.sample_count(),
        file.header.sample_size,
        chromatogram.base_count()
    );
    let clip = chromatogram.clip;
    if !clip.is_empty() {
        let _ = writeln!(out, "clip: left {} right {}", clip.left, clip.right);
    }
    for (key, value) in chromatogram.comments.iter() {
        let _ = writeln!(out, "{key}={value}");
    }
    if !chromatogram.private_data.is_empty() {
        let _ = writeln!(out, "private data: {} bytes", chromatogram.private_data.len());
    }
    let _ = writeln!(out, "  #  base   peak    A    C    G    T");
    for (i, record) in chromatogram.bases.records().enumerate() {
        let q = record.confidences;
        let _ = writeln!(
            out,
            "{:>3}  {:>4} {:>6} {:>4} {:>4} {:>4} {:>4}",
            i, record.basecall, record.peak, q.a, q.c, q.g, q.t
        );
    }
    out
}

/// Re-encodes an SCF file with the given options.
pub fn convert_scf(
    bytes: &[u8],
    options: &EncodeOptions,
    limits: &WireLimits,
) -> CodecResult<EncodedScf> {
    let file = decode_scf(bytes, limits)?;
    tracing::info!(
        from = ?file.header.scf_version(),
        to = ?options.version,
        bases = file.chromatogram.base_count(),
        "converting"
    );
    encode_scf(&file.chromatogram, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::{ChannelGroup, ClipRange};
    use wire::{SampleWidth, SectionKind};

    fn sample_bytes(version: ScfVersion) -> Vec<u8> {
        let mut chromatogram = Chromatogram::default();
        chromatogram.positions = ChannelGroup::new(vec![1, 2, 3], vec![0; 3], vec![9; 3], vec![4; 3]);
        chromatogram.bases.peaks = vec![1];
        chromatogram.bases.basecalls = b"T".to_vec();
        chromatogram.bases.confidences = ChannelGroup::new(vec![0], vec![0], vec![0], vec![33]);
        chromatogram.comments.insert("NAME", "x");
        chromatogram.clip = ClipRange { left: 0, right: 1 };
        let options = EncodeOptions::new(version, SampleWidth::Two);
        encode_scf(&chromatogram, &options).unwrap().bytes
    }

    #[test]
    fn inspect_lists_sections_in_order() {
        let bytes = sample_bytes(ScfVersion::V3);
        let report = inspect_scf(&bytes, &WireLimits::default()).unwrap();
        let kinds: Vec<_> = report.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [SectionKind::Samples, SectionKind::Bases, SectionKind::Comments]
        );
        assert_eq!(report.truncated_sections().count(), 0);
        assert_eq!(report.trailing_bytes(), 0);
    }

    #[test]
    fn inspect_reports_truncation() {
        let bytes = sample_bytes(ScfVersion::V2);
        let report = inspect_scf(&bytes[..bytes.len() - 2], &WireLimits::default()).unwrap();
        let truncated: Vec<_> = report.truncated_sections().map(|s| s.kind).collect();
        assert_eq!(truncated, [SectionKind::Comments]);
    }

    #[test]
    fn decode_json_contains_sequence() {
        let bytes = sample_bytes(ScfVersion::V3);
        let output = decode_scf_json(&bytes, &WireLimits::default()).unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["sequence"], "T");
        assert_eq!(json["chromatogram"]["comments"]["NAME"], "x");
    }

    #[test]
    fn pretty_lists_bases() {
        let bytes = sample_bytes(ScfVersion::V3);
        let file = decode_scf(&bytes[..], &WireLimits::default()).unwrap();
        let text = format_decode_pretty(&file);
        assert!(text.contains("version: 3.00"));
        assert!(text.contains("NAME=x"));
        assert!(text.contains("clip: left 0 right 1"));
        assert!(text.lines().last().unwrap().trim_end().ends_with("33"));
    }

    #[test]
    fn convert_changes_version_only() {
        let bytes = sample_bytes(ScfVersion::V2);
        let converted = convert_scf(&bytes, &EncodeOptions::default(), &WireLimits::default())
            .unwrap();
        assert_eq!(converted.header.scf_version().unwrap(), ScfVersion::V3);

        let before = decode_scf(&bytes[..], &WireLimits::default()).unwrap();
        let after = decode_scf(&converted.bytes[..], &WireLimits::default()).unwrap();
        assert_eq!(before.chromatogram, after.chromatogram);
    }
}

//! Push-style access to decoded fields.
//!
//! [`decode_scf_with_visitor`](crate::decode_scf_with_visitor) hands each
//! field to a [`ChromatogramVisitor`] as soon as its section is decoded, in
//! file order. Every method has a no-op default so visitors only implement
//! what they consume.

use wire::ScfHeader;

use crate::chromatogram::Chromatogram;
use crate::sections::{BasesSection, Comments, SpareConfidences};
use crate::types::{Channel, ChannelGroup, ClipRange};

/// Receives decoded fields of one file.
#[allow(unused_variables)]
pub trait ChromatogramVisitor {
    /// Called first, once the header has been validated.
    fn visit_header(&mut self, header: &ScfHeader) {}

    /// Called with the header's clip points.
    fn visit_clip(&mut self, clip: ClipRange) {}

    /// Actual sample values of one channel, in A, C, G, T order.
    fn visit_positions(&mut self, channel: Channel, positions: Vec<u16>) {}

    fn visit_peaks(&mut self, peaks: Vec<u32>) {}

    /// Per-base confidences of one channel, in A, C, G, T order.
    fn visit_confidences(&mut self, channel: Channel, confidences: Vec<u8>) {}

    fn visit_basecalls(&mut self, basecalls: Vec<u8>) {}

    fn visit_substitution_confidences(&mut self, confidences: Vec<u8>) {}

    fn visit_insertion_confidences(&mut self, confidences: Vec<u8>) {}

    fn visit_deletion_confidences(&mut self, confidences: Vec<u8>) {}

    fn visit_comments(&mut self, comments: Comments) {}

    fn visit_private_data(&mut self, data: Vec<u8>) {}

    /// Called after the last section.
    fn visit_end(&mut self) {}
}

/// Visitor that assembles a [`Chromatogram`].
#[derive(Debug, Default)]
pub struct ChromatogramBuilder {
    chromatogram: Chromatogram,
}

impl ChromatogramBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn build(self) -> Chromatogram {
        self.chromatogram
    }
}

impl ChromatogramVisitor for ChromatogramBuilder {
    fn visit_clip(&mut self, clip: ClipRange) {
        self.chromatogram.clip = clip;
    }

    fn visit_positions(&mut self, channel: Channel, positions: Vec<u16>) {
        *self.chromatogram.positions.get_mut(channel) = positions;
    }

    fn visit_peaks(&mut self, peaks: Vec<u32>) {
        self.chromatogram.bases.peaks = peaks;
    }

    fn visit_confidences(&mut self, channel: Channel, confidences: Vec<u8>) {
        *self.chromatogram.bases.confidences.get_mut(channel) = confidences;
    }

    fn visit_basecalls(&mut self, basecalls: Vec<u8>) {
        self.chromatogram.bases.basecalls = basecalls;
    }

    fn visit_substitution_confidences(&mut self, confidences: Vec<u8>) {
        self.chromatogram.bases.spare.substitution = Some(confidences);
    }

    fn visit_insertion_confidences(&mut self, confidences: Vec<u8>) {
        self.chromatogram.bases.spare.insertion = Some(confidences);
    }

    fn visit_deletion_confidences(&mut self, confidences: Vec<u8>) {
        self.chromatogram.bases.spare.deletion = Some(confidences);
    }

    fn visit_comments(&mut self, comments: Comments) {
        self.chromatogram.comments = comments;
    }

    fn visit_private_data(&mut self, data: Vec<u8>) {
        self.chromatogram.private_data = data;
    }
}

/// Pushes a decoded positions group to `visitor`.
pub(crate) fn emit_positions<V>(visitor: &mut V, positions: ChannelGroup<Vec<u16>>)
where
    V: ChromatogramVisitor + ?Sized,
{
    for (channel, column) in positions.into_entries() {
        visitor.visit_positions(channel, column);
    }
}

/// Pushes a decoded bases section to `visitor`. Absent spare columns are skipped.
pub(crate) fn emit_bases<V>(visitor: &mut V, bases: BasesSection)
where
    V: ChromatogramVisitor + ?Sized,
{
    let BasesSection {
        peaks,
        confidences,
        basecalls,
        spare:
            SpareConfidences {
                substitution,
                insertion,
                deletion,
            },
    } = bases;

    visitor.visit_peaks(peaks);
    for (channel, column) in confidences.into_entries() {
        visitor.visit_confidences(channel, column);
    }
    visitor.visit_basecalls(basecalls);
    if let Some(column) = substitution {
        visitor.visit_substitution_confidences(column);
    }
    if let Some(column) = insertion {
        visitor.visit_insertion_confidences(column);
    }
    if let Some(column) = deletion {
        visitor.visit_deletion_confidences(column);
    }
}

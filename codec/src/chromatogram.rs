//! In-memory chromatogram assembled from the sections of a file.

use crate::sections::{BasesSection, Comments};
use crate::types::{ChannelGroup, ClipRange};

/// Everything an SCF file carries besides its header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromatogram {
    pub bases: BasesSection,
    /// Trace samples per channel.
    pub positions: ChannelGroup<Vec<u16>>,
    pub comments: Comments,
    /// Quality clip points; both zero when the read is not clipped.
    pub clip: ClipRange,
    pub private_data: Vec<u8>,
}

impl Chromatogram {
    /// Number of samples per channel.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.positions.a.len()
    }

    #[must_use]
    pub fn base_count(&self) -> usize {
        self.bases.len()
    }

    /// Largest sample value over all channels, or 0 without samples.
    #[must_use]
    pub fn max_sample(&self) -> u16 {
        self.positions
            .iter()
            .flat_map(|(_, column)| column.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        let mut chromatogram = Chromatogram::default();
        assert_eq!(chromatogram.sample_count(), 0);
        assert_eq!(chromatogram.max_sample(), 0);

        chromatogram.positions = ChannelGroup::new(vec![1, 9], vec![2, 3], vec![0, 0], vec![4, 4]);
        chromatogram.bases.basecalls = b"AC".to_vec();
        assert_eq!(chromatogram.sample_count(), 2);
        assert_eq!(chromatogram.base_count(), 2);
        assert_eq!(chromatogram.max_sample(), 9);
    }
}

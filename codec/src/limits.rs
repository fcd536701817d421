//! Limits for codec-level decoding.

/// Codec-specific limits for payloads that carry their own element counts.
///
/// Section sizes are bounded by [`wire::Limits`]; these limits cover
/// standalone payloads such as run-length encoded glyphs, whose declared
/// count is read from the payload itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum declared element count of a run-length glyph payload.
    pub max_glyphs: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_glyphs: 16 * 1024 * 1024,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self { max_glyphs: 4096 }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_glyphs: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_reasonable() {
        let limits = CodecLimits::default();
        assert!(limits.max_glyphs >= 64 * 1024);
    }

    #[test]
    fn testing_limits_smaller() {
        assert!(CodecLimits::for_testing().max_glyphs < CodecLimits::default().max_glyphs);
    }

    #[test]
    fn unlimited_limits() {
        assert_eq!(CodecLimits::unlimited().max_glyphs, usize::MAX);
    }
}

//! Configurable limits for bounded decoding.

/// Header-level limits checked before any section is read.
///
/// Section buffers are sized from header counts, so these limits bound the
/// memory a hostile header can make the decoder allocate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of called bases.
    pub max_bases: usize,

    /// Maximum number of sample points per channel.
    pub max_samples: usize,

    /// Maximum size of the comments section in bytes.
    pub max_comment_bytes: usize,

    /// Maximum size of the private data section in bytes.
    pub max_private_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Capillary reads stay well under this
            max_bases: 64 * 1024,
            max_samples: 1024 * 1024,
            max_comment_bytes: 1024 * 1024,
            max_private_bytes: 16 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_bases: 1024,
            max_samples: 16 * 1024,
            max_comment_bytes: 4096,
            max_private_bytes: 4096,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_bases: usize::MAX,
            max_samples: usize::MAX,
            max_comment_bytes: usize::MAX,
            max_private_bytes: usize::MAX,
        }
    }
}

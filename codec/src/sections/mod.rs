//! Codecs for the individual sections of an SCF file.
//!
//! Each decoder locates its section by skipping forward to the offset the
//! header declares, reads exactly the number of records the header counts,
//! and leaves the reader positioned just past the section. Failures are
//! reported as [`CodecError::Section`] naming the section and its offset.

use std::io::Read;

use bytestream::{ByteReader, MAX_PREALLOC};
use wire::SectionKind;

use crate::error::{CodecError, CodecResult, LimitKind};

mod bases;
mod comments;
mod private;
mod samples;

pub use bases::{BasesLayout, BasesRecord, BasesSection, SpareConfidences};
pub use comments::{decode_comments, encode_comments, format_comments, parse_comments, Comments};
pub use private::{decode_private_data, encode_private_data};
pub use samples::SamplesLayout;

/// Seeks to `offset`, runs `body` and scopes any error to the section.
pub(crate) fn read_section<R, T>(
    reader: &mut ByteReader<R>,
    section: SectionKind,
    offset: u64,
    body: impl FnOnce(&mut ByteReader<R>) -> CodecResult<T>,
) -> CodecResult<T>
where
    R: Read,
{
    let result = reader
        .skip_to(offset)
        .map_err(CodecError::from)
        .and_then(|()| body(reader));
    match result {
        Ok(value) => {
            tracing::debug!(
                section = %section,
                offset,
                end = reader.position(),
                "section decoded"
            );
            Ok(value)
        }
        Err(err) => Err(err.in_section(section, offset)),
    }
}

/// Initial capacity for a vector whose length comes from untrusted input.
pub(crate) fn capped(len: usize) -> usize {
    len.min(MAX_PREALLOC)
}

/// Converts an in-memory count to a 32-bit header field.
pub(crate) fn header_field(value: usize) -> CodecResult<u32> {
    u32::try_from(value).map_err(|_| CodecError::LimitsExceeded {
        kind: LimitKind::HeaderField,
        limit: u32::MAX as usize,
        actual: value,
    })
}

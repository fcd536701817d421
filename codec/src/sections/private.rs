//! Opaque private data carried through unchanged.

use std::io::Read;

use bytestream::ByteReader;
use wire::{ScfHeader, SectionKind};

use crate::error::CodecResult;
use crate::sections::{header_field, read_section};

/// Reads `header.private_size` bytes at `header.private_offset`.
pub fn decode_private_data<R: Read>(
    reader: &mut ByteReader<R>,
    header: &ScfHeader,
) -> CodecResult<Vec<u8>> {
    if header.private_size == 0 {
        return Ok(Vec::new());
    }
    let offset = u64::from(header.private_offset);
    let len = header.private_size as usize;
    read_section(reader, SectionKind::PrivateData, offset, |reader| {
        Ok(reader.read_bytes(len)?)
    })
}

/// Records the size of `data` in `header` and returns the section bytes.
pub fn encode_private_data(data: &[u8], header: &mut ScfHeader) -> CodecResult<Vec<u8>> {
    header.private_size = header_field(data.len())?;
    tracing::debug!(bytes = data.len(), "private data encoded");
    Ok(data.to_vec())
}

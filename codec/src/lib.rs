//! Section codecs and compression primitives for SCF trace files.
//!
//! This is the main codec crate. It ties together `bytestream` and `wire`
//! to decode and encode whole SCF files, individual sections, and the two
//! numeric compression schemes used with them.
//!
//! # Features
//!
//! - Samples sections in the interleaved v2 and delta-compressed v3 layouts
//! - Bases sections in the interleaved v2 and columnar v3 layouts
//! - Comments and private data sections
//! - Order-1, order-2 and order-3 delta prediction over any [`ValueWidth`]
//! - Guard-byte run-length encoding with random access
//! - Streaming decode into a [`ChromatogramVisitor`]
//!
//! # Design Principles
//!
//! - **Forward only** - Sections are read in offset order from any `Read`.
//! - **Stateless codecs** - Layouts and codecs are `Copy` values.
//! - **Errors name their section** - Decode failures carry section and offset.
//!
//! # Example
//!
//! ```
//! use codec::{decode_scf, encode_scf, Chromatogram, EncodeOptions, WireLimits};
//!
//! let mut chromatogram = Chromatogram::default();
//! chromatogram.comments.insert("NAME", "read1");
//!
//! let encoded = encode_scf(&chromatogram, &EncodeOptions::default()).unwrap();
//! let file = decode_scf(&encoded.bytes[..], &WireLimits::default()).unwrap();
//! assert_eq!(file.chromatogram, chromatogram);
//! ```

mod chromatogram;
mod delta;
mod error;
mod file;
mod limits;
mod rle;
mod sections;
#[cfg(test)]
mod test_support;
mod types;
mod visitor;

pub use bytestream::ValueWidth;
pub use chromatogram::Chromatogram;
pub use delta::{DeltaCodec, DeltaEncoder, DeltaHistory};
pub use error::{
    CodecError, CodecResult, ErrorClass, FieldKind, LimitKind, MalformedReason, ValueReason,
};
pub use file::{decode_scf, decode_scf_with_visitor, encode_scf, EncodeOptions, EncodedScf, ScfFile};
pub use limits::CodecLimits;
pub use rle::{
    decode_glyph_at, decode_glyphs, decode_glyphs_with_limits, decoded_glyph_count, runs,
    QualityRun, RunLengthGlyphCodec, DEFAULT_GUARD, MAX_RUN_LENGTH, RUN_LENGTH_PREAMBLE,
};
pub use sections::{
    decode_comments, decode_private_data, encode_comments, encode_private_data, format_comments,
    parse_comments, BasesLayout, BasesRecord, BasesSection, Comments, SamplesLayout,
    SpareConfidences,
};
pub use types::{Channel, ChannelGroup, ClipRange};
pub use visitor::{ChromatogramBuilder, ChromatogramVisitor};
pub use wire::Limits as WireLimits;

//! SCF header layout and section planning for the SCF codec.
//!
//! This crate handles the fixed 128-byte SCF header and the placement of the
//! sections it describes. It does not know how sections encode their
//! contents, only where they live and how long they are.
//!
//! # Design Principles
//!
//! - **Exact layout** - The header round-trips byte for byte, reserved words included.
//! - **Bounded decoding** - Header counts are validated against limits before any allocation.
//! - **No domain knowledge** - This crate handles placement, not trace contents.

mod error;
mod header;
mod limits;
mod section;

pub use error::{DecodeError, EncodeError, LimitKind, WireResult};
pub use header::{
    decode_header, encode_header, read_header, SampleWidth, ScfHeader, ScfVersion, HEADER_SIZE,
    MAGIC, SPARE_WORDS,
};
pub use limits::Limits;
pub use section::{
    bases_section_len, check_limits, plan_sections, samples_section_len, SectionKind,
    SectionSpan, BASE_RECORD_SIZE, CHANNELS,
};

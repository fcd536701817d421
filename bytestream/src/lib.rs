//! Forward-only byte cursor primitives for the SCF codec.
//!
//! This crate provides [`ByteReader`] and [`ByteWriter`] for big-endian
//! encoding and decoding, plus [`ValueWidth`] for algorithms that must work
//! the same way over 1, 2, 4 and 8 byte integers.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Forward only** - The reader never seeks backward; it works on any `Read`.
//! - **No domain knowledge** - This crate knows nothing about traces or sections.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter, ValueWidth};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u32(42);
//! ValueWidth::Short.write(&mut writer, 700);
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes[..]);
//! assert_eq!(reader.read_u32().unwrap(), 42);
//! assert_eq!(ValueWidth::Short.read(&mut reader).unwrap(), 700);
//! ```

mod error;
mod reader;
mod width;
mod writer;

pub use error::{CursorError, CursorResult};
pub use reader::{ByteReader, MAX_PREALLOC};
pub use width::ValueWidth;
pub use writer::ByteWriter;

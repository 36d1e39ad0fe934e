//! Bounded byte primitives for the cxml event stream codec.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for byte-level
//! encoding and decoding. Multi-byte integers are big-endian, matching the
//! cxml wire format.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about XML or events.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u8(3);
//! writer.write_u16(0x8001);
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_u8().unwrap(), 3);
//! assert_eq!(reader.read_u16().unwrap(), 0x8001);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;

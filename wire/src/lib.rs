//! Wire framing and field encoding for the cxml event stream codec.
//!
//! This crate handles the binary wire format: the stream header, event
//! record tags, the variable-width length/index field and the restricted
//! UTF-8 payload encoding. It does not know about events or the string
//! table, only the layout of bytes.
//!
//! # Design Principles
//!
//! - **Stable wire format** - Tags and header bytes never change within a version.
//! - **Bounded decoding** - Length fields are validated against limits before allocation.
//! - **No domain knowledge** - This crate handles framing, not XML semantics.

mod error;
mod header;
mod length;
mod limits;
mod tag;
pub mod utf8;

pub use error::{DecodeError, EncodeError, EncodingReason, LimitKind, WireResult};
pub use header::{
    decode_header, encode_header, HEADER, HEADER_SIZE, MAGIC, VERSION_MAJOR, VERSION_MINOR,
};
pub use length::{
    read_chars_len, read_string_field, write_chars_len, write_string_field, LengthField, ESCAPE,
    LONG_BACKREF_FLAG, MAX_LONG_VALUE, SHORT_BACKREF_FLAG, SHORT_LIMIT,
};
pub use limits::Limits;
pub use tag::EventTag;

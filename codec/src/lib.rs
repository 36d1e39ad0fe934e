//! Event stream encoding and decoding for the cxml binary XML format.
//!
//! This is the main codec crate. It ties together bytestream and wire to
//! turn a stream of XML parse events into compact bytes and back.
//!
//! # Features
//!
//! - Encoder usable directly as a content and lexical handler
//! - Pull (`next_event`) and push (`decode`) decoding
//! - Per-stream string interning with back-references
//! - Bounded decoding via configurable [`Limits`]
//! - Optional `serde` support for the event model
//!
//! # Design Principles
//!
//! - **Correctness first** - Round-trip and table parity are tested properly.
//! - **Explicit state** - Each encoder or decoder owns its string table.
//! - **Fail fast** - Any malformed input ends the stream with a typed error.

mod decoder;
mod encoder;
mod error;
mod event;
mod handler;
mod table;

pub use decoder::{DecodeStats, Decoder};
pub use encoder::Encoder;
pub use error::{CodecError, CodecResult, ErrorKind};
pub use event::{Attribute, Event, Locator};
pub use handler::{ContentHandler, DiscardLexical, EventCollector, LexicalHandler, SplitHandler};
pub use table::{Interned, StringTable};
pub use wire::{EventTag, Limits};

/// Encodes `events` into a complete stream.
///
/// The events are written as given; the caller supplies the closing
/// [`Event::EndDocument`].
pub fn encode_events(events: &[Event]) -> CodecResult<Vec<u8>> {
    let mut encoder = Encoder::new();
    encoder.encode_all(events)?;
    Ok(encoder.finish())
}

/// Decodes a complete stream into its events, including end of document.
///
/// Bytes after end of document are ignored.
pub fn decode_events(bytes: &[u8]) -> CodecResult<Vec<Event>> {
    let mut collector = EventCollector::new();
    decode_stream(bytes, &mut collector)?;
    Ok(collector.into_events())
}

/// Decodes a complete stream into `handler` with default limits.
pub fn decode_stream<H>(bytes: &[u8], handler: &mut H) -> CodecResult<()>
where
    H: ContentHandler + LexicalHandler + ?Sized,
{
    Decoder::new(bytes).decode(handler)
}

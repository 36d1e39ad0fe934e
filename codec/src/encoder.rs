//! Event stream encoder.

use bytestream::ByteWriter;
use tracing::{debug, trace};
use wire::{utf8, EventTag, LengthField};

use crate::error::{CodecError, CodecResult};
use crate::event::{Attribute, Event, Locator};
use crate::handler::{ContentHandler, LexicalHandler};
use crate::table::{Interned, StringTable};

const DEFAULT_CAPACITY: usize = 1024;

/// Serializes events into a cxml byte stream.
///
/// The header is written on construction and after [`reset`](Self::reset).
/// Events are accepted through [`write_event`](Self::write_event) or the
/// [`ContentHandler`] and [`LexicalHandler`] callbacks, so an encoder can be
/// handed to a [`Decoder`](crate::Decoder) directly.
///
/// Each record is written atomically: if an event is rejected, neither the
/// output nor the string table retains any part of it, and the encoder
/// stays usable.
#[derive(Debug)]
pub struct Encoder {
    writer: ByteWriter,
    table: StringTable,
    events: usize,
    finished: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Creates an encoder and writes the stream header.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an encoder with `bytes` of pre-allocated output.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        let mut encoder = Self {
            writer: ByteWriter::with_capacity(bytes.max(wire::HEADER_SIZE)),
            table: StringTable::new(),
            events: 0,
            finished: false,
        };
        encoder.start_stream();
        encoder
    }

    /// Encodes one event.
    pub fn write_event(&mut self, event: &Event) -> CodecResult<()> {
        event.replay(self)
    }

    /// Encodes every event in order, stopping at the first error.
    pub fn encode_all<'e, I>(&mut self, events: I) -> CodecResult<()>
    where
        I: IntoIterator<Item = &'e Event>,
    {
        events
            .into_iter()
            .try_for_each(|event| self.write_event(event))
    }

    /// Returns the number of entries in the string table.
    #[must_use]
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Returns the string table.
    #[must_use]
    pub fn table(&self) -> &StringTable {
        &self.table
    }

    /// Returns the number of records written since the header.
    #[must_use]
    pub fn events_written(&self) -> usize {
        self.events
    }

    /// Returns the number of bytes written, header included.
    #[must_use]
    pub fn bytes_written(&self) -> usize {
        self.writer.len()
    }

    /// Returns `true` once end of document has been written.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.writer.as_slice()
    }

    /// Consumes the encoder and returns the encoded stream.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.writer.finish()
    }

    /// Consumes the encoder and appends the encoded stream to `buf`.
    pub fn finish_into(self, buf: &mut Vec<u8>) {
        self.writer.finish_into(buf);
    }

    /// Discards all per-stream state and starts a new stream.
    ///
    /// The output buffer and the string table are cleared; the allocations
    /// are kept for reuse.
    pub fn reset(&mut self) {
        debug!(
            events = self.events,
            table_len = self.table.len(),
            "resetting cxml encoder"
        );
        self.writer.clear();
        self.table.clear();
        self.events = 0;
        self.finished = false;
        self.start_stream();
    }

    fn start_stream(&mut self) {
        wire::encode_header(&mut self.writer);
        debug!("cxml stream header written");
    }

    fn record<F>(&mut self, tag: EventTag, write_body: F) -> CodecResult<()>
    where
        F: FnOnce(&mut Self) -> CodecResult<()>,
    {
        if self.finished {
            return Err(CodecError::StreamFinished);
        }
        let offset = self.writer.len();
        let table_len = self.table.len();
        trace!(?tag, offset, "encoding record");

        self.writer.write_u8(tag.raw());
        if let Err(err) = write_body(self) {
            self.writer.truncate(offset);
            self.table.truncate(table_len);
            debug!(?tag, offset, error = %err, "rejected event");
            return Err(err);
        }

        self.events += 1;
        if tag.is_end_of_document() {
            self.finished = true;
            debug!(
                events = self.events,
                table_len = self.table.len(),
                bytes = self.writer.len(),
                "cxml stream finished"
            );
        }
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> CodecResult<()> {
        match self.table.intern(value) {
            Interned::Existing(index) => {
                wire::write_string_field(LengthField::back_ref(index)?, &mut self.writer)?;
            }
            // A failure below is rolled back by `record`, table entry included.
            Interned::Inserted(_) => {
                let len = utf8::encoded_len(value)?;
                wire::write_string_field(LengthField::literal(len)?, &mut self.writer)?;
                utf8::encode_into(value, &mut self.writer)?;
            }
        }
        Ok(())
    }

    fn write_chars(&mut self, text: &str) -> CodecResult<()> {
        let len = utf8::encoded_len(text)?;
        wire::write_chars_len(len, &mut self.writer)?;
        utf8::encode_into(text, &mut self.writer)?;
        Ok(())
    }

    fn write_names(&mut self, uri: &str, local_name: &str, qname: &str) -> CodecResult<()> {
        self.write_string(uri)?;
        self.write_string(local_name)?;
        self.write_string(qname)
    }

    fn write_attribute(&mut self, attribute: &Attribute) -> CodecResult<()> {
        self.write_names(&attribute.uri, &attribute.local_name, &attribute.qname)?;
        self.write_string(&attribute.attr_type)?;
        self.write_string(&attribute.value)
    }
}

/// Clamps a line or column number to the single byte the wire carries.
fn position_byte(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

impl ContentHandler for Encoder {
    fn set_document_locator(&mut self, locator: &Locator) -> CodecResult<()> {
        self.record(EventTag::Locator, |enc| {
            enc.write_string(&locator.public_id)?;
            enc.write_string(&locator.system_id)?;
            enc.writer.write_u8(position_byte(locator.line));
            enc.writer.write_u8(position_byte(locator.column));
            Ok(())
        })
    }

    fn start_document(&mut self) -> CodecResult<()> {
        self.record(EventTag::StartDocument, |_| Ok(()))
    }

    fn end_document(&mut self) -> CodecResult<()> {
        self.record(EventTag::EndDocument, |_| Ok(()))
    }

    fn start_prefix_mapping(&mut self, prefix: &str, uri: &str) -> CodecResult<()> {
        self.record(EventTag::StartPrefixMapping, |enc| {
            enc.write_string(prefix)?;
            enc.write_string(uri)
        })
    }

    fn end_prefix_mapping(&mut self, prefix: &str) -> CodecResult<()> {
        self.record(EventTag::EndPrefixMapping, |enc| enc.write_string(prefix))
    }

    fn start_element(
        &mut self,
        uri: &str,
        local_name: &str,
        qname: &str,
        attributes: &[Attribute],
    ) -> CodecResult<()> {
        let count = u16::try_from(attributes.len()).map_err(|_| CodecError::TooManyAttributes {
            count: attributes.len(),
        })?;
        self.record(EventTag::StartElement, |enc| {
            enc.writer.write_u16(count);
            for attribute in attributes {
                enc.write_attribute(attribute)?;
            }
            enc.write_names(uri, local_name, qname)
        })
    }

    fn end_element(&mut self, uri: &str, local_name: &str, qname: &str) -> CodecResult<()> {
        self.record(EventTag::EndElement, |enc| {
            enc.write_names(uri, local_name, qname)
        })
    }

    fn characters(&mut self, text: &str) -> CodecResult<()> {
        self.record(EventTag::Characters, |enc| enc.write_chars(text))
    }

    fn ignorable_whitespace(&mut self, text: &str) -> CodecResult<()> {
        self.record(EventTag::IgnorableWhitespace, |enc| enc.write_chars(text))
    }

    fn processing_instruction(&mut self, target: &str, data: &str) -> CodecResult<()> {
        self.record(EventTag::ProcessingInstruction, |enc| {
            enc.write_string(target)?;
            enc.write_string(data)
        })
    }

    fn skipped_entity(&mut self, name: &str) -> CodecResult<()> {
        self.record(EventTag::SkippedEntity, |enc| enc.write_string(name))
    }
}

impl LexicalHandler for Encoder {
    fn start_dtd(&mut self, name: &str, public_id: &str, system_id: &str) -> CodecResult<()> {
        self.record(EventTag::StartDtd, |enc| {
            enc.write_string(name)?;
            enc.write_string(public_id)?;
            enc.write_string(system_id)
        })
    }

    fn end_dtd(&mut self) -> CodecResult<()> {
        self.record(EventTag::EndDtd, |_| Ok(()))
    }

    fn start_entity(&mut self, name: &str) -> CodecResult<()> {
        self.record(EventTag::StartEntity, |enc| enc.write_string(name))
    }

    fn end_entity(&mut self, name: &str) -> CodecResult<()> {
        self.record(EventTag::EndEntity, |enc| enc.write_string(name))
    }

    fn start_cdata(&mut self) -> CodecResult<()> {
        self.record(EventTag::StartCdata, |_| Ok(()))
    }

    fn end_cdata(&mut self) -> CodecResult<()> {
        self.record(EventTag::EndCdata, |_| Ok(()))
    }

    fn comment(&mut self, text: &str) -> CodecResult<()> {
        self.record(EventTag::Comment, |enc| enc.write_chars(text))
    }
}

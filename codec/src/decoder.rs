//! Event stream decoder.

use bytestream::ByteReader;
use tracing::{debug, trace};
use wire::{utf8, DecodeError, EventTag, LengthField, LimitKind, Limits};

use crate::error::{CodecError, CodecResult};
use crate::event::{Attribute, Event, Locator};
use crate::handler::{ContentHandler, LexicalHandler, SplitHandler};
use crate::table::StringTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Records,
    Finished,
    Failed,
}

/// Counters collected while decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Records read, including elided empty text records.
    pub records: usize,
    /// String fields that carried a literal.
    pub literals: usize,
    /// String fields that carried a back-reference.
    pub back_references: usize,
}

/// Reads events from a cxml byte stream.
///
/// Events can be pulled one at a time with [`next_event`](Self::next_event)
/// or pushed into a handler with [`decode`](Self::decode). The header is
/// validated on the first read. Character-data events with no characters
/// are skipped.
///
/// Any error is terminal: later calls return [`CodecError::StreamFailed`]
/// until the decoder is [`reset`](Self::reset).
#[derive(Debug)]
pub struct Decoder<'a> {
    reader: ByteReader<'a>,
    table: StringTable,
    limits: Limits,
    state: State,
    stats: DecodeStats,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder over `bytes` with default limits.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_limits(bytes, Limits::default())
    }

    /// Creates a decoder over `bytes` with the given limits.
    #[must_use]
    pub fn with_limits(bytes: &'a [u8], limits: Limits) -> Self {
        Self {
            reader: ByteReader::new(bytes),
            table: StringTable::new(),
            limits,
            state: State::Header,
            stats: DecodeStats::default(),
        }
    }

    /// Returns the next event, or `None` after end of document.
    pub fn next_event(&mut self) -> CodecResult<Option<Event>> {
        loop {
            match self.next_record()? {
                Some(event) if event.is_empty_text() => {
                    trace!(tag = ?event.tag(), "eliding empty text record");
                }
                other => return Ok(other),
            }
        }
    }

    /// Returns the next record, including empty text records.
    ///
    /// Returns `None` after end of document.
    pub fn next_record(&mut self) -> CodecResult<Option<Event>> {
        match self.state {
            State::Finished => return Ok(None),
            State::Failed => return Err(CodecError::StreamFailed),
            State::Header | State::Records => {}
        }
        match self.step() {
            Ok(event) => Ok(event),
            Err(err) => {
                debug!(
                    offset = self.reader.position(),
                    error = %err,
                    "cxml stream decoding failed"
                );
                self.state = State::Failed;
                Err(err)
            }
        }
    }

    /// Drives `handler` with every event up to and including end of
    /// document.
    pub fn decode<H>(&mut self, handler: &mut H) -> CodecResult<()>
    where
        H: ContentHandler + LexicalHandler + ?Sized,
    {
        while let Some(event) = self.next_event()? {
            if let Err(err) = event.replay(handler) {
                self.state = State::Failed;
                return Err(err);
            }
        }
        Ok(())
    }

    /// Like [`decode`](Self::decode), with content and lexical events routed
    /// to separate handlers.
    pub fn decode_split<C, L>(&mut self, content: &mut C, lexical: &mut L) -> CodecResult<()>
    where
        C: ContentHandler + ?Sized,
        L: LexicalHandler + ?Sized,
    {
        self.decode(&mut SplitHandler::new(content, lexical))
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

    /// Returns the decoding counters.
    #[must_use]
    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    /// Returns the number of bytes consumed.
    #[must_use]
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Returns the bytes not consumed yet.
    ///
    /// After end of document these are whatever trailed the stream.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.reader.rest()
    }

    /// Returns `true` once end of document has been read.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Rebinds the decoder to a new stream, clearing all per-stream state.
    pub fn reset(&mut self, bytes: &'a [u8]) {
        debug!(
            records = self.stats.records,
            table_len = self.table.len(),
            "resetting cxml decoder"
        );
        self.reader = ByteReader::new(bytes);
        self.table.clear();
        self.state = State::Header;
        self.stats = DecodeStats::default();
    }

    fn step(&mut self) -> CodecResult<Option<Event>> {
        if self.state == State::Header {
            wire::decode_header(&mut self.reader)?;
            self.state = State::Records;
            debug!("cxml stream header accepted");
        }

        let offset = self.reader.position();
        let tag = EventTag::parse(self.reader.read_u8()?)?;
        trace!(?tag, offset, "decoding record");

        let event = self.read_body(tag)?;
        self.stats.records += 1;
        if tag.is_end_of_document() {
            self.state = State::Finished;
            debug!(
                records = self.stats.records,
                table_len = self.table.len(),
                trailing = self.reader.remaining(),
                "cxml stream finished"
            );
        }
        Ok(Some(event))
    }

    fn read_body(&mut self, tag: EventTag) -> CodecResult<Event> {
        let event = match tag {
            EventTag::StartDocument => Event::StartDocument,
            EventTag::EndDocument => Event::EndDocument,
            EventTag::StartPrefixMapping => Event::StartPrefixMapping {
                prefix: self.read_string()?,
                uri: self.read_string()?,
            },
            EventTag::EndPrefixMapping => Event::EndPrefixMapping {
                prefix: self.read_string()?,
            },
            EventTag::StartElement => self.read_start_element()?,
            EventTag::EndElement => Event::EndElement {
                uri: self.read_string()?,
                local_name: self.read_string()?,
                qname: self.read_string()?,
            },
            EventTag::Characters => Event::Characters {
                text: self.read_chars()?,
            },
            EventTag::IgnorableWhitespace => Event::IgnorableWhitespace {
                text: self.read_chars()?,
            },
            EventTag::ProcessingInstruction => Event::ProcessingInstruction {
                target: self.read_string()?,
                data: self.read_string()?,
            },
            EventTag::Comment => Event::Comment {
                text: self.read_chars()?,
            },
            EventTag::Locator => Event::Locator(Locator {
                public_id: self.read_string()?,
                system_id: self.read_string()?,
                line: u32::from(self.reader.read_u8()?),
                column: u32::from(self.reader.read_u8()?),
            }),
            EventTag::StartDtd => Event::StartDtd {
                name: self.read_string()?,
                public_id: self.read_string()?,
                system_id: self.read_string()?,
            },
            EventTag::EndDtd => Event::EndDtd,
            EventTag::StartCdata => Event::StartCdata,
            EventTag::EndCdata => Event::EndCdata,
            EventTag::SkippedEntity => Event::SkippedEntity {
                name: self.read_string()?,
            },
            EventTag::StartEntity => Event::StartEntity {
                name: self.read_string()?,
            },
            EventTag::EndEntity => Event::EndEntity {
                name: self.read_string()?,
            },
        };
        Ok(event)
    }

    fn read_start_element(&mut self) -> CodecResult<Event> {
        let count = usize::from(self.reader.read_u16()?);
        if count > self.limits.max_attributes {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::Attributes,
                limit: self.limits.max_attributes,
                actual: count,
            }
            .into());
        }

        // Capacity is bounded by the remaining input, five fields of at
        // least two bytes each per attribute.
        let mut attributes = Vec::with_capacity(count.min(self.reader.remaining() / 10));
        for _ in 0..count {
            attributes.push(Attribute {
                uri: self.read_string()?,
                local_name: self.read_string()?,
                qname: self.read_string()?,
                attr_type: self.read_string()?,
                value: self.read_string()?,
            });
        }
        Ok(Event::StartElement {
            uri: self.read_string()?,
            local_name: self.read_string()?,
            qname: self.read_string()?,
            attributes,
        })
    }

    fn read_string(&mut self) -> CodecResult<String> {
        match wire::read_string_field(&mut self.reader)? {
            LengthField::BackRef(index) => {
                self.stats.back_references += 1;
                let table_len = self.table.len();
                let value = usize::try_from(index)
                    .ok()
                    .and_then(|i| self.table.get(i))
                    .ok_or(CodecError::InvalidBackReference { index, table_len })?;
                Ok(value.to_string())
            }
            LengthField::Literal(len) => {
                self.stats.literals += 1;
                if self.table.len() >= self.limits.max_table_entries {
                    return Err(DecodeError::LimitsExceeded {
                        kind: LimitKind::TableEntries,
                        limit: self.limits.max_table_entries,
                        actual: self.table.len() + 1,
                    }
                    .into());
                }
                let value = self.read_literal(len)?;
                self.table.push(value.as_str().into());
                Ok(value)
            }
        }
    }

    fn read_chars(&mut self) -> CodecResult<String> {
        let len = wire::read_chars_len(&mut self.reader)?;
        self.read_literal(len)
    }

    fn read_literal(&mut self, len: u32) -> CodecResult<String> {
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        if len > self.limits.max_literal_bytes {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::LiteralBytes,
                limit: self.limits.max_literal_bytes,
                actual: len,
            }
            .into());
        }
        let start = self.reader.position();
        let bytes = self.reader.read_bytes(len)?;
        let text = utf8::decode(bytes).map_err(|err| match err {
            DecodeError::InvalidEncoding { offset, reason } => DecodeError::InvalidEncoding {
                offset: start + offset,
                reason,
            },
            other => other,
        })?;
        Ok(text)
    }
}

//! Introspection and debugging tools for the cxml codec.
//!
//! This crate provides utilities for inspecting and converting encoded streams:
//!
//! - Walk a stream record by record and report sizes
//! - Count literals versus back-references to show interning efficiency
//! - Convert between streams and a JSON event listing
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use std::fmt::Write as _;

use codec::{CodecResult, Decoder, Event, EventTag, Limits};

/// One record of an inspected stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordInfo {
    /// Offset of the tag byte from the start of the stream.
    pub offset: usize,
    pub tag: EventTag,
    /// Size of the record including its tag byte.
    pub byte_len: usize,
}

/// Record count and total size for one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSummary {
    pub tag: EventTag,
    pub count: usize,
    pub bytes: usize,
}

/// Structural summary of an encoded stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    /// Format version the stream was accepted as.
    pub version_major: u8,
    pub version_minor: u8,
    pub stream_len: usize,
    pub records: Vec<RecordInfo>,
    /// Records with no characters, which decoders skip.
    pub empty_text_records: usize,
    pub literals: usize,
    pub back_references: usize,
    pub table_len: usize,
    /// Bytes following end of document.
    pub trailing_bytes: usize,
}

impl InspectReport {
    /// Aggregates records per tag, in tag order. Tags that never occur are
    /// omitted.
    #[must_use]
    pub fn by_tag(&self) -> Vec<TagSummary> {
        EventTag::ALL
            .iter()
            .filter_map(|&tag| {
                let (count, bytes) = self
                    .records
                    .iter()
                    .filter(|record| record.tag == tag)
                    .fold((0, 0), |(count, bytes), record| {
                        (count + 1, bytes + record.byte_len)
                    });
                (count > 0).then_some(TagSummary { tag, count, bytes })
            })
            .collect()
    }

    /// Share of string fields that were back-references, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn back_reference_ratio(&self) -> f64 {
        let total = self.literals + self.back_references;
        if total == 0 {
            0.0
        } else {
            self.back_references as f64 / total as f64
        }
    }
}

/// Walks `bytes` record by record.
///
/// Fails with the decoding error if the stream is malformed.
pub fn inspect_stream(bytes: &[u8], limits: &Limits) -> CodecResult<InspectReport> {
    let mut decoder = Decoder::with_limits(bytes, limits.clone());
    let mut records = Vec::new();
    let mut empty_text_records = 0;

    loop {
        let start = decoder.position().max(wire::HEADER_SIZE);
        let Some(event) = decoder.next_record()? else {
            break;
        };
        if event.is_empty_text() {
            empty_text_records += 1;
        }
        records.push(RecordInfo {
            offset: start,
            tag: event.tag(),
            byte_len: decoder.position() - start,
        });
    }

    let stats = decoder.stats();
    Ok(InspectReport {
        version_major: wire::VERSION_MAJOR,
        version_minor: wire::VERSION_MINOR,
        stream_len: bytes.len(),
        records,
        empty_text_records,
        literals: stats.literals,
        back_references: stats.back_references,
        table_len: decoder.table_len(),
        trailing_bytes: decoder.remaining().len(),
    })
}

/// Serializes events as a pretty-printed JSON array.
pub fn events_to_json(events: &[Event]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(events)
}

/// Parses a JSON array of events.
pub fn events_from_json(json: &str) -> serde_json::Result<Vec<Event>> {
    serde_json::from_str(json)
}

/// Renders events as an indented outline, one event per line.
#[must_use]
pub fn format_events_pretty(events: &[Event]) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    for event in events {
        if matches!(event, Event::EndElement { .. }) {
            depth = depth.saturating_sub(1);
        }
        let indent = "  ".repeat(depth);
        let _ = writeln!(out, "{indent}{}", describe(event));
        if matches!(event, Event::StartElement { .. }) {
            depth += 1;
        }
    }
    out
}

fn describe(event: &Event) -> String {
    match event {
        Event::StartDocument => "start document".to_string(),
        Event::EndDocument => "end document".to_string(),
        Event::StartPrefixMapping { prefix, uri } => format!("xmlns:{prefix}={uri:?}"),
        Event::EndPrefixMapping { prefix } => format!("end xmlns:{prefix}"),
        Event::StartElement {
            uri,
            qname,
            attributes,
            ..
        } => {
            let mut line = format!("<{qname}>");
            if !uri.is_empty() {
                let _ = write!(line, " {{{uri}}}");
            }
            for attr in attributes {
                let _ = write!(line, " {}={:?}", attr.qname, attr.value);
            }
            line
        }
        Event::EndElement { qname, .. } => format!("</{qname}>"),
        Event::Characters { text } => format!("text {text:?}"),
        Event::IgnorableWhitespace { text } => format!("whitespace {text:?}"),
        Event::ProcessingInstruction { target, data } => format!("<?{target} {data}?>"),
        Event::Comment { text } => format!("<!--{text}-->"),
        Event::Locator(locator) => format!(
            "locator {}:{}:{}",
            locator.system_id, locator.line, locator.column
        ),
        Event::StartDtd { name, .. } => format!("start dtd {name}"),
        Event::EndDtd => "end dtd".to_string(),
        Event::StartEntity { name } => format!("start entity &{name};"),
        Event::EndEntity { name } => format!("end entity &{name};"),
        Event::SkippedEntity { name } => format!("skipped entity &{name};"),
        Event::StartCdata => "start cdata".to_string(),
        Event::EndCdata => "end cdata".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::{encode_events, Attribute, ErrorKind};

    fn document() -> Vec<Event> {
        vec![
            Event::StartDocument,
            Event::start_element("", "a", "a", vec![Attribute::cdata("id", "1")]),
            Event::characters(""),
            Event::characters("hi"),
            Event::end_element("", "a", "a"),
            Event::EndDocument,
        ]
    }

    #[test]
    fn inspect_reports_every_record() {
        let bytes = encode_events(&document()).unwrap();
        let report = inspect_stream(&bytes, &Limits::default()).unwrap();

        assert_eq!((report.version_major, report.version_minor), (1, 0));
        assert_eq!(report.records.len(), 6);
        assert_eq!(report.records[0].offset, wire::HEADER_SIZE);
        assert_eq!(report.records[0].byte_len, 1);
        assert_eq!(report.empty_text_records, 1);
        assert_eq!(report.trailing_bytes, 0);

        let total: usize = report.records.iter().map(|r| r.byte_len).sum();
        assert_eq!(total + wire::HEADER_SIZE, bytes.len());
        for pair in report.records.windows(2) {
            assert_eq!(pair[0].offset + pair[0].byte_len, pair[1].offset);
        }
    }

    #[test]
    fn inspect_counts_interning() {
        let bytes = encode_events(&document()).unwrap();
        let report = inspect_stream(&bytes, &Limits::default()).unwrap();
        // "", "a", "id", "CDATA", "1" are literals; the rest refer back.
        assert_eq!(report.literals, 5);
        assert_eq!(report.back_references, 6);
        assert_eq!(report.table_len, 5);
        assert!(report.back_reference_ratio() > 0.5);
    }

    #[test]
    fn inspect_groups_by_tag() {
        let bytes = encode_events(&document()).unwrap();
        let report = inspect_stream(&bytes, &Limits::default()).unwrap();
        let characters = report
            .by_tag()
            .into_iter()
            .find(|summary| summary.tag == EventTag::Characters)
            .unwrap();
        assert_eq!(characters.count, 2);
        assert_eq!(characters.bytes, 3 + 5);
    }

    #[test]
    fn inspect_fails_on_malformed_stream() {
        let err = inspect_stream(b"nope", &Limits::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Framing);
    }

    #[test]
    fn inspect_hardened_limits_reject_oversized_literal() {
        let events = vec![
            Event::characters("x".repeat(16 * 1024 * 1024 + 1)),
            Event::EndDocument,
        ];
        let bytes = encode_events(&events).unwrap();
        assert!(inspect_stream(&bytes, &Limits::default()).is_ok());
        let err = inspect_stream(&bytes, &Limits::hardened()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);
    }

    #[test]
    fn json_round_trip() {
        let events = document();
        let json = events_to_json(&events).unwrap();
        assert!(json.contains("\"kind\": \"start_element\""));
        assert_eq!(events_from_json(&json).unwrap(), events);
    }

    #[test]
    fn json_accepts_hand_written_events() {
        let json = r#"[
            {"kind": "start_document"},
            {"kind": "characters", "text": "x"},
            {"kind": "end_document"}
        ]"#;
        let events = events_from_json(json).unwrap();
        assert_eq!(
            events,
            vec![Event::StartDocument, Event::characters("x"), Event::EndDocument]
        );
    }

    #[test]
    fn pretty_output_indents_children() {
        let text = format_events_pretty(&document());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "<a> id=\"1\"");
        assert_eq!(lines[3], "  text \"hi\"");
        assert_eq!(lines[4], "</a>");
    }
}

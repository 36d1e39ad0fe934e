//! The XML event model.

use wire::EventTag;

/// One attribute of a start-element event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub uri: String,
    pub local_name: String,
    pub qname: String,
    /// Attribute type as reported by the parser, e.g. `CDATA` or `ID`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub attr_type: String,
    pub value: String,
}

impl Attribute {
    /// Creates an attribute.
    pub fn new(
        uri: impl Into<String>,
        local_name: impl Into<String>,
        qname: impl Into<String>,
        attr_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            local_name: local_name.into(),
            qname: qname.into(),
            attr_type: attr_type.into(),
            value: value.into(),
        }
    }

    /// Creates a namespace-less `CDATA` attribute.
    pub fn cdata(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self::new("", name.clone(), name, "CDATA", value)
    }
}

/// Document position reported by the producer.
///
/// Line and column travel as single bytes; values above 255 are encoded
/// as 255.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Locator {
    pub public_id: String,
    pub system_id: String,
    pub line: u32,
    pub column: u32,
}

/// A single event of an XML event stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Event {
    StartDocument,
    EndDocument,
    StartPrefixMapping {
        prefix: String,
        uri: String,
    },
    EndPrefixMapping {
        prefix: String,
    },
    StartElement {
        uri: String,
        local_name: String,
        qname: String,
        attributes: Vec<Attribute>,
    },
    EndElement {
        uri: String,
        local_name: String,
        qname: String,
    },
    Characters {
        text: String,
    },
    IgnorableWhitespace {
        text: String,
    },
    ProcessingInstruction {
        target: String,
        data: String,
    },
    Comment {
        text: String,
    },
    Locator(Locator),
    StartDtd {
        name: String,
        public_id: String,
        system_id: String,
    },
    EndDtd,
    StartEntity {
        name: String,
    },
    EndEntity {
        name: String,
    },
    SkippedEntity {
        name: String,
    },
    StartCdata,
    EndCdata,
}

impl Event {
    /// Creates a start-element event.
    pub fn start_element(
        uri: impl Into<String>,
        local_name: impl Into<String>,
        qname: impl Into<String>,
        attributes: Vec<Attribute>,
    ) -> Self {
        Self::StartElement {
            uri: uri.into(),
            local_name: local_name.into(),
            qname: qname.into(),
            attributes,
        }
    }

    /// Creates an end-element event.
    pub fn end_element(
        uri: impl Into<String>,
        local_name: impl Into<String>,
        qname: impl Into<String>,
    ) -> Self {
        Self::EndElement {
            uri: uri.into(),
            local_name: local_name.into(),
            qname: qname.into(),
        }
    }

    /// Creates a characters event.
    pub fn characters(text: impl Into<String>) -> Self {
        Self::Characters { text: text.into() }
    }

    /// Creates a comment event.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment { text: text.into() }
    }

    /// Returns the wire tag for this event.
    #[must_use]
    pub const fn tag(&self) -> EventTag {
        match self {
            Self::StartDocument => EventTag::StartDocument,
            Self::EndDocument => EventTag::EndDocument,
            Self::StartPrefixMapping { .. } => EventTag::StartPrefixMapping,
            Self::EndPrefixMapping { .. } => EventTag::EndPrefixMapping,
            Self::StartElement { .. } => EventTag::StartElement,
            Self::EndElement { .. } => EventTag::EndElement,
            Self::Characters { .. } => EventTag::Characters,
            Self::IgnorableWhitespace { .. } => EventTag::IgnorableWhitespace,
            Self::ProcessingInstruction { .. } => EventTag::ProcessingInstruction,
            Self::Comment { .. } => EventTag::Comment,
            Self::Locator(_) => EventTag::Locator,
            Self::StartDtd { .. } => EventTag::StartDtd,
            Self::EndDtd => EventTag::EndDtd,
            Self::StartEntity { .. } => EventTag::StartEntity,
            Self::EndEntity { .. } => EventTag::EndEntity,
            Self::SkippedEntity { .. } => EventTag::SkippedEntity,
            Self::StartCdata => EventTag::StartCdata,
            Self::EndCdata => EventTag::EndCdata,
        }
    }

    /// Returns `true` for comment, DTD, entity and CDATA events.
    #[must_use]
    pub const fn is_lexical(&self) -> bool {
        self.tag().is_lexical()
    }

    /// Returns `true` for character-data events with no characters.
    ///
    /// Such events are encoded but never delivered by the decoder.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        match self {
            Self::Characters { text }
            | Self::IgnorableWhitespace { text }
            | Self::Comment { text } => text.is_empty(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_variants() {
        assert_eq!(Event::StartDocument.tag(), EventTag::StartDocument);
        assert_eq!(
            Event::start_element("", "a", "a", vec![]).tag(),
            EventTag::StartElement
        );
        assert_eq!(
            Event::Locator(Locator::default()).tag(),
            EventTag::Locator
        );
        assert_eq!(Event::EndCdata.tag(), EventTag::EndCdata);
    }

    #[test]
    fn lexical_events() {
        assert!(Event::comment("x").is_lexical());
        assert!(Event::StartCdata.is_lexical());
        assert!(Event::EndEntity { name: "e".into() }.is_lexical());
        assert!(!Event::characters("x").is_lexical());
        assert!(!Event::SkippedEntity { name: "e".into() }.is_lexical());
    }

    #[test]
    fn empty_text_detection() {
        assert!(Event::characters("").is_empty_text());
        assert!(Event::comment("").is_empty_text());
        assert!(!Event::characters(" ").is_empty_text());
        assert!(!Event::EndDocument.is_empty_text());
    }

    #[test]
    fn cdata_attribute_shorthand() {
        let attr = Attribute::cdata("id", "x1");
        assert_eq!(attr, Attribute::new("", "id", "id", "CDATA", "x1"));
    }
}

//! Event record tags.

use crate::error::DecodeError;

/// Tag byte preceding every event record.
///
/// The discriminants are part of the wire format and must never be
/// renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventTag {
    StartDocument = 0,
    EndDocument = 1,
    StartPrefixMapping = 2,
    EndPrefixMapping = 3,
    StartElement = 4,
    EndElement = 5,
    Characters = 6,
    IgnorableWhitespace = 7,
    ProcessingInstruction = 8,
    Comment = 9,
    Locator = 10,
    StartDtd = 11,
    EndDtd = 12,
    StartCdata = 13,
    EndCdata = 14,
    SkippedEntity = 15,
    StartEntity = 16,
    EndEntity = 17,
}

impl EventTag {
    /// All tags in discriminant order.
    pub const ALL: [Self; 18] = [
        Self::StartDocument,
        Self::EndDocument,
        Self::StartPrefixMapping,
        Self::EndPrefixMapping,
        Self::StartElement,
        Self::EndElement,
        Self::Characters,
        Self::IgnorableWhitespace,
        Self::ProcessingInstruction,
        Self::Comment,
        Self::Locator,
        Self::StartDtd,
        Self::EndDtd,
        Self::StartCdata,
        Self::EndCdata,
        Self::SkippedEntity,
        Self::StartEntity,
        Self::EndEntity,
    ];

    /// Parses an event tag from a raw byte.
    pub fn parse(tag: u8) -> Result<Self, DecodeError> {
        Self::ALL
            .get(usize::from(tag))
            .copied()
            .ok_or(DecodeError::UnknownEventTag { tag })
    }

    /// Returns the raw tag byte.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Returns `true` for auxiliary lexical events (comments, DTD, entity
    /// and CDATA boundaries).
    #[must_use]
    pub const fn is_lexical(self) -> bool {
        matches!(
            self,
            Self::Comment
                | Self::StartDtd
                | Self::EndDtd
                | Self::StartCdata
                | Self::EndCdata
                | Self::StartEntity
                | Self::EndEntity
        )
    }

    /// Returns `true` for the tag that terminates a stream.
    #[must_use]
    pub const fn is_end_of_document(self) -> bool {
        matches!(self, Self::EndDocument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_discriminants() {
        for tag in EventTag::ALL {
            assert_eq!(EventTag::parse(tag.raw()).unwrap(), tag);
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(
            EventTag::parse(18),
            Err(DecodeError::UnknownEventTag { tag: 18 })
        );
        assert!(EventTag::parse(0xFF).is_err());
    }

    #[test]
    fn stable_discriminants() {
        assert_eq!(EventTag::StartDocument.raw(), 0);
        assert_eq!(EventTag::StartElement.raw(), 4);
        assert_eq!(EventTag::Comment.raw(), 9);
        assert_eq!(EventTag::EndEntity.raw(), 17);
    }

    #[test]
    fn lexical_classification() {
        assert!(EventTag::Comment.is_lexical());
        assert!(EventTag::StartCdata.is_lexical());
        assert!(!EventTag::Characters.is_lexical());
        assert!(!EventTag::SkippedEntity.is_lexical());
        assert!(EventTag::EndDocument.is_end_of_document());
    }
}

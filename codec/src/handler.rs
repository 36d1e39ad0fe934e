//! Consumer interfaces for decoded events.
//!
//! Structural events go to a [`ContentHandler`]; comments and DTD, entity
//! and CDATA boundaries go to a [`LexicalHandler`]. Every callback has a
//! no-op default so consumers implement only what they need.

use crate::error::CodecResult;
use crate::event::{Attribute, Event, Locator};

/// Receives document-structure events.
#[allow(unused_variables)]
pub trait ContentHandler {
    /// Receives the producer's document position.
    fn set_document_locator(&mut self, locator: &Locator) -> CodecResult<()> {
        Ok(())
    }

    /// Called once before any other document event.
    fn start_document(&mut self) -> CodecResult<()> {
        Ok(())
    }

    /// Called once after every other document event.
    fn end_document(&mut self) -> CodecResult<()> {
        Ok(())
    }

    /// Begins the scope of a namespace prefix.
    fn start_prefix_mapping(&mut self, prefix: &str, uri: &str) -> CodecResult<()> {
        Ok(())
    }

    /// Ends the scope of a namespace prefix.
    fn end_prefix_mapping(&mut self, prefix: &str) -> CodecResult<()> {
        Ok(())
    }

    /// Opens an element. Attributes arrive in document order.
    fn start_element(
        &mut self,
        uri: &str,
        local_name: &str,
        qname: &str,
        attributes: &[Attribute],
    ) -> CodecResult<()> {
        Ok(())
    }

    /// Closes the most recently opened element.
    fn end_element(&mut self, uri: &str, local_name: &str, qname: &str) -> CodecResult<()> {
        Ok(())
    }

    /// Receives a run of character data.
    fn characters(&mut self, text: &str) -> CodecResult<()> {
        Ok(())
    }

    /// Receives whitespace the DTD marks as insignificant.
    fn ignorable_whitespace(&mut self, text: &str) -> CodecResult<()> {
        Ok(())
    }

    /// Receives a processing instruction.
    fn processing_instruction(&mut self, target: &str, data: &str) -> CodecResult<()> {
        Ok(())
    }

    /// Reports an entity reference the producer did not expand.
    fn skipped_entity(&mut self, name: &str) -> CodecResult<()> {
        Ok(())
    }
}

/// Receives auxiliary lexical events.
#[allow(unused_variables)]
pub trait LexicalHandler {
    /// Begins the document type declaration.
    fn start_dtd(&mut self, name: &str, public_id: &str, system_id: &str) -> CodecResult<()> {
        Ok(())
    }

    /// Ends the document type declaration.
    fn end_dtd(&mut self) -> CodecResult<()> {
        Ok(())
    }

    /// Begins the expansion of a named entity.
    fn start_entity(&mut self, name: &str) -> CodecResult<()> {
        Ok(())
    }

    /// Ends the expansion of a named entity.
    fn end_entity(&mut self, name: &str) -> CodecResult<()> {
        Ok(())
    }

    /// Begins a CDATA section; its text arrives via `characters`.
    fn start_cdata(&mut self) -> CodecResult<()> {
        Ok(())
    }

    /// Ends a CDATA section.
    fn end_cdata(&mut self) -> CodecResult<()> {
        Ok(())
    }

    /// Receives the text of a comment.
    fn comment(&mut self, text: &str) -> CodecResult<()> {
        Ok(())
    }
}

impl Event {
    /// Delivers this event to the matching callback of `handler`.
    pub fn replay<H>(&self, handler: &mut H) -> CodecResult<()>
    where
        H: ContentHandler + LexicalHandler + ?Sized,
    {
        match self {
            Self::StartDocument => handler.start_document(),
            Self::EndDocument => handler.end_document(),
            Self::StartPrefixMapping { prefix, uri } => handler.start_prefix_mapping(prefix, uri),
            Self::EndPrefixMapping { prefix } => handler.end_prefix_mapping(prefix),
            Self::StartElement {
                uri,
                local_name,
                qname,
                attributes,
            } => handler.start_element(uri, local_name, qname, attributes),
            Self::EndElement {
                uri,
                local_name,
                qname,
            } => handler.end_element(uri, local_name, qname),
            Self::Characters { text } => handler.characters(text),
            Self::IgnorableWhitespace { text } => handler.ignorable_whitespace(text),
            Self::ProcessingInstruction { target, data } => {
                handler.processing_instruction(target, data)
            }
            Self::Comment { text } => handler.comment(text),
            Self::Locator(locator) => handler.set_document_locator(locator),
            Self::StartDtd {
                name,
                public_id,
                system_id,
            } => handler.start_dtd(name, public_id, system_id),
            Self::EndDtd => handler.end_dtd(),
            Self::StartEntity { name } => handler.start_entity(name),
            Self::EndEntity { name } => handler.end_entity(name),
            Self::SkippedEntity { name } => handler.skipped_entity(name),
            Self::StartCdata => handler.start_cdata(),
            Self::EndCdata => handler.end_cdata(),
        }
    }
}

/// Routes structural and lexical events to two separate consumers.
#[derive(Debug)]
pub struct SplitHandler<'a, C: ?Sized, L: ?Sized> {
    pub content: &'a mut C,
    pub lexical: &'a mut L,
}

impl<'a, C: ?Sized, L: ?Sized> SplitHandler<'a, C, L> {
    pub fn new(content: &'a mut C, lexical: &'a mut L) -> Self {
        Self { content, lexical }
    }
}

impl<C: ContentHandler + ?Sized, L: ?Sized> ContentHandler for SplitHandler<'_, C, L> {
    fn set_document_locator(&mut self, locator: &Locator) -> CodecResult<()> {
        self.content.set_document_locator(locator)
    }

    fn start_document(&mut self) -> CodecResult<()> {
        self.content.start_document()
    }

    fn end_document(&mut self) -> CodecResult<()> {
        self.content.end_document()
    }

    fn start_prefix_mapping(&mut self, prefix: &str, uri: &str) -> CodecResult<()> {
        self.content.start_prefix_mapping(prefix, uri)
    }

    fn end_prefix_mapping(&mut self, prefix: &str) -> CodecResult<()> {
        self.content.end_prefix_mapping(prefix)
    }

    fn start_element(
        &mut self,
        uri: &str,
        local_name: &str,
        qname: &str,
        attributes: &[Attribute],
    ) -> CodecResult<()> {
        self.content
            .start_element(uri, local_name, qname, attributes)
    }

    fn end_element(&mut self, uri: &str, local_name: &str, qname: &str) -> CodecResult<()> {
        self.content.end_element(uri, local_name, qname)
    }

    fn characters(&mut self, text: &str) -> CodecResult<()> {
        self.content.characters(text)
    }

    fn ignorable_whitespace(&mut self, text: &str) -> CodecResult<()> {
        self.content.ignorable_whitespace(text)
    }

    fn processing_instruction(&mut self, target: &str, data: &str) -> CodecResult<()> {
        self.content.processing_instruction(target, data)
    }

    fn skipped_entity(&mut self, name: &str) -> CodecResult<()> {
        self.content.skipped_entity(name)
    }
}

impl<C: ?Sized, L: LexicalHandler + ?Sized> LexicalHandler for SplitHandler<'_, C, L> {
    fn start_dtd(&mut self, name: &str, public_id: &str, system_id: &str) -> CodecResult<()> {
        self.lexical.start_dtd(name, public_id, system_id)
    }

    fn end_dtd(&mut self) -> CodecResult<()> {
        self.lexical.end_dtd()
    }

    fn start_entity(&mut self, name: &str) -> CodecResult<()> {
        self.lexical.start_entity(name)
    }

    fn end_entity(&mut self, name: &str) -> CodecResult<()> {
        self.lexical.end_entity(name)
    }

    fn start_cdata(&mut self) -> CodecResult<()> {
        self.lexical.start_cdata()
    }

    fn end_cdata(&mut self) -> CodecResult<()> {
        self.lexical.end_cdata()
    }

    fn comment(&mut self, text: &str) -> CodecResult<()> {
        self.lexical.comment(text)
    }
}

/// Lexical handler that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardLexical;

impl LexicalHandler for DiscardLexical {}

/// Collects every delivered event in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCollector {
    events: Vec<Event>,
}

impl EventCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected events.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the collector and returns the collected events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    fn push(&mut self, event: Event) -> CodecResult<()> {
        self.events.push(event);
        Ok(())
    }
}

impl ContentHandler for EventCollector {
    fn set_document_locator(&mut self, locator: &Locator) -> CodecResult<()> {
        self.push(Event::Locator(locator.clone()))
    }

    fn start_document(&mut self) -> CodecResult<()> {
        self.push(Event::StartDocument)
    }

    fn end_document(&mut self) -> CodecResult<()> {
        self.push(Event::EndDocument)
    }

    fn start_prefix_mapping(&mut self, prefix: &str, uri: &str) -> CodecResult<()> {
        self.push(Event::StartPrefixMapping {
            prefix: prefix.to_owned(),
            uri: uri.to_owned(),
        })
    }

    fn end_prefix_mapping(&mut self, prefix: &str) -> CodecResult<()> {
        self.push(Event::EndPrefixMapping {
            prefix: prefix.to_owned(),
        })
    }

    fn start_element(
        &mut self,
        uri: &str,
        local_name: &str,
        qname: &str,
        attributes: &[Attribute],
    ) -> CodecResult<()> {
        self.push(Event::start_element(
            uri,
            local_name,
            qname,
            attributes.to_vec(),
        ))
    }

    fn end_element(&mut self, uri: &str, local_name: &str, qname: &str) -> CodecResult<()> {
        self.push(Event::end_element(uri, local_name, qname))
    }

    fn characters(&mut self, text: &str) -> CodecResult<()> {
        self.push(Event::characters(text))
    }

    fn ignorable_whitespace(&mut self, text: &str) -> CodecResult<()> {
        self.push(Event::IgnorableWhitespace {
            text: text.to_owned(),
        })
    }

    fn processing_instruction(&mut self, target: &str, data: &str) -> CodecResult<()> {
        self.push(Event::ProcessingInstruction {
            target: target.to_owned(),
            data: data.to_owned(),
        })
    }

    fn skipped_entity(&mut self, name: &str) -> CodecResult<()> {
        self.push(Event::SkippedEntity {
            name: name.to_owned(),
        })
    }
}

impl LexicalHandler for EventCollector {
    fn start_dtd(&mut self, name: &str, public_id: &str, system_id: &str) -> CodecResult<()> {
        self.push(Event::StartDtd {
            name: name.to_owned(),
            public_id: public_id.to_owned(),
            system_id: system_id.to_owned(),
        })
    }

    fn end_dtd(&mut self) -> CodecResult<()> {
        self.push(Event::EndDtd)
    }

    fn start_entity(&mut self, name: &str) -> CodecResult<()> {
        self.push(Event::StartEntity {
            name: name.to_owned(),
        })
    }

    fn end_entity(&mut self, name: &str) -> CodecResult<()> {
        self.push(Event::EndEntity {
            name: name.to_owned(),
        })
    }

    fn start_cdata(&mut self) -> CodecResult<()> {
        self.push(Event::StartCdata)
    }

    fn end_cdata(&mut self) -> CodecResult<()> {
        self.push(Event::EndCdata)
    }

    fn comment(&mut self, text: &str) -> CodecResult<()> {
        self.push(Event::comment(text))
    }
}

use codec::{decode_events, encode_events, Attribute, Decoder, Encoder, Event, Limits, Locator};
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["", "a", "x:item", "urn:example", "CDATA"])
            .prop_map(String::from),
        "[a-z]{1,6}",
    ]
}

fn bmp_text(min: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('\u{0}', '\u{FFFF}'), min..24)
        .prop_map(|chars| chars.into_iter().collect())
}

fn attribute_strategy() -> impl Strategy<Value = Attribute> {
    (
        name_strategy(),
        name_strategy(),
        name_strategy(),
        name_strategy(),
        bmp_text(0),
    )
        .prop_map(|(uri, local_name, qname, attr_type, value)| Attribute {
            uri,
            local_name,
            qname,
            attr_type,
            value,
        })
}

fn content_event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::StartDocument),
        (name_strategy(), name_strategy())
            .prop_map(|(prefix, uri)| Event::StartPrefixMapping { prefix, uri }),
        name_strategy().prop_map(|prefix| Event::EndPrefixMapping { prefix }),
        (
            name_strategy(),
            name_strategy(),
            name_strategy(),
            prop::collection::vec(attribute_strategy(), 0..4),
        )
            .prop_map(|(uri, local_name, qname, attributes)| Event::StartElement {
                uri,
                local_name,
                qname,
                attributes,
            }),
        (name_strategy(), name_strategy(), name_strategy())
            .prop_map(|(uri, local_name, qname)| Event::end_element(uri, local_name, qname)),
        bmp_text(1).prop_map(|text| Event::Characters { text }),
        bmp_text(1).prop_map(|text| Event::IgnorableWhitespace { text }),
        (name_strategy(), bmp_text(0))
            .prop_map(|(target, data)| Event::ProcessingInstruction { target, data }),
        (name_strategy(), name_strategy(), 0u32..=255, 0u32..=255).prop_map(
            |(public_id, system_id, line, column)| Event::Locator(Locator {
                public_id,
                system_id,
                line,
                column,
            })
        ),
        name_strategy().prop_map(|name| Event::SkippedEntity { name }),
    ]
}

fn lexical_event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        bmp_text(1).prop_map(|text| Event::Comment { text }),
        (name_strategy(), name_strategy(), name_strategy()).prop_map(
            |(name, public_id, system_id)| Event::StartDtd {
                name,
                public_id,
                system_id,
            }
        ),
        Just(Event::EndDtd),
        name_strategy().prop_map(|name| Event::StartEntity { name }),
        name_strategy().prop_map(|name| Event::EndEntity { name }),
        Just(Event::StartCdata),
        Just(Event::EndCdata),
    ]
}

fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![3 => content_event_strategy(), 1 => lexical_event_strategy()]
}

fn document_strategy() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec(event_strategy(), 0..48).prop_map(|mut events| {
        events.push(Event::EndDocument);
        events
    })
}

proptest! {
    #[test]
    fn prop_round_trip(events in document_strategy()) {
        let bytes = encode_events(&events).unwrap();
        prop_assert_eq!(decode_events(&bytes).unwrap(), events);
    }

    #[test]
    fn prop_table_parity(events in document_strategy()) {
        let mut encoder = Encoder::new();
        let mut sizes = Vec::with_capacity(events.len());
        for event in &events {
            encoder.write_event(event).unwrap();
            sizes.push(encoder.table_len());
        }
        let bytes = encoder.finish();

        let mut decoder = Decoder::new(&bytes);
        for expected in sizes {
            prop_assert!(decoder.next_event().unwrap().is_some());
            prop_assert_eq!(decoder.table_len(), expected);
        }
        prop_assert!(decoder.is_finished());
    }

    #[test]
    fn prop_truncated_stream_never_decodes(events in document_strategy(), cut in any::<prop::sample::Index>()) {
        let bytes = encode_events(&events).unwrap();
        let cut = cut.index(bytes.len());
        prop_assert!(decode_events(&bytes[..cut]).is_err());
    }

    #[test]
    fn prop_decoder_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut decoder = Decoder::with_limits(&bytes, Limits::for_testing());
        while let Ok(Some(_)) = decoder.next_event() {}
    }

    #[test]
    fn prop_decoder_never_panics_after_header(body in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut bytes = wire::HEADER.to_vec();
        bytes.extend_from_slice(&body);
        let mut decoder = Decoder::with_limits(&bytes, Limits::for_testing());
        while let Ok(Some(_)) = decoder.next_event() {}
    }
}

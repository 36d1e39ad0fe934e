#![no_main]

use codec::{Decoder, Encoder, Limits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = Decoder::with_limits(data, Limits::for_testing());
    let mut events = Vec::new();
    loop {
        match decoder.next_event() {
            Ok(Some(event)) => events.push(event),
            Ok(None) => break,
            Err(_) => return,
        }
    }

    // Anything that decodes must survive a re-encode unchanged.
    let mut encoder = Encoder::new();
    encoder.encode_all(&events).expect("decoded events re-encode");
    let bytes = encoder.finish();
    let again = codec::decode_events(&bytes).expect("re-encoded stream decodes");
    assert_eq!(again, events);
});

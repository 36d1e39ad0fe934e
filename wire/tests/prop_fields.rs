use bytestream::{ByteReader, ByteWriter};
use proptest::prelude::*;
use wire::{
    read_chars_len, read_string_field, utf8, write_chars_len, write_string_field, LengthField,
    MAX_LONG_VALUE,
};

fn field_strategy() -> impl Strategy<Value = LengthField> {
    prop_oneof![
        (0u32..=MAX_LONG_VALUE).prop_map(LengthField::Literal),
        (0u32..=MAX_LONG_VALUE).prop_map(LengthField::BackRef),
        (0x7FF0u32..0x8010).prop_map(LengthField::Literal),
        (0x7FF0u32..0x8010).prop_map(LengthField::BackRef),
    ]
}

fn bmp_string() -> impl Strategy<Value = String> {
    prop::collection::vec(
        any::<char>().prop_filter("bmp only", |ch| u32::from(*ch) <= 0xFFFF),
        0..64,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_string_field_roundtrip(fields in prop::collection::vec(field_strategy(), 1..32)) {
        let mut writer = ByteWriter::new();
        for field in &fields {
            write_string_field(*field, &mut writer).unwrap();
        }
        let expected_len: usize = fields.iter().map(|field| field.encoded_len()).sum();
        prop_assert_eq!(writer.len(), expected_len);

        let bytes = writer.finish();
        let mut reader = ByteReader::new(&bytes);
        for field in &fields {
            prop_assert_eq!(read_string_field(&mut reader).unwrap(), *field);
        }
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_chars_len_roundtrip(len in 0usize..=(MAX_LONG_VALUE as usize)) {
        let mut writer = ByteWriter::new();
        write_chars_len(len, &mut writer).unwrap();
        let bytes = writer.finish();
        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(read_chars_len(&mut reader).unwrap() as usize, len);
    }

    #[test]
    fn prop_utf8_roundtrip(text in bmp_string()) {
        let mut writer = ByteWriter::new();
        utf8::encode_into(&text, &mut writer).unwrap();
        prop_assert_eq!(writer.len(), utf8::encoded_len(&text).unwrap());
        let decoded = utf8::decode(writer.as_slice()).unwrap();
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn prop_utf8_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = utf8::decode(&bytes);
    }
}

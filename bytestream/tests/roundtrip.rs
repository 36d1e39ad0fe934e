use bytestream::{ByteError, ByteReader, ByteWriter};

#[test]
fn writer_roundtrip_header_like_prefix() {
    let mut writer = ByteWriter::with_capacity(16);
    writer.write_bytes(b"CXML");
    writer.write_u8(1);
    writer.write_u8(0);
    writer.write_u16(0x8000);
    let bytes = writer.finish();

    let mut reader = ByteReader::new(&bytes);
    assert_eq!(reader.read_bytes(4).unwrap(), b"CXML");
    assert_eq!(reader.read_u8().unwrap(), 1);
    assert_eq!(reader.read_u8().unwrap(), 0);
    assert_eq!(reader.read_u16().unwrap(), 0x8000);
    assert!(reader.is_empty());
}

#[test]
fn truncated_u32_reports_available() {
    let mut reader = ByteReader::new(&[0x7F, 0xFF, 0x00]);
    assert_eq!(reader.read_u16().unwrap(), 0x7FFF);
    assert_eq!(
        reader.read_u32().unwrap_err(),
        ByteError::UnexpectedEof {
            requested: 4,
            available: 1
        }
    );
}

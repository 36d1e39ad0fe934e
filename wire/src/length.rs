//! Variable-width length/index field.
//!
//! Every string and character-array payload is preceded by this field. The
//! short form is a single big-endian `u16`; values that do not fit in 15
//! bits are escaped with [`ESCAPE`] followed by a big-endian `u32`.
//!
//! | Form | Literal length `L` | Back-reference index `I` |
//! |---|---|---|
//! | short | `L` | `I \| 0x8000` |
//! | long | `0x7FFF`, `L` | `0x7FFF`, `I \| 0x8000_0000` |
//!
//! Character arrays use the same layout but never carry a back-reference.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{DecodeError, EncodeError, WireResult};

/// Escape word announcing a 4-byte long form.
pub const ESCAPE: u16 = 0x7FFF;

/// Values strictly below this fit the short form.
pub const SHORT_LIMIT: u32 = 0x7FFF;

/// High bit of the short form marking a back-reference.
pub const SHORT_BACKREF_FLAG: u16 = 0x8000;

/// High bit of the long form marking a back-reference.
pub const LONG_BACKREF_FLAG: u32 = 0x8000_0000;

/// Largest value representable in the long form.
pub const MAX_LONG_VALUE: u32 = 0x7FFF_FFFF;

/// A decoded string field header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthField {
    /// A literal of the given encoded byte length follows.
    Literal(u32),
    /// Reference to an earlier string table entry.
    BackRef(u32),
}

impl LengthField {
    /// Builds a literal field from a byte length.
    pub fn literal(len: usize) -> Result<Self, EncodeError> {
        u32::try_from(len)
            .ok()
            .filter(|len| *len <= MAX_LONG_VALUE)
            .map(Self::Literal)
            .ok_or(EncodeError::LengthOverflow { length: len })
    }

    /// Builds a back-reference field from a table index.
    pub fn back_ref(index: usize) -> Result<Self, EncodeError> {
        u32::try_from(index)
            .ok()
            .filter(|index| *index <= MAX_LONG_VALUE)
            .map(Self::BackRef)
            .ok_or(EncodeError::IndexOverflow { index })
    }

    /// Number of bytes this field occupies on the wire.
    #[must_use]
    pub const fn encoded_len(self) -> usize {
        let value = match self {
            Self::Literal(v) | Self::BackRef(v) => v,
        };
        if value < SHORT_LIMIT {
            2
        } else {
            6
        }
    }
}

/// Writes a string field header.
pub fn write_string_field(field: LengthField, writer: &mut ByteWriter) -> Result<(), EncodeError> {
    match field {
        LengthField::Literal(len) => {
            if len > MAX_LONG_VALUE {
                return Err(EncodeError::LengthOverflow {
                    length: len as usize,
                });
            }
            write_value(len, 0, 0, writer);
        }
        LengthField::BackRef(index) => {
            if index > MAX_LONG_VALUE {
                return Err(EncodeError::IndexOverflow {
                    index: index as usize,
                });
            }
            write_value(index, SHORT_BACKREF_FLAG, LONG_BACKREF_FLAG, writer);
        }
    }
    Ok(())
}

/// Reads a string field header.
pub fn read_string_field(reader: &mut ByteReader<'_>) -> WireResult<LengthField> {
    let word = reader.read_u16()?;
    if word & SHORT_BACKREF_FLAG != 0 {
        return Ok(LengthField::BackRef(u32::from(word & !SHORT_BACKREF_FLAG)));
    }
    if word == ESCAPE {
        let value = reader.read_u32()?;
        if value & LONG_BACKREF_FLAG != 0 {
            return Ok(LengthField::BackRef(value & !LONG_BACKREF_FLAG));
        }
        return Ok(LengthField::Literal(value));
    }
    Ok(LengthField::Literal(u32::from(word)))
}

/// Writes a character-array length.
pub fn write_chars_len(len: usize, writer: &mut ByteWriter) -> Result<(), EncodeError> {
    let len = u32::try_from(len)
        .ok()
        .filter(|len| *len <= MAX_LONG_VALUE)
        .ok_or(EncodeError::LengthOverflow { length: len })?;
    write_value(len, 0, 0, writer);
    Ok(())
}

/// Reads a character-array length.
pub fn read_chars_len(reader: &mut ByteReader<'_>) -> WireResult<u32> {
    let word = reader.read_u16()?;
    if word & SHORT_BACKREF_FLAG != 0 {
        return Err(DecodeError::UnexpectedBackReference {
            raw: u32::from(word),
        });
    }
    if word == ESCAPE {
        let value = reader.read_u32()?;
        if value & LONG_BACKREF_FLAG != 0 {
            return Err(DecodeError::UnexpectedBackReference { raw: value });
        }
        return Ok(value);
    }
    Ok(u32::from(word))
}

fn write_value(value: u32, short_flag: u16, long_flag: u32, writer: &mut ByteWriter) {
    if value < SHORT_LIMIT {
        // Lossless: value < 0x7FFF.
        writer.write_u16(value as u16 | short_flag);
    } else {
        writer.write_u16(ESCAPE);
        writer.write_u32(value | long_flag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(field: LengthField) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        write_string_field(field, &mut writer).unwrap();
        writer.finish()
    }

    fn decode(bytes: &[u8]) -> LengthField {
        let mut reader = ByteReader::new(bytes);
        let field = read_string_field(&mut reader).unwrap();
        assert!(reader.is_empty());
        field
    }

    #[test]
    fn short_literal_layout() {
        assert_eq!(encode(LengthField::Literal(3)), vec![0x00, 0x03]);
        assert_eq!(encode(LengthField::Literal(0x7FFE)), vec![0x7F, 0xFE]);
    }

    #[test]
    fn long_literal_layout() {
        assert_eq!(
            encode(LengthField::Literal(0x7FFF)),
            vec![0x7F, 0xFF, 0x00, 0x00, 0x7F, 0xFF]
        );
        assert_eq!(
            encode(LengthField::Literal(0x1_0000)),
            vec![0x7F, 0xFF, 0x00, 0x01, 0x00, 0x00]
        );
    }

    #[test]
    fn short_back_ref_layout() {
        assert_eq!(encode(LengthField::BackRef(0)), vec![0x80, 0x00]);
        assert_eq!(encode(LengthField::BackRef(0x7FFE)), vec![0xFF, 0xFE]);
    }

    #[test]
    fn long_back_ref_layout() {
        assert_eq!(
            encode(LengthField::BackRef(0x7FFF)),
            vec![0x7F, 0xFF, 0x80, 0x00, 0x7F, 0xFF]
        );
    }

    #[test]
    fn index_zero_is_not_an_empty_literal() {
        assert_eq!(decode(&[0x80, 0x00]), LengthField::BackRef(0));
        assert_eq!(decode(&[0x00, 0x00]), LengthField::Literal(0));
    }

    #[test]
    fn boundary_values_decode() {
        for field in [
            LengthField::Literal(0x7FFE),
            LengthField::Literal(0x7FFF),
            LengthField::Literal(MAX_LONG_VALUE),
            LengthField::BackRef(0x7FFE),
            LengthField::BackRef(0x7FFF),
            LengthField::BackRef(MAX_LONG_VALUE),
        ] {
            let bytes = encode(field);
            assert_eq!(bytes.len(), field.encoded_len());
            assert_eq!(decode(&bytes), field);
        }
    }

    #[test]
    fn overflow_is_rejected() {
        let mut writer = ByteWriter::new();
        assert!(matches!(
            write_string_field(LengthField::Literal(0x8000_0000), &mut writer),
            Err(EncodeError::LengthOverflow { .. })
        ));
        assert!(matches!(
            write_string_field(LengthField::BackRef(u32::MAX), &mut writer),
            Err(EncodeError::IndexOverflow { .. })
        ));
        assert!(writer.is_empty());
        assert!(LengthField::back_ref(0x8000_0000).is_err());
        assert_eq!(LengthField::literal(5), Ok(LengthField::Literal(5)));
    }

    #[test]
    fn truncated_long_form() {
        let mut reader = ByteReader::new(&[0x7F, 0xFF, 0x00]);
        assert!(matches!(
            read_string_field(&mut reader),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn chars_len_roundtrip() {
        for len in [0usize, 1, 0x7FFE, 0x7FFF, 0x12_3456] {
            let mut writer = ByteWriter::new();
            write_chars_len(len, &mut writer).unwrap();
            let bytes = writer.finish();
            let mut reader = ByteReader::new(&bytes);
            assert_eq!(read_chars_len(&mut reader).unwrap() as usize, len);
        }
    }

    #[test]
    fn chars_len_rejects_back_reference() {
        let mut reader = ByteReader::new(&[0x80, 0x01]);
        assert!(matches!(
            read_chars_len(&mut reader),
            Err(DecodeError::UnexpectedBackReference { raw: 0x8001 })
        ));

        let mut reader = ByteReader::new(&[0x7F, 0xFF, 0x80, 0x00, 0x00, 0x00]);
        assert!(matches!(
            read_chars_len(&mut reader),
            Err(DecodeError::UnexpectedBackReference { .. })
        ));
    }
}

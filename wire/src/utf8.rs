//! Restricted UTF-8 used for literal payloads.
//!
//! Only 1, 2 and 3 byte sequences exist on the wire, so every character
//! lies in the Basic Multilingual Plane. For such text the encoding is
//! byte-identical to standard UTF-8, which lets the encoder copy `str`
//! bytes once the text has been checked. The decoder is hand-rolled because
//! it must accept exactly the restricted table (including overlong 2 and 3
//! byte forms such as `C0 80`) and reject 4-byte leads.

use bytestream::ByteWriter;

use crate::error::{DecodeError, EncodeError, EncodingReason, WireResult};

const MAX_BMP: u32 = 0xFFFF;

/// Returns the encoded byte length of `text`.
pub fn encoded_len(text: &str) -> Result<usize, EncodeError> {
    check_bmp(text)?;
    Ok(text.len())
}

/// Encodes `text` into `writer`.
///
/// Nothing is written if `text` contains a character above U+FFFF.
pub fn encode_into(text: &str, writer: &mut ByteWriter) -> Result<(), EncodeError> {
    check_bmp(text)?;
    writer.write_bytes(text.as_bytes());
    Ok(())
}

/// Decodes a literal payload.
///
/// The returned string holds exactly the characters encoded in `bytes`;
/// trailing NUL characters are preserved.
pub fn decode(bytes: &[u8]) -> WireResult<String> {
    if bytes.is_ascii() {
        return Ok(bytes.iter().copied().map(char::from).collect());
    }

    let mut out = String::with_capacity(bytes.len());
    let mut pos = 0;
    while pos < bytes.len() {
        let lead = bytes[pos];
        let (code, width) = match lead >> 4 {
            0x0..=0x7 => (u32::from(lead), 1),
            0xC | 0xD => {
                let b1 = continuation(bytes, pos, 1, 2)?;
                ((u32::from(lead & 0x1F) << 6) | b1, 2)
            }
            0xE => {
                let b1 = continuation(bytes, pos, 1, 3)?;
                let b2 = continuation(bytes, pos, 2, 3)?;
                ((u32::from(lead & 0x0F) << 12) | (b1 << 6) | b2, 3)
            }
            _ => {
                return Err(DecodeError::InvalidEncoding {
                    offset: pos,
                    reason: EncodingReason::InvalidLeadByte { byte: lead },
                })
            }
        };
        let ch = char::from_u32(code).ok_or(DecodeError::InvalidEncoding {
            offset: pos,
            reason: EncodingReason::Surrogate { code },
        })?;
        out.push(ch);
        pos += width;
    }
    Ok(out)
}

fn check_bmp(text: &str) -> Result<(), EncodeError> {
    if text.is_ascii() {
        return Ok(());
    }
    match text.chars().find(|ch| u32::from(*ch) > MAX_BMP) {
        Some(ch) => Err(EncodeError::UnsupportedCharacter { ch }),
        None => Ok(()),
    }
}

fn continuation(bytes: &[u8], start: usize, index: usize, width: usize) -> WireResult<u32> {
    let Some(&byte) = bytes.get(start + index) else {
        return Err(DecodeError::InvalidEncoding {
            offset: start,
            reason: EncodingReason::IncompleteSequence {
                needed: width,
                available: bytes.len() - start,
            },
        });
    };
    if byte & 0xC0 != 0x80 {
        return Err(DecodeError::InvalidEncoding {
            offset: start + index,
            reason: EncodingReason::InvalidContinuation { byte },
        });
    }
    Ok(u32::from(byte & 0x3F))
}

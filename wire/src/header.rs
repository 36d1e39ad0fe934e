//! Stream header constants and framing.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{DecodeError, WireResult};

/// Magic bytes identifying a cxml stream.
///
/// This value is fixed and must never change across versions.
pub const MAGIC: [u8; 4] = *b"CXML";

/// Major format version.
pub const VERSION_MAJOR: u8 = 1;

/// Minor format version.
pub const VERSION_MINOR: u8 = 0;

/// Header size in bytes: magic(4) + major(1) + minor(1).
pub const HEADER_SIZE: usize = MAGIC.len() + 2;

/// The complete header as it appears on the wire.
pub const HEADER: [u8; HEADER_SIZE] = [
    MAGIC[0],
    MAGIC[1],
    MAGIC[2],
    MAGIC[3],
    VERSION_MAJOR,
    VERSION_MINOR,
];

/// Writes the stream header.
pub fn encode_header(writer: &mut ByteWriter) {
    writer.write_bytes(&HEADER);
}

/// Reads and validates the stream header.
///
/// A magic mismatch is reported even when fewer than four bytes are present,
/// so input that is clearly not a cxml stream is never classified as merely
/// truncated.
pub fn decode_header(reader: &mut ByteReader<'_>) -> WireResult<()> {
    let present = reader.remaining().min(MAGIC.len());
    let prefix = &reader.rest()[..present];
    if prefix != &MAGIC[..present] {
        return Err(DecodeError::InvalidMagic {
            found: prefix.to_vec(),
        });
    }
    reader.read_bytes(MAGIC.len())?;

    let major = reader.read_u8()?;
    let minor = reader.read_u8()?;
    if major != VERSION_MAJOR || minor != VERSION_MINOR {
        return Err(DecodeError::UnsupportedVersion { major, minor });
    }
    Ok(())
}

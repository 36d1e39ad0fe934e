//! Error types for wire format operations.

use std::fmt;

use bytestream::ByteError;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Decode errors for stream framing and field encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The stream does not start with the `CXML` magic.
    InvalidMagic { found: Vec<u8> },

    /// The stream carries a format version other than 1.0.
    UnsupportedVersion { major: u8, minor: u8 },

    /// The input ended in the middle of a record or before end of document.
    Truncated { requested: usize, available: usize },

    /// Unknown event tag byte.
    UnknownEventTag { tag: u8 },

    /// A literal payload is not valid restricted UTF-8.
    InvalidEncoding { offset: usize, reason: EncodingReason },

    /// A character-array length field carried the back-reference flag.
    UnexpectedBackReference { raw: u32 },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    LiteralBytes,
    TableEntries,
    Attributes,
}

/// Why a literal payload failed restricted UTF-8 decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingReason {
    /// Leading byte is a continuation byte or a 4-byte lead.
    InvalidLeadByte { byte: u8 },
    /// Expected a `10xxxxxx` continuation byte.
    InvalidContinuation { byte: u8 },
    /// A multi-byte sequence runs past the end of the literal.
    IncompleteSequence { needed: usize, available: usize },
    /// A 3-byte sequence decoded to a UTF-16 surrogate.
    Surrogate { code: u32 },
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Character outside the Basic Multilingual Plane.
    UnsupportedCharacter { ch: char },
    /// Literal length does not fit in 31 bits.
    LengthOverflow { length: usize },
    /// Back-reference index does not fit in 31 bits.
    IndexOverflow { index: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMagic { found } => {
                write!(f, "invalid stream magic: {found:02X?}")
            }
            Self::UnsupportedVersion { major, minor } => {
                write!(f, "unsupported stream version: {major}.{minor}")
            }
            Self::Truncated {
                requested,
                available,
            } => {
                write!(
                    f,
                    "truncated stream: need {requested} bytes, have {available}"
                )
            }
            Self::UnknownEventTag { tag } => write!(f, "unknown event tag: {tag}"),
            Self::InvalidEncoding { offset, reason } => {
                write!(f, "invalid encoding at byte {offset}: {reason}")
            }
            Self::UnexpectedBackReference { raw } => {
                write!(
                    f,
                    "character data length 0x{raw:X} is flagged as a back-reference"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LiteralBytes => "literal bytes",
            Self::TableEntries => "string table entries",
            Self::Attributes => "attributes",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLeadByte { byte } => write!(f, "invalid lead byte 0x{byte:02X}"),
            Self::InvalidContinuation { byte } => {
                write!(f, "invalid continuation byte 0x{byte:02X}")
            }
            Self::IncompleteSequence { needed, available } => {
                write!(
                    f,
                    "incomplete sequence: need {needed} bytes, have {available}"
                )
            }
            Self::Surrogate { code } => write!(f, "surrogate code point U+{code:04X}"),
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedCharacter { ch } => {
                write!(
                    f,
                    "unsupported character U+{:04X} outside the basic multilingual plane",
                    u32::from(*ch)
                )
            }
            Self::LengthOverflow { length } => write!(f, "length overflow: {length}"),
            Self::IndexOverflow { index } => write!(f, "index overflow: {index}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}

impl From<ByteError> for DecodeError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::UnexpectedEof {
                requested,
                available,
            } => Self::Truncated {
                requested,
                available,
            },
        }
    }
}

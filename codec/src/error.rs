//! Error types for codec operations.

use std::fmt;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding an event stream.
///
/// Every error is fatal for the stream it occurred on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Wire format error while decoding.
    Wire(wire::DecodeError),

    /// Wire format error while encoding.
    Encode(wire::EncodeError),

    /// Back-reference to an index the string table does not hold yet.
    InvalidBackReference { index: u32, table_len: usize },

    /// Element carries more attributes than the 16-bit count can express.
    TooManyAttributes { count: usize },

    /// An event was written after end of document.
    StreamFinished,

    /// The decoder was used again after it reported an error.
    StreamFailed,

    /// A downstream handler rejected an event.
    Handler { message: String },
}

/// Classification of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad magic or version.
    Framing,
    /// Input exhausted mid-record or before end of document.
    TruncatedStream,
    /// Unrecognized record tag.
    UnknownEventTag,
    /// Back-reference beyond the current table size.
    InvalidBackReference,
    /// Malformed restricted UTF-8 or a malformed length field.
    InvalidEncoding,
    /// Character outside the representable range.
    UnsupportedCharacter,
    /// A configured decoding limit was exceeded.
    LimitExceeded,
    /// A length, index or count does not fit its wire field.
    Overflow,
    /// The codec was used in the wrong state.
    State,
    /// A handler returned an error.
    Handler,
}

impl CodecError {
    /// Creates a handler error with the given message.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler {
            message: message.into(),
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Wire(err) => match err {
                wire::DecodeError::InvalidMagic { .. }
                | wire::DecodeError::UnsupportedVersion { .. } => ErrorKind::Framing,
                wire::DecodeError::Truncated { .. } => ErrorKind::TruncatedStream,
                wire::DecodeError::UnknownEventTag { .. } => ErrorKind::UnknownEventTag,
                wire::DecodeError::LimitsExceeded { .. } => ErrorKind::LimitExceeded,
                _ => ErrorKind::InvalidEncoding,
            },
            Self::Encode(err) => match err {
                wire::EncodeError::UnsupportedCharacter { .. } => ErrorKind::UnsupportedCharacter,
                wire::EncodeError::LengthOverflow { .. }
                | wire::EncodeError::IndexOverflow { .. } => ErrorKind::Overflow,
            },
            Self::InvalidBackReference { .. } => ErrorKind::InvalidBackReference,
            Self::TooManyAttributes { .. } => ErrorKind::Overflow,
            Self::StreamFinished | Self::StreamFailed => ErrorKind::State,
            Self::Handler { .. } => ErrorKind::Handler,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::Encode(e) => write!(f, "encode error: {e}"),
            Self::InvalidBackReference { index, table_len } => {
                write!(
                    f,
                    "invalid back-reference {index}: string table holds {table_len} entries"
                )
            }
            Self::TooManyAttributes { count } => {
                write!(f, "too many attributes: {count} > {}", u16::MAX)
            }
            Self::StreamFinished => write!(f, "event written after end of document"),
            Self::StreamFailed => write!(f, "stream already failed"),
            Self::Handler { message } => write!(f, "handler error: {message}"),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Framing => "framing",
            Self::TruncatedStream => "truncated stream",
            Self::UnknownEventTag => "unknown event tag",
            Self::InvalidBackReference => "invalid back-reference",
            Self::InvalidEncoding => "invalid encoding",
            Self::UnsupportedCharacter => "unsupported character",
            Self::LimitExceeded => "limit exceeded",
            Self::Overflow => "overflow",
            Self::State => "state",
            Self::Handler => "handler",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        Self::Encode(err)
    }
}

impl From<bytestream::ByteError> for CodecError {
    fn from(err: bytestream::ByteError) -> Self {
        Self::Wire(err.into())
    }
}

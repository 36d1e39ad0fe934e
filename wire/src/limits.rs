//! Configurable limits for bounded decoding.

use crate::length::MAX_LONG_VALUE;

/// Largest literal length or table index the length field can carry.
const WIRE_MAX: usize = MAX_LONG_VALUE as usize;

/// Limits enforced while decoding a stream.
///
/// The default accepts everything the wire format can express, so any
/// stream an encoder produces decodes. Use [`Limits::hardened`] to cap
/// resource use on untrusted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum encoded byte length of a single string or character literal.
    pub max_literal_bytes: usize,

    /// Maximum number of entries in the string table.
    pub max_table_entries: usize,

    /// Maximum number of attributes on a single element.
    pub max_attributes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_literal_bytes: WIRE_MAX,
            // Indices run from 0 to `MAX_LONG_VALUE` inclusive.
            max_table_entries: WIRE_MAX + 1,
            // The attribute count is a 16-bit word on the wire.
            max_attributes: usize::from(u16::MAX),
        }
    }
}

impl Limits {
    /// Creates limits for untrusted input.
    ///
    /// Streams with larger literals or tables are valid but rejected.
    #[must_use]
    pub const fn hardened() -> Self {
        Self {
            max_literal_bytes: 16 * 1024 * 1024,
            max_table_entries: 1 << 20,
            max_attributes: 4096,
        }
    }

    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_literal_bytes: 4096,
            max_table_entries: 256,
            max_attributes: 16,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_literal_bytes: usize::MAX,
            max_table_entries: usize::MAX,
            max_attributes: usize::MAX,
        }
    }
}

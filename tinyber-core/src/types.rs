//! Tag definitions and width helpers for BER encoding.
//!
//! This module provides the single-octet [`Tag`] used by every TLV unit,
//! the universal tag constants referenced by generated code, and the
//! helpers that compute how many octets an INTEGER body or a length
//! prefix occupies.

use std::fmt;

/// Class bits of a context-specific tag.
const CONTEXT_CLASS: u8 = 0x80;
/// Constructed-form bit.
const CONSTRUCTED: u8 = 0x20;
/// Mask of the tag-number bits in the low-tag-number form.
const NUMBER_MASK: u8 = 0x1f;

/// Largest tag number expressible in a single identifier octet.
pub const MAX_LOW_TAG_NUMBER: u8 = 30;

/// A single-octet BER identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(u8);

impl Tag {
    /// Universal BOOLEAN.
    pub const BOOLEAN: Self = Self(0x01);
    /// Universal INTEGER.
    pub const INTEGER: Self = Self(0x02);
    /// Universal OCTET STRING (primitive form).
    pub const OCTET_STRING: Self = Self(0x04);
    /// Universal ENUMERATED.
    pub const ENUMERATED: Self = Self(0x0a);
    /// Universal SEQUENCE / SEQUENCE OF (constructed).
    pub const SEQUENCE: Self = Self(0x30);

    /// Creates a tag from its raw identifier octet.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier octet.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Creates an explicit context-specific constructed tag `[number]`.
    ///
    /// Numbers above [`MAX_LOW_TAG_NUMBER`] are masked; the schema layer
    /// rejects them before any code is generated.
    #[must_use]
    pub const fn context(number: u8) -> Self {
        Self(CONTEXT_CLASS | CONSTRUCTED | (number & NUMBER_MASK))
    }

    /// Returns the tag number if this is a context-specific constructed tag.
    #[must_use]
    pub const fn context_number(self) -> Option<u8> {
        if self.0 & !NUMBER_MASK == CONTEXT_CLASS | CONSTRUCTED {
            Some(self.0 & NUMBER_MASK)
        } else {
            None
        }
    }

    /// Returns true if the constructed bit is set.
    #[must_use]
    pub const fn is_constructed(self) -> bool {
        self.0 & CONSTRUCTED != 0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.context_number() {
            Some(number) => write!(f, "[{}]", number),
            None => write!(f, "0x{:02x}", self.0),
        }
    }
}

/// Returns the number of octets in the minimal two's complement encoding
/// of `value`.
#[must_use]
pub const fn integer_width(value: i64) -> usize {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < 7 {
        let lead = bytes[start];
        let next_negative = bytes[start + 1] & 0x80 != 0;
        if (lead == 0x00 && !next_negative) || (lead == 0xff && next_negative) {
            start += 1;
        } else {
            break;
        }
    }
    8 - start
}

/// Returns the number of octets a definite-form length prefix occupies.
#[must_use]
pub const fn length_width(len: usize) -> usize {
    if len < 0x80 {
        1
    } else {
        let significant = (usize::BITS - len.leading_zeros()) as usize;
        1 + significant.div_ceil(8)
    }
}

/// Returns the identifier plus length overhead of a TLV unit whose content
/// is at most `content` octets.
#[must_use]
pub const fn tlv_overhead(content: usize) -> usize {
    1 + length_width(content)
}

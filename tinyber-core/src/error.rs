//! Error types for TinyBER runtime operations.

use crate::types::Tag;
use thiserror::Error;

/// Error raised while decoding a TLV stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input ended before the current unit was complete.
    #[error("truncated input: required {required} bytes, available {available} bytes")]
    Truncated {
        /// Required size in bytes.
        required: usize,
        /// Available size in bytes.
        available: usize,
    },

    /// The identifier octet does not match the expected tag.
    #[error("unexpected tag: expected {expected}, actual {actual}")]
    UnexpectedTag {
        /// Expected tag.
        expected: Tag,
        /// Tag found in the input.
        actual: Tag,
    },

    /// No CHOICE alternative is registered for the tag found in the input.
    #[error("no choice alternative for tag {tag}")]
    UnknownAlternative {
        /// Tag found in the input.
        tag: Tag,
    },

    /// ENUMERATED value has no label.
    #[error("unknown enumerated value {value}")]
    UnknownEnumerated {
        /// Decoded value.
        value: i64,
    },

    /// INTEGER outside its declared range.
    #[error("integer {value} outside [{min}, {max}]")]
    IntegerOutOfRange {
        /// Decoded value.
        value: i64,
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },

    /// OCTET STRING length outside its declared size range.
    #[error("octet string of {len} bytes outside [{min}, {max}]")]
    LengthOutOfRange {
        /// Decoded length.
        len: usize,
        /// Lower bound.
        min: usize,
        /// Upper bound.
        max: usize,
    },

    /// SEQUENCE OF element count outside its declared size range.
    #[error("{count} elements outside [{min}, {max}]")]
    CountOutOfRange {
        /// Decoded element count.
        count: usize,
        /// Lower bound.
        min: usize,
        /// Upper bound.
        max: usize,
    },

    /// Length prefix uses the indefinite form or is wider than supported.
    #[error("invalid length prefix 0x{prefix:02x}")]
    InvalidLength {
        /// First octet of the length prefix.
        prefix: u8,
    },

    /// INTEGER or ENUMERATED body is empty or wider than 64 bits.
    #[error("invalid integer body of {len} bytes")]
    InvalidInteger {
        /// Body length.
        len: usize,
    },

    /// BOOLEAN body is not exactly one octet.
    #[error("invalid boolean body of {len} bytes")]
    InvalidBoolean {
        /// Body length.
        len: usize,
    },

    /// Bytes remain after a complete value.
    #[error("{remaining} trailing bytes after value")]
    TrailingBytes {
        /// Unconsumed byte count.
        remaining: usize,
    },
}

/// Error raised while encoding into an [`Encoder`](crate::encoder::Encoder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The output buffer has no room for the next write.
    #[error("buffer overflow: required {required} bytes, available {available} bytes")]
    Overflow {
        /// Bytes the write needed.
        required: usize,
        /// Bytes left in the buffer.
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display_truncated() {
        let err = DecodeError::Truncated {
            required: 10,
            available: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("truncated"));
        assert!(msg.contains("10"));
        assert!(msg.contains("4"));
    }

    #[test]
    fn test_decode_error_display_unexpected_tag() {
        let err = DecodeError::UnexpectedTag {
            expected: Tag::SEQUENCE,
            actual: Tag::INTEGER,
        };
        let msg = err.to_string();
        assert!(msg.contains("0x30"));
        assert!(msg.contains("0x02"));
    }

    #[test]
    fn test_decode_error_display_count() {
        let err = DecodeError::CountOutOfRange {
            count: 5,
            min: 1,
            max: 4,
        };
        assert_eq!(err.to_string(), "5 elements outside [1, 4]");
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::Overflow {
            required: 3,
            available: 1,
        };
        assert!(err.to_string().contains("buffer overflow"));
    }

    #[test]
    fn test_decode_error_equality() {
        let a = DecodeError::UnknownEnumerated { value: 7 };
        let b = DecodeError::UnknownEnumerated { value: 7 };
        assert_eq!(a, b.clone());
        assert_ne!(a, DecodeError::UnknownEnumerated { value: 8 });
    }
}

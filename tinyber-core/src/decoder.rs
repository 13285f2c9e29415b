//! TLV cursor for decoding BER input.
//!
//! A [`Decoder`] borrows its input and walks it one TLV unit at a time.
//! Opening a constructed unit with [`Decoder::next`] yields a child cursor
//! over that unit's content and advances the parent past the whole unit,
//! so generated code can rebind its cursor and descend without copying.

use crate::error::DecodeError;
use crate::types::Tag;

/// Widest definite-form length prefix accepted, in octets after the first.
const MAX_LENGTH_OCTETS: usize = 4;
/// Widest INTEGER body accepted.
const MAX_INTEGER_OCTETS: usize = 8;

/// Cursor over BER-encoded input.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Wraps a buffer for decoding.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current read position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of unconsumed bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true when every byte of this unit has been consumed.
    #[must_use]
    pub const fn done(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Fails unless every byte has been consumed.
    ///
    /// # Errors
    /// Returns [`DecodeError::TrailingBytes`] if input remains.
    pub fn finish(&self) -> Result<(), DecodeError> {
        if self.done() {
            Ok(())
        } else {
            Err(DecodeError::TrailingBytes {
                remaining: self.remaining(),
            })
        }
    }

    /// Returns the tag of the next unit without consuming it.
    ///
    /// # Errors
    /// Returns [`DecodeError::Truncated`] at end of input.
    pub fn peek_tag(&self) -> Result<Tag, DecodeError> {
        self.data
            .get(self.pos)
            .map(|&raw| Tag::from_raw(raw))
            .ok_or(DecodeError::Truncated {
                required: 1,
                available: 0,
            })
    }

    /// Consumes a unit tagged `expected` and returns a cursor over its content.
    ///
    /// # Errors
    /// Returns an error if the tag differs, the length prefix is invalid, or
    /// the content runs past the end of this unit.
    pub fn next(&mut self, expected: Tag) -> Result<Decoder<'a>, DecodeError> {
        self.next_content(expected).map(Decoder::new)
    }

    /// Reads an INTEGER and checks it against `[min, max]`.
    ///
    /// # Errors
    /// Returns [`DecodeError::IntegerOutOfRange`] on a bound violation, or
    /// any framing error from the underlying unit.
    pub fn next_integer(&mut self, min: i64, max: i64) -> Result<i64, DecodeError> {
        let content = self.next_content(Tag::INTEGER)?;
        let value = read_signed(content)?;
        if value < min || value > max {
            return Err(DecodeError::IntegerOutOfRange { value, min, max });
        }
        Ok(value)
    }

    /// Reads an OCTET STRING whose length must fall within `[min, max]`.
    ///
    /// # Errors
    /// Returns [`DecodeError::LengthOutOfRange`] on a size violation, or any
    /// framing error from the underlying unit.
    pub fn next_octet_string(&mut self, min: usize, max: usize) -> Result<Vec<u8>, DecodeError> {
        let content = self.next_content(Tag::OCTET_STRING)?;
        if content.len() < min || content.len() > max {
            return Err(DecodeError::LengthOutOfRange {
                len: content.len(),
                min,
                max,
            });
        }
        Ok(content.to_vec())
    }

    /// Reads a BOOLEAN. Any non-zero octet decodes as `true`.
    ///
    /// # Errors
    /// Returns [`DecodeError::InvalidBoolean`] unless the body is one octet.
    pub fn next_boolean(&mut self) -> Result<bool, DecodeError> {
        match self.next_content(Tag::BOOLEAN)? {
            [octet] => Ok(*octet != 0),
            other => Err(DecodeError::InvalidBoolean { len: other.len() }),
        }
    }

    /// Reads the raw value of an ENUMERATED.
    ///
    /// # Errors
    /// Returns any framing or integer-body error.
    pub fn next_enumerated(&mut self) -> Result<i64, DecodeError> {
        let content = self.next_content(Tag::ENUMERATED)?;
        read_signed(content)
    }

    fn next_content(&mut self, expected: Tag) -> Result<&'a [u8], DecodeError> {
        let actual = self.peek_tag()?;
        if actual != expected {
            return Err(DecodeError::UnexpectedTag { expected, actual });
        }
        self.pos += 1;
        let len = self.read_length()?;
        let start = self.pos;
        if len > self.remaining() {
            return Err(DecodeError::Truncated {
                required: len,
                available: self.remaining(),
            });
        }
        self.pos += len;
        Ok(&self.data[start..self.pos])
    }

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.data.get(self.pos).ok_or(DecodeError::Truncated {
            required: 1,
            available: 0,
        })?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_length(&mut self) -> Result<usize, DecodeError> {
        let prefix = self.read_byte()?;
        if prefix < 0x80 {
            return Ok(usize::from(prefix));
        }
        let octets = usize::from(prefix & 0x7f);
        if octets == 0 || octets > MAX_LENGTH_OCTETS {
            return Err(DecodeError::InvalidLength { prefix });
        }
        let mut len = 0usize;
        for _ in 0..octets {
            len = (len << 8) | usize::from(self.read_byte()?);
        }
        Ok(len)
    }
}

/// Decodes a big-endian two's complement body.
fn read_signed(content: &[u8]) -> Result<i64, DecodeError> {
    if content.is_empty() || content.len() > MAX_INTEGER_OCTETS {
        return Err(DecodeError::InvalidInteger { len: content.len() });
    }
    let mut value: i64 = if content[0] & 0x80 != 0 { -1 } else { 0 };
    for &octet in content {
        value = (value << 8) | i64::from(octet);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_integer() {
        let data = [0x02, 0x01, 0x09];
        let mut src = Decoder::new(&data);
        assert_eq!(src.next_integer(0, 255).unwrap(), 9);
        assert!(src.done());
    }

    #[test]
    fn test_next_integer_negative() {
        let data = [0x02, 0x02, 0xff, 0x7f];
        let mut src = Decoder::new(&data);
        assert_eq!(src.next_integer(i64::MIN, i64::MAX).unwrap(), -129);
    }

    #[test]
    fn test_next_integer_out_of_range() {
        let data = [0x02, 0x02, 0x01, 0x00];
        let mut src = Decoder::new(&data);
        let result = src.next_integer(0, 255);
        assert!(matches!(
            result,
            Err(DecodeError::IntegerOutOfRange { value: 256, .. })
        ));
    }

    #[test]
    fn test_next_integer_empty_body() {
        let data = [0x02, 0x00];
        let mut src = Decoder::new(&data);
        assert_eq!(
            src.next_integer(0, 1),
            Err(DecodeError::InvalidInteger { len: 0 })
        );
    }

    #[test]
    fn test_unexpected_tag() {
        let data = [0x01, 0x01, 0xff];
        let mut src = Decoder::new(&data);
        let result = src.next_integer(0, 1);
        assert_eq!(
            result,
            Err(DecodeError::UnexpectedTag {
                expected: Tag::INTEGER,
                actual: Tag::BOOLEAN,
            })
        );
    }

    #[test]
    fn test_next_octet_string_bounds() {
        let data = [0x04, 0x03, b'a', b'b', b'c'];
        let mut src = Decoder::new(&data);
        assert_eq!(src.next_octet_string(1, 3).unwrap(), b"abc".to_vec());

        let mut src = Decoder::new(&data);
        assert!(matches!(
            src.next_octet_string(0, 2),
            Err(DecodeError::LengthOutOfRange { len: 3, .. })
        ));
    }

    #[test]
    fn test_next_boolean() {
        let data = [0x01, 0x01, 0xff, 0x01, 0x01, 0x00];
        let mut src = Decoder::new(&data);
        assert!(src.next_boolean().unwrap());
        assert!(!src.next_boolean().unwrap());
        assert!(src.done());
    }

    #[test]
    fn test_next_boolean_wrong_width() {
        let data = [0x01, 0x02, 0x00, 0x00];
        let mut src = Decoder::new(&data);
        assert_eq!(
            src.next_boolean(),
            Err(DecodeError::InvalidBoolean { len: 2 })
        );
    }

    #[test]
    fn test_next_opens_child_cursor() {
        let data = [0x30, 0x03, 0x02, 0x01, 0x05, 0x01, 0x01, 0x00];
        let mut src = Decoder::new(&data);
        let mut inner = src.next(Tag::SEQUENCE).unwrap();
        assert_eq!(src.position(), 5);
        assert_eq!(inner.next_integer(0, 10).unwrap(), 5);
        assert!(inner.done());
        assert!(!src.next_boolean().unwrap());
    }

    #[test]
    fn test_long_form_length() {
        let mut data = vec![0x04, 0x81, 0x80];
        data.extend(std::iter::repeat_n(0x11, 128));
        let mut src = Decoder::new(&data);
        assert_eq!(src.next_octet_string(0, 200).unwrap().len(), 128);
    }

    #[test]
    fn test_indefinite_length_rejected() {
        let data = [0x30, 0x80, 0x00, 0x00];
        let mut src = Decoder::new(&data);
        assert!(matches!(
            src.next(Tag::SEQUENCE),
            Err(DecodeError::InvalidLength { prefix: 0x80 })
        ));
    }

    #[test]
    fn test_truncated_content() {
        let data = [0x04, 0x05, b'a'];
        let mut src = Decoder::new(&data);
        assert_eq!(
            src.next_octet_string(0, 10),
            Err(DecodeError::Truncated {
                required: 5,
                available: 1,
            })
        );
    }

    #[test]
    fn test_peek_tag_at_end() {
        let src = Decoder::new(&[]);
        assert!(src.done());
        assert!(matches!(src.peek_tag(), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn test_finish_trailing_bytes() {
        let data = [0x01, 0x01, 0x00, 0xaa];
        let mut src = Decoder::new(&data);
        src.next_boolean().unwrap();
        assert_eq!(
            src.finish(),
            Err(DecodeError::TrailingBytes { remaining: 1 })
        );
    }

    #[test]
    fn test_next_enumerated() {
        let data = [0x0a, 0x01, 0x02];
        let mut src = Decoder::new(&data);
        assert_eq!(src.next_enumerated().unwrap(), 2);
    }
}

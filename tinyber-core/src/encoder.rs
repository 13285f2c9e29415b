//! Back-to-front TLV writer.
//!
//! A TLV length prefix is only known once its content has been written, so
//! [`Encoder`] fills a fixed buffer from the end towards the start. Content
//! is written last-item-first and [`Encoder::tlv`] prepends the length and
//! tag once the closure returns. Generated encoders therefore emit the
//! fields of a SEQUENCE, and the elements of a SEQUENCE OF, in reverse.

use crate::error::EncodeError;
use crate::types::{Tag, integer_width};

/// Fixed-capacity output buffer written from the end.
#[derive(Debug, Clone)]
pub struct Encoder {
    buffer: Vec<u8>,
    pos: usize,
}

impl Encoder {
    /// Creates an encoder able to hold `capacity` bytes.
    ///
    /// Generated types expose a `MAX_SIZE` bound suitable as the capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity],
            pos: capacity,
        }
    }

    /// Returns the total capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len() - self.pos
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the remaining room in bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.pos
    }

    /// Returns the bytes written so far, in wire order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[self.pos..]
    }

    /// Consumes the encoder and returns the encoded bytes.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.buffer.split_off(self.pos)
    }

    /// Prepends raw bytes.
    ///
    /// # Errors
    /// Returns [`EncodeError::Overflow`] if the buffer has no room.
    pub fn prepend(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        if bytes.len() > self.pos {
            return Err(EncodeError::Overflow {
                required: bytes.len(),
                available: self.pos,
            });
        }
        let start = self.pos - bytes.len();
        self.buffer[start..self.pos].copy_from_slice(bytes);
        self.pos = start;
        Ok(())
    }

    /// Wraps everything `content` writes in a unit tagged `tag`.
    ///
    /// # Errors
    /// Propagates the closure's error, or [`EncodeError::Overflow`] when the
    /// header does not fit.
    pub fn tlv<F>(&mut self, tag: Tag, content: F) -> Result<(), EncodeError>
    where
        F: FnOnce(&mut Self) -> Result<(), EncodeError>,
    {
        let before = self.len();
        content(self)?;
        let written = self.len() - before;
        self.prepend_header(tag, written)
    }

    /// Writes an INTEGER in its minimal two's complement form.
    ///
    /// # Errors
    /// Returns [`EncodeError::Overflow`] if the unit does not fit.
    pub fn emit_integer(&mut self, value: i64) -> Result<(), EncodeError> {
        self.emit_signed(Tag::INTEGER, value)
    }

    /// Writes an OCTET STRING.
    ///
    /// # Errors
    /// Returns [`EncodeError::Overflow`] if the unit does not fit.
    pub fn emit_octet_string(&mut self, value: &[u8]) -> Result<(), EncodeError> {
        self.prepend(value)?;
        self.prepend_header(Tag::OCTET_STRING, value.len())
    }

    /// Writes a BOOLEAN as `0xff` or `0x00`.
    ///
    /// # Errors
    /// Returns [`EncodeError::Overflow`] if the unit does not fit.
    pub fn emit_boolean(&mut self, value: bool) -> Result<(), EncodeError> {
        self.prepend(&[if value { 0xff } else { 0x00 }])?;
        self.prepend_header(Tag::BOOLEAN, 1)
    }

    /// Writes an ENUMERATED value.
    ///
    /// # Errors
    /// Returns [`EncodeError::Overflow`] if the unit does not fit.
    pub fn emit_enumerated(&mut self, value: i64) -> Result<(), EncodeError> {
        self.emit_signed(Tag::ENUMERATED, value)
    }

    fn emit_signed(&mut self, tag: Tag, value: i64) -> Result<(), EncodeError> {
        let width = integer_width(value);
        let bytes = value.to_be_bytes();
        self.prepend(&bytes[bytes.len() - width..])?;
        self.prepend_header(tag, width)
    }

    fn prepend_header(&mut self, tag: Tag, len: usize) -> Result<(), EncodeError> {
        if len < 0x80 {
            // Short form; `len` fits in seven bits.
            self.prepend(&[tag.raw(), len as u8])
        } else {
            let bytes = len.to_be_bytes();
            let skip = bytes.iter().take_while(|&&b| b == 0).count();
            let significant = &bytes[skip..];
            self.prepend(significant)?;
            self.prepend(&[tag.raw(), 0x80 | significant.len() as u8])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_integer() {
        let mut dst = Encoder::with_capacity(8);
        dst.emit_integer(9).unwrap();
        assert_eq!(dst.as_bytes(), &[0x02, 0x01, 0x09]);
    }

    #[test]
    fn test_emit_integer_minimal_width() {
        let mut dst = Encoder::with_capacity(16);
        dst.emit_integer(128).unwrap();
        assert_eq!(dst.as_bytes(), &[0x02, 0x02, 0x00, 0x80]);

        let mut dst = Encoder::with_capacity(16);
        dst.emit_integer(-129).unwrap();
        assert_eq!(dst.as_bytes(), &[0x02, 0x02, 0xff, 0x7f]);
    }

    #[test]
    fn test_emit_boolean_and_octet_string() {
        let mut dst = Encoder::with_capacity(16);
        dst.emit_boolean(true).unwrap();
        dst.emit_octet_string(b"hi").unwrap();
        assert_eq!(
            dst.finish(),
            vec![0x04, 0x02, b'h', b'i', 0x01, 0x01, 0xff]
        );
    }

    #[test]
    fn test_tlv_wraps_reversed_content() {
        let mut dst = Encoder::with_capacity(16);
        dst.tlv(Tag::SEQUENCE, |dst| {
            dst.emit_integer(9)?;
            dst.emit_integer(3)
        })
        .unwrap();
        assert_eq!(
            dst.finish(),
            vec![0x30, 0x06, 0x02, 0x01, 0x03, 0x02, 0x01, 0x09]
        );
    }

    #[test]
    fn test_long_form_header() {
        let payload = vec![0x5a; 200];
        let mut dst = Encoder::with_capacity(256);
        dst.emit_octet_string(&payload).unwrap();
        let bytes = dst.finish();
        assert_eq!(&bytes[..3], &[0x04, 0x81, 200]);
        assert_eq!(bytes.len(), 203);
    }

    #[test]
    fn test_overflow() {
        let mut dst = Encoder::with_capacity(2);
        let result = dst.emit_integer(1);
        assert!(matches!(result, Err(EncodeError::Overflow { .. })));
    }

    #[test]
    fn test_empty_encoder() {
        let dst = Encoder::with_capacity(4);
        assert!(dst.is_empty());
        assert_eq!(dst.remaining(), 4);
        assert_eq!(dst.capacity(), 4);
        assert!(dst.finish().is_empty());
    }
}

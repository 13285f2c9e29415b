//! Traits implemented by generated types.
//!
//! Every generated definition implements [`Asn1`]. CHOICE and ENUMERATED
//! definitions additionally implement [`Choice`] or [`Enumerated`], which
//! carry their forward (`TAGS_F`) and inverse (`TAGS_R`) tag tables; their
//! `Asn1` methods delegate to the table-driven helpers in this module
//! instead of carrying a standalone routine.

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{DecodeError, EncodeError};
use crate::types::Tag;

/// Parent construct of a generated definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    /// Plain definition: primitive, SEQUENCE OF or reference.
    Asn1,
    /// SEQUENCE with named fields.
    Sequence,
    /// CHOICE between tagged alternatives.
    Choice,
    /// ENUMERATED set of labels.
    Enumerated,
}

/// A type with BER decode and encode routines.
pub trait Asn1: Sized {
    /// Parent construct of the definition.
    const CONSTRUCT: Construct;

    /// Upper bound on the encoded size in bytes.
    const MAX_SIZE: usize;

    /// Decodes one value, advancing `src` past it.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] on any tag, bound, or framing violation.
    fn decode(src: &mut Decoder<'_>) -> Result<Self, DecodeError>;

    /// Prepends the encoding of `self` to `dst`.
    ///
    /// # Errors
    /// Returns [`EncodeError::Overflow`] if `dst` runs out of room.
    fn encode(&self, dst: &mut Encoder) -> Result<(), EncodeError>;
}

/// A CHOICE whose alternatives are selected by context tag number.
pub trait Choice: Sized {
    /// Alternative type name to tag number.
    const TAGS_F: &'static [(&'static str, u8)];

    /// Tag number to alternative type name.
    const TAGS_R: &'static [(u8, &'static str)];

    /// Tag number of the active alternative.
    fn tag(&self) -> u8;

    /// Decodes the alternative registered under `tag` from the wrapper's
    /// content.
    ///
    /// # Errors
    /// Returns [`DecodeError::UnknownAlternative`] for an unregistered tag,
    /// or the alternative's own decode error.
    fn decode_alternative(tag: u8, src: &mut Decoder<'_>) -> Result<Self, DecodeError>;

    /// Encodes the active alternative without its context wrapper.
    ///
    /// # Errors
    /// Returns the alternative's encode error.
    fn encode_alternative(&self, dst: &mut Encoder) -> Result<(), EncodeError>;
}

/// An ENUMERATED with a fixed label set.
pub trait Enumerated: Sized + Copy {
    /// Label to wire value.
    const TAGS_F: &'static [(&'static str, i64)];

    /// Wire value to label.
    const TAGS_R: &'static [(i64, &'static str)];

    /// Wire value of this label.
    fn value(self) -> i64;

    /// Label for a wire value, if any.
    fn from_value(value: i64) -> Option<Self>;
}

/// Looks up the alternative name registered for a tag number.
#[must_use]
pub fn choice_alternative<T: Choice>(tag: u8) -> Option<&'static str> {
    T::TAGS_R
        .iter()
        .find(|(number, _)| *number == tag)
        .map(|(_, name)| *name)
}

/// Looks up the label registered for an enumerated value.
#[must_use]
pub fn enumerated_label<T: Enumerated>(value: i64) -> Option<&'static str> {
    T::TAGS_R
        .iter()
        .find(|(number, _)| *number == value)
        .map(|(_, label)| *label)
}

/// Decodes a CHOICE by peeking its context tag and dispatching through
/// the inverse tag table.
///
/// # Errors
/// Returns [`DecodeError::UnknownAlternative`] if the tag is not a
/// registered context tag, or the alternative's decode error.
pub fn decode_choice<T: Choice>(src: &mut Decoder<'_>) -> Result<T, DecodeError> {
    let tag = src.peek_tag()?;
    let number = tag
        .context_number()
        .filter(|&number| choice_alternative::<T>(number).is_some())
        .ok_or(DecodeError::UnknownAlternative { tag })?;
    let mut inner = src.next(tag)?;
    let value = T::decode_alternative(number, &mut inner)?;
    inner.finish()?;
    Ok(value)
}

/// Encodes a CHOICE inside the explicit context tag of its active
/// alternative.
///
/// # Errors
/// Returns [`EncodeError::Overflow`] if `dst` runs out of room.
pub fn encode_choice<T: Choice>(value: &T, dst: &mut Encoder) -> Result<(), EncodeError> {
    dst.tlv(Tag::context(value.tag()), |dst| value.encode_alternative(dst))
}

/// Decodes an ENUMERATED through the inverse value table.
///
/// # Errors
/// Returns [`DecodeError::UnknownEnumerated`] for a value with no label.
pub fn decode_enumerated<T: Enumerated>(src: &mut Decoder<'_>) -> Result<T, DecodeError> {
    let value = src.next_enumerated()?;
    T::from_value(value).ok_or(DecodeError::UnknownEnumerated { value })
}

/// Encodes an ENUMERATED through the forward value table.
///
/// # Errors
/// Returns [`EncodeError::Overflow`] if `dst` runs out of room.
pub fn encode_enumerated<T: Enumerated>(value: T, dst: &mut Encoder) -> Result<(), EncodeError> {
    dst.emit_enumerated(value.value())
}

/// Fails unless a SEQUENCE OF element count lies within `[min, max]`.
///
/// # Errors
/// Returns [`DecodeError::CountOutOfRange`] on a violation.
pub fn check_size(count: usize, min: usize, max: usize) -> Result<(), DecodeError> {
    if count < min || count > max {
        return Err(DecodeError::CountOutOfRange { count, min, max });
    }
    Ok(())
}

/// Encodes a value into a buffer sized by its `MAX_SIZE` bound.
///
/// # Errors
/// Returns [`EncodeError::Overflow`] if the value exceeds the bound.
pub fn encode_to_vec<T: Asn1>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut dst = Encoder::with_capacity(T::MAX_SIZE);
    value.encode(&mut dst)?;
    Ok(dst.finish())
}

/// Decodes exactly one value from `bytes`.
///
/// # Errors
/// Returns the value's decode error, or [`DecodeError::TrailingBytes`] if
/// input remains.
pub fn decode_from_slice<T: Asn1>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut src = Decoder::new(bytes);
    let value = T::decode(&mut src)?;
    src.finish()?;
    Ok(value)
}

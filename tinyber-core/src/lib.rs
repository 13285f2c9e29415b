//! # TinyBER Core
//!
//! Runtime support for code generated by `tinyber-codegen`.
//!
//! This crate provides:
//! - [`Tag`] constants for the universal and context-specific identifiers
//! - [`Decoder`], a TLV cursor with bounded primitive reads
//! - [`Encoder`], a back-to-front TLV writer
//! - The [`Asn1`], [`Choice`] and [`Enumerated`] traits and the
//!   table-driven dispatch used by CHOICE and ENUMERATED definitions
//! - Error types for decoding and encoding

pub mod asn1;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod types;

pub use asn1::{
    Asn1, Choice, Construct, Enumerated, check_size, choice_alternative, decode_choice,
    decode_enumerated, decode_from_slice, encode_choice, encode_enumerated, encode_to_vec,
    enumerated_label,
};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{DecodeError, EncodeError};
pub use types::Tag;

/// Everything generated code refers to by name.
pub mod prelude {
    pub use crate::asn1::{
        Asn1, Choice, Construct, Enumerated, check_size, decode_choice, decode_enumerated,
        encode_choice, encode_enumerated,
    };
    pub use crate::decoder::Decoder;
    pub use crate::encoder::Encoder;
    pub use crate::error::{DecodeError, EncodeError};
    pub use crate::types::Tag;
}

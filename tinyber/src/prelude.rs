//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use tinyber::prelude::*;
//! ```

// Runtime
pub use tinyber_core::{
    Asn1, Choice, Construct, DecodeError, Decoder, EncodeError, Encoder, Enumerated, Tag,
    decode_from_slice, encode_to_vec,
};

// Schema
pub use tinyber_schema::{Attrs, Module, Node, SchemaError, TypeDefinition, Variant};

// Code generation
pub use tinyber_codegen::{
    CodegenError, Emit, Generator, GeneratorOptions, Writer, generate, generate_from_json,
    generate_to_file,
};

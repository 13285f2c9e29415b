//! # TinyBER
//!
//! ASN.1 BER code generation for Rust.
//!
//! TinyBER turns an ASN.1 schema module, already resolved into a tree of
//! schema nodes, into Rust types that decode and encode themselves as BER.
//! Generated code is plain Rust with no macros; it relies on the small
//! `tinyber-core` runtime for the tag-length-value framing.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tinyber::schema::{Module, Node, TypeDefinition};
//!
//! let module = Module::new("points").with_definition(TypeDefinition::new(
//!     "Point",
//!     "SEQUENCE { x INTEGER (0..255), y INTEGER (0..255) }",
//!     Node::sequence(
//!         "Point",
//!         vec![("x", Node::integer(0, 255)), ("y", Node::integer(0, 255))],
//!     ),
//! ));
//!
//! let code = tinyber::codegen::generate(&module)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime: tags, decoder cursor, back-to-front encoder, traits
//! - [`schema`] - Schema node model, size bounds, validation, JSON input
//! - [`codegen`] - Rust code generation from schema modules
//! - [`cli`] - The `tinyber-gen` command-line front end

pub mod cli;
pub mod prelude;

/// Runtime used by generated code.
pub mod core {
    pub use tinyber_core::*;
}

/// Schema node model and validation.
pub mod schema {
    pub use tinyber_schema::*;
}

/// Code generation from schema modules.
pub mod codegen {
    pub use tinyber_codegen::*;
}

// Re-export commonly used items at the crate root
pub use tinyber_codegen::{CodegenError, Generator, GeneratorOptions};
pub use tinyber_core::{DecodeError, EncodeError, decode_from_slice, encode_to_vec};
pub use tinyber_schema::{Module, Node, SchemaError, TypeDefinition};

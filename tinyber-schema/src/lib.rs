//! # TinyBER Schema
//!
//! Schema node model for BER code generation.
//!
//! This crate provides:
//! - The closed set of schema node variants and their attributes
//! - Encoded size bounds per node
//! - Two-way tag tables for CHOICE and ENUMERATED
//! - Module and node validation
//! - The module input format produced by a schema walker

pub mod error;
pub mod ir;
pub mod types;
pub mod validation;

pub use error::SchemaError;
pub use ir::{Module, TypeDefinition, field_ident, to_pascal_case, to_snake_case};
pub use types::{Attrs, Node, PrimitiveKind, TagMap, Variant, VariantInfo};
pub use validation::{validate_module, validate_node};

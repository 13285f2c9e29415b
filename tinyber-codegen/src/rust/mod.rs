//! Rust code generation modules.
//!
//! Each schema variant has its own emitter. [`Emit`] is the capability every
//! emitter provides; `impl Emit for Node` picks the emitter matching the
//! node's variant, so callers never branch on the variant themselves.
//!
//! Emitted decode statements always read from a `&mut Decoder` named `src`
//! and leave their result bound to `v`. Emitted encode statements write to
//! an `&mut Encoder` named `dst` from a caller-supplied value expression.

pub mod choices;
pub mod defined;
pub mod enums;
pub mod primitives;
pub mod sequences;

pub use choices::ChoiceEmitter;
pub use defined::DefinedEmitter;
pub use enums::EnumeratedEmitter;
pub use primitives::PrimitiveEmitter;
pub use sequences::{SequenceEmitter, SequenceOfEmitter};

use crate::error::CodegenError;
use crate::writer::Writer;
use tinyber_schema::{Attrs, Node};

/// Code emission capability of one schema variant.
pub trait Emit {
    /// Writes the Rust declaration of a top-level definition named
    /// `type_name`, including any trait impls the layout needs.
    ///
    /// # Errors
    /// Returns `CodegenError` if the node cannot be declared.
    fn emit_layout(&self, type_name: &str, out: &mut Writer) -> Result<(), CodegenError>;

    /// Writes statements that decode one value from `src` into `v`.
    ///
    /// # Errors
    /// Returns `CodegenError` if the node cannot be decoded inline.
    fn emit_decode(&self, out: &mut Writer) -> Result<(), CodegenError>;

    /// Writes statements that encode `value` into `dst`.
    ///
    /// `value` is a place expression: `self`, `self.0`, `self.field`, or
    /// `*v` for a borrowed item.
    ///
    /// # Errors
    /// Returns `CodegenError` if the node cannot be encoded inline.
    fn emit_encode(&self, out: &mut Writer, value: &str) -> Result<(), CodegenError>;

    /// Returns the Rust type holding a decoded value.
    ///
    /// # Errors
    /// Returns `CodegenError` for constructs that have no inline type.
    fn rust_type(&self) -> Result<String, CodegenError>;
}

/// Emitter for one node, selected by variant.
#[derive(Debug)]
pub enum VariantEmitter<'a> {
    /// INTEGER, OCTET STRING or BOOLEAN.
    Primitive(PrimitiveEmitter<'a>),
    /// SEQUENCE.
    Sequence(SequenceEmitter<'a>),
    /// SEQUENCE OF.
    SequenceOf(SequenceOfEmitter<'a>),
    /// CHOICE.
    Choice(ChoiceEmitter<'a>),
    /// ENUMERATED.
    Enumerated(EnumeratedEmitter<'a>),
    /// Defined type reference.
    Defined(DefinedEmitter<'a>),
}

impl<'a> VariantEmitter<'a> {
    /// Builds the emitter for `node`.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if the node's attributes or arity are
    /// invalid for its variant.
    pub fn new(node: &'a Node) -> Result<Self, CodegenError> {
        Ok(match &node.attrs {
            Attrs::Primitive { .. } => Self::Primitive(PrimitiveEmitter::new(node)?),
            Attrs::Sequence { .. } => Self::Sequence(SequenceEmitter::new(node)?),
            Attrs::SequenceOf { .. } => Self::SequenceOf(SequenceOfEmitter::new(node)?),
            Attrs::Choice { .. } => Self::Choice(ChoiceEmitter::new(node)?),
            Attrs::Enumerated { .. } => Self::Enumerated(EnumeratedEmitter::new(node)?),
            Attrs::Defined { .. } => Self::Defined(DefinedEmitter::new(node)?),
        })
    }

    fn inner(&self) -> &dyn Emit {
        match self {
            Self::Primitive(e) => e,
            Self::Sequence(e) => e,
            Self::SequenceOf(e) => e,
            Self::Choice(e) => e,
            Self::Enumerated(e) => e,
            Self::Defined(e) => e,
        }
    }
}

impl Emit for VariantEmitter<'_> {
    fn emit_layout(&self, type_name: &str, out: &mut Writer) -> Result<(), CodegenError> {
        self.inner().emit_layout(type_name, out)
    }

    fn emit_decode(&self, out: &mut Writer) -> Result<(), CodegenError> {
        self.inner().emit_decode(out)
    }

    fn emit_encode(&self, out: &mut Writer, value: &str) -> Result<(), CodegenError> {
        self.inner().emit_encode(out, value)
    }

    fn rust_type(&self) -> Result<String, CodegenError> {
        self.inner().rust_type()
    }
}

impl Emit for Node {
    fn emit_layout(&self, type_name: &str, out: &mut Writer) -> Result<(), CodegenError> {
        VariantEmitter::new(self)?.emit_layout(type_name, out)
    }

    fn emit_decode(&self, out: &mut Writer) -> Result<(), CodegenError> {
        VariantEmitter::new(self)?.emit_decode(out)
    }

    fn emit_encode(&self, out: &mut Writer, value: &str) -> Result<(), CodegenError> {
        VariantEmitter::new(self)?.emit_encode(out, value)
    }

    fn rust_type(&self) -> Result<String, CodegenError> {
        VariantEmitter::new(self)?.rust_type()
    }
}

/// Writes `pub struct Name(pub Inner);` for single-value definitions.
pub(crate) fn emit_newtype(out: &mut Writer, type_name: &str, inner: &str) {
    out.line(format!("pub struct {}(pub {});", type_name, inner));
}

/// Returns `value` as a method receiver; auto-deref covers borrowed items.
pub(crate) fn receiver(value: &str) -> &str {
    value.strip_prefix('*').unwrap_or(value)
}

/// Returns a shared borrow of `value`.
pub(crate) fn borrowed(value: &str) -> String {
    match value.strip_prefix('*') {
        Some(reference) => reference.to_string(),
        None => format!("&{}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiver_strips_deref() {
        assert_eq!(receiver("*v"), "v");
        assert_eq!(receiver("self.0"), "self.0");
    }

    #[test]
    fn test_borrowed() {
        assert_eq!(borrowed("*v"), "v");
        assert_eq!(borrowed("self.data"), "&self.data");
    }

    #[test]
    fn test_dispatch_by_variant() {
        let node = Node::boolean();
        assert!(matches!(
            VariantEmitter::new(&node).unwrap(),
            VariantEmitter::Primitive(_)
        ));
        let node = Node::defined("Point", 10);
        assert!(matches!(
            VariantEmitter::new(&node).unwrap(),
            VariantEmitter::Defined(_)
        ));
    }

    #[test]
    fn test_unknown_primitive_is_reported() {
        let node = Node::primitive("REAL", None, None);
        let mut out = Writer::new();
        let result = node.emit_decode(&mut out);
        assert!(matches!(
            result,
            Err(CodegenError::Schema(tinyber_schema::SchemaError::UnknownPrimitive { .. }))
        ));
        assert!(out.as_str().is_empty());
    }
}

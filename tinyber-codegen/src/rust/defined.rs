//! References to other definitions.

use super::{Emit, emit_newtype, receiver};
use crate::error::CodegenError;
use crate::writer::Writer;
use tinyber_schema::{Attrs, Node, to_pascal_case};

/// Emitter for a reference to a named definition.
///
/// The referenced type's own `Asn1` impl does the work, whatever its
/// variant, so CHOICE and ENUMERATED fields go through tag dispatch here.
#[derive(Debug)]
pub struct DefinedEmitter<'a> {
    type_name: &'a str,
}

impl<'a> DefinedEmitter<'a> {
    /// Creates a reference emitter.
    ///
    /// # Errors
    /// Returns an error if the reference has no type name.
    pub fn new(node: &'a Node) -> Result<Self, CodegenError> {
        match &node.attrs {
            Attrs::Defined { type_name, .. } if !type_name.is_empty() => Ok(Self { type_name }),
            _ => Err(CodegenError::generation(format!(
                "'{}' is not a type reference",
                node.name()
            ))),
        }
    }

    fn ident(&self) -> String {
        to_pascal_case(self.type_name)
    }
}

impl Emit for DefinedEmitter<'_> {
    fn emit_layout(&self, type_name: &str, out: &mut Writer) -> Result<(), CodegenError> {
        emit_newtype(out, type_name, &self.ident());
        Ok(())
    }

    fn emit_decode(&self, out: &mut Writer) -> Result<(), CodegenError> {
        out.line(format!("let v = {}::decode(src)?;", self.ident()));
        Ok(())
    }

    fn emit_encode(&self, out: &mut Writer, value: &str) -> Result<(), CodegenError> {
        out.line(format!("{}.encode(dst)?;", receiver(value)));
        Ok(())
    }

    fn rust_type(&self) -> Result<String, CodegenError> {
        Ok(self.ident())
    }
}

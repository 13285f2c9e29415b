//! Primitive type code generation.

use super::{Emit, borrowed, emit_newtype};
use crate::error::CodegenError;
use crate::writer::Writer;
use tinyber_schema::{Node, PrimitiveKind};

/// Emitter for INTEGER, OCTET STRING and BOOLEAN nodes.
#[derive(Debug)]
pub struct PrimitiveEmitter<'a> {
    node: &'a Node,
    kind: PrimitiveKind,
}

impl<'a> PrimitiveEmitter<'a> {
    /// Creates a primitive emitter, resolving the primitive kind.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` for a kind with no runtime codec.
    pub fn new(node: &'a Node) -> Result<Self, CodegenError> {
        let kind = node.primitive_kind()?;
        Ok(Self { node, kind })
    }

    /// Returns the resolved primitive kind.
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        self.kind
    }
}

impl Emit for PrimitiveEmitter<'_> {
    fn emit_layout(&self, type_name: &str, out: &mut Writer) -> Result<(), CodegenError> {
        emit_newtype(out, type_name, &self.rust_type()?);
        Ok(())
    }

    fn emit_decode(&self, out: &mut Writer) -> Result<(), CodegenError> {
        match self.kind {
            PrimitiveKind::Integer => {
                let (min, max) = self.node.integer_range();
                out.line(format!(
                    "let v = src.next_integer({}, {})?;",
                    integer_literal(min),
                    integer_literal(max)
                ));
            }
            PrimitiveKind::OctetString => {
                let (min, max) = self.node.octet_string_range()?;
                out.line(format!("let v = src.next_octet_string({}, {})?;", min, max));
            }
            PrimitiveKind::Boolean => out.line("let v = src.next_boolean()?;"),
        }
        Ok(())
    }

    fn emit_encode(&self, out: &mut Writer, value: &str) -> Result<(), CodegenError> {
        match self.kind {
            PrimitiveKind::Integer => out.line(format!("dst.emit_integer({})?;", value)),
            PrimitiveKind::OctetString => {
                out.line(format!("dst.emit_octet_string({})?;", borrowed(value)));
            }
            PrimitiveKind::Boolean => out.line(format!("dst.emit_boolean({})?;", value)),
        }
        Ok(())
    }

    fn rust_type(&self) -> Result<String, CodegenError> {
        Ok(match self.kind {
            PrimitiveKind::Integer => "i64",
            PrimitiveKind::OctetString => "Vec<u8>",
            PrimitiveKind::Boolean => "bool",
        }
        .to_string())
    }
}

fn integer_literal(value: i64) -> String {
    match value {
        i64::MIN => "i64::MIN".to_string(),
        i64::MAX => "i64::MAX".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(node: &Node) -> String {
        let mut out = Writer::new();
        node.emit_decode(&mut out).unwrap();
        out.finish()
    }

    fn encode(node: &Node, value: &str) -> String {
        let mut out = Writer::new();
        node.emit_encode(&mut out, value).unwrap();
        out.finish()
    }

    #[test]
    fn test_integer_decode_carries_bounds() {
        assert_eq!(
            decode(&Node::integer(-5, 255)),
            "let v = src.next_integer(-5, 255)?;\n"
        );
        assert_eq!(
            decode(&Node::primitive("INTEGER", None, Some(7))),
            "let v = src.next_integer(i64::MIN, 7)?;\n"
        );
    }

    #[test]
    fn test_octet_string_decode_carries_length_bounds() {
        assert_eq!(
            decode(&Node::octet_string(1, 16)),
            "let v = src.next_octet_string(1, 16)?;\n"
        );
    }

    #[test]
    fn test_encode_lines() {
        assert_eq!(encode(&Node::integer(0, 9), "self.0"), "dst.emit_integer(self.0)?;\n");
        assert_eq!(encode(&Node::boolean(), "*v"), "dst.emit_boolean(*v)?;\n");
        assert_eq!(
            encode(&Node::octet_string(0, 4), "self.data"),
            "dst.emit_octet_string(&self.data)?;\n"
        );
        assert_eq!(
            encode(&Node::octet_string(0, 4), "*v"),
            "dst.emit_octet_string(v)?;\n"
        );
    }

    #[test]
    fn test_layout_is_newtype() {
        let mut out = Writer::new();
        Node::integer(0, 150).emit_layout("Age", &mut out).unwrap();
        assert_eq!(out.finish(), "pub struct Age(pub i64);\n");
    }

    #[test]
    fn test_rust_types() {
        assert_eq!(Node::boolean().rust_type().unwrap(), "bool");
        assert_eq!(Node::octet_string(0, 1).rust_type().unwrap(), "Vec<u8>");
    }
}

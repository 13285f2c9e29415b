//! SEQUENCE and SEQUENCE OF code generation.
//!
//! The runtime encoder fills its buffer from the end, so every encode body
//! emitted here walks fields and elements last to first. The bytes still
//! come out in declaration order.

use super::{Emit, emit_newtype, receiver};
use crate::error::CodegenError;
use crate::writer::Writer;
use std::collections::HashSet;
use tinyber_schema::{Attrs, Node, SchemaError, field_ident, to_snake_case};

/// Emitter for SEQUENCE nodes.
#[derive(Debug)]
pub struct SequenceEmitter<'a> {
    name: &'a str,
    fields: Vec<Field<'a>>,
}

#[derive(Debug)]
struct Field<'a> {
    ident: String,
    local: String,
    node: &'a Node,
}

impl<'a> SequenceEmitter<'a> {
    /// Creates a SEQUENCE emitter.
    ///
    /// # Errors
    /// Returns an error on a field/sub-node count mismatch or when two field
    /// names map to the same Rust identifier.
    pub fn new(node: &'a Node) -> Result<Self, CodegenError> {
        let Attrs::Sequence { name, fields } = &node.attrs else {
            return Err(CodegenError::generation(format!("'{}' is not a SEQUENCE", node.name())));
        };
        if fields.len() != node.subs.len() {
            return Err(SchemaError::arity(name.as_str(), fields.len(), node.subs.len()).into());
        }

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(fields.len());
        for (field, sub) in fields.iter().zip(&node.subs) {
            let ident = field_ident(field);
            if !seen.insert(ident.clone()) {
                return Err(CodegenError::DuplicateIdent {
                    type_name: name.clone(),
                    ident,
                });
            }
            resolved.push(Field {
                ident,
                local: format!("f_{}", to_snake_case(field)),
                node: sub,
            });
        }

        Ok(Self {
            name,
            fields: resolved,
        })
    }
}

impl Emit for SequenceEmitter<'_> {
    fn emit_layout(&self, type_name: &str, out: &mut Writer) -> Result<(), CodegenError> {
        out.block(format!("pub struct {} {{", type_name), "}", |out| {
            for field in &self.fields {
                out.line(format!("pub {}: {},", field.ident, field.node.rust_type()?));
            }
            Ok(())
        })
    }

    fn emit_decode(&self, out: &mut Writer) -> Result<(), CodegenError> {
        out.line("let mut seq = src.next(Tag::SEQUENCE)?;");
        out.line("let src = &mut seq;");
        for field in &self.fields {
            field.node.emit_decode(out)?;
            out.line(format!("let {} = v;", field.local));
        }
        out.line("src.finish()?;");

        let inits: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{}: {}", f.ident, f.local))
            .collect();
        if inits.is_empty() {
            out.line("let v = Self {};");
        } else {
            out.line(format!("let v = Self {{ {} }};", inits.join(", ")));
        }
        Ok(())
    }

    fn emit_encode(&self, out: &mut Writer, value: &str) -> Result<(), CodegenError> {
        let base = receiver(value);
        out.block("dst.tlv(Tag::SEQUENCE, |dst| {", "})?;", |out| {
            for field in self.fields.iter().rev() {
                field
                    .node
                    .emit_encode(out, &format!("{}.{}", base, field.ident))?;
            }
            out.line("Ok(())");
            Ok(())
        })
    }

    fn rust_type(&self) -> Result<String, CodegenError> {
        Err(CodegenError::generation(format!(
            "SEQUENCE '{}' must be referenced by name",
            self.name
        )))
    }
}

/// Emitter for SEQUENCE OF nodes.
#[derive(Debug)]
pub struct SequenceOfEmitter<'a> {
    element: &'a Node,
    min: usize,
    max: usize,
}

impl<'a> SequenceOfEmitter<'a> {
    /// Creates a SEQUENCE OF emitter.
    ///
    /// # Errors
    /// Returns an error unless there is exactly one element node and an
    /// upper size bound.
    pub fn new(node: &'a Node) -> Result<Self, CodegenError> {
        let element = node.element()?;
        let (min, max) = node.count_range()?;
        Ok(Self { element, min, max })
    }
}

impl Emit for SequenceOfEmitter<'_> {
    fn emit_layout(&self, type_name: &str, out: &mut Writer) -> Result<(), CodegenError> {
        emit_newtype(out, type_name, &self.rust_type()?);
        Ok(())
    }

    fn emit_decode(&self, out: &mut Writer) -> Result<(), CodegenError> {
        out.block("let v = {", "};", |out| {
            out.line("let mut seq = src.next(Tag::SEQUENCE)?;");
            out.line("let src = &mut seq;");
            out.line("let mut items = Vec::new();");
            out.block("while !src.done() {", "}", |out| {
                self.element.emit_decode(out)?;
                out.line("items.push(v);");
                Ok(())
            })?;
            out.line(format!("check_size(items.len(), {}, {})?;", self.min, self.max));
            out.line("items");
            Ok(())
        })
    }

    fn emit_encode(&self, out: &mut Writer, value: &str) -> Result<(), CodegenError> {
        out.block("dst.tlv(Tag::SEQUENCE, |dst| {", "})?;", |out| {
            out.block(
                format!("for v in {}.iter().rev() {{", receiver(value)),
                "}",
                |out| self.element.emit_encode(out, "*v"),
            )?;
            out.line("Ok(())");
            Ok(())
        })
    }

    fn rust_type(&self) -> Result<String, CodegenError> {
        Ok(format!("Vec<{}>", self.element.rust_type()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> Node {
        Node::sequence(
            "Point",
            vec![("x", Node::integer(0, 255)), ("y", Node::integer(0, 255))],
        )
    }

    #[test]
    fn test_layout() {
        let mut out = Writer::new();
        point().emit_layout("Point", &mut out).unwrap();
        assert_eq!(
            out.finish(),
            "pub struct Point {\n    pub x: i64,\n    pub y: i64,\n}\n"
        );
    }

    #[test]
    fn test_decode_in_field_order() {
        let mut out = Writer::new();
        point().emit_decode(&mut out).unwrap();
        let code = out.finish();
        let x = code.find("let f_x = v;").unwrap();
        let y = code.find("let f_y = v;").unwrap();
        assert!(x < y);
        assert!(code.starts_with("let mut seq = src.next(Tag::SEQUENCE)?;\n"));
        assert!(code.ends_with("let v = Self { x: f_x, y: f_y };\n"));
    }

    #[test]
    fn test_encode_in_reverse_field_order() {
        let mut out = Writer::new();
        point().emit_encode(&mut out, "self").unwrap();
        assert_eq!(
            out.finish(),
            "dst.tlv(Tag::SEQUENCE, |dst| {\n    \
             dst.emit_integer(self.y)?;\n    \
             dst.emit_integer(self.x)?;\n    \
             Ok(())\n\
             })?;\n"
        );
    }

    #[test]
    fn test_keyword_field() {
        let node = Node::sequence("Item", vec![("type", Node::boolean())]);
        let mut out = Writer::new();
        node.emit_decode(&mut out).unwrap();
        assert!(out.as_str().contains("let v = Self { r#type: f_type };"));
    }

    #[test]
    fn test_colliding_field_idents() {
        let node = Node::sequence(
            "Item",
            vec![("fooBar", Node::boolean()), ("foo_bar", Node::boolean())],
        );
        assert!(matches!(
            SequenceEmitter::new(&node),
            Err(CodegenError::DuplicateIdent { .. })
        ));
    }

    #[test]
    fn test_sequence_of_decode_checks_bounds() {
        let node = Node::sequence_of(1, 3, Node::defined("Point", 10));
        let mut out = Writer::new();
        node.emit_decode(&mut out).unwrap();
        let code = out.finish();
        assert!(code.contains("let v = Point::decode(src)?;"));
        assert!(code.contains("items.push(v);"));
        assert!(code.contains("check_size(items.len(), 1, 3)?;"));
    }

    #[test]
    fn test_sequence_of_encode_iterates_in_reverse() {
        let node = Node::sequence_of(0, 4, Node::integer(0, 100));
        let mut out = Writer::new();
        node.emit_encode(&mut out, "self.0").unwrap();
        let code = out.finish();
        assert!(code.contains("for v in self.0.iter().rev() {"));
        assert!(code.contains("dst.emit_integer(*v)?;"));
    }

    #[test]
    fn test_sequence_of_rust_type() {
        let node = Node::sequence_of(0, 4, Node::sequence_of(0, 2, Node::boolean()));
        assert_eq!(node.rust_type().unwrap(), "Vec<Vec<bool>>");
    }

    #[test]
    fn test_sequence_of_missing_bound() {
        let node = Node {
            attrs: Attrs::SequenceOf { min: None, max: None },
            subs: vec![Node::boolean()],
        };
        assert!(SequenceOfEmitter::new(&node).is_err());
    }
}

//! ENUMERATED code generation.

use super::Emit;
use crate::error::CodegenError;
use crate::writer::Writer;
use std::collections::HashSet;
use tinyber_schema::{Attrs, Node, to_pascal_case};

/// Emitter for ENUMERATED nodes.
#[derive(Debug)]
pub struct EnumeratedEmitter<'a> {
    labels: Vec<Label<'a>>,
}

#[derive(Debug)]
struct Label<'a> {
    variant: String,
    label: &'a str,
    value: i64,
}

impl<'a> EnumeratedEmitter<'a> {
    /// Creates an ENUMERATED emitter.
    ///
    /// # Errors
    /// Returns an error if the label table is not bijective or two labels
    /// map to the same variant name.
    pub fn new(node: &'a Node) -> Result<Self, CodegenError> {
        let Attrs::Enumerated { alternatives } = &node.attrs else {
            return Err(CodegenError::generation(format!(
                "'{}' is not an ENUMERATED",
                node.name()
            )));
        };
        node.tag_map()?;

        let mut seen = HashSet::new();
        let mut labels = Vec::with_capacity(alternatives.len());
        for (label, value) in alternatives {
            let variant = to_pascal_case(label);
            if !seen.insert(variant.clone()) {
                return Err(CodegenError::DuplicateIdent {
                    type_name: node.name().to_string(),
                    ident: variant,
                });
            }
            labels.push(Label {
                variant,
                label,
                value: *value,
            });
        }
        Ok(Self { labels })
    }
}

impl Emit for EnumeratedEmitter<'_> {
    fn emit_layout(&self, type_name: &str, out: &mut Writer) -> Result<(), CodegenError> {
        out.block(format!("pub enum {} {{", type_name), "}", |out| {
            for label in &self.labels {
                out.line(format!("{},", label.variant));
            }
            Ok(())
        })?;
        out.blank();

        let forward: Vec<String> = self
            .labels
            .iter()
            .map(|l| format!("({:?}, {})", l.label, l.value))
            .collect();
        let inverse: Vec<String> = self
            .labels
            .iter()
            .map(|l| format!("({}, {:?})", l.value, l.label))
            .collect();

        out.block(format!("impl Enumerated for {} {{", type_name), "}", |out| {
            out.line(format!(
                "const TAGS_F: &[(&str, i64)] = &[{}];",
                forward.join(", ")
            ));
            out.line(format!(
                "const TAGS_R: &[(i64, &str)] = &[{}];",
                inverse.join(", ")
            ));
            out.blank();
            out.block("fn value(self) -> i64 {", "}", |out| {
                out.block("match self {", "}", |out| {
                    for label in &self.labels {
                        out.line(format!("Self::{} => {},", label.variant, label.value));
                    }
                    Ok(())
                })
            })?;
            out.blank();
            out.block("fn from_value(value: i64) -> Option<Self> {", "}", |out| {
                out.block("match value {", "}", |out| {
                    for label in &self.labels {
                        out.line(format!("{} => Some(Self::{}),", label.value, label.variant));
                    }
                    out.line("_ => None,");
                    Ok(())
                })
            })
        })
    }

    fn emit_decode(&self, _out: &mut Writer) -> Result<(), CodegenError> {
        Err(by_name_only())
    }

    fn emit_encode(&self, _out: &mut Writer, _value: &str) -> Result<(), CodegenError> {
        Err(by_name_only())
    }

    fn rust_type(&self) -> Result<String, CodegenError> {
        Err(by_name_only())
    }
}

fn by_name_only() -> CodegenError {
    CodegenError::generation("ENUMERATED must be referenced by name")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag() -> Node {
        Node::enumerated(vec![("off", 0), ("on", 1)])
    }

    fn layout(node: &Node) -> String {
        let mut out = Writer::new();
        node.emit_layout("Flag", &mut out).unwrap();
        out.finish()
    }

    #[test]
    fn test_flag_layout() {
        let code = layout(&flag());
        assert!(code.starts_with("pub enum Flag {\n    Off,\n    On,\n}\n"));
        assert!(code.contains(
            "const TAGS_F: &[(&str, i64)] = &[(\"off\", 0), (\"on\", 1)];"
        ));
        assert!(code.contains(
            "const TAGS_R: &[(i64, &str)] = &[(0, \"off\"), (1, \"on\")];"
        ));
        assert!(code.contains("Self::On => 1,"));
        assert!(code.contains("1 => Some(Self::On),"));
    }

    #[test]
    fn test_negative_values() {
        let node = Node::enumerated(vec![("below", -1), ("level", 0)]);
        let code = layout(&node);
        assert!(code.contains("-1 => Some(Self::Below),"));
    }

    #[test]
    fn test_colliding_variants() {
        let node = Node::enumerated(vec![("on", 0), ("On", 1)]);
        assert!(matches!(
            EnumeratedEmitter::new(&node),
            Err(CodegenError::DuplicateIdent { .. })
        ));
    }

    #[test]
    fn test_no_inline_codec() {
        let mut out = Writer::new();
        assert!(flag().emit_decode(&mut out).is_err());
        assert!(out.as_str().is_empty());
    }
}

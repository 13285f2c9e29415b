//! CHOICE code generation.
//!
//! A CHOICE has no standalone codec. Its layout emits the forward and
//! inverse tag tables plus per-alternative dispatch; the context wrapper is
//! read and written by `decode_choice` and `encode_choice` in the runtime.

use super::Emit;
use crate::error::CodegenError;
use crate::writer::Writer;
use std::collections::HashSet;
use tinyber_core::types::MAX_LOW_TAG_NUMBER;
use tinyber_schema::{Attrs, Node, SchemaError, to_pascal_case};

/// Emitter for CHOICE nodes.
#[derive(Debug)]
pub struct ChoiceEmitter<'a> {
    name: &'a str,
    alternatives: Vec<Alternative<'a>>,
}

#[derive(Debug)]
struct Alternative<'a> {
    variant: String,
    label: &'a str,
    tag: u8,
    node: &'a Node,
}

impl<'a> ChoiceEmitter<'a> {
    /// Creates a CHOICE emitter.
    ///
    /// # Errors
    /// Returns an error if the tag table is not bijective, a tag does not
    /// fit a single identifier octet, or two alternatives map to the same
    /// variant name.
    pub fn new(node: &'a Node) -> Result<Self, CodegenError> {
        let Attrs::Choice { name, fields, tags } = &node.attrs else {
            return Err(CodegenError::generation(format!("'{}' is not a CHOICE", node.name())));
        };
        if fields.len() != node.subs.len() {
            return Err(SchemaError::arity(name.as_str(), fields.len(), node.subs.len()).into());
        }
        node.tag_map()?;

        let mut seen = HashSet::new();
        let mut alternatives = Vec::with_capacity(fields.len());
        for ((field, &tag), sub) in fields.iter().zip(tags).zip(&node.subs) {
            let tag = u8::try_from(tag)
                .ok()
                .filter(|&tag| tag <= MAX_LOW_TAG_NUMBER)
                .ok_or_else(|| SchemaError::TagOutOfRange {
                    node: name.clone(),
                    tag,
                    max: MAX_LOW_TAG_NUMBER,
                })?;
            let variant = to_pascal_case(field);
            if !seen.insert(variant.clone()) {
                return Err(CodegenError::DuplicateIdent {
                    type_name: name.clone(),
                    ident: variant,
                });
            }
            alternatives.push(Alternative {
                variant,
                label: sub.name(),
                tag,
                node: sub,
            });
        }

        Ok(Self { name, alternatives })
    }

    fn emit_tables(&self, out: &mut Writer) {
        let forward: Vec<String> = self
            .alternatives
            .iter()
            .map(|a| format!("({:?}, {})", a.label, a.tag))
            .collect();
        let inverse: Vec<String> = self
            .alternatives
            .iter()
            .map(|a| format!("({}, {:?})", a.tag, a.label))
            .collect();
        out.line(format!(
            "const TAGS_F: &[(&str, u8)] = &[{}];",
            forward.join(", ")
        ));
        out.line(format!(
            "const TAGS_R: &[(u8, &str)] = &[{}];",
            inverse.join(", ")
        ));
    }

    fn emit_tag(&self, out: &mut Writer) -> Result<(), CodegenError> {
        out.block("fn tag(&self) -> u8 {", "}", |out| {
            out.block("match self {", "}", |out| {
                for alt in &self.alternatives {
                    out.line(format!("Self::{}(_) => {},", alt.variant, alt.tag));
                }
                Ok(())
            })
        })
    }

    fn emit_decode_alternative(&self, out: &mut Writer) -> Result<(), CodegenError> {
        out.block(
            "fn decode_alternative(tag: u8, src: &mut Decoder<'_>) -> Result<Self, DecodeError> {",
            "}",
            |out| {
                out.block("match tag {", "}", |out| {
                    for alt in &self.alternatives {
                        out.block(format!("{} => {{", alt.tag), "}", |out| {
                            alt.node.emit_decode(out)?;
                            out.line(format!("Ok(Self::{}(v))", alt.variant));
                            Ok(())
                        })?;
                    }
                    out.line("other => Err(DecodeError::UnknownAlternative { tag: Tag::context(other) }),");
                    Ok(())
                })
            },
        )
    }

    fn emit_encode_alternative(&self, out: &mut Writer) -> Result<(), CodegenError> {
        out.block(
            "fn encode_alternative(&self, dst: &mut Encoder) -> Result<(), EncodeError> {",
            "}",
            |out| {
                out.block("match self {", "}", |out| {
                    for alt in &self.alternatives {
                        out.block(format!("Self::{}(v) => {{", alt.variant), "}", |out| {
                            alt.node.emit_encode(out, "*v")
                        })?;
                    }
                    Ok(())
                })?;
                out.line("Ok(())");
                Ok(())
            },
        )
    }
}

impl Emit for ChoiceEmitter<'_> {
    fn emit_layout(&self, type_name: &str, out: &mut Writer) -> Result<(), CodegenError> {
        out.block(format!("pub enum {} {{", type_name), "}", |out| {
            for alt in &self.alternatives {
                out.line(format!("{}({}),", alt.variant, alt.node.rust_type()?));
            }
            Ok(())
        })?;
        out.blank();
        out.block(format!("impl Choice for {} {{", type_name), "}", |out| {
            self.emit_tables(out);
            out.blank();
            self.emit_tag(out)?;
            out.blank();
            self.emit_decode_alternative(out)?;
            out.blank();
            self.emit_encode_alternative(out)
        })
    }

    fn emit_decode(&self, _out: &mut Writer) -> Result<(), CodegenError> {
        Err(self.by_name_only())
    }

    fn emit_encode(&self, _out: &mut Writer, _value: &str) -> Result<(), CodegenError> {
        Err(self.by_name_only())
    }

    fn rust_type(&self) -> Result<String, CodegenError> {
        Err(self.by_name_only())
    }
}

impl ChoiceEmitter<'_> {
    fn by_name_only(&self) -> CodegenError {
        CodegenError::generation(format!("CHOICE '{}' must be referenced by name", self.name))
    }
}

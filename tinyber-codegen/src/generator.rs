//! Definition-level code generation.
//!
//! [`Generator`] walks a module's definitions in order. For each one it
//! writes the type declaration through the node's [`Emit`] impl, then an
//! `impl Asn1` block whose `decode`/`encode` bodies are either emitted
//! inline or, for variants that declare no standalone codec, delegate to
//! the runtime's tag-dispatch helpers.

use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use crate::rust::Emit;
use crate::writer::Writer;
use tinyber_schema::{Module, Node, TypeDefinition, Variant, to_pascal_case};
use tracing::{debug, info};

/// Version stamped into the generated header.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main code generator.
pub struct Generator<'a> {
    module: &'a Module,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with default options.
    #[must_use]
    pub fn new(module: &'a Module) -> Self {
        Self::with_options(module, GeneratorOptions::default())
    }

    /// Creates a new generator with the given options.
    #[must_use]
    pub fn with_options(module: &'a Module, options: GeneratorOptions) -> Self {
        Self { module, options }
    }

    /// Returns the options in use.
    #[must_use]
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generates the complete Rust source for the module.
    ///
    /// The output has no inner attributes so it can be pulled in with
    /// `include!`.
    ///
    /// # Errors
    /// Returns `CodegenError` if the module fails validation or a
    /// definition cannot be emitted. Nothing is returned on failure.
    pub fn generate(&self) -> Result<String, CodegenError> {
        self.module.validate()?;

        let mut out = Writer::with_indent_size(self.options.indent_size());
        self.generate_header(&mut out);

        for definition in &self.module.definitions {
            debug!(
                type_name = %definition.type_name,
                variant = ?definition.node.variant(),
                "emitting definition"
            );
            out.blank();
            self.generate_definition(definition, &mut out)?;
        }

        info!(
            module = %self.module.name,
            definitions = self.module.definitions.len(),
            "generated module"
        );
        Ok(out.finish())
    }

    fn generate_header(&self, out: &mut Writer) {
        out.line(format!(
            "// Generated by tinyber-codegen {} from module `{}`.",
            VERSION, self.module.name
        ));
        out.line("// *** do not edit ***");
        out.blank();
        out.line(format!("use {}::prelude::*;", self.options.runtime_crate()));
    }

    /// Writes one definition: docs, derives, layout and `impl Asn1`.
    fn generate_definition(
        &self,
        definition: &TypeDefinition,
        out: &mut Writer,
    ) -> Result<(), CodegenError> {
        let node = &definition.node;
        let ident = to_pascal_case(&definition.type_name);

        if self.options.doc_comments() && !definition.declared_form.trim().is_empty() {
            out.line("/// ```text");
            for (i, line) in definition.declared_form.lines().enumerate() {
                if i == 0 {
                    out.line(format!("/// {} ::= {}", definition.type_name, line.trim_end()));
                } else {
                    out.line(format!("/// {}", line.trim_end()));
                }
            }
            out.line("/// ```");
        }

        let derives = self.derives_for(node.variant());
        if !derives.is_empty() {
            out.line(format!("#[derive({})]", derives.join(", ")));
        }
        node.emit_layout(&ident, out)?;
        out.blank();

        out.block(format!("impl Asn1 for {} {{", ident), "}", |out| {
            out.line(format!(
                "const CONSTRUCT: Construct = Construct::{};",
                construct_name(node)
            ));
            out.line(format!("const MAX_SIZE: usize = {};", node.max_size()?));
            out.blank();
            self.generate_decoder(node, out)?;
            out.blank();
            self.generate_encoder(node, out)
        })
    }

    fn generate_decoder(&self, node: &Node, out: &mut Writer) -> Result<(), CodegenError> {
        out.block(
            "fn decode(src: &mut Decoder<'_>) -> Result<Self, DecodeError> {",
            "}",
            |out| {
                if node.info().no_decoder {
                    out.line(dispatch_decode(node)?);
                    return Ok(());
                }
                node.emit_decode(out)?;
                out.line(if node.variant() == Variant::Sequence {
                    "Ok(v)"
                } else {
                    "Ok(Self(v))"
                });
                Ok(())
            },
        )
    }

    fn generate_encoder(&self, node: &Node, out: &mut Writer) -> Result<(), CodegenError> {
        out.block(
            "fn encode(&self, dst: &mut Encoder) -> Result<(), EncodeError> {",
            "}",
            |out| {
                if node.info().no_encoder {
                    out.line(dispatch_encode(node)?);
                    return Ok(());
                }
                let value = if node.variant() == Variant::Sequence {
                    "self"
                } else {
                    "self.0"
                };
                node.emit_encode(out, value)?;
                out.line("Ok(())");
                Ok(())
            },
        )
    }

    /// Derive list for one definition. ENUMERATED types are always `Copy`,
    /// which needs `Clone`; `Default` cannot be derived for the enum layouts.
    fn derives_for(&self, variant: Variant) -> Vec<&str> {
        let is_enum = matches!(variant, Variant::Choice | Variant::Enumerated);
        let mut derives: Vec<&str> = self
            .options
            .derives()
            .iter()
            .map(String::as_str)
            .filter(|d| !(is_enum && *d == "Default"))
            .collect();
        if variant == Variant::Enumerated {
            for required in ["Clone", "Copy"] {
                if !derives.contains(&required) {
                    derives.push(required);
                }
            }
        }
        derives
    }
}

fn construct_name(node: &Node) -> &'static str {
    match node.info().parent_class {
        Some("SEQUENCE") => "Sequence",
        Some("CHOICE") => "Choice",
        Some("ENUMERATED") => "Enumerated",
        _ => "Asn1",
    }
}

fn dispatch_decode(node: &Node) -> Result<&'static str, CodegenError> {
    match node.variant() {
        Variant::Choice => Ok("decode_choice(src)"),
        Variant::Enumerated => Ok("decode_enumerated(src)"),
        other => Err(CodegenError::generation(format!(
            "no tag dispatch for {:?} '{}'",
            other,
            node.name()
        ))),
    }
}

fn dispatch_encode(node: &Node) -> Result<&'static str, CodegenError> {
    match node.variant() {
        Variant::Choice => Ok("encode_choice(self, dst)"),
        Variant::Enumerated => Ok("encode_enumerated(*self, dst)"),
        other => Err(CodegenError::generation(format!(
            "no tag dispatch for {:?} '{}'",
            other,
            node.name()
        ))),
    }
}

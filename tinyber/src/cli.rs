//! Command-line front end.
//!
//! `tinyber-gen` reads a module in JSON form and writes the generated Rust
//! source to a file or to stdout.

use crate::codegen::{GeneratorOptions, generate_to_file_with_options, generate_with_options};
use crate::schema::Module;
use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Generate Rust BER codecs from a TinyBER schema module.
#[derive(Debug, Parser)]
#[command(name = "tinyber-gen", version, about, long_about = None)]
pub struct Cli {
    /// Module JSON file produced by a schema walker.
    #[arg(value_name = "MODULE")]
    pub input: PathBuf,

    /// Output file; generated code goes to stdout when omitted.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Crate path the generated code imports the runtime prelude from.
    #[arg(long = "runtime", value_name = "PATH", default_value = "tinyber_core")]
    pub runtime: String,

    /// Extra derive for every generated type; may be repeated.
    #[arg(short = 'd', long = "derive", value_name = "TRAIT")]
    pub derives: Vec<String>,

    /// Omit doc comments carrying each declaration.
    #[arg(long = "no-docs")]
    pub no_docs: bool,

    /// Validate the module without generating code.
    #[arg(long = "check")]
    pub check: bool,
}

impl Cli {
    /// Builds generator options from the flags.
    #[must_use]
    pub fn options(&self) -> GeneratorOptions {
        self.derives.iter().fold(
            GeneratorOptions::new()
                .with_runtime_crate(self.runtime.as_str())
                .with_doc_comments(!self.no_docs),
            |options, derive| options.with_derive(derive.as_str()),
        )
    }
}

/// Runs one invocation.
///
/// # Errors
/// Returns an error if the input cannot be read or parsed, the module is
/// invalid, or the output cannot be written.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let json = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let module = Module::from_json(&json)
        .with_context(|| format!("invalid module in {}", cli.input.display()))?;

    if cli.check {
        module.validate()?;
        info!(module = %module.name, definitions = module.definitions.len(), "module is valid");
        return Ok(());
    }

    match &cli.output {
        Some(path) => {
            generate_to_file_with_options(&module, cli.options(), path)
                .with_context(|| format!("failed to generate {}", path.display()))?;
        }
        None => {
            let code = generate_with_options(&module, cli.options())?;
            std::io::stdout().lock().write_all(code.as_bytes())?;
        }
    }
    Ok(())
}

//! # TinyBER Codegen
//!
//! Generates Rust types with BER codecs from a schema module.
//!
//! This crate provides:
//! - Type declarations for SEQUENCE, SEQUENCE OF, CHOICE, ENUMERATED,
//!   primitive and alias definitions
//! - Inline decode and encode bodies targeting the `tinyber-core` runtime
//! - Tag tables and dispatch for CHOICE and ENUMERATED
//! - Build script integration
//!
//! The generated file is meant to be pulled into a crate that depends on
//! `tinyber-core`:
//!
//! ```ignore
//! // build.rs
//! let code = tinyber_codegen::generate_from_file(Path::new("schemas/points.json"))?;
//! std::fs::write(out_dir.join("points.rs"), code)?;
//!
//! // src/lib.rs
//! include!(concat!(env!("OUT_DIR"), "/points.rs"));
//! ```

pub mod error;
pub mod generator;
pub mod options;
pub mod rust;
pub mod writer;

pub use error::CodegenError;
pub use generator::Generator;
pub use options::GeneratorOptions;
pub use rust::Emit;
pub use writer::{Indent, Writer};

use std::fs;
use std::path::Path;
use tinyber_schema::Module;
use tracing::warn;

/// Generates Rust code for a module with default options.
///
/// # Errors
/// Returns `CodegenError` if validation or generation fails.
pub fn generate(module: &Module) -> Result<String, CodegenError> {
    Generator::new(module).generate()
}

/// Generates Rust code for a module with the given options.
///
/// # Errors
/// Returns `CodegenError` if validation or generation fails.
pub fn generate_with_options(
    module: &Module,
    options: GeneratorOptions,
) -> Result<String, CodegenError> {
    Generator::with_options(module, options).generate()
}

/// Generates Rust code from a module in JSON form.
///
/// # Arguments
/// * `json` - Module JSON as produced by a schema walker
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or generation fails.
pub fn generate_from_json(json: &str) -> Result<String, CodegenError> {
    let module = Module::from_json(json)?;
    generate(&module)
}

/// Generates Rust code from a module JSON file.
///
/// # Arguments
/// * `path` - Path to the module JSON file
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(path: &Path) -> Result<String, CodegenError> {
    let json = fs::read_to_string(path)?;
    generate_from_json(&json)
}

/// Generates Rust code for a module and writes it to `path`.
///
/// The file is only touched once generation has succeeded, so a failed
/// run leaves any previous output in place.
///
/// # Errors
/// Returns `CodegenError` if generation or writing fails.
pub fn generate_to_file(module: &Module, path: &Path) -> Result<(), CodegenError> {
    generate_to_file_with_options(module, GeneratorOptions::default(), path)
}

/// Generates Rust code for a module with the given options and writes it
/// to `path`.
///
/// # Errors
/// Returns `CodegenError` if generation or writing fails.
pub fn generate_to_file_with_options(
    module: &Module,
    options: GeneratorOptions,
    path: &Path,
) -> Result<(), CodegenError> {
    let code = generate_with_options(module, options)?;
    if path.exists() {
        warn!(path = %path.display(), "replacing generated file");
    }
    fs::write(path, code)?;
    Ok(())
}

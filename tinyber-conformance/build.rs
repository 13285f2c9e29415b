use std::path::PathBuf;
use std::{env, fs};

use tinyber_schema::Module;

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let schema_dir = PathBuf::from(&manifest_dir).join("schemas");

    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-changed={}", schema_dir.display());

    let mut schemas: Vec<PathBuf> = fs::read_dir(&schema_dir)
        .expect("failed to read schemas directory")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    schemas.sort();

    for path in schemas {
        println!("cargo::rerun-if-changed={}", path.display());

        let json = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
        let module = Module::from_json(&json)
            .unwrap_or_else(|e| panic!("invalid module {}: {}", path.display(), e));

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .expect("schema file name is not UTF-8");
        let dest = out_dir.join(format!("{}.rs", stem));
        tinyber_codegen::generate_to_file(&module, &dest)
            .unwrap_or_else(|e| panic!("code generation failed for {}: {}", path.display(), e));
    }
}

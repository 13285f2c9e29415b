//! Generate Rust BER codecs from a schema module.
//!
//! Run with: `cargo run --bin tinyber-gen -- schemas/shapes.json -o shapes.rs`

use clap::Parser;
use tinyber::cli::{Cli, run};

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

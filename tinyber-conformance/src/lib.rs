//! # TinyBER Conformance
//!
//! Types generated at build time from `schemas/*.json`, one module per
//! schema file. The integration tests under `tests/` drive them through the
//! runtime to check wire bytes, bound enforcement and round-tripping.

/// Points, paths, markers and shapes.
pub mod shapes {
    include!(concat!(env!("OUT_DIR"), "/shapes.rs"));
}

/// A four-level tree of bounded fan-out and a signed ENUMERATED.
pub mod trees {
    include!(concat!(env!("OUT_DIR"), "/trees.rs"));
}

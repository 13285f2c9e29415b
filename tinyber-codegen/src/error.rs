//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema tree or module is malformed.
    #[error("schema error: {0}")]
    Schema(#[from] tinyber_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },

    /// Two names map to the same Rust identifier.
    #[error("identifier '{ident}' is generated twice in '{type_name}'")]
    DuplicateIdent {
        /// Enclosing type name.
        type_name: String,
        /// Colliding identifier.
        ident: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}

//! Walker output consumed by code generation.
//!
//! A [`Module`] is the ordered list of named [`TypeDefinition`]s a schema
//! walker produces. The order respects dependencies: a reference to a type
//! only follows that type's own definition.

use crate::error::SchemaError;
use crate::types::Node;
use crate::validation::validate_module;
use serde::{Deserialize, Serialize};

/// Ordered set of type definitions for one schema module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module name.
    pub name: String,
    /// Definitions in emission order.
    pub definitions: Vec<TypeDefinition>,
}

impl Module {
    /// Creates an empty module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions: Vec::new(),
        }
    }

    /// Appends a definition, keeping walker order.
    #[must_use]
    pub fn with_definition(mut self, definition: TypeDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Parses a module from its JSON form.
    ///
    /// # Errors
    /// Returns [`SchemaError::Json`] if the input does not describe a module.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Looks up a definition by type name.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&TypeDefinition> {
        self.definitions.iter().find(|d| d.type_name == type_name)
    }

    /// Validates every definition and cross-reference.
    ///
    /// # Errors
    /// Returns the first `SchemaError` found.
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_module(self)
    }
}

/// A named binding of a type to its node tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Type name.
    pub type_name: String,
    /// Declaration as written in the schema, kept for documentation.
    #[serde(default)]
    pub declared_form: String,
    /// Fully resolved node tree.
    pub node: Node,
}

impl TypeDefinition {
    /// Creates a type definition.
    #[must_use]
    pub fn new(type_name: impl Into<String>, declared_form: impl Into<String>, node: Node) -> Self {
        Self {
            type_name: type_name.into(),
            declared_form: declared_form.into(),
            node,
        }
    }
}

/// Rust keywords that need a raw identifier when used as a field name.
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "yield",
];

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c == '-' || c == '_' {
            if !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 && !result.ends_with('_') {
            result.push('_');
        }
        result.push(c.to_ascii_lowercase());
    }
    result
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Converts a field name to a usable Rust field identifier.
#[must_use]
pub fn field_ident(s: &str) -> String {
    let snake = to_snake_case(s);
    if KEYWORDS.contains(&snake.as_str()) {
        format!("r#{}", snake)
    } else {
        snake
    }
}

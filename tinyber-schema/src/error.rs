//! Error types for schema trees and modules.

use thiserror::Error;

/// Error type for malformed schema trees.
///
/// Every variant is fatal for a generation run: the generator stops rather
/// than emit code for a tree that would miscompile or misencode.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Primitive kind outside INTEGER, OCTET STRING and BOOLEAN.
    #[error("unknown primitive type '{kind}'")]
    UnknownPrimitive {
        /// Kind name as supplied.
        kind: String,
    },

    /// Child count does not match the variant's arity.
    #[error("{node}: expected {expected} sub-nodes, found {actual}")]
    Arity {
        /// Node name.
        node: String,
        /// Required child count.
        expected: usize,
        /// Actual child count.
        actual: usize,
    },

    /// Attribute tuple is inconsistent.
    #[error("{node}: malformed attributes: {message}")]
    MalformedAttrs {
        /// Node name.
        node: String,
        /// Description of the problem.
        message: String,
    },

    /// Label appears twice in a field list or tag table.
    #[error("{node}: duplicate label '{label}'")]
    DuplicateLabel {
        /// Node name.
        node: String,
        /// Repeated label.
        label: String,
    },

    /// Tag or value appears twice in a tag table.
    #[error("{node}: duplicate tag {tag}")]
    DuplicateTag {
        /// Node name.
        node: String,
        /// Repeated tag.
        tag: i64,
    },

    /// Context tag does not fit a single identifier octet.
    #[error("{node}: tag {tag} exceeds {max}")]
    TagOutOfRange {
        /// Node name.
        node: String,
        /// Offending tag.
        tag: u32,
        /// Largest allowed tag.
        max: u8,
    },

    /// SEQUENCE, CHOICE or ENUMERATED below the root of a definition.
    #[error("{node} nested inside {parent} must be hoisted into its own definition")]
    NestedConstruct {
        /// Nested node name.
        node: String,
        /// Enclosing node name.
        parent: String,
    },

    /// Type defined twice in one module.
    #[error("duplicate definition of '{name}'")]
    DuplicateDefinition {
        /// Type name.
        name: String,
    },

    /// Reference to a type not defined earlier in the module.
    #[error("'{referenced_by}' references '{name}' before it is defined")]
    UndefinedReference {
        /// Referenced type name.
        name: String,
        /// Referencing definition.
        referenced_by: String,
    },

    /// A definition references itself, directly or through its children.
    #[error("'{name}' references itself and has no finite encoded size")]
    RecursiveReference {
        /// Definition name.
        name: String,
    },

    /// A reference declares a smaller bound than its target needs.
    #[error("reference to '{name}' declares max size {declared}, target needs {required}")]
    BoundMismatch {
        /// Referenced type name.
        name: String,
        /// Bound carried by the reference.
        declared: usize,
        /// Bound computed from the target.
        required: usize,
    },

    /// JSON input could not be read.
    #[error("invalid module JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    /// Creates a malformed attributes error.
    pub fn malformed(node: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedAttrs {
            node: node.into(),
            message: message.into(),
        }
    }

    /// Creates an arity error.
    pub fn arity(node: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::Arity {
            node: node.into(),
            expected,
            actual,
        }
    }

    /// Creates a duplicate label error.
    pub fn duplicate_label(node: impl Into<String>, label: impl Into<String>) -> Self {
        Self::DuplicateLabel {
            node: node.into(),
            label: label.into(),
        }
    }
}

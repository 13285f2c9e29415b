//! Schema validation utilities.
//!
//! This module checks node trees and whole modules before any code is
//! emitted, so that arity mismatches, unknown primitives and broken tag
//! tables stop a generation run instead of producing wrong code.

use crate::error::SchemaError;
use crate::ir::{Module, TypeDefinition};
use crate::types::{Attrs, Node, PrimitiveKind};
use std::collections::{HashMap, HashSet};
use tinyber_core::types::MAX_LOW_TAG_NUMBER;

/// Validates a module in walker order.
///
/// # Arguments
/// * `module` - The module to validate
///
/// # Errors
/// Returns `SchemaError` for a duplicate definition, a malformed node, or a
/// reference to a type not defined earlier. A definition may not reference
/// itself, since its encoded size would be unbounded.
pub fn validate_module(module: &Module) -> Result<(), SchemaError> {
    let mut seen: HashMap<&str, &TypeDefinition> = HashMap::new();

    for def in &module.definitions {
        if seen.contains_key(def.type_name.as_str()) {
            return Err(SchemaError::DuplicateDefinition {
                name: def.type_name.clone(),
            });
        }
        validate_node(&def.node)?;
        validate_references(&def.node, def, &seen)?;
        seen.insert(def.type_name.as_str(), def);
    }

    Ok(())
}

/// Validates a node tree rooted at a definition.
///
/// # Errors
/// Returns `SchemaError` describing the first problem found.
pub fn validate_node(node: &Node) -> Result<(), SchemaError> {
    validate_tree(node, None)
}

fn validate_tree(node: &Node, parent: Option<&Node>) -> Result<(), SchemaError> {
    if let Some(parent) = parent {
        if node.variant().is_named_construct() {
            return Err(SchemaError::NestedConstruct {
                node: node.name().to_string(),
                parent: parent.name().to_string(),
            });
        }
    }

    validate_attrs(node)?;

    for sub in &node.subs {
        validate_tree(sub, Some(node))?;
    }

    Ok(())
}

fn validate_attrs(node: &Node) -> Result<(), SchemaError> {
    match &node.attrs {
        Attrs::Primitive { min, max, .. } => {
            expect_arity(node, 0)?;
            match node.primitive_kind()? {
                PrimitiveKind::Integer => {
                    if let (Some(min), Some(max)) = (min, max) {
                        check_order(node, *min, *max)?;
                    }
                }
                PrimitiveKind::OctetString => {
                    let (min, max) = node.octet_string_range()?;
                    check_order(node, min, max)?;
                }
                PrimitiveKind::Boolean => {}
            }
        }
        Attrs::Sequence { fields, .. } => {
            expect_arity(node, fields.len())?;
            check_unique(node, fields)?;
        }
        Attrs::SequenceOf { .. } => {
            expect_arity(node, 1)?;
            let (min, max) = node.count_range()?;
            check_order(node, min, max)?;
        }
        Attrs::Choice { fields, tags, .. } => {
            expect_arity(node, fields.len())?;
            if fields.is_empty() {
                return Err(SchemaError::malformed(node.name(), "no alternatives"));
            }
            if tags.len() != fields.len() {
                return Err(SchemaError::malformed(
                    node.name(),
                    format!("{} tags for {} alternatives", tags.len(), fields.len()),
                ));
            }
            check_unique(node, fields)?;
            if let Some(&tag) = tags.iter().find(|&&tag| tag > u32::from(MAX_LOW_TAG_NUMBER)) {
                return Err(SchemaError::TagOutOfRange {
                    node: node.name().to_string(),
                    tag,
                    max: MAX_LOW_TAG_NUMBER,
                });
            }
            node.tag_map()?;
        }
        Attrs::Enumerated { alternatives } => {
            expect_arity(node, 0)?;
            if alternatives.is_empty() {
                return Err(SchemaError::malformed(node.name(), "no alternatives"));
            }
            node.tag_map()?;
        }
        Attrs::Defined { type_name, .. } => {
            expect_arity(node, 0)?;
            if type_name.is_empty() {
                return Err(SchemaError::malformed(node.name(), "empty type name"));
            }
        }
    }
    Ok(())
}

fn validate_references(
    node: &Node,
    def: &TypeDefinition,
    seen: &HashMap<&str, &TypeDefinition>,
) -> Result<(), SchemaError> {
    if let Attrs::Defined {
        type_name,
        max_size,
    } = &node.attrs
    {
        if type_name == &def.type_name {
            return Err(SchemaError::RecursiveReference {
                name: def.type_name.clone(),
            });
        }
        let target = seen
            .get(type_name.as_str())
            .ok_or_else(|| SchemaError::UndefinedReference {
                name: type_name.clone(),
                referenced_by: def.type_name.clone(),
            })?;
        let required = target.node.max_size()?;
        if *max_size < required {
            return Err(SchemaError::BoundMismatch {
                name: type_name.clone(),
                declared: *max_size,
                required,
            });
        }
    }

    for sub in &node.subs {
        validate_references(sub, def, seen)?;
    }
    Ok(())
}

fn expect_arity(node: &Node, expected: usize) -> Result<(), SchemaError> {
    if node.subs.len() == expected {
        Ok(())
    } else {
        Err(SchemaError::arity(node.name(), expected, node.subs.len()))
    }
}

fn check_order<T: PartialOrd + std::fmt::Display>(
    node: &Node,
    min: T,
    max: T,
) -> Result<(), SchemaError> {
    if min > max {
        return Err(SchemaError::malformed(
            node.name(),
            format!("lower bound {} exceeds upper bound {}", min, max),
        ));
    }
    Ok(())
}

fn check_unique(node: &Node, names: &[String]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(SchemaError::duplicate_label(node.name(), name.as_str()));
        }
    }
    Ok(())
}

//! Schema node definitions.
//!
//! This module contains the closed set of schema constructs a generator
//! works from: primitives, SEQUENCE, SEQUENCE OF, CHOICE, ENUMERATED and
//! references to other definitions. Each [`Node`] pairs variant-specific
//! attributes with an ordered list of child nodes.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tinyber_core::types::{integer_width, tlv_overhead};

/// Encoded size of a BOOLEAN unit.
const BOOLEAN_SIZE: usize = 3;

/// One schema construct and its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Variant-specific attributes.
    pub attrs: Attrs,
    /// Child nodes: field types for SEQUENCE and CHOICE, the element type
    /// for SEQUENCE OF, empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subs: Vec<Node>,
}

/// Variant-specific attributes of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attrs {
    /// INTEGER, OCTET STRING or BOOLEAN.
    ///
    /// INTEGER bounds constrain the value; OCTET STRING bounds constrain
    /// the length in bytes.
    Primitive {
        /// Primitive kind name as written in the schema.
        #[serde(rename = "type")]
        type_name: String,
        /// Lower bound.
        #[serde(default)]
        min: Option<i64>,
        /// Upper bound.
        #[serde(default)]
        max: Option<i64>,
    },
    /// SEQUENCE with named fields, one sub-node per field.
    Sequence {
        /// Type name.
        name: String,
        /// Field names in declaration order.
        fields: Vec<String>,
    },
    /// SEQUENCE OF with a single element sub-node.
    SequenceOf {
        /// Minimum element count.
        #[serde(default)]
        min: Option<usize>,
        /// Maximum element count.
        #[serde(default)]
        max: Option<usize>,
    },
    /// CHOICE between alternatives, one sub-node per alternative.
    Choice {
        /// Type name.
        name: String,
        /// Alternative names in declaration order.
        fields: Vec<String>,
        /// Context tag number of each alternative.
        tags: Vec<u32>,
    },
    /// ENUMERATED label set.
    Enumerated {
        /// `(label, value)` pairs in declaration order.
        alternatives: Vec<(String, i64)>,
    },
    /// Reference to another definition.
    Defined {
        /// Referenced type name.
        type_name: String,
        /// Bound on the referenced type's encoding.
        max_size: usize,
    },
}

/// Discriminant of [`Attrs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Primitive type.
    Primitive,
    /// SEQUENCE.
    Sequence,
    /// SEQUENCE OF.
    SequenceOf,
    /// CHOICE.
    Choice,
    /// ENUMERATED.
    Enumerated,
    /// Defined type reference.
    Defined,
}

/// Capabilities a variant declares to the definition-level generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantInfo {
    /// Parent construct label, if the variant has one.
    pub parent_class: Option<&'static str>,
    /// Decoding goes through tag dispatch instead of a standalone routine.
    pub no_decoder: bool,
    /// Encoding goes through tag dispatch instead of a standalone routine.
    pub no_encoder: bool,
}

impl Variant {
    /// Returns the capability descriptor of this variant.
    #[must_use]
    pub const fn info(self) -> VariantInfo {
        match self {
            Self::Sequence => VariantInfo {
                parent_class: Some("SEQUENCE"),
                no_decoder: false,
                no_encoder: false,
            },
            Self::Choice => VariantInfo {
                parent_class: Some("CHOICE"),
                no_decoder: true,
                no_encoder: true,
            },
            Self::Enumerated => VariantInfo {
                parent_class: Some("ENUMERATED"),
                no_decoder: true,
                no_encoder: true,
            },
            Self::Primitive | Self::SequenceOf | Self::Defined => VariantInfo {
                parent_class: None,
                no_decoder: false,
                no_encoder: false,
            },
        }
    }

    /// Returns true for constructs that need their own named declaration.
    #[must_use]
    pub const fn is_named_construct(self) -> bool {
        matches!(self, Self::Sequence | Self::Choice | Self::Enumerated)
    }
}

/// Primitive kinds with a runtime codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// INTEGER.
    Integer,
    /// OCTET STRING.
    OctetString,
    /// BOOLEAN.
    Boolean,
}

impl PrimitiveKind {
    /// Returns the ASN.1 name.
    #[must_use]
    pub const fn asn1_name(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::OctetString => "OCTET STRING",
            Self::Boolean => "BOOLEAN",
        }
    }
}

impl FromStr for PrimitiveKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INTEGER" => Ok(Self::Integer),
            "OCTET STRING" => Ok(Self::OctetString),
            "BOOLEAN" => Ok(Self::Boolean),
            other => Err(SchemaError::UnknownPrimitive {
                kind: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.asn1_name())
    }
}

impl Attrs {
    /// Returns the variant discriminant.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Primitive { .. } => Variant::Primitive,
            Self::Sequence { .. } => Variant::Sequence,
            Self::SequenceOf { .. } => Variant::SequenceOf,
            Self::Choice { .. } => Variant::Choice,
            Self::Enumerated { .. } => Variant::Enumerated,
            Self::Defined { .. } => Variant::Defined,
        }
    }
}

impl Node {
    /// Creates a primitive node from a kind name and optional bounds.
    #[must_use]
    pub fn primitive(type_name: impl Into<String>, min: Option<i64>, max: Option<i64>) -> Self {
        Self::leaf(Attrs::Primitive {
            type_name: type_name.into(),
            min,
            max,
        })
    }

    /// Creates an `INTEGER (min..max)` node.
    #[must_use]
    pub fn integer(min: i64, max: i64) -> Self {
        Self::primitive("INTEGER", Some(min), Some(max))
    }

    /// Creates an `OCTET STRING (SIZE (min..max))` node.
    #[must_use]
    pub fn octet_string(min: i64, max: i64) -> Self {
        Self::primitive("OCTET STRING", Some(min), Some(max))
    }

    /// Creates a `BOOLEAN` node.
    #[must_use]
    pub fn boolean() -> Self {
        Self::primitive("BOOLEAN", None, None)
    }

    /// Creates a SEQUENCE node from `(field name, field type)` pairs.
    #[must_use]
    pub fn sequence<S: Into<String>>(name: impl Into<String>, fields: Vec<(S, Node)>) -> Self {
        let (names, subs) = fields
            .into_iter()
            .map(|(field, node)| (field.into(), node))
            .unzip();
        Self {
            attrs: Attrs::Sequence {
                name: name.into(),
                fields: names,
            },
            subs,
        }
    }

    /// Creates a `SEQUENCE (SIZE (min..max)) OF element` node.
    #[must_use]
    pub fn sequence_of(min: usize, max: usize, element: Node) -> Self {
        Self {
            attrs: Attrs::SequenceOf {
                min: Some(min),
                max: Some(max),
            },
            subs: vec![element],
        }
    }

    /// Creates a CHOICE node from `(alternative name, tag, type)` triples.
    #[must_use]
    pub fn choice<S: Into<String>>(name: impl Into<String>, alternatives: Vec<(S, u32, Node)>) -> Self {
        let mut fields = Vec::with_capacity(alternatives.len());
        let mut tags = Vec::with_capacity(alternatives.len());
        let mut subs = Vec::with_capacity(alternatives.len());
        for (field, tag, node) in alternatives {
            fields.push(field.into());
            tags.push(tag);
            subs.push(node);
        }
        Self {
            attrs: Attrs::Choice {
                name: name.into(),
                fields,
                tags,
            },
            subs,
        }
    }

    /// Creates an ENUMERATED node from `(label, value)` pairs.
    #[must_use]
    pub fn enumerated<S: Into<String>>(alternatives: Vec<(S, i64)>) -> Self {
        Self::leaf(Attrs::Enumerated {
            alternatives: alternatives
                .into_iter()
                .map(|(label, value)| (label.into(), value))
                .collect(),
        })
    }

    /// Creates a reference to another definition.
    #[must_use]
    pub fn defined(type_name: impl Into<String>, max_size: usize) -> Self {
        Self::leaf(Attrs::Defined {
            type_name: type_name.into(),
            max_size,
        })
    }

    fn leaf(attrs: Attrs) -> Self {
        Self {
            attrs,
            subs: Vec::new(),
        }
    }

    /// Returns the variant discriminant.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.attrs.variant()
    }

    /// Returns the capability descriptor of this node's variant.
    #[must_use]
    pub const fn info(&self) -> VariantInfo {
        self.attrs.variant().info()
    }

    /// Returns the name this node is known by in tag tables and messages.
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.attrs {
            Attrs::Primitive { type_name, .. } | Attrs::Defined { type_name, .. } => type_name.as_str(),
            Attrs::Sequence { name, .. } | Attrs::Choice { name, .. } => name.as_str(),
            Attrs::SequenceOf { .. } => "SEQUENCE OF",
            Attrs::Enumerated { .. } => "ENUMERATED",
        }
    }

    /// Resolves the primitive kind of a primitive node.
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownPrimitive`] for an unrecognised kind, or
    /// [`SchemaError::MalformedAttrs`] if this is not a primitive node.
    pub fn primitive_kind(&self) -> Result<PrimitiveKind, SchemaError> {
        match &self.attrs {
            Attrs::Primitive { type_name, .. } => type_name.parse(),
            _ => Err(SchemaError::malformed(self.name(), "not a primitive")),
        }
    }

    /// Returns the element node of a SEQUENCE OF.
    ///
    /// # Errors
    /// Returns [`SchemaError::Arity`] unless there is exactly one sub-node.
    pub fn element(&self) -> Result<&Node, SchemaError> {
        match self.subs.as_slice() {
            [element] => Ok(element),
            other => Err(SchemaError::arity(self.name(), 1, other.len())),
        }
    }

    /// Returns the inclusive INTEGER value range, defaulting to the full
    /// 64-bit range for a missing bound.
    #[must_use]
    pub fn integer_range(&self) -> (i64, i64) {
        match &self.attrs {
            Attrs::Primitive { min, max, .. } => (min.unwrap_or(i64::MIN), max.unwrap_or(i64::MAX)),
            _ => (i64::MIN, i64::MAX),
        }
    }

    /// Returns the inclusive OCTET STRING length range.
    ///
    /// # Errors
    /// Returns [`SchemaError::MalformedAttrs`] if the upper bound is missing
    /// or a bound is negative.
    pub fn octet_string_range(&self) -> Result<(usize, usize), SchemaError> {
        let Attrs::Primitive { min, max, .. } = &self.attrs else {
            return Err(SchemaError::malformed(self.name(), "not a primitive"));
        };
        let max = max.ok_or_else(|| SchemaError::malformed(self.name(), "missing size upper bound"))?;
        let min = min.unwrap_or(0);
        let to_len = |bound: i64| {
            usize::try_from(bound)
                .map_err(|_| SchemaError::malformed(self.name(), format!("negative size bound {}", bound)))
        };
        Ok((to_len(min)?, to_len(max)?))
    }

    /// Returns the inclusive SEQUENCE OF element count range.
    ///
    /// # Errors
    /// Returns [`SchemaError::MalformedAttrs`] if the upper bound is missing.
    pub fn count_range(&self) -> Result<(usize, usize), SchemaError> {
        match &self.attrs {
            Attrs::SequenceOf { min, max } => {
                let max = max.ok_or_else(|| SchemaError::malformed(self.name(), "missing size upper bound"))?;
                Ok((min.unwrap_or(0), max))
            }
            _ => Err(SchemaError::malformed(self.name(), "not a SEQUENCE OF")),
        }
    }

    /// Builds the two-way tag table of a CHOICE or ENUMERATED node.
    ///
    /// CHOICE tables are keyed by alternative type name, ENUMERATED tables
    /// by label.
    ///
    /// # Errors
    /// Returns an error for duplicate labels or tags, mismatched list
    /// lengths, or a node that has no tag table.
    pub fn tag_map(&self) -> Result<TagMap, SchemaError> {
        match &self.attrs {
            Attrs::Choice { name, tags, .. } => {
                if tags.len() != self.subs.len() {
                    return Err(SchemaError::arity(name.as_str(), tags.len(), self.subs.len()));
                }
                TagMap::new(
                    name.as_str(),
                    self.subs
                        .iter()
                        .zip(tags)
                        .map(|(sub, &tag)| (sub.name().to_string(), i64::from(tag))),
                )
            }
            Attrs::Enumerated { alternatives } => TagMap::new(self.name(), alternatives.iter().cloned()),
            _ => Err(SchemaError::malformed(self.name(), "no tag table")),
        }
    }

    /// Computes the upper bound in bytes on this node's encoding.
    ///
    /// # Errors
    /// Returns an error if the node is malformed or the bound overflows.
    pub fn max_size(&self) -> Result<usize, SchemaError> {
        match &self.attrs {
            Attrs::Primitive { .. } => match self.primitive_kind()? {
                PrimitiveKind::Integer => {
                    let (min, max) = self.integer_range();
                    let width = integer_width(min).max(integer_width(max));
                    Ok(tlv_overhead(width) + width)
                }
                PrimitiveKind::OctetString => {
                    let (_, max) = self.octet_string_range()?;
                    wrap(self, max)
                }
                PrimitiveKind::Boolean => Ok(BOOLEAN_SIZE),
            },
            Attrs::Sequence { .. } => {
                let mut content = 0usize;
                for sub in &self.subs {
                    content = content
                        .checked_add(sub.max_size()?)
                        .ok_or_else(|| overflow(self))?;
                }
                wrap(self, content)
            }
            Attrs::SequenceOf { .. } => {
                let (_, max) = self.count_range()?;
                let content = self
                    .element()?
                    .max_size()?
                    .checked_mul(max)
                    .ok_or_else(|| overflow(self))?;
                wrap(self, content)
            }
            Attrs::Choice { .. } => {
                let mut widest = 0;
                for sub in &self.subs {
                    widest = widest.max(sub.max_size()?);
                }
                wrap(self, widest)
            }
            Attrs::Enumerated { alternatives } => {
                let width = alternatives
                    .iter()
                    .map(|(_, value)| integer_width(*value))
                    .max()
                    .unwrap_or(1);
                Ok(tlv_overhead(width) + width)
            }
            Attrs::Defined { max_size, .. } => Ok(*max_size),
        }
    }
}

fn wrap(node: &Node, content: usize) -> Result<usize, SchemaError> {
    content
        .checked_add(tlv_overhead(content))
        .ok_or_else(|| overflow(node))
}

fn overflow(node: &Node) -> SchemaError {
    SchemaError::malformed(node.name(), "size bound overflows")
}

/// Bijective mapping between labels and wire tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMap {
    pairs: Vec<(String, i64)>,
    forward: HashMap<String, i64>,
    inverse: HashMap<i64, String>,
}

impl TagMap {
    /// Builds a table from `(label, tag)` pairs.
    ///
    /// # Errors
    /// Returns [`SchemaError::DuplicateLabel`] or
    /// [`SchemaError::DuplicateTag`] if the mapping is not bijective.
    pub fn new(
        node: &str,
        pairs: impl IntoIterator<Item = (String, i64)>,
    ) -> Result<Self, SchemaError> {
        let mut map = Self {
            pairs: Vec::new(),
            forward: HashMap::new(),
            inverse: HashMap::new(),
        };
        for (label, tag) in pairs {
            if map.forward.contains_key(&label) {
                return Err(SchemaError::duplicate_label(node, label));
            }
            if map.inverse.contains_key(&tag) {
                return Err(SchemaError::DuplicateTag {
                    node: node.to_string(),
                    tag,
                });
            }
            map.forward.insert(label.clone(), tag);
            map.inverse.insert(tag, label.clone());
            map.pairs.push((label, tag));
        }
        Ok(map)
    }

    /// Looks up the tag of a label.
    #[must_use]
    pub fn forward(&self, label: &str) -> Option<i64> {
        self.forward.get(label).copied()
    }

    /// Looks up the label of a tag.
    #[must_use]
    pub fn inverse(&self, tag: i64) -> Option<&str> {
        self.inverse.get(&tag).map(String::as_str)
    }

    /// Returns the pairs in declaration order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, i64)] {
        &self.pairs
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

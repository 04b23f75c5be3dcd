#![deny(missing_docs)]

//! # Shape Classification
//!
//! Predicates over untyped schema maps, plus a one-shot classification into
//! [`SchemaShape`] so callers dispatch once instead of re-probing keys.

use crate::oas::models::SchemaNode;
use serde::Serialize;
use serde_json::Value;

/// The structural kind of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaShape {
    /// `type: object` or has `properties`.
    Object,
    /// `type: array` or has `items`.
    Array,
    /// Has `allOf`.
    AllOf,
    /// Has `anyOf` (and no `allOf`).
    AnyOf,
    /// Has `oneOf` (and neither `allOf` nor `anyOf`).
    OneOf,
    /// A primitive `type` (string, number, integer, boolean, null).
    Scalar,
    /// Nothing recognizable, e.g. `{}` or a bare `$ref`.
    Unknown,
}

impl SchemaShape {
    /// The combinator keyword for combinator shapes.
    pub fn combinator_keyword(self) -> Option<&'static str> {
        match self {
            SchemaShape::AllOf => Some("allOf"),
            SchemaShape::AnyOf => Some("anyOf"),
            SchemaShape::OneOf => Some("oneOf"),
            _ => None,
        }
    }

    /// True for `AllOf`, `AnyOf` and `OneOf`.
    pub fn is_combinator(self) -> bool {
        self.combinator_keyword().is_some()
    }
}

/// Combinator keywords in tie-break order: the first present one wins.
pub const COMBINATOR_KEYWORDS: [&str; 3] = ["allOf", "anyOf", "oneOf"];

/// Classifies a schema node.
///
/// Combinators take precedence over object/array signals, so a schema with both
/// `allOf` and `properties` classifies as `AllOf`.
pub fn classify(schema: &SchemaNode) -> SchemaShape {
    match combinator_keyword(schema) {
        Some("allOf") => return SchemaShape::AllOf,
        Some("anyOf") => return SchemaShape::AnyOf,
        Some(_) => return SchemaShape::OneOf,
        None => {}
    }
    if is_schema_object(schema) {
        return SchemaShape::Object;
    }
    if is_schema_array(schema) {
        return SchemaShape::Array;
    }
    match schema.get("type").and_then(Value::as_str) {
        Some("string" | "number" | "integer" | "boolean" | "null") => SchemaShape::Scalar,
        _ => SchemaShape::Unknown,
    }
}

/// Returns the first combinator keyword present, in `allOf`, `anyOf`, `oneOf` order.
pub fn combinator_keyword(schema: &SchemaNode) -> Option<&'static str> {
    COMBINATOR_KEYWORDS
        .into_iter()
        .find(|k| schema.contains_key(*k))
}

/// `type: array` or has `items`.
pub fn is_schema_array(schema: &SchemaNode) -> bool {
    has_type(schema, "array") || schema.contains_key("items")
}

/// `type: object` or has `properties`.
pub fn is_schema_object(schema: &SchemaNode) -> bool {
    has_type(schema, "object") || schema.contains_key("properties")
}

/// Object-like or carries `allOf`.
pub fn is_object_or_all_of(schema: &SchemaNode) -> bool {
    is_schema_object(schema) || schema.contains_key("allOf")
}

/// Object-like or carries any combinator.
pub fn is_object_or_any_combinator(schema: &SchemaNode) -> bool {
    is_schema_object(schema) || combinator_keyword(schema).is_some()
}

/// Whether `name` is listed in the schema's `required` array.
pub fn is_required_property(schema: &SchemaNode, name: &str) -> bool {
    schema
        .get("required")
        .and_then(Value::as_array)
        .is_some_and(|req| req.iter().any(|v| v.as_str() == Some(name)))
}

fn has_type(schema: &SchemaNode, ty: &str) -> bool {
    schema.get("type").and_then(Value::as_str) == Some(ty)
}

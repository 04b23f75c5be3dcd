#![deny(missing_docs)]

//! # Property Union
//!
//! Extracts the property mapping of object-shaped parameter schemas, unioning
//! `allOf` members that are bare property bags.

use crate::error::{AppError, AppResult};
use crate::oas::models::SchemaNode;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;

/// Unions the entries of every `allOf` member into one property map.
///
/// Later members overwrite earlier ones on key collision. A member declaring
/// `type: object` is rejected: in parameter position only bare property bags
/// are accepted.
pub fn resolve_all_of(schemas: &[SchemaNode]) -> AppResult<IndexMap<String, SchemaNode>> {
    let mut properties = IndexMap::new();
    for schema in schemas {
        if schema.get("type").and_then(Value::as_str) == Some("object") {
            return Err(AppError::UnsupportedCombinatorShape {
                schema: Value::Object(schema.clone()).to_string(),
            });
        }
        collect_entries(schema, &mut properties);
    }
    Ok(properties)
}

/// Returns the property map of an object or `allOf` schema.
///
/// Plain schemas yield a copy of `properties` (empty when absent).
pub fn properties_of(schema: &SchemaNode) -> AppResult<IndexMap<String, SchemaNode>> {
    if let Some(all_of) = schema.get("allOf") {
        let members: Vec<SchemaNode> = all_of
            .as_array()
            .map(|arr| arr.iter().filter_map(as_node).collect())
            .unwrap_or_default();
        return resolve_all_of(&members);
    }

    let mut properties = IndexMap::new();
    if let Some(props) = schema.get("properties").and_then(Value::as_object) {
        collect_entries(props, &mut properties);
    }
    Ok(properties)
}

fn collect_entries(source: &SchemaNode, into: &mut IndexMap<String, SchemaNode>) {
    for (key, value) in source {
        match value {
            Value::Object(node) => {
                into.insert(key.clone(), node.clone());
            }
            other => warn!(property = %key, value = %other, "skipping non-schema property entry"),
        }
    }
}

fn as_node(value: &Value) -> Option<SchemaNode> {
    match value {
        Value::Object(node) => Some(node.clone()),
        other => {
            warn!(member = %other, "skipping non-object allOf member");
            None
        }
    }
}

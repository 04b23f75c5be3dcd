#![deny(missing_docs)]

//! # Fake Schemas
//!
//! Flattens combinator schemas for validators that cannot evaluate
//! `allOf` / `anyOf` / `oneOf` themselves.
//!
//! The combinator keyword is renamed to `x-<keyword>` and holds the resolved
//! member schemas, so combinator-aware consumers can still dispatch on them.
//! Properties of object-shaped members are lifted into the root `properties`
//! map. Direct `properties` entries and `items` are dereferenced one level
//! deep; nothing is flattened recursively.

use crate::error::AppResult;
use crate::oas::models::SchemaNode;
use crate::oas::resolver::SchemaResolver;
use crate::oas::shape::{combinator_keyword, is_schema_object};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

/// Builds the fake schema of `schema`.
///
/// The caller's node is never modified. When several combinators are present
/// only the first in `allOf`, `anyOf`, `oneOf` order is flattened; the others
/// are left untouched.
pub fn generate_fake_schema<R>(schema: &SchemaNode, resolver: &R) -> AppResult<SchemaNode>
where
    R: SchemaResolver + ?Sized,
{
    let mut fake = resolver.resolve_if_needed(schema)?;

    if let Some(keyword) = combinator_keyword(&fake) {
        let members = fake.shift_remove(keyword).unwrap_or(Value::Null);
        let processed = flatten_members(&mut fake, keyword, members, resolver)?;
        fake.insert(format!("x-{keyword}"), Value::Array(processed));
    }

    if let Some(Value::Object(props)) = fake.get_mut("properties") {
        for (name, prop) in props.iter_mut() {
            trace!(property = %name, "resolving property schema");
            *prop = resolver.resolve_value(prop)?;
        }
    }

    if let Some(items) = fake.get_mut("items") {
        *items = resolver.resolve_value(items)?;
    }

    Ok(fake)
}

/// Whether per-instance `anyOf` / `oneOf` dispatch is still needed downstream.
///
/// Only `allOf` is fully expressed by the lifted properties.
pub fn is_fake_schema_any_of_or_one_of(fake_schema: &SchemaNode) -> bool {
    fake_schema.contains_key("x-anyOf") || fake_schema.contains_key("x-oneOf")
}

fn flatten_members<R>(
    root: &mut SchemaNode,
    keyword: &str,
    members: Value,
    resolver: &R,
) -> AppResult<Vec<Value>>
where
    R: SchemaResolver + ?Sized,
{
    let Value::Array(members) = members else {
        warn!(keyword, "combinator value is not an array, dropping it");
        return Ok(Vec::new());
    };
    debug!(keyword, members = members.len(), "flattening combinator");

    let mut processed = Vec::with_capacity(members.len());
    for member in members {
        let Value::Object(member) = member else {
            warn!(keyword, member = %member, "keeping non-object combinator member as is");
            processed.push(member);
            continue;
        };
        let resolved = resolver.resolve_if_needed(&member)?;
        if is_schema_object(&resolved) {
            lift_properties(root, &resolved);
        }
        processed.push(Value::Object(resolved));
    }
    Ok(processed)
}

/// Copies the member's properties into the root. Root entries win.
fn lift_properties(root: &mut SchemaNode, member: &SchemaNode) {
    if !root.contains_key("type") {
        root.insert("type".to_string(), Value::String("object".to_string()));
    }

    let Some(member_props) = member.get("properties").and_then(Value::as_object) else {
        return;
    };

    let root_props = root
        .entry("properties")
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(root_props) = root_props else {
        warn!("root `properties` is not an object, member properties not lifted");
        return;
    };
    for (name, prop) in member_props {
        if !root_props.contains_key(name) {
            root_props.insert(name.clone(), prop.clone());
        }
    }
}

#![deny(missing_docs)]

//! # Schema Resolution
//!
//! The `$ref` dereferencing capability consumed by the flattener, and an
//! implementation backed by a single loaded OpenAPI document.
//!
//! Only local references (`#/...`) are resolved. No file or network access is
//! performed while resolving.

use crate::error::{AppError, AppResult};
use crate::oas::models::SchemaNode;
use crate::oas::pointer::JsonPointer;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Dereferences schema nodes.
///
/// Implementations must be idempotent: a node without `$ref` comes back
/// unchanged, and resolving the same reference twice yields the same schema.
pub trait SchemaResolver {
    /// Returns the dereferenced form of `node`.
    fn resolve_if_needed(&self, node: &SchemaNode) -> AppResult<SchemaNode>;

    /// Resolves a JSON value, passing non-object values through.
    fn resolve_value(&self, value: &Value) -> AppResult<Value> {
        match value {
            Value::Object(node) => self.resolve_if_needed(node).map(Value::Object),
            other => Ok(other.clone()),
        }
    }
}

/// Returns every node unchanged. For documents that carry no references.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl SchemaResolver for IdentityResolver {
    fn resolve_if_needed(&self, node: &SchemaNode) -> AppResult<SchemaNode> {
        Ok(node.clone())
    }
}

/// Resolves local `$ref`s against one OpenAPI document.
#[derive(Debug, Clone)]
pub struct DocumentResolver {
    document: Value,
}

impl DocumentResolver {
    /// Wraps an already parsed document.
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// Parses a YAML (or JSON) document.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        let document: Value = serde_yaml::from_str(yaml)
            .map_err(|e| AppError::General(format!("Failed to parse OpenAPI YAML: {}", e)))?;
        Ok(Self::new(document))
    }

    /// Reads and parses a document from disk.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// The underlying document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Looks up the node at `pointer` in the document.
    pub fn lookup(&self, pointer: &JsonPointer) -> AppResult<&Value> {
        pointer
            .query(&self.document)
            .ok_or_else(|| AppError::UnresolvableReference(format!("#{}", pointer)))
    }

    fn target_of(&self, reference: &str) -> AppResult<&SchemaNode> {
        if !reference.starts_with('#') {
            return Err(AppError::UnresolvableReference(format!(
                "{} (only local references are supported)",
                reference
            )));
        }
        let pointer = JsonPointer::from_uri_fragment(reference)?;
        self.lookup(&pointer)?.as_object().ok_or_else(|| {
            AppError::UnresolvableReference(format!(
                "{} does not point to a schema object",
                reference
            ))
        })
    }
}

impl SchemaResolver for DocumentResolver {
    fn resolve_if_needed(&self, node: &SchemaNode) -> AppResult<SchemaNode> {
        let mut current = node.clone();
        let mut visited = HashSet::new();

        while let Some(reference) = current.get("$ref").and_then(Value::as_str).map(str::to_owned) {
            if !visited.insert(reference.clone()) {
                return Err(AppError::UnresolvableReference(format!(
                    "{} (circular reference chain)",
                    reference
                )));
            }
            debug!(reference = %reference, "resolving schema reference");

            let mut resolved = self.target_of(&reference)?.clone();
            // Keywords next to `$ref` are kept and override the target.
            for (key, value) in current.into_iter().filter(|(k, _)| k != "$ref") {
                resolved.insert(key, value);
            }
            current = resolved;
        }

        Ok(current)
    }
}

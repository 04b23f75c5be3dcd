#![deny(missing_docs)]

//! # Service Extensions
//!
//! Reconciles the service-binding vendor extension declared on a Path Item
//! with the one declared on each of its operations.
//!
//! The extension is either a plain address string or an options object. The
//! resolution order is:
//! 1. operation string, path string or absent: the operation value wins
//! 2. path absent: the operation value (possibly absent) wins
//! 3. path options, operation string: the string is the address, path options are overlaid
//! 4. path string, operation options: the path string fills a missing address
//! 5. both options: deep merge, operation keys win
//! 6. operation absent: the path value wins

use crate::error::{AppError, AppResult};
use crate::oas::models::SchemaNode;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Delivery option keys kept by [`sanitize_delivery_options`].
pub const DELIVERY_OPTION_KEYS: [&str; 2] = ["timeout", "headers"];

/// A service-binding extension value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtensionValue {
    /// A bare service address.
    Address(String),
    /// Structured delivery options, possibly holding an address.
    Options(Map<String, Value>),
}

impl ExtensionValue {
    /// Reads `key` from a Path Item or Operation object.
    ///
    /// Absent and `null` read as `None`. Anything other than a string or an
    /// object is ignored with a warning and also reads as `None`.
    pub fn read(model: &SchemaNode, key: &str) -> AppResult<Option<Self>> {
        match model.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(Self::Address(s.clone()))),
            Some(Value::Object(m)) => Ok(Some(Self::Options(m.clone()))),
            Some(other) => {
                warn!(
                    extension = key,
                    value = %other,
                    "ignoring extension that is neither a string nor an object"
                );
                Ok(None)
            }
        }
    }

    /// Converts back to a JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Address(s) => Value::String(s.clone()),
            Self::Options(m) => Value::Object(m.clone()),
        }
    }

    /// The address: the string itself, or the string under `address_key`.
    pub fn address(&self, address_key: &str) -> Option<&str> {
        match self {
            Self::Address(s) => Some(s),
            Self::Options(m) => m.get(address_key).and_then(Value::as_str),
        }
    }
}

/// Merges the path-level and operation-level `extension_key` values.
///
/// Returns `None` when neither level declares the extension. Fails with
/// `ConflictingExtensionField` when a path-level options object declares
/// `method_key` while the operation supplies only an address.
pub fn merge_service_extension(
    extension_key: &str,
    address_key: &str,
    method_key: &str,
    path_model: &SchemaNode,
    operation_model: &SchemaNode,
) -> AppResult<Option<ExtensionValue>> {
    let path_ext = ExtensionValue::read(path_model, extension_key)?;
    let op_ext = ExtensionValue::read(operation_model, extension_key)?;

    use ExtensionValue::{Address, Options};
    let merged = match (path_ext, op_ext) {
        (None | Some(Address(_)), Some(Address(op))) => Some(Address(op)),
        (None, op) => op,
        (Some(Options(path)), Some(Address(op))) => {
            if path.contains_key(method_key) {
                return Err(AppError::ConflictingExtensionField {
                    extension: extension_key.to_string(),
                    field: method_key.to_string(),
                });
            }
            let mut result = Map::new();
            result.insert(address_key.to_string(), Value::String(op));
            for (k, v) in path {
                result.insert(k, v);
            }
            Some(Options(result))
        }
        (Some(Address(path)), Some(Options(mut op))) => {
            if !op.contains_key(address_key) {
                op.insert(address_key.to_string(), Value::String(path));
            }
            Some(Options(op))
        }
        (Some(Options(mut path)), Some(Options(op))) => {
            deep_merge(&mut path, op);
            Some(Options(path))
        }
        (path, None) => path,
    };

    debug!(
        extension = extension_key,
        resolved = merged.is_some(),
        "merged service extension"
    );
    Ok(merged)
}

/// Keeps only the recognized delivery options (`timeout`, `headers`).
pub fn sanitize_delivery_options(options: &Map<String, Value>) -> Map<String, Value> {
    DELIVERY_OPTION_KEYS
        .iter()
        .filter_map(|k| options.get(*k).map(|v| (k.to_string(), v.clone())))
        .collect()
}

/// Overlays `overlay` onto `base`; nested objects merge, anything else is replaced.
fn deep_merge(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        if let Value::Object(incoming) = value {
            if let Some(Value::Object(existing)) = base.get_mut(&key) {
                deep_merge(existing, incoming);
                continue;
            }
            base.insert(key, Value::Object(incoming));
        } else {
            base.insert(key, value);
        }
    }
}

//! # Configuration
//!
//! Settings for service-binding resolution and parameter handling, loadable
//! from YAML or JSON.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default vendor extension carrying service bindings.
pub const DEFAULT_EXTENSION_KEY: &str = "x-vertx-event-bus";
/// Default key of the address inside an options object.
pub const DEFAULT_ADDRESS_KEY: &str = "address";
/// Default key of the operation-specific method field.
pub const DEFAULT_METHOD_KEY: &str = "method";

/// Configuration for building operation plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BindingConfig {
    /// Vendor extension read at the path and operation level.
    #[serde(default = "default_extension_key")]
    pub extension_key: String,
    /// Key of the address inside an options object.
    #[serde(default = "default_address_key")]
    pub address_key: String,
    /// Operation-only key; a path-level options object must not declare it.
    #[serde(default = "default_method_key")]
    pub method_key: String,
    /// Reduce delivery options to `timeout` and `headers`.
    #[serde(default = "default_true")]
    pub sanitize_delivery_options: bool,
    /// Treat an unknown parameter `in` as an error rather than "no style".
    #[serde(default = "default_true")]
    pub strict_parameter_location: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            extension_key: default_extension_key(),
            address_key: default_address_key(),
            method_key: default_method_key(),
            sanitize_delivery_options: true,
            strict_parameter_location: true,
        }
    }
}

impl BindingConfig {
    /// Parses a YAML (or JSON) configuration document.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Loads a configuration file. `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::General(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Self::from_yaml_str(&content),
        }
    }
}

fn default_extension_key() -> String {
    DEFAULT_EXTENSION_KEY.to_string()
}

fn default_address_key() -> String {
    DEFAULT_ADDRESS_KEY.to_string()
}

fn default_method_key() -> String {
    DEFAULT_METHOD_KEY.to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = BindingConfig::default();
        assert_eq!(cfg.extension_key, "x-vertx-event-bus");
        assert_eq!(cfg.address_key, "address");
        assert_eq!(cfg.method_key, "method");
        assert!(cfg.sanitize_delivery_options);
        assert!(cfg.strict_parameter_location);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "extensionKey: x-service\nstrictParameterLocation: false\n";
        let cfg = BindingConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.extension_key, "x-service");
        assert_eq!(cfg.address_key, "address");
        assert!(!cfg.strict_parameter_location);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(BindingConfig::from_yaml_str("{}").unwrap(), BindingConfig::default());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = BindingConfig::from_yaml_str("extensionKay: typo\n").unwrap_err();
        assert!(matches!(err, AppError::Yaml(_)));
    }
}

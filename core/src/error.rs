//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Wrapped library errors convert through `?`. The schema-level variants are
/// constructed explicitly and carry the offending key or fragment so callers
/// can print an actionable diagnostic.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML parsing errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A compiled content-type pattern was rejected by the regex engine.
    #[display("Regex Error: {_0}")]
    Regex(regex::Error),

    /// An `allOf` member used as a parameter property bag declares `type: object`.
    #[from(ignore)]
    #[display(
        "Unsupported combinator shape: allOf allows only inner object types in parameters. \
         Schema: {schema}"
    )]
    UnsupportedCombinatorShape {
        /// The encoded offending member schema.
        schema: String,
    },

    /// The path-level extension declares a field reserved for operations.
    #[from(ignore)]
    #[display("Extension {extension} in path declaration must not contain {field}")]
    ConflictingExtensionField {
        /// The extension key, e.g. `x-vertx-event-bus`.
        extension: String,
        /// The forbidden field, e.g. `method`.
        field: String,
    },

    /// `ancestor` is not a prefix of `descendant`.
    #[from(ignore)]
    #[display("Invalid pointer range: '{ancestor}' is not an ancestor of '{descendant}'")]
    InvalidPointerRange {
        /// The longer pointer.
        descendant: String,
        /// The pointer expected to prefix `descendant`.
        ancestor: String,
    },

    /// A parameter's `in` is none of `query`, `header`, `path`, `cookie`.
    #[from(ignore)]
    #[display("Parameter '{name}' has invalid location '{location}'")]
    InvalidParameterLocation {
        /// Parameter name (empty when absent).
        name: String,
        /// The rejected `in` value.
        location: String,
    },

    /// Malformed JSON Pointer syntax.
    #[from(ignore)]
    #[display("Invalid JSON pointer: {_0}")]
    InvalidPointer(String),

    /// A `$ref` that could not be dereferenced.
    #[from(ignore)]
    #[display("Unresolvable reference: {_0}")]
    UnresolvableReference(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

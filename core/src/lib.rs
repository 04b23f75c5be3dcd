#![deny(missing_docs)]

//! # OASNorm Core
//!
//! Turns `$ref`-laden, combinator-heavy OpenAPI schemas into flat "fake"
//! schemas for validator generators, and resolves the per-operation metadata
//! those generators need: parameter styles, content-type matchers, sanitized
//! handler names and merged service-binding extensions.

/// Shared error types.
pub mod error;

/// Binding configuration.
pub mod config;

/// OpenAPI (OAS) normalization.
pub mod oas;

pub use config::BindingConfig;
pub use error::{AppError, AppResult};
pub use oas::{
    classify, compile_content_type_pattern, flatten_at, generate_fake_schema,
    is_fake_schema_any_of_or_one_of, merge_service_extension, plan_document, plan_operations,
    pointer_difference, properties_of, resolve_all_of, resolve_explode, resolve_style,
    sanitize_operation_id, ContentTypeMatcher, DocumentResolver, ExtensionValue,
    IdentityResolver, JsonPointer, OperationPlan, ParamLocation, ParamStyle,
    ParameterDescriptor, SchemaNode, SchemaResolver, SchemaShape,
};

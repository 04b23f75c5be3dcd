#![deny(missing_docs)]

//! # OpenAPI Normalization Module
//!
//! - **shape**: structural classification of schema nodes.
//! - **params**: `style` / `explode` defaulting.
//! - **content_type**: content-type keys compiled to regexes.
//! - **properties**: property maps of object and `allOf` schemas.
//! - **fake_schema**: combinator flattening.
//! - **pointer**: JSON Pointers and pointer differences.
//! - **extension**: service-binding extension merging.
//! - **naming**: operation id sanitization.
//! - **resolver**: `$ref` dereferencing.
//! - **plan**: per-operation aggregation over a whole document.

pub mod content_type;
pub mod extension;
pub mod fake_schema;
pub mod models;
pub mod naming;
pub mod params;
pub mod plan;
pub mod pointer;
pub mod properties;
pub mod resolver;
pub mod shape;

pub use content_type::{compile_content_type_pattern, ContentTypeMatcher};
pub use extension::{merge_service_extension, sanitize_delivery_options, ExtensionValue};
pub use fake_schema::{generate_fake_schema, is_fake_schema_any_of_or_one_of};
pub use models::{ParamLocation, ParamStyle, ParameterDescriptor, SchemaNode};
pub use naming::sanitize_operation_id;
pub use params::{resolve_explode, resolve_style};
pub use plan::{flatten_at, plan_document, plan_operations, OperationPlan};
pub use pointer::{pointer_difference, JsonPointer};
pub use properties::{properties_of, resolve_all_of};
pub use resolver::{DocumentResolver, IdentityResolver, SchemaResolver};
pub use shape::{classify, SchemaShape};

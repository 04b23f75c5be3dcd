#![deny(missing_docs)]

//! # Operation Plans
//!
//! Walks the `paths` of an OpenAPI document and gathers, per operation, what a
//! validator/router generator needs: resolved parameter styles, content-type
//! matchers with fake schemas, and the merged service binding.

use crate::config::BindingConfig;
use crate::error::{AppError, AppResult};
use crate::oas::content_type::compile_content_type_pattern;
use crate::oas::extension::{merge_service_extension, sanitize_delivery_options, ExtensionValue};
use crate::oas::fake_schema::{generate_fake_schema, is_fake_schema_any_of_or_one_of};
use crate::oas::models::{ParamStyle, ParameterDescriptor, SchemaNode};
use crate::oas::naming::{derive_handler_name, sanitize_operation_id};
use crate::oas::params::{
    resolve_explode, resolve_explode_lenient, resolve_style, resolve_style_lenient,
};
use crate::oas::pointer::{pointer_difference, JsonPointer};
use crate::oas::properties::properties_of;
use crate::oas::resolver::{DocumentResolver, SchemaResolver};
use crate::oas::shape::{classify, is_object_or_all_of, is_required_property, SchemaShape};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// HTTP methods of a Path Item, in declaration order.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Everything derived for one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationPlan {
    /// URL template, e.g. `/users/{id}`.
    pub path: String,
    /// Lower-case HTTP method.
    pub method: String,
    /// The declared `operationId`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Identifier-safe handler name.
    pub handler: String,
    /// Path-level and operation-level parameters, merged.
    pub parameters: Vec<ParameterPlan>,
    /// One entry per request body content type.
    pub request_body: Vec<MediaTypePlan>,
    /// The merged service binding, if any level declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceBinding>,
}

/// A resolved parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterPlan {
    /// Parameter name.
    pub name: String,
    /// Raw `in` value.
    pub location: String,
    /// Resolved style; `None` only in lenient mode for an unknown location.
    pub style: Option<ParamStyle>,
    /// Resolved explode flag.
    pub explode: bool,
    /// Whether the parameter is required.
    pub required: bool,
    /// Shape of the resolved schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<SchemaShape>,
    /// Properties of object / `allOf` parameter schemas.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyPlan>,
}

/// One property of an object-shaped parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyPlan {
    /// Property name.
    pub name: String,
    /// Listed in the schema's `required`.
    pub required: bool,
}

/// A request body media type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTypePlan {
    /// The content-type key as declared.
    pub content_type: String,
    /// Unanchored regex source matching the declared type(s).
    pub pattern: String,
    /// Location of the schema relative to the operation.
    pub schema_pointer: String,
    /// Shape of the resolved schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<SchemaShape>,
    /// The flattened schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fake_schema: Option<SchemaNode>,
    /// `anyOf` / `oneOf` members still need per-instance dispatch.
    pub needs_combinator_dispatch: bool,
}

/// The service an operation is bound to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBinding {
    /// Target address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Target method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Delivery options.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub delivery_options: Map<String, Value>,
    /// The merged extension value.
    pub extension: ExtensionValue,
}

impl ServiceBinding {
    /// Splits a merged extension into address, method and delivery options.
    pub fn from_extension(extension: ExtensionValue, config: &BindingConfig) -> Self {
        match &extension {
            ExtensionValue::Address(address) => Self {
                address: Some(address.clone()),
                method: None,
                delivery_options: Map::new(),
                extension,
            },
            ExtensionValue::Options(options) => {
                let delivery_options = if config.sanitize_delivery_options {
                    sanitize_delivery_options(options)
                } else {
                    options
                        .iter()
                        .filter(|(k, _)| **k != config.address_key && **k != config.method_key)
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect()
                };
                Self {
                    address: str_field(options, &config.address_key),
                    method: str_field(options, &config.method_key),
                    delivery_options,
                    extension,
                }
            }
        }
    }
}

/// Builds the plans of every operation of the resolver's document.
pub fn plan_document(
    resolver: &DocumentResolver,
    config: &BindingConfig,
) -> AppResult<Vec<OperationPlan>> {
    plan_operations(resolver.document(), resolver, config)
}

/// Builds the plans of every operation under `document.paths`.
pub fn plan_operations<R>(
    document: &Value,
    resolver: &R,
    config: &BindingConfig,
) -> AppResult<Vec<OperationPlan>>
where
    R: SchemaResolver + ?Sized,
{
    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        warn!("document has no `paths` object");
        return Ok(Vec::new());
    };

    let mut plans = Vec::new();
    for (path, item) in paths {
        let Value::Object(item) = item else {
            warn!(path = %path, "skipping non-object path item");
            continue;
        };
        let item = resolver.resolve_if_needed(item)?;
        let path_pointer = JsonPointer::root().append("paths").append(path.as_str());
        let path_params = resolve_parameter_list(item.get("parameters"), resolver, config, path)?;

        for method in HTTP_METHODS {
            let Some(Value::Object(operation)) = item.get(method) else {
                continue;
            };
            let op_pointer = path_pointer.append(method);
            plans.push(plan_operation(
                path,
                method,
                &item,
                operation,
                &op_pointer,
                &path_params,
                resolver,
                config,
            )?);
        }
    }
    Ok(plans)
}

/// The fake schema of the schema at `pointer`.
pub fn flatten_at(resolver: &DocumentResolver, pointer: &JsonPointer) -> AppResult<SchemaNode> {
    let node = resolver.lookup(pointer)?.as_object().ok_or_else(|| {
        AppError::General(format!("Value at '{}' is not a schema object", pointer))
    })?;
    generate_fake_schema(node, resolver)
}

#[allow(clippy::too_many_arguments)]
fn plan_operation<R>(
    path: &str,
    method: &str,
    path_item: &SchemaNode,
    operation: &SchemaNode,
    op_pointer: &JsonPointer,
    path_params: &[ParameterPlan],
    resolver: &R,
    config: &BindingConfig,
) -> AppResult<OperationPlan>
where
    R: SchemaResolver + ?Sized,
{
    let operation_id = operation
        .get("operationId")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let handler = match &operation_id {
        Some(id) => sanitize_operation_id(id),
        None => {
            let derived = derive_handler_name(method, path);
            warn!(
                path,
                method,
                handler = %derived,
                "operation has no operationId, deriving handler name"
            );
            derived
        }
    };

    let op_params = resolve_parameter_list(operation.get("parameters"), resolver, config, path)?;
    let parameters = merge_parameters(path_params, op_params);

    let request_body = match operation.get("requestBody") {
        Some(body) => plan_request_body(body, op_pointer, resolver)?,
        None => Vec::new(),
    };

    let service = merge_service_extension(
        &config.extension_key,
        &config.address_key,
        &config.method_key,
        path_item,
        operation,
    )?
    .map(|ext| ServiceBinding::from_extension(ext, config));

    debug!(path, method, handler = %handler, params = parameters.len(), "planned operation");
    Ok(OperationPlan {
        path: path.to_string(),
        method: method.to_string(),
        operation_id,
        handler,
        parameters,
        request_body,
        service,
    })
}

fn resolve_parameter_list<R>(
    params: Option<&Value>,
    resolver: &R,
    config: &BindingConfig,
    path: &str,
) -> AppResult<Vec<ParameterPlan>>
where
    R: SchemaResolver + ?Sized,
{
    let Some(params) = params.and_then(Value::as_array) else {
        return Ok(Vec::new());
    };
    params
        .iter()
        .filter_map(Value::as_object)
        .map(|param| {
            let resolved = resolver.resolve_if_needed(param)?;
            plan_parameter(resolved, resolver, config, path)
        })
        .collect()
}

fn plan_parameter<R>(
    param: SchemaNode,
    resolver: &R,
    config: &BindingConfig,
    path: &str,
) -> AppResult<ParameterPlan>
where
    R: SchemaResolver + ?Sized,
{
    let desc: ParameterDescriptor = serde_json::from_value(Value::Object(param)).map_err(|e| {
        AppError::General(format!("Invalid parameter in path '{}': {}", path, e))
    })?;

    let (style, explode) = if config.strict_parameter_location {
        (Some(resolve_style(&desc)?), resolve_explode(&desc)?)
    } else {
        (resolve_style_lenient(&desc), resolve_explode_lenient(&desc))
    };

    let schema = match &desc.schema {
        Some(Value::Object(schema)) => Some(resolve_schema_members(schema, resolver)?),
        _ => None,
    };
    let shape = schema.as_ref().map(classify);
    let properties = match &schema {
        Some(schema) if is_object_or_all_of(schema) => properties_of(schema)?
            .into_keys()
            .map(|name| PropertyPlan {
                required: is_required_property(schema, &name),
                name,
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(ParameterPlan {
        name: desc.name.clone().unwrap_or_default(),
        location: desc.location.clone(),
        style,
        explode,
        required: desc.required,
        shape,
        properties,
    })
}

/// Resolves the schema and, for `allOf`, each of its members.
fn resolve_schema_members<R>(schema: &SchemaNode, resolver: &R) -> AppResult<SchemaNode>
where
    R: SchemaResolver + ?Sized,
{
    let mut resolved = resolver.resolve_if_needed(schema)?;
    if let Some(Value::Array(members)) = resolved.get_mut("allOf") {
        for member in members.iter_mut() {
            *member = resolver.resolve_value(member)?;
        }
    }
    Ok(resolved)
}

/// Operation parameters override path parameters with the same name and location.
fn merge_parameters(
    path_params: &[ParameterPlan],
    op_params: Vec<ParameterPlan>,
) -> Vec<ParameterPlan> {
    let mut merged = path_params.to_vec();
    for param in op_params {
        match merged
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(existing) => *existing = param,
            None => merged.push(param),
        }
    }
    merged
}

fn plan_request_body<R>(
    body: &Value,
    op_pointer: &JsonPointer,
    resolver: &R,
) -> AppResult<Vec<MediaTypePlan>>
where
    R: SchemaResolver + ?Sized,
{
    let body = resolver.resolve_value(body)?;
    let Some(content) = body.get("content").and_then(Value::as_object) else {
        return Ok(Vec::new());
    };

    let content_pointer = op_pointer.append("requestBody").append("content");
    let mut plans = Vec::with_capacity(content.len());
    for (content_type, media) in content {
        let schema_pointer = content_pointer.append(content_type.as_str()).append("schema");
        let relative = pointer_difference(&schema_pointer, op_pointer)?;

        let fake_schema = match media.get("schema") {
            Some(Value::Object(schema)) => Some(generate_fake_schema(schema, resolver)?),
            _ => None,
        };
        plans.push(MediaTypePlan {
            content_type: content_type.clone(),
            pattern: compile_content_type_pattern(content_type),
            schema_pointer: relative.to_string(),
            shape: fake_schema.as_ref().map(classify),
            needs_combinator_dispatch: fake_schema
                .as_ref()
                .is_some_and(is_fake_schema_any_of_or_one_of),
            fake_schema,
        });
    }
    Ok(plans)
}

fn str_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "openapi": "3.0.3",
            "paths": {
                "/users/{id}": {
                    "x-vertx-event-bus": {"address": "users.svc", "timeout": 1000, "extra": 1},
                    "parameters": [
                        {
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": {"type": "string"}
                        },
                        {"name": "trace", "in": "header", "schema": {"type": "string"}}
                    ],
                    "get": {
                        "operationId": "get-user_by id",
                        "parameters": [
                            {"name": "trace", "in": "header", "style": "simple", "explode": true,
                             "schema": {"type": "string"}},
                            {"$ref": "#/components/parameters/Filter"}
                        ]
                    },
                    "put": {
                        "x-vertx-event-bus": {"method": "replaceUser", "timeout": 50},
                        "requestBody": {"$ref": "#/components/requestBodies/UserBody"}
                    }
                }
            },
            "components": {
                "parameters": {
                    "Filter": {
                        "name": "filter", "in": "query", "style": "deepObject",
                        "schema": {
                            "allOf": [
                                {"$ref": "#/components/schemas/NameFilter"},
                                {"age": {"type": "integer"}}
                            ]
                        }
                    }
                },
                "requestBodies": {
                    "UserBody": {
                        "content": {
                            "application/json": {"schema": {"$ref": "#/components/schemas/User"}},
                            "text/*": {"schema": {"type": "string"}}
                        }
                    }
                },
                "schemas": {
                    "NameFilter": {"name": {"type": "string"}},
                    "User": {
                        "oneOf": [
                            {"type": "object", "properties": {"name": {"type": "string"}}},
                            {"type": "object", "properties": {"nick": {"type": "string"}}}
                        ]
                    }
                }
            }
        })
    }

    fn plans() -> Vec<OperationPlan> {
        let resolver = DocumentResolver::new(doc());
        plan_document(&resolver, &BindingConfig::default()).unwrap()
    }

    #[test]
    fn test_operations_in_declaration_order() {
        let plans = plans();
        let methods: Vec<_> = plans.iter().map(|p| p.method.as_str()).collect();
        assert_eq!(methods, vec!["get", "put"]);
        assert_eq!(plans[0].handler, "getUserById");
        assert_eq!(plans[1].operation_id, None);
        assert_eq!(plans[1].handler, "putUsersId");
    }

    #[test]
    fn test_parameters_merge_and_resolve() {
        let get = &plans()[0];
        let names: Vec<_> = get.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "trace", "filter"]);

        let trace = &get.parameters[1];
        assert!(trace.explode, "operation-level override should win");

        let filter = &get.parameters[2];
        assert_eq!(filter.style, Some(ParamStyle::DeepObject));
        assert!(!filter.explode);
        assert_eq!(filter.shape, Some(SchemaShape::AllOf));
        let props: Vec<_> = filter.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(props, vec!["name", "age"]);
    }

    #[test]
    fn test_request_body_media_types() {
        let put = &plans()[1];
        assert_eq!(put.request_body.len(), 2);

        let json_body = &put.request_body[0];
        assert_eq!(json_body.pattern, "application/json");
        assert_eq!(json_body.schema_pointer, "/requestBody/content/application~1json/schema");
        assert!(json_body.needs_combinator_dispatch);
        let fake = json_body.fake_schema.as_ref().unwrap();
        assert!(fake.contains_key("x-oneOf"));

        let text_body = &put.request_body[1];
        assert_eq!(text_body.pattern, r"text\/.*");
        assert_eq!(text_body.shape, Some(SchemaShape::Scalar));
        assert!(!text_body.needs_combinator_dispatch);
    }

    #[test]
    fn test_service_bindings() {
        let plans = plans();
        let get = plans[0].service.as_ref().unwrap();
        assert_eq!(get.address.as_deref(), Some("users.svc"));
        assert_eq!(get.method, None);
        assert_eq!(Value::Object(get.delivery_options.clone()), json!({"timeout": 1000}));

        let put = plans[1].service.as_ref().unwrap();
        assert_eq!(put.address.as_deref(), Some("users.svc"));
        assert_eq!(put.method.as_deref(), Some("replaceUser"));
        assert_eq!(put.delivery_options["timeout"], 50);
    }

    #[test]
    fn test_unsanitized_delivery_options_keep_extra_keys() {
        let config = BindingConfig {
            sanitize_delivery_options: false,
            ..BindingConfig::default()
        };
        let resolver = DocumentResolver::new(doc());
        let plans = plan_document(&resolver, &config).unwrap();
        let get = plans[0].service.as_ref().unwrap();
        assert_eq!(get.delivery_options["extra"], 1);
        assert!(!get.delivery_options.contains_key("address"));
    }

    #[test]
    fn test_unknown_location_strict_and_lenient() {
        let document = json!({"paths": {"/q": {"get": {
            "operationId": "q",
            "parameters": [{"name": "raw", "in": "querystring"}]
        }}}});
        let resolver = DocumentResolver::new(document);

        let err = plan_document(&resolver, &BindingConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::InvalidParameterLocation { .. }));

        let lenient = BindingConfig {
            strict_parameter_location: false,
            ..BindingConfig::default()
        };
        let plans = plan_document(&resolver, &lenient).unwrap();
        assert_eq!(plans[0].parameters[0].style, None);
        assert!(!plans[0].parameters[0].explode);
    }

    #[test]
    fn test_conflicting_path_method_propagates() {
        let document = json!({"paths": {"/a": {
            "x-vertx-event-bus": {"method": "nope"},
            "get": {"operationId": "a", "x-vertx-event-bus": "svc"}
        }}});
        let resolver = DocumentResolver::new(document);
        let err = plan_document(&resolver, &BindingConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::ConflictingExtensionField { .. }));
    }

    #[test]
    fn test_flatten_at() {
        let resolver = DocumentResolver::new(doc());
        let pointer = JsonPointer::parse("/components/schemas/User").unwrap();
        let fake = flatten_at(&resolver, &pointer).unwrap();
        assert!(is_fake_schema_any_of_or_one_of(&fake));
        let props = fake["properties"].as_object().unwrap();
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["name", "nick"]);
    }

    #[test]
    fn test_missing_paths_is_empty() {
        let resolver = DocumentResolver::new(json!({"openapi": "3.0.0"}));
        assert!(plan_document(&resolver, &BindingConfig::default()).unwrap().is_empty());
    }
}

use oasnorm_core::{
    generate_fake_schema, pointer_difference, properties_of, AppError, IdentityResolver,
    JsonPointer, SchemaNode,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn node(v: Value) -> SchemaNode {
    v.as_object().cloned().unwrap()
}

#[test]
fn test_bare_property_bags_union() {
    let schema = node(json!({
        "allOf": [
            {"a": {"type": "string"}},
            {"b": {"type": "integer"}},
            {"c": {"type": "boolean"}}
        ]
    }));
    let props = properties_of(&schema).unwrap();
    let names: Vec<_> = props.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_object_typed_member_rejected() {
    let schema = node(json!({
        "allOf": [
            {"a": {"type": "string"}},
            {"type": "object", "properties": {"b": {"type": "integer"}}}
        ]
    }));
    let err = properties_of(&schema).unwrap_err();
    assert!(matches!(err, AppError::UnsupportedCombinatorShape { .. }));
}

#[test]
fn test_flattening_plain_schema_is_stable() {
    let schema = node(json!({
        "type": "object",
        "properties": {"a": {"type": "string"}},
        "items": {"type": "integer"}
    }));
    let once = generate_fake_schema(&schema, &IdentityResolver).unwrap();
    let twice = generate_fake_schema(&once, &IdentityResolver).unwrap();
    assert_eq!(once, schema);
    assert_eq!(twice, once);
}

#[test]
fn test_object_members_union_into_fake_properties() {
    let schema = node(json!({
        "allOf": [
            {"properties": {"a": {"type": "string"}}},
            {"properties": {"b": {"type": "integer"}}}
        ]
    }));
    let fake = generate_fake_schema(&schema, &IdentityResolver).unwrap();
    assert_eq!(
        fake["properties"],
        json!({"a": {"type": "string"}, "b": {"type": "integer"}})
    );
}

#[test]
fn test_pointer_difference_for_nested_schema() {
    let descendant = JsonPointer::parse("/definitions/hello/properties/a").unwrap();
    let ancestor = JsonPointer::parse("/definitions/hello").unwrap();
    assert_eq!(
        pointer_difference(&descendant, &ancestor).unwrap().to_string(),
        "/properties/a"
    );
    assert!(matches!(
        pointer_difference(&ancestor, &descendant).unwrap_err(),
        AppError::InvalidPointerRange { .. }
    ));
}

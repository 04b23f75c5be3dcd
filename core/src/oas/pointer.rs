#![deny(missing_docs)]

//! # JSON Pointers
//!
//! RFC 6901 pointers, used to address nested schemas and to compute relative
//! locations for error reporting.

use crate::error::{AppError, AppResult};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A parsed JSON Pointer. The empty pointer addresses the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// The root pointer (`""`).
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses the string form, e.g. `/components/schemas/User`.
    pub fn parse(s: &str) -> AppResult<Self> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = s.strip_prefix('/') else {
            return Err(AppError::InvalidPointer(format!(
                "'{}' must be empty or start with '/'",
                s
            )));
        };
        let tokens = rest.split('/').map(unescape_token).collect();
        Ok(Self { tokens })
    }

    /// Parses the URI fragment form used by `$ref`, e.g. `#/components/schemas/User%20Profile`.
    pub fn from_uri_fragment(fragment: &str) -> AppResult<Self> {
        let body = fragment.strip_prefix('#').unwrap_or(fragment);
        let decoded = percent_decode_str(body).decode_utf8_lossy();
        Self::parse(&decoded)
    }

    /// The unescaped reference tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether this is the root pointer.
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Appends one (unescaped) reference token.
    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// Returns a new pointer extended by `token`.
    pub fn append(&self, token: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.push(token);
        next
    }

    /// Whether `self` is a strict prefix of `other`, token-wise.
    pub fn is_parent_of(&self, other: &JsonPointer) -> bool {
        self.tokens.len() < other.tokens.len() && other.tokens.starts_with(&self.tokens)
    }

    /// Looks the pointer up in `document`.
    pub fn query<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.tokens.iter().try_fold(document, |node, token| match node {
            Value::Object(map) => map.get(token),
            Value::Array(items) => token.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape_token(token))?;
        }
        Ok(())
    }
}

impl FromStr for JsonPointer {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Strips `ancestor` from the front of `descendant`.
///
/// Works on the canonical string forms:
/// `/definitions/hello/properties/a` - `/definitions/hello` = `/properties/a`.
pub fn pointer_difference(
    descendant: &JsonPointer,
    ancestor: &JsonPointer,
) -> AppResult<JsonPointer> {
    let first = descendant.to_string();
    let second = ancestor.to_string();
    let out_of_range = || AppError::InvalidPointerRange {
        descendant: first.clone(),
        ancestor: second.clone(),
    };

    let suffix = first.strip_prefix(second.as_str()).ok_or_else(out_of_range)?;
    JsonPointer::parse(suffix).map_err(|_| out_of_range())
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
fn unescape_token(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ptr(s: &str) -> JsonPointer {
        JsonPointer::parse(s).unwrap()
    }

    #[test]
    fn test_difference() {
        let diff = pointer_difference(
            &ptr("/definitions/hello/properties/a"),
            &ptr("/definitions/hello"),
        )
        .unwrap();
        assert_eq!(diff.to_string(), "/properties/a");
        assert_eq!(diff.tokens(), ["properties", "a"]);
    }

    #[test]
    fn test_difference_with_itself_is_root() {
        let p = ptr("/a/b");
        assert!(pointer_difference(&p, &p).unwrap().is_root());
    }

    #[test]
    fn test_difference_non_prefix_fails() {
        let err = pointer_difference(&ptr("/definitions/hello"), &ptr("/paths")).unwrap_err();
        assert!(matches!(err, AppError::InvalidPointerRange { .. }));
    }

    #[test]
    fn test_difference_partial_token_fails() {
        // String prefix but not a token boundary: suffix "2" is not a pointer.
        let err = pointer_difference(&ptr("/definitions/hello2"), &ptr("/definitions/hello"))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidPointerRange { .. }));
    }

    #[test]
    fn test_parse_rejects_relative() {
        assert!(matches!(
            JsonPointer::parse("definitions").unwrap_err(),
            AppError::InvalidPointer(_)
        ));
    }

    #[test]
    fn test_escaping_round_trip() {
        let p = ptr("/paths/~1users~1{id}/get");
        assert_eq!(p.tokens()[1], "/users/{id}");
        assert_eq!(p.to_string(), "/paths/~1users~1{id}/get");
    }

    #[test]
    fn test_uri_fragment_percent_decoding() {
        let p =
            JsonPointer::from_uri_fragment("#/components/schemas/User%20Profile~1details").unwrap();
        assert_eq!(p.tokens(), ["components", "schemas", "User Profile/details"]);
    }

    #[test]
    fn test_query_objects_and_arrays() {
        let doc = json!({"a": {"b": [{"c": 1}, {"c": 2}]}});
        assert_eq!(ptr("/a/b/1/c").query(&doc), Some(&json!(2)));
        assert_eq!(ptr("/a/x").query(&doc), None);
        assert_eq!(JsonPointer::root().query(&doc), Some(&doc));
    }

    #[test]
    fn test_parent_and_append() {
        let base = ptr("/definitions");
        let child = base.append("hello");
        assert!(base.is_parent_of(&child));
        assert!(!child.is_parent_of(&base));
        assert!(!child.is_parent_of(&child));
    }
}

#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Derives identifier-safe handler names from OpenAPI `operationId`s.

/// Separators collapsed into a camel-case boundary.
fn is_separator(c: char) -> bool {
    matches!(c, '-' | ' ' | '_')
}

/// Camel-cases an `operationId` across `-`, ` ` and `_` runs.
///
/// The character after a separator run is upper-cased; a trailing run is
/// dropped. Already sanitized ids come back unchanged.
///
/// e.g. `list-all_users` -> `listAllUsers`
pub fn sanitize_operation_id(operation_id: &str) -> String {
    let mut result = String::with_capacity(operation_id.len());
    let mut chars = operation_id.chars().peekable();
    while let Some(c) = chars.next() {
        if !is_separator(c) {
            result.push(c);
            continue;
        }
        while chars.next_if(|&n| is_separator(n)).is_some() {}
        if let Some(next) = chars.next() {
            result.extend(next.to_uppercase());
        }
    }
    result
}

/// Derives a handler name from the HTTP Method and URL path when `operationId` is missing.
///
/// e.g. `GET /users/{id}` -> `getUsersId`
pub fn derive_handler_name(method: &str, path: &str) -> String {
    let clean_path = path.replace(['{', '}'], "").replace('/', "_");
    sanitize_operation_id(&format!("{}_{}", method.to_lowercase(), clean_path.trim_matches('_')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_mixed_runs() {
        assert_eq!(sanitize_operation_id("operation_- A B"), "operationAB");
    }

    #[test]
    fn test_sanitize_drops_trailing_run() {
        assert_eq!(sanitize_operation_id("operation__id-"), "operationId");
        assert_eq!(sanitize_operation_id("op---"), "op");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        assert_eq!(sanitize_operation_id("operationId"), "operationId");
        let once = sanitize_operation_id("list-all users");
        assert_eq!(once, "listAllUsers");
        assert_eq!(sanitize_operation_id(&once), once);
    }

    #[test]
    fn test_sanitize_leading_separator() {
        assert_eq!(sanitize_operation_id("_private"), "Private");
        assert_eq!(sanitize_operation_id(""), "");
    }

    #[test]
    fn test_derive_handler_name() {
        assert_eq!(derive_handler_name("GET", "/users"), "getUsers");
        assert_eq!(
            derive_handler_name("POST", "/users/{id}/activate"),
            "postUsersIdActivate"
        );
    }
}

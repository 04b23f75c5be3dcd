#![deny(missing_docs)]

//! # Content-Type Patterns
//!
//! Compiles the content-type keys of an OpenAPI `content` map, e.g.
//! `application/json`, `text/*` or `a/json, b/xml`, into regular expressions.

use crate::error::AppResult;
use regex::Regex;

/// Compiles a content-type specifier into an unanchored regex source.
///
/// - comma-separated lists become an alternation of quoted literals
/// - `type/*` becomes `quote(type)\/.*`, and `*/*` matches any type
/// - anything else is a single quoted literal
///
/// Empty list entries, e.g. from a trailing comma, are dropped.
pub fn compile_content_type_pattern(spec: &str) -> String {
    if spec.contains(',') {
        return spec
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
    }

    let trimmed = spec.trim();
    if trimmed.ends_with("/*") {
        if let Some(idx) = trimmed.find("/*") {
            let prefix = &trimmed[..idx];
            if prefix == "*" {
                return "[^/]+\\/.*".to_string();
            }
            return format!("{}\\/.*", regex::escape(prefix));
        }
    }

    regex::escape(trimmed)
}

/// A content-type specifier compiled into an anchored matcher.
#[derive(Debug, Clone)]
pub struct ContentTypeMatcher {
    source: String,
    regex: Regex,
}

impl ContentTypeMatcher {
    /// Compiles `spec`, anchoring the pattern at both ends.
    pub fn new(spec: &str) -> AppResult<Self> {
        let source = compile_content_type_pattern(spec);
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self { source, regex })
    }

    /// The unanchored pattern source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether `media_type` belongs to the compiled family.
    pub fn is_match(&self, media_type: &str) -> bool {
        self.regex.is_match(media_type)
    }
}

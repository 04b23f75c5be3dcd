#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Shared representations of the OpenAPI fragments the normalizer reads and
//! the records it hands to downstream generators.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A JSON Schema fragment: an ordered key → value mapping.
pub type SchemaNode = Map<String, Value>;

/// Location of a parameter (`in`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// `query`
    Query,
    /// `header`
    Header,
    /// `path`
    Path,
    /// `cookie`
    Cookie,
}

impl ParamLocation {
    /// Parses an `in` value. Returns `None` for anything outside the four locations.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "path" => Some(Self::Path),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }

    /// The `in` keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter serialization style.
///
/// Explicit styles are passed through verbatim, so values outside the
/// OpenAPI vocabulary survive as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ParamStyle {
    /// `matrix`
    Matrix,
    /// `label`
    Label,
    /// `form`
    Form,
    /// `simple`
    #[default]
    Simple,
    /// `spaceDelimited`
    SpaceDelimited,
    /// `pipeDelimited`
    PipeDelimited,
    /// `deepObject`
    DeepObject,
    /// Any other declared style.
    Other(String),
}

impl ParamStyle {
    /// Maps a declared `style` string.
    pub fn parse(s: &str) -> Self {
        match s {
            "matrix" => Self::Matrix,
            "label" => Self::Label,
            "form" => Self::Form,
            "simple" => Self::Simple,
            "spaceDelimited" => Self::SpaceDelimited,
            "pipeDelimited" => Self::PipeDelimited,
            "deepObject" => Self::DeepObject,
            other => Self::Other(other.to_string()),
        }
    }

    /// The OpenAPI spelling.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Matrix => "matrix",
            Self::Label => "label",
            Self::Form => "form",
            Self::Simple => "simple",
            Self::SpaceDelimited => "spaceDelimited",
            Self::PipeDelimited => "pipeDelimited",
            Self::DeepObject => "deepObject",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for ParamStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ParamStyle {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParamStyle {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// The parameter fields that drive style resolution.
///
/// `in` is kept as a raw string so that an unknown location can be reported
/// rather than failing deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw location (`query`, `header`, `path`, `cookie`).
    #[serde(rename = "in", default)]
    pub location: String,
    /// Declared style.
    #[serde(default)]
    pub style: Option<ParamStyle>,
    /// Declared explode flag.
    #[serde(default)]
    pub explode: Option<bool>,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// The parameter schema, if any.
    #[serde(default)]
    pub schema: Option<Value>,
}

impl ParameterDescriptor {
    /// Builds a descriptor for `name` at `location`.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            location: location.into(),
            ..Self::default()
        }
    }

    /// Sets an explicit style.
    pub fn with_style(mut self, style: &str) -> Self {
        self.style = Some(ParamStyle::parse(style));
        self
    }

    /// Sets an explicit explode flag.
    pub fn with_explode(mut self, explode: bool) -> Self {
        self.explode = Some(explode);
        self
    }
}

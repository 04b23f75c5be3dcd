#![deny(missing_docs)]

//! # Parameter Style Resolution
//!
//! Default resolution logic for `style` / `explode` as laid out by OAS 3.x:
//! `query` and `cookie` default to `form`, `path` and `header` to `simple`,
//! and `explode` defaults to `true` only for `form`.

use crate::error::{AppError, AppResult};
use crate::oas::models::{ParamLocation, ParamStyle, ParameterDescriptor};

/// Resolves the parameter style.
///
/// Priorities:
/// 1. Explicit `style`, verbatim.
/// 2. Default based on `in` location.
///
/// An `in` outside the four OpenAPI locations is `InvalidParameterLocation`.
pub fn resolve_style(param: &ParameterDescriptor) -> AppResult<ParamStyle> {
    if let Some(style) = &param.style {
        return Ok(style.clone());
    }
    let location = ParamLocation::parse(&param.location).ok_or_else(|| {
        AppError::InvalidParameterLocation {
            name: param.name.clone().unwrap_or_default(),
            location: param.location.clone(),
        }
    })?;
    Ok(default_style(location))
}

/// Like [`resolve_style`] but yields `None` for an unknown location instead of failing.
pub fn resolve_style_lenient(param: &ParameterDescriptor) -> Option<ParamStyle> {
    if let Some(style) = &param.style {
        return Some(style.clone());
    }
    ParamLocation::parse(&param.location).map(default_style)
}

/// Resolves the explode property.
///
/// The style is resolved first since the default depends on it:
/// - `style: form` -> true
/// - Others -> false
pub fn resolve_explode(param: &ParameterDescriptor) -> AppResult<bool> {
    let style = resolve_style(param)?;
    Ok(explode_for(param.explode, Some(&style)))
}

/// Like [`resolve_explode`]; an unresolvable style defaults explode to `false`.
pub fn resolve_explode_lenient(param: &ParameterDescriptor) -> bool {
    let style = resolve_style_lenient(param);
    explode_for(param.explode, style.as_ref())
}

/// The style a location uses when none is declared.
pub fn default_style(location: ParamLocation) -> ParamStyle {
    match location {
        ParamLocation::Query | ParamLocation::Cookie => ParamStyle::Form,
        ParamLocation::Path | ParamLocation::Header => ParamStyle::Simple,
    }
}

fn explode_for(explicit: Option<bool>, style: Option<&ParamStyle>) -> bool {
    explicit.unwrap_or(matches!(style, Some(ParamStyle::Form)))
}

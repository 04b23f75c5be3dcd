#![deny(missing_docs)]

//! # Inspection Commands
//!
//! Single-value helpers: operation id sanitization and content-type patterns.

use std::io::Write;

use oasnorm_core::{sanitize_operation_id, ContentTypeMatcher};

use crate::error::CliResult;

/// Arguments for the sanitize command.
#[derive(clap::Args, Debug, Clone)]
pub struct SanitizeArgs {
    /// The raw `operationId`.
    pub operation_id: String,
}

/// Arguments for the content-type command.
#[derive(clap::Args, Debug, Clone)]
pub struct ContentTypeArgs {
    /// Content-type key, e.g. `text/*` or `a/json, b/xml`.
    pub spec: String,

    /// Media types to test against the compiled pattern.
    #[clap(long = "check")]
    pub check: Vec<String>,
}

/// Prints the sanitized operation id.
pub fn sanitize(args: &SanitizeArgs, out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "{}", sanitize_operation_id(&args.operation_id))?;
    Ok(())
}

/// Prints the compiled pattern, then one `<media type>: <matches>` line per `--check`.
pub fn content_type(args: &ContentTypeArgs, out: &mut impl Write) -> CliResult<()> {
    let matcher = ContentTypeMatcher::new(&args.spec)?;
    writeln!(out, "{}", matcher.source())?;
    for media_type in &args.check {
        writeln!(out, "{}: {}", media_type, matcher.is_match(media_type))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        let mut out = Vec::new();
        sanitize(&SanitizeArgs { operation_id: "operation_- A B".into() }, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "operationAB\n");
    }

    #[test]
    fn test_content_type_checks() {
        let args = ContentTypeArgs {
            spec: "text/*".into(),
            check: vec!["text/plain".into(), "application/text".into()],
        };
        let mut out = Vec::new();
        content_type(&args, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "text\\/.*\ntext/plain: true\napplication/text: false\n"
        );
    }
}

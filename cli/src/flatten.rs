#![deny(missing_docs)]

//! # Flatten Command
//!
//! Prints the fake schema of one schema in an OpenAPI document.

use std::io::Write;
use std::path::PathBuf;

use oasnorm_core::{flatten_at, is_fake_schema_any_of_or_one_of, DocumentResolver, JsonPointer};
use serde_json::Value;

use crate::error::{CliError, CliResult};

/// Arguments for the flatten command.
#[derive(clap::Args, Debug, Clone)]
pub struct FlattenArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long, env = "OASNORM_OPENAPI", default_value = "openapi.yaml")]
    pub openapi: PathBuf,

    /// JSON Pointer of the schema, e.g. `/components/schemas/Pet`.
    #[clap(long)]
    pub pointer: String,
}

/// Executes the flatten command, writing pretty JSON to `out`.
pub fn execute(args: &FlattenArgs, out: &mut impl Write) -> CliResult<()> {
    let resolver = DocumentResolver::from_path(&args.openapi)?;
    let pointer = JsonPointer::parse(&args.pointer)?;
    let fake = flatten_at(&resolver, &pointer)?;

    if is_fake_schema_any_of_or_one_of(&fake) {
        tracing::info!(pointer = %pointer, "schema keeps anyOf/oneOf members for dispatch");
    }

    let rendered = serde_json::to_string_pretty(&Value::Object(fake))
        .map_err(|e| CliError::Render(e.to_string()))?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}

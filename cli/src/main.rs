#![deny(missing_docs)]

//! # OASNorm CLI
//!
//! Command Line Interface over the OpenAPI normalizer.
//!
//! Supported Commands:
//! - `flatten`: Prints the fake schema of one schema.
//! - `plan`: Prints per-operation parameter, body and service-binding plans.
//! - `sanitize`: Sanitizes an `operationId`.
//! - `content-type`: Compiles a content-type key into a regex.

use std::io;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod error;
mod flatten;
mod inspect;
mod plan;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI schema normalizer")]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset (e.g. `debug`, `oasnorm_core=trace`).
    #[clap(long, global = true, default_value = "warn")]
    log_level: String,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Flatten the schema at a JSON Pointer into a fake schema.
    Flatten(flatten::FlattenArgs),
    /// Resolve parameters, bodies and service bindings of every operation.
    Plan(plan::PlanArgs),
    /// Sanitize an operationId into a handler identifier.
    Sanitize(inspect::SanitizeArgs),
    /// Compile a content-type key into a regex.
    ContentType(inspect::ContentTypeArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut out = io::stdout().lock();
    match &cli.command {
        Commands::Flatten(args) => flatten::execute(args, &mut out)?,
        Commands::Plan(args) => plan::execute(args, &mut out)?,
        Commands::Sanitize(args) => inspect::sanitize(args, &mut out)?,
        Commands::ContentType(args) => inspect::content_type(args, &mut out)?,
    }

    Ok(())
}

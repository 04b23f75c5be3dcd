#![deny(missing_docs)]

//! # Plan Command
//!
//! Prints the per-operation plans of an OpenAPI document.

use std::io::Write;
use std::path::PathBuf;

use oasnorm_core::{plan_document, BindingConfig, DocumentResolver};

use crate::error::{CliError, CliResult};

/// Output encodings.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the plan command.
#[derive(clap::Args, Debug, Clone)]
pub struct PlanArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long, env = "OASNORM_OPENAPI", default_value = "openapi.yaml")]
    pub openapi: PathBuf,

    /// Binding configuration file (YAML, or JSON by `.json` extension).
    #[clap(long, env = "OASNORM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overrides the service-binding extension key.
    #[clap(long, env = "OASNORM_EXTENSION_KEY")]
    pub extension_key: Option<String>,

    /// Reports an unknown parameter location as "no style" instead of failing.
    #[clap(long)]
    pub lenient: bool,

    /// Output encoding.
    #[clap(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl PlanArgs {
    fn binding_config(&self) -> CliResult<BindingConfig> {
        let mut config = match &self.config {
            Some(path) => BindingConfig::from_path(path)?,
            None => BindingConfig::default(),
        };
        if let Some(key) = &self.extension_key {
            config.extension_key = key.clone();
        }
        if self.lenient {
            config.strict_parameter_location = false;
        }
        Ok(config)
    }
}

/// Executes the plan command, writing the rendered plans to `out`.
pub fn execute(args: &PlanArgs, out: &mut impl Write) -> CliResult<()> {
    let config = args.binding_config()?;
    let resolver = DocumentResolver::from_path(&args.openapi)?;
    let plans = plan_document(&resolver, &config)?;
    tracing::info!(operations = plans.len(), "planned document");

    let rendered = match args.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&plans).map_err(|e| CliError::Render(e.to_string()))?
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&plans).map_err(|e| CliError::Render(e.to_string()))?
        }
    };
    writeln!(out, "{}", rendered.trim_end())?;
    Ok(())
}

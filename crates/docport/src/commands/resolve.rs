//! `docport resolve` command implementation.
//!
//! Runs a single lookup through the same resolver the server uses and prints
//! the 200 envelope. Useful for checking content trees without starting the
//! server.

use std::path::PathBuf;

use clap::Args;
use docport_config::{CliSettings, Config};
use docport_server::{DocResponse, build_resolver, server_config_from_config, split_docs_path};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Product slug (e.g. `terraform-plugin-framework`).
    product: String,

    /// Version (e.g. `v1.13.x` or `latest`).
    version: String,

    /// Docs path, `/`-separated (empty for the docs root).
    #[arg(default_value = "")]
    docs_path: String,

    /// Path to configuration file (default: auto-discover docport.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the `content/` tree (overrides config).
    #[arg(long, env = "DOCPORT_CONTENT_ROOT")]
    content_root: Option<PathBuf>,

    /// Version index JSON file (overrides config).
    #[arg(long)]
    version_metadata: Option<PathBuf>,

    /// Enable verbose output (info-level logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NotFound`] when the document can't be resolved;
    /// the cause has already been logged by then.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            content_root: self.content_root,
            version_metadata: self.version_metadata,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let resolver = build_resolver(&server_config_from_config(&config))?;
        let docs_path = split_docs_path(&self.docs_path);

        let payload = resolver
            .resolve(&self.product, &self.version, &docs_path)
            .map_err(|_| CliError::NotFound)?;
        tracing::info!(github_file = %payload.github_file, "Resolved document");

        let json = serde_json::to_string_pretty(&DocResponse::ok(payload))?;
        output.result(&json)?;

        Ok(())
    }
}

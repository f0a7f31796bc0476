//! `docport serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use docport_config::{CliSettings, Config, ProductRegistry};
use docport_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover docport.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the `content/` tree (overrides config).
    #[arg(long, env = "DOCPORT_CONTENT_ROOT")]
    content_root: Option<PathBuf>,

    /// Version index JSON file (overrides config).
    #[arg(long)]
    version_metadata: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (info-level logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            content_root: self.content_root,
            version_metadata: self.version_metadata,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.highlight(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Content root: {}",
            config.content_resolved.root.display()
        ));
        output.info(&format!(
            "Version index: {}",
            config.content_resolved.version_metadata.display()
        ));

        let server_config = server_config_from_config(&config);
        output.info(&describe_products(&server_config.products));

        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}

/// One-line summary of the configured products.
fn describe_products(products: &ProductRegistry) -> String {
    if products.is_empty() {
        return "Products: none configured, every request will return 404".to_owned();
    }
    let slugs: Vec<&str> = products.slugs().collect();
    format!("Products: {}", slugs.join(", "))
}

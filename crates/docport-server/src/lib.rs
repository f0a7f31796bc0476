//! HTTP server for docport.
//!
//! This crate serves the raw markdown source of documentation pages:
//!
//! ```text
//! GET /api/content/{product}/doc/{version}/{*docs_path}
//! ```
//!
//! A request is resolved by [`DocResolver`], which looks up the product,
//! resolves the version against the version index, reads the first existing
//! candidate file and splits off its YAML front matter. Any failure yields the
//! same generic 404 body; the cause is only written to the error log.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docport_config::ProductRegistry;
//! use docport_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 7979,
//!         content_root: PathBuf::from("."),
//!         version_metadata: PathBuf::from("versionMetadata.json"),
//!         products: ProductRegistry::default(),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP──► axum router (security headers)
//!                       │
//!                       └─► content handler ──► DocResolver
//!                                                 ├─► ProductRegistry
//!                                                 ├─► VersionResolver (version index)
//!                                                 ├─► Storage (content/ tree)
//!                                                 └─► FrontMatter (YAML)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod resolver;
mod state;
#[cfg(test)]
mod test_logs;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use docport_config::{Config, ProductRegistry};
use docport_meta::YamlFrontMatter;
use docport_storage::FsStorage;
use docport_versions::{IndexError, IndexResolver, VersionIndex};
use state::AppState;

pub use error::DocError;
pub use handlers::content::DocResponse;
pub use resolver::{ContentPath, DocPayload, DocResolver, split_docs_path};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory containing the `content/` tree.
    pub content_root: PathBuf,
    /// Version index JSON file.
    pub version_metadata: PathBuf,
    /// Known products.
    pub products: ProductRegistry,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            content_root: PathBuf::from("."),
            version_metadata: PathBuf::from("versionMetadata.json"),
            products: ProductRegistry::default(),
        }
    }
}

/// Build the document resolver from server configuration.
///
/// Loads the version index from disk and wires the filesystem storage and
/// YAML front matter parser.
///
/// # Errors
///
/// Returns [`IndexError`] if the version index can't be read or parsed.
pub fn build_resolver(config: &ServerConfig) -> Result<DocResolver, IndexError> {
    let index = VersionIndex::load(&config.version_metadata)?;
    let versions = IndexResolver::new(index).with_unversioned(config.products.unversioned());
    let storage = FsStorage::new(config.content_root.clone());

    Ok(DocResolver::new(
        config.products.clone(),
        Arc::new(versions),
        Arc::new(storage),
        Arc::new(YamlFrontMatter),
    ))
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the version index can't be loaded or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = build_resolver(&config)?;
    tracing::info!(
        products = config.products.len(),
        content_root = %config.content_root.display(),
        "Document resolver ready"
    );

    let state = Arc::new(AppState { resolver });
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from docport config.
///
/// # Arguments
///
/// * `config` - Loaded configuration
#[must_use]
pub fn server_config_from_config(config: &Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        content_root: config.content_resolved.root.clone(),
        version_metadata: config.content_resolved.version_metadata.clone(),
        products: config.product_registry(),
    }
}

//! CLI error types.

use docport_config::ConfigError;
use docport_versions::IndexError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load version index: {0}")]
    Index(#[from] IndexError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Server(String),

    /// Details are in the error log written during resolution.
    #[error("Document not found")]
    NotFound,
}

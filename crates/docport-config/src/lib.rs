//! Configuration management for docport.
//!
//! Reads `docport.toml`, looked up in the working directory and then its
//! ancestors. The file names the content tree, the version index and every
//! product the API serves:
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 7979
//!
//! [content]
//! root = "."
//! version_metadata = "versionMetadata.json"
//!
//! [products.terraform-plugin-framework]
//! content_dir = "docs"
//! versioned_docs = true
//! ```
//!
//! Relative paths are taken from the directory holding the file. Command-line
//! flags win over file values (see [`CliSettings`]).
//!
//! `server.host`, `content.root` and `content.version_metadata` may reference
//! environment variables as `${VAR}` (required) or `${VAR:-fallback}`.

mod expand;
mod registry;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use registry::{ProductConfig, ProductRegistry};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override content root directory.
    pub content_root: Option<PathBuf>,
    /// Override version index file.
    pub version_metadata: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docport.toml";

/// Default version index filename, relative to the config directory.
const VERSION_METADATA_FILENAME: &str = "versionMetadata.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Products keyed by slug.
    pub products: BTreeMap<String, ProductConfig>,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    root: Option<String>,
    version_metadata: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory containing the `content/` tree.
    pub root: PathBuf,
    /// Version index JSON file.
    pub version_metadata: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.root`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a relative path fragment that stays inside its parent.
fn require_relative_dir(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.starts_with('/') || value.split('/').any(|part| part == "..") {
        return Err(ConfigError::Validation(format!(
            "{field} must be a relative path without '..'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docport.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Build the product registry from the `[products]` tables.
    #[must_use]
    pub fn product_registry(&self) -> ProductRegistry {
        ProductRegistry::new(self.products.clone())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(root) = &settings.content_root {
            self.content_resolved.root.clone_from(root);
        }
        if let Some(version_metadata) = &settings.version_metadata {
            self.content_resolved
                .version_metadata
                .clone_from(version_metadata);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            content: ContentConfigRaw::default(),
            products: BTreeMap::new(),
            content_resolved: ContentConfig {
                root: base.to_path_buf(),
                version_metadata: base.join(VERSION_METADATA_FILENAME),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_products()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate product tables.
    fn validate_products(&self) -> Result<(), ConfigError> {
        for (slug, product) in &self.products {
            require_non_empty(slug, "products.<slug>")?;
            if slug.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "products.{slug}: slug cannot contain '/'"
                )));
            }
            let field = format!("products.{slug}.content_dir");
            require_non_empty(&product.content_dir, &field)?;
            require_relative_dir(&product.content_dir, &field)?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref root) = self.content.root {
            self.content.root = Some(expand::expand_env(root, "content.root")?);
        }
        if let Some(ref version_metadata) = self.content.version_metadata {
            self.content.version_metadata = Some(expand::expand_env(
                version_metadata,
                "content.version_metadata",
            )?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            root: self
                .content
                .root
                .as_deref()
                .map_or_else(|| config_dir.to_path_buf(), |root| config_dir.join(root)),
            version_metadata: resolve(
                self.content.version_metadata.as_deref(),
                VERSION_METADATA_FILENAME,
            ),
        };
    }
}

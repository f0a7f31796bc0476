//! Version index loaded from `versionMetadata.json`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A single published version of a product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    /// Version directory name (e.g. "v1.13.x", "v202401-1").
    pub version: String,
    /// Release stage label (e.g. "stable", "beta").
    #[serde(default)]
    pub release_stage: Option<String>,
    /// Whether this is the version served for `latest`.
    #[serde(default)]
    pub is_latest: bool,
}

impl VersionEntry {
    /// Create a stable entry.
    #[must_use]
    pub fn new(version: impl Into<String>, is_latest: bool) -> Self {
        Self {
            version: version.into(),
            release_stage: Some("stable".to_owned()),
            is_latest,
        }
    }
}

/// Version index error.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Index file could not be read.
    #[error("Failed to read version index {}: {source}", path.display())]
    Io {
        /// Index file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Index file is not valid JSON of the expected shape.
    #[error("Invalid version index: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Known versions per product slug.
///
/// The JSON shape is an object keyed by product slug:
///
/// ```json
/// {
///   "terraform-plugin-framework": [
///     { "version": "v1.13.x", "releaseStage": "stable", "isLatest": true },
///     { "version": "v1.12.x", "releaseStage": "stable", "isLatest": false }
///   ]
/// }
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(transparent)]
pub struct VersionIndex {
    products: BTreeMap<String, Vec<VersionEntry>>,
}

impl VersionIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an index from JSON text.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an index from a JSON file.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let content = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let index = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            products = index.products.len(),
            "Loaded version index"
        );
        Ok(index)
    }

    /// Add or replace the versions of a product.
    #[must_use]
    pub fn with_product(
        mut self,
        product: impl Into<String>,
        versions: impl IntoIterator<Item = VersionEntry>,
    ) -> Self {
        self.products
            .insert(product.into(), versions.into_iter().collect());
        self
    }

    /// All versions of a product, in index order.
    #[must_use]
    pub fn versions(&self, product: &str) -> Option<&[VersionEntry]> {
        self.products.get(product).map(Vec::as_slice)
    }

    /// The version flagged as latest (first one if several are flagged).
    #[must_use]
    pub fn latest(&self, product: &str) -> Option<&VersionEntry> {
        self.versions(product)?.iter().find(|v| v.is_latest)
    }

    /// Find an exact version of a product.
    #[must_use]
    pub fn find(&self, product: &str, version: &str) -> Option<&VersionEntry> {
        self.versions(product)?.iter().find(|v| v.version == version)
    }
}

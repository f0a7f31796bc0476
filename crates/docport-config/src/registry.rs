//! Product configuration registry.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Configuration of a single documentation product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductConfig {
    /// Subdirectory of `content/<product>/<version>/` holding the docs.
    pub content_dir: String,
    /// Whether the product publishes docs per version.
    #[serde(default = "default_versioned_docs")]
    pub versioned_docs: bool,
}

fn default_versioned_docs() -> bool {
    true
}

impl ProductConfig {
    /// Create a product config.
    #[must_use]
    pub fn new(content_dir: impl Into<String>, versioned_docs: bool) -> Self {
        Self {
            content_dir: content_dir.into(),
            versioned_docs,
        }
    }
}

/// Immutable lookup of product configuration by slug.
///
/// Built once at startup from the `[products.<slug>]` tables and shared
/// read-only between requests.
#[derive(Debug, Clone, Default)]
pub struct ProductRegistry {
    products: BTreeMap<String, ProductConfig>,
}

impl ProductRegistry {
    /// Create a registry from a slug → config map.
    #[must_use]
    pub fn new(products: BTreeMap<String, ProductConfig>) -> Self {
        Self { products }
    }

    /// Add a product, replacing any existing entry with the same slug.
    #[must_use]
    pub fn with_product(mut self, slug: impl Into<String>, config: ProductConfig) -> Self {
        self.products.insert(slug.into(), config);
        self
    }

    /// Look up a product by exact slug.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&ProductConfig> {
        self.products.get(slug)
    }

    /// Product slugs in sorted order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    /// Slugs of products without versioned docs.
    pub fn unversioned(&self) -> impl Iterator<Item = &str> {
        self.products
            .iter()
            .filter(|(_, config)| !config.versioned_docs)
            .map(|(slug, _)| slug.as_str())
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the registry has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

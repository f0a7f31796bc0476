//! Version resolution against the version index.

use std::collections::HashSet;

use regex::Regex;

use crate::index::VersionIndex;

/// Alias that resolves to the product's latest version.
pub const LATEST: &str = "latest";

/// Version resolution error.
///
/// Messages are written for server-side logs; they name the product and
/// version so a failed lookup can be diagnosed without the response body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    /// Version string doesn't look like a version.
    #[error("Version, \"{0}\", is malformed")]
    Malformed(String),
    /// Product has no entry in the version index.
    #[error("Product, {0}, has no version metadata")]
    UnknownProduct(String),
    /// `latest` requested but no version is flagged as latest.
    #[error("Product, {0}, has no latest version")]
    NoLatest(String),
    /// Explicit version requested for a product without versioned docs.
    #[error("Product, {product}, does not have versioned docs (requested \"{version}\")")]
    Unversioned {
        /// Product slug.
        product: String,
        /// Requested version.
        version: String,
    },
    /// Version is well-formed but not in the index.
    #[error("Product, {product}, has no \"{version}\" version")]
    NotFound {
        /// Product slug.
        product: String,
        /// Requested version.
        version: String,
    },
}

/// Resolves a requested version string to a concrete version directory.
pub trait VersionResolver: Send + Sync {
    /// Resolve `version` for `product`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`] if the version is malformed or unknown.
    fn resolve(&self, product: &str, version: &str) -> Result<String, VersionError>;
}

/// [`VersionResolver`] backed by a [`VersionIndex`].
#[derive(Debug)]
pub struct IndexResolver {
    index: VersionIndex,
    /// Products that only publish their latest version.
    unversioned: HashSet<String>,
    /// Accepted shape of explicit version strings.
    version_regex: Regex,
}

impl IndexResolver {
    /// Create a resolver over the given index.
    ///
    /// # Panics
    ///
    /// Panics if the internal version regex fails to compile.
    /// This should never happen as the regex is a compile-time constant.
    #[must_use]
    pub fn new(index: VersionIndex) -> Self {
        Self {
            index,
            unversioned: HashSet::new(),
            version_regex: Regex::new(r"^v[0-9][0-9A-Za-z.\-]*$").unwrap(),
        }
    }

    /// Mark products whose docs are not versioned.
    ///
    /// Such products only resolve `latest` (or the latest version's exact name).
    #[must_use]
    pub fn with_unversioned<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unversioned.extend(products.into_iter().map(Into::into));
        self
    }

    fn latest(&self, product: &str) -> Result<String, VersionError> {
        self.index
            .versions(product)
            .ok_or_else(|| VersionError::UnknownProduct(product.to_owned()))?;
        self.index
            .latest(product)
            .map(|v| v.version.clone())
            .ok_or_else(|| VersionError::NoLatest(product.to_owned()))
    }
}

impl VersionResolver for IndexResolver {
    fn resolve(&self, product: &str, version: &str) -> Result<String, VersionError> {
        if version == LATEST {
            return self.latest(product);
        }

        if !self.version_regex.is_match(version) {
            return Err(VersionError::Malformed(version.to_owned()));
        }

        if self.unversioned.contains(product) {
            let latest = self.latest(product)?;
            return if latest == version {
                Ok(latest)
            } else {
                Err(VersionError::Unversioned {
                    product: product.to_owned(),
                    version: version.to_owned(),
                })
            };
        }

        self.index
            .versions(product)
            .ok_or_else(|| VersionError::UnknownProduct(product.to_owned()))?;

        self.index
            .find(product, version)
            .map(|v| v.version.clone())
            .ok_or_else(|| VersionError::NotFound {
                product: product.to_owned(),
                version: version.to_owned(),
            })
    }
}

//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind, join_segments};

/// Mock storage for testing.
///
/// Stores content in memory keyed by the `/`-joined path. Every call to
/// [`Storage::read`] is recorded so tests can assert lookup order.
///
/// # Example
///
/// ```ignore
/// use docport_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_content("content/vault/v1.15.x/docs/index.mdx", "# Vault");
///
/// let content = storage.read(&["content/vault/v1.15.x/docs/index.mdx".to_owned()])?;
/// assert_eq!(storage.reads(), vec!["content/vault/v1.15.x/docs/index.mdx"]);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    contents: RwLock<HashMap<String, String>>,
    errors: RwLock<HashMap<String, StorageErrorKind>>,
    reads: RwLock<Vec<String>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add content for a `/`-joined path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_content(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.contents
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Make reads of a `/`-joined path fail with the given kind.
    ///
    /// Takes precedence over content registered for the same path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_error(self, path: impl Into<String>, kind: StorageErrorKind) -> Self {
        self.errors.write().unwrap().insert(path.into(), kind);
        self
    }

    /// Paths passed to [`Storage::read`], in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn reads(&self) -> Vec<String> {
        self.reads.read().unwrap().clone()
    }
}

impl Storage for MockStorage {
    fn read(&self, segments: &[String]) -> Result<String, StorageError> {
        let path = join_segments(segments);
        self.reads.write().unwrap().push(path.clone());

        if let Some(kind) = self.errors.read().unwrap().get(&path).copied() {
            return Err(StorageError::new(kind).with_path(path).with_backend("Mock"));
        }

        self.contents
            .read()
            .unwrap()
            .get(&path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend("Mock"))
    }
}

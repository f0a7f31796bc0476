//! Filesystem storage backend.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind, join_segments};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at a repository directory.
///
/// Segments are joined beneath `root`, so `["content", "vault", "docs",
/// "index.mdx"]` reads `<root>/content/vault/docs/index.mdx`.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use docport_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("/srv/docs"));
/// let content = storage.read(&["content".to_owned(), "index.mdx".to_owned()])?;
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Root directory that contains the `content/` tree.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory against which path segments are resolved
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve segments to a file path under the root.
    ///
    /// Rejects empty paths, absolute segments and `..` components to prevent
    /// path traversal out of the root.
    fn resolve(&self, segments: &[String]) -> Result<PathBuf, StorageError> {
        let logical = join_segments(segments);
        if logical.is_empty() {
            return Err(invalid_path(&logical));
        }

        let mut full_path = self.root.clone();
        for component in Path::new(&logical).components() {
            match component {
                Component::Normal(part) => full_path.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid_path(&logical));
                }
            }
        }
        Ok(full_path)
    }
}

fn invalid_path(logical: &str) -> StorageError {
    StorageError::new(StorageErrorKind::InvalidPath)
        .with_path(logical)
        .with_backend(BACKEND)
}

impl Storage for FsStorage {
    fn read(&self, segments: &[String]) -> Result<String, StorageError> {
        let full_path = self.resolve(segments)?;
        tracing::debug!(path = %full_path.display(), "Reading content");
        fs::read_to_string(&full_path).map_err(|e| {
            StorageError::io(e, Some(PathBuf::from(join_segments(segments)))).with_backend(BACKEND)
        })
    }
}

//! Content storage abstraction for docport.
//!
//! This crate provides a [`Storage`] trait for reading documentation sources
//! addressed by ordered path segments (e.g. `["content", "terraform", "v1.9.x",
//! "docs", "intro.mdx"]`). This enables:
//!
//! - **Unit testing** of the resolution handler without touching the filesystem
//! - **Backend flexibility** (filesystem today, object stores later)
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with a single `read()` method
//! - [`FsStorage`] implementation rooted at a repository directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docport_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("."));
//! let segments = ["content", "terraform", "v1.9.x", "docs", "intro.mdx"].map(String::from);
//! let source = storage.read(&segments)?;
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind, join_segments};

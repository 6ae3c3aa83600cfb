//! Capability traits for the reconciliation engine
//!
//! These traits model the two external collaborators the engine runs
//! against: the local filesystem and the durable preference store. Failure
//! is always signaled through [`Result`]; the boolean-return convention
//! some host environments use for write/delete is normalized away here.

use crate::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Abstract filesystem capability consumed by the reconciler
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Check whether a path exists
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// List the entries of a directory as bare file names, not full paths
    async fn list_entries(&self, path: &Path) -> Result<Vec<String>>;

    /// Read a file to a string
    async fn read_file(&self, path: &Path) -> Result<String>;

    /// Write a file, replacing any existing content
    async fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    /// Delete a file
    async fn delete_file(&self, path: &Path) -> Result<()>;

    /// The user's home directory, if one can be determined
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Durable key/value preference storage
///
/// Not versioned and not schema-checked; callers own the key namespace.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Fetch a preference value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a preference value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a preference value
    async fn remove(&self, key: &str) -> Result<()>;
}

//! Shared test utilities for SpoolSync integration tests
//!
//! Provides an in-memory [`FileSystem`] double with operation counters and
//! injectable per-file failures, so scenarios can assert not just the final
//! directory state but how many filesystem operations it took to get there.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use async_trait::async_trait;
use spoolsync_types::{Error, FileSystem, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Operation counters for a [`MemoryFileSystem`]
#[derive(Debug, Default, Clone, Copy)]
pub struct OpCounts {
    /// Write attempts, including injected failures
    pub writes: u64,
    /// Delete attempts, including injected failures
    pub deletes: u64,
    /// Directory listings
    pub lists: u64,
}

#[derive(Debug, Default)]
struct Inner {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    fail_writes: BTreeSet<PathBuf>,
    fail_deletes: BTreeSet<PathBuf>,
    ops: OpCounts,
}

/// In-memory [`FileSystem`] double
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    inner: Mutex<Inner>,
}

impl MemoryFileSystem {
    /// Create an empty in-memory filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory (and its ancestors)
    pub fn add_dir<P: AsRef<Path>>(&self, path: P) {
        let mut inner = self.inner.lock().unwrap();
        let mut current = PathBuf::new();
        for component in path.as_ref().components() {
            current.push(component);
            inner.dirs.insert(current.clone());
        }
    }

    /// Create a file, creating its parent directory implicitly
    pub fn add_file<P: AsRef<Path>>(&self, path: P, content: &str) {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.inner.lock().unwrap().files.insert(path, content.to_string());
    }

    /// Make every write to the given path fail
    pub fn fail_writes_to<P: AsRef<Path>>(&self, path: P) {
        self.inner
            .lock()
            .unwrap()
            .fail_writes
            .insert(path.as_ref().to_path_buf());
    }

    /// Make every delete of the given path fail
    pub fn fail_deletes_of<P: AsRef<Path>>(&self, path: P) {
        self.inner
            .lock()
            .unwrap()
            .fail_deletes
            .insert(path.as_ref().to_path_buf());
    }

    /// Content of a file, if present
    pub fn content<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        self.inner.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    /// Sorted bare file names directly inside a directory
    pub fn file_names_in<P: AsRef<Path>>(&self, dir: P) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir.as_ref()))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    /// Snapshot of the operation counters
    pub fn ops(&self) -> OpCounts {
        self.inner.lock().unwrap().ops
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn exists(&self, path: &Path) -> Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.dirs.contains(path) || inner.files.contains_key(path))
    }

    async fn list_entries(&self, path: &Path) -> Result<Vec<String>> {
        let mut inner = self.inner.lock().unwrap();
        inner.ops.lists += 1;
        if !inner.dirs.contains(path) {
            return Err(Error::Io {
                message: format!("Failed to list '{}': no such directory", path.display()),
            });
        }
        let mut entries: Vec<String> = inner
            .files
            .keys()
            .chain(inner.dirs.iter())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        entries.sort();
        entries.dedup();
        Ok(entries)
    }

    async fn read_file(&self, path: &Path) -> Result<String> {
        self.inner
            .lock()
            .unwrap()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::FileNotFound {
                path: path.to_path_buf(),
            })
    }

    async fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.ops.writes += 1;
        if inner.fail_writes.contains(path) {
            return Err(Error::Io {
                message: format!("Failed to write '{}': injected failure", path.display()),
            });
        }
        match path.parent() {
            Some(parent) if inner.dirs.contains(parent) => {
                inner.files.insert(path.to_path_buf(), content.to_string());
                Ok(())
            }
            _ => Err(Error::Io {
                message: format!("Failed to write '{}': no such directory", path.display()),
            }),
        }
    }

    async fn delete_file(&self, path: &Path) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.ops.deletes += 1;
        if inner.fail_deletes.contains(path) {
            return Err(Error::Io {
                message: format!("Failed to delete '{}': injected failure", path.display()),
            });
        }
        if inner.files.remove(path).is_none() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        Some(PathBuf::from("/home/test"))
    }
}

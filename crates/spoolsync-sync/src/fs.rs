//! Local filesystem capability backed by `tokio::fs`

use async_trait::async_trait;
use spoolsync_types::{Error, FileSystem, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Production [`FileSystem`] implementation over the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a local filesystem capability
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn exists(&self, path: &Path) -> Result<bool> {
        fs::try_exists(path).await.map_err(|e| Error::Io {
            message: format!("Failed to check '{}': {}", path.display(), e),
        })
    }

    async fn list_entries(&self, path: &Path) -> Result<Vec<String>> {
        let mut dir = fs::read_dir(path).await.map_err(|e| Error::Io {
            message: format!("Failed to list '{}': {}", path.display(), e),
        })?;

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(|e| Error::Io {
            message: format!("Failed to read entry in '{}': {}", path.display(), e),
        })? {
            entries.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(entries)
    }

    async fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Io {
                    message: format!("Failed to read '{}': {}", path.display(), e),
                }
            }
        })
    }

    async fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).await.map_err(|e| Error::Io {
            message: format!("Failed to write '{}': {}", path.display(), e),
        })
    }

    async fn delete_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).await.map_err(|e| Error::Io {
            message: format!("Failed to delete '{}': {}", path.display(), e),
        })
    }

    fn home_dir(&self) -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var_os("USERPROFILE").map(PathBuf::from)
        }
        #[cfg(not(windows))]
        {
            std::env::var_os("HOME").map(PathBuf::from)
        }
    }
}

//! Durable JSON-file preference store
//!
//! A single JSON object on disk holding string keys and values, reduced
//! to what the orchestrator needs:
//! read everything at open, rewrite the whole file on every change. The
//! store is deliberately unversioned and unchecked; callers own the keys.

use async_trait::async_trait;
use spoolsync_types::{Error, PreferenceStore, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// File-backed [`PreferenceStore`] implementation
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonPreferenceStore {
    /// Open a preference store, loading existing entries if the file exists
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                Error::preference(format!(
                    "Failed to parse preference file '{}': {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(Error::preference(format!(
                    "Failed to read preference file '{}': {}",
                    path.display(),
                    e
                )))
            }
        };

        debug!("opened preference store at {}", path.display());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| Error::preference(format!("Failed to serialize preferences: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::preference(format!(
                    "Failed to create preference directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        tokio::fs::write(&self.path, content).await.map_err(|e| {
            Error::preference(format!(
                "Failed to write preference file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }
}

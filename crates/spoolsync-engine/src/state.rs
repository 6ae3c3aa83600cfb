//! Explicit sync state with a load/persist contract
//!
//! All durable orchestrator state lives here and flows through the
//! preference store explicitly: loaded once at startup, persisted on every
//! change. Per-category fingerprints are deliberately process-local and are
//! not persisted; a fresh process reconciles on its first snapshot.

use chrono::{DateTime, Utc};
use spoolsync_config::{Config, SlicerConfig};
use spoolsync_types::{FileSystem, PreferenceStore, Result};
use std::path::PathBuf;
use tracing::warn;

/// Preference store keys owned by the orchestrator
pub mod keys {
    /// Base directory of the slicer configuration tree
    pub const SLICER_BASE_DIR: &str = "slicer_base_dir";
    /// Whether automatic background sync is enabled
    pub const AUTO_SYNC_ENABLED: &str = "auto_sync_enabled";
    /// Timestamp of the last completed reconciliation, RFC 3339
    pub const LAST_SYNC_TIME: &str = "last_sync_time";
}

/// Durable orchestrator state
#[derive(Debug, Clone)]
pub struct SyncState {
    /// Whether automatic background sync is enabled
    pub enabled: bool,
    /// When the last reconciliation pass completed
    pub last_sync: Option<DateTime<Utc>>,
    /// Configured base directory, if any
    pub base_dir: Option<PathBuf>,
}

impl SyncState {
    /// Load state from the preference store, with the config file supplying
    /// values no preference has been written for yet
    pub async fn load(prefs: &dyn PreferenceStore, config: &Config) -> Result<Self> {
        let enabled = match prefs.get(keys::AUTO_SYNC_ENABLED).await? {
            Some(value) => value == "true",
            None => config.sync.auto_sync,
        };

        let last_sync = match prefs.get(keys::LAST_SYNC_TIME).await? {
            Some(value) => match DateTime::parse_from_rfc3339(&value) {
                Ok(parsed) => Some(parsed.with_timezone(&Utc)),
                Err(error) => {
                    warn!(%error, "ignoring unparseable last-sync timestamp");
                    None
                }
            },
            None => None,
        };

        let base_dir = prefs
            .get(keys::SLICER_BASE_DIR)
            .await?
            .map(PathBuf::from)
            .or_else(|| config.slicer.base_dir.clone());

        Ok(Self {
            enabled,
            last_sync,
            base_dir,
        })
    }

    /// Persist the enabled flag
    pub async fn persist_enabled(&self, prefs: &dyn PreferenceStore) -> Result<()> {
        prefs
            .set(keys::AUTO_SYNC_ENABLED, if self.enabled { "true" } else { "false" })
            .await
    }

    /// Persist the last-sync timestamp
    pub async fn persist_last_sync(&self, prefs: &dyn PreferenceStore) -> Result<()> {
        match self.last_sync {
            Some(timestamp) => prefs.set(keys::LAST_SYNC_TIME, &timestamp.to_rfc3339()).await,
            None => prefs.remove(keys::LAST_SYNC_TIME).await,
        }
    }

    /// Persist the configured base directory
    pub async fn persist_base_dir(&self, prefs: &dyn PreferenceStore) -> Result<()> {
        match &self.base_dir {
            Some(dir) => prefs.set(keys::SLICER_BASE_DIR, &dir.to_string_lossy()).await,
            None => prefs.remove(keys::SLICER_BASE_DIR).await,
        }
    }

    /// The directory reconciliation should run against: the configured
    /// directory, or the platform default under the user's home
    pub fn effective_base_dir(&self, fs: &dyn FileSystem) -> Option<PathBuf> {
        self.base_dir.clone().or_else(|| {
            fs.home_dir()
                .map(|home| SlicerConfig::default_base_dir(&home))
        })
    }
}

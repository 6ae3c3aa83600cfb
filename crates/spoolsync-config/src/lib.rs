//! Configuration management and preference storage for SpoolSync
//!
//! This crate provides the configuration system for SpoolSync, supporting
//! multiple configuration formats (YAML, TOML), validation, and environment
//! variable overrides, plus the durable key/value preference store the sync
//! orchestrator persists its state through.
//!
//! # Examples
//!
//! ```rust
//! use spoolsync_config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .add_defaults()
//!     .add_env_prefix("SPOOLSYNC")
//!     .build()
//!     .expect("Failed to load configuration");
//!
//! assert_eq!(config.sync.debounce_window().as_secs(), 1);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod builder;
pub mod error;
pub mod loader;
pub mod prefs;

pub use builder::ConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use prefs::JsonPreferenceStore;

/// Main configuration structure for SpoolSync
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Slicer installation configuration
    pub slicer: SlicerConfig,
    /// Synchronization behavior configuration
    pub sync: SyncConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Slicer installation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlicerConfig {
    /// Base directory of the slicer configuration tree; when unset, the
    /// preference store and then the platform default are consulted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
}

impl SlicerConfig {
    /// Platform default location of the slicer configuration tree
    pub fn default_base_dir(home: &Path) -> PathBuf {
        #[cfg(target_os = "macos")]
        {
            home.join("Library").join("Application Support").join("OrcaSlicer")
        }
        #[cfg(target_os = "windows")]
        {
            std::env::var_os("APPDATA")
                .map_or_else(|| home.join("AppData").join("Roaming"), PathBuf::from)
                .join("OrcaSlicer")
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            home.join(".config").join("OrcaSlicer")
        }
    }
}

/// Synchronization behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Whether automatic background sync starts enabled
    pub auto_sync: bool,
    /// Quiet window for coalescing snapshot bursts, milliseconds
    pub debounce_window_ms: u64,
}

impl SyncConfig {
    /// The debounce quiet window as a `Duration`
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_window_ms)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            auto_sync: false,
            debounce_window_ms: 1000, // 1 second
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Enable colored output
    pub colored_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            colored_output: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.slicer.base_dir.is_none());
        assert!(!config.sync.auto_sync);
        assert_eq!(config.sync.debounce_window(), Duration::from_secs(1));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_base_dir_is_under_home() {
        let home = PathBuf::from("/home/sam");
        let dir = SlicerConfig::default_base_dir(&home);
        assert!(dir.starts_with(&home) || dir.ends_with("OrcaSlicer"));
    }
}

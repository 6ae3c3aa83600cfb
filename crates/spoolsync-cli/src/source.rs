//! File-backed snapshot source
//!
//! Stand-in for the cloud live-query when running from the command line: a
//! JSON export holding the complete current record sets. Each read is a
//! full replacement snapshot, exactly like a subscription push.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spoolsync_types::{FilamentProfile, Printer};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Complete profile export, both categories
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileExport {
    /// All filament profiles
    #[serde(default)]
    pub filaments: Vec<FilamentProfile>,
    /// All printer records
    #[serde(default)]
    pub printers: Vec<Printer>,
}

impl ProfileExport {
    /// A starter export holding the default new-record bundle for each
    /// category, matching what the cloud grid's add action creates
    pub fn starter() -> Self {
        Self {
            filaments: vec![FilamentProfile::new_record()],
            printers: vec![Printer::new_record()],
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize profile export")
    }
}

/// A profile export file that can be re-read on change
#[derive(Debug)]
pub struct ExportFile {
    path: PathBuf,
}

impl ExportFile {
    /// Wrap an export file path
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the export file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the full export
    pub fn load(&self) -> Result<ProfileExport> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read profile export '{}'", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse profile export '{}'", self.path.display()))
    }

    /// Modification time of the export file, for cheap change polling
    pub fn modified(&self) -> Result<SystemTime> {
        let metadata = std::fs::metadata(&self.path)
            .with_context(|| format!("failed to stat profile export '{}'", self.path.display()))?;
        metadata.modified().context("filesystem does not report modification times")
    }
}

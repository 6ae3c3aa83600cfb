//! Target directory resolution
//!
//! Profiles belong in `<base>/user/default/<category>`. When that layout is
//! absent the two categories diverge deliberately: filament profiles fall
//! back to the base directory itself (tolerating unusual install layouts),
//! while machine profiles are reported unavailable and the category is
//! skipped for the pass. Machine configuration is never written into a
//! guessed location.

use spoolsync_types::{FileSystem, ProfileCategory, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of resolving a category's target directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetDir {
    /// The directory profiles should be written to
    Resolved(PathBuf),
    /// The expected layout is absent and no safe fallback exists; the
    /// category cannot be synced this pass
    Unavailable,
}

/// Resolve the effective target directory for a category
pub async fn resolve_target_dir(
    fs: &dyn FileSystem,
    base: &Path,
    category: ProfileCategory,
) -> Result<TargetDir> {
    let preferred = base.join("user").join("default").join(category.subdir());

    if fs.exists(&preferred).await? {
        return Ok(TargetDir::Resolved(preferred));
    }

    match category {
        ProfileCategory::Filament => {
            debug!(
                "expected layout missing, falling back to base directory: {}",
                base.display()
            );
            Ok(TargetDir::Resolved(base.to_path_buf()))
        }
        ProfileCategory::Machine => Ok(TargetDir::Unavailable),
    }
}

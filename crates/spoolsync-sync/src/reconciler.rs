//! Diff-and-apply reconciliation
//!
//! One pass per category: resolve the target directory, list it, diff the
//! owned files against the desired record set, delete orphans, then write
//! every desired record. Individual file failures are logged and counted
//! but never abort the pass; the next data change converges whatever was
//! missed. Only resolution and listing failures abort, since without a
//! listing the delete set cannot be computed.

use crate::naming;
use crate::record::SlicerProfile;
use crate::resolver::{resolve_target_dir, TargetDir};
use spoolsync_types::{FileSystem, ProfileCategory, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Phase of a reconciliation pass, for logging and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePhase {
    /// Resolving the target directory
    Resolving,
    /// Listing the directory and computing the delete/write sets
    Diffing,
    /// Applying deletes and writes
    Applying,
}

impl std::fmt::Display for ReconcilePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Resolving => "resolving",
            Self::Diffing => "diffing",
            Self::Applying => "applying",
        };
        f.write_str(name)
    }
}

/// Outcome of one reconciliation pass for one category
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    /// Pass id for correlating log lines
    pub pass_id: Uuid,
    /// Category this pass covered
    pub category: ProfileCategory,
    /// Resolved target directory; `None` when the category was skipped
    pub target_dir: Option<PathBuf>,
    /// Number of profile files written
    pub files_written: u64,
    /// Number of orphaned files deleted
    pub files_deleted: u64,
    /// Number of writes that failed
    pub write_failures: u64,
    /// Number of deletes that failed
    pub delete_failures: u64,
    /// Wall-clock duration of the pass
    pub duration: Duration,
}

impl ReconcileReport {
    fn new(pass_id: Uuid, category: ProfileCategory) -> Self {
        Self {
            pass_id,
            category,
            target_dir: None,
            files_written: 0,
            files_deleted: 0,
            write_failures: 0,
            delete_failures: 0,
            duration: Duration::default(),
        }
    }

    /// Whether the category was skipped because no target directory could
    /// be resolved
    pub fn was_skipped(&self) -> bool {
        self.target_dir.is_none()
    }

    /// Whether every file operation in the pass succeeded
    pub fn is_clean(&self) -> bool {
        self.write_failures == 0 && self.delete_failures == 0
    }
}

/// Converges a target directory to the desired record set
#[derive(Clone)]
pub struct Reconciler {
    fs: Arc<dyn FileSystem>,
}

impl Reconciler {
    /// Create a reconciler over a filesystem capability
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Run one reconciliation pass for a category
    ///
    /// Deletes are applied before writes so freed names are available
    /// deterministically; within each phase, files are handled in snapshot
    /// order with per-file error isolation.
    pub async fn reconcile<R: SlicerProfile>(
        &self,
        base: &Path,
        records: &[R],
    ) -> Result<ReconcileReport> {
        let pass_id = Uuid::new_v4();
        let start = Instant::now();
        let mut report = ReconcileReport::new(pass_id, R::CATEGORY);

        debug!(%pass_id, category = %R::CATEGORY, phase = %ReconcilePhase::Resolving, "starting pass");
        let target = match resolve_target_dir(self.fs.as_ref(), base, R::CATEGORY).await? {
            TargetDir::Resolved(dir) => dir,
            TargetDir::Unavailable => {
                warn!(
                    %pass_id,
                    category = %R::CATEGORY,
                    "expected directory layout missing, category not syncable this pass"
                );
                report.duration = start.elapsed();
                return Ok(report);
            }
        };

        debug!(%pass_id, phase = %ReconcilePhase::Diffing, target = %target.display(), "listing target directory");
        let existing = self.fs.list_entries(&target).await?;
        let owned_existing: Vec<String> = existing.into_iter().filter(|f| naming::is_owned(f)).collect();
        let expected: HashSet<String> = records.iter().map(SlicerProfile::canonical_file_name).collect();

        debug!(
            %pass_id,
            phase = %ReconcilePhase::Applying,
            owned = owned_existing.len(),
            expected = expected.len(),
            "applying deletes and writes"
        );

        // Delete phase: owned files with no corresponding record
        for file_name in owned_existing.iter().filter(|f| !expected.contains(*f)) {
            let path = target.join(file_name);
            match self.fs.delete_file(&path).await {
                Ok(()) => {
                    debug!(%pass_id, file = %file_name, "deleted orphaned profile file");
                    report.files_deleted += 1;
                }
                Err(error) => {
                    warn!(%pass_id, file = %file_name, %error, "failed to delete orphaned file");
                    report.delete_failures += 1;
                }
            }
        }

        // Write phase: every desired record, in snapshot order
        for record in records {
            let file_name = record.canonical_file_name();
            let path = target.join(&file_name);
            match self.fs.write_file(&path, &record.encode()).await {
                Ok(()) => {
                    debug!(%pass_id, file = %file_name, "wrote profile file");
                    report.files_written += 1;
                }
                Err(error) => {
                    warn!(%pass_id, file = %file_name, %error, "failed to write profile file");
                    report.write_failures += 1;
                }
            }
        }

        report.target_dir = Some(target);
        report.duration = start.elapsed();
        info!(
            %pass_id,
            category = %R::CATEGORY,
            written = report.files_written,
            deleted = report.files_deleted,
            write_failures = report.write_failures,
            delete_failures = report.delete_failures,
            "pass completed in {:?}",
            report.duration
        );
        Ok(report)
    }

    /// List the owned profile files currently present for a category
    pub async fn list_owned(
        &self,
        base: &Path,
        category: ProfileCategory,
    ) -> Result<Vec<String>> {
        let target = match resolve_target_dir(self.fs.as_ref(), base, category).await? {
            TargetDir::Resolved(dir) => dir,
            TargetDir::Unavailable => return Ok(Vec::new()),
        };
        let entries = self.fs.list_entries(&target).await?;
        Ok(entries.into_iter().filter(|f| naming::is_owned(f)).collect())
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler").finish_non_exhaustive()
    }
}

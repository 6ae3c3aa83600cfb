//! The sync orchestrator
//!
//! Composes change detection, debounce timing, and reconciliation into one
//! single-threaded, event-driven loop. Snapshots arrive from the cloud
//! subscription; materially changed ones wait out a quiet window (latest
//! snapshot wins) and then reconcile. A manual trigger cancels any pending
//! window and runs immediately. Errors from automatic passes are logged and
//! never surfaced; manual passes report them to the caller.

use crate::state::SyncState;
use crate::subscription::ProfileSubscription;
use chrono::{DateTime, Utc};
use spoolsync_config::Config;
use spoolsync_sync::{
    fingerprint_snapshot, ChangeDetector, DebounceSlot, ReconcileReport, Reconciler, SlicerProfile,
};
use spoolsync_types::{Error, FileSystem, FilamentProfile, PreferenceStore, Printer, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of a manual sync trigger
#[derive(Debug, Clone)]
pub struct SyncSummary {
    /// Filament pass report; `None` when no filament snapshot has arrived yet
    pub filament: Option<ReconcileReport>,
    /// Machine pass report; `None` when no machine snapshot has arrived yet
    pub machine: Option<ReconcileReport>,
    /// When the sync completed
    pub completed_at: DateTime<Utc>,
}

impl SyncSummary {
    /// Total profile files written across both categories
    pub fn total_written(&self) -> u64 {
        self.filament.as_ref().map_or(0, |r| r.files_written)
            + self.machine.as_ref().map_or(0, |r| r.files_written)
    }

    /// Total orphaned files deleted across both categories
    pub fn total_deleted(&self) -> u64 {
        self.filament.as_ref().map_or(0, |r| r.files_deleted)
            + self.machine.as_ref().map_or(0, |r| r.files_deleted)
    }

    /// Whether every file operation in both passes succeeded
    pub fn is_clean(&self) -> bool {
        self.filament.as_ref().map_or(true, ReconcileReport::is_clean)
            && self.machine.as_ref().map_or(true, ReconcileReport::is_clean)
    }
}

/// Per-category detection, debounce, and snapshot cache
struct CategoryState<R> {
    detector: ChangeDetector,
    slot: DebounceSlot<Vec<R>>,
    latest: Option<Vec<R>>,
}

impl<R: SlicerProfile + Clone> CategoryState<R> {
    fn new(window: Duration) -> Self {
        Self {
            detector: ChangeDetector::new(),
            slot: DebounceSlot::new(window),
            latest: None,
        }
    }

    /// Absorb a subscription snapshot
    ///
    /// The latest snapshot is always cached for manual triggers; only
    /// materially changed snapshots start (or restart) the debounce window,
    /// and only while automatic sync is enabled.
    fn observe(&mut self, records: Vec<R>, auto_enabled: bool) {
        let changed = self.detector.has_changed(fingerprint_snapshot(&records));
        self.latest = Some(records);

        if !auto_enabled {
            return;
        }
        if !changed {
            debug!(category = %R::CATEGORY, "snapshot unchanged, no sync scheduled");
            return;
        }
        let records = self.latest.clone().unwrap_or_default();
        self.slot.push(records, Instant::now());
        debug!(category = %R::CATEGORY, "snapshot changed, sync scheduled");
    }

    /// Run one pass and commit the fingerprint on completion
    ///
    /// Skipped passes (unresolvable target directory) and failed passes do
    /// not commit, so the next real data change naturally retries. A pass
    /// that completed with per-file failures does commit: delivery is
    /// at-most-once per change, and failed files wait for the next change.
    async fn run_pass(
        &mut self,
        reconciler: &Reconciler,
        base: &Path,
        records: &[R],
    ) -> Result<ReconcileReport> {
        let report = reconciler.reconcile(base, records).await?;
        if !report.was_skipped() {
            self.detector.commit(fingerprint_snapshot(records));
        }
        Ok(report)
    }
}

/// Owns sync state, timing, and the manual-trigger entry point
pub struct SyncOrchestrator {
    state: SyncState,
    fs: Arc<dyn FileSystem>,
    prefs: Arc<dyn PreferenceStore>,
    reconciler: Reconciler,
    filaments: CategoryState<FilamentProfile>,
    machines: CategoryState<Printer>,
}

impl SyncOrchestrator {
    /// Create an orchestrator, loading durable state from the preference
    /// store
    pub async fn new(
        config: &Config,
        fs: Arc<dyn FileSystem>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Result<Self> {
        let state = SyncState::load(prefs.as_ref(), config).await?;
        let window = config.sync.debounce_window();

        info!(enabled = state.enabled, "sync orchestrator initialized");
        Ok(Self {
            reconciler: Reconciler::new(Arc::clone(&fs)),
            state,
            fs,
            prefs,
            filaments: CategoryState::new(window),
            machines: CategoryState::new(window),
        })
    }

    /// Current durable state
    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Enable or disable automatic background sync, persisting the change
    pub async fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.state.enabled = enabled;
        self.state.persist_enabled(self.prefs.as_ref()).await
    }

    /// Change the configured slicer base directory, persisting the change
    pub async fn set_base_dir(&mut self, base_dir: Option<PathBuf>) -> Result<()> {
        self.state.base_dir = base_dir;
        self.state.persist_base_dir(self.prefs.as_ref()).await
    }

    /// Absorb a filament snapshot from the subscription
    pub fn on_filament_snapshot(&mut self, records: Vec<FilamentProfile>) {
        self.filaments.observe(records, self.state.enabled);
    }

    /// Absorb a machine snapshot from the subscription
    pub fn on_machine_snapshot(&mut self, records: Vec<Printer>) {
        self.machines.observe(records, self.state.enabled);
    }

    /// Run both categories immediately with the latest snapshots
    ///
    /// Cancels pending debounce windows first; a manual trigger must not
    /// interleave with a scheduled automatic pass. Errors are surfaced to
    /// the caller, unlike automatic passes.
    pub async fn sync_now(&mut self) -> Result<SyncSummary> {
        info!("manual sync requested");
        let base = self
            .state
            .effective_base_dir(self.fs.as_ref())
            .ok_or_else(|| {
                Error::config("no slicer directory configured and no home directory to derive one")
            })?;

        self.filaments.slot.take_now();
        self.machines.slot.take_now();

        let filament = match self.filaments.latest.clone() {
            Some(records) => Some(
                self.filaments
                    .run_pass(&self.reconciler, &base, &records)
                    .await?,
            ),
            None => None,
        };
        let machine = match self.machines.latest.clone() {
            Some(records) => Some(
                self.machines
                    .run_pass(&self.reconciler, &base, &records)
                    .await?,
            ),
            None => None,
        };

        let completed_at = Utc::now();
        if filament.is_some() || machine.is_some() {
            self.state.last_sync = Some(completed_at);
            self.state.persist_last_sync(self.prefs.as_ref()).await?;
        }

        Ok(SyncSummary {
            filament,
            machine,
            completed_at,
        })
    }

    /// Drive the orchestrator until a subscription closes
    ///
    /// Single-threaded and cooperative: snapshots, debounce deadlines, and
    /// passes all run on this task, so no two passes for the same category
    /// can ever overlap.
    pub async fn run(
        &mut self,
        mut filaments: ProfileSubscription<FilamentProfile>,
        mut machines: ProfileSubscription<Printer>,
    ) -> Result<()> {
        info!("sync orchestrator running");
        loop {
            let deadline = self.next_deadline();
            tokio::select! {
                snapshot = filaments.recv() => match snapshot {
                    Some(records) => self.on_filament_snapshot(records),
                    None => break,
                },
                snapshot = machines.recv() => match snapshot {
                    Some(records) => self.on_machine_snapshot(records),
                    None => break,
                },
                () = sleep_until_deadline(deadline) => self.fire_due().await,
            }
        }
        info!("subscription closed, sync orchestrator stopping");
        Ok(())
    }

    /// Earliest pending debounce deadline across categories
    fn next_deadline(&self) -> Option<Instant> {
        match (self.filaments.slot.deadline(), self.machines.slot.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run passes for every category whose quiet window has elapsed
    async fn fire_due(&mut self) {
        let now = Instant::now();
        let base = self.state.effective_base_dir(self.fs.as_ref());
        let mut completed = false;

        if let Some(records) = self.filaments.slot.fire(now) {
            completed |= auto_pass(&self.reconciler, &mut self.filaments, base.as_deref(), &records).await;
        }
        if let Some(records) = self.machines.slot.fire(now) {
            completed |= auto_pass(&self.reconciler, &mut self.machines, base.as_deref(), &records).await;
        }

        if completed {
            self.state.last_sync = Some(Utc::now());
            if let Err(error) = self.state.persist_last_sync(self.prefs.as_ref()).await {
                warn!(%error, "failed to persist last-sync timestamp");
            }
        }
    }
}

impl std::fmt::Debug for SyncOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncOrchestrator")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// One automatic category pass; returns whether a pass actually completed
async fn auto_pass<R: SlicerProfile + Clone>(
    reconciler: &Reconciler,
    category: &mut CategoryState<R>,
    base: Option<&Path>,
    records: &[R],
) -> bool {
    let Some(base) = base else {
        debug!(category = %R::CATEGORY, "no slicer directory configured, skipping automatic sync");
        return false;
    };
    match category.run_pass(reconciler, base, records).await {
        Ok(report) => !report.was_skipped(),
        Err(error) => {
            // Background sync must never interrupt the user
            warn!(category = %R::CATEGORY, %error, "automatic sync failed");
            false
        }
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

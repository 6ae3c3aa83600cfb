//! End-to-end orchestrator scenarios under paused time
//!
//! These drive the full pipeline (subscription push, change detection,
//! debounce window, reconciliation pass) through the orchestrator's event
//! loop, counting filesystem operations to pin down the coalescing and
//! at-most-once delivery guarantees.

use spoolsync_config::{Config, JsonPreferenceStore};
use spoolsync_engine::{keys, subscription, SyncOrchestrator};
use spoolsync_tests::MemoryFileSystem;
use spoolsync_types::{FilamentProfile, PreferenceStore};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn filament(brand: &str, material: &str) -> FilamentProfile {
    let mut profile = FilamentProfile::new_record();
    profile.brand = brand.to_string();
    profile.material = material.to_string();
    profile
}

/// Build an orchestrator over the in-memory filesystem, with its base
/// directory preference pointing at `/slicer`
async fn orchestrator(temp: &TempDir, fs: &Arc<MemoryFileSystem>) -> SyncOrchestrator {
    let prefs = Arc::new(
        JsonPreferenceStore::open(temp.path().join("prefs.json"))
            .await
            .unwrap(),
    );
    prefs.set(keys::SLICER_BASE_DIR, "/slicer").await.unwrap();

    let mut config = Config::default();
    config.sync.auto_sync = true;

    SyncOrchestrator::new(
        &config,
        Arc::clone(fs) as Arc<dyn spoolsync_types::FileSystem>,
        prefs,
    )
    .await
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn three_notifications_coalesce_into_one_pass_using_the_latest() {
    let temp = TempDir::new().unwrap();
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_dir("/slicer");
    let mut orchestrator = orchestrator(&temp, &fs).await;

    let (filaments_tx, filaments) = subscription::channel();
    let (machines_tx, machines) = subscription::channel();
    let runner = tokio::spawn(async move {
        orchestrator.run(filaments, machines).await.unwrap();
    });

    filaments_tx.publish(vec![filament("First", "PLA")]);
    tokio::time::sleep(Duration::from_millis(100)).await;
    filaments_tx.publish(vec![filament("Second", "PLA")]);
    tokio::time::sleep(Duration::from_millis(100)).await;
    filaments_tx.publish(vec![filament("Third", "PLA")]);

    // Ride out the quiet window plus slack
    tokio::time::sleep(Duration::from_millis(1200)).await;

    drop(filaments_tx);
    drop(machines_tx);
    runner.await.unwrap();

    // Exactly one pass ran, with the data from the third notification
    assert_eq!(fs.ops().lists, 1);
    assert_eq!(fs.ops().writes, 1);
    assert_eq!(fs.file_names_in("/slicer"), vec!["SpoolSync Third PLA.json"]);
}

#[tokio::test(start_paused = true)]
async fn identical_snapshot_causes_zero_filesystem_operations() {
    let temp = TempDir::new().unwrap();
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_dir("/slicer");
    let mut orchestrator = orchestrator(&temp, &fs).await;

    let (filaments_tx, filaments) = subscription::channel();
    let (machines_tx, machines) = subscription::channel();
    let runner = tokio::spawn(async move {
        orchestrator.run(filaments, machines).await.unwrap();
    });

    let snapshot = vec![filament("Prusa", "PLA"), filament("Polymaker", "PETG")];
    filaments_tx.publish(snapshot.clone());
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(fs.ops().writes, 2);
    let after_first = fs.ops();

    // Same records again (fresh snapshot delivery, same content)
    filaments_tx.publish(snapshot);
    tokio::time::sleep(Duration::from_millis(1500)).await;

    drop(filaments_tx);
    drop(machines_tx);
    runner.await.unwrap();

    let after_second = fs.ops();
    assert_eq!(after_second.writes, after_first.writes);
    assert_eq!(after_second.deletes, after_first.deletes);
    assert_eq!(after_second.lists, after_first.lists);
}

#[tokio::test(start_paused = true)]
async fn transient_write_failure_does_not_cause_a_retry_storm() {
    let temp = TempDir::new().unwrap();
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_dir("/slicer");
    fs.fail_writes_to("/slicer/SpoolSync Bad PETG.json");
    let mut orchestrator = orchestrator(&temp, &fs).await;

    let (filaments_tx, filaments) = subscription::channel();
    let (machines_tx, machines) = subscription::channel();
    let runner = tokio::spawn(async move {
        orchestrator.run(filaments, machines).await.unwrap();
    });

    let snapshot = vec![filament("Bad", "PETG"), filament("Good", "PLA")];
    filaments_tx.publish(snapshot.clone());
    tokio::time::sleep(Duration::from_millis(1200)).await;

    // One write failed, one landed; the pass still counts as delivered
    assert_eq!(fs.ops().writes, 2);
    assert_eq!(fs.file_names_in("/slicer"), vec!["SpoolSync Good PLA.json"]);

    // The same snapshot again must not replay the pass: delivery is
    // at-most-once per change, the next real change retries naturally
    filaments_tx.publish(snapshot);
    tokio::time::sleep(Duration::from_millis(1500)).await;

    drop(filaments_tx);
    drop(machines_tx);
    runner.await.unwrap();
    assert_eq!(fs.ops().writes, 2);
}

#[tokio::test(start_paused = true)]
async fn failed_pass_retries_on_the_next_notification() {
    let temp = TempDir::new().unwrap();
    let fs = Arc::new(MemoryFileSystem::new());
    // No /slicer directory yet: listing fails and the pass aborts
    let mut orchestrator = orchestrator(&temp, &fs).await;

    let (filaments_tx, filaments) = subscription::channel();
    let (machines_tx, machines) = subscription::channel();
    let runner = tokio::spawn(async move {
        orchestrator.run(filaments, machines).await.unwrap();
    });

    let snapshot = vec![filament("Prusa", "PLA")];
    filaments_tx.publish(snapshot.clone());
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(fs.ops().writes, 0);

    // The aborted pass did not update the fingerprint, so the identical
    // snapshot schedules again once the directory exists
    fs.add_dir("/slicer");
    filaments_tx.publish(snapshot);
    tokio::time::sleep(Duration::from_millis(1200)).await;

    drop(filaments_tx);
    drop(machines_tx);
    runner.await.unwrap();
    assert_eq!(fs.file_names_in("/slicer"), vec!["SpoolSync Prusa PLA.json"]);
}

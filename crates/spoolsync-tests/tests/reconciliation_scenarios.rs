//! Reconciliation scenarios against the in-memory filesystem double
//!
//! These exercise the reconciler's convergence, ownership, and error
//! isolation guarantees file operation by file operation.

use spoolsync_sync::Reconciler;
use spoolsync_tests::MemoryFileSystem;
use spoolsync_types::{FilamentProfile, Printer, Scalar};
use std::path::Path;
use std::sync::Arc;

fn filament(brand: &str, material: &str) -> FilamentProfile {
    let mut profile = FilamentProfile::new_record();
    profile.brand = brand.to_string();
    profile.material = material.to_string();
    profile
}

fn harness() -> (Arc<MemoryFileSystem>, Reconciler) {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_dir("/slicer");
    let reconciler = Reconciler::new(Arc::clone(&fs) as Arc<dyn spoolsync_types::FileSystem>);
    (fs, reconciler)
}

#[tokio::test]
async fn converges_from_arbitrary_starting_state() {
    let (fs, reconciler) = harness();
    fs.add_file("/slicer/SpoolSync Stale PLA.json", "{}");
    fs.add_file("/slicer/SpoolSync Another PETG.json", "{}");
    fs.add_file("/slicer/usersettings.json", "user data");

    let desired = vec![filament("Prusa", "PLA"), filament("Polymaker", "PETG")];
    let report = reconciler
        .reconcile(Path::new("/slicer"), &desired)
        .await
        .unwrap();

    assert_eq!(report.files_written, 2);
    assert_eq!(report.files_deleted, 2);
    assert!(report.is_clean());

    // The owned-file set now equals the canonical names of the desired set,
    // and nothing else was touched
    assert_eq!(
        fs.file_names_in("/slicer"),
        vec![
            "SpoolSync Polymaker PETG.json",
            "SpoolSync Prusa PLA.json",
            "usersettings.json",
        ]
    );
    assert_eq!(fs.content("/slicer/usersettings.json").unwrap(), "user data");
}

#[tokio::test]
async fn desired_profile_file_contains_expected_overrides() {
    let (fs, reconciler) = harness();

    let mut profile = filament("Prusa", "PLA");
    profile.printer_name = Some("X1C".to_string());
    profile.enable_retraction = true;
    profile.retraction_length = Some(Scalar::from("0.5"));
    profile.zhop_type = Some("None".to_string());

    reconciler
        .reconcile(Path::new("/slicer"), &[profile])
        .await
        .unwrap();

    assert_eq!(fs.file_names_in("/slicer"), vec!["SpoolSync Prusa PLA.json"]);
    let content = fs.content("/slicer/SpoolSync Prusa PLA.json").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(
        parsed["filament_retraction_length"],
        serde_json::json!(["0.5"])
    );
    assert_eq!(parsed["compatible_printers"], serde_json::json!(["X1C"]));
    assert!(parsed.get("filament_z_hop_types").is_none());
}

#[tokio::test]
async fn empty_desired_set_deletes_only_owned_files() {
    let (fs, reconciler) = harness();
    fs.add_file("/slicer/SpoolSync OldBrand OldType.json", "{}");
    fs.add_file("/slicer/usersettings.json", "{}");

    let report = reconciler
        .reconcile::<FilamentProfile>(Path::new("/slicer"), &[])
        .await
        .unwrap();

    assert_eq!(report.files_deleted, 1);
    assert_eq!(report.files_written, 0);
    assert_eq!(fs.file_names_in("/slicer"), vec!["usersettings.json"]);
}

#[tokio::test]
async fn per_file_failures_do_not_abort_the_pass() {
    let (fs, reconciler) = harness();
    fs.add_file("/slicer/SpoolSync Doomed PLA.json", "{}");
    fs.fail_deletes_of("/slicer/SpoolSync Doomed PLA.json");
    fs.fail_writes_to("/slicer/SpoolSync Bad PETG.json");

    let desired = vec![filament("Bad", "PETG"), filament("Good", "PLA")];
    let report = reconciler
        .reconcile(Path::new("/slicer"), &desired)
        .await
        .unwrap();

    // Both failures are counted, and the healthy file still landed
    assert_eq!(report.delete_failures, 1);
    assert_eq!(report.write_failures, 1);
    assert_eq!(report.files_written, 1);
    assert!(!report.is_clean());
    assert!(fs.content("/slicer/SpoolSync Good PLA.json").is_some());
}

#[tokio::test]
async fn machine_category_requires_the_expected_layout() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_dir("/slicer");
    let reconciler = Reconciler::new(Arc::clone(&fs) as Arc<dyn spoolsync_types::FileSystem>);

    let mut printer = Printer::new_record();
    printer.name = "Voron".to_string();

    // Without user/default/machine the pass is skipped with no side effects
    let report = reconciler
        .reconcile(Path::new("/slicer"), &[printer.clone()])
        .await
        .unwrap();
    assert!(report.was_skipped());
    assert_eq!(fs.ops().writes, 0);

    // With the layout present the profile lands inside it
    fs.add_dir("/slicer/user/default/machine");
    let report = reconciler
        .reconcile(Path::new("/slicer"), &[printer])
        .await
        .unwrap();
    assert!(!report.was_skipped());
    assert_eq!(
        fs.file_names_in("/slicer/user/default/machine"),
        vec!["SpoolSync Voron.json"]
    );
}

#[tokio::test]
async fn filament_category_prefers_the_expected_layout() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_dir("/slicer/user/default/filament");
    let reconciler = Reconciler::new(Arc::clone(&fs) as Arc<dyn spoolsync_types::FileSystem>);

    reconciler
        .reconcile(Path::new("/slicer"), &[filament("Prusa", "PLA")])
        .await
        .unwrap();

    assert_eq!(
        fs.file_names_in("/slicer/user/default/filament"),
        vec!["SpoolSync Prusa PLA.json"]
    );
    assert!(fs.file_names_in("/slicer").is_empty());
}

#[tokio::test]
async fn colliding_names_resolve_to_the_last_record_in_snapshot_order() {
    let (fs, reconciler) = harness();

    let mut first = filament("Prusa", "PLA");
    first.color = "#FF0000".to_string();
    let mut second = filament("Prusa", "PLA");
    second.color = "#0000FF".to_string();

    let report = reconciler
        .reconcile(Path::new("/slicer"), &[first, second])
        .await
        .unwrap();

    // Accepted collision surface: both records write the same file, the
    // later one wins
    assert_eq!(report.files_written, 2);
    assert_eq!(fs.file_names_in("/slicer"), vec!["SpoolSync Prusa PLA.json"]);
    let content = fs.content("/slicer/SpoolSync Prusa PLA.json").unwrap();
    assert!(content.contains("#0000FF"));
}

//! Profile-to-file reconciliation engine for SpoolSync
//!
//! This crate decides, given the current set of cloud profiles, what files
//! should exist in the slicer's configuration directory, and safely converges
//! the filesystem to that state:
//!
//! - **Filename policy**: an ownership prefix marks the files this system
//!   manages, so orphan deletion can never touch user or vendor files
//! - **Directory resolution**: the expected `user/default/<category>` layout
//!   with a deliberate fallback asymmetry between categories
//! - **Change detection**: cheap fingerprints over the output-relevant
//!   projection of a snapshot, so irrelevant record edits cause no churn
//! - **Debouncing**: bursts of subscription pushes collapse into a single
//!   pass using the latest snapshot
//! - **Reconciliation**: diff-and-apply with per-file error isolation
//!
//! # Examples
//!
//! ```rust
//! use spoolsync_sync::{LocalFileSystem, Reconciler};
//! use spoolsync_types::FilamentProfile;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reconciler = Reconciler::new(Arc::new(LocalFileSystem::new()));
//! let profiles = vec![FilamentProfile::new_record()];
//! let report = reconciler.reconcile(Path::new("/tmp/slicer"), &profiles).await?;
//! println!("wrote {} profile files", report.files_written);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod debounce;
pub mod detector;
pub mod fs;
pub mod naming;
pub mod reconciler;
pub mod record;
pub mod resolver;

pub use debounce::DebounceSlot;
pub use detector::{fingerprint_snapshot, ChangeDetector, Fingerprint};
pub use fs::LocalFileSystem;
pub use naming::{canonical_name, is_owned, OWNERSHIP_PREFIX, PROFILE_EXTENSION};
pub use reconciler::{ReconcilePhase, ReconcileReport, Reconciler};
pub use record::SlicerProfile;
pub use resolver::{resolve_target_dir, TargetDir};

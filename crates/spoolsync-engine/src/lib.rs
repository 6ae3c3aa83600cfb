//! Sync orchestration engine for SpoolSync
//!
//! This crate composes the reconciliation engine into the long-running
//! orchestrator that reacts to cloud subscription pushes:
//!
//! - **State**: explicit [`SyncState`] loaded from the preference store at
//!   startup and persisted on every change
//! - **Subscriptions**: a channel pair modeling the cloud live-query, which
//!   delivers the complete record set on every change
//! - **Orchestration**: change detection, debounce timing, manual triggers,
//!   and the manual/automatic error-surfacing split
//!
//! # Examples
//!
//! ```rust,no_run
//! use spoolsync_config::{Config, JsonPreferenceStore};
//! use spoolsync_engine::{subscription, SyncOrchestrator};
//! use spoolsync_sync::LocalFileSystem;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let prefs = Arc::new(JsonPreferenceStore::open("prefs.json").await?);
//! let mut orchestrator =
//!     SyncOrchestrator::new(&config, Arc::new(LocalFileSystem::new()), prefs).await?;
//!
//! let (filaments_tx, filaments) = subscription::channel();
//! let (_machines_tx, machines) = subscription::channel();
//! filaments_tx.publish(vec![spoolsync_types::FilamentProfile::new_record()]);
//! orchestrator.run(filaments, machines).await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod orchestrator;
pub mod state;
pub mod subscription;

pub use orchestrator::{SyncOrchestrator, SyncSummary};
pub use state::{keys, SyncState};
pub use subscription::{ProfileSubscription, SnapshotSender};

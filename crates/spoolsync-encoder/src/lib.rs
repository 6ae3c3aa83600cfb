//! Vendor profile document encoding for SpoolSync
//!
//! This crate turns domain records into the JSON documents the slicer
//! application consumes:
//!
//! - **Pure encoding**: total functions from record to document, never I/O
//! - **Defaulting**: every numeric field substitutes a documented default
//!   when the stored value is absent, empty, or not a number
//! - **Conditional overrides**: override keys are emitted only when their
//!   enable flag is set; an absent key is how the consuming application
//!   knows no override is in effect
//! - **Stable output**: documents serialize with a fixed key order so
//!   diff-based tooling sees byte-identical output for identical records
//!
//! # Examples
//!
//! ```rust
//! use spoolsync_encoder::encode_filament;
//! use spoolsync_types::FilamentProfile;
//!
//! let mut profile = FilamentProfile::new_record();
//! profile.brand = "Prusa".to_string();
//! let document = encode_filament(&profile);
//! assert!(document.to_json_pretty().contains("filament_vendor"));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod filament;
pub mod machine;

pub use document::ProfileDocument;
pub use filament::encode_filament;
pub use machine::encode_machine;

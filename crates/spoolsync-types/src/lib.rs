//! Core type system and error handling for SpoolSync
//!
//! This crate provides the foundational types shared across the SpoolSync
//! workspace. It includes:
//!
//! - **Domain records**: `FilamentProfile` and `Printer`, the canonical typed
//!   shapes of the cloud datastore's documents
//! - **Loose scalars**: the `Scalar` type and coercion helpers that absorb the
//!   datastore's habit of storing numbers as strings
//! - **Error handling**: a structured error type with kind classification
//! - **Capabilities**: async traits for the filesystem and preference store
//!   the reconciliation engine runs against
//!
//! # Examples
//!
//! ```rust
//! use spoolsync_types::{field, FilamentProfile, Scalar};
//!
//! let mut profile = FilamentProfile::new_record();
//! profile.brand = "Prusa".to_string();
//! profile.diameter = Some(Scalar::Text("1.75".to_string()));
//!
//! assert_eq!(field::numeric_or(profile.diameter.as_ref(), "1.75"), "1.75");
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod category;
pub mod error;
pub mod field;
pub mod filament;
pub mod printer;
pub mod result;
pub mod traits;

// Re-export commonly used types
pub use category::ProfileCategory;
pub use error::{Error, ErrorKind};
pub use field::Scalar;
pub use filament::FilamentProfile;
pub use printer::{Printer, RetractionMode};
pub use result::Result;
pub use traits::{FileSystem, PreferenceStore};

//! The seam between domain records and the reconciliation engine
//!
//! [`SlicerProfile`] ties a record type to its category, canonical file
//! name, and encoded document. The reconciler and change detector work
//! against this trait only, so they are identical for both categories.

use crate::naming;
use spoolsync_encoder::{encode_filament, encode_machine};
use spoolsync_types::{FilamentProfile, Printer, ProfileCategory};

/// A record that can be reconciled into a slicer profile file
pub trait SlicerProfile: Send + Sync {
    /// Category this record type syncs into
    const CATEGORY: ProfileCategory;

    /// Canonical on-disk file name for this record
    fn canonical_file_name(&self) -> String;

    /// Encode this record as the vendor document string
    fn encode(&self) -> String;
}

impl SlicerProfile for FilamentProfile {
    const CATEGORY: ProfileCategory = ProfileCategory::Filament;

    fn canonical_file_name(&self) -> String {
        naming::canonical_name(&self.display_name())
    }

    fn encode(&self) -> String {
        encode_filament(self).to_json_pretty()
    }
}

impl SlicerProfile for Printer {
    const CATEGORY: ProfileCategory = ProfileCategory::Machine;

    fn canonical_file_name(&self) -> String {
        naming::canonical_name(&self.name)
    }

    fn encode(&self) -> String {
        encode_machine(self).to_json_pretty()
    }
}

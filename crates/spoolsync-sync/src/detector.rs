//! Snapshot change detection
//!
//! Fingerprints cover the output-relevant projection of a snapshot: the
//! canonical file name and encoded document of each record, in the order the
//! subscription delivered them. Record ids and display-only fields never
//! reach the encoded output, so edits to them cannot trigger a sync.
//! Because the projection keeps snapshot order, reordering an otherwise
//! unchanged set does read as a change, a known inefficiency that costs one
//! redundant pass.

use crate::record::SlicerProfile;
use xxhash_rust::xxh3::Xxh3;

/// A cheap comparable digest of a snapshot's output-relevant projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Fingerprint a snapshot of records
pub fn fingerprint_snapshot<R: SlicerProfile>(records: &[R]) -> Fingerprint {
    let mut hasher = Xxh3::new();
    for record in records {
        hasher.update(record.canonical_file_name().as_bytes());
        hasher.update(&[0]);
        hasher.update(record.encode().as_bytes());
        hasher.update(&[0]);
    }
    Fingerprint(hasher.digest())
}

/// Tracks the fingerprint of the last reconciled snapshot for one category
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last: Option<Fingerprint>,
}

impl ChangeDetector {
    /// Create a detector with no reconciled snapshot yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a snapshot differs from the last reconciled one
    ///
    /// Always true before the first commit.
    pub fn has_changed(&self, fingerprint: Fingerprint) -> bool {
        self.last != Some(fingerprint)
    }

    /// Record a snapshot as reconciled
    pub fn commit(&mut self, fingerprint: Fingerprint) {
        self.last = Some(fingerprint);
    }

    /// The last committed fingerprint, if any
    pub fn last(&self) -> Option<Fingerprint> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoolsync_types::FilamentProfile;

    fn profile(id: &str, brand: &str) -> FilamentProfile {
        let mut profile = FilamentProfile::new_record();
        profile.id = id.to_string();
        profile.brand = brand.to_string();
        profile
    }

    #[test]
    fn test_identical_snapshots_share_a_fingerprint() {
        let a = vec![profile("1", "Prusa"), profile("2", "Polymaker")];
        let b = vec![profile("1", "Prusa"), profile("2", "Polymaker")];
        assert_eq!(fingerprint_snapshot(&a), fingerprint_snapshot(&b));
    }

    #[test]
    fn test_record_ids_are_outside_the_projection() {
        // Only output-relevant fields may trigger a sync
        let a = vec![profile("1", "Prusa")];
        let b = vec![profile("totally-different-id", "Prusa")];
        assert_eq!(fingerprint_snapshot(&a), fingerprint_snapshot(&b));
    }

    #[test]
    fn test_output_relevant_edit_changes_fingerprint() {
        let a = vec![profile("1", "Prusa")];
        let mut edited = profile("1", "Prusa");
        edited.nozzle_temp = Some(spoolsync_types::Scalar::from("215"));
        let b = vec![edited];
        assert_ne!(fingerprint_snapshot(&a), fingerprint_snapshot(&b));
    }

    #[test]
    fn test_reordering_reads_as_a_change() {
        // Projection keeps subscription order; a reorder costs one
        // redundant pass
        let a = vec![profile("1", "Prusa"), profile("2", "Polymaker")];
        let b = vec![profile("2", "Polymaker"), profile("1", "Prusa")];
        assert_ne!(fingerprint_snapshot(&a), fingerprint_snapshot(&b));
    }

    #[test]
    fn test_detector_lifecycle() {
        let mut detector = ChangeDetector::new();
        let fingerprint = fingerprint_snapshot(&[profile("1", "Prusa")]);

        assert!(detector.has_changed(fingerprint));
        detector.commit(fingerprint);
        assert!(!detector.has_changed(fingerprint));
        assert_eq!(detector.last(), Some(fingerprint));

        let other = fingerprint_snapshot(&[profile("1", "Polymaker")]);
        assert!(detector.has_changed(other));
    }
}

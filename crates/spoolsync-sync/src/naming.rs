//! Filename policy for owned profile files
//!
//! Every file this system writes carries a fixed ownership prefix. The
//! prefix is what makes orphan deletion safe: a reconciliation pass only
//! ever deletes files whose names it would itself have generated, so
//! user-authored and vendor-shipped files sharing the directory are never
//! touched.

/// Prefix marking a file as managed by this system
pub const OWNERSHIP_PREFIX: &str = "SpoolSync ";

/// Extension of generated profile files
pub const PROFILE_EXTENSION: &str = ".json";

/// Canonical on-disk file name for a record's identifying fields
///
/// Two records with identical identifying fields produce the same name and
/// silently overwrite each other on disk. That is accepted policy; the
/// identifying fields are the identity as far as the slicer is concerned.
pub fn canonical_name(identity: &str) -> String {
    format!("{OWNERSHIP_PREFIX}{}{PROFILE_EXTENSION}", identity.trim())
}

/// Whether a directory entry is owned by this system
pub fn is_owned(file_name: &str) -> bool {
    file_name.starts_with(OWNERSHIP_PREFIX) && file_name.ends_with(PROFILE_EXTENSION)
}

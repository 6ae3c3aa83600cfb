//! Result type alias for SpoolSync operations

use crate::Error;

/// Result type alias for SpoolSync operations
pub type Result<T> = std::result::Result<T, Error>;

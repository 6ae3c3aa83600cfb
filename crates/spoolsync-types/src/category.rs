//! Profile categories and their on-disk layout constants

use serde::{Deserialize, Serialize};

/// Category of a synced profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileCategory {
    /// Filament material profiles
    Filament,
    /// Printer machine profiles
    Machine,
}

impl ProfileCategory {
    /// Subdirectory name this category uses below `user/default/` in the
    /// slicer configuration tree
    pub fn subdir(&self) -> &'static str {
        match self {
            Self::Filament => "filament",
            Self::Machine => "machine",
        }
    }
}

impl std::fmt::Display for ProfileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.subdir())
    }
}

//! Error types and handling for SpoolSync
//!
//! This module provides the structured error type used throughout the
//! SpoolSync workspace, with kind classification and constructor helpers.

use std::path::PathBuf;

/// Main error type for SpoolSync operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found
        path: PathBuf,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Preference store error
    #[error("Preference store error: {message}")]
    Preference {
        /// Error message describing the preference store issue
        message: String,
    },

    /// Synchronization error
    #[error("Synchronization error: {message}")]
    Sync {
        /// Error message describing the synchronization issue
        message: String,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Other {
        /// Custom error message
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// I/O related errors
    Io,
    /// Configuration errors
    Config,
    /// Preference store errors
    Preference,
    /// Synchronization errors
    Sync,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } | Self::FileNotFound { .. } => ErrorKind::Io,
            Self::Config { .. } => ErrorKind::Config,
            Self::Preference { .. } => ErrorKind::Preference,
            Self::Sync { .. } => ErrorKind::Sync,
            Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new preference store error
    pub fn preference<S: Into<String>>(message: S) -> Self {
        Self::Preference {
            message: message.into(),
        }
    }

    /// Create a new sync error
    pub fn sync<S: Into<String>>(message: S) -> Self {
        Self::Sync {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(Error::config("bad").kind(), ErrorKind::Config);
        assert_eq!(Error::sync("oops").kind(), ErrorKind::Sync);
        assert_eq!(
            Error::FileNotFound {
                path: PathBuf::from("missing.json")
            }
            .kind(),
            ErrorKind::Io
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = Error::from(io_error);
        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.to_string().contains("gone"));
    }
}

//! Error types for contentcopy

use std::path::PathBuf;
use thiserror::Error;

/// Error types for merge operations
#[derive(Debug, Error)]
pub enum MergeError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal failed
    #[error("Walk error at {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be opened or read while hashing
    #[error("Hash error for {path}: {source}")]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying a planned entry failed
    #[error("Copy error {from} => {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path has no usable file name to place in the destination root
    #[error("Cannot derive a file name from {path}")]
    Naming { path: PathBuf },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error (logic checks)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Some copies failed while running with a continue-on-error policy
    #[error("Merge finished with {failed} of {total} copies failed")]
    PartialFailure { failed: usize, total: usize },
}

impl MergeError {
    /// Check if this error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, MergeError::Validation(_) | MergeError::Config(_))
    }

    /// Check if this error is tied to a single file and could be skipped
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            MergeError::Hash { .. } | MergeError::Copy { .. } | MergeError::Naming { .. }
        )
    }
}

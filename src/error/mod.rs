//! # Error Module
//!
//! Error types for the deduplication engine.
//!
//! ## Severity
//! - `ScanError` is fatal to the scan that raised it
//! - `HashError` is recoverable: the file is left out of its group
//! - `DeleteError::Remove` is recoverable: the batch keeps going
//! - `DeleteError::AllFailed` is reported when nothing could be removed

use std::path::PathBuf;
use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug)]
pub enum DedupError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Deletion error: {0}")]
    Delete(#[from] DeleteError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that abort a directory scan
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to traverse {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Per-file hashing failures (content or perceptual)
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    EmptyImage { path: PathBuf },
}

impl HashError {
    /// Path of the file that failed
    pub fn path(&self) -> &PathBuf {
        match self {
            HashError::Io { path, .. }
            | HashError::Decode { path, .. }
            | HashError::EmptyImage { path } => path,
        }
    }
}

/// Errors raised by the similarity grouper
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Invalid threshold: {value} (must be 0-64)")]
    InvalidThreshold { value: u32 },
}

/// Errors raised while deleting selected files
#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("Failed to delete {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("All {failed} deletions failed, last error: {last}")]
    AllFailed {
        failed: usize,
        #[source]
        last: Box<DeleteError>,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DedupError>;

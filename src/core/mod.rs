//! # Core Module
//!
//! The UI-agnostic deduplication engine.
//!
//! ## Modules
//! - `scanner` - Enumerates regular files under a root
//! - `bucket` - Groups files by exact size
//! - `content` - SHA-256 content digests
//! - `pipeline` - Worker pool and the scan-to-groups orchestrator
//! - `duplicates` - Exact duplicate groups
//! - `hasher` - Perceptual (dHash) image hashes
//! - `similar` - Groups images around a seed by Hamming distance
//! - `deletion` - Removes selected files

pub mod bucket;
pub mod content;
pub mod deletion;
pub mod duplicates;
pub mod hasher;
pub mod pipeline;
pub mod scanner;
pub mod similar;

// Re-export commonly used types
pub use deletion::{DeleteReport, DeletionExecutor};
pub use duplicates::{DuplicateGroup, FileRecord, FileSet};
pub use hasher::{DHash, PerceptualHash};
pub use pipeline::{Deduplicator, HashReport};
pub use similar::SimilarGroup;

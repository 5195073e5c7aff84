//! # File Deduplicator
//!
//! Finds byte-identical files and visually similar images under a
//! directory, and deletes the copies a caller selects.
//!
//! ## Architecture
//! The library is a UI-agnostic engine with two entry contracts:
//! - **Scan and group** - [`core::pipeline::Deduplicator`] walks a root,
//!   buckets files by size, SHA-256 hashes the candidates on a bounded
//!   worker pool and groups exact duplicates. Images are additionally
//!   grouped by perceptual similarity.
//! - **Delete** - [`core::deletion::DeletionExecutor`] removes exactly the
//!   records marked `selected` and reports freed space.
//!
//! Progress is published through [`events`]; errors live in [`error`].

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{DedupError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. Verbosity is
/// taken from `RUST_LOG`, defaulting to warnings only.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // A subscriber installed earlier (e.g. by a test harness) wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

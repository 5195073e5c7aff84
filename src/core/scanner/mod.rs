//! # Scanner Module
//!
//! Enumerates the regular, non-empty files under a root directory.
//!
//! A scan is all-or-nothing: the first unreadable entry aborts it with a
//! [`ScanError`]. Symlinks are not followed unless configured, and when
//! they are, walkdir's loop detection surfaces a cycle as a traversal
//! error.
//!
//! ## Example
//! ```rust,ignore
//! use file_deduplicator::core::scanner::{FileScanner, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let files = scanner.scan(Path::new("/data/photos"))?;
//! ```

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use crate::events::EventSender;
use std::path::{Path, PathBuf};

/// Trait for directory scanners
///
/// Implement this trait to feed the pipeline from another source (e.g. in tests).
pub trait FileScanner: Send + Sync {
    /// Return absolute paths of every non-empty regular file under `root`
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError>;

    /// Same as [`FileScanner::scan`], reporting progress via events
    fn scan_with_events(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<Vec<PathBuf>, ScanError>;
}

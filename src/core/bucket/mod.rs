//! # Bucket Module
//!
//! Groups files by exact byte size before any content is read.
//!
//! A file whose size no other file shares cannot have an exact duplicate,
//! so only buckets with two or more members are handed to the hashing
//! pipeline.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Files grouped by size, plus the running size total
#[derive(Debug, Default)]
pub struct SizeBuckets {
    buckets: BTreeMap<u64, Vec<PathBuf>>,
    total_bytes: u64,
    unreadable: usize,
}

impl SizeBuckets {
    /// Stat every path and bucket it by size.
    ///
    /// Paths that can no longer be stat'ed are left out and counted.
    pub fn build(paths: &[PathBuf]) -> Self {
        let mut buckets = Self::default();
        for path in paths {
            match fs::metadata(path) {
                Ok(metadata) => buckets.insert(path.clone(), metadata.len()),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "stat failed, skipping");
                    buckets.unreadable += 1;
                }
            }
        }
        buckets
    }

    /// Add a path with a known size
    pub fn insert(&mut self, path: PathBuf, size: u64) {
        self.total_bytes += size;
        self.buckets.entry(size).or_default().push(path);
    }

    /// Sum of the sizes of every bucketed file
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Number of files bucketed
    pub fn file_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Number of paths whose stat failed
    pub fn unreadable(&self) -> usize {
        self.unreadable
    }

    /// Paths in buckets of two or more, flattened into a work list.
    ///
    /// Ordered by size, then by discovery order within a size.
    pub fn candidates(&self) -> Vec<PathBuf> {
        self.buckets
            .values()
            .filter(|paths| paths.len() > 1)
            .flatten()
            .cloned()
            .collect()
    }

    /// Files whose size is unique and which are therefore never hashed
    pub fn singleton_count(&self) -> usize {
        self.buckets.values().filter(|paths| paths.len() == 1).count()
    }
}

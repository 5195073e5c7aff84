//! Types for similar image detection.

use crate::core::duplicates::{FileRecord, FileSet};
use serde::{Deserialize, Serialize};

/// Images within the threshold of a common seed image.
///
/// `files[0]` is the seed. Every other member is within the threshold of
/// the seed, but two non-seed members may be further apart than that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarGroup {
    pub files: Vec<FileRecord>,
    /// 0-100, derived from the average distance of members to the seed
    pub similarity: f64,
}

impl SimilarGroup {
    /// The image every other member was compared against
    pub fn seed(&self) -> &FileRecord {
        &self.files[0]
    }

    /// Combined size of every member
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

impl FileSet for SimilarGroup {
    fn files(&self) -> &[FileRecord] {
        &self.files
    }

    fn files_mut(&mut self) -> &mut [FileRecord] {
        &mut self.files
    }
}

/// Similarity percentage for a truncated average distance to the seed
pub fn similarity_percent(average_distance: u32) -> f64 {
    100.0 - (average_distance as f64 / 64.0) * 100.0
}

//! Records and groups produced by exact-duplicate detection.

use crate::core::content::FileDigest;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One file inside a duplicate or similarity group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Marked for deletion by the caller. Nothing happens until the
    /// deletion executor runs.
    #[serde(default)]
    pub selected: bool,
}

impl FileRecord {
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            selected: false,
        }
    }
}

/// A set of files that can be handed to the deletion executor
pub trait FileSet {
    fn files(&self) -> &[FileRecord];

    fn files_mut(&mut self) -> &mut [FileRecord];

    /// Number of members currently marked for deletion
    fn selected_count(&self) -> usize {
        self.files().iter().filter(|f| f.selected).count()
    }

    /// Bytes that deleting the selected members would free
    fn selected_bytes(&self) -> u64 {
        self.files()
            .iter()
            .filter(|f| f.selected)
            .map(|f| f.size)
            .sum()
    }
}

/// Files sharing one content digest. Always has two or more members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Hex content digest shared by every member
    pub digest: String,
    /// Members in discovery order
    pub files: Vec<FileRecord>,
    /// Size of one member
    pub size: u64,
}

impl DuplicateGroup {
    /// Space held by the redundant copies: size × (members − 1)
    pub fn wasted_bytes(&self) -> u64 {
        self.size * self.files.len().saturating_sub(1) as u64
    }

    /// Number of redundant copies
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }
}

impl FileSet for DuplicateGroup {
    fn files(&self) -> &[FileRecord] {
        &self.files
    }

    fn files_mut(&mut self) -> &mut [FileRecord] {
        &mut self.files
    }
}

/// A successfully hashed candidate, tagged with its work-list position
#[derive(Debug, Clone)]
pub struct HashedFile {
    /// Position of the path in the candidate work list
    pub index: usize,
    pub path: PathBuf,
    pub digest: FileDigest,
}

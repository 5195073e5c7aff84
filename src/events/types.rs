//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the deduplication engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Directory scan events
    Scan(ScanEvent),
    /// Content hashing events
    Hash(HashEvent),
    /// Similarity grouping events
    Compare(CompareEvent),
    /// Deletion events
    Delete(DeleteEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events during the scanning phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started { root: PathBuf },
    /// Progress update, sent once per directory entered
    Progress(ScanProgress),
    /// Scanning completed
    Completed { total_files: usize },
}

/// Progress information during scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanProgress {
    pub directories_scanned: usize,
    pub files_found: usize,
    pub current_path: PathBuf,
}

/// Events during content hashing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HashEvent {
    /// Hashing has started for the size-bucket candidates
    Started { total_candidates: usize },
    /// One candidate finished (successfully or not)
    Progress(HashProgress),
    /// A candidate could not be read and was left out
    Error { path: PathBuf, message: String },
    /// Hashing completed
    Completed { hashed: usize, failed: usize },
}

/// Progress information during hashing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashProgress {
    /// Number of results collected so far
    pub completed: usize,
    /// Total number of candidates
    pub total: usize,
    /// File whose result was just collected
    pub current_path: PathBuf,
}

/// Events during similarity grouping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CompareEvent {
    Started { total_images: usize },
    Completed { total_groups: usize },
}

/// Events during deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DeleteEvent {
    /// Deletion started for this many selected files
    Started { selected: usize },
    /// A file was removed
    Deleted { path: PathBuf, bytes: u64 },
    /// A file could not be removed; the batch continues
    Failed { path: PathBuf, message: String },
    Completed { deleted: usize, freed_bytes: u64 },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Scan and grouping finished
    Completed { summary: PipelineSummary },
}

/// Phases a caller walks through between scanning and deleting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Scanning,
    Hashing,
    Grouping,
    Comparing,
    Deleting,
}

/// Summary of a scan-and-group run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Files that went through the size bucketer
    pub total_files: usize,
    /// Exact duplicate groups found
    pub duplicate_groups: usize,
    /// Similar image groups found
    pub similar_groups: usize,
    /// Bytes held by redundant exact copies
    pub wasted_bytes: u64,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::Hashing => write!(f, "Hashing"),
            PipelinePhase::Grouping => write!(f, "Grouping"),
            PipelinePhase::Comparing => write!(f, "Comparing images"),
            PipelinePhase::Deleting => write!(f, "Deleting"),
        }
    }
}

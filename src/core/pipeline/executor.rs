//! Pipeline execution: scan, bucket, hash, group.

use super::pool::HashingPool;
use crate::core::bucket::SizeBuckets;
use crate::core::content::{ContentHasher, Sha256Hasher};
use crate::core::duplicates::{DigestGrouper, DuplicateGroup, FileRecord};
use crate::core::hasher::{DHash, DifferenceHasher, ImageHasher};
use crate::core::scanner::{FileScanner, ImageFilter, ScanConfig, WalkDirScanner};
use crate::core::similar::{SeedGrouper, SimilarGroup, ThresholdStrategy};
use crate::error::{DedupError, HashError};
use crate::events::{
    null_sender, CompareEvent, Event, EventSender, HashEvent, PipelineEvent, PipelinePhase,
    PipelineSummary,
};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Result of a hash-and-group run
#[derive(Debug, Default, Serialize)]
pub struct HashReport {
    /// Exact duplicate groups
    pub duplicates: Vec<DuplicateGroup>,
    /// Similar image groups
    pub similar_images: Vec<SimilarGroup>,
    /// Files that could be stat'ed
    pub total_files: usize,
    /// Combined size of every stat'ed file
    pub total_bytes: u64,
    /// Bytes held by redundant exact copies
    pub wasted_bytes: u64,
    /// Files sent to the hashing pool
    pub candidates: usize,
    /// Candidates hashed successfully
    pub hashed: usize,
    /// Candidates that could not be read
    pub failed: usize,
    /// Images with a perceptual hash
    pub images_hashed: usize,
    /// Images that failed to decode
    pub images_skipped: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct DedupConfig {
    /// Maximum Hamming distance for similar images
    pub threshold: u32,
    /// Hashing threads (0 = one per available core)
    pub workers: usize,
    /// Capacity of the bounded work queue
    pub queue_capacity: usize,
    /// Whether to run perceptual hashing at all
    pub detect_similar: bool,
    /// Scanner configuration
    pub scan_config: ScanConfig,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdStrategy::DEFAULT_THRESHOLD,
            workers: 0,
            queue_capacity: 64,
            detect_similar: true,
            scan_config: ScanConfig::default(),
        }
    }
}

/// Builder for [`Deduplicator`]
pub struct DeduplicatorBuilder {
    config: DedupConfig,
    hasher: Option<Box<dyn ContentHasher>>,
}

impl DeduplicatorBuilder {
    pub fn new() -> Self {
        Self {
            config: DedupConfig::default(),
            hasher: None,
        }
    }

    /// Set the similarity threshold (0-64)
    pub fn threshold(mut self, threshold: u32) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Set the number of hashing threads
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// Enable or disable similar image detection
    pub fn detect_similar(mut self, enabled: bool) -> Self {
        self.config.detect_similar = enabled;
        self
    }

    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Replace the SHA-256 content hasher
    pub fn content_hasher(mut self, hasher: Box<dyn ContentHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Validate the configuration and build the pipeline
    pub fn build(self) -> Result<Deduplicator, DedupError> {
        if self.config.queue_capacity == 0 {
            return Err(DedupError::Config(
                "work queue capacity must be at least 1".to_string(),
            ));
        }
        let strategy = ThresholdStrategy::new(self.config.threshold)?;

        Ok(Deduplicator {
            pool: HashingPool::new(self.config.workers, self.config.queue_capacity),
            grouper: SeedGrouper::new(strategy),
            hasher: self.hasher.unwrap_or_else(|| Box::new(Sha256Hasher::new())),
            config: self.config,
        })
    }
}

impl Default for DeduplicatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The scan-to-groups pipeline. Holds no state between calls.
pub struct Deduplicator {
    config: DedupConfig,
    pool: HashingPool,
    grouper: SeedGrouper,
    hasher: Box<dyn ContentHasher>,
}

impl Deduplicator {
    pub fn builder() -> DeduplicatorBuilder {
        DeduplicatorBuilder::new()
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Scan request: every non-empty regular file under `root`
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>, DedupError> {
        self.scan_with_events(root, &null_sender())
    }

    pub fn scan_with_events(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<Vec<PathBuf>, DedupError> {
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));
        let scanner = WalkDirScanner::new(self.config.scan_config.clone());
        Ok(scanner.scan_with_events(root, events)?)
    }

    /// Hash/group request over an already scanned file list
    pub fn find_duplicates(&self, files: &[PathBuf]) -> Result<HashReport, DedupError> {
        self.find_duplicates_with_events(files, &null_sender())
    }

    pub fn find_duplicates_with_events(
        &self,
        files: &[PathBuf],
        events: &EventSender,
    ) -> Result<HashReport, DedupError> {
        let start_time = Instant::now();

        // Phase 1: size buckets, then hash only sizes seen more than once
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Hashing,
        }));

        let buckets = SizeBuckets::build(files);
        let candidates = buckets.candidates();
        info!(
            files = buckets.file_count(),
            candidates = candidates.len(),
            unique_sizes = buckets.singleton_count(),
            workers = self.pool.workers(),
            "hashing size-bucket candidates"
        );

        events.send(Event::Hash(HashEvent::Started {
            total_candidates: candidates.len(),
        }));

        let candidate_count = candidates.len();
        let pooled = self.pool.run(self.hasher.as_ref(), candidates, events);

        events.send(Event::Hash(HashEvent::Completed {
            hashed: pooled.hashed.len(),
            failed: pooled.failed.len(),
        }));

        // Phase 2: exact groups
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Grouping,
        }));

        let hashed = pooled.hashed.len();
        let duplicates = DigestGrouper::new().group(pooled.hashed);
        let wasted_bytes = duplicates.iter().map(DuplicateGroup::wasted_bytes).sum();

        // Phase 3: similar images
        let (similar_images, images_hashed, images_skipped) = if self.config.detect_similar {
            events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
                phase: PipelinePhase::Comparing,
            }));
            self.find_similar_images(files, events)
        } else {
            (Vec::new(), 0, 0)
        };

        let duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            duplicate_groups = duplicates.len(),
            similar_groups = similar_images.len(),
            wasted_bytes,
            duration_ms,
            "grouping complete"
        );

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_files: buckets.file_count(),
                duplicate_groups: duplicates.len(),
                similar_groups: similar_images.len(),
                wasted_bytes,
                duration_ms,
            },
        }));

        Ok(HashReport {
            duplicates,
            similar_images,
            total_files: buckets.file_count(),
            total_bytes: buckets.total_bytes(),
            wasted_bytes,
            candidates: candidate_count,
            hashed,
            failed: pooled.failed.len(),
            images_hashed,
            images_skipped,
            duration_ms,
        })
    }

    /// Scan `root` and group its files
    pub fn run(&self, root: &Path) -> Result<HashReport, DedupError> {
        self.run_with_events(root, &null_sender())
    }

    pub fn run_with_events(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<HashReport, DedupError> {
        events.send(Event::Pipeline(PipelineEvent::Started));
        let files = self.scan_with_events(root, events)?;
        self.find_duplicates_with_events(&files, events)
    }

    fn find_similar_images(
        &self,
        files: &[PathBuf],
        events: &EventSender,
    ) -> (Vec<SimilarGroup>, usize, usize) {
        let images = ImageFilter::new().select(files);
        events.send(Event::Compare(CompareEvent::Started {
            total_images: images.len(),
        }));

        let hasher = DifferenceHasher::new();
        let results: Vec<Result<(FileRecord, DHash), HashError>> = images
            .par_iter()
            .map(|path| {
                let hash = hasher.hash_file(path)?;
                let size = fs::metadata(path)
                    .map_err(|source| HashError::Io {
                        path: path.to_path_buf(),
                        source,
                    })?
                    .len();
                Ok((FileRecord::new(path.to_path_buf(), size), hash))
            })
            .collect();

        let mut hashed = Vec::with_capacity(results.len());
        let mut skipped = 0;
        for result in results {
            match result {
                Ok(entry) => hashed.push(entry),
                Err(error) => {
                    debug!(error = %error, "skipping image");
                    skipped += 1;
                }
            }
        }

        let groups = self.grouper.group(&hashed);

        events.send(Event::Compare(CompareEvent::Completed {
            total_groups: groups.len(),
        }));

        (groups, hashed.len(), skipped)
    }
}

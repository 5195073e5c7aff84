//! Bounded worker pool that hashes candidates in parallel.
//!
//! A producer feeds `(index, path)` jobs into a bounded queue and closes it
//! when the work list is exhausted. Each worker drains the queue and sends
//! one [`HashOutcome`] per job into an unbounded result queue. The
//! collector on the calling thread reads results until every worker has
//! exited and dropped its sender.

use crate::core::content::{ContentHasher, FileDigest};
use crate::core::duplicates::HashedFile;
use crate::error::HashError;
use crate::events::{Event, EventSender, HashEvent, HashProgress};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::path::PathBuf;
use std::thread;
use tracing::debug;

/// One unit of work: a candidate and its work-list position
pub type HashJob = (usize, PathBuf);

/// Result of hashing one candidate
#[derive(Debug)]
pub struct HashOutcome {
    pub index: usize,
    pub path: PathBuf,
    pub result: Result<FileDigest, HashError>,
}

/// Successful and failed outcomes of a pool run
#[derive(Debug, Default)]
pub struct PoolReport {
    /// Hashed files, in arrival order
    pub hashed: Vec<HashedFile>,
    /// Files that could not be opened or read
    pub failed: Vec<HashError>,
}

/// Drain `jobs`, hashing each path and reporting to `results`.
///
/// Returns when the job queue is closed and empty.
pub fn hash_worker(
    hasher: &dyn ContentHasher,
    jobs: Receiver<HashJob>,
    results: Sender<HashOutcome>,
) {
    for (index, path) in jobs.iter() {
        let result = hasher.hash_file(&path);
        if results.send(HashOutcome { index, path, result }).is_err() {
            // Collector is gone; nothing left to report to.
            break;
        }
    }
}

/// Fixed-size pool of hashing threads
#[derive(Debug, Clone)]
pub struct HashingPool {
    workers: usize,
    queue_capacity: usize,
}

impl HashingPool {
    /// Create a pool; a worker count of 0 means one per available core
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        let workers = if workers == 0 {
            default_parallelism()
        } else {
            workers
        };

        Self {
            workers,
            queue_capacity: queue_capacity.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Hash every path in `paths` and collect the outcomes.
    pub fn run(
        &self,
        hasher: &dyn ContentHasher,
        paths: Vec<PathBuf>,
        events: &EventSender,
    ) -> PoolReport {
        let total = paths.len();
        let mut report = PoolReport::default();
        if total == 0 {
            return report;
        }

        let (job_tx, job_rx) = bounded::<HashJob>(self.queue_capacity);
        let (result_tx, result_rx) = unbounded::<HashOutcome>();
        let workers = self.workers.min(total);

        thread::scope(|scope| {
            scope.spawn(move || {
                for job in paths.into_iter().enumerate() {
                    if job_tx.send(job).is_err() {
                        break;
                    }
                }
                // job_tx dropped here, closing the queue
            });

            for _ in 0..workers {
                let jobs = job_rx.clone();
                let results = result_tx.clone();
                scope.spawn(move || hash_worker(hasher, jobs, results));
            }

            // Only worker clones may keep the result queue open.
            drop(job_rx);
            drop(result_tx);

            for (completed, outcome) in result_rx.iter().enumerate() {
                events.send(Event::Hash(HashEvent::Progress(HashProgress {
                    completed: completed + 1,
                    total,
                    current_path: outcome.path.clone(),
                })));

                match outcome.result {
                    Ok(digest) => report.hashed.push(HashedFile {
                        index: outcome.index,
                        path: outcome.path,
                        digest,
                    }),
                    Err(error) => {
                        debug!(error = %error, "excluding unreadable candidate");
                        events.send(Event::Hash(HashEvent::Error {
                            path: outcome.path,
                            message: error.to_string(),
                        }));
                        report.failed.push(error);
                    }
                }
            }
        });

        report
    }
}

impl Default for HashingPool {
    fn default() -> Self {
        Self::new(0, 64)
    }
}

fn default_parallelism() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

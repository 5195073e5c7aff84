//! # Pipeline Module
//!
//! Orchestrates duplicate detection.
//!
//! ## Stages
//! 1. **Scan** - enumerate non-empty regular files under a root
//! 2. **Bucket** - group by exact size; unique sizes are dropped
//! 3. **Hash** - SHA-256 the remaining candidates on a worker pool
//! 4. **Group** - partition by digest into duplicate groups
//! 5. **Compare** - dHash recognized images and group them around seeds
//!
//! Hashing never starts before the full file list is known, since a
//! file's candidacy depends on every other file's size.

mod executor;
mod pool;

pub use executor::{DedupConfig, Deduplicator, DeduplicatorBuilder, HashReport};
pub use pool::{hash_worker, HashJob, HashOutcome, HashingPool, PoolReport};

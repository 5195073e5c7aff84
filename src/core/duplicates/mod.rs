//! # Duplicates Module
//!
//! Exact-duplicate groups: files whose full contents hash to the same
//! digest.
//!
//! The engine never picks a file to keep. Callers mark members with
//! `selected` and pass the groups to the deletion executor; by
//! convention the first member is treated as the one to keep.

mod grouper;
mod types;

pub use grouper::DigestGrouper;
pub use types::{DuplicateGroup, FileRecord, FileSet, HashedFile};

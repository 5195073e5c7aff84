//! # Deletion Module
//!
//! Removes the files a caller marked as `selected`.
//!
//! A failed removal (locked file, file already gone) is recorded and the
//! batch moves on. The report keeps counts and the last error only.

mod executor;

pub use executor::{DeleteReport, DeleteStatus, DeletionExecutor};

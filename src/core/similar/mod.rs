//! # Similar Images Module
//!
//! Groups images whose perceptual hashes lie within a Hamming distance
//! threshold of a common seed image.
//!
//! ## Thresholds
//! | Distance | Meaning                         |
//! |----------|---------------------------------|
//! | 0        | Same gradients                  |
//! | 1-10     | Resized, recompressed, retouched |
//! | 11+      | Usually a different picture     |

mod grouper;
mod traits;
mod types;

pub use grouper::SeedGrouper;
pub use traits::{ComparisonStrategy, ThresholdStrategy};
pub use types::{similarity_percent, SimilarGroup};

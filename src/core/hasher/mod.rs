//! # Hasher Module
//!
//! Perceptual fingerprints for images.
//!
//! Only the 64-bit difference hash is provided. Hashes are compared with
//! Hamming distance; a distance of 0 means the gradients match exactly
//! and 64 means every bit differs.
//!
//! ## Example
//! ```rust,ignore
//! use file_deduplicator::core::hasher::{DifferenceHasher, ImageHasher, PerceptualHash};
//!
//! let hasher = DifferenceHasher::new();
//! let a = hasher.hash_file(Path::new("holiday.jpg"))?;
//! let b = hasher.hash_file(Path::new("holiday_small.jpg"))?;
//! println!("{} bits differ", a.distance(&b));
//! ```

mod difference;
mod traits;

pub use difference::DifferenceHasher;
pub use traits::{decode, DHash, ImageHasher, PerceptualHash};

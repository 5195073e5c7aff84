//! Trait definitions for perceptual hashing.

use crate::error::HashError;
use image::{DynamicImage, ImageError, ImageReader};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A perceptual hash that can be compared
pub trait PerceptualHash: Clone + Send + Sync {
    /// Hamming distance: number of differing bits
    fn distance(&self, other: &Self) -> u32;

    /// Total number of bits in the hash
    fn bit_count(&self) -> u32;
}

/// 64-bit difference hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DHash(pub u64);

impl DHash {
    pub const BITS: u32 = u64::BITS;

    pub fn bits(&self) -> u64 {
        self.0
    }
}

impl PerceptualHash for DHash {
    fn distance(&self, other: &Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    fn bit_count(&self) -> u32 {
        Self::BITS
    }
}

/// Trait for image hash implementations
pub trait ImageHasher: Send + Sync {
    type Hash: PerceptualHash;

    /// Compute a hash from an already-decoded image
    fn hash_image(&self, image: &DynamicImage) -> Result<Self::Hash, HashError>;

    /// Decode the file at `path` and hash it
    fn hash_file(&self, path: &Path) -> Result<Self::Hash, HashError> {
        let image = decode(path)?;
        self.hash_image(&image).map_err(|e| match e {
            HashError::EmptyImage { .. } => HashError::EmptyImage {
                path: path.to_path_buf(),
            },
            other => other,
        })
    }
}

/// Decode an image, sniffing the format from content rather than extension
pub fn decode(path: &Path) -> Result<DynamicImage, HashError> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| HashError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    reader.decode().map_err(|e| match e {
        ImageError::IoError(source) => HashError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => HashError::Decode {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })
}

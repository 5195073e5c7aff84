//! Distance thresholds for similarity decisions.

use crate::core::hasher::DHash;
use crate::error::CompareError;

/// Strategy deciding whether two hashes are close enough to group
pub trait ComparisonStrategy: Send + Sync {
    /// Whether a pair at `distance` belongs in the same group
    fn is_similar(&self, distance: u32) -> bool;

    /// Largest accepted distance
    fn threshold(&self) -> u32;
}

/// Accepts any pair within a fixed Hamming distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdStrategy {
    threshold: u32,
}

impl ThresholdStrategy {
    /// Tolerates minor edits while rejecting unrelated images
    pub const DEFAULT_THRESHOLD: u32 = 10;

    /// Create a strategy; thresholds above 64 cannot be meaningful for a 64-bit hash
    pub fn new(threshold: u32) -> Result<Self, CompareError> {
        if threshold > DHash::BITS {
            return Err(CompareError::InvalidThreshold { value: threshold });
        }
        Ok(Self { threshold })
    }

    /// Only near-identical images (threshold = 5)
    pub fn strict() -> Self {
        Self { threshold: 5 }
    }

    /// Looser matching for heavier edits (threshold = 16)
    pub fn loose() -> Self {
        Self { threshold: 16 }
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl ComparisonStrategy for ThresholdStrategy {
    fn is_similar(&self, distance: u32) -> bool {
        distance <= self.threshold
    }

    fn threshold(&self) -> u32 {
        self.threshold
    }
}

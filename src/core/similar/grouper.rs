//! Single-pass seed grouping over perceptual hashes.
//!
//! Images are visited in input order. Each unvisited image seeds a new
//! group and claims every later unvisited image within the threshold of
//! the seed. Membership is decided against the seed only, so this is not
//! a transitive or complete-linkage clustering: two members may each be
//! close to the seed and still be far from each other.

use super::types::{similarity_percent, SimilarGroup};
use super::traits::{ComparisonStrategy, ThresholdStrategy};
use crate::core::duplicates::FileRecord;
use crate::core::hasher::{DHash, PerceptualHash};

/// Groups images around seeds
pub struct SeedGrouper<S: ComparisonStrategy = ThresholdStrategy> {
    strategy: S,
}

impl<S: ComparisonStrategy> SeedGrouper<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Build groups of two or more images
    pub fn group(&self, images: &[(FileRecord, DHash)]) -> Vec<SimilarGroup> {
        let mut visited = vec![false; images.len()];
        let mut groups = Vec::new();

        for (i, (seed, seed_hash)) in images.iter().enumerate() {
            if visited[i] {
                continue;
            }
            visited[i] = true;

            let mut files = vec![seed.clone()];
            let mut total_distance = 0u32;

            for (j, (candidate, hash)) in images.iter().enumerate().skip(i + 1) {
                if visited[j] {
                    continue;
                }

                let distance = seed_hash.distance(hash);
                if self.strategy.is_similar(distance) {
                    visited[j] = true;
                    total_distance += distance;
                    files.push(candidate.clone());
                }
            }

            if files.len() > 1 {
                let comparisons = (files.len() - 1) as u32;
                groups.push(SimilarGroup {
                    files,
                    similarity: similarity_percent(total_distance / comparisons),
                });
            }
        }

        groups
    }
}

impl Default for SeedGrouper<ThresholdStrategy> {
    fn default() -> Self {
        Self::new(ThresholdStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn image(name: &str, hash: u64) -> (FileRecord, DHash) {
        (FileRecord::new(PathBuf::from(name), 100), DHash(hash))
    }

    fn paths(group: &SimilarGroup) -> Vec<&str> {
        group
            .files
            .iter()
            .map(|f| f.path.to_str().unwrap())
            .collect()
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(SeedGrouper::default().group(&[]).is_empty());
    }

    #[test]
    fn three_bit_difference_is_grouped() {
        let groups = SeedGrouper::default().group(&[
            image("/a.png", 0),
            image("/b.png", 0b111),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(paths(&groups[0]), vec!["/a.png", "/b.png"]);
    }

    #[test]
    fn forty_bit_difference_is_not_grouped() {
        let groups = SeedGrouper::default().group(&[
            image("/a.png", 0),
            image("/b.png", (1u64 << 40) - 1),
        ]);

        assert!(groups.is_empty());
    }

    #[test]
    fn singletons_are_dropped() {
        let groups = SeedGrouper::default().group(&[
            image("/a.png", 0),
            image("/b.png", 0),
            image("/c.png", u64::MAX),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(paths(&groups[0]), vec!["/a.png", "/b.png"]);
    }

    #[test]
    fn membership_is_relative_to_seed_only() {
        // b is 8 bits from a, c is 8 bits from a on other bits: b and c are 16 apart.
        let groups = SeedGrouper::default().group(&[
            image("/a.png", 0),
            image("/b.png", 0xFF),
            image("/c.png", 0xFF00),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(paths(&groups[0]), vec!["/a.png", "/b.png", "/c.png"]);
        assert_eq!(DHash(0xFF).distance(&DHash(0xFF00)), 16);
    }

    #[test]
    fn claimed_images_do_not_seed_again() {
        // c is near b but b is already claimed by a, and c is too far from a.
        let groups = SeedGrouper::default().group(&[
            image("/a.png", 0),
            image("/b.png", 0xFF),
            image("/c.png", 0xFFFF),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(paths(&groups[0]), vec!["/a.png", "/b.png"]);
    }

    #[test]
    fn similarity_uses_truncated_average_distance() {
        // Distances 3 and 4 to the seed: average 3.5 truncates to 3.
        let groups = SeedGrouper::default().group(&[
            image("/a.png", 0),
            image("/b.png", 0b111),
            image("/c.png", 0b1111),
        ]);

        assert_eq!(groups[0].similarity, 100.0 - (3.0 / 64.0) * 100.0);
    }

    #[test]
    fn identical_hashes_are_fully_similar() {
        let groups = SeedGrouper::default().group(&[image("/a.png", 42), image("/b.png", 42)]);
        assert_eq!(groups[0].similarity, 100.0);
    }

    #[test]
    fn stricter_threshold_splits_groups() {
        let strict = SeedGrouper::new(ThresholdStrategy::strict());
        let groups = strict.group(&[image("/a.png", 0), image("/b.png", 0xFF)]);
        assert!(groups.is_empty());
    }
}

//! Partitions hashed files into duplicate groups by digest.

use super::{DuplicateGroup, FileRecord, HashedFile};
use std::collections::HashMap;

/// Groups hashed files sharing a digest.
///
/// Output does not depend on the order results arrived in: members are
/// sorted by work-list position and groups by their first member.
pub struct DigestGrouper;

impl DigestGrouper {
    pub fn new() -> Self {
        Self
    }

    /// Build duplicate groups; digests seen only once are dropped
    pub fn group(&self, mut hashed: Vec<HashedFile>) -> Vec<DuplicateGroup> {
        hashed.sort_by_key(|h| h.index);

        let mut order: Vec<String> = Vec::new();
        let mut by_digest: HashMap<String, Vec<HashedFile>> = HashMap::new();

        for file in hashed {
            let members = by_digest
                .entry(file.digest.digest.clone())
                .or_insert_with(|| {
                    order.push(file.digest.digest.clone());
                    Vec::new()
                });
            members.push(file);
        }

        order
            .into_iter()
            .filter_map(|digest| {
                let members = by_digest.remove(&digest)?;
                if members.len() < 2 {
                    return None;
                }

                let size = members[0].digest.size;
                let files = members
                    .into_iter()
                    .map(|m| FileRecord::new(m.path, m.digest.size))
                    .collect();

                Some(DuplicateGroup {
                    digest,
                    files,
                    size,
                })
            })
            .collect()
    }
}

impl Default for DigestGrouper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::FileDigest;
    use std::path::PathBuf;

    fn hashed(index: usize, path: &str, digest: &str, size: u64) -> HashedFile {
        HashedFile {
            index,
            path: PathBuf::from(path),
            digest: FileDigest {
                digest: digest.to_string(),
                size,
            },
        }
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(DigestGrouper::new().group(Vec::new()).is_empty());
    }

    #[test]
    fn equal_content_grouped_and_distinct_excluded() {
        let groups = DigestGrouper::new().group(vec![
            hashed(0, "/A", "x", 1024),
            hashed(1, "/B", "x", 1024),
            hashed(2, "/C", "y", 1024),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].size, 1024);
        let paths: Vec<_> = groups[0].files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("/A"), PathBuf::from("/B")]);
    }

    #[test]
    fn arrival_order_does_not_change_groups() {
        let in_order = DigestGrouper::new().group(vec![
            hashed(0, "/a", "a1b2", 8),
            hashed(1, "/b", "ffff", 8),
            hashed(2, "/c", "a1b2", 8),
            hashed(3, "/d", "ffff", 8),
        ]);
        let shuffled = DigestGrouper::new().group(vec![
            hashed(3, "/d", "ffff", 8),
            hashed(2, "/c", "a1b2", 8),
            hashed(0, "/a", "a1b2", 8),
            hashed(1, "/b", "ffff", 8),
        ]);

        let paths = |groups: &[DuplicateGroup]| -> Vec<Vec<PathBuf>> {
            groups
                .iter()
                .map(|g| g.files.iter().map(|f| f.path.clone()).collect())
                .collect()
        };
        assert_eq!(paths(&in_order), paths(&shuffled));
        assert_eq!(in_order[0].digest, "a1b2");
    }

    #[test]
    fn members_start_unselected() {
        let groups = DigestGrouper::new().group(vec![
            hashed(0, "/a", "d", 1),
            hashed(1, "/b", "d", 1),
        ]);
        assert!(groups[0].files.iter().all(|f| !f.selected));
    }
}

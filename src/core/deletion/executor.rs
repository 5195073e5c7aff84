//! Removes the selected members of duplicate or similarity groups.

use crate::core::duplicates::FileSet;
use crate::error::DeleteError;
use crate::events::{
    null_sender, DeleteEvent, Event, EventSender, PipelineEvent, PipelinePhase,
};
use serde::Serialize;
use std::fs;
use tracing::{info, warn};

/// Outcome of a deletion batch
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Files removed
    pub deleted_count: usize,
    /// Bytes freed by the removed files
    pub freed_bytes: u64,
    /// Files whose removal failed
    pub failed_count: usize,
    /// Most recent failure; earlier ones are only counted
    pub last_error: Option<DeleteError>,
}

/// How a batch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeleteStatus {
    /// Nothing was selected
    NothingSelected,
    /// Every selected file was removed
    Completed,
    /// Some removals failed
    Partial,
    /// No selected file could be removed
    Failed,
}

impl DeleteReport {
    pub fn status(&self) -> DeleteStatus {
        match (self.deleted_count, self.failed_count) {
            (0, 0) => DeleteStatus::NothingSelected,
            (_, 0) => DeleteStatus::Completed,
            (0, _) => DeleteStatus::Failed,
            _ => DeleteStatus::Partial,
        }
    }

    /// Turn a batch where every attempt failed into an error
    pub fn into_result(mut self) -> Result<DeleteReport, DeleteError> {
        if self.status() == DeleteStatus::Failed {
            if let Some(last) = self.last_error.take() {
                return Err(DeleteError::AllFailed {
                    failed: self.failed_count,
                    last: Box::new(last),
                });
            }
        }
        Ok(self)
    }
}

/// Deletes every `selected` file and nothing else.
///
/// Which member to keep is the caller's decision; the executor never
/// infers it.
#[derive(Debug, Default)]
pub struct DeletionExecutor;

impl DeletionExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Delete selected files, reporting an error only if every attempt failed
    pub fn delete<G: FileSet>(&self, groups: &[G]) -> Result<DeleteReport, DeleteError> {
        self.execute(groups).into_result()
    }

    /// Delete selected files and return the full report
    pub fn execute<G: FileSet>(&self, groups: &[G]) -> DeleteReport {
        self.execute_with_events(groups, &null_sender())
    }

    pub fn execute_with_events<G: FileSet>(
        &self,
        groups: &[G],
        events: &EventSender,
    ) -> DeleteReport {
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Deleting,
        }));
        let selected: usize = groups.iter().map(|g| g.selected_count()).sum();
        events.send(Event::Delete(DeleteEvent::Started { selected }));

        let mut report = DeleteReport::default();

        for file in groups.iter().flat_map(|g| g.files()).filter(|f| f.selected) {
            match fs::remove_file(&file.path) {
                Ok(()) => {
                    report.deleted_count += 1;
                    report.freed_bytes += file.size;
                    events.send(Event::Delete(DeleteEvent::Deleted {
                        path: file.path.clone(),
                        bytes: file.size,
                    }));
                }
                Err(source) => {
                    let error = DeleteError::Remove {
                        path: file.path.clone(),
                        source,
                    };
                    warn!(error = %error, "deletion failed, continuing");
                    events.send(Event::Delete(DeleteEvent::Failed {
                        path: file.path.clone(),
                        message: error.to_string(),
                    }));
                    report.failed_count += 1;
                    report.last_error = Some(error);
                }
            }
        }

        info!(
            deleted = report.deleted_count,
            failed = report.failed_count,
            freed_bytes = report.freed_bytes,
            "deletion batch finished"
        );

        events.send(Event::Delete(DeleteEvent::Completed {
            deleted: report.deleted_count,
            freed_bytes: report.freed_bytes,
        }));

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::duplicates::{DuplicateGroup, FileRecord};
    use crate::core::similar::SimilarGroup;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> FileRecord {
        let path = dir.path().join(name);
        File::create(&path).unwrap().write_all(content).unwrap();
        FileRecord::new(path, content.len() as u64)
    }

    fn group(files: Vec<FileRecord>) -> DuplicateGroup {
        let size = files[0].size;
        DuplicateGroup {
            digest: "00".repeat(32),
            files,
            size,
        }
    }

    #[test]
    fn only_selected_files_are_removed() {
        let dir = TempDir::new().unwrap();
        let keep = write_file(&dir, "keep.bin", b"12345");
        let mut drop_me = write_file(&dir, "drop.bin", b"12345");
        drop_me.selected = true;

        let groups = [group(vec![keep.clone(), drop_me.clone()])];
        let report = DeletionExecutor::new().execute(&groups);

        assert_eq!(report.deleted_count, 1);
        assert_eq!(report.freed_bytes, 5);
        assert_eq!(report.status(), DeleteStatus::Completed);
        assert!(keep.path.exists());
        assert!(!drop_me.path.exists());
    }

    #[test]
    fn nothing_selected_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a", b"x");
        let b = write_file(&dir, "b", b"x");

        let report = DeletionExecutor::new().execute(&[group(vec![a.clone(), b.clone()])]);

        assert_eq!(report.status(), DeleteStatus::NothingSelected);
        assert!(a.path.exists() && b.path.exists());
    }

    #[test]
    fn missing_file_is_recoverable_and_batch_continues() {
        let dir = TempDir::new().unwrap();
        let first_keep = write_file(&dir, "k1", b"abc");
        let mut vanished = FileRecord::new(dir.path().join("already-gone"), 3);
        vanished.selected = true;

        let second_keep = write_file(&dir, "k2", b"defg");
        let mut second_drop = write_file(&dir, "d2", b"defg");
        second_drop.selected = true;

        let groups = vec![
            group(vec![first_keep, vanished]),
            group(vec![second_keep, second_drop.clone()]),
        ];
        let report = DeletionExecutor::new().execute(&groups);

        assert_eq!(report.deleted_count, 1);
        assert_eq!(report.freed_bytes, 4);
        assert_eq!(report.failed_count, 1);
        assert_eq!(report.status(), DeleteStatus::Partial);
        assert!(matches!(report.last_error, Some(DeleteError::Remove { .. })));
        assert!(!second_drop.path.exists());
    }

    #[test]
    fn single_missing_selection_reports_zero_freed() {
        let dir = TempDir::new().unwrap();
        let keep = write_file(&dir, "keep", b"abc");
        let mut vanished = FileRecord::new(dir.path().join("gone"), 3);
        vanished.selected = true;

        let report = DeletionExecutor::new().execute(&[group(vec![keep, vanished])]);

        assert_eq!(report.deleted_count, 0);
        assert_eq!(report.freed_bytes, 0);
        assert_eq!(report.failed_count, 1);
        assert_eq!(report.status(), DeleteStatus::Failed);
    }

    #[test]
    fn delete_turns_total_failure_into_error() {
        let mut vanished = FileRecord::new(PathBuf::from("/nonexistent/dir/file.bin"), 3);
        vanished.selected = true;
        let keep = FileRecord::new(PathBuf::from("/nonexistent/dir/keep.bin"), 3);

        let result = DeletionExecutor::new().delete(&[group(vec![keep, vanished])]);

        match result {
            Err(DeleteError::AllFailed { failed, .. }) => assert_eq!(failed, 1),
            other => panic!("expected AllFailed, got {other:?}"),
        }
    }

    #[test]
    fn partial_success_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let mut real = write_file(&dir, "real", b"abc");
        real.selected = true;
        let mut ghost = FileRecord::new(dir.path().join("ghost"), 3);
        ghost.selected = true;

        let report = DeletionExecutor::new()
            .delete(&[group(vec![real, ghost])])
            .unwrap();

        assert_eq!(report.deleted_count, 1);
        assert!(report.last_error.is_some());
    }

    #[test]
    fn similarity_groups_can_be_deleted() {
        let dir = TempDir::new().unwrap();
        let seed = write_file(&dir, "seed.png", b"large original");
        let mut thumb = write_file(&dir, "thumb.png", b"small");
        thumb.selected = true;

        let groups = vec![SimilarGroup {
            files: vec![seed.clone(), thumb.clone()],
            similarity: 98.4375,
        }];
        let report = DeletionExecutor::new().execute(&groups);

        assert_eq!(report.freed_bytes, 5);
        assert!(seed.path.exists());
        assert!(!thumb.path.exists());
    }

    #[test]
    fn execute_announces_deleting_phase_first() {
        let dir = TempDir::new().unwrap();
        let keep = write_file(&dir, "keep", b"zz");
        let mut extra = write_file(&dir, "extra", b"zz");
        extra.selected = true;

        let (sender, receiver) = crate::events::EventChannel::new();
        DeletionExecutor::new().execute_with_events(&[group(vec![keep, extra])], &sender);
        drop(sender);

        let events: Vec<_> = receiver.iter().collect();
        assert!(matches!(
            events.first(),
            Some(Event::Pipeline(PipelineEvent::PhaseChanged {
                phase: PipelinePhase::Deleting
            }))
        ));
        assert!(matches!(
            events.last(),
            Some(Event::Delete(DeleteEvent::Completed { deleted: 1, freed_bytes: 2 }))
        ));
    }
}

//! Directory walking implementation using walkdir.

use super::FileScanner;
use crate::error::ScanError;
use crate::events::{null_sender, Event, EventSender, ScanEvent, ScanProgress};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to descend into hidden directories and report hidden files
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: true,
            max_depth: None,
        }
    }
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// A regular-file root is walked as a single entry.
    fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
        fs::canonicalize(root).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => ScanError::PermissionDenied {
                path: root.to_path_buf(),
            },
            _ => ScanError::RootNotFound {
                path: root.to_path_buf(),
            },
        })
    }

    fn is_hidden(entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
    }

    fn traversal_error(root: &Path, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());

        if error.io_error().map(|e| e.kind()) == Some(std::io::ErrorKind::PermissionDenied) {
            ScanError::PermissionDenied { path }
        } else {
            ScanError::Traversal {
                path,
                source: error,
            }
        }
    }
}

impl Default for WalkDirScanner {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

impl FileScanner for WalkDirScanner {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        self.scan_with_events(root, &null_sender())
    }

    fn scan_with_events(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<Vec<PathBuf>, ScanError> {
        let root = Self::resolve_root(root)?;

        events.send(Event::Scan(ScanEvent::Started { root: root.clone() }));

        let mut walker = WalkDir::new(&root).follow_links(self.config.follow_symlinks);
        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let include_hidden = self.config.include_hidden;
        let entries = walker
            .into_iter()
            .filter_entry(|e| include_hidden || e.depth() == 0 || !Self::is_hidden(e));

        let mut files = Vec::new();
        let mut directories_scanned = 0;

        for entry_result in entries {
            let entry = entry_result.map_err(|e| Self::traversal_error(&root, e))?;

            if entry.file_type().is_dir() {
                directories_scanned += 1;
                events.send(Event::Scan(ScanEvent::Progress(ScanProgress {
                    directories_scanned,
                    files_found: files.len(),
                    current_path: entry.path().to_path_buf(),
                })));
                continue;
            }

            if !entry.file_type().is_file() {
                debug!(path = %entry.path().display(), "skipping non-regular entry");
                continue;
            }

            let metadata = entry
                .metadata()
                .map_err(|e| Self::traversal_error(&root, e))?;

            if metadata.len() == 0 {
                continue;
            }

            files.push(entry.into_path());
        }

        info!(
            root = %root.display(),
            directories = directories_scanned,
            files = files.len(),
            "directory scan complete"
        );

        events.send(Event::Scan(ScanEvent::Completed {
            total_files: files.len(),
        }));

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventChannel;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();
        let files = WalkDirScanner::default().scan(temp_dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn scan_skips_empty_files() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "empty.txt", b"");
        write_file(temp_dir.path(), "data.txt", b"payload");

        let files = WalkDirScanner::default().scan(temp_dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("data.txt"));
    }

    #[test]
    fn scan_returns_absolute_paths() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "a.bin", b"abc");

        let files = WalkDirScanner::default().scan(temp_dir.path()).unwrap();

        assert!(files.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn scan_traverses_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("one").join("two");
        fs::create_dir_all(&nested).unwrap();
        write_file(temp_dir.path(), "root.txt", b"root");
        write_file(&nested, "deep.txt", b"deep");

        let files = WalkDirScanner::default().scan(temp_dir.path()).unwrap();

        assert_eq!(files.len(), 2);
    }

    #[test]
    fn scan_includes_hidden_files_by_default() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), ".hidden", b"secret");
        write_file(temp_dir.path(), "visible", b"public");

        let files = WalkDirScanner::default().scan(temp_dir.path()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn scan_can_exclude_hidden_entries() {
        let temp_dir = TempDir::new().unwrap();
        let hidden_dir = temp_dir.path().join(".cache");
        fs::create_dir(&hidden_dir).unwrap();
        write_file(&hidden_dir, "inside.txt", b"cached");
        write_file(temp_dir.path(), ".hidden", b"secret");
        write_file(temp_dir.path(), "visible", b"public");

        let scanner = WalkDirScanner::new(ScanConfig {
            include_hidden: false,
            ..Default::default()
        });
        let files = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("visible"));
    }

    #[test]
    fn scan_respects_max_depth() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        write_file(temp_dir.path(), "top.txt", b"top");
        write_file(&sub, "below.txt", b"below");

        let scanner = WalkDirScanner::new(ScanConfig {
            max_depth: Some(1),
            ..Default::default()
        });
        let files = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("top.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn scan_does_not_report_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let target = write_file(temp_dir.path(), "target.txt", b"target");
        std::os::unix::fs::symlink(&target, temp_dir.path().join("link.txt")).unwrap();

        let files = WalkDirScanner::default().scan(temp_dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("target.txt"));
    }

    #[test]
    fn scan_nonexistent_root_fails() {
        let result = WalkDirScanner::default().scan(Path::new("/nonexistent/path/12345"));
        assert!(matches!(result, Err(ScanError::RootNotFound { .. })));
    }

    #[test]
    fn scan_file_root_returns_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_file(temp_dir.path(), "plain.txt", b"x");

        let files = WalkDirScanner::default().scan(&file).unwrap();

        assert_eq!(files, vec![fs::canonicalize(&file).unwrap()]);
    }

    #[test]
    fn scan_empty_file_root_returns_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_file(temp_dir.path(), "empty.txt", b"");

        let files = WalkDirScanner::default().scan(&file).unwrap();

        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn scan_aborts_on_symlink_loop() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "a.txt", b"before the loop");
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        write_file(&sub, "b.txt", b"inside");
        std::os::unix::fs::symlink(temp_dir.path(), sub.join("back")).unwrap();

        let scanner = WalkDirScanner::new(ScanConfig {
            follow_symlinks: true,
            ..Default::default()
        });
        let result = scanner.scan(temp_dir.path());

        assert!(matches!(result, Err(ScanError::Traversal { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn scan_aborts_on_unreadable_subdirectory() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "a.txt", b"readable");
        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        write_file(&locked, "b.txt", b"hidden away");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind a privileged user.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = WalkDirScanner::default().scan(temp_dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(
            result,
            Err(ScanError::PermissionDenied { .. } | ScanError::Traversal { .. })
        ));
    }

    #[test]
    fn scan_emits_started_and_completed() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "a.txt", b"a");

        let (sender, receiver) = EventChannel::new();
        WalkDirScanner::default()
            .scan_with_events(temp_dir.path(), &sender)
            .unwrap();
        drop(sender);

        let events: Vec<_> = receiver.iter().collect();
        assert!(matches!(events.first(), Some(Event::Scan(ScanEvent::Started { .. }))));
        assert!(matches!(
            events.last(),
            Some(Event::Scan(ScanEvent::Completed { total_files: 1 }))
        ));
    }
}

//! # CLI Module
//!
//! Command-line interface for the file deduplicator.
//!
//! ## Usage
//! ```bash
//! # Report exact duplicates and similar images
//! dedup scan ~/Downloads
//!
//! # Stricter similarity, four hashing threads
//! dedup scan ~/Downloads --threshold 5 --workers 4
//!
//! # JSON output
//! dedup scan ~/Downloads --output json
//!
//! # Keep the first file of each group, delete the rest
//! dedup clean ~/Downloads --dry-run
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use file_deduplicator::core::deletion::{DeleteStatus, DeletionExecutor};
use file_deduplicator::core::duplicates::{DuplicateGroup, FileSet};
use file_deduplicator::core::pipeline::{Deduplicator, HashReport};
use file_deduplicator::core::similar::{SimilarGroup, ThresholdStrategy};
use file_deduplicator::error::Result;
use file_deduplicator::events::{
    DeleteEvent, Event, EventChannel, EventSender, HashEvent, PipelineEvent, ScanEvent,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::thread;

/// File Deduplicator - find and remove duplicate files
#[derive(Parser, Debug)]
#[command(name = "dedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a directory and report duplicate groups
    Scan {
        /// Directory to scan
        root: PathBuf,

        /// Similarity threshold (lower = stricter, 0-64)
        #[arg(short, long, default_value_t = ThresholdStrategy::DEFAULT_THRESHOLD)]
        threshold: u32,

        /// Hashing threads (0 = one per core)
        #[arg(short, long, default_value_t = 0)]
        workers: usize,

        /// Skip perceptual image comparison
        #[arg(long)]
        no_similar: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Delete every file but the first in each duplicate group
    Clean {
        /// Directory to scan
        root: PathBuf,

        /// Similarity threshold (lower = stricter, 0-64)
        #[arg(short, long, default_value_t = ThresholdStrategy::DEFAULT_THRESHOLD)]
        threshold: u32,

        /// Hashing threads (0 = one per core)
        #[arg(short, long, default_value_t = 0)]
        workers: usize,

        /// Also delete from similar image groups
        #[arg(long)]
        include_similar: bool,

        /// List what would be deleted without touching anything
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (redundant paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            root,
            threshold,
            workers,
            no_similar,
            output,
            verbose,
        } => run_scan(&root, threshold, workers, !no_similar, output, verbose),
        Commands::Clean {
            root,
            threshold,
            workers,
            include_similar,
            dry_run,
        } => run_clean(&root, threshold, workers, include_similar, dry_run),
    }
}

fn run_scan(
    root: &Path,
    threshold: u32,
    workers: usize,
    detect_similar: bool,
    output: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("File Deduplicator").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let dedup = Deduplicator::builder()
        .threshold(threshold)
        .workers(workers)
        .detect_similar(detect_similar)
        .build()?;

    let show_progress = matches!(output, OutputFormat::Pretty);
    let report = run_with_progress(&dedup, root, show_progress, verbose)?;

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &report, verbose),
        OutputFormat::Json => print_json_results(&report),
        OutputFormat::Minimal => print_minimal_results(&report),
    }

    Ok(())
}

fn run_clean(
    root: &Path,
    threshold: u32,
    workers: usize,
    include_similar: bool,
    dry_run: bool,
) -> Result<()> {
    let term = Term::stderr();

    let dedup = Deduplicator::builder()
        .threshold(threshold)
        .workers(workers)
        .detect_similar(include_similar)
        .build()?;

    let mut report = run_with_progress(&dedup, root, true, false)?;

    select_for_clean(&mut report.duplicates, &mut report.similar_images);

    let (dup_count, dup_bytes) = selected_totals(&report.duplicates);
    let (similar_count, similar_bytes) = selected_totals(&report.similar_images);
    let selected = dup_count + similar_count;
    let selected_bytes = dup_bytes + similar_bytes;

    if selected == 0 {
        term.write_line(&format!("  {} Nothing to delete", style("✓").green()))
            .ok();
        return Ok(());
    }

    if dry_run {
        let selected_paths = report
            .duplicates
            .iter()
            .flat_map(|g| g.files())
            .chain(report.similar_images.iter().flat_map(|g| g.files()))
            .filter(|f| f.selected);
        for file in selected_paths {
            println!("{}", file.path.display());
        }
        term.write_line(&format!(
            "  {} files ({}) would be deleted",
            style(selected).cyan(),
            style(format_bytes(selected_bytes)).yellow()
        ))
        .ok();
        return Ok(());
    }

    let (sender, receiver) = EventChannel::new();
    let progress = ProgressBar::new(selected as u64);
    progress.set_style(bar_style());

    let progress_clone = progress.clone();
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    progress_clone.set_message(format!("{}", phase));
                }
                Event::Delete(DeleteEvent::Deleted { .. }) => progress_clone.inc(1),
                Event::Delete(DeleteEvent::Failed { path, message }) => {
                    progress_clone.inc(1);
                    progress_clone.println(format!(
                        "  {} {}: {}",
                        style("✗").red(),
                        display_path(&path),
                        message
                    ));
                }
                _ => {}
            }
        }
    });

    let executor = DeletionExecutor::new();
    let mut outcome = executor.execute_with_events(&report.duplicates, &sender);
    if include_similar {
        let similar = executor.execute_with_events(&report.similar_images, &sender);
        outcome.deleted_count += similar.deleted_count;
        outcome.freed_bytes += similar.freed_bytes;
        outcome.failed_count += similar.failed_count;
        if similar.last_error.is_some() {
            outcome.last_error = similar.last_error;
        }
    }

    finish(sender, event_thread, Some(progress));

    let status = outcome.status();
    let outcome = outcome.into_result()?;

    let marker = match status {
        DeleteStatus::Partial => style("!").yellow().bold(),
        _ => style("✓").green().bold(),
    };
    term.write_line(&format!(
        "{} Deleted {} files, freed {}",
        marker,
        style(outcome.deleted_count).cyan(),
        style(format_bytes(outcome.freed_bytes)).yellow()
    ))
    .ok();

    if outcome.failed_count > 0 {
        term.write_line(&format!(
            "  {} files could not be deleted",
            style(outcome.failed_count).red()
        ))
        .ok();
    }

    Ok(())
}

/// Select every member except the first of each group
fn keep_first<G: FileSet>(groups: &mut [G]) {
    for group in groups {
        for file in group.files_mut().iter_mut().skip(1) {
            file.selected = true;
        }
    }
}

/// Number and combined size of the selected members
fn selected_totals<G: FileSet>(groups: &[G]) -> (usize, u64) {
    groups.iter().fold((0, 0), |(count, bytes), g| {
        (count + g.selected_count(), bytes + g.selected_bytes())
    })
}

/// Select files for `clean`: every member but the first of each group.
///
/// A file can sit in both an exact and a similar group. A similar group
/// never selects the kept member of an exact group, so every exact group
/// keeps a copy, and never reselects a path the exact groups already
/// chose, so each path is removed once.
fn select_for_clean(duplicates: &mut [DuplicateGroup], similar: &mut [SimilarGroup]) {
    keep_first(duplicates);
    keep_first(similar);

    let kept: HashSet<PathBuf> = duplicates
        .iter()
        .filter_map(|g| g.files().first())
        .map(|f| f.path.clone())
        .collect();
    let already_selected: HashSet<PathBuf> = duplicates
        .iter()
        .flat_map(|g| g.files())
        .filter(|f| f.selected)
        .map(|f| f.path.clone())
        .collect();

    for group in similar {
        for file in group.files_mut() {
            if kept.contains(&file.path) || already_selected.contains(&file.path) {
                file.selected = false;
            }
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░")
}

/// Run the pipeline, rendering progress from its events
fn run_with_progress(
    dedup: &Deduplicator,
    root: &Path,
    show_progress: bool,
    verbose: bool,
) -> Result<HashReport> {
    let (sender, receiver) = EventChannel::new();

    let progress = if show_progress {
        let pb = ProgressBar::new(0);
        pb.set_style(bar_style());
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_message(format!("{}", phase));
                }
                Event::Scan(ScanEvent::Progress(p)) => {
                    pb.set_message(format!("Scanning ({} files)", p.files_found));
                }
                Event::Hash(HashEvent::Started { total_candidates }) => {
                    pb.set_length(total_candidates as u64);
                    pb.set_position(0);
                }
                Event::Hash(HashEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                    if verbose {
                        pb.set_message(
                            p.current_path
                                .file_name()
                                .unwrap_or_default()
                                .to_string_lossy()
                                .to_string(),
                        );
                    }
                }
                Event::Hash(HashEvent::Error { path, message }) if verbose => {
                    pb.println(format!(
                        "  {} {}: {}",
                        style("⚠").yellow(),
                        display_path(&path),
                        message
                    ));
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = dedup.run_with_events(root, &sender);
    finish(sender, event_thread, progress);
    result
}

fn finish(
    sender: EventSender,
    event_thread: thread::JoinHandle<()>,
    progress: Option<ProgressBar>,
) {
    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
}

fn print_pretty_results(term: &Term, report: &HashReport, verbose: bool) {
    term.write_line("").ok();
    term.write_line(&format!("{} Scan Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} files ({}) scanned in {:.1}s",
        style(report.total_files).cyan(),
        format_bytes(report.total_bytes),
        report.duration_ms as f64 / 1000.0
    ))
    .ok();

    term.write_line(&format!(
        "  {} duplicate groups found",
        style(report.duplicates.len()).cyan()
    ))
    .ok();

    let duplicate_count: usize = report.duplicates.iter().map(|g| g.duplicate_count()).sum();
    term.write_line(&format!(
        "  {} redundant copies",
        style(duplicate_count).cyan()
    ))
    .ok();

    term.write_line(&format!(
        "  {} similar image groups found",
        style(report.similar_images.len()).cyan()
    ))
    .ok();

    term.write_line(&format!(
        "  {} potential space savings",
        style(format_bytes(report.wasted_bytes)).yellow()
    ))
    .ok();

    if verbose {
        term.write_line(&format!(
            "  {} candidates hashed, {} unreadable, {} images skipped",
            style(report.hashed).dim(),
            style(report.failed).dim(),
            style(report.images_skipped).dim()
        ))
        .ok();
    }

    term.write_line("").ok();

    if report.duplicates.is_empty() && report.similar_images.is_empty() {
        term.write_line(&format!("  {} No duplicates found!", style("✓").green()))
            .ok();
        return;
    }

    if !report.duplicates.is_empty() {
        term.write_line(&format!("{}", style("Duplicate Groups:").bold().underlined()))
            .ok();
        term.write_line("").ok();

        for (i, group) in report.duplicates.iter().enumerate() {
            term.write_line(&format!(
                "  {} {} files of {}, {} reclaimable",
                style(format!("Group {}:", i + 1)).bold(),
                group.files.len(),
                format_bytes(group.size),
                style(format_bytes(group.wasted_bytes())).yellow()
            ))
            .ok();
            if verbose {
                term.write_line(&format!("    {}", style(&group.digest).dim()))
                    .ok();
            }
            print_members(term, group.files().iter().map(|f| f.path.as_path()));
        }
    }

    if !report.similar_images.is_empty() {
        term.write_line(&format!("{}", style("Similar Images:").bold().underlined()))
            .ok();
        term.write_line("").ok();

        for (i, group) in report.similar_images.iter().enumerate() {
            term.write_line(&format!(
                "  {} {} images, {:.1}% similar",
                style(format!("Group {}:", i + 1)).bold(),
                group.files.len(),
                group.similarity
            ))
            .ok();
            print_members(term, group.files().iter().map(|f| f.path.as_path()));
        }
    }

    term.write_line(&format!(
        "{}",
        style("No files were deleted. Use `dedup clean` to remove copies.").dim()
    ))
    .ok();
}

fn print_members<'a>(term: &Term, paths: impl Iterator<Item = &'a Path>) {
    for (idx, path) in paths.enumerate() {
        let marker = if idx == 0 {
            style("★").green().to_string()
        } else {
            style("○").dim().to_string()
        };
        term.write_line(&format!("    {} {}", marker, display_path(path)))
            .ok();
    }
    term.write_line("").ok();
}

fn print_json_results(report: &HashReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!(error = %e, "failed to serialize report"),
    }
}

fn print_minimal_results(report: &HashReport) {
    let groups = report
        .duplicates
        .iter()
        .map(|g| g.files())
        .chain(report.similar_images.iter().map(|g| g.files()));
    for files in groups {
        for file in files.iter().skip(1) {
            println!("{}", file.path.display());
        }
    }
}

/// Shorten paths under the home directory to `~/...`
fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use file_deduplicator::core::duplicates::FileRecord;

    fn record(path: &str) -> FileRecord {
        FileRecord::new(PathBuf::from(path), 4)
    }

    fn is_selected<G: FileSet>(groups: &[G], path: &str) -> bool {
        groups
            .iter()
            .flat_map(|g| g.files())
            .any(|f| f.selected && f.path == Path::new(path))
    }

    #[test]
    fn format_bytes_picks_unit() {
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn keep_first_selects_the_rest() {
        let mut groups = vec![DuplicateGroup {
            digest: "ab".repeat(32),
            files: vec![
                FileRecord::new(PathBuf::from("/a"), 4),
                FileRecord::new(PathBuf::from("/b"), 4),
                FileRecord::new(PathBuf::from("/c"), 4),
            ],
            size: 4,
        }];

        keep_first(&mut groups);

        assert!(!groups[0].files[0].selected);
        assert_eq!(groups[0].selected_count(), 2);
        assert_eq!(groups[0].selected_bytes(), 8);
    }

    #[test]
    fn cli_parses_clean() {
        let cli = Cli::try_parse_from(["dedup", "clean", "/tmp", "--dry-run"]).unwrap();
        assert!(matches!(cli.command, Commands::Clean { dry_run: true, .. }));
    }

    #[test]
    fn clean_keeps_a_copy_when_similar_group_spans_exact_group() {
        let mut duplicates = vec![DuplicateGroup {
            digest: "cd".repeat(32),
            files: vec![record("/A.png"), record("/B.png")],
            size: 4,
        }];
        let mut similar = vec![SimilarGroup {
            files: vec![record("/Z.png"), record("/A.png"), record("/B.png")],
            similarity: 95.3125,
        }];

        select_for_clean(&mut duplicates, &mut similar);

        assert!(!is_selected(&duplicates, "/A.png"));
        assert!(!is_selected(&similar, "/A.png"));
        assert!(is_selected(&duplicates, "/B.png"));
        assert!(!is_selected(&similar, "/B.png"));
        assert!(!is_selected(&similar, "/Z.png"));
        assert_eq!(similar[0].selected_count(), 0);
    }

    #[test]
    fn clean_still_selects_similar_members_outside_exact_groups() {
        let mut duplicates = vec![DuplicateGroup {
            digest: "ef".repeat(32),
            files: vec![record("/A.png"), record("/B.png")],
            size: 4,
        }];
        let mut similar = vec![SimilarGroup {
            files: vec![record("/A.png"), record("/thumb.png")],
            similarity: 98.4375,
        }];

        select_for_clean(&mut duplicates, &mut similar);

        assert!(is_selected(&similar, "/thumb.png"));
        assert!(!is_selected(&similar, "/A.png"));
        assert_eq!(duplicates[0].selected_count(), 1);
    }
}

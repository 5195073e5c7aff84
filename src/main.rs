//! # dedup CLI
//!
//! Command-line interface for the file deduplicator.
//!
//! ## Usage
//! ```bash
//! dedup scan ~/Downloads --threshold 8
//! dedup scan ~/Downloads --output json
//! dedup clean ~/Downloads --dry-run
//! ```

mod cli;

use file_deduplicator::Result;

fn main() -> Result<()> {
    file_deduplicator::init_tracing();
    cli::run()
}

//! Command-line interface module for clean-folder.
//!
//! This module handles:
//! - Argument parsing
//! - Validation of the folder to sort
//! - Orchestration of the walk and the archive post-processing
//! - Printing of the summary report

use crate::archive::{ArchiveExtractor, StandardExtractor, unpack_archives};
use crate::error::{SortError, SortResult};
use crate::file_category::CategoryMapper;
use crate::output::OutputFormatter;
use crate::report::RunReport;
use crate::walker::TreeWalker;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

/// Sort a folder into images, video, documents, audio and archives.
#[derive(Debug, Parser)]
#[command(name = "clean-folder", version, about)]
pub struct Cli {
    /// The folder to sort.
    pub path: Option<PathBuf>,
}

/// Checks that `path` exists and is a directory.
///
/// Runs before anything on disk is touched.
pub fn validate_root(path: &Path) -> SortResult<()> {
    if !path.exists() {
        return Err(SortError::PathNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(SortError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Sorts `root` with the standard archive extractor.
///
/// # Examples
///
/// ```no_run
/// use clean_folder::cli::sort_directory;
/// use std::path::Path;
///
/// match sort_directory(Path::new("/path/to/downloads")) {
///     Ok(report) => {
///         for line in report.summary_lines() {
///             println!("{}", line);
///         }
///     }
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn sort_directory(root: &Path) -> SortResult<RunReport> {
    sort_directory_with(root, &StandardExtractor)
}

/// Sorts `root`, unpacking archives with `extractor`.
///
/// This function:
/// 1. Validates the root folder
/// 2. Walks the tree, moving every supported file into its category folder
/// 3. Unpacks the archives moved during the walk
/// 4. Returns the report of everything that happened
pub fn sort_directory_with(
    root: &Path,
    extractor: &dyn ArchiveExtractor,
) -> SortResult<RunReport> {
    validate_root(root)?;
    info!("sorting {}", root.display());

    let mapper = CategoryMapper::default();
    let mut report = RunReport::new();

    TreeWalker::new(root, &mapper, &mut report).run()?;
    unpack_archives(root, &mut report, extractor)?;

    info!(
        moved = report.total_moved(),
        renamed = report.renamed,
        duplicates = report.duplicates_deleted,
        "sorting finished"
    );
    Ok(report)
}

/// Runs the CLI with parsed arguments and returns the process exit code.
pub fn run_cli(cli: Cli) -> i32 {
    let Some(path) = cli.path else {
        OutputFormatter::plain("Please specify the path to sort files from.");
        eprintln!("Usage: clean-folder <path>");
        return 1;
    };

    match sort_directory(&path) {
        Ok(report) => {
            OutputFormatter::summary(&report.summary_lines());
            0
        }
        Err(e @ (SortError::PathNotFound(_) | SortError::NotADirectory(_))) => {
            OutputFormatter::error(&format!("ERROR: {}", e));
            1
        }
        Err(e) => {
            OutputFormatter::error(&format!("Error: {}", e));
            1
        }
    }
}

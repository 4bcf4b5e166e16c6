//! Counters accumulated during one sorting run and the summary built from them.

use crate::file_category::Category;
use std::collections::HashMap;
use std::path::PathBuf;

/// Everything a run did, handed back to the caller once the run is over.
#[derive(Debug, Default, Clone)]
pub struct RunReport {
    moved: HashMap<Category, usize>,
    /// Files given a `_renamed_NNN_` suffix because their name was taken.
    pub renamed: usize,
    /// Files deleted because an identical file already sat at the destination.
    pub duplicates_deleted: usize,
    /// Empty folders removed during the walk.
    pub folders_deleted: usize,
    /// Files left in place because their extension is not in any category.
    pub unsupported: usize,
    /// Archives moved during the walk and waiting to be unpacked, in move order.
    pub pending_archives: Vec<PathBuf>,
    /// Archives unpacked after the walk; their files have been deleted.
    pub unpacked_archives: Vec<PathBuf>,
    /// Archives that could not be read and were left in place.
    pub unreadable_archives: Vec<PathBuf>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one file moved into `category`.
    pub fn record_move(&mut self, category: Category) {
        *self.moved.entry(category).or_insert(0) += 1;
    }

    /// Number of files moved into `category`.
    pub fn moved(&self, category: Category) -> usize {
        self.moved.get(&category).copied().unwrap_or(0)
    }

    /// Number of files moved across all categories.
    pub fn total_moved(&self) -> usize {
        self.moved.values().sum()
    }

    /// Number of archives unpacked after the walk.
    pub fn archives_unpacked(&self) -> usize {
        self.unpacked_archives.len()
    }

    /// True when the run neither moved, renamed, deleted, skipped nor unpacked anything.
    pub fn is_empty(&self) -> bool {
        self.total_moved() == 0
            && self.renamed == 0
            && self.duplicates_deleted == 0
            && self.folders_deleted == 0
            && self.unsupported == 0
            && self.unpacked_archives.is_empty()
    }

    /// Renders the end-of-run summary, one line per nonzero counter.
    ///
    /// # Examples
    ///
    /// ```
    /// use clean_folder::file_category::Category;
    /// use clean_folder::report::RunReport;
    ///
    /// let mut report = RunReport::new();
    /// assert_eq!(report.summary_lines(), vec!["0 files found to process."]);
    ///
    /// report.record_move(Category::Images);
    /// assert_eq!(
    ///     report.summary_lines(),
    ///     vec!["1 file was moved to the folder \"images\"."]
    /// );
    /// ```
    pub fn summary_lines(&self) -> Vec<String> {
        if self.is_empty() {
            return vec!["0 files found to process.".to_string()];
        }

        let mut lines = Vec::new();
        for category in Category::ALL {
            let n = self.moved(category);
            if n > 0 && category != Category::Archives {
                lines.push(format!(
                    "{} moved to the folder \"{}\".",
                    counted(n, "file"),
                    category.dir_name()
                ));
            }
        }
        if self.archives_unpacked() > 0 {
            lines.push(format!(
                "{} unpacked.",
                counted(self.archives_unpacked(), "archive")
            ));
        }
        if self.renamed > 0 {
            lines.push(format!(
                "{} renamed due to duplicate name.",
                counted(self.renamed, "file")
            ));
        }
        if self.duplicates_deleted > 0 {
            lines.push(format!(
                "{} deleted.",
                counted(self.duplicates_deleted, "duplicate file")
            ));
        }
        if self.folders_deleted > 0 {
            lines.push(format!(
                "{} deleted.",
                counted(self.folders_deleted, "empty folder")
            ));
        }
        if self.unsupported > 0 {
            lines.push(format!(
                "{} not moved due to unsupported extension.",
                counted(self.unsupported, "file")
            ));
        }
        lines
    }
}

/// `1 file was` / `3 files were`.
fn counted(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun} was")
    } else {
        format!("{n} {noun}s were")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counted_phrasing() {
        assert_eq!(counted(1, "file"), "1 file was");
        assert_eq!(counted(2, "file"), "2 files were");
        assert_eq!(counted(1, "empty folder"), "1 empty folder was");
    }

    #[test]
    fn test_summary_in_fixed_order() {
        let mut report = RunReport::new();
        report.record_move(Category::Audio);
        report.record_move(Category::Images);
        report.record_move(Category::Images);
        report.record_move(Category::Archives);
        report.unpacked_archives.push(PathBuf::from("archives/a.zip"));
        report.renamed = 3;
        report.duplicates_deleted = 1;
        report.folders_deleted = 2;
        report.unsupported = 1;

        assert_eq!(
            report.summary_lines(),
            vec![
                "2 files were moved to the folder \"images\".",
                "1 file was moved to the folder \"audio\".",
                "1 archive was unpacked.",
                "3 files were renamed due to duplicate name.",
                "1 duplicate file was deleted.",
                "2 empty folders were deleted.",
                "1 file was not moved due to unsupported extension.",
            ]
        );
    }

    #[test]
    fn test_archive_moves_alone_are_not_nothing() {
        let mut report = RunReport::new();
        report.record_move(Category::Archives);

        assert!(!report.is_empty());
        assert!(report.summary_lines().is_empty());
    }

    #[test]
    fn test_unsupported_only_is_reported() {
        let report = RunReport {
            unsupported: 4,
            ..RunReport::default()
        };
        assert_eq!(
            report.summary_lines(),
            vec!["4 files were not moved due to unsupported extension."]
        );
    }
}

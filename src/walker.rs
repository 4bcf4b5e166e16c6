//! Recursive descent over the sorting root.

use crate::error::{SortError, SortResult};
use crate::file_category::{Category, CategoryMapper};
use crate::file_organizer::{FilePlacer, entry_name};
use crate::normalize::normalize;
use crate::report::RunReport;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Walks a folder tree, sorting every supported file into the categories of `root`.
pub struct TreeWalker<'a> {
    root: &'a Path,
    mapper: &'a CategoryMapper,
    report: &'a mut RunReport,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: &'a Path, mapper: &'a CategoryMapper, report: &'a mut RunReport) -> Self {
        Self {
            root,
            mapper,
            report,
        }
    }

    /// Sorts the whole tree under the root.
    pub fn run(&mut self) -> SortResult<()> {
        let root = self.root;
        self.walk(root, 0).map(|_| ())
    }

    /// Processes every entry of `folder` and returns whether `folder` was deleted.
    ///
    /// A folder below the root is deleted once each of its entries has been
    /// moved away or was itself a deleted folder. Folders that stay are given
    /// a normalized name. At the root, folders named after a category are the
    /// sort destinations and are left alone.
    pub fn walk(&mut self, folder: &Path, depth: usize) -> SortResult<bool> {
        let mut removable = depth > 0;

        for path in list_entries(folder)? {
            // The placer may move a root-level file aside before we get to it.
            match fs::symlink_metadata(&path) {
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(SortError::io(&path, e)),
                Ok(_) => {}
            }

            if path.is_dir() {
                if depth == 0 && is_category_folder(&path) {
                    continue;
                }
                let removed = self.walk(&path, depth + 1)?;
                removable = removable && removed;
            } else if let Some(category) = self.mapper.categorize(&path) {
                FilePlacer::place(self.root, &path, category, self.report)?;
            } else {
                self.report.unsupported += 1;
                removable = false;
                rename_normalized(&path)?;
            }
        }

        if removable {
            fs::remove_dir(folder).map_err(|e| SortError::io(folder, e))?;
            self.report.folders_deleted += 1;
            debug!("deleted empty folder {}", folder.display());
        } else if depth > 0 {
            rename_normalized(folder)?;
        }
        Ok(removable)
    }
}

/// Entries of `folder`, sorted by name so runs are reproducible.
fn list_entries(folder: &Path) -> SortResult<Vec<PathBuf>> {
    let entries = fs::read_dir(folder).map_err(|e| SortError::io(folder, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SortError::io(folder, e))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn is_category_folder(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(Category::from_dir_name)
        .is_some()
}

/// Renames `path` in place so that its stem is normalized.
///
/// The extension is kept. An occupied target leaves the entry untouched.
fn rename_normalized(path: &Path) -> SortResult<()> {
    let Some(stem) = path.file_stem() else {
        return Ok(());
    };
    let stem = stem.to_string_lossy();
    let normalized = normalize(&stem);
    if normalized == stem {
        return Ok(());
    }

    let target = path.with_file_name(entry_name(&normalized, path.extension()));
    if fs::symlink_metadata(&target).is_ok() {
        warn!(
            "not renaming {} to {}: target already exists",
            path.display(),
            target.display()
        );
        return Ok(());
    }

    fs::rename(path, &target).map_err(|e| SortError::io(path, e))?;
    debug!("renamed {} to {}", path.display(), target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn walk(root: &Path) -> RunReport {
        let mapper = CategoryMapper::default();
        let mut report = RunReport::new();
        TreeWalker::new(root, &mapper, &mut report)
            .run()
            .expect("walk failed");
        report
    }

    #[test]
    fn test_root_is_never_deleted() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let report = walk(temp_dir.path());

        assert!(temp_dir.path().is_dir());
        assert_eq!(report.folders_deleted, 0);
    }

    #[test]
    fn test_nested_files_sort_to_the_root_categories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        write(root, "a/b/c/deep.mp3", b"tune");

        let report = walk(root);

        assert!(root.join("audio").join("deep.mp3").is_file());
        assert!(!root.join("a").exists());
        assert_eq!(report.folders_deleted, 3);
        assert_eq!(report.moved(Category::Audio), 1);
    }

    #[test]
    fn test_unsupported_file_keeps_folder_and_is_normalized() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        write(root, "Папка/нотатки.xyz", b"notes");
        write(root, "Папка/pic.png", b"png");

        let report = walk(root);

        assert!(root.join("Papka").join("notatki.xyz").is_file());
        assert!(!root.join("Папка").exists());
        assert!(root.join("images").join("pic.png").is_file());
        assert_eq!(report.unsupported, 1);
        assert_eq!(report.folders_deleted, 0);
    }

    #[test]
    fn test_kept_child_keeps_parent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        write(root, "outer/inner/readme", b"no extension");
        write(root, "outer/empty_sibling/song.wav", b"wav");

        let report = walk(root);

        assert!(root.join("outer").join("inner").join("readme").is_file());
        assert!(!root.join("outer").join("empty_sibling").exists());
        assert_eq!(report.folders_deleted, 1);
        assert_eq!(report.unsupported, 1);
    }

    #[test]
    fn test_root_category_folders_are_not_walked() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        write(root, "images/existing.png", b"keep me");
        write(root, "documents/Old Notes.md", b"unsupported but untouched");

        let report = walk(root);

        assert!(root.join("images").join("existing.png").is_file());
        assert!(root.join("documents").join("Old Notes.md").is_file());
        assert!(report.is_empty());
    }

    #[test]
    fn test_nested_category_named_folder_is_walked() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        write(root, "trip/images/beach.jpg", b"jpg");

        let report = walk(root);

        assert!(root.join("images").join("beach.jpg").is_file());
        assert!(!root.join("trip").exists());
        assert_eq!(report.folders_deleted, 2);
    }

    #[test]
    fn test_unsupported_rename_never_overwrites() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        write(root, "a b.xyz", b"spaced");
        write(root, "a_b.xyz", b"underscored");

        let report = walk(root);

        assert_eq!(fs::read(root.join("a b.xyz")).unwrap(), b"spaced");
        assert_eq!(fs::read(root.join("a_b.xyz")).unwrap(), b"underscored");
        assert_eq!(report.unsupported, 2);
    }

    #[test]
    fn test_folder_extension_is_kept_on_rename() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        write(root, "мій проект.v2/keep.bin", b"bin");

        walk(root);

        assert!(root.join("mij_proekt.v2").join("keep.bin").is_file());
    }
}

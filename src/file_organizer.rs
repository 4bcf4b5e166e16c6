/// Placement of single files into their category folders.
///
/// This module decides where a classified file goes under the sorting root,
/// resolves name collisions (deleting true duplicates, renaming the rest)
/// and makes sure the category folder exists before the move.
use crate::error::{SortError, SortResult};
use crate::file_category::Category;
use crate::hasher;
use crate::normalize::normalize;
use crate::output::OutputFormatter;
use crate::report::RunReport;
use glob::Pattern;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What happened to a file handed to [`FilePlacer::place`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Moved under its normalized name.
    Moved(PathBuf),
    /// Moved under a `_renamed_NNN_` name because the normalized one was taken.
    Renamed(PathBuf),
    /// Deleted because an identical file already occupied the destination.
    DuplicateDeleted,
}

/// Moves files into category subdirectories of the sorting root.
pub struct FilePlacer;

impl FilePlacer {
    /// Moves `file` into `root/<category>` and records the outcome in `report`.
    ///
    /// The file's stem is normalized and its extension kept as is. When the
    /// destination name is taken the source is hashed once; an existing file
    /// of equal size and hash makes the source a duplicate, which is deleted.
    /// Otherwise `_renamed_001_`, `_renamed_002_`, ... is appended to the stem
    /// until a free name is found. In the archives folder a name also counts
    /// as taken when any entry shares the stem, so that every archive gets its
    /// own extraction folder.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use clean_folder::file_category::Category;
    /// use clean_folder::file_organizer::FilePlacer;
    /// use clean_folder::report::RunReport;
    /// use std::path::Path;
    ///
    /// let mut report = RunReport::new();
    /// let placement = FilePlacer::place(
    ///     Path::new("/path/to/root"),
    ///     Path::new("/path/to/root/inbox/photo.png"),
    ///     Category::Images,
    ///     &mut report,
    /// );
    /// match placement {
    ///     Ok(p) => println!("{:?}", p),
    ///     Err(e) => eprintln!("Sorting failed: {}", e),
    /// }
    /// ```
    pub fn place(
        root: &Path,
        file: &Path,
        category: Category,
        report: &mut RunReport,
    ) -> SortResult<Placement> {
        let category_dir = root.join(category.dir_name());
        let base_stem = normalize(&file.file_stem().unwrap_or_default().to_string_lossy());
        let extension = file.extension();

        let mut stem = base_stem.clone();
        let mut candidate = category_dir.join(entry_name(&stem, extension));
        let mut renamed = false;

        if candidate != file && Self::is_taken(&category_dir, &candidate, &stem, category)? {
            let source_len = fs::metadata(file)
                .map_err(|e| SortError::io(file, e))?
                .len();
            let source_hash = hasher::hash_file(file).map_err(|e| SortError::io(file, e))?;

            let mut attempt = 0u32;
            loop {
                if Self::is_duplicate(&candidate, source_len, &source_hash)? {
                    fs::remove_file(file).map_err(|e| SortError::io(file, e))?;
                    report.duplicates_deleted += 1;
                    debug!(
                        "deleted {} (duplicate of {})",
                        file.display(),
                        candidate.display()
                    );
                    return Ok(Placement::DuplicateDeleted);
                }

                attempt += 1;
                stem = format!("{base_stem}_renamed_{attempt:03}_");
                candidate = category_dir.join(entry_name(&stem, extension));
                if !Self::is_taken(&category_dir, &candidate, &stem, category)? {
                    break;
                }
            }
            report.renamed += 1;
            renamed = true;
        }

        Self::ensure_category_dir(root, category)?;

        fs::rename(file, &candidate).map_err(|e| SortError::io(file, e))?;
        debug!("moved {} to {}", file.display(), candidate.display());

        if category == Category::Archives {
            report.pending_archives.push(candidate.clone());
        }
        report.record_move(category);

        Ok(if renamed {
            Placement::Renamed(candidate)
        } else {
            Placement::Moved(candidate)
        })
    }

    /// Whether `candidate` (with stem `stem`) is already occupied.
    fn is_taken(
        category_dir: &Path,
        candidate: &Path,
        stem: &str,
        category: Category,
    ) -> SortResult<bool> {
        if fs::symlink_metadata(candidate).is_ok() {
            return Ok(true);
        }
        if category != Category::Archives || !category_dir.is_dir() {
            return Ok(false);
        }
        if category_dir.join(stem).exists() {
            return Ok(true);
        }

        let raw = format!("{}.*", Pattern::escape(stem));
        let pattern = Pattern::new(&raw).map_err(|source| SortError::Pattern {
            pattern: raw.clone(),
            source,
        })?;
        let entries = fs::read_dir(category_dir).map_err(|e| SortError::io(category_dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| SortError::io(category_dir, e))?;
            if pattern.matches(&entry.file_name().to_string_lossy()) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether `candidate` is a regular file with the given size and content hash.
    fn is_duplicate(candidate: &Path, len: u64, hash: &str) -> SortResult<bool> {
        if !candidate.is_file() {
            return Ok(false);
        }
        let candidate_len = fs::metadata(candidate)
            .map_err(|e| SortError::io(candidate, e))?
            .len();
        if candidate_len != len {
            return Ok(false);
        }
        let candidate_hash = hasher::hash_file(candidate).map_err(|e| SortError::io(candidate, e))?;
        Ok(candidate_hash == hash)
    }

    /// Makes sure `root/<category>` is a directory.
    ///
    /// A plain file squatting on the folder name is renamed aside to
    /// `<category>N`, the folder is created, and the file is moved into it
    /// under its original name.
    fn ensure_category_dir(root: &Path, category: Category) -> SortResult<PathBuf> {
        let name = category.dir_name();
        let category_dir = root.join(name);
        if category_dir.is_dir() {
            return Ok(category_dir);
        }

        if !category_dir.exists() {
            fs::create_dir(&category_dir).map_err(|e| SortError::io(&category_dir, e))?;
            OutputFormatter::info(&format!(
                "Folder {} has been created.",
                category_dir.display()
            ));
            return Ok(category_dir);
        }

        let mut n = 1u32;
        let mut aside = root.join(format!("{name}{n}"));
        while fs::symlink_metadata(&aside).is_ok() {
            n += 1;
            aside = root.join(format!("{name}{n}"));
        }

        fs::rename(&category_dir, &aside).map_err(|e| SortError::io(&category_dir, e))?;
        fs::create_dir(&category_dir).map_err(|e| SortError::io(&category_dir, e))?;
        fs::rename(&aside, category_dir.join(name)).map_err(|e| SortError::io(&aside, e))?;

        OutputFormatter::info(&format!(
            "Folder \"{}\" has been created.",
            category_dir.display()
        ));
        OutputFormatter::warning(&format!(
            "Warning: the file \"{}\" was moved into the newly created folder.",
            category_dir.display()
        ));
        Ok(category_dir)
    }
}

/// Joins a stem and an optional extension into an entry name.
pub(crate) fn entry_name(stem: &str, extension: Option<&OsStr>) -> OsString {
    let mut name = OsString::from(stem);
    if let Some(ext) = extension {
        name.push(".");
        name.push(ext);
    }
    name
}

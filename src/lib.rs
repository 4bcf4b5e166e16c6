//! clean-folder - sort a folder tree into category subfolders
//!
//! This library walks a directory tree, moves files into `images`, `video`,
//! `documents`, `audio` and `archives` folders under the root by extension,
//! deletes content-identical duplicates, transliterates names to ASCII,
//! unpacks archives and removes the folders left empty.

pub mod archive;
pub mod cli;
pub mod error;
pub mod file_category;
pub mod file_organizer;
pub mod hasher;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod report;
pub mod walker;

pub use archive::{ArchiveExtractor, StandardExtractor};
pub use error::{ExtractError, SortError, SortResult};
pub use file_category::{Category, CategoryMapper};
pub use file_organizer::{FilePlacer, Placement};
pub use report::RunReport;

pub use cli::{sort_directory, sort_directory_with};

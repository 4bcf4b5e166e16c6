//! Error types shared by the walker, the placer and the archive post-processor.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a sorting run.
#[derive(Debug, Error)]
pub enum SortError {
    /// The root path given on the command line does not exist.
    #[error("The specified path ({}) does not exist.", .0.display())]
    PathNotFound(PathBuf),

    /// The root path given on the command line is a regular file.
    #[error("The specified path ({}) is a file (not a folder).", .0.display())]
    NotADirectory(PathBuf),

    /// A filesystem operation failed on the given path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A name-matching pattern could not be built.
    #[error("invalid name pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl SortError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for sorting operations.
pub type SortResult<T> = Result<T, SortError>;

/// Failure modes of an [`ArchiveExtractor`](crate::archive::ArchiveExtractor).
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file content cannot be read as any supported archive format.
    #[error("cannot read {} as an archive: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// The archive was recognised but writing its contents failed.
    #[error("I/O error while unpacking {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ExtractError> for SortError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Io { path, source } => SortError::Io { path, source },
            ExtractError::Unreadable { path, reason } => SortError::Io {
                path,
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, reason),
            },
        }
    }
}

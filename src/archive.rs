//! Unpacking of the archives collected during the walk.
//!
//! The walk only records which files landed in `archives/`; once it is done,
//! [`unpack_archives`] hands each of them to an [`ArchiveExtractor`]. The
//! standard extractor recognises zip, tar and gzip-compressed tar by their
//! content rather than by their extension.

use crate::error::{ExtractError, SortError, SortResult};
use crate::file_category::Category;
use crate::output::OutputFormatter;
use crate::report::RunReport;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Read};
use std::path::Path;
use tracing::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

/// Bytes read to recognise an archive format; tar needs the first 262.
const SNIFF_LEN: u64 = 512;

/// Extracts an archive file into a destination folder.
pub trait ArchiveExtractor {
    /// Unpacks `archive` into `destination`, creating the folder.
    ///
    /// Returns [`ExtractError::Unreadable`] when the content is not a
    /// supported archive; nothing is written in that case.
    fn extract(&self, archive: &Path, destination: &Path) -> Result<(), ExtractError>;
}

/// Extractor for zip, tar and `.tar.gz` content.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardExtractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveFormat {
    Zip,
    Tar,
    Gzip,
}

impl ArchiveExtractor for StandardExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<(), ExtractError> {
        let header = read_header(File::open(archive).map_err(|e| io_error(archive, e))?)
            .map_err(|e| io_error(archive, e))?;

        match sniff(&header) {
            Some(ArchiveFormat::Zip) => extract_zip(archive, destination),
            Some(ArchiveFormat::Tar) => {
                let file = File::open(archive).map_err(|e| io_error(archive, e))?;
                unpack_tar(archive, file, destination)
            }
            Some(ArchiveFormat::Gzip) => {
                let file = File::open(archive).map_err(|e| io_error(archive, e))?;
                let inner = read_header(GzDecoder::new(file)).map_err(|e| classify(archive, e))?;
                if sniff(&inner) != Some(ArchiveFormat::Tar) {
                    return Err(unreadable(archive, "gzip data does not contain a tar archive"));
                }
                let file = File::open(archive).map_err(|e| io_error(archive, e))?;
                unpack_tar(archive, GzDecoder::new(file), destination)
            }
            None => Err(unreadable(archive, "unsupported archive format")),
        }
    }
}

fn read_header(reader: impl Read) -> io::Result<Vec<u8>> {
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    reader.take(SNIFF_LEN).read_to_end(&mut header)?;
    Ok(header)
}

fn sniff(header: &[u8]) -> Option<ArchiveFormat> {
    if infer::archive::is_zip(header) {
        Some(ArchiveFormat::Zip)
    } else if infer::archive::is_tar(header) {
        Some(ArchiveFormat::Tar)
    } else if infer::archive::is_gz(header) {
        Some(ArchiveFormat::Gzip)
    } else {
        None
    }
}

fn extract_zip(archive: &Path, destination: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive).map_err(|e| io_error(archive, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| zip_error(archive, e))?;
    fs::create_dir_all(destination).map_err(|e| io_error(destination, e))?;
    zip.extract(destination).map_err(|e| zip_error(archive, e))
}

fn unpack_tar(archive: &Path, reader: impl Read, destination: &Path) -> Result<(), ExtractError> {
    fs::create_dir_all(destination).map_err(|e| io_error(destination, e))?;
    tar::Archive::new(reader)
        .unpack(destination)
        .map_err(|e| classify(archive, e))
}

fn zip_error(archive: &Path, err: ZipError) -> ExtractError {
    match err {
        ZipError::Io(e) => classify(archive, e),
        other => unreadable(archive, &other.to_string()),
    }
}

/// Decoder failures mean the content is bad; anything else is the filesystem.
fn classify(archive: &Path, err: io::Error) -> ExtractError {
    match err.kind() {
        ErrorKind::InvalidData
        | ErrorKind::InvalidInput
        | ErrorKind::UnexpectedEof
        | ErrorKind::Other => unreadable(archive, &err.to_string()),
        _ => io_error(archive, err),
    }
}

fn unreadable(archive: &Path, reason: &str) -> ExtractError {
    ExtractError::Unreadable {
        path: archive.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn io_error(path: &Path, source: io::Error) -> ExtractError {
    ExtractError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Unpacks every archive pending in `report` into `root/archives/<stem>/`.
///
/// Unpacked archive files are deleted. Unreadable ones are reported with a
/// warning and left where they are; they do not count as unpacked. Any
/// other failure aborts the run.
pub fn unpack_archives(
    root: &Path,
    report: &mut RunReport,
    extractor: &dyn ArchiveExtractor,
) -> SortResult<()> {
    let pending = std::mem::take(&mut report.pending_archives);
    if pending.is_empty() {
        return Ok(());
    }

    let archives_dir = root.join(Category::Archives.dir_name());
    let pb = OutputFormatter::create_progress_bar(pending.len() as u64);

    for archive in pending {
        let stem = archive.file_stem().unwrap_or_default();
        let destination = archives_dir.join(stem);
        pb.set_message(stem.to_string_lossy().into_owned());

        match extractor.extract(&archive, &destination) {
            Ok(()) => {
                fs::remove_file(&archive).map_err(|e| SortError::io(&archive, e))?;
                debug!("unpacked {} into {}", archive.display(), destination.display());
                report.unpacked_archives.push(archive);
            }
            Err(ExtractError::Unreadable { reason, .. }) => {
                warn!("could not unpack {}: {}", archive.display(), reason);
                pb.suspend(|| {
                    OutputFormatter::warning(&format!(
                        "Warning: could not unpack the file \"{}\" ({}).",
                        archive.display(),
                        reason
                    ))
                });
                report.unreadable_archives.push(archive);
            }
            Err(err) => {
                pb.abandon();
                return Err(err.into());
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(())
}

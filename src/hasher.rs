//! Streaming content digests used to tell true duplicates from name clashes.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Chunk size for streaming reads.
pub const CHUNK_SIZE: usize = 128 * 1024;

/// Returns the BLAKE3 hex digest of a file's content.
///
/// The file is read in [`CHUNK_SIZE`] chunks so memory use does not depend
/// on file size. A path that is not a regular file hashes as empty content.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut hasher = blake3::Hasher::new();
    if path.is_file() {
        let mut file = File::open(path)?;
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let read = file.read(&mut buf)?;
            if read == 0 {
                break;
            }
            hasher.update(&buf[..read]);
        }
    }
    Ok(hasher.finalize().to_hex().to_string())
}

//! Hashing utilities

use crate::types::{FileHash, MergeError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Files larger than this are streamed instead of read whole (100 MB)
pub const CHUNKED_THRESHOLD: u64 = 100_000_000;

/// Read size used when streaming large files
pub const CHUNK_SIZE: usize = 4096;

/// Compute the Blake3 content hash of a file
///
/// Files at or below [`CHUNKED_THRESHOLD`] are read in one pass; larger files
/// are streamed in [`CHUNK_SIZE`] chunks. Both paths produce the same digest
/// for the same bytes.
///
/// # Returns
/// * `Ok((FileHash, u64))` - digest and number of bytes hashed
/// * `Err(MergeError::Hash)` - file could not be opened or read
///
/// # Example
/// ```no_run
/// use contentcopy::hash::compute_hash;
/// use std::path::Path;
///
/// let (hash, size) = compute_hash(Path::new("photo.jpg"))?;
/// println!("{} ({} bytes)", hash, size);
/// # Ok::<(), contentcopy::types::MergeError>(())
/// ```
pub fn compute_hash(file_path: &Path) -> Result<(FileHash, u64), MergeError> {
    let size = std::fs::metadata(file_path)
        .map_err(|source| hash_error(file_path, source))?
        .len();

    match strategy_for(size) {
        HashStrategy::Whole => hash_whole(file_path),
        HashStrategy::Chunked => hash_chunked(file_path),
    }
}

/// How a file of a given size is read for hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashStrategy {
    Whole,
    Chunked,
}

/// Strategy [`compute_hash`] uses for a file of `size` bytes
pub fn strategy_for(size: u64) -> HashStrategy {
    if size > CHUNKED_THRESHOLD {
        HashStrategy::Chunked
    } else {
        HashStrategy::Whole
    }
}

/// Hash a file by reading its entire content into memory
pub fn hash_whole(file_path: &Path) -> Result<(FileHash, u64), MergeError> {
    let content = std::fs::read(file_path).map_err(|source| hash_error(file_path, source))?;
    let hash = blake3::hash(&content);
    Ok((FileHash::from(hash), content.len() as u64))
}

/// Hash a file by streaming it in fixed-size chunks
pub fn hash_chunked(file_path: &Path) -> Result<(FileHash, u64), MergeError> {
    let mut file = File::open(file_path).map_err(|source| hash_error(file_path, source))?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(hash_error(file_path, source)),
        };

        hasher.update(&buffer[..bytes_read]);
        total += bytes_read as u64;
    }

    Ok((FileHash::from(hasher.finalize()), total))
}

fn hash_error(path: &Path, source: std::io::Error) -> MergeError {
    MergeError::Hash {
        path: path.to_path_buf(),
        source,
    }
}

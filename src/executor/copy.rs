//! Claim-then-fill file copy

use crate::diff::NameResolver;
use crate::types::{CopyPlanEntry, MergeError};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

/// Resolve a destination for `original` and create it atomically
///
/// The file is created with `create_new`, so a name that shows up between
/// the existence probe and the create is never overwritten: the resolver
/// marks it taken and probing continues.
pub fn claim_destination(
    resolver: &mut NameResolver,
    original: &Path,
) -> Result<(CopyPlanEntry, File), MergeError> {
    loop {
        let planned = resolver.resolve(original)?;

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&planned.destination)
        {
            Ok(file) => return Ok((planned, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                resolver.claim(&planned.destination);
                continue;
            }
            Err(source) => {
                return Err(MergeError::Copy {
                    from: planned.original,
                    to: planned.destination,
                    source,
                })
            }
        }
    }
}

/// Stream the original's bytes into an already claimed destination
///
/// On failure the partially written destination is removed.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(MergeError::Copy)` - source unreadable or destination unwritable
pub fn fill_destination(planned: &CopyPlanEntry, dest_file: File) -> Result<u64, MergeError> {
    match stream_into(&planned.original, dest_file) {
        Ok(bytes) => Ok(bytes),
        Err(source) => {
            let _ = fs::remove_file(&planned.destination);
            Err(MergeError::Copy {
                from: planned.original.clone(),
                to: planned.destination.clone(),
                source,
            })
        }
    }
}

fn stream_into(src: &Path, mut dest_file: File) -> std::io::Result<u64> {
    let mut src_file = File::open(src)?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = match src_file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        dest_file.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    dest_file.sync_all()?;
    Ok(total_bytes)
}

//! Parallel content indexing based on ignore crate's parallel traversal.

use crate::hash::compute_hash;
use crate::scanner::{accept_entry, base_walk_builder, walk_error, MaxDepth};
use crate::types::{ContentIndex, FileHash, MergeError};
use ignore::WalkState;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

#[derive(Default)]
struct CollectedIndex {
    hashed: Vec<(FileHash, PathBuf, u64)>,
    fatal_error: Option<MergeError>,
}

/// Build a [`ContentIndex`] with hashing spread over `threads` workers.
///
/// Walk and depth rules are the same as [`super::index_tree`]. The first
/// failure stops every worker and is returned; no partial index is produced.
/// Which path represents duplicated content depends on worker scheduling.
pub fn index_tree_parallel<F>(
    root_path: &Path,
    max_depth: MaxDepth,
    predicate: &F,
    threads: usize,
) -> Result<ContentIndex, MergeError>
where
    F: Fn(&Path) -> bool + Sync + ?Sized,
{
    let start_time = Instant::now();
    let collected = Mutex::new(CollectedIndex::default());

    let walker = base_walk_builder(root_path, max_depth)
        .threads(threads.max(1))
        .build_parallel();

    walker.run(|| {
        let collected = &collected;

        Box::new(move |result| {
            match collected.lock() {
                Ok(state) if state.fatal_error.is_some() => return WalkState::Quit,
                Ok(_) => {}
                Err(_) => return WalkState::Quit,
            }

            let outcome = match result {
                Ok(entry) => match accept_entry(&entry, max_depth, predicate) {
                    Some(file) => compute_hash(&file.path).map(|(hash, size)| Some((hash, file.path, size))),
                    None => Ok(None),
                },
                Err(err) => Err(walk_error(root_path, err)),
            };

            let mut state = match collected.lock() {
                Ok(state) => state,
                Err(_) => return WalkState::Quit,
            };

            match outcome {
                Ok(Some(hashed)) => {
                    state.hashed.push(hashed);
                    WalkState::Continue
                }
                Ok(None) => WalkState::Continue,
                Err(err) => {
                    if state.fatal_error.is_none() {
                        state.fatal_error = Some(err);
                    }
                    WalkState::Quit
                }
            }
        })
    });

    let mut state = collected
        .into_inner()
        .map_err(|_| MergeError::Validation("Parallel indexer state lock poisoned".to_string()))?;

    if let Some(err) = state.fatal_error.take() {
        return Err(err);
    }

    let mut index = ContentIndex::new(root_path.to_path_buf());
    for (hash, path, size) in state.hashed {
        index.insert(hash, path, size);
    }

    index.set_duration(start_time.elapsed());
    Ok(index)
}

//! Content indexing - hash every walked file of a tree

mod parallel;

pub use parallel::index_tree_parallel;

use crate::hash::compute_hash;
use crate::scanner::{MaxDepth, TreeWalker};
use crate::types::{ContentIndex, MergeError};
use std::path::Path;
use std::time::Instant;

/// Build a [`ContentIndex`] for a tree, one file at a time
///
/// Every file yielded by the walker is hashed in walk order. On duplicate
/// content the path visited last is kept. The first walk or hash failure
/// aborts the whole index.
///
/// # Example
/// ```no_run
/// use contentcopy::index::index_tree;
/// use contentcopy::scanner::MaxDepth;
/// use std::path::Path;
///
/// let index = index_tree(Path::new("photos"), MaxDepth::Unbounded, &|_: &Path| true)?;
/// println!("{} distinct files", index.len());
/// # Ok::<(), contentcopy::types::MergeError>(())
/// ```
pub fn index_tree<F>(
    root_path: &Path,
    max_depth: MaxDepth,
    predicate: &F,
) -> Result<ContentIndex, MergeError>
where
    F: Fn(&Path) -> bool + ?Sized,
{
    let start_time = Instant::now();
    let mut index = ContentIndex::new(root_path.to_path_buf());
    let walker = TreeWalker::new(root_path, max_depth, |path: &Path| predicate(path));

    for file in walker.iter() {
        let file = file?;
        let (hash, size) = compute_hash(&file.path)?;
        index.insert(hash, file.path, size);
    }

    index.set_duration(start_time.elapsed());
    Ok(index)
}

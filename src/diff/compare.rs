//! Set difference between two content indexes

use crate::types::{ContentIndex, DiffEntry, MergeDiff, MergeDirection};

/// Entries of `candidates` whose content is absent from `baseline`
///
/// Iteration order follows the candidate index and is not stable.
pub fn difference(baseline: &ContentIndex, candidates: &ContentIndex) -> MergeDiff {
    let entries = candidates
        .iter()
        .filter(|(hash, _)| !baseline.contains(hash))
        .map(|(hash, path)| DiffEntry {
            hash: *hash,
            path: path.clone(),
        })
        .collect();

    MergeDiff { entries }
}

/// Files that need copying into the destination, sorted by original path
///
/// * `SourceIntoDestination`: source content the destination does not have.
/// * `DestinationOnly`: destination content the source does not have.
pub fn compute_merge_diff(
    source: &ContentIndex,
    destination: &ContentIndex,
    direction: MergeDirection,
) -> MergeDiff {
    let mut diff = match direction {
        MergeDirection::SourceIntoDestination => difference(destination, source),
        MergeDirection::DestinationOnly => difference(source, destination),
    };
    diff.sort_by_path();
    diff
}

//! Merge plan types - what gets copied where

use super::FileHash;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One file whose content is missing on the receiving side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub hash: FileHash,
    pub path: PathBuf,
}

/// Entries present in the candidate index but absent from the baseline index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeDiff {
    pub entries: Vec<DiffEntry>,
}

impl MergeDiff {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries.iter()
    }

    /// Sort entries by original path so runs are reproducible
    pub fn sort_by_path(&mut self) {
        self.entries.sort_by(|a, b| a.path.cmp(&b.path));
    }
}

/// A planned copy with its collision-free destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyPlanEntry {
    /// File being copied
    pub original: PathBuf,

    /// Where it lands, directly inside the destination root
    pub destination: PathBuf,

    /// True when a `_<n>` suffix had to be appended
    pub renamed: bool,
}

/// Which tree is scanned for new content
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MergeDirection {
    /// Copy source files whose content is absent from the destination
    #[default]
    #[serde(rename = "source")]
    #[value(name = "source")]
    SourceIntoDestination,

    /// Copy destination files whose content is absent from the source,
    /// back into the destination root
    #[serde(rename = "destination-only")]
    #[value(name = "destination-only")]
    DestinationOnly,
}

/// What to do when copying a single entry fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// First failure aborts the run
    #[default]
    Abort,

    /// Log the failure, keep copying, report at the end
    Continue,
}

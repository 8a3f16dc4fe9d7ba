//! ContentIndex - content hash to representative path for one tree

use super::FileHash;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Content index of a directory tree
#[derive(Debug, Clone, PartialEq)]
pub struct ContentIndex {
    /// Map: content hash → last path visited with that content
    pub entries: HashMap<FileHash, PathBuf>,

    /// Aggregate statistics
    pub stats: IndexStats,

    /// Tree that was indexed
    pub root_path: PathBuf,
}

/// Statistics gathered while building an index
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Files hashed (including collapsed duplicates)
    pub files_indexed: usize,

    /// Bytes read while hashing
    pub bytes_hashed: u64,

    /// Files whose content was already present under another path
    pub duplicates: usize,

    /// Wall-clock time spent indexing
    pub duration: Duration,
}

impl ContentIndex {
    /// Create a new empty index for a tree
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            entries: HashMap::new(),
            stats: IndexStats::default(),
            root_path,
        }
    }

    /// Record a hashed file
    ///
    /// Last writer wins: if the hash is already present, the previous path is
    /// replaced and returned.
    pub fn insert(&mut self, hash: FileHash, path: PathBuf, size: u64) -> Option<PathBuf> {
        self.stats.files_indexed += 1;
        self.stats.bytes_hashed += size;

        let previous = self.entries.insert(hash, path);
        if previous.is_some() {
            self.stats.duplicates += 1;
        }
        previous
    }

    /// Representative path for a hash
    pub fn get(&self, hash: &FileHash) -> Option<&Path> {
        self.entries.get(hash).map(PathBuf::as_path)
    }

    /// Check if some file in the tree has this content
    pub fn contains(&self, hash: &FileHash) -> bool {
        self.entries.contains_key(hash)
    }

    /// Number of distinct contents in the tree
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterator over (hash, path) pairs, in map order
    pub fn iter(&self) -> impl Iterator<Item = (&FileHash, &PathBuf)> {
        self.entries.iter()
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.stats.duration = duration;
    }
}

//! Collision-free destination names

use crate::types::{CopyPlanEntry, MergeError};
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Split a file name into stem and extension (extension keeps its dot)
///
/// `photo.tar.gz` gives `("photo.tar", ".gz")`, `.bashrc` and `README` have
/// no extension.
pub fn split_file_name(file_name: &OsStr) -> (OsString, OsString) {
    let path = Path::new(file_name);
    let stem = path.file_stem().unwrap_or(file_name).to_owned();
    let mut extension = OsString::new();
    if let Some(ext) = path.extension() {
        extension.push(".");
        extension.push(ext);
    }
    (stem, extension)
}

/// `stem_<counter><extension>`
pub fn suffixed_name(file_name: &OsStr, counter: usize) -> OsString {
    let (stem, extension) = split_file_name(file_name);
    let mut name = stem;
    name.push(format!("_{}", counter));
    name.push(extension);
    name
}

/// Picks names inside one destination root that collide with nothing
///
/// A name is taken when something exists at that path (checked on the
/// filesystem on every probe) or when an earlier entry of the same run
/// claimed it. The second rule keeps dry runs in step with real runs.
#[derive(Debug)]
pub struct NameResolver {
    root: PathBuf,
    claimed: HashSet<OsString>,
}

impl NameResolver {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            claimed: HashSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_taken(&self, name: &OsStr) -> bool {
        self.claimed.contains(name) || self.root.join(name).symlink_metadata().is_ok()
    }

    /// Resolve the destination for `original`, flattened into the root
    ///
    /// The chosen name is recorded as claimed before returning.
    pub fn resolve(&mut self, original: &Path) -> Result<CopyPlanEntry, MergeError> {
        let file_name = original
            .file_name()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| MergeError::Naming {
                path: original.to_path_buf(),
            })?;

        let mut candidate = file_name.to_owned();
        let mut counter = 1;
        while self.is_taken(&candidate) {
            candidate = suffixed_name(file_name, counter);
            counter += 1;
        }

        let entry = CopyPlanEntry {
            original: original.to_path_buf(),
            destination: self.root.join(&candidate),
            renamed: counter > 1,
        };
        self.claimed.insert(candidate);
        Ok(entry)
    }

    /// Mark a name as taken, e.g. after losing a race for it
    pub fn claim(&mut self, destination: &Path) {
        if let Some(name) = destination.file_name() {
            self.claimed.insert(name.to_owned());
        }
    }

    /// Give back a claimed name whose copy was abandoned
    ///
    /// The name is only reused if nothing exists at that path.
    pub fn release(&mut self, destination: &Path) {
        if let Some(name) = destination.file_name() {
            self.claimed.remove(name);
        }
    }
}

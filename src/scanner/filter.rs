//! Built-in inclusion predicates

use crate::types::MergeError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Exclusion filter built from file extensions and glob patterns
///
/// A path is included unless its extension is listed or it matches one of
/// the globs. Globs are tested against the full path and the bare file name,
/// so `*.mp4` and `**/cache/**` both behave as expected.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    extensions: Vec<String>,
    globs: Option<GlobSet>,
}

impl PathFilter {
    /// Filter that includes everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude files with any of these extensions (case-insensitive, leading dot optional)
    ///
    /// Matching is on the file name's suffix, so `mp4` also excludes a file
    /// named `.mp4` and `tar.gz` excludes `backup.tar.gz`.
    pub fn with_excluded_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions.extend(
            extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .filter(|ext| !ext.is_empty()),
        );
        self
    }

    /// Exclude files matching any of these glob patterns
    pub fn with_excluded_globs<I, S>(mut self, patterns: I) -> Result<Self, MergeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut count = 0usize;
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).map_err(|e| {
                MergeError::Config(format!("Invalid exclude pattern '{}': {}", pattern, e))
            })?;
            builder.add(glob);
            count += 1;
        }

        if count > 0 {
            let set = builder
                .build()
                .map_err(|e| MergeError::Config(format!("Failed to build exclude set: {}", e)))?;
            self.globs = Some(set);
        }
        Ok(self)
    }

    /// The inclusion predicate
    pub fn includes(&self, path: &Path) -> bool {
        if !self.extensions.is_empty() {
            if let Some(name) = path.file_name() {
                let name = name.to_string_lossy().to_ascii_lowercase();
                let excluded = self.extensions.iter().any(|ext| {
                    name.strip_suffix(ext.as_str())
                        .is_some_and(|rest| rest.ends_with('.'))
                });
                if excluded {
                    return false;
                }
            }
        }

        if let Some(globs) = &self.globs {
            if globs.is_match(path) {
                return false;
            }
            if let Some(name) = path.file_name() {
                if globs.is_match(Path::new(name)) {
                    return false;
                }
            }
        }

        true
    }
}

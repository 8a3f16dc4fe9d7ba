//! Lazy recursive file walker

use crate::types::MergeError;
use std::path::{Path, PathBuf};

/// How deep below the root files are still yielded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxDepth {
    #[default]
    Unbounded,

    /// Files at depth `>= n` are skipped (depth 0 = root's own files)
    Limited(usize),
}

impl MaxDepth {
    /// Whether a file at `depth` is inside the bound
    pub fn allows(&self, depth: usize) -> bool {
        match self {
            MaxDepth::Unbounded => true,
            MaxDepth::Limited(limit) => depth < *limit,
        }
    }

    /// Walker depth limit in `ignore` terms, where the root itself is depth 0
    pub(crate) fn walker_limit(&self) -> Option<usize> {
        match self {
            MaxDepth::Unbounded => None,
            MaxDepth::Limited(limit) => Some(*limit),
        }
    }
}

impl From<Option<usize>> for MaxDepth {
    fn from(value: Option<usize>) -> Self {
        value.map_or(MaxDepth::Unbounded, MaxDepth::Limited)
    }
}

/// A regular file found by the walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    /// Root joined with the file's relative path
    pub path: PathBuf,

    /// Number of directories between the root and the file
    pub depth: usize,
}

/// Recursive walker over the regular files of one tree
///
/// The walker is restartable: every call to [`TreeWalker::iter`] starts a
/// fresh traversal. Nothing is materialized up front.
///
/// # Example
/// ```no_run
/// use contentcopy::scanner::{MaxDepth, TreeWalker};
/// use std::path::Path;
///
/// let walker = TreeWalker::new(Path::new("photos"), MaxDepth::Limited(2), |p: &Path| {
///     p.extension().map_or(true, |ext| ext != "mp4")
/// });
/// for file in walker.iter() {
///     println!("{}", file?.path.display());
/// }
/// # Ok::<(), contentcopy::types::MergeError>(())
/// ```
pub struct TreeWalker<F> {
    root: PathBuf,
    max_depth: MaxDepth,
    predicate: F,
}

impl<F> TreeWalker<F>
where
    F: Fn(&Path) -> bool,
{
    pub fn new(root: &Path, max_depth: MaxDepth, predicate: F) -> Self {
        Self {
            root: root.to_path_buf(),
            max_depth,
            predicate,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a new traversal
    pub fn iter(&self) -> WalkIter<'_, F> {
        let walk = base_walk_builder(&self.root, self.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        WalkIter {
            walk,
            root: &self.root,
            max_depth: self.max_depth,
            predicate: &self.predicate,
        }
    }
}

/// Iterator produced by [`TreeWalker::iter`]
pub struct WalkIter<'a, F> {
    walk: ignore::Walk,
    root: &'a Path,
    max_depth: MaxDepth,
    predicate: &'a F,
}

impl<F> Iterator for WalkIter<'_, F>
where
    F: Fn(&Path) -> bool,
{
    type Item = Result<WalkedFile, MergeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(walk_error(self.root, err))),
            };

            if let Some(file) = accept_entry(&entry, self.max_depth, self.predicate) {
                return Some(Ok(file));
            }
        }
    }
}

/// Walk builder shared by the sequential and parallel traversals
///
/// No ignore files, no hidden-file filtering and no symlink following:
/// every regular file under the root is a candidate.
pub(crate) fn base_walk_builder(root: &Path, max_depth: MaxDepth) -> ignore::WalkBuilder {
    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .max_depth(max_depth.walker_limit());
    builder
}

/// Turn a raw walker entry into a [`WalkedFile`] if it passes every rule
pub(crate) fn accept_entry<F>(
    entry: &ignore::DirEntry,
    max_depth: MaxDepth,
    predicate: &F,
) -> Option<WalkedFile>
where
    F: Fn(&Path) -> bool + ?Sized,
{
    // Depth 0 is the root itself
    if entry.depth() == 0 {
        return None;
    }

    let file_type = entry.file_type()?;
    if !file_type.is_file() {
        return None;
    }

    let depth = entry.depth() - 1;
    if !max_depth.allows(depth) {
        return None;
    }

    if !predicate(entry.path()) {
        return None;
    }

    Some(WalkedFile {
        path: entry.path().to_path_buf(),
        depth,
    })
}

pub(crate) fn walk_error(root: &Path, err: ignore::Error) -> MergeError {
    let path = match &err {
        ignore::Error::WithPath { path, .. } => path.clone(),
        ignore::Error::WithDepth { err, .. } => match err.as_ref() {
            ignore::Error::WithPath { path, .. } => path.clone(),
            _ => root.to_path_buf(),
        },
        _ => root.to_path_buf(),
    };

    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message));

    MergeError::Walk { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    fn include_all(_: &Path) -> bool {
        true
    }

    fn relative_paths<F: Fn(&Path) -> bool>(walker: &TreeWalker<F>) -> BTreeSet<PathBuf> {
        walker
            .iter()
            .map(|file| {
                file.expect("walk should succeed")
                    .path
                    .strip_prefix(walker.root())
                    .expect("path under root")
                    .to_path_buf()
            })
            .collect()
    }

    /// root/top.txt, root/a/mid.txt, root/a/b/deep.txt
    fn layered_tree() -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("top.txt"), "0").unwrap();
        fs::write(root.join("a/mid.txt"), "1").unwrap();
        fs::write(root.join("a/b/deep.txt"), "2").unwrap();
        temp_dir
    }

    #[test]
    fn test_walk_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let walker = TreeWalker::new(temp_dir.path(), MaxDepth::Unbounded, include_all);

        assert_eq!(walker.iter().count(), 0);
    }

    #[test]
    fn test_walk_unbounded_finds_all_files() {
        let temp_dir = layered_tree();
        let walker = TreeWalker::new(temp_dir.path(), MaxDepth::Unbounded, include_all);

        let paths = relative_paths(&walker);
        assert_eq!(paths.len(), 3);
        assert!(paths.contains(Path::new("a/b/deep.txt")));
    }

    #[test]
    fn test_walk_reports_explicit_depth() {
        let temp_dir = layered_tree();
        let walker = TreeWalker::new(temp_dir.path(), MaxDepth::Unbounded, include_all);

        for file in walker.iter() {
            let file = file.unwrap();
            let expected = match file.path.file_name().and_then(|n| n.to_str()) {
                Some("top.txt") => 0,
                Some("mid.txt") => 1,
                Some("deep.txt") => 2,
                other => panic!("unexpected file {:?}", other),
            };
            assert_eq!(file.depth, expected);
        }
    }

    #[test]
    fn test_depth_equal_to_limit_is_excluded() {
        let temp_dir = layered_tree();
        let walker = TreeWalker::new(temp_dir.path(), MaxDepth::Limited(2), include_all);

        let paths = relative_paths(&walker);
        assert!(paths.contains(Path::new("top.txt")));
        assert!(paths.contains(Path::new("a/mid.txt")), "depth 1 < 2 is kept");
        assert!(
            !paths.contains(Path::new("a/b/deep.txt")),
            "depth 2 == limit is dropped"
        );
    }

    #[test]
    fn test_limit_one_keeps_root_files_only() {
        let temp_dir = layered_tree();
        let walker = TreeWalker::new(temp_dir.path(), MaxDepth::Limited(1), include_all);

        let paths = relative_paths(&walker);
        assert_eq!(paths, BTreeSet::from([PathBuf::from("top.txt")]));
    }

    #[test]
    fn test_limit_zero_yields_nothing() {
        let temp_dir = layered_tree();
        let walker = TreeWalker::new(temp_dir.path(), MaxDepth::Limited(0), include_all);

        assert_eq!(walker.iter().count(), 0);
    }

    #[test]
    fn test_predicate_filters_paths() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("keep.jpg"), "k").unwrap();
        fs::write(root.join("skip.mp4"), "s").unwrap();

        let walker = TreeWalker::new(root, MaxDepth::Unbounded, |p: &Path| {
            p.extension().map_or(true, |ext| ext != "mp4")
        });

        let paths = relative_paths(&walker);
        assert_eq!(paths, BTreeSet::from([PathBuf::from("keep.jpg")]));
    }

    #[test]
    fn test_hidden_files_are_included() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".hidden"), "h").unwrap();
        fs::write(temp_dir.path().join(".gitignore"), ".hidden\n").unwrap();

        let walker = TreeWalker::new(temp_dir.path(), MaxDepth::Unbounded, include_all);
        let paths = relative_paths(&walker);

        assert!(paths.contains(Path::new(".hidden")));
        assert!(paths.contains(Path::new(".gitignore")));
    }

    #[test]
    fn test_walker_is_restartable() {
        let temp_dir = layered_tree();
        let walker = TreeWalker::new(temp_dir.path(), MaxDepth::Unbounded, include_all);

        assert_eq!(walker.iter().count(), 3);
        assert_eq!(walker.iter().count(), 3);
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinks_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("target.txt"), "t").unwrap();
        std::os::unix::fs::symlink(root.join("target.txt"), root.join("link.txt")).unwrap();

        let walker = TreeWalker::new(root, MaxDepth::Unbounded, include_all);
        let paths = relative_paths(&walker);

        assert_eq!(paths, BTreeSet::from([PathBuf::from("target.txt")]));
    }

    #[test]
    fn test_missing_root_is_a_walk_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let walker = TreeWalker::new(&missing, MaxDepth::Unbounded, include_all);

        let results: Vec<_> = walker.iter().collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(MergeError::Walk { .. })));
    }

    #[test]
    fn test_max_depth_from_option() {
        assert_eq!(MaxDepth::from(None), MaxDepth::Unbounded);
        assert_eq!(MaxDepth::from(Some(3)), MaxDepth::Limited(3));
        assert!(MaxDepth::Limited(3).allows(2));
        assert!(!MaxDepth::Limited(3).allows(3));
        assert!(MaxDepth::Unbounded.allows(usize::MAX));
    }
}

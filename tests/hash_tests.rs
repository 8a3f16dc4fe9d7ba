//! Content hashing and indexing tests

use contentcopy::hash::{
    compute_hash, hash_chunked, hash_whole, strategy_for, HashStrategy, CHUNKED_THRESHOLD,
    CHUNK_SIZE,
};
use contentcopy::index::{index_tree, index_tree_parallel};
use contentcopy::scanner::{MaxDepth, PathFilter};
use contentcopy::FileHash;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_temp_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

#[test]
fn test_compute_hash_matches_blake3() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = create_temp_file(&temp_dir, "test.txt", b"Hello, World!");

    let (hash, size) = compute_hash(&file_path).expect("Failed to compute hash");

    assert_eq!(hash, FileHash::from(blake3::hash(b"Hello, World!")));
    assert_eq!(size, 13);
}

#[test]
fn test_strategies_agree_on_one_mebibyte() {
    let temp_dir = tempfile::tempdir().unwrap();
    let content: Vec<u8> = (0..1024 * 1024).map(|i| (i * 7 % 256) as u8).collect();
    let file_path = create_temp_file(&temp_dir, "large.bin", &content);

    let whole = hash_whole(&file_path).unwrap();
    let chunked = hash_chunked(&file_path).unwrap();
    let auto = compute_hash(&file_path).unwrap();

    assert_eq!(whole, chunked);
    assert_eq!(whole, auto);
}

#[test]
fn test_strategies_agree_below_one_chunk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = create_temp_file(&temp_dir, "small.bin", &vec![1u8; CHUNK_SIZE - 1]);

    assert_eq!(hash_whole(&file_path).unwrap(), hash_chunked(&file_path).unwrap());
}

#[test]
fn test_strategy_switches_above_threshold() {
    assert_eq!(strategy_for(0), HashStrategy::Whole);
    assert_eq!(strategy_for(CHUNKED_THRESHOLD - 1), HashStrategy::Whole);
    assert_eq!(strategy_for(CHUNKED_THRESHOLD), HashStrategy::Whole);
    assert_eq!(strategy_for(CHUNKED_THRESHOLD + 1), HashStrategy::Chunked);
    assert_eq!(strategy_for(u64::MAX), HashStrategy::Chunked);
}

#[test]
fn test_compute_hash_at_threshold_boundary() {
    let temp_dir = tempfile::tempdir().unwrap();

    for size in [CHUNKED_THRESHOLD, CHUNKED_THRESHOLD + 1] {
        let path = temp_dir.path().join(format!("sparse_{}.bin", size));
        let file = File::create(&path).expect("Failed to create sparse file");
        file.set_len(size).expect("Failed to extend sparse file");
        drop(file);

        let (hash, hashed) = compute_hash(&path).unwrap();
        let (whole, whole_size) = hash_whole(&path).unwrap();

        assert_eq!(hashed, size, "reported size for {} bytes", size);
        assert_eq!(whole_size, size);
        assert_eq!(hash, whole, "digest for {} bytes", size);

        if strategy_for(size) == HashStrategy::Chunked {
            assert_eq!((hash, hashed), hash_chunked(&path).unwrap());
        }
    }
}

#[test]
fn test_name_does_not_affect_hash() {
    let temp_dir = tempfile::tempdir().unwrap();
    let a = create_temp_file(&temp_dir, "a.jpg", b"pixels");
    let b = create_temp_file(&temp_dir, "renamed.png", b"pixels");

    assert_eq!(compute_hash(&a).unwrap().0, compute_hash(&b).unwrap().0);
}

#[test]
fn test_index_with_builtin_filter() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("cache")).unwrap();
    fs::write(root.join("keep.jpg"), "keep").unwrap();
    fs::write(root.join("movie.MP4"), "movie").unwrap();
    fs::write(root.join("cache/blob.bin"), "blob").unwrap();

    let filter = PathFilter::new()
        .with_excluded_extensions(["mp4"])
        .with_excluded_globs(["**/cache/**"])
        .unwrap();
    let predicate = |p: &Path| filter.includes(p);

    let sequential = index_tree(root, MaxDepth::Unbounded, &predicate).unwrap();
    let parallel = index_tree_parallel(root, MaxDepth::Unbounded, &predicate, 2).unwrap();

    assert_eq!(sequential.len(), 1);
    assert_eq!(parallel.len(), 1);
    assert!(sequential.contains(&FileHash::from(blake3::hash(b"keep"))));
}

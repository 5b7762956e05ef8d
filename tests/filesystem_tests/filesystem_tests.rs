//! Tests for FileSystem
//!
//! These tests verify:
//! - Path-based create/open/list/delete
//! - Truncate-then-write semantics and block accounting
//! - Append through file handles
//! - Stale handle rejection
//! - File metadata

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use blockfs::{Config, Disk, FileSystem, FsError};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_fs(capacity: usize, block_size: usize) -> FileSystem {
    FileSystem::new(Disk::new(capacity, block_size).unwrap())
}

fn names(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Free bytes plus bytes held by every file must equal the partitioned capacity
fn assert_blocks_conserved(fs: &FileSystem, paths: &[&str]) {
    let stats = fs.stats();
    let held: usize = paths
        .iter()
        .map(|p| fs.metadata(&fs.open_file(p).unwrap()).unwrap().blocks)
        .sum();
    assert_eq!(stats.free_blocks + held, stats.total_blocks);
}

// =============================================================================
// Namespace Operation Tests
// =============================================================================

#[test]
fn test_from_config() {
    let config = Config::builder().capacity(64).block_size(8).build();
    let fs = FileSystem::from_config(&config).unwrap();

    assert_eq!(fs.stats().total_blocks, 8);
    assert!(fs.list_directory("/").unwrap().is_empty());
}

#[test]
fn test_from_config_rejects_bad_geometry() {
    let config = Config::builder().capacity(4).block_size(8).build();
    assert!(matches!(
        FileSystem::from_config(&config),
        Err(FsError::BlockSizeExceedsCapacity { .. })
    ));
}

#[test]
fn test_create_directories_and_list() {
    let mut fs = setup_fs(100, 10);

    fs.create_directory("/usr").unwrap();
    fs.create_directory("/usr/home").unwrap();
    fs.create_directory("/tmp/").unwrap();

    assert_eq!(fs.list_directory("/").unwrap(), names(&["usr", "tmp"]));
    assert_eq!(fs.list_directory("/usr").unwrap(), names(&["home"]));
    assert!(fs.list_directory("/usr/home").unwrap().is_empty());
}

#[test]
fn test_create_directory_requires_parent() {
    let mut fs = setup_fs(100, 10);

    let result = fs.create_directory("/usr/home");

    assert!(matches!(result, Err(FsError::PathDoesNotExist(_))));
}

#[test]
fn test_create_directory_all() {
    let mut fs = setup_fs(100, 10);

    fs.create_directory_all("/usr/home/desktop").unwrap();
    fs.create_directory_all("/usr/home/projects").unwrap();

    assert_eq!(
        fs.list_directory("/usr/home").unwrap(),
        names(&["desktop", "projects"])
    );
    assert!(matches!(
        fs.create_directory_all("/usr/home"),
        Err(FsError::DirectoryAlreadyExists(_))
    ));
}

#[test]
fn test_create_existing_directory_fails() {
    let mut fs = setup_fs(100, 10);
    fs.create_directory("/usr").unwrap();

    assert!(matches!(
        fs.create_directory("/usr"),
        Err(FsError::DirectoryAlreadyExists(_))
    ));
}

#[test]
fn test_malformed_paths() {
    let mut fs = setup_fs(100, 10);

    assert!(matches!(
        fs.create_directory("abcdefg"),
        Err(FsError::MalformedPathStructure(_))
    ));
    assert!(matches!(
        fs.create_file("/has space"),
        Err(FsError::MalformedPathStructure(_))
    ));
    assert!(matches!(
        fs.open_file("/"),
        Err(FsError::MalformedPathStructure(_))
    ));
    assert!(matches!(
        fs.list_directory("usr"),
        Err(FsError::MalformedPathStructure(_))
    ));
}

#[test]
fn test_trailing_slash_paths_are_equivalent() {
    let mut fs = setup_fs(100, 10);
    fs.create_directory("/a/").unwrap();
    fs.create_directory("/a/b").unwrap();
    fs.create_file("/a/b/c/").unwrap();

    let handle = fs.open_file("/a/b/c").unwrap();

    assert_eq!(handle.path(), "/a/b/c");
    assert_eq!(handle.name(), "c");
    assert_eq!(fs.list_directory("/a/b/").unwrap(), names(&["c"]));
}

#[test]
fn test_create_existing_file_fails() {
    let mut fs = setup_fs(100, 10);
    fs.create_file("/notes").unwrap();

    assert!(matches!(
        fs.create_file("/notes"),
        Err(FsError::FileAlreadyExists(_))
    ));
}

#[test]
fn test_taken_name_never_replaces_written_file() {
    let mut fs = setup_fs(100, 10);
    fs.create_file("/data").unwrap();
    let handle = fs.open_file("/data").unwrap();
    fs.write_file(&handle, &[9; 35]).unwrap();

    assert!(matches!(
        fs.create_file("/data"),
        Err(FsError::FileAlreadyExists(_))
    ));
    assert!(matches!(
        fs.create_directory("/data"),
        Err(FsError::FileAlreadyExists(_))
    ));
    assert!(matches!(
        fs.create_directory_all("/data"),
        Err(FsError::FileAlreadyExists(_))
    ));

    // The original file and its blocks are untouched
    assert_eq!(fs.read_file(&handle).unwrap(), vec![9; 35]);
    assert_eq!(fs.stats().free_blocks, 6);
    fs.delete_file("/data").unwrap();
    assert_eq!(fs.stats().free_blocks, 10);
}

#[test]
fn test_open_missing_or_directory_fails() {
    let mut fs = setup_fs(100, 10);
    fs.create_directory("/home").unwrap();

    assert!(matches!(
        fs.open_file("/home/usr.txt"),
        Err(FsError::FileDoesNotExist(_))
    ));
    assert!(matches!(
        fs.open_file("/home"),
        Err(FsError::FileDoesNotExist(_))
    ));
}

#[test]
fn test_list_mixed_directory() {
    let mut fs = setup_fs(100, 10);
    fs.create_directory("/home").unwrap();
    fs.create_file("/home/a.txt").unwrap();
    fs.create_directory("/home/docs").unwrap();
    fs.create_file("/home/docs/inner.txt").unwrap();

    // Direct children only
    assert_eq!(fs.list_directory("/home").unwrap(), names(&["a.txt", "docs"]));
}

// =============================================================================
// Write/Read Tests
// =============================================================================

#[test]
fn test_write_and_read_file() {
    let mut fs = setup_fs(100, 10);
    fs.create_directory("/home").unwrap();
    fs.create_file("/home/usr.txt").unwrap();

    let handle = fs.open_file("/home/usr.txt").unwrap();
    fs.write_file(&handle, b"random text").unwrap();

    assert_eq!(fs.read_file(&handle).unwrap(), b"random text");
    assert_eq!(fs.stats().free_blocks, 8);
}

#[test]
fn test_read_unwritten_file_is_empty() {
    let mut fs = setup_fs(100, 10);
    fs.create_file("/empty").unwrap();
    let handle = fs.open_file("/empty").unwrap();

    assert!(fs.read_file(&handle).unwrap().is_empty());

    let meta = fs.metadata(&handle).unwrap();
    assert!(!meta.written);
    assert_eq!(meta.size, 0);
    assert_eq!(meta.blocks, 0);
}

#[test]
fn test_empty_write_is_written_but_empty() {
    let mut fs = setup_fs(100, 10);
    fs.create_file("/empty").unwrap();
    let handle = fs.open_file("/empty").unwrap();

    fs.write_file(&handle, b"").unwrap();

    let meta = fs.metadata(&handle).unwrap();
    assert!(meta.written);
    assert_eq!(meta.size, 0);
    assert_eq!(fs.stats().free_blocks, 10);
}

#[test]
fn test_write_without_space_fails() {
    let mut fs = setup_fs(3, 3);
    fs.create_directory("/home").unwrap();
    fs.create_file("/home/usr.txt").unwrap();
    let handle = fs.open_file("/home/usr.txt").unwrap();

    let result = fs.write_file(&handle, b"random text");

    assert!(matches!(result, Err(FsError::FileCouldNotBeWritten(p)) if p == "/home/usr.txt"));
    assert_eq!(fs.stats().free_blocks, 1);
}

#[test]
fn test_overwrite_frees_old_blocks_first() {
    let mut fs = setup_fs(100, 10);
    fs.create_file("/f").unwrap();
    let handle = fs.open_file("/f").unwrap();

    fs.write_file(&handle, &[b'x'; 35]).unwrap();
    assert_eq!(fs.stats().free_blocks, 6);

    fs.write_file(&handle, &[b'y'; 15]).unwrap();
    assert_eq!(fs.stats().free_blocks, 8);
    assert_eq!(fs.read_file(&handle).unwrap(), vec![b'y'; 15]);
}

#[test]
fn test_overwrite_can_reuse_its_own_blocks() {
    // Every block is in use; the overwrite only fits because the old
    // content is released first
    let mut fs = setup_fs(30, 10);
    fs.create_file("/f").unwrap();
    let handle = fs.open_file("/f").unwrap();

    fs.write_file(&handle, &[1; 30]).unwrap();
    assert_eq!(fs.stats().free_blocks, 0);

    fs.write_file(&handle, &[2; 25]).unwrap();
    assert_eq!(fs.read_file(&handle).unwrap(), vec![2; 25]);
    assert_eq!(fs.stats().free_blocks, 0);
}

#[test]
fn test_failed_overwrite_leaves_file_unwritten() {
    let mut fs = setup_fs(30, 10);
    fs.create_file("/f").unwrap();
    let handle = fs.open_file("/f").unwrap();
    fs.write_file(&handle, &[1; 25]).unwrap();

    let result = fs.write_file(&handle, &[2; 40]);

    assert!(matches!(result, Err(FsError::FileCouldNotBeWritten(_))));
    assert_eq!(fs.stats().free_blocks, 3);
    assert!(!fs.metadata(&handle).unwrap().written);
    assert!(fs.read_file(&handle).unwrap().is_empty());
}

#[test]
fn test_failed_overwrite_updates_modified_time() {
    let mut fs = setup_fs(30, 10);
    fs.create_file("/f").unwrap();
    let handle = fs.open_file("/f").unwrap();
    fs.write_file(&handle, &[1; 25]).unwrap();
    let before = fs.metadata(&handle).unwrap().modified_at;

    thread::sleep(Duration::from_millis(5));
    assert!(fs.write_file(&handle, &[2; 40]).is_err());

    let meta = fs.metadata(&handle).unwrap();
    assert!(!meta.written);
    assert!(meta.modified_at > before);
}

#[test]
fn test_failed_first_write_keeps_modified_time() {
    let mut fs = setup_fs(3, 3);
    fs.create_file("/f").unwrap();
    let handle = fs.open_file("/f").unwrap();
    let before = fs.metadata(&handle).unwrap().modified_at;

    thread::sleep(Duration::from_millis(5));
    assert!(fs.write_file(&handle, b"random text").is_err());

    assert_eq!(fs.metadata(&handle).unwrap().modified_at, before);
}

#[test]
fn test_files_do_not_share_content() {
    let mut fs = setup_fs(200, 7);
    fs.create_file("/a").unwrap();
    fs.create_file("/b").unwrap();
    let a = fs.open_file("/a").unwrap();
    let b = fs.open_file("/b").unwrap();

    fs.write_file(&a, b"the quick brown fox").unwrap();
    fs.write_file(&b, b"jumps over the lazy dog").unwrap();
    fs.write_file(&a, b"short").unwrap();

    assert_eq!(fs.read_file(&a).unwrap(), b"short");
    assert_eq!(fs.read_file(&b).unwrap(), b"jumps over the lazy dog");
    assert_blocks_conserved(&fs, &["/a", "/b"]);
}

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_append_to_file() {
    let mut fs = setup_fs(100, 5);
    fs.create_file("/log").unwrap();
    let handle = fs.open_file("/log").unwrap();

    fs.append_file(&handle, b"hello").unwrap();
    fs.append_file(&handle, b" wor").unwrap();
    fs.append_file(&handle, b"ld").unwrap();

    assert_eq!(fs.read_file(&handle).unwrap(), b"hello world");
    assert_eq!(fs.metadata(&handle).unwrap().blocks, 3);
}

#[test]
fn test_append_without_space_keeps_content() {
    let mut fs = setup_fs(10, 5);
    fs.create_file("/log").unwrap();
    let handle = fs.open_file("/log").unwrap();
    fs.write_file(&handle, b"abcdef").unwrap();

    let result = fs.append_file(&handle, b"ghijklmnop");

    assert!(matches!(result, Err(FsError::FileCouldNotBeWritten(_))));
    assert_eq!(fs.read_file(&handle).unwrap(), b"abcdef");
    assert_eq!(fs.stats().free_blocks, 0);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_file_frees_blocks() {
    let mut fs = setup_fs(100, 10);
    fs.create_directory("/home").unwrap();
    fs.create_file("/home/f").unwrap();
    let handle = fs.open_file("/home/f").unwrap();
    fs.write_file(&handle, &[7; 45]).unwrap();
    assert_eq!(fs.stats().free_blocks, 5);

    fs.delete_file("/home/f").unwrap();

    assert_eq!(fs.stats().free_blocks, 10);
    assert!(fs.list_directory("/home").unwrap().is_empty());
    assert!(matches!(
        fs.open_file("/home/f"),
        Err(FsError::FileDoesNotExist(_))
    ));
}

#[test]
fn test_delete_unwritten_file() {
    let mut fs = setup_fs(100, 10);
    fs.create_file("/f").unwrap();

    fs.delete_file("/f").unwrap();

    assert!(fs.list_directory("/").unwrap().is_empty());
    assert_eq!(fs.stats().free_blocks, 10);
}

#[test]
fn test_delete_missing_or_directory_fails() {
    let mut fs = setup_fs(100, 10);
    fs.create_directory("/dir").unwrap();

    assert!(matches!(
        fs.delete_file("/nope"),
        Err(FsError::FileDoesNotExist(_))
    ));
    assert!(matches!(
        fs.delete_file("/dir"),
        Err(FsError::FileDoesNotExist(_))
    ));
    assert!(fs.list_directory("/dir").is_ok());
}

#[test]
fn test_stale_handle_is_rejected() {
    let mut fs = setup_fs(100, 10);
    fs.create_file("/f").unwrap();
    let old = fs.open_file("/f").unwrap();
    fs.write_file(&old, b"first").unwrap();

    fs.delete_file("/f").unwrap();
    assert!(matches!(fs.read_file(&old), Err(FsError::FileDoesNotExist(_))));

    // A new file at the same path is a different file
    fs.create_file("/f").unwrap();
    let new = fs.open_file("/f").unwrap();
    assert_ne!(old.id(), new.id());
    assert!(matches!(
        fs.write_file(&old, b"stale"),
        Err(FsError::FileDoesNotExist(_))
    ));
    assert!(matches!(fs.metadata(&old), Err(FsError::FileDoesNotExist(_))));
    assert!(fs.read_file(&new).unwrap().is_empty());
}

#[test]
fn test_remove_directory() {
    let mut fs = setup_fs(100, 10);
    fs.create_directory_all("/a/b").unwrap();

    assert!(matches!(
        fs.remove_directory("/a"),
        Err(FsError::DirectoryNotEmpty(_))
    ));
    fs.remove_directory("/a/b").unwrap();
    fs.remove_directory("/a").unwrap();

    assert!(fs.list_directory("/").unwrap().is_empty());
    assert!(matches!(
        fs.remove_directory("/"),
        Err(FsError::MalformedPathStructure(_))
    ));
}

// =============================================================================
// Metadata Tests
// =============================================================================

#[test]
fn test_metadata_tracks_size_and_times() {
    let mut fs = setup_fs(100, 4);
    fs.create_file("/m").unwrap();
    let handle = fs.open_file("/m").unwrap();
    let created = fs.metadata(&handle).unwrap();

    fs.write_file(&handle, b"0123456789").unwrap();
    let meta = fs.metadata(&handle).unwrap();

    assert_eq!(meta.name, "m");
    assert_eq!(meta.size, 10);
    assert_eq!(meta.blocks, 3);
    assert!(meta.written);
    assert_eq!(meta.created_at, created.created_at);
    assert!(meta.modified_at >= meta.created_at);
    assert!(meta.accessed_at >= meta.modified_at);
}

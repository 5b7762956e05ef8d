//! FileSystem Module
//!
//! Path-based file operations over one namespace tree and one disk.
//!
//! ## Responsibilities
//! - Parse paths and route them through the namespace tree
//! - Move file content in and out of the disk via manifests
//! - Keep the namespace and the block pool consistent: a manifest is
//!   detached from its file before its blocks go back to the pool
//!
//! ## File Lifecycle
//! ```text
//! create_file ──▶ unwritten ──write──▶ has-manifest ──write──▶ has-manifest
//!                     │                     │
//!                     └────── delete_file ──┴──▶ gone (blocks freed)
//! ```

use std::collections::HashSet;

use crate::config::Config;
use crate::disk::{Disk, DiskStats};
use crate::error::{FsError, Result};
use crate::namespace::{display_path, parse_directory_path, parse_path, Directory, File};

/// Name of the root directory node
const ROOT_NAME: &str = "root";

/// A reference to an open file
///
/// Handles don't borrow the tree. Each use re-resolves the path and checks
/// the file id, so a handle to a deleted file keeps failing with
/// `FileDoesNotExist` even if another file is later created at that path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    segments: Vec<String>,
    id: u64,
}

impl FileHandle {
    /// Absolute path the file was opened at
    pub fn path(&self) -> String {
        display_path(&self.segments)
    }

    /// File name (last path segment)
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Snapshot of a file's attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub name: String,
    /// Content length in bytes
    pub size: usize,
    /// Blocks held by the file's manifest
    pub blocks: usize,
    /// False until the first write
    pub written: bool,
    pub created_at: u64,
    pub modified_at: u64,
    pub accessed_at: u64,
}

impl FileMetadata {
    fn from_file(file: &File) -> Self {
        Self {
            name: file.name().to_string(),
            size: file.size(),
            blocks: file.manifest().map_or(0, |m| m.block_count()),
            written: file.manifest().is_some(),
            created_at: file.created_at(),
            modified_at: file.modified_at(),
            accessed_at: file.accessed_at(),
        }
    }
}

/// Hierarchical filesystem on top of a block disk
///
/// Single-threaded: every method runs to completion and there is no
/// internal locking. Share it across threads through [`Volume`](crate::Volume).
pub struct FileSystem {
    root: Directory,
    disk: Disk,
    next_file_id: u64,
}

impl FileSystem {
    /// Create an empty filesystem on `disk`
    pub fn new(disk: Disk) -> Self {
        Self {
            root: Directory::new(ROOT_NAME),
            disk,
            next_file_id: 1,
        }
    }

    /// Create an empty filesystem on a fresh disk built from `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Disk::from_config(config)?))
    }

    // =========================================================================
    // Namespace Operations
    // =========================================================================

    /// Create a directory; its parent must already exist
    pub fn create_directory(&mut self, path: &str) -> Result<()> {
        let segments = parse_path(path)?;
        self.root.create_directory(&segments)
    }

    /// Create a directory and any missing ancestors
    pub fn create_directory_all(&mut self, path: &str) -> Result<()> {
        let segments = parse_path(path)?;
        self.root.create_directory_all(&segments)
    }

    /// Create an empty, unwritten file; its parent must already exist
    pub fn create_file(&mut self, path: &str) -> Result<()> {
        let segments = parse_path(path)?;
        self.root.create_file(&segments, self.next_file_id)?;
        self.next_file_id += 1;
        Ok(())
    }

    /// Look up a file and return a handle to it
    pub fn open_file(&self, path: &str) -> Result<FileHandle> {
        let segments = parse_path(path)?;
        let id = self.root.open(&segments)?.id();
        Ok(FileHandle { segments, id })
    }

    /// Names of the direct children of a directory (`"/"` is the root)
    pub fn list_directory(&self, path: &str) -> Result<HashSet<String>> {
        let segments = parse_directory_path(path)?;
        self.root.list(&segments)
    }

    /// Remove an empty directory
    pub fn remove_directory(&mut self, path: &str) -> Result<()> {
        let segments = parse_path(path)?;
        self.root.remove_directory(&segments)?;
        tracing::debug!("Removed directory {}", path);
        Ok(())
    }

    /// Remove a file and free its blocks
    pub fn delete_file(&mut self, path: &str) -> Result<()> {
        let segments = parse_path(path)?;
        let mut file = self.root.remove_file(&segments)?;
        if let Some(manifest) = file.take_manifest() {
            self.disk.delete(manifest);
        }
        tracing::debug!("Deleted file {}", path);
        Ok(())
    }

    // =========================================================================
    // Content Operations
    // =========================================================================

    /// Replace the file's content with `data`
    ///
    /// The old blocks are freed before new ones are allocated. If the new
    /// content doesn't fit, `FileCouldNotBeWritten` is returned and the file
    /// is left unwritten, with its modified time updated if it lost content.
    pub fn write_file(&mut self, handle: &FileHandle, data: &[u8]) -> Result<()> {
        let file = Self::locate(&mut self.root, handle)?;
        let truncated = match file.take_manifest() {
            Some(old) => {
                self.disk.delete(old);
                true
            }
            None => false,
        };

        match self.disk.write(data) {
            Ok(manifest) => {
                tracing::debug!(
                    "Wrote {} bytes to {} ({} blocks)",
                    data.len(),
                    handle.path(),
                    manifest.block_count()
                );
                file.set_manifest(manifest);
                file.touch_modified();
                Ok(())
            }
            Err(FsError::InsufficientCapacity { needed, available }) => {
                tracing::warn!(
                    "No room for {}: {} blocks needed, {} free",
                    handle.path(),
                    needed,
                    available
                );
                if truncated {
                    file.touch_modified();
                }
                Err(FsError::FileCouldNotBeWritten(handle.path()))
            }
            Err(e) => Err(e),
        }
    }

    /// Add `data` to the end of the file
    ///
    /// On failure the file keeps its previous content.
    pub fn append_file(&mut self, handle: &FileHandle, data: &[u8]) -> Result<()> {
        let file = Self::locate(&mut self.root, handle)?;

        let result = match file.manifest_mut() {
            Some(manifest) => self.disk.append(manifest, data),
            None => self.disk.write(data).map(|manifest| file.set_manifest(manifest)),
        };

        match result {
            Ok(()) => {
                file.touch_modified();
                tracing::debug!("Appended {} bytes to {}", data.len(), handle.path());
                Ok(())
            }
            Err(FsError::InsufficientCapacity { needed, available }) => {
                tracing::warn!(
                    "No room to append to {}: {} blocks needed, {} free",
                    handle.path(),
                    needed,
                    available
                );
                Err(FsError::FileCouldNotBeWritten(handle.path()))
            }
            Err(e) => Err(e),
        }
    }

    /// Read the whole file; an unwritten file reads as empty
    pub fn read_file(&mut self, handle: &FileHandle) -> Result<Vec<u8>> {
        let file = Self::locate(&mut self.root, handle)?;
        let data = match file.manifest() {
            Some(manifest) => self.disk.read(manifest),
            None => Vec::new(),
        };
        file.touch_accessed();
        Ok(data)
    }

    /// Attributes of an open file
    pub fn metadata(&self, handle: &FileHandle) -> Result<FileMetadata> {
        let file = self.root.open(&handle.segments)?;
        if file.id() != handle.id {
            return Err(FsError::FileDoesNotExist(handle.path()));
        }
        Ok(FileMetadata::from_file(file))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn stats(&self) -> DiskStats {
        self.disk.stats()
    }

    pub fn disk(&self) -> &Disk {
        &self.disk
    }

    pub fn root(&self) -> &Directory {
        &self.root
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Resolve a handle to its file, rejecting handles to deleted files
    fn locate<'a>(root: &'a mut Directory, handle: &FileHandle) -> Result<&'a mut File> {
        let file = root.open_mut(&handle.segments)?;
        if file.id() != handle.id {
            return Err(FsError::FileDoesNotExist(handle.path()));
        }
        Ok(file)
    }
}

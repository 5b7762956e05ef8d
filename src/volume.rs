//! Volume Module
//!
//! Thread-shareable front end for one filesystem.
//!
//! ## Responsibilities
//! - Build the disk and filesystem from a `Config`
//! - Serialize every operation behind one exclusive lock
//! - Route shell commands to filesystem calls
//! - Export snapshots of the disk buffer

use std::collections::HashSet;
use std::path::PathBuf;

use parking_lot::Mutex;

use crate::config::Config;
use crate::disk::DiskStats;
use crate::error::Result;
use crate::filesystem::{FileMetadata, FileSystem};
use crate::shell::Command;
use crate::snapshot::SnapshotWriter;

/// A filesystem that can be shared across threads
///
/// ## Concurrency Model
///
/// The filesystem core has no internal locking, so the volume holds it in a
/// single `Mutex`. Every call takes the lock for its whole duration: the
/// block pool, the buffer and the namespace tree only ever see one
/// operation at a time, and multi-step calls like `write` (open, then
/// truncate-and-write) are atomic with respect to each other.
pub struct Volume {
    /// Volume configuration
    config: Config,

    /// The filesystem, guarded by the volume-wide lock
    fs: Mutex<FileSystem>,
}

impl Volume {
    /// Build a fresh volume from `config`
    pub fn open(config: Config) -> Result<Self> {
        let fs = FileSystem::from_config(&config)?;

        tracing::info!(
            "Volume ready: {} bytes in {} blocks of {}",
            config.capacity,
            fs.stats().total_blocks,
            config.block_size
        );

        Ok(Self {
            config,
            fs: Mutex::new(fs),
        })
    }

    /// Execute a command
    ///
    /// Routes commands to filesystem calls. Mutations return `None`;
    /// queries return their output as bytes.
    pub fn execute(&self, command: Command) -> Result<Option<Vec<u8>>> {
        match command {
            Command::MakeDirectory { path, parents } => {
                if parents {
                    self.create_directory_all(&path)?;
                } else {
                    self.create_directory(&path)?;
                }
                Ok(None)
            }
            Command::CreateFile { path } => {
                self.create_file(&path)?;
                Ok(None)
            }
            Command::Write { path, data } => {
                self.write(&path, &data)?;
                Ok(None)
            }
            Command::Append { path, data } => {
                self.append(&path, &data)?;
                Ok(None)
            }
            Command::Read { path } => self.read(&path).map(Some),
            Command::List { path } => {
                let mut names: Vec<String> = self.list(&path)?.into_iter().collect();
                names.sort();
                Ok(Some(names.join(" ").into_bytes()))
            }
            Command::DeleteFile { path } => {
                self.delete_file(&path)?;
                Ok(None)
            }
            Command::RemoveDirectory { path } => {
                self.remove_directory(&path)?;
                Ok(None)
            }
            Command::Stat { path } => {
                let meta = self.metadata(&path)?;
                Ok(Some(
                    format!(
                        "name={} size={} blocks={} written={} created={} modified={} accessed={}",
                        meta.name,
                        meta.size,
                        meta.blocks,
                        meta.written,
                        meta.created_at,
                        meta.modified_at,
                        meta.accessed_at
                    )
                    .into_bytes(),
                ))
            }
            Command::DiskStats => {
                let stats = self.stats();
                Ok(Some(
                    format!(
                        "capacity={} block_size={} blocks={} free={} free_bytes={} used={} unaddressable={}",
                        stats.capacity,
                        stats.block_size,
                        stats.total_blocks,
                        stats.free_blocks,
                        stats.free_bytes(),
                        stats.used_blocks(),
                        stats.unaddressable_bytes
                    )
                    .into_bytes(),
                ))
            }
            Command::Snapshot => {
                let path = self.snapshot()?;
                Ok(Some(path.display().to_string().into_bytes()))
            }
            Command::Ping => Ok(Some(b"PONG".to_vec())),
        }
    }

    // =========================================================================
    // Path-based Operations
    // =========================================================================

    pub fn create_directory(&self, path: &str) -> Result<()> {
        self.fs.lock().create_directory(path)
    }

    pub fn create_directory_all(&self, path: &str) -> Result<()> {
        self.fs.lock().create_directory_all(path)
    }

    pub fn create_file(&self, path: &str) -> Result<()> {
        self.fs.lock().create_file(path)
    }

    /// Open and overwrite a file in one step
    pub fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut fs = self.fs.lock();
        let handle = fs.open_file(path)?;
        fs.write_file(&handle, data)
    }

    /// Open and append to a file in one step
    pub fn append(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut fs = self.fs.lock();
        let handle = fs.open_file(path)?;
        fs.append_file(&handle, data)
    }

    /// Open and read a file in one step
    pub fn read(&self, path: &str) -> Result<Vec<u8>> {
        let mut fs = self.fs.lock();
        let handle = fs.open_file(path)?;
        fs.read_file(&handle)
    }

    pub fn list(&self, path: &str) -> Result<HashSet<String>> {
        self.fs.lock().list_directory(path)
    }

    pub fn delete_file(&self, path: &str) -> Result<()> {
        self.fs.lock().delete_file(path)
    }

    pub fn remove_directory(&self, path: &str) -> Result<()> {
        self.fs.lock().remove_directory(path)
    }

    pub fn metadata(&self, path: &str) -> Result<FileMetadata> {
        let fs = self.fs.lock();
        let handle = fs.open_file(path)?;
        fs.metadata(&handle)
    }

    // =========================================================================
    // Disk-level Operations
    // =========================================================================

    pub fn stats(&self) -> DiskStats {
        self.fs.lock().stats()
    }

    /// Export the disk buffer to the configured snapshot directory
    ///
    /// The lock is held for the whole export so the image is consistent.
    pub fn snapshot(&self) -> Result<PathBuf> {
        let fs = self.fs.lock();
        SnapshotWriter::export(&self.config.snapshot_dir, fs.disk())
    }

    /// Run `f` with exclusive access to the filesystem
    pub fn with_filesystem<T>(&self, f: impl FnOnce(&mut FileSystem) -> T) -> T {
        let mut fs = self.fs.lock();
        f(&mut *fs)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

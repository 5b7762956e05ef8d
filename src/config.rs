//! Configuration for blockfs
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::disk::Disk;
use crate::error::Result;

/// Main configuration for a blockfs volume
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Disk Configuration
    // -------------------------------------------------------------------------
    /// Size of the raw byte buffer backing the disk (in bytes)
    pub capacity: usize,

    /// Size of every block the buffer is partitioned into (in bytes).
    /// `capacity % block_size` trailing bytes are never addressable.
    pub block_size: usize,

    // -------------------------------------------------------------------------
    // Snapshot Configuration
    // -------------------------------------------------------------------------
    /// Directory that receives snapshot exports
    /// Internal structure:
    ///   {snapshot_dir}/
    ///     ├── snapshot_000001.snap
    ///     └── snapshot_000002.snap
    pub snapshot_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 800 * 1024, // 800 KiB
            block_size: 5,
            snapshot_dir: PathBuf::from("./blockfs_snapshots"),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the disk geometry before a disk is built from it
    pub fn validate(&self) -> Result<()> {
        Disk::check_geometry(self.capacity, self.block_size)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the disk capacity (in bytes)
    pub fn capacity(mut self, bytes: usize) -> Self {
        self.config.capacity = bytes;
        self
    }

    /// Set the block size (in bytes)
    pub fn block_size(mut self, bytes: usize) -> Self {
        self.config.block_size = bytes;
        self
    }

    /// Set the snapshot directory
    pub fn snapshot_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.snapshot_dir = path.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

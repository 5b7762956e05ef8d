//! Error types for blockfs
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using FsError
pub type Result<T> = std::result::Result<T, FsError>;

/// Unified error type for blockfs operations
#[derive(Debug, Error)]
pub enum FsError {
    // -------------------------------------------------------------------------
    // Construction Errors
    // -------------------------------------------------------------------------
    #[error("block size {block_size} is greater than disk capacity {capacity}")]
    BlockSizeExceedsCapacity { block_size: usize, capacity: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Capacity Errors
    // -------------------------------------------------------------------------
    #[error("not enough free blocks: {needed} needed, {available} available")]
    InsufficientCapacity { needed: usize, available: usize },

    #[error("not enough space to write file: {0}")]
    FileCouldNotBeWritten(String),

    // -------------------------------------------------------------------------
    // Path Errors
    // -------------------------------------------------------------------------
    #[error("the provided path is invalid: {0:?}")]
    MalformedPathStructure(String),

    #[error("path does not exist: {0}")]
    PathDoesNotExist(String),

    // -------------------------------------------------------------------------
    // Namespace Errors
    // -------------------------------------------------------------------------
    #[error("file already exists: {0}")]
    FileAlreadyExists(String),

    #[error("directory already exists: {0}")]
    DirectoryAlreadyExists(String),

    #[error("file does not exist: {0}")]
    FileDoesNotExist(String),

    #[error("directory does not exist: {0}")]
    DirectoryDoesNotExist(String),

    #[error("directory is not empty: {0}")]
    DirectoryNotEmpty(String),

    // -------------------------------------------------------------------------
    // Snapshot Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot corruption detected: {0}")]
    SnapshotCorruption(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Shell Errors
    // -------------------------------------------------------------------------
    #[error("Command error: {0}")]
    Command(String),
}

impl FsError {
    /// True for errors caused by a missing entry rather than a bad request
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FsError::PathDoesNotExist(_)
                | FsError::FileDoesNotExist(_)
                | FsError::DirectoryDoesNotExist(_)
        )
    }
}

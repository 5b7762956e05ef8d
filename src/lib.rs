//! # blockfs
//!
//! An in-memory block device with a hierarchical file namespace on top:
//! - Fixed-size blocks handed out by a LIFO free-list
//! - Files stored as ordered block manifests
//! - Directory tree resolved from absolute paths
//! - Snapshot export of the raw buffer
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Shell / Volume                            │
//! │               (one lock per volume)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     FileSystem                               │
//! │           (path parsing, truncate-then-write)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Namespace  │          │    Disk     │
//!   │   (tree)    │─────────▶│ (manifests) │
//!   └─────────────┘ Manifest └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │    Pool     │
//!                           │   (LIFO)    │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod pool;
pub mod disk;
pub mod namespace;
pub mod filesystem;
pub mod snapshot;
pub mod shell;
pub mod volume;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FsError, Result};
pub use config::Config;
pub use disk::{Disk, DiskStats, Manifest};
pub use filesystem::{FileHandle, FileMetadata, FileSystem};
pub use volume::Volume;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of blockfs
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Helpers
// =============================================================================

/// Wall-clock time in unix milliseconds
pub(crate) fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

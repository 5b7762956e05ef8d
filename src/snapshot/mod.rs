//! Snapshot Module
//!
//! Exports the raw disk buffer to a durable file.
//!
//! ## Responsibilities
//! - Write the whole buffer, including unaddressable trailing bytes
//! - Name each export uniquely and monotonically within a directory
//! - Verify exported files (magic, version, CRC)
//!
//! Snapshots are opaque: they hold bytes, not the namespace tree, and are
//! never mounted back into a filesystem.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Preamble (10 bytes)                                     │
//! │   Magic: "BFSS" (4) | Version: u16 (2) | HeaderLen: u32 │
//! ├─────────────────────────────────────────────────────────┤
//! │ Header (HeaderLen bytes, bincode SnapshotHeader)        │
//! ├─────────────────────────────────────────────────────────┤
//! │ Buffer (capacity bytes)                                 │
//! ├─────────────────────────────────────────────────────────┤
//! │ Footer (4 bytes)                                        │
//! │   CRC32 over Header + Buffer                            │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod reader;
mod writer;

use serde::{Deserialize, Serialize};

pub use reader::{Snapshot, SnapshotReader};
pub use writer::SnapshotWriter;

// =============================================================================
// Shared Constants (used by writer and reader)
// =============================================================================

/// Magic bytes identifying a blockfs snapshot
pub(crate) const MAGIC: &[u8; 4] = b"BFSS";

/// Current snapshot format version
pub(crate) const VERSION: u16 = 1;

/// Magic (4) + Version (2) + HeaderLen (4)
pub(crate) const PREAMBLE_SIZE: usize = 10;

/// CRC32 (4)
pub(crate) const FOOTER_SIZE: usize = 4;

/// Describes the disk a snapshot was taken from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    /// Buffer length in bytes
    pub capacity: u64,
    pub block_size: u64,
    pub block_count: u64,
    /// Free blocks at export time
    pub free_blocks: u64,
    /// Export time (unix millis)
    pub created_at: u64,
}

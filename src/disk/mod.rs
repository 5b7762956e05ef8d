//! Disk Module
//!
//! In-memory block device with a free-list allocator.
//!
//! ## Responsibilities
//! - Partition a fixed byte buffer into equal-size blocks
//! - Hand out blocks for writes, all-or-nothing
//! - Track each file's layout as an ordered manifest of blocks
//! - Reclaim blocks when a manifest is deleted
//!
//! ## Layout
//! ```text
//! capacity = 23, block_size = 5
//! ┌───────┬───────┬───────┬───────┬───┐
//! │ B0    │ B1    │ B2    │ B3    │ x │   x = capacity % block_size,
//! │ 0..=4 │ 5..=9 │10..=14│15..=19│   │       never addressable
//! └───────┴───────┴───────┴───────┴───┘
//!
//! Manifest for "hello world" (11 bytes), blocks handed out LIFO:
//!   [B3 used=5][B2 used=5][B1 used=1]
//! ```
//!
//! ## Limitations
//! - Freed blocks go back on a LIFO stack; there is no coalescing and no
//!   locality guarantee, so a file's physical layout depends on history
//! - Deleted blocks are not zeroed

mod block;
mod device;
mod manifest;

pub use block::Block;
pub use device::Disk;
pub use manifest::Manifest;

/// Point-in-time allocation numbers for a disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskStats {
    /// Size of the raw buffer in bytes
    pub capacity: usize,
    /// Size of each block in bytes
    pub block_size: usize,
    /// Number of blocks the buffer was partitioned into
    pub total_blocks: usize,
    /// Number of blocks currently in the free pool
    pub free_blocks: usize,
    /// Trailing bytes that do not fill a whole block
    pub unaddressable_bytes: usize,
}

impl DiskStats {
    /// Number of blocks owned by manifests
    pub fn used_blocks(&self) -> usize {
        self.total_blocks - self.free_blocks
    }

    /// Bytes still available for new writes
    pub fn free_bytes(&self) -> usize {
        self.free_blocks * self.block_size
    }
}

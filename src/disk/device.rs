//! Disk implementation
//!
//! Raw byte buffer plus the pool of free blocks.

use crate::config::Config;
use crate::error::{FsError, Result};
use crate::pool::Pool;

use super::{Block, DiskStats, Manifest};

/// In-memory block device
///
/// Every block is owned by exactly one of: the free pool, or one manifest.
/// `free_blocks * block_size + sum(manifest.allocated_bytes())` always equals
/// `block_count * block_size`.
pub struct Disk {
    /// Raw storage, `capacity` bytes long
    buffer: Vec<u8>,

    /// Blocks not owned by any manifest
    pool: Pool<Block>,

    /// Fixed size of every block
    block_size: usize,

    /// Number of blocks the buffer was partitioned into
    block_count: usize,
}

impl Disk {
    /// Create a disk of `capacity` bytes split into `block_size` blocks
    ///
    /// `capacity % block_size` trailing bytes are left unaddressable.
    pub fn new(capacity: usize, block_size: usize) -> Result<Self> {
        Self::check_geometry(capacity, block_size)?;

        let block_count = capacity / block_size;
        let mut pool = Pool::with_capacity(block_count);
        for index in 0..block_count {
            pool.add(Block::new(index * block_size, block_size));
        }

        tracing::debug!(
            "Disk created: capacity={} block_size={} blocks={} unaddressable={}",
            capacity,
            block_size,
            block_count,
            capacity % block_size
        );

        Ok(Self {
            buffer: vec![0u8; capacity],
            pool,
            block_size,
            block_count,
        })
    }

    /// Create a disk with the geometry from `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.capacity, config.block_size)
    }

    pub(crate) fn check_geometry(capacity: usize, block_size: usize) -> Result<()> {
        if block_size == 0 {
            return Err(FsError::Config("block size must be positive".to_string()));
        }
        if capacity == 0 {
            return Err(FsError::Config("capacity must be positive".to_string()));
        }
        if block_size > capacity {
            return Err(FsError::BlockSizeExceedsCapacity {
                block_size,
                capacity,
            });
        }
        Ok(())
    }

    /// Store `data` in freshly allocated blocks
    ///
    /// Capacity is reserved up front: if not enough blocks are free, nothing
    /// is allocated and `InsufficientCapacity` is returned.
    pub fn write(&mut self, data: &[u8]) -> Result<Manifest> {
        let needed = self.blocks_needed(data.len());
        self.reserve(needed)?;

        let mut manifest = Manifest::with_capacity(needed);
        for chunk in data.chunks(self.block_size) {
            let mut block = self.pool.take().ok_or(FsError::InsufficientCapacity {
                needed,
                available: 0,
            })?;

            let start = block.start();
            self.buffer[start..start + chunk.len()].copy_from_slice(chunk);
            block.set_used(chunk.len());

            tracing::trace!("Block {}..={} filled with {} bytes", start, block.end(), chunk.len());
            manifest.push(block);
        }

        tracing::debug!("Wrote {} bytes into {} blocks", data.len(), needed);
        Ok(manifest)
    }

    /// Read the content described by `manifest`, in manifest order
    pub fn read(&self, manifest: &Manifest) -> Vec<u8> {
        let mut out = Vec::with_capacity(manifest.len());
        for block in manifest.blocks() {
            out.extend_from_slice(&self.buffer[block.content_range()]);
        }
        out
    }

    /// Grow `manifest` by `data`
    ///
    /// A partially filled last block is topped up first; only the bytes that
    /// don't fit there get new blocks. On `InsufficientCapacity` neither the
    /// manifest nor the pool is touched.
    pub fn append(&mut self, manifest: &mut Manifest, data: &[u8]) -> Result<()> {
        let tail_room = manifest
            .last_block_if_partial()
            .map(Block::remaining)
            .unwrap_or(0);
        let absorbed = tail_room.min(data.len());
        let rest = &data[absorbed..];
        self.reserve(self.blocks_needed(rest.len()))?;

        if let Some(tail) = manifest.last_block_if_partial_mut() {
            if absorbed > 0 {
                let offset = tail.start() + tail.used();
                self.buffer[offset..offset + absorbed].copy_from_slice(&data[..absorbed]);
                tail.set_used(tail.used() + absorbed);
                tracing::trace!("Absorbed {} bytes into tail block at {}", absorbed, tail.start());
            }
        }

        if rest.is_empty() {
            return Ok(());
        }

        let grown = self.write(rest)?;
        manifest.extend(grown);
        Ok(())
    }

    /// Return every block of `manifest` to the free pool
    ///
    /// Buffer bytes are left as they are.
    pub fn delete(&mut self, manifest: Manifest) {
        let freed = manifest.block_count();
        for mut block in manifest.into_blocks() {
            block.reset();
            self.pool.add(block);
        }
        tracing::debug!("Freed {} blocks ({} now free)", freed, self.pool.available());
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of free blocks
    pub fn available(&self) -> usize {
        self.pool.available()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// The whole raw buffer, including unaddressable trailing bytes
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn stats(&self) -> DiskStats {
        DiskStats {
            capacity: self.capacity(),
            block_size: self.block_size,
            total_blocks: self.block_count,
            free_blocks: self.pool.available(),
            unaddressable_bytes: self.capacity() % self.block_size,
        }
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn blocks_needed(&self, len: usize) -> usize {
        len.div_ceil(self.block_size)
    }

    fn reserve(&self, needed: usize) -> Result<()> {
        let available = self.pool.available();
        if needed > available {
            tracing::warn!("Write rejected: {} blocks needed, {} available", needed, available);
            return Err(FsError::InsufficientCapacity { needed, available });
        }
        Ok(())
    }
}

//! Block manifest
//!
//! Ordered list of blocks making up one file's content.

use super::Block;

/// The layout of one file on the disk
///
/// Block order is write order and is the only record of how the file's
/// bytes are scattered. Manifests are only produced by [`Disk`](super::Disk)
/// and are consumed by `Disk::delete`, so a freed manifest can't be read.
#[derive(Debug, PartialEq, Eq)]
pub struct Manifest {
    blocks: Vec<Block>,
}

impl Manifest {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(capacity),
        }
    }

    /// Blocks in content order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Logical content length (sum of used bytes)
    pub fn len(&self) -> usize {
        self.blocks.iter().map(Block::used).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes reserved by this manifest, including unused tail space
    pub fn allocated_bytes(&self) -> usize {
        self.blocks.iter().map(Block::size).sum()
    }

    /// The last block, if it still has room
    pub fn last_block_if_partial(&self) -> Option<&Block> {
        self.blocks.last().filter(|block| block.is_partial())
    }

    pub(crate) fn last_block_if_partial_mut(&mut self) -> Option<&mut Block> {
        self.blocks.last_mut().filter(|block| block.is_partial())
    }

    pub(crate) fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Move every block of `other` onto the end of this manifest
    pub(crate) fn extend(&mut self, other: Manifest) {
        self.blocks.extend(other.blocks);
    }

    pub(crate) fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

//! Block descriptor
//!
//! A contiguous extent of the disk buffer.

use std::ops::Range;

/// One fixed-size extent of the raw buffer
///
/// Invariants: `used <= size` and `size == end - start + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// First byte offset (inclusive)
    start: usize,
    /// Last byte offset (inclusive)
    end: usize,
    /// Extent length in bytes
    size: usize,
    /// Bytes holding file content, counted from `start`
    used: usize,
}

impl Block {
    pub(crate) fn new(start: usize, size: usize) -> Self {
        Self {
            start,
            end: start + size - 1,
            size,
            used: 0,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn used(&self) -> usize {
        self.used
    }

    /// Bytes left before the block is full
    pub fn remaining(&self) -> usize {
        self.size - self.used
    }

    /// True if the block has room left after its content
    pub fn is_partial(&self) -> bool {
        self.used < self.size
    }

    /// Buffer range holding this block's content
    pub fn content_range(&self) -> Range<usize> {
        self.start..self.start + self.used
    }

    pub(crate) fn set_used(&mut self, used: usize) {
        debug_assert!(used <= self.size, "used {} exceeds block size {}", used, self.size);
        self.used = used;
    }

    pub(crate) fn reset(&mut self) {
        self.used = 0;
    }
}

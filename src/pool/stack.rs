//! Pool implementation
//!
//! Vec-backed stack.

/// LIFO free-list of resources
#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Pool<T> {
    /// Create a new empty pool
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty pool with room for `capacity` resources
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Return a resource to the pool
    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Take the most recently added resource
    pub fn take(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Number of resources currently in the pool
    pub fn available(&self) -> usize {
        self.items.len()
    }

    /// Check if the pool has nothing left to hand out
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

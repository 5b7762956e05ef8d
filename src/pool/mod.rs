//! Pool Module
//!
//! Free-list of reusable resources.
//!
//! ## Responsibilities
//! - Hold resources that are not currently handed out
//! - Hand them out again in LIFO order
//! - Report how many are left
//!
//! ## Data Structure Choice
//! A plain `Vec` used as a stack:
//! - O(1) push and pop
//! - No coalescing or ordering guarantees; callers must not rely on which
//!   resource comes back from `take()`

mod stack;

pub use stack::Pool;

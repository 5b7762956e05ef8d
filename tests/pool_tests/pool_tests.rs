//! Pool Tests
//!
//! Tests verify:
//! - Empty pool behavior
//! - LIFO hand-out order
//! - Available count tracking

use blockfs::pool::Pool;

#[test]
fn test_new_pool_is_empty() {
    let mut pool: Pool<u32> = Pool::new();
    assert_eq!(pool.available(), 0);
    assert!(pool.is_empty());
    assert_eq!(pool.take(), None);
}

#[test]
fn test_take_is_lifo() {
    let mut pool = Pool::new();
    pool.add(1);
    pool.add(2);
    pool.add(3);

    assert_eq!(pool.take(), Some(3));
    assert_eq!(pool.take(), Some(2));

    pool.add(4);
    assert_eq!(pool.take(), Some(4));
    assert_eq!(pool.take(), Some(1));
    assert_eq!(pool.take(), None);
}

#[test]
fn test_available_tracks_adds_and_takes() {
    let mut pool = Pool::with_capacity(8);
    for i in 0..8 {
        pool.add(i);
    }
    assert_eq!(pool.available(), 8);

    pool.take();
    pool.take();
    assert_eq!(pool.available(), 6);
    assert!(!pool.is_empty());
}

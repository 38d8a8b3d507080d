//! Notification id allocation.

use std::sync::atomic::{AtomicI32, Ordering};

/// Allocates process-lifetime-unique notification ids. Injected so tests
/// can control the sequence deterministically.
pub trait IdAllocator: Send + Sync {
    fn next(&self) -> i32;
}

/// Default allocator: a process-wide monotonic counter starting at 1.
#[derive(Debug, Default)]
pub struct AtomicIdAllocator {
    counter: AtomicI32,
}

impl IdAllocator for AtomicIdAllocator {
    fn next(&self) -> i32 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

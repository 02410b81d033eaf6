//! Monotonic id allocation for filters and searches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared, thread-safe sequence of ids starting at 1.
///
/// Clones draw from the same sequence, so every holder of a clone gets
/// distinct ids. Independent allocators are independent sequences.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: Arc<AtomicU64>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            last: Arc::new(AtomicU64::new(first.saturating_sub(1))),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }
}

//! Round-robin cursor for the deterministic mock backends.
//!
//! Held behind an `Arc` so a test can keep a handle, reset it, and replay the
//! exact sequence a backend produced.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct RotationCursor {
    position: AtomicUsize,
}

impl RotationCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Step forward and return the new index into a pool of `pool_len`
    /// entries. The cursor moves before it is read, so a fresh cursor yields
    /// 1, 2, .., 0 for pools longer than one.
    ///
    /// Returns 0 for an empty pool; callers index only non-empty pools.
    pub fn advance(&self, pool_len: usize) -> usize {
        if pool_len == 0 {
            return 0;
        }
        let previous = self
            .position
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |p| {
                Some((p + 1) % pool_len)
            })
            .unwrap_or_default();
        (previous + 1) % pool_len
    }

    /// Back to the start-of-process state.
    pub fn reset(&self) {
        self.position.store(0, Ordering::SeqCst);
    }
}

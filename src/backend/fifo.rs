use alloc::collections::VecDeque;

use tracing::warn;

use crate::{Handle, HandleAllocator};

/// Handle allocator with a monotonically increasing counter and a FIFO free queue
///
/// Released handles are reused oldest-first before any fresh value is minted.
/// Fresh values run from `0` up to (but excluding) `limit`; once the counter
/// reaches the limit and the queue is empty, [`acquire`](HandleAllocator::acquire)
/// returns `None`.
pub struct FifoHandleAllocator {
    next: i32,
    limit: i32,
    free: VecDeque<Handle>,
}

impl Default for FifoHandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl FifoHandleAllocator {
    /// Allocator covering the whole non-negative `i32` range
    pub const fn new() -> Self {
        Self::with_limit(i32::MAX)
    }

    /// Allocator minting fresh handles in `0..limit`
    ///
    /// A non-positive limit yields an allocator that is exhausted from the start.
    pub const fn with_limit(limit: i32) -> Self {
        Self {
            next: 0,
            limit,
            free: VecDeque::new(),
        }
    }

    /// Number of fresh handles minted so far
    pub fn minted(&self) -> usize {
        self.next as usize
    }

    fn was_minted(&self, handle: Handle) -> bool {
        (0..self.next).contains(&handle.raw())
    }
}

impl HandleAllocator for FifoHandleAllocator {
    fn acquire(&mut self) -> Option<Handle> {
        if let Some(handle) = self.free.pop_front() {
            return Some(handle);
        }

        if self.next >= self.limit {
            return None;
        }

        let handle = Handle::from_raw(self.next);
        self.next += 1;
        Some(handle)
    }

    fn release(&mut self, handle: Handle) {
        // Values this allocator never issued would break uniqueness on reuse
        if !self.was_minted(handle) {
            return;
        }

        if self.free.try_reserve(1).is_err() {
            warn!(%handle, "free queue full, handle will not be recycled");
            return;
        }
        self.free.push_back(handle);
    }

    fn limit(&self) -> i32 {
        self.limit
    }

    fn recycled(&self) -> usize {
        self.free.len()
    }

    fn clear(&mut self) {
        self.next = 0;
        self.free.clear();
    }
}

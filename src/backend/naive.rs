#![cfg(test)]

use crate::{Handle, HandleAllocator};

/// Plain incrementing counter, released handles are dropped on the floor
pub struct NaiveHandleAllocator {
    next: i32,
}

impl NaiveHandleAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }
}

impl HandleAllocator for NaiveHandleAllocator {
    fn acquire(&mut self) -> Option<Handle> {
        if self.next == i32::MAX {
            return None;
        }
        let handle = Handle::from_raw(self.next);
        self.next += 1;
        Some(handle)
    }

    fn release(&mut self, _handle: Handle) {}

    fn limit(&self) -> i32 {
        i32::MAX
    }

    fn recycled(&self) -> usize {
        0
    }

    fn clear(&mut self) {
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_never_recycles() {
        let mut handles = NaiveHandleAllocator::new();

        let h0 = handles.acquire().unwrap();
        handles.release(h0);
        assert_eq!(handles.recycled(), 0);

        let h1 = handles.acquire().unwrap();
        assert_ne!(h0, h1);
        assert_eq!(h1.raw(), 1);
    }

    #[test]
    fn test_naive_clear_restarts() {
        let mut handles = NaiveHandleAllocator::new();
        let _ = handles.acquire();
        let _ = handles.acquire();

        handles.clear();
        assert_eq!(handles.acquire(), Some(Handle::from_raw(0)));
    }
}

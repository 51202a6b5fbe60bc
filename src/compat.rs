//! Sentinel return conventions over the typed registry API
//!
//! Hosts that speak raw integers get the legacy contract: `create` yields `-1` on
//! failure, `pop` yields `0` whenever nothing was removed, and `push` / `destroy`
//! report nothing at all.
//!
//! ```
//! use tinystack::prelude::*;
//!
//! let mut registry = StackRegistry::new();
//! let handle = registry.create_raw();
//! assert_eq!(handle, 0);
//!
//! registry.push_raw(handle, Some(&b"AB"[..]), 2);
//! registry.push_raw(handle, None, 2);
//! registry.push_raw(handle, Some(&b"C"[..]), 1);
//! assert_eq!(registry.count_raw(handle), 2);
//!
//! let mut buf = [0u8; 4];
//! assert_eq!(registry.pop_raw(handle, Some(&mut buf[..]), 4), 1);
//! assert_eq!(registry.pop_raw(handle, Some(&mut buf[..]), 4), 2);
//! assert_eq!(&buf[..2], b"AB");
//! assert_eq!(registry.pop_raw(handle, Some(&mut buf[..]), 4), 0);
//! ```

use tracing::trace;

use crate::stacks::StackRegistry;
use crate::{Handle, HandleAllocator};

/// Raw value returned by [`SentinelApi::create_raw`] on failure
pub const INVALID_HANDLE: i32 = Handle::INVALID.raw();

/// Registry operations with sentinel results instead of [`StackResult`](crate::prelude::StackResult)
///
/// `size` arguments mirror a pointer-plus-length interface. For `push_raw` the
/// first `size` bytes of `data` are stored, and a `size` longer than `data` is
/// treated as malformed input and ignored. For `pop_raw` the usable capacity is
/// the smaller of `size` and the buffer length.
pub trait SentinelApi {
    /// New handle, or `-1` if none could be allocated
    fn create_raw(&mut self) -> i32;

    /// Destroys the stack; unknown handles are ignored
    fn destroy_raw(&mut self, handle: i32);

    /// Whether the handle names a live stack
    fn valid_raw(&self, handle: i32) -> bool;

    /// Element count, `0` for unknown handles
    fn count_raw(&self, handle: i32) -> usize;

    /// Pushes `size` bytes of `data`; silently does nothing on any failure
    fn push_raw(&mut self, handle: i32, data: Option<&[u8]>, size: usize);

    /// Bytes popped into `data`, or `0` if nothing was removed
    fn pop_raw(&mut self, handle: i32, data: Option<&mut [u8]>, size: usize) -> usize;
}

impl<A: HandleAllocator> SentinelApi for StackRegistry<A> {
    fn create_raw(&mut self) -> i32 {
        self.create().map_or(INVALID_HANDLE, Handle::raw)
    }

    fn destroy_raw(&mut self, handle: i32) {
        self.destroy(Handle::from_raw(handle));
    }

    fn valid_raw(&self, handle: i32) -> bool {
        self.valid(Handle::from_raw(handle))
    }

    fn count_raw(&self, handle: i32) -> usize {
        self.count(Handle::from_raw(handle))
    }

    fn push_raw(&mut self, handle: i32, data: Option<&[u8]>, size: usize) {
        let Some(data) = data else {
            return;
        };
        let Some(blob) = data.get(..size) else {
            trace!(handle, size, available = data.len(), "push size exceeds data");
            return;
        };
        let _ = self.push(Handle::from_raw(handle), blob);
    }

    fn pop_raw(&mut self, handle: i32, data: Option<&mut [u8]>, size: usize) -> usize {
        let Some(data) = data else {
            return 0;
        };
        let capacity = size.min(data.len());
        self.pop(Handle::from_raw(handle), &mut data[..capacity])
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;

    #[test]
    fn test_create_raw_sentinel_on_exhaustion() {
        let config = RegistryConfig::new().with_handle_limit(1);
        let mut registry = StackRegistry::with_config(config).unwrap();

        assert_eq!(registry.create_raw(), 0);
        assert_eq!(registry.create_raw(), INVALID_HANDLE);
        assert!(!registry.valid_raw(INVALID_HANDLE));
    }

    #[test]
    fn test_push_raw_ignores_malformed_input() {
        let mut registry = StackRegistry::new();
        let handle = registry.create_raw();

        registry.push_raw(handle, None, 4);
        registry.push_raw(handle, Some(&b"data"[..]), 0);
        registry.push_raw(handle, Some(&b"data"[..]), 5);
        registry.push_raw(INVALID_HANDLE, Some(&b"data"[..]), 4);
        registry.push_raw(42, Some(&b"data"[..]), 4);
        assert_eq!(registry.count_raw(handle), 0);

        // Prefix of the slice when size is shorter
        registry.push_raw(handle, Some(&b"data"[..]), 2);
        let mut buf = [0u8; 8];
        assert_eq!(registry.pop_raw(handle, Some(&mut buf[..]), 8), 2);
        assert_eq!(&buf[..2], b"da");
    }

    #[test]
    fn test_pop_raw_collapses_failures_to_zero() {
        let mut registry = StackRegistry::new();
        let handle = registry.create_raw();
        registry.push_raw(handle, Some(&b"HELLO"[..]), 5);

        let mut buf = [0u8; 8];
        assert_eq!(registry.pop_raw(handle, None, 8), 0);
        assert_eq!(registry.pop_raw(handle, Some(&mut buf[..]), 0), 0);
        assert_eq!(registry.pop_raw(handle, Some(&mut buf[..]), 2), 0);
        assert_eq!(registry.pop_raw(INVALID_HANDLE, Some(&mut buf[..]), 8), 0);
        assert_eq!(registry.count_raw(handle), 1);

        // Size larger than the buffer is capped at the buffer
        let mut exact = [0u8; 5];
        assert_eq!(registry.pop_raw(handle, Some(&mut exact[..]), 100), 5);
        assert_eq!(&exact, b"HELLO");
        assert_eq!(registry.pop_raw(handle, Some(&mut buf[..]), 8), 0);
    }

    #[test]
    fn test_destroy_raw_is_idempotent() {
        let mut registry = StackRegistry::new();
        let handle = registry.create_raw();
        registry.push_raw(handle, Some(&b"x"[..]), 1);

        registry.destroy_raw(handle);
        registry.destroy_raw(handle);
        registry.destroy_raw(INVALID_HANDLE);

        assert!(!registry.valid_raw(handle));
        assert_eq!(registry.count_raw(handle), 0);
        assert_eq!(registry.create_raw(), handle);
    }
}

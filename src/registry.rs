//! # TinyStack - Handle-Based Registry of Byte-Blob Stacks
//!
//! TinyStack hands out opaque integer handles, each naming an independent LIFO stack
//! of variable-length byte blobs. Callers push and pop blobs by handle and never
//! touch node pointers.
//!
//! - **Explicit registry** - [`StackRegistry`](prelude::StackRegistry) is a plain value, no ambient state
//! - **FIFO handle recycling** - destroyed handles are reused oldest-first
//! - **Node arena** - stack nodes live in a slab addressed by generation-tracked refs
//! - **All-or-nothing pop** - a too-small buffer leaves the element in place
//! - **Sentinel compatibility** - legacy `-1` / `0` conventions over the typed API
//!
//! ## Quick Start
//!
//! ```rust
//! use tinystack::prelude::*;
//!
//! let mut registry = StackRegistry::new();
//! let handle = registry.create().unwrap();
//!
//! registry.push(handle, b"AB").unwrap();
//! registry.push(handle, b"C").unwrap();
//! assert_eq!(registry.count(handle), 2);
//!
//! let mut buf = [0u8; 4];
//! assert_eq!(registry.pop(handle, &mut buf), Ok(1));
//! assert_eq!(&buf[..1], b"C");
//! ```
//!
//! ## Features
//!
//! - `std` (default) - Forwards `std` to `thiserror` and `tracing`
//! - `compat` (default) - [`SentinelApi`](prelude::SentinelApi) with the legacy return conventions
//! - `global-registry` (default) - One process-wide registry behind a mutex
//! - `ffi` (default) - `extern "C"` functions over the global registry
//!
//! Without `std` the crate is `no_std` + `alloc`.
//!
//! ## Architecture
//!
//! ### Handle allocation
//!
//! The [`HandleAllocator`] trait decides which handle `create` receives. The default
//! backend mints `0, 1, 2, ...` and, once handles are destroyed, reuses them in the
//! order they were freed:
//!
//! ```rust
//! # use tinystack::prelude::*;
//! let mut registry = StackRegistry::new();
//! let a = registry.create().unwrap();
//! let b = registry.create().unwrap();
//!
//! registry.destroy(b);
//! registry.destroy(a);
//!
//! assert_eq!(registry.create(), Ok(b));
//! assert_eq!(registry.create(), Ok(a));
//! ```
//!
//! ### Ownership
//!
//! The registry owns every stack, each stack owns its chain of nodes and each node
//! owns its copied bytes. Dropping the registry frees all of it.
//!
//! ### Failure model
//!
//! Nothing panics and nothing is fatal. The typed API reports the reason through
//! [`StackError`](prelude::StackError); the sentinel API collapses those reasons into `-1` or `0`:
//!
//! ```rust
//! # use tinystack::prelude::*;
//! let mut registry = StackRegistry::new();
//! let handle = registry.create_raw();
//! registry.push_raw(handle, Some(&b"HELLO"[..]), 5);
//!
//! let mut small = [0u8; 2];
//! assert_eq!(registry.pop_raw(handle, Some(&mut small[..]), 2), 0);
//! assert_eq!(registry.count_raw(handle), 1);
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation | Cost | Notes |
//! |-----------|------|-------|
//! | create() | O(1) amortized | Free queue or counter |
//! | push() | O(n) in blob size | One copy into the arena |
//! | pop() | O(n) in blob size | One copy out of the arena |
//! | destroy() | O(k) | k nodes in the stack |
//!
//! ## Concurrency
//!
//! `StackRegistry` has no internal locking; mutating calls take `&mut self`. The
//! optional global registry wraps a single registry in one mutex.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/tinystack/0.1.0")]

extern crate alloc;

use core::fmt;

// Internal modules - use prelude for public API
mod backend;
mod config;
mod error;
mod stacks;
mod utils;

#[cfg(feature = "compat")]
mod compat;

#[cfg(feature = "global-registry")]
mod global;

#[cfg(feature = "ffi")]
pub mod ffi;

/// Convenient re-exports for common use - this is the public API
///
/// ```
/// use tinystack::prelude::*;
/// ```
pub mod prelude;

/// Returns the version string of the tinystack crate
///
/// # Examples
///
/// ```
/// use tinystack::version;
/// assert_eq!(version(), "0.1.0");
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opaque identifier of a stack instance
///
/// `-1` is reserved as [`Handle::INVALID`] and never names a live stack. Any other
/// value is only meaningful to the registry that issued it.
///
/// # Examples
///
/// ```
/// use tinystack::Handle;
///
/// let handle = Handle::from_raw(3);
/// assert_eq!(handle.raw(), 3);
/// assert!(Handle::INVALID.is_sentinel());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(i32);

impl Handle {
    /// The "no handle" sentinel
    pub const INVALID: Self = Self(-1);

    /// Wraps a raw handle value without checking it against any registry
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns true for the reserved `-1` value
    pub const fn is_sentinel(self) -> bool {
        self.0 == Self::INVALID.0
    }
}

impl From<Handle> for i32 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle allocation policy used by a registry
///
/// Implementations must never hand out a handle that is currently live, and must
/// never hand out [`Handle::INVALID`].
///
/// # Examples
///
/// ```
/// use tinystack::prelude::*;
///
/// let mut handles = FifoHandleAllocator::with_limit(2);
/// let a = handles.acquire().unwrap();
/// let b = handles.acquire().unwrap();
/// assert!(handles.acquire().is_none());
///
/// handles.release(a);
/// assert_eq!(handles.acquire(), Some(a));
/// # let _ = b;
/// ```
pub trait HandleAllocator {
    /// Produces a handle that is not in use
    ///
    /// # Returns
    ///
    /// - `Some(handle)` - recycled or freshly minted
    /// - `None` if the handle space is exhausted
    fn acquire(&mut self) -> Option<Handle>;

    /// Returns a handle to the pool once its stack is gone
    fn release(&mut self, handle: Handle);

    /// Upper bound (exclusive) on freshly minted handle values
    fn limit(&self) -> i32;

    /// Number of released handles waiting for reuse
    fn recycled(&self) -> usize;

    /// Forgets every issued handle and starts over
    fn clear(&mut self);
}

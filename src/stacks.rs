//! The stack registry: handle table plus node arena
//!
//! # Examples
//!
//! ```
//! use tinystack::prelude::*;
//!
//! let mut registry = StackRegistry::new();
//! let handle = registry.create().unwrap();
//!
//! registry.push(handle, b"HELLO").unwrap();
//!
//! // Too small: nothing is removed, the caller learns how much room is needed
//! let mut small = [0u8; 2];
//! let err = registry.pop(handle, &mut small).unwrap_err();
//! assert!(err.is_retryable());
//! assert_eq!(registry.peek_len(handle), Some(5));
//!
//! let mut buf = [0u8; 5];
//! assert_eq!(registry.pop(handle, &mut buf), Ok(5));
//! assert_eq!(&buf, b"HELLO");
//! ```

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use tracing::{debug, trace, warn};

use crate::backend::fifo::FifoHandleAllocator;
use crate::config::RegistryConfig;
use crate::error::{StackError, StackResult};
use crate::utils::chain::StackChain;
use crate::utils::nodeslab::NodeSlab;
use crate::{Handle, HandleAllocator};

/// Table of independent byte-blob stacks addressed by [`Handle`]
///
/// Every handle present in the table names a live stack; every other value is
/// invalid and tolerated by all operations. Dropping the registry frees every
/// stack and node it holds.
///
/// `count` returns `0` for both an empty stack and an unknown handle; use
/// [`valid`](Self::valid) to tell them apart.
pub struct StackRegistry<A: HandleAllocator = FifoHandleAllocator> {
    stacks: HashMap<Handle, StackChain>,
    nodes: NodeSlab,
    handles: A,
    config: RegistryConfig,
}

impl Default for StackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StackRegistry {
    /// Empty registry with the default configuration
    pub fn new() -> Self {
        Self::from_parts(RegistryConfig::new(), FifoHandleAllocator::new())
    }

    /// Empty registry sized and limited by `config`
    ///
    /// # Errors
    ///
    /// - [`StackError::InvalidConfig`] if the configuration does not validate
    /// - [`StackError::AllocationFailed`] if the requested reservations cannot be made
    pub fn with_config(config: RegistryConfig) -> StackResult<Self> {
        Self::with_allocator(config, FifoHandleAllocator::with_limit(config.handle_limit))
    }
}

impl<A: HandleAllocator> StackRegistry<A> {
    /// Empty registry drawing handles from a custom allocator
    pub fn with_allocator(config: RegistryConfig, handles: A) -> StackResult<Self> {
        config.validate()?;

        let mut registry = Self::from_parts(config, handles);
        if registry.stacks.try_reserve(config.stack_capacity).is_err() {
            return Err(StackError::AllocationFailed {
                size: config.stack_capacity,
            });
        }
        if !registry.nodes.reserve(config.node_capacity) {
            return Err(StackError::AllocationFailed {
                size: config.node_capacity,
            });
        }
        Ok(registry)
    }

    fn from_parts(config: RegistryConfig, handles: A) -> Self {
        Self {
            stacks: HashMap::new(),
            nodes: NodeSlab::new(),
            handles,
            config,
        }
    }

    /// Registers a new empty stack and returns its handle
    ///
    /// Recycled handles are preferred over fresh ones. On failure nothing is
    /// registered.
    ///
    /// # Errors
    ///
    /// - [`StackError::HandlesExhausted`] when the allocator has nothing left
    /// - [`StackError::RegistrationFailed`] when the table cannot take the entry
    pub fn create(&mut self) -> StackResult<Handle> {
        let Some(handle) = self.handles.acquire() else {
            let limit = self.handles.limit();
            debug!(limit, "handle space exhausted");
            return Err(StackError::HandlesExhausted { limit });
        };

        if self.stacks.try_reserve(1).is_err() {
            warn!(%handle, "stack table cannot grow");
            self.handles.release(handle);
            return Err(StackError::RegistrationFailed { handle });
        }

        match self.stacks.entry(handle) {
            Entry::Occupied(_) => {
                // The allocator handed out a live handle; keep the existing stack
                warn!(%handle, "allocator returned a handle that is still live");
                Err(StackError::RegistrationFailed { handle })
            }
            Entry::Vacant(slot) => {
                slot.insert(StackChain::new());
                debug!(%handle, live = self.stacks.len(), "created stack");
                Ok(handle)
            }
        }
    }

    /// Frees every node of the stack and returns the handle for reuse
    ///
    /// Unknown handles, including ones already destroyed, are ignored.
    pub fn destroy(&mut self, handle: Handle) {
        let Some(chain) = self.stacks.get_mut(&handle) else {
            trace!(%handle, "destroy on unknown handle");
            return;
        };

        let freed = chain.write(&mut self.nodes).clear();
        self.stacks.remove(&handle);
        self.handles.release(handle);
        debug!(%handle, freed, "destroyed stack");
    }

    /// Whether `handle` names a live stack
    pub fn valid(&self, handle: Handle) -> bool {
        self.stacks.contains_key(&handle)
    }

    /// Number of elements on the stack, `0` for an unknown handle
    pub fn count(&self, handle: Handle) -> usize {
        self.stacks.get(&handle).map_or(0, StackChain::len)
    }

    /// Byte length of the top element, if there is one
    pub fn peek_len(&self, handle: Handle) -> Option<usize> {
        self.stacks.get(&handle)?.read(&self.nodes).top_len()
    }

    /// Copies `data` onto the top of the stack
    ///
    /// An empty slice is accepted and ignored; no zero-length elements are ever
    /// stored.
    ///
    /// # Errors
    ///
    /// - [`StackError::InvalidHandle`] for an unknown handle
    /// - [`StackError::AllocationFailed`] if the copy cannot be stored; the stack
    ///   is left exactly as it was
    pub fn push(&mut self, handle: Handle, data: &[u8]) -> StackResult<()> {
        let Some(chain) = self.stacks.get_mut(&handle) else {
            return Err(StackError::InvalidHandle { handle });
        };
        if data.is_empty() {
            return Ok(());
        }

        let pushed = chain.write(&mut self.nodes).push(data);
        match pushed {
            Ok(()) => {
                trace!(%handle, size = data.len(), count = chain.len(), "push");
                Ok(())
            }
            Err(err) => {
                warn!(%handle, size = data.len(), "push failed: {err}");
                Err(err)
            }
        }
    }

    /// Moves the top element into `dest` and returns its length
    ///
    /// The copy is all or nothing: the bytes land in `dest[..len]` and the rest of
    /// `dest` is untouched.
    ///
    /// # Errors
    ///
    /// Checked in this order, none of them removes anything:
    ///
    /// - [`StackError::NoCapacity`] if `dest` is empty
    /// - [`StackError::InvalidHandle`] for an unknown handle
    /// - [`StackError::Empty`] if the stack has no elements
    /// - [`StackError::BufferTooSmall`] if the top element does not fit
    pub fn pop(&mut self, handle: Handle, dest: &mut [u8]) -> StackResult<usize> {
        if dest.is_empty() {
            return Err(StackError::NoCapacity);
        }
        let Some(chain) = self.stacks.get_mut(&handle) else {
            return Err(StackError::InvalidHandle { handle });
        };

        let popped = chain.write(&mut self.nodes).pop_into(dest);
        match popped {
            Ok(len) => trace!(%handle, len, count = chain.len(), "pop"),
            Err(StackError::BufferTooSmall { required, capacity }) => {
                trace!(%handle, required, capacity, "pop buffer too small")
            }
            Err(_) => {}
        }
        popped
    }

    /// Number of live stacks
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Returns true if no stacks are live
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Number of nodes held across all stacks
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Configuration the registry was built with
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The handle allocator backing this registry
    pub fn handles(&self) -> &A {
        &self.handles
    }

    /// Destroys every stack
    ///
    /// Handles are released in ascending order, so later `create` calls reuse
    /// them smallest first.
    pub fn clear(&mut self) {
        let mut live: Vec<Handle> = self.stacks.keys().copied().collect();
        live.sort_unstable();
        for handle in live {
            self.destroy(handle);
        }
        self.nodes.clear();
    }
}

impl<A: HandleAllocator> fmt::Debug for StackRegistry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackRegistry")
            .field("stacks", &self.stacks.len())
            .field("nodes", &self.nodes.len())
            .field("arena_slots", &self.nodes.capacity())
            .field("recycled", &self.handles.recycled())
            .field("config", &self.config)
            .finish()
    }
}

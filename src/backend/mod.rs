//! Handle allocator backends
//!
//! This module contains concrete [`HandleAllocator`](crate::HandleAllocator) implementations.

/// Counter plus FIFO free queue
pub mod fifo;

#[cfg(test)]
pub(crate) mod naive;

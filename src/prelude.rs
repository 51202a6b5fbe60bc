//! Prelude module for convenient imports
//!
//! This is the **only public API** for TinyStack besides [`crate::ffi`]. All items should be accessed through:
//! ```
//! use tinystack::prelude::*;
//! ```

pub use crate::Handle;
pub use crate::HandleAllocator;

pub use crate::backend::fifo::FifoHandleAllocator;
pub use crate::config::{RegistryConfig, RegistryPreset};
pub use crate::error::{StackError, StackResult};
pub use crate::stacks::StackRegistry;

#[cfg(feature = "compat")]
pub use crate::compat::{INVALID_HANDLE, SentinelApi};

#[cfg(feature = "global-registry")]
pub use crate::global::{init_global_registry, with_global_registry};

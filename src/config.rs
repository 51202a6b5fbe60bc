//! Registry configuration
//!
//! ```rust
//! use tinystack::prelude::*;
//!
//! let config = RegistryConfig::new()
//!     .with_handle_limit(16)
//!     .with_node_capacity(64);
//! let mut registry = StackRegistry::with_config(config).unwrap();
//!
//! for _ in 0..16 {
//!     registry.create().unwrap();
//! }
//! assert_eq!(registry.create(), Err(StackError::HandlesExhausted { limit: 16 }));
//! ```

use crate::error::{StackError, StackResult};

/// Sizing and limits for a [`StackRegistry`](crate::prelude::StackRegistry)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Fresh handles are minted in `0..handle_limit`; must be positive
    pub handle_limit: i32,
    /// Stack table entries reserved up front
    pub stack_capacity: usize,
    /// Arena slots reserved up front
    pub node_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryConfig {
    /// Full `i32` handle range, nothing reserved
    pub const fn new() -> Self {
        Self {
            handle_limit: i32::MAX,
            stack_capacity: 0,
            node_capacity: 0,
        }
    }

    /// Sets the exclusive upper bound on fresh handle values
    pub const fn with_handle_limit(mut self, limit: i32) -> Self {
        self.handle_limit = limit;
        self
    }

    /// Reserves room for `capacity` stacks
    pub const fn with_stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = capacity;
        self
    }

    /// Reserves room for `capacity` nodes across all stacks
    pub const fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }

    /// Checks the configuration before a registry is built from it
    pub fn validate(&self) -> StackResult<()> {
        if self.handle_limit <= 0 {
            return Err(StackError::InvalidConfig {
                reason: "handle_limit must be positive",
            });
        }
        if self.stack_capacity > self.handle_limit as usize {
            return Err(StackError::InvalidConfig {
                reason: "stack_capacity exceeds handle_limit",
            });
        }
        Ok(())
    }
}

/// Predefined registry configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryPreset {
    /// 16 handles, 64 nodes reserved
    Tiny,
    /// 256 handles, 1024 nodes reserved
    Small,
    /// Full handle range, nothing reserved
    Unbounded,
}

impl RegistryPreset {
    /// Expands the preset into a full configuration
    pub const fn config(self) -> RegistryConfig {
        match self {
            RegistryPreset::Tiny => RegistryConfig::new()
                .with_handle_limit(16)
                .with_stack_capacity(16)
                .with_node_capacity(64),
            RegistryPreset::Small => RegistryConfig::new()
                .with_handle_limit(256)
                .with_stack_capacity(256)
                .with_node_capacity(1024),
            RegistryPreset::Unbounded => RegistryConfig::new(),
        }
    }
}

impl From<RegistryPreset> for RegistryConfig {
    fn from(preset: RegistryPreset) -> Self {
        preset.config()
    }
}

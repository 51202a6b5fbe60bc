//! Error types for tinystack
//!
//! Every failure path of the registry ends up here; none of them is fatal.

use thiserror::Error;

use crate::Handle;

/// Result alias used throughout the crate
pub type StackResult<T> = core::result::Result<T, StackError>;

/// Stack registry errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    // --- create ---
    #[error("handle space exhausted (limit {limit})")]
    HandlesExhausted { limit: i32 },

    #[error("failed to register a stack under handle {handle}")]
    RegistrationFailed { handle: Handle },

    // --- lookup ---
    #[error("no live stack for handle {handle}")]
    InvalidHandle { handle: Handle },

    // --- push ---
    #[error("failed to allocate a node for a {size} byte blob")]
    AllocationFailed { size: usize },

    // --- pop ---
    #[error("stack is empty")]
    Empty,

    #[error("destination buffer has no capacity")]
    NoCapacity,

    #[error("destination too small: top element is {required} bytes, capacity is {capacity}")]
    BufferTooSmall { required: usize, capacity: usize },

    #[error("node chain broken at arena slot {slot}")]
    Corrupted { slot: u32 },

    // --- config ---
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: &'static str },
}

impl StackError {
    /// Whether repeating the call with different arguments can succeed
    ///
    /// Only a too-small pop buffer qualifies: the element stays on top and a
    /// larger buffer retrieves it.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::BufferTooSmall { .. })
    }

    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::HandlesExhausted { .. } => "STACK:HANDLE:EXHAUSTED",
            Self::RegistrationFailed { .. } => "STACK:HANDLE:REGISTER",
            Self::InvalidHandle { .. } => "STACK:HANDLE:INVALID",
            Self::AllocationFailed { .. } => "STACK:NODE:ALLOC",
            Self::Empty => "STACK:POP:EMPTY",
            Self::NoCapacity => "STACK:POP:NO_CAPACITY",
            Self::BufferTooSmall { .. } => "STACK:POP:TOO_SMALL",
            Self::Corrupted { .. } => "STACK:NODE:CORRUPTED",
            Self::InvalidConfig { .. } => "STACK:CONFIG:INVALID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_only_capacity_mismatch_is_retryable() {
        let too_small = StackError::BufferTooSmall {
            required: 5,
            capacity: 2,
        };
        assert!(too_small.is_retryable());
        assert!(!StackError::Empty.is_retryable());
        assert!(!StackError::NoCapacity.is_retryable());
        assert!(
            !StackError::InvalidHandle {
                handle: Handle::INVALID
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_error_display() {
        let err = StackError::BufferTooSmall {
            required: 5,
            capacity: 2,
        };
        assert_eq!(
            err.to_string(),
            "destination too small: top element is 5 bytes, capacity is 2"
        );

        let err = StackError::InvalidHandle {
            handle: Handle::from_raw(7),
        };
        assert_eq!(err.to_string(), "no live stack for handle #7");
        assert_eq!(err.code(), "STACK:HANDLE:INVALID");
    }
}

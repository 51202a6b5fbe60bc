//! Process-wide registry
//!
//! One [`StackRegistry`] shared by the whole process, guarded by a single
//! `parking_lot::Mutex`. Every operation is short and never blocks on anything
//! but the lock, so one lock over the whole table is enough.
//!
//! ## Automatic Default Initialization
//!
//! The registry is created with [`RegistryConfig::default`] on first use:
//!
//! ```rust
//! use tinystack::prelude::*;
//!
//! let handle = with_global_registry(|registry| registry.create()).unwrap();
//! with_global_registry(|registry| registry.push(handle, b"global")).unwrap();
//! assert!(with_global_registry(|registry| registry.valid(handle)));
//! ```
//!
//! ## User Configuration (Optional)
//!
//! [`init_global_registry`] replaces the registry, dropping every stack the
//! previous one held:
//!
//! ```rust,no_run
//! use tinystack::prelude::*;
//!
//! init_global_registry(RegistryPreset::Small.config()).unwrap();
//! ```
//!
//! The closure passed to [`with_global_registry`] runs with the lock held; calling
//! back into the global registry from inside it deadlocks.

use parking_lot::Mutex;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::StackResult;
use crate::stacks::StackRegistry;

static GLOBAL: Mutex<Option<StackRegistry>> = Mutex::new(None);

/// Installs a fresh registry built from `config`
///
/// Any previous global registry, and every stack in it, is dropped. On error the
/// current registry is kept.
pub fn init_global_registry(config: RegistryConfig) -> StackResult<()> {
    let registry = StackRegistry::with_config(config)?;
    let previous = GLOBAL.lock().replace(registry);
    debug!(
        replaced = previous.as_ref().map_or(0, StackRegistry::len),
        "global registry initialized"
    );
    Ok(())
}

/// Runs `f` against the global registry, creating it with defaults if needed
#[inline]
pub fn with_global_registry<F, R>(f: F) -> R
where
    F: FnOnce(&mut StackRegistry) -> R,
{
    let mut guard = GLOBAL.lock();
    let registry = guard.get_or_insert_with(StackRegistry::new);
    f(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Other tests share the global; only compare against handles created here.

    #[test]
    fn test_global_auto_initializes() {
        let handle = with_global_registry(|registry| registry.create()).unwrap();
        assert!(with_global_registry(|registry| registry.valid(handle)));
        with_global_registry(|registry| registry.destroy(handle));
    }

    #[test]
    fn test_global_push_pop() {
        let handle = with_global_registry(|registry| registry.create()).unwrap();

        with_global_registry(|registry| {
            registry.push(handle, b"first").unwrap();
            registry.push(handle, b"second").unwrap();
            assert_eq!(registry.count(handle), 2);
        });

        let mut buf = [0u8; 16];
        let n = with_global_registry(|registry| registry.pop(handle, &mut buf)).unwrap();
        assert_eq!(&buf[..n], b"second");

        with_global_registry(|registry| {
            registry.destroy(handle);
            assert!(!registry.valid(handle));
        });
    }
}

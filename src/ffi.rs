//! C ABI over the global registry
//!
//! Mirrors the classic header:
//!
//! ```c
//! int32_t tinystack_create(void);
//! void    tinystack_destroy(int32_t handle);
//! bool    tinystack_valid(int32_t handle);
//! size_t  tinystack_count(int32_t handle);
//! void    tinystack_push(int32_t handle, const void *data, size_t size);
//! size_t  tinystack_pop(int32_t handle, void *data, size_t size);
//! ```
//!
//! Null pointers are accepted everywhere and behave like a missing buffer.

use core::ffi::c_void;

use crate::compat::SentinelApi;
use crate::global::with_global_registry;

/// New handle in the global registry, or `-1`
#[unsafe(no_mangle)]
pub extern "C" fn tinystack_create() -> i32 {
    with_global_registry(|registry| registry.create_raw())
}

/// Frees the stack and every element on it; unknown handles are ignored
#[unsafe(no_mangle)]
pub extern "C" fn tinystack_destroy(handle: i32) {
    with_global_registry(|registry| registry.destroy_raw(handle));
}

/// Whether `handle` names a live stack
#[unsafe(no_mangle)]
pub extern "C" fn tinystack_valid(handle: i32) -> bool {
    with_global_registry(|registry| registry.valid_raw(handle))
}

/// Element count, `0` for unknown handles
#[unsafe(no_mangle)]
pub extern "C" fn tinystack_count(handle: i32) -> usize {
    with_global_registry(|registry| registry.count_raw(handle))
}

/// Copies `size` bytes from `data` onto the stack
///
/// # Safety
///
/// `data` must be null or valid for reads of `size` bytes for the duration of
/// the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tinystack_push(handle: i32, data: *const c_void, size: usize) {
    let blob = if data.is_null() || size == 0 {
        None
    } else {
        // SAFETY: non-null and readable for `size` bytes per the contract above
        Some(unsafe { core::slice::from_raw_parts(data.cast::<u8>(), size) })
    };
    with_global_registry(|registry| registry.push_raw(handle, blob, size));
}

/// Pops the top element into `data` and returns its length, or `0`
///
/// # Safety
///
/// `data` must be null or valid for writes of `size` bytes for the duration of
/// the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tinystack_pop(handle: i32, data: *mut c_void, size: usize) -> usize {
    let buf = if data.is_null() || size == 0 {
        None
    } else {
        // SAFETY: non-null and writable for `size` bytes per the contract above
        Some(unsafe { core::slice::from_raw_parts_mut(data.cast::<u8>(), size) })
    };
    with_global_registry(|registry| registry.pop_raw(handle, buf, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ptr;

    fn push(handle: i32, bytes: &[u8]) {
        unsafe { tinystack_push(handle, bytes.as_ptr().cast(), bytes.len()) }
    }

    fn pop(handle: i32, buf: &mut [u8]) -> usize {
        unsafe { tinystack_pop(handle, buf.as_mut_ptr().cast(), buf.len()) }
    }

    #[test]
    fn test_ffi_round_trip() {
        let handle = tinystack_create();
        assert_ne!(handle, -1);
        assert!(tinystack_valid(handle));

        push(handle, b"AB");
        push(handle, b"C");
        assert_eq!(tinystack_count(handle), 2);

        let mut buf = [0u8; 4];
        assert_eq!(pop(handle, &mut buf), 1);
        assert_eq!(&buf[..1], b"C");
        assert_eq!(pop(handle, &mut buf), 2);
        assert_eq!(&buf[..2], b"AB");
        assert_eq!(pop(handle, &mut buf), 0);

        tinystack_destroy(handle);
    }

    #[test]
    fn test_ffi_null_pointers() {
        let handle = tinystack_create();

        unsafe { tinystack_push(handle, ptr::null(), 4) };
        assert_eq!(tinystack_count(handle), 0);

        push(handle, b"HELLO");
        assert_eq!(unsafe { tinystack_pop(handle, ptr::null_mut(), 8) }, 0);

        let mut small = [0u8; 2];
        assert_eq!(pop(handle, &mut small), 0);
        assert_eq!(tinystack_count(handle), 1);

        tinystack_destroy(handle);
    }

    #[test]
    fn test_ffi_invalid_handle() {
        assert!(!tinystack_valid(-1));
        assert_eq!(tinystack_count(-1), 0);
        push(-1, b"ignored");
        let mut buf = [0u8; 8];
        assert_eq!(pop(-1, &mut buf), 0);
        tinystack_destroy(-1);
    }
}

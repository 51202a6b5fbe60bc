//! Driving the global registry through the C ABI, as a foreign host would

use core::ffi::c_void;
use core::ptr;

use tinystack::ffi::*;

fn main() {
    tracing_subscriber::fmt::init();

    let handle = tinystack_create();
    println!("created handle {handle}");

    let payload = b"HELLO";
    unsafe { tinystack_push(handle, payload.as_ptr().cast::<c_void>(), payload.len()) };
    unsafe { tinystack_push(handle, ptr::null(), 8) };
    println!("count after push and null push: {}", tinystack_count(handle));

    let mut small = [0u8; 2];
    let copied = unsafe { tinystack_pop(handle, small.as_mut_ptr().cast(), small.len()) };
    println!("pop into 2 bytes -> {copied}, count still {}", tinystack_count(handle));

    let mut buf = [0u8; 5];
    let copied = unsafe { tinystack_pop(handle, buf.as_mut_ptr().cast(), buf.len()) };
    println!("pop into 5 bytes -> {copied}: {}", String::from_utf8_lossy(&buf[..copied]));

    tinystack_destroy(handle);
    tinystack_destroy(handle);
    println!("valid after destroy: {}", tinystack_valid(handle));
}

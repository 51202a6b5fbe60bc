//! Growing the destination buffer after a too-small pop

use tinystack::prelude::*;

fn main() {
    tracing_subscriber::fmt::init();

    let mut registry = StackRegistry::new();
    let handle = registry.create().unwrap();

    registry.push(handle, b"short").unwrap();
    registry.push(handle, b"a considerably longer message").unwrap();

    let mut buf = vec![0u8; 4];
    while registry.count(handle) > 0 {
        match registry.pop(handle, &mut buf) {
            Ok(n) => println!("popped {n} bytes: {}", String::from_utf8_lossy(&buf[..n])),
            Err(StackError::BufferTooSmall { required, capacity }) => {
                println!("buffer of {capacity} too small, growing to {required}");
                buf.resize(required, 0);
            }
            Err(err) => {
                println!("giving up: {err} ({})", err.code());
                break;
            }
        }
    }

    registry.destroy(handle);
}

//! Walkthrough of the typed registry API

use tinystack::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== StackRegistry Usage ===\n");

    let mut registry = StackRegistry::with_config(RegistryPreset::Tiny.config())
        .expect("tiny preset is valid");

    // Example 1: LIFO order
    lifo_order(&mut registry);

    // Example 2: Independent stacks
    independent_stacks(&mut registry);

    // Example 3: Handle recycling
    handle_recycling(&mut registry);

    println!("Final state: {registry:?}");
}

fn lifo_order(registry: &mut StackRegistry) {
    println!("1. LIFO Order:");

    let handle = registry.create().unwrap();
    for word in ["first", "second", "third"] {
        registry.push(handle, word.as_bytes()).unwrap();
    }
    println!("   Pushed {} elements on {}", registry.count(handle), handle);

    let mut buf = [0u8; 16];
    while let Ok(n) = registry.pop(handle, &mut buf) {
        println!("   Popped: {}", String::from_utf8_lossy(&buf[..n]));
    }

    registry.destroy(handle);
    println!();
}

fn independent_stacks(registry: &mut StackRegistry) {
    println!("2. Independent Stacks:");

    let a = registry.create().unwrap();
    let b = registry.create().unwrap();
    registry.push(a, b"belongs to a").unwrap();
    registry.push(b, b"belongs to b").unwrap();
    registry.push(b, b"also b").unwrap();

    registry.destroy(b);
    println!("   After destroying {b}: valid={}, count={}", registry.valid(b), registry.count(b));
    println!("   {a} still holds {} element(s)", registry.count(a));

    registry.destroy(a);
    println!();
}

fn handle_recycling(registry: &mut StackRegistry) {
    println!("3. Handle Recycling:");

    let handles: Vec<Handle> = (0..3).map(|_| registry.create().unwrap()).collect();
    println!("   Created: {handles:?}");

    registry.destroy(handles[2]);
    registry.destroy(handles[0]);
    println!("   Destroyed {} then {}", handles[2], handles[0]);

    let again = registry.create().unwrap();
    let next = registry.create().unwrap();
    println!("   Reissued in destroy order: {again}, {next}");

    registry.clear();
    println!();
}

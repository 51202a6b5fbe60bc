//! Node storage behind the registry
//!
//! Provides the node arena and the per-stack chain that walks it.

pub mod chain;
pub mod nodeslab;

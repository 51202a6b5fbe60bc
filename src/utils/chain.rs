use tracing::warn;

use super::nodeslab::{Node, NodeRef, NodeSlab};
use crate::error::{StackError, StackResult};

/// A single LIFO stack: the top node in the arena and the number of nodes below it
///
/// The chain owns every node reachable from `top`. Nodes themselves live in a
/// [`NodeSlab`] shared by all chains of one registry, so every operation borrows
/// the slab through a read or write context.
#[derive(Debug, Default)]
pub struct StackChain {
    top: Option<NodeRef>,
    count: usize,
}

impl StackChain {
    pub const fn new() -> Self {
        Self {
            top: None,
            count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    /// Immutable read context
    pub fn read<'a>(&'a self, slab: &'a NodeSlab) -> ChainRead<'a> {
        ChainRead { slab, chain: self }
    }

    /// Mutable write context
    pub fn write<'a>(&'a mut self, slab: &'a mut NodeSlab) -> ChainWrite<'a> {
        ChainWrite { slab, chain: self }
    }
}

pub struct ChainRead<'a> {
    slab: &'a NodeSlab,
    chain: &'a StackChain,
}

impl ChainRead<'_> {
    /// Byte length of the top element
    pub fn top_len(&self) -> Option<usize> {
        let top = self.chain.top?;
        self.slab.get(top).map(Node::len)
    }
}

pub struct ChainWrite<'a> {
    slab: &'a mut NodeSlab,
    chain: &'a mut StackChain,
}

impl ChainWrite<'_> {
    /// Copies `data` into a new top node
    ///
    /// The chain is only relinked once the node and its bytes exist, so a failed
    /// allocation leaves it untouched.
    pub fn push(&mut self, data: &[u8]) -> StackResult<()> {
        let failed = StackError::AllocationFailed { size: data.len() };

        let node = Node::copy_of(data, self.chain.top).ok_or(failed)?;
        let top = self.slab.insert(node).map_err(|_| failed)?;

        self.chain.top = Some(top);
        self.chain.count += 1;
        Ok(())
    }

    /// Moves the top element into `dest` and returns its length
    ///
    /// All or nothing: if `dest` is shorter than the element, nothing is copied
    /// and the element stays on top.
    pub fn pop_into(&mut self, dest: &mut [u8]) -> StackResult<usize> {
        let top = self.chain.top.ok_or(StackError::Empty)?;
        let corrupted = StackError::Corrupted { slot: top.slot() };

        let required = self.slab.get(top).ok_or(corrupted)?.len();
        if dest.len() < required {
            return Err(StackError::BufferTooSmall {
                required,
                capacity: dest.len(),
            });
        }

        let node = self.slab.remove(top).ok_or(corrupted)?;
        dest[..required].copy_from_slice(node.data());

        self.chain.top = node.below();
        self.chain.count -= 1;
        Ok(required)
    }

    /// Frees every node from the top down and returns how many were freed
    pub fn clear(&mut self) -> usize {
        let mut freed = 0;
        let mut cursor = self.chain.top.take();
        while let Some(current) = cursor {
            let Some(node) = self.slab.remove(current) else {
                warn!(slot = current.slot(), "chain ended at a stale node");
                break;
            };
            cursor = node.below();
            freed += 1;
        }
        self.chain.count = 0;
        freed
    }
}

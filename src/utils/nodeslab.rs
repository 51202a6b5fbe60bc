use alloc::boxed::Box;
use alloc::vec::Vec;

const NONE_SLOT: u32 = u32::MAX;

/// Reference to a node in a [`NodeSlab`]
///
/// Combines a slot index with the slot's generation at insertion time. Once the
/// node is removed the generation moves on and the reference stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    slot: u32,
    generation: u32,
}

impl NodeRef {
    pub const fn slot(&self) -> u32 {
        self.slot
    }
}

/// One stack element: an owned copy of the pushed bytes and the node below it
pub struct Node {
    data: Box<[u8]>,
    below: Option<NodeRef>,
}

impl Node {
    /// Copies `data` into a new node sitting on top of `below`
    ///
    /// Returns `None` if the copy cannot be allocated.
    pub fn copy_of(data: &[u8], below: Option<NodeRef>) -> Option<Self> {
        let mut owned = Vec::new();
        owned.try_reserve_exact(data.len()).ok()?;
        owned.extend_from_slice(data);
        Some(Self {
            data: owned.into_boxed_slice(),
            below,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn below(&self) -> Option<NodeRef> {
        self.below
    }
}

struct Slot {
    generation: u32,
    node: Option<Node>,
    next_free: u32,
}

/// Growable arena of stack nodes with generation-tracked references
///
/// Freed slots are kept on an intrusive free list and reused before the arena
/// grows. Growth goes through `try_reserve`, so running out of memory surfaces as
/// a failed insert instead of an abort.
pub struct NodeSlab {
    slots: Vec<Slot>,
    free_head: u32,
    used: usize,
}

impl Default for NodeSlab {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeSlab {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: NONE_SLOT,
            used: 0,
        }
    }

    /// Makes room for `additional` more slots without allocating later
    pub fn reserve(&mut self, additional: usize) -> bool {
        self.slots.try_reserve(additional).is_ok()
    }

    /// Stores a node and returns a reference to it
    ///
    /// On failure the node is handed back untouched.
    pub fn insert(&mut self, node: Node) -> Result<NodeRef, Node> {
        if self.free_head != NONE_SLOT {
            let slot = self.free_head;
            let entry = &mut self.slots[slot as usize];
            self.free_head = entry.next_free;
            entry.next_free = NONE_SLOT;
            entry.node = Some(node);
            self.used += 1;
            return Ok(NodeRef {
                slot,
                generation: entry.generation,
            });
        }

        // NONE_SLOT doubles as the free-list terminator
        if self.slots.len() >= NONE_SLOT as usize || self.slots.try_reserve(1).is_err() {
            return Err(node);
        }

        let slot = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
            next_free: NONE_SLOT,
        });
        self.used += 1;
        Ok(NodeRef {
            slot,
            generation: 0,
        })
    }

    pub fn get(&self, node: NodeRef) -> Option<&Node> {
        let entry = self.slots.get(node.slot as usize)?;
        if entry.generation != node.generation {
            return None;
        }
        entry.node.as_ref()
    }

    /// Takes a node out of the arena, invalidating every reference to it
    pub fn remove(&mut self, node: NodeRef) -> Option<Node> {
        let entry = self.slots.get_mut(node.slot as usize)?;
        if entry.generation != node.generation {
            return None;
        }
        let taken = entry.node.take()?;

        entry.generation = entry.generation.wrapping_add(1);
        entry.next_free = self.free_head;
        self.free_head = node.slot;
        self.used -= 1;
        Some(taken)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.used
    }

    /// Number of slots, live or free
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Drops every node; outstanding references stop resolving
    pub fn clear(&mut self) {
        self.free_head = NONE_SLOT;
        for (index, entry) in self.slots.iter_mut().enumerate().rev() {
            entry.generation = entry.generation.wrapping_add(1);
            entry.node = None;
            entry.next_free = self.free_head;
            self.free_head = index as u32;
        }
        self.used = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(bytes: &[u8]) -> Node {
        Node::copy_of(bytes, None).unwrap()
    }

    #[test]
    fn test_slab_new() {
        let slab = NodeSlab::new();
        assert_eq!(slab.len(), 0);
        assert_eq!(slab.capacity(), 0);
    }

    #[test]
    fn test_slab_insert_and_get() {
        let mut slab = NodeSlab::new();

        let r = slab.insert(node(b"Hello Test")).ok().unwrap();

        assert_eq!(slab.len(), 1);
        let stored = slab.get(r).unwrap();
        assert_eq!(stored.data(), b"Hello Test");
        assert_eq!(stored.len(), 10);
        assert!(stored.below().is_none());
    }

    #[test]
    fn test_slab_remove_and_reuse() {
        let mut slab = NodeSlab::new();

        let r1 = slab.insert(node(b"First")).ok().unwrap();
        let removed = slab.remove(r1).unwrap();
        assert_eq!(removed.data(), b"First");
        assert_eq!(slab.len(), 0);

        // Old reference should be invalid
        assert!(slab.get(r1).is_none());
        assert!(slab.remove(r1).is_none());

        // Same slot, next generation
        let r2 = slab.insert(node(b"Second")).ok().unwrap();
        assert_eq!(r1.slot(), r2.slot());
        assert_ne!(r1, r2);
        assert_eq!(slab.get(r2).unwrap().data(), b"Second");
        assert_eq!(slab.capacity(), 1);
    }

    #[test]
    fn test_slab_links_nodes() {
        let mut slab = NodeSlab::new();

        let bottom = slab.insert(node(b"AB")).ok().unwrap();
        let top = slab
            .insert(Node::copy_of(b"C", Some(bottom)).unwrap())
            .ok()
            .unwrap();

        let below = slab.get(top).unwrap().below().unwrap();
        assert_eq!(below, bottom);
        assert_eq!(slab.get(below).unwrap().data(), b"AB");
    }

    #[test]
    fn test_slab_reuses_most_recent_free_slot() {
        let mut slab = NodeSlab::new();

        let r0 = slab.insert(node(b"0")).ok().unwrap();
        let r1 = slab.insert(node(b"1")).ok().unwrap();
        let _r2 = slab.insert(node(b"2")).ok().unwrap();

        slab.remove(r0);
        slab.remove(r1);

        assert_eq!(slab.insert(node(b"x")).ok().unwrap().slot(), r1.slot());
        assert_eq!(slab.insert(node(b"y")).ok().unwrap().slot(), r0.slot());
        assert_eq!(slab.capacity(), 3);
    }

    #[test]
    fn test_slab_clear() {
        let mut slab = NodeSlab::new();

        let r1 = slab.insert(node(b"one")).ok().unwrap();
        let r2 = slab.insert(node(b"two")).ok().unwrap();
        assert_eq!(slab.len(), 2);

        slab.clear();

        assert_eq!(slab.len(), 0);
        assert!(slab.get(r1).is_none());
        assert!(slab.get(r2).is_none());

        // Slots are recycled rather than grown
        let r3 = slab.insert(node(b"three")).ok().unwrap();
        assert_eq!(r3.slot(), 0);
        assert_eq!(slab.capacity(), 2);
    }

    #[test]
    fn test_slab_reserve() {
        let mut slab = NodeSlab::new();
        assert!(slab.reserve(32));
        assert_eq!(slab.capacity(), 0);
    }
}

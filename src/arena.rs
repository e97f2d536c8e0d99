//! Flat node storage shared by the hash index, the ordered index and the
//! insertion list. Every node lives in a single contiguous Vec and is
//! addressed by its position in it; vacated positions are freelisted and
//! handed out again on the next allocation.

use std::ops::{Index, IndexMut};

/// A key's hash as produced by the container's `BuildHasher`.
pub(crate) type KeyHash = u64;

/// Alias for the index of a node in the arena's storage vec.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeHandle(usize);

impl NodeHandle {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// One key-value pair plus every structural link it takes part in.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,

    /// Cached so growing the bucket array never hashes a key twice.
    pub(crate) hash: KeyHash,

    /// Tree children.
    pub(crate) left: Option<NodeHandle>,
    pub(crate) right: Option<NodeHandle>,

    /// Insertion list neighbours.
    pub(crate) prev: Option<NodeHandle>,
    pub(crate) next: Option<NodeHandle>,

    /// Next node in the same hash bucket.
    pub(crate) chain_next: Option<NodeHandle>,
}

impl<K, V> Node<K, V> {
    /// A node with no links into any structure yet.
    pub(crate) fn detached(key: K, value: V, hash: KeyHash) -> Self {
        Self {
            key,
            value,
            hash,
            left: None,
            right: None,
            prev: None,
            next: None,
            chain_next: None,
        }
    }
}

/// Owns every live node. Structures only ever hold `NodeHandle`s into it, so
/// a removed node cannot be reached through a stale pointer: its slot is
/// emptied and freelisted in the same step.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<K, V> {
    /// The nodes, `None` where a node was released.
    slots: Vec<Option<Node<K, V>>>,

    /// Slots which aren't in use anymore. These will be reused.
    free: Vec<NodeHandle>,
}

impl<K, V> NodeArena<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Stores a node, reusing a freelisted slot when one is available.
    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeHandle {
        match self.free.pop() {
            Some(handle) => {
                self.slots[handle.0] = Some(node);
                handle
            }
            None => {
                self.slots.push(Some(node));
                NodeHandle(self.slots.len() - 1)
            }
        }
    }

    /// Takes a node out of the arena. The caller must already have unlinked
    /// it from every structure.
    pub(crate) fn release(&mut self, handle: NodeHandle) -> Option<Node<K, V>> {
        let node = self.slots.get_mut(handle.0)?.take()?;
        self.free.push(handle);
        Some(node)
    }

    pub(crate) fn get(&self, handle: NodeHandle) -> Option<&Node<K, V>> {
        self.slots.get(handle.0).and_then(|slot| slot.as_ref())
    }

    /// Drops every node. Does not free the underlying buffers.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<K, V> Index<NodeHandle> for NodeArena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, handle: NodeHandle) -> &Self::Output {
        match self.slots.get(handle.0) {
            Some(Some(node)) => node,
            _ => panic!("node handle {} does not refer to a live node", handle.0),
        }
    }
}

impl<K, V> IndexMut<NodeHandle> for NodeArena<K, V> {
    fn index_mut(&mut self, handle: NodeHandle) -> &mut Self::Output {
        match self.slots.get_mut(handle.0) {
            Some(Some(node)) => node,
            _ => panic!("node handle {} does not refer to a live node", handle.0),
        }
    }
}

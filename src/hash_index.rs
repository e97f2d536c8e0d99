//! Bucket array with separate chaining over the arena's nodes.
//!
//! Each bucket holds the head of a singly linked chain threaded through
//! `Node::chain_next`. A new node always becomes the head of its chain.
//! Placement is `hash % capacity` on the unsigned 64-bit hash, so no hash
//! value, including the bit pattern of a signed minimum, can produce an
//! out-of-range or negative index.

use std::{
    borrow::Borrow,
    hash::{BuildHasher, Hash, Hasher},
};

use crate::arena::{KeyHash, NodeArena, NodeHandle};
use crate::insertion_list::InsertionList;

#[derive(Clone, Debug)]
pub(crate) struct HashIndex<S> {
    buckets: Vec<Option<NodeHandle>>,
    hash_builder: S,
}

impl<S> HashIndex<S>
where
    S: BuildHasher,
{
    pub(crate) fn with_capacity_and_hash_builder(capacity: usize, hash_builder: S) -> Self {
        Self {
            buckets: vec![None; capacity],
            hash_builder,
        }
    }

    pub(crate) fn hash_builder(&self) -> &S {
        &self.hash_builder
    }

    pub(crate) fn hash_k<Q>(&self, k: &Q) -> KeyHash
    where
        Q: Hash + ?Sized,
    {
        let mut h = self.hash_builder.build_hasher();
        k.hash(&mut h);
        h.finish()
    }
}

impl<S> HashIndex<S> {
    /// Number of buckets.
    pub(crate) fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn bucket_of(&self, hash: KeyHash) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Walks the chain for `hash` looking for a node whose key equals `k`.
    pub(crate) fn find<K, V, Q>(&self, arena: &NodeArena<K, V>, hash: KeyHash, k: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut cursor = self.buckets[self.bucket_of(hash)];

        while let Some(handle) = cursor {
            let node = &arena[handle];
            if node.hash == hash && node.key.borrow() == k {
                return Some(handle);
            }
            cursor = node.chain_next;
        }

        None
    }

    /// Links a node in as the head of its bucket's chain.
    pub(crate) fn insert<K, V>(&mut self, arena: &mut NodeArena<K, V>, handle: NodeHandle) {
        let bucket = self.bucket_of(arena[handle].hash);
        arena[handle].chain_next = self.buckets[bucket];
        self.buckets[bucket] = Some(handle);
    }

    /// Unlinks a node from its bucket's chain. Returns false if the node was
    /// not found there.
    pub(crate) fn unlink<K, V>(&mut self, arena: &mut NodeArena<K, V>, handle: NodeHandle) -> bool {
        let bucket = self.bucket_of(arena[handle].hash);

        if self.buckets[bucket] == Some(handle) {
            self.buckets[bucket] = arena[handle].chain_next.take();
            return true;
        }

        let mut cursor = self.buckets[bucket];
        while let Some(current) = cursor {
            let next = arena[current].chain_next;
            if next == Some(handle) {
                arena[current].chain_next = arena[handle].chain_next.take();
                return true;
            }
            cursor = next;
        }

        false
    }

    /// Finds and unlinks the node holding `k`, handing back its handle.
    pub(crate) fn remove<K, V, Q>(&mut self, arena: &mut NodeArena<K, V>, hash: KeyHash, k: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let handle = self.find(arena, hash, k)?;
        self.unlink(arena, handle);
        Some(handle)
    }

    /// Whether `len` live entries exceed the load factor for the current
    /// bucket count.
    pub(crate) fn over_threshold(&self, len: usize, load_factor: f32) -> bool {
        len as f64 > self.buckets.len() as f64 * load_factor as f64
    }

    /// Doubles the bucket count and rehomes every node by walking the
    /// insertion list. Only chain links are rewritten; tree and list links
    /// are left exactly as they were.
    pub(crate) fn grow<K, V>(&mut self, arena: &mut NodeArena<K, V>, list: &InsertionList) {
        let capacity = self.buckets.len().saturating_mul(2);
        self.buckets = vec![None; capacity];

        let mut cursor = list.head();
        while let Some(handle) = cursor {
            cursor = arena[handle].next;
            self.insert(arena, handle);
        }
    }

    /// Empties every bucket and resizes the array to `capacity`.
    pub(crate) fn reset(&mut self, capacity: usize) {
        self.buckets.clear();
        self.buckets.resize(capacity, None);
    }

    /// Every handle reachable from any bucket, chain by chain.
    pub(crate) fn handles<'a, K, V>(&'a self, arena: &'a NodeArena<K, V>) -> impl Iterator<Item = (usize, NodeHandle)> + 'a {
        self.buckets.iter().enumerate().flat_map(move |(bucket, head)| {
            let mut cursor = *head;
            std::iter::from_fn(move || {
                let handle = cursor?;
                cursor = arena[handle].chain_next;
                Some((bucket, handle))
            })
        })
    }
}

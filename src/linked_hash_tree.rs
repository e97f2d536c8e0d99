use std::{
    borrow::Borrow,
    collections::{hash_map::RandomState, HashSet},
    fmt,
    hash::{BuildHasher, Hash},
    iter::FromIterator,
};

use rand::rngs::SmallRng;

use crate::arena::{Node, NodeArena, NodeHandle};
use crate::config::Config;
use crate::deletion::{CoinFlip, DeletionStrategy};
use crate::error::{ConfigError, Error, InvariantError};
use crate::hash_index::HashIndex;
use crate::insertion_list::{InsertionList, ListIter};
use crate::ordered_index::{OrderedIndex, TreeIter};

/// A map that is simultaneously a chained hash table, an unbalanced binary
/// search tree and an insertion-ordered linked list, all threaded through the
/// same nodes.
///
/// - Keyed lookup, `contains_key` and removal go through the hash table and
///   are O(1) on average.
/// - [`sorted_order`](Self::sorted_order), [`min_key`](Self::min_key) and
///   [`max_key`](Self::max_key) walk the tree. The tree is never rebalanced,
///   so these cost O(depth), which is O(n) for sorted insertion sequences.
/// - [`insertion_order`](Self::insertion_order) walks the list from the
///   oldest to the most recently (re)added entry.
///
/// Adding a new key may double the bucket array inline. That call pays an
/// O(n) rehash, which keeps insertion amortized O(1) but means an occasional
/// slow `add`; callers with latency-sensitive insert paths should size
/// `initial_capacity` up front.
///
/// There is no internal synchronisation. Sharing one across threads needs a
/// lock supplied by the caller.
pub struct LinkedHashTree<K, V, S = RandomState, D = CoinFlip<SmallRng>> {
    arena: NodeArena<K, V>,
    hash_index: HashIndex<S>,
    ordered_index: OrderedIndex,
    insertion_list: InsertionList,
    strategy: D,
    config: Config,
}

impl<K, V> LinkedHashTree<K, V, RandomState, CoinFlip<SmallRng>> {
    /// 16 buckets, load factor 0.75, modifiable.
    pub fn new() -> Self {
        Self::with_config(Config::new())
    }

    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Config::new().initial_capacity(capacity))
    }

    /// Panics if `config` does not validate; see
    /// [`try_with_config`](Self::try_with_config).
    pub fn with_config(config: Config) -> Self {
        match Self::try_with_config(config) {
            Ok(tree) => tree,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_with_config(config: Config) -> Result<Self, ConfigError> {
        Self::try_with_hasher_and_strategy(config, RandomState::new(), CoinFlip::from_entropy())
    }

    /// A container whose two-child deletions are reproducible: the same seed
    /// and the same sequence of calls always give the same tree shape.
    pub fn try_with_seed(config: Config, seed: u64) -> Result<Self, ConfigError> {
        Self::try_with_hasher_and_strategy(config, RandomState::new(), CoinFlip::seed_from_u64(seed))
    }
}

impl<K, V, S, D> LinkedHashTree<K, V, S, D>
where
    S: BuildHasher,
    D: DeletionStrategy,
{
    /// Panics if `config` does not validate.
    pub fn with_hasher_and_strategy(config: Config, hash_builder: S, strategy: D) -> Self {
        match Self::try_with_hasher_and_strategy(config, hash_builder, strategy) {
            Ok(tree) => tree,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_with_hasher_and_strategy(config: Config, hash_builder: S, strategy: D) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            arena: NodeArena::with_capacity(config.initial_capacity),
            hash_index: HashIndex::with_capacity_and_hash_builder(config.initial_capacity, hash_builder),
            ordered_index: OrderedIndex::new(),
            insertion_list: InsertionList::new(),
            strategy,
            config,
        })
    }

    pub fn hasher(&self) -> &S {
        self.hash_index.hash_builder()
    }
}

impl<K, V, S, D> LinkedHashTree<K, V, S, D> {
    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current number of hash buckets. Only ever grows, except that `clear`
    /// returns it to the configured initial capacity.
    pub fn capacity(&self) -> usize {
        self.hash_index.capacity()
    }

    pub fn load_factor(&self) -> f32 {
        self.config.load_factor
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_modifiable(&self) -> bool {
        self.config.modifiable
    }

    /// Freezes (`false`) or thaws (`true`) the container. While frozen, every
    /// mutating call returns [`Error::ReadOnly`] and changes nothing.
    pub fn set_modifiable(&mut self, modifiable: bool) {
        self.config.modifiable = modifiable;
    }

    fn ensure_modifiable(&self) -> Result<(), Error> {
        if self.config.modifiable {
            Ok(())
        } else {
            Err(Error::ReadOnly)
        }
    }

    /// Longest root-to-leaf path in the tree, counted in nodes.
    pub fn tree_depth(&self) -> usize {
        self.ordered_index.depth(&self.arena)
    }

    /// Entries from the oldest to the most recently added. Reversible.
    pub fn insertion_order(&self) -> InsertionOrder<'_, K, V> {
        InsertionOrder {
            arena: &self.arena,
            handles: self.insertion_list.iter(&self.arena, self.len()),
        }
    }

    /// Entries in ascending key order.
    pub fn sorted_order(&self) -> SortedOrder<'_, K, V> {
        SortedOrder {
            arena: &self.arena,
            handles: self.ordered_index.iter(&self.arena, self.len()),
        }
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.insertion_order().map(|(k, _)| k)
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.insertion_order().map(|(_, v)| v)
    }

    fn entry(&self, handle: Option<NodeHandle>) -> Option<(&K, &V)> {
        handle.map(|h| {
            let node = &self.arena[h];
            (&node.key, &node.value)
        })
    }

    pub fn min_entry(&self) -> Option<(&K, &V)> {
        self.entry(self.ordered_index.min(&self.arena))
    }

    pub fn max_entry(&self) -> Option<(&K, &V)> {
        self.entry(self.ordered_index.max(&self.arena))
    }

    /// The smallest key, or [`Error::Empty`].
    pub fn min_key(&self) -> Result<&K, Error> {
        self.min_entry().map(|(k, _)| k).ok_or(Error::Empty)
    }

    /// The largest key, or [`Error::Empty`].
    pub fn max_key(&self) -> Result<&K, Error> {
        self.max_entry().map(|(k, _)| k).ok_or(Error::Empty)
    }

    /// Linear scan of the insertion list.
    pub fn contains_value(&self, v: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|value| value == v)
    }
}

impl<K, V, S, D> LinkedHashTree<K, V, S, D>
where
    K: Hash + Eq + Ord,
    S: BuildHasher,
    D: DeletionStrategy,
{
    /// Adds or updates an entry.
    ///
    /// - A new key is linked into all three views and `Ok(true)` returned.
    /// - A present key with an equal value is left alone: `Ok(false)`.
    /// - A present key with a different value is replaced by a fresh entry,
    ///   which also moves it to the end of the insertion order: `Ok(true)`.
    pub fn add(&mut self, k: K, v: V) -> Result<bool, Error>
    where
        V: PartialEq,
    {
        self.ensure_modifiable()?;

        let hash = self.hash_index.hash_k(&k);
        if let Some(existing) = self.hash_index.find(&self.arena, hash, &k) {
            if self.arena[existing].value == v {
                return Ok(false);
            }
            self.detach(existing);
        }

        let handle = self.arena.alloc(Node::detached(k, v, hash));
        self.hash_index.insert(&mut self.arena, handle);
        self.ordered_index.insert(&mut self.arena, handle);
        self.insertion_list.push_back(&mut self.arena, handle);

        if self.hash_index.over_threshold(self.len(), self.config.load_factor) {
            self.hash_index.grow(&mut self.arena, &self.insertion_list);
        }

        Ok(true)
    }

    /// Removes an entry. `Ok(false)` if the key wasn't there.
    pub fn remove<Q>(&mut self, k: &Q) -> Result<bool, Error>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(k).map(|v| v.is_some())
    }

    /// Removes an entry and hands back its value.
    pub fn take<Q>(&mut self, k: &Q) -> Result<Option<V>, Error>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ensure_modifiable()?;

        let hash = self.hash_index.hash_k(k);
        Ok(match self.hash_index.remove(&mut self.arena, hash, k) {
            Some(handle) => self.retire(handle).map(|(_, v)| v),
            None => None,
        })
    }

    pub fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(k).map(|h| &self.arena[h].value)
    }

    /// Mutable access to a value in place. Unlike re-adding, this does not
    /// move the entry in the insertion order.
    pub fn get_mut<Q>(&mut self, k: &Q) -> Result<Option<&mut V>, Error>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ensure_modifiable()?;

        Ok(match self.find(k) {
            Some(handle) => Some(&mut self.arena[handle].value),
            None => None,
        })
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(k).is_some()
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_min(&mut self) -> Result<Option<(K, V)>, Error> {
        self.ensure_modifiable()?;

        Ok(match self.ordered_index.min(&self.arena) {
            Some(handle) => self.detach(handle),
            None => None,
        })
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_max(&mut self) -> Result<Option<(K, V)>, Error> {
        self.ensure_modifiable()?;

        Ok(match self.ordered_index.max(&self.arena) {
            Some(handle) => self.detach(handle),
            None => None,
        })
    }

    /// Drops every entry and returns the bucket array to the configured
    /// initial capacity.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.ensure_modifiable()?;

        self.arena.clear();
        self.hash_index.reset(self.config.initial_capacity);
        self.ordered_index.clear();
        self.insertion_list.clear();
        Ok(())
    }

    fn find<Q>(&self, k: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_index.hash_k(k);
        self.hash_index.find(&self.arena, hash, k)
    }

    /// Unlinks a node from all three structures and frees its slot.
    fn detach(&mut self, handle: NodeHandle) -> Option<(K, V)> {
        self.hash_index.unlink(&mut self.arena, handle);
        self.retire(handle)
    }

    /// Unlinks a node that is already out of the hash table from the list
    /// and the tree, then frees its slot.
    fn retire(&mut self, handle: NodeHandle) -> Option<(K, V)> {
        self.insertion_list.unlink(&mut self.arena, handle);
        self.ordered_index.remove(&mut self.arena, handle, &mut self.strategy);
        self.arena.release(handle).map(|node| (node.key, node.value))
    }

    /// Verifies that the hash table, the tree and the insertion list all
    /// reach exactly the same live nodes, that the tree is in strictly
    /// ascending key order, that list back-links mirror forward links, and
    /// that every node sits in the bucket its hash selects.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let len = self.len();

        // insertion list, walked by hand so a cycle can't hang us
        let mut list_handles = HashSet::new();
        let mut prev = None;
        let mut cursor = self.insertion_list.head();
        while let Some(handle) = cursor {
            let node = self
                .arena
                .get(handle)
                .ok_or_else(|| InvariantError::new(format!("list: stale handle {}", handle.index())))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "list: node {} prev pointer inconsistent",
                    handle.index()
                )));
            }
            if !list_handles.insert(handle) || list_handles.len() > len {
                return Err(InvariantError::new("list: cycle or too many nodes"));
            }
            prev = Some(handle);
            cursor = node.next;
        }
        if self.insertion_list.tail() != prev {
            return Err(InvariantError::new("list: tail is not the last node"));
        }
        if list_handles.len() != len {
            return Err(InvariantError::new(format!(
                "list: counted {} but len = {}",
                list_handles.len(),
                len
            )));
        }

        // tree
        let tree_handles: Vec<NodeHandle> = self.ordered_index.iter(&self.arena, len).take(len + 1).collect();
        if tree_handles.len() != len {
            return Err(InvariantError::new(format!(
                "tree: counted {} but len = {}",
                tree_handles.len(),
                len
            )));
        }
        for pair in tree_handles.windows(2) {
            if self.arena[pair[0]].key >= self.arena[pair[1]].key {
                return Err(InvariantError::new(format!(
                    "tree: node {} is not below its in-order successor {}",
                    pair[0].index(),
                    pair[1].index()
                )));
            }
        }
        if tree_handles.iter().any(|h| !list_handles.contains(h)) {
            return Err(InvariantError::new("tree: reaches a node the list does not"));
        }

        // hash table
        let mut hash_count = 0;
        for (bucket, handle) in self.hash_index.handles(&self.arena).take(len + 1) {
            hash_count += 1;
            let node = &self.arena[handle];
            if node.hash != self.hash_index.hash_k(&node.key) {
                return Err(InvariantError::new(format!("hash: node {} has a stale hash", handle.index())));
            }
            if self.hash_index.bucket_of(node.hash) != bucket {
                return Err(InvariantError::new(format!(
                    "hash: node {} is in bucket {} instead of {}",
                    handle.index(),
                    bucket,
                    self.hash_index.bucket_of(node.hash)
                )));
            }
            if !list_handles.contains(&handle) {
                return Err(InvariantError::new("hash: reaches a node the list does not"));
            }
        }
        if hash_count != len {
            return Err(InvariantError::new(format!(
                "hash: counted {} but len = {}",
                hash_count, len
            )));
        }

        Ok(())
    }
}

impl<K, V, S, D> Clone for LinkedHashTree<K, V, S, D>
where
    K: Clone,
    V: Clone,
    S: Clone,
    D: Clone,
{
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            hash_index: self.hash_index.clone(),
            ordered_index: self.ordered_index.clone(),
            insertion_list: self.insertion_list.clone(),
            strategy: self.strategy.clone(),
            config: self.config,
        }
    }
}

impl<K, V> Default for LinkedHashTree<K, V, RandomState, CoinFlip<SmallRng>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S, D> fmt::Debug for LinkedHashTree<K, V, S, D>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.insertion_order()).finish()
    }
}

impl<K, V, S, D> Extend<(K, V)> for LinkedHashTree<K, V, S, D>
where
    K: Hash + Eq + Ord,
    V: PartialEq,
    S: BuildHasher,
    D: DeletionStrategy,
{
    /// Adds each pair in turn. Panics if the container is read-only.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            if let Err(e) = self.add(k, v) {
                panic!("{}", e);
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for LinkedHashTree<K, V, RandomState, CoinFlip<SmallRng>>
where
    K: Hash + Eq + Ord,
    V: PartialEq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V, S, D> IntoIterator for &'a LinkedHashTree<K, V, S, D> {
    type Item = (&'a K, &'a V);
    type IntoIter = InsertionOrder<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.insertion_order()
    }
}

/// Entries in insertion order. See [`LinkedHashTree::insertion_order`].
pub struct InsertionOrder<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    handles: ListIter<'a, K, V>,
}

impl<'a, K, V> Clone for InsertionOrder<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            handles: self.handles.clone(),
        }
    }
}

impl<'a, K, V> Iterator for InsertionOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.handles.next().map(|h| {
            let node = &arena[h];
            (&node.key, &node.value)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.handles.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for InsertionOrder<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.handles.next_back().map(|h| {
            let node = &arena[h];
            (&node.key, &node.value)
        })
    }
}

impl<'a, K, V> ExactSizeIterator for InsertionOrder<'a, K, V> {}

/// Entries in ascending key order. See [`LinkedHashTree::sorted_order`].
pub struct SortedOrder<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    handles: TreeIter<'a, K, V>,
}

impl<'a, K, V> Clone for SortedOrder<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            handles: self.handles.clone(),
        }
    }
}

impl<'a, K, V> Iterator for SortedOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.handles.next().map(|h| {
            let node = &arena[h];
            (&node.key, &node.value)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.handles.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for SortedOrder<'a, K, V> {}

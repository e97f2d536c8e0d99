//! A hash table, a binary search tree and an insertion-ordered linked list
//! rolled into one map. Every entry is a single node in a flat arena, and
//! that node is threaded through all three structures at once, so the map can
//! answer keyed lookups in O(1) on average, walk its keys in ascending order,
//! and walk its entries in the order they arrived, without keeping three
//! copies of anything.
//!
//! ```rust
//! use linked_hash_tree::LinkedHashTree;
//!
//! let mut tree: LinkedHashTree<u32, &str> = LinkedHashTree::new();
//! tree.add(5, "a").unwrap();
//! tree.add(3, "b").unwrap();
//! tree.add(8, "c").unwrap();
//!
//! assert_eq!(tree.get(&3), Some(&"b"));
//! assert_eq!(tree.min_key(), Ok(&3));
//!
//! let sorted: Vec<u32> = tree.sorted_order().map(|(k, _)| *k).collect();
//! assert_eq!(sorted, vec![3, 5, 8]);
//!
//! let arrival: Vec<u32> = tree.keys().copied().collect();
//! assert_eq!(arrival, vec![5, 3, 8]);
//! ```
//!
//! The tree is not self-balancing. Deleting a node with two children splices
//! in its successor or predecessor, chosen by a [`DeletionStrategy`]; the
//! default flips a coin, and a seeded coin makes the resulting shapes
//! reproducible.

mod arena;
mod config;
mod deletion;
mod error;
mod hash_index;
mod insertion_list;
mod linked_hash_tree;
mod null_hasher;
mod ordered_index;

#[cfg(test)]
mod proptests;

pub use crate::config::{Config, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use crate::deletion::{AlwaysPredecessor, AlwaysSuccessor, CoinFlip, DeletionStrategy};
pub use crate::error::{ConfigError, Error, InvariantError};
pub use crate::linked_hash_tree::{InsertionOrder, LinkedHashTree, SortedOrder};
pub use crate::null_hasher::{BuildNullHasher, NullHasher};

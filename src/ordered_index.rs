//! An unbalanced binary search tree over the arena's nodes, ordered by key.
//!
//! Nothing rebalances the tree. Its depth is whatever the insertion order
//! makes it: random keys give logarithmic expected depth, while sorted
//! input degrades it into a linked list of depth n. The only thing working
//! against degeneration is the [`DeletionStrategy`] used when a node with two
//! children is removed.
//!
//! Every walk here is a loop (or an explicit stack) rather than recursion, so
//! a degenerate tree costs time but never call-stack depth.

use std::cmp::Ordering;

use crate::arena::{NodeArena, NodeHandle};
use crate::deletion::DeletionStrategy;

/// Where a subtree hangs: off the root pointer, or off one side of a parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Link {
    Root,
    Left(NodeHandle),
    Right(NodeHandle),
}

#[derive(Clone, Debug, Default)]
pub(crate) struct OrderedIndex {
    root: Option<NodeHandle>,
}

impl OrderedIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<NodeHandle> {
        self.root
    }

    fn get_link<K, V>(&self, arena: &NodeArena<K, V>, link: Link) -> Option<NodeHandle> {
        match link {
            Link::Root => self.root,
            Link::Left(parent) => arena[parent].left,
            Link::Right(parent) => arena[parent].right,
        }
    }

    fn set_link<K, V>(&mut self, arena: &mut NodeArena<K, V>, link: Link, child: Option<NodeHandle>) {
        match link {
            Link::Root => self.root = child,
            Link::Left(parent) => arena[parent].left = child,
            Link::Right(parent) => arena[parent].right = child,
        }
    }

    /// Places a detached node by descending from the root. The node's key
    /// must not already be in the tree.
    pub(crate) fn insert<K, V>(&mut self, arena: &mut NodeArena<K, V>, handle: NodeHandle)
    where
        K: Ord,
    {
        arena[handle].left = None;
        arena[handle].right = None;

        let mut link = Link::Root;
        while let Some(current) = self.get_link(arena, link) {
            link = match arena[handle].key.cmp(&arena[current].key) {
                Ordering::Less => Link::Left(current),
                _ => Link::Right(current),
            };
        }

        self.set_link(arena, link, Some(handle));
    }

    /// Finds the link that currently points at `handle`, descending by the
    /// node's own key.
    fn link_to<K, V>(&self, arena: &NodeArena<K, V>, handle: NodeHandle) -> Option<Link>
    where
        K: Ord,
    {
        let key = &arena[handle].key;
        let mut link = Link::Root;

        loop {
            let current = self.get_link(arena, link)?;
            if current == handle {
                return Some(link);
            }
            link = match key.cmp(&arena[current].key) {
                Ordering::Less => Link::Left(current),
                _ => Link::Right(current),
            };
        }
    }

    /// Unlinks `handle` from the tree. Leaves and single-child nodes are
    /// elided; a node with two children is replaced by its in-order successor
    /// or predecessor, whichever `strategy` picks. The replacement node is
    /// moved into place, not copied, so handles held elsewhere stay valid.
    pub(crate) fn remove<K, V, D>(&mut self, arena: &mut NodeArena<K, V>, handle: NodeHandle, strategy: &mut D) -> bool
    where
        K: Ord,
        D: DeletionStrategy + ?Sized,
    {
        let link = match self.link_to(arena, handle) {
            Some(link) => link,
            None => return false,
        };

        let left = arena[handle].left.take();
        let right = arena[handle].right.take();

        let replacement = match (left, right) {
            (None, child) | (child, None) => child,
            (Some(left), Some(right)) => Some(if strategy.use_successor() {
                Self::splice_min(arena, left, right)
            } else {
                Self::splice_max(arena, left, right)
            }),
        };

        self.set_link(arena, link, replacement);
        true
    }

    /// Detaches the minimum of `right` and gives it `left` and what remains
    /// of `right` as children.
    fn splice_min<K, V>(arena: &mut NodeArena<K, V>, left: NodeHandle, right: NodeHandle) -> NodeHandle {
        let mut parent = None;
        let mut min = right;
        while let Some(next) = arena[min].left {
            parent = Some(min);
            min = next;
        }

        if let Some(parent) = parent {
            arena[parent].left = arena[min].right;
            arena[min].right = Some(right);
        }
        arena[min].left = Some(left);
        min
    }

    /// Mirror of `splice_min`: detaches the maximum of `left`.
    fn splice_max<K, V>(arena: &mut NodeArena<K, V>, left: NodeHandle, right: NodeHandle) -> NodeHandle {
        let mut parent = None;
        let mut max = left;
        while let Some(next) = arena[max].right {
            parent = Some(max);
            max = next;
        }

        if let Some(parent) = parent {
            arena[parent].right = arena[max].left;
            arena[max].left = Some(left);
        }
        arena[max].right = Some(right);
        max
    }

    pub(crate) fn min<K, V>(&self, arena: &NodeArena<K, V>) -> Option<NodeHandle> {
        let mut current = self.root?;
        while let Some(left) = arena[current].left {
            current = left;
        }
        Some(current)
    }

    pub(crate) fn max<K, V>(&self, arena: &NodeArena<K, V>) -> Option<NodeHandle> {
        let mut current = self.root?;
        while let Some(right) = arena[current].right {
            current = right;
        }
        Some(current)
    }

    /// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
    pub(crate) fn depth<K, V>(&self, arena: &NodeArena<K, V>) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeHandle, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((handle, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &arena[handle];
            stack.extend(node.left.map(|h| (h, depth + 1)));
            stack.extend(node.right.map(|h| (h, depth + 1)));
        }

        deepest
    }

    pub(crate) fn iter<'a, K, V>(&self, arena: &'a NodeArena<K, V>, len: usize) -> TreeIter<'a, K, V> {
        let mut iter = TreeIter {
            arena,
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(self.root);
        iter
    }

    pub(crate) fn clear(&mut self) {
        self.root = None;
    }
}

/// In-order walk of node handles using an explicit stack of pending
/// ancestors.
pub(crate) struct TreeIter<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    stack: Vec<NodeHandle>,
    remaining: usize,
}

impl<'a, K, V> TreeIter<'a, K, V> {
    fn push_left_spine(&mut self, mut cursor: Option<NodeHandle>) {
        while let Some(handle) = cursor {
            self.stack.push(handle);
            cursor = self.arena[handle].left;
        }
    }
}

impl<'a, K, V> Clone for TreeIter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for TreeIter<'a, K, V> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        self.push_left_spine(self.arena[handle].right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(handle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for TreeIter<'a, K, V> {}

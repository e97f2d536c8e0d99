//! A doubly linked list threaded through the arena's nodes, recording the
//! order in which keys were most recently added.

use crate::arena::{NodeArena, NodeHandle};

/// Head and tail of the arrival-order chain. The links themselves live on the
/// nodes (`prev`/`next`), so appending and unlinking never move any data.
#[derive(Clone, Debug, Default)]
pub(crate) struct InsertionList {
    /// The oldest node in the list.
    head: Option<NodeHandle>,

    /// The youngest node in the list.
    tail: Option<NodeHandle>,
}

impl InsertionList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn head(&self) -> Option<NodeHandle> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<NodeHandle> {
        self.tail
    }

    /// Links a detached node in as the youngest entry.
    pub(crate) fn push_back<K, V>(&mut self, arena: &mut NodeArena<K, V>, handle: NodeHandle) {
        arena[handle].prev = self.tail;
        arena[handle].next = None;

        match self.tail {
            Some(tail) => arena[tail].next = Some(handle),
            None => self.head = Some(handle),
        }

        self.tail = Some(handle);
    }

    /// Remove an arbitrary node from the list, stitching its neighbours
    /// together so the relative order of everything else is kept.
    pub(crate) fn unlink<K, V>(&mut self, arena: &mut NodeArena<K, V>, handle: NodeHandle) {
        let prev = arena[handle].prev.take();
        let next = arena[handle].next.take();

        match prev {
            Some(prev) => arena[prev].next = next,
            None => self.head = next,
        }

        match next {
            Some(next) => arena[next].prev = prev,
            None => self.tail = prev,
        }
    }

    pub(crate) fn iter<'a, K, V>(&self, arena: &'a NodeArena<K, V>, len: usize) -> ListIter<'a, K, V> {
        ListIter {
            arena,
            front: self.head,
            back: self.tail,
            remaining: len,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.head = None;
        self.tail = None;
    }
}

/// Walks node handles from oldest to youngest, or backwards with
/// `next_back`. `remaining` keeps the two ends from crossing.
pub(crate) struct ListIter<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    front: Option<NodeHandle>,
    back: Option<NodeHandle>,
    remaining: usize,
}

impl<'a, K, V> Clone for ListIter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for ListIter<'a, K, V> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front?;
        self.front = self.arena[handle].next;
        self.remaining -= 1;
        Some(handle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for ListIter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back?;
        self.back = self.arena[handle].prev;
        self.remaining -= 1;
        Some(handle)
    }
}

impl<'a, K, V> ExactSizeIterator for ListIter<'a, K, V> {}

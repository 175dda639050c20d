//! Recency Index Module
//!
//! Arena-backed doubly linked list ordering entries from most to least
//! recently used.

use super::entry::CacheEntry;

// == Slot ==
/// Stable handle to a position in a [`RecencyIndex`].
///
/// A slot stays valid until the entry it points at is removed; after that the
/// arena may hand the same index out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(usize);

#[derive(Debug)]
struct Node<K, V> {
    entry: CacheEntry<K, V>,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency Index ==
/// Orders entries by recency of access.
///
/// Nodes live in a `Vec` and link to each other by index, so moving an entry
/// to the front or unlinking it is O(1) and nothing aliases:
/// - Head = Most recently used
/// - Tail = Least recently used
#[derive(Debug)]
pub struct RecencyIndex<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    /// Vacated arena indices, reused before the arena grows
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Default for RecencyIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyIndex<K, V> {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an entry as the most recently used and returns its slot.
    pub fn push_front(&mut self, entry: CacheEntry<K, V>) -> Slot {
        let node = Node {
            entry,
            prev: None,
            next: None,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        self.link_front(idx);
        self.len += 1;
        Slot(idx)
    }

    // == Move To Front ==
    /// Marks the entry at `slot` as most recently used.
    pub fn move_to_front(&mut self, slot: Slot) {
        if !self.contains(slot) || self.head == Some(slot.0) {
            return;
        }
        self.unlink(slot.0);
        self.link_front(slot.0);
    }

    // == Remove ==
    /// Unlinks and returns the entry at `slot`.
    ///
    /// Returns None if the slot is vacant.
    pub fn remove(&mut self, slot: Slot) -> Option<CacheEntry<K, V>> {
        if !self.contains(slot) {
            return None;
        }
        self.unlink(slot.0);
        let node = self.nodes[slot.0].take()?;
        self.free.push(slot.0);
        self.len -= 1;
        Some(node.entry)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<CacheEntry<K, V>> {
        let tail = self.tail?;
        self.remove(Slot(tail))
    }

    // == Accessors ==
    /// Returns the entry at `slot`, or None if the slot is vacant.
    pub fn get(&self, slot: Slot) -> Option<&CacheEntry<K, V>> {
        self.nodes
            .get(slot.0)
            .and_then(Option::as_ref)
            .map(|node| &node.entry)
    }

    /// Mutable access to the entry at `slot`. Does not touch recency.
    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut CacheEntry<K, V>> {
        self.nodes
            .get_mut(slot.0)
            .and_then(Option::as_mut)
            .map(|node| &mut node.entry)
    }

    /// Returns true if `slot` currently holds an entry.
    pub fn contains(&self, slot: Slot) -> bool {
        matches!(self.nodes.get(slot.0), Some(Some(_)))
    }

    /// Number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no entries are linked.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    // == Link Helpers ==
    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => self.set_prev(head, Some(idx)),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.nodes[idx].as_mut() {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };
        match prev {
            Some(p) => self.set_next(p, next),
            None => self.head = next,
        }
        match next {
            Some(n) => self.set_prev(n, prev),
            None => self.tail = prev,
        }
    }

    fn set_prev(&mut self, idx: usize, prev: Option<usize>) {
        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = prev;
        }
    }

    fn set_next(&mut self, idx: usize, next: Option<usize>) {
        if let Some(node) = self.nodes[idx].as_mut() {
            node.next = next;
        }
    }
}

// == Iterator ==
/// Head-to-tail iterator over a [`RecencyIndex`].
pub struct Iter<'a, K, V> {
    nodes: &'a [Option<Node<K, V>>],
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (Slot, &'a CacheEntry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.nodes[idx].as_ref()?;
        self.cursor = node.next;
        Some((Slot(idx), &node.entry))
    }
}

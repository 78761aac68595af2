//! Recency list with O(1) operations.
//
// A doubly-linked list over an arena of nodes. Links are arena indices, so
// the whole list is plain data: cloning it clones a consistent snapshot.
// - move_to_front: O(1)
// - push_front: O(1)
// - remove: O(1)
// - pop_tail: O(1)
//
// The owning cache maps keys to arena indices through its table.

/// Node in the recency list. Owns the cached key and value.
#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Recency list for tracking access order, most recently used at the head.
#[derive(Debug, Clone)]
pub(crate) struct RecencyList<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    /// Vacant arena slots, reused before the arena grows.
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_head(&self, idx: usize) -> bool {
        self.head == Some(idx)
    }

    /// Links a new node at the head and returns its arena index.
    pub(crate) fn push_front(&mut self, key: K, value: V) -> usize {
        let node = Node {
            key,
            value,
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
        idx
    }

    /// Moves a live node to the head.
    pub(crate) fn move_to_front(&mut self, idx: usize) {
        if self.is_head(idx) {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    /// Unlinks a node and frees its arena slot.
    pub(crate) fn remove(&mut self, idx: usize) -> Option<(K, V)> {
        if self.node(idx).is_none() {
            return None;
        }
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free.push(idx);
        self.len -= 1;
        Some((node.key, node.value))
    }

    /// Removes the least recently used node.
    pub(crate) fn pop_tail(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        self.remove(tail)
    }

    pub(crate) fn value(&self, idx: usize) -> Option<&V> {
        self.node(idx).map(|n| &n.value)
    }

    /// Replaces the value of a live node, returning the old one.
    pub(crate) fn replace(&mut self, idx: usize, value: V) -> Option<V> {
        let node = self.nodes.get_mut(idx)?.as_mut()?;
        Some(std::mem::replace(&mut node.value, value))
    }

    /// Walks from most to least recently used.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, idx: usize) -> Option<&Node<K, V>> {
        self.nodes.get(idx)?.as_ref()
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<K, V>> {
        self.nodes.get_mut(idx)?.as_mut()
    }

    /// Helper: detaches a node from its neighbours (keeps it in the arena).
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node_mut(idx) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Helper: links a detached node in front of the current head.
    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(h) => {
                if let Some(node) = self.node_mut(h) {
                    node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
    }

    /// Checks that walking head to tail and tail to head agree with `len`.
    #[cfg(test)]
    pub(crate) fn assert_linked(&self) {
        let mut forward = Vec::new();
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            forward.push(idx);
            assert!(forward.len() <= self.len, "cycle in recency list");
            cursor = self.node(idx).expect("linked node is live").next;
        }
        assert_eq!(forward.len(), self.len);

        let mut backward = Vec::new();
        let mut cursor = self.tail;
        while let Some(idx) = cursor {
            backward.push(idx);
            assert!(backward.len() <= self.len, "cycle in recency list");
            cursor = self.node(idx).expect("linked node is live").prev;
        }
        backward.reverse();
        assert_eq!(forward, backward);
    }
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator from most to least recently used.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

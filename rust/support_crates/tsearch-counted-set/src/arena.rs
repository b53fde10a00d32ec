//! Growable, index-addressed node storage.

use std::ops::{Index, IndexMut};

use tsearch_common::{Result, error::Error};

use crate::node::{Node, NodeIndex};

/// Number of node slots allocated by a fresh arena.
pub const INITIAL_CAPACITY: usize = 5;

/// The arena doubles its capacity once no more than this many free slots remain.
pub const GROWTH_HEADROOM: usize = 2;

/// Contiguous store of tree nodes addressed by [`NodeIndex`].
///
/// Slots are handed out in order and never reclaimed: the number of used slots is the
/// arena's high-water mark. Growth may move the backing buffer, but the index of every
/// node is preserved. Only indices may be held across an [`allocate`](Self::allocate)
/// call; references into the store have to be re-derived after it.
#[derive(Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
    /// Maximum number of slots this arena may ever use.
    limit: usize,
}

impl NodeArena {
    /// Creates an empty arena with [`INITIAL_CAPACITY`] slots.
    pub fn new() -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(INITIAL_CAPACITY),
            limit: NodeIndex::MAX_NODES,
        }
    }

    /// Creates an empty arena able to hold at least `capacity` nodes before growing.
    pub fn with_capacity(capacity: usize) -> Result<NodeArena> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(capacity.max(INITIAL_CAPACITY))
            .map_err(|e| Error::allocation("counted set arena", e))?;
        Ok(NodeArena {
            nodes,
            limit: NodeIndex::MAX_NODES,
        })
    }

    /// Caps the number of slots the arena may allocate. The cap can never exceed
    /// [`NodeIndex::MAX_NODES`].
    pub fn with_node_limit(mut self, limit: usize) -> NodeArena {
        self.limit = limit.min(NodeIndex::MAX_NODES);
        self
    }

    /// Number of used slots (the high-water mark), tombstones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of slots available before the next reallocation.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[inline]
    pub fn node_limit(&self) -> usize {
        self.limit
    }

    /// Returns the used slots in allocation order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Returns the node at `index`, or `None` for the sentinel or an unused slot.
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        index.get().and_then(|i| self.nodes.get(i))
    }

    /// Appends a new leaf node holding `key` with the given count and returns its index.
    ///
    /// Fails without creating a node when the arena cannot grow or the index space is
    /// exhausted.
    pub fn allocate(&mut self, key: i64, count: u64) -> Result<NodeIndex> {
        if self.nodes.len() >= self.limit {
            return Err(Error::capacity_exceeded("counted set nodes", self.limit));
        }
        self.reserve_headroom()?;
        let index = NodeIndex::new(self.nodes.len());
        self.nodes.push(Node::new(key, count));
        Ok(index)
    }

    /// Copies the arena, reporting allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<NodeArena> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(self.capacity())
            .map_err(|e| Error::allocation("counted set copy", e))?;
        nodes.extend_from_slice(&self.nodes);
        Ok(NodeArena {
            nodes,
            limit: self.limit,
        })
    }

    /// Copies the used slots so they can be iterated while the arena is modified.
    pub fn snapshot(&self) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(self.nodes.len())
            .map_err(|e| Error::allocation("counted set snapshot", e))?;
        nodes.extend_from_slice(&self.nodes);
        Ok(nodes)
    }

    /// Doubles the capacity when `GROWTH_HEADROOM` or fewer free slots remain.
    fn reserve_headroom(&mut self) -> Result<()> {
        let capacity = self.nodes.capacity();
        if capacity - self.nodes.len() > GROWTH_HEADROOM {
            return Ok(());
        }
        let additional = capacity.max(INITIAL_CAPACITY);
        self.nodes
            .try_reserve_exact(additional)
            .inspect_err(|_| log::debug!("arena growth from {capacity} slots failed"))
            .map_err(|e| Error::allocation("counted set arena", e))?;
        log::trace!(
            "arena grew from {capacity} to {} slots",
            self.nodes.capacity()
        );
        Ok(())
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        NodeArena::new()
    }
}

impl Index<NodeIndex> for NodeArena {
    type Output = Node;

    #[inline]
    fn index(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.as_usize()]
    }
}

impl IndexMut<NodeIndex> for NodeArena {
    #[inline]
    fn index_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index.as_usize()]
    }
}

impl std::fmt::Debug for NodeArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeArena")
            .field("len", &self.nodes.len())
            .field("capacity", &self.nodes.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let arena = NodeArena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);
        assert!(arena.capacity() >= INITIAL_CAPACITY);
        assert_eq!(arena.node_limit(), NodeIndex::MAX_NODES);
    }

    #[test]
    fn test_with_capacity() {
        let arena = NodeArena::with_capacity(1).unwrap();
        assert!(arena.capacity() >= INITIAL_CAPACITY);
        let arena = NodeArena::with_capacity(64).unwrap();
        assert!(arena.capacity() >= 64);

        let err = NodeArena::with_capacity(usize::MAX / 2).unwrap_err();
        assert!(err.is_allocation_failure());
    }

    #[test]
    fn test_allocate_sequential_indices() {
        let mut arena = NodeArena::new();
        for i in 0..20 {
            let index = arena.allocate(i * 10, 1).unwrap();
            assert_eq!(index.get(), Some(i as usize));
        }
        assert_eq!(arena.len(), 20);
        for i in 0..20 {
            let node = arena.get(NodeIndex::new(i)).unwrap();
            assert_eq!(node.key(), i as i64 * 10);
            assert_eq!(node.count(), 1);
            assert_eq!(node.balance(), 0);
            assert!(node.left().is_none());
            assert!(node.right().is_none());
        }
    }

    #[test]
    fn test_growth_keeps_headroom() {
        let mut arena = NodeArena::new();
        let mut last_capacity = arena.capacity();
        for i in 0..100 {
            arena.allocate(i, 1).unwrap();
            assert!(arena.capacity() >= arena.len());
            assert!(arena.capacity() >= last_capacity);
            last_capacity = arena.capacity();
        }
        assert!(arena.capacity() >= 100);
    }

    #[test]
    fn test_growth_preserves_nodes() {
        let mut arena = NodeArena::new();
        let first = arena.allocate(42, 7).unwrap();
        arena[first].set_child(crate::node::Direction::Left, NodeIndex::new(1));
        for i in 0..50 {
            arena.allocate(i, 1).unwrap();
        }
        assert_eq!(arena[first].key(), 42);
        assert_eq!(arena[first].count(), 7);
        assert_eq!(arena[first].left(), NodeIndex::new(1));
    }

    #[test]
    fn test_get_out_of_range() {
        let mut arena = NodeArena::new();
        arena.allocate(1, 1).unwrap();
        assert!(arena.get(NodeIndex::NONE).is_none());
        assert!(arena.get(NodeIndex::new(1)).is_none());
        assert!(arena.get(NodeIndex::ROOT).is_some());
    }

    #[test]
    fn test_node_limit() {
        let mut arena = NodeArena::new().with_node_limit(3);
        for i in 0..3 {
            arena.allocate(i, 1).unwrap();
        }
        let err = arena.allocate(3, 1).unwrap_err();
        assert!(matches!(
            err.kind(),
            tsearch_common::error::ErrorKind::CapacityExceeded { limit: 3, .. }
        ));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_try_clone_is_independent() {
        let mut arena = NodeArena::new();
        arena.allocate(1, 1).unwrap();
        arena.allocate(2, 2).unwrap();

        let mut copy = arena.try_clone().unwrap();
        assert_eq!(copy.nodes(), arena.nodes());
        copy[NodeIndex::ROOT].count = 9;
        copy.allocate(3, 3).unwrap();

        assert_eq!(arena[NodeIndex::ROOT].count(), 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(copy.len(), 3);
    }

    #[test]
    fn test_snapshot() {
        let mut arena = NodeArena::new();
        arena.allocate(5, 1).unwrap();
        arena.allocate(6, 0).unwrap();
        let snapshot = arena.snapshot().unwrap();
        assert_eq!(snapshot.as_slice(), arena.nodes());
        arena[NodeIndex::ROOT].count = 0;
        assert_eq!(snapshot[0].count(), 1);
    }

    #[test]
    fn test_debug() {
        let arena = NodeArena::new();
        let debug_str = format!("{arena:?}");
        assert!(debug_str.contains("NodeArena"));
        assert!(debug_str.contains("len: 0"));
    }
}

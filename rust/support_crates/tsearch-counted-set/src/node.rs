//! Arena node layout and index handles.

/// Index of a node slot inside a [`NodeArena`](crate::arena::NodeArena).
///
/// Nodes reference their children by index rather than by pointer, so an index stays
/// valid across arena growth. [`NodeIndex::NONE`] marks a missing child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(u32);

impl NodeIndex {
    /// Sentinel for "no node", the largest representable index.
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    /// Slot of the tree root. The root never moves once the first key is inserted.
    pub const ROOT: NodeIndex = NodeIndex(0);

    /// Number of addressable slots (every index except the sentinel).
    pub const MAX_NODES: usize = u32::MAX as usize;

    #[inline]
    pub(crate) fn new(index: usize) -> NodeIndex {
        debug_assert!(index < Self::MAX_NODES);
        NodeIndex(index as u32)
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns the slot position, or `None` for the sentinel.
    #[inline]
    pub fn get(self) -> Option<usize> {
        (!self.is_none()).then_some(self.0 as usize)
    }

    #[inline]
    pub(crate) fn as_usize(self) -> usize {
        debug_assert!(!self.is_none());
        self.0 as usize
    }
}

impl Default for NodeIndex {
    fn default() -> Self {
        NodeIndex::NONE
    }
}

/// Child side of a node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Contribution of a taller subtree on this side to the balance factor.
    #[inline]
    pub(crate) fn weight(self) -> i8 {
        match self {
            Direction::Left => 1,
            Direction::Right => -1,
        }
    }
}

/// A single tree node: an integer key, its occurrence count and child links.
///
/// A `count` of zero marks a tombstone: the key is logically absent, but the node keeps
/// its place in the tree so that every other index stays stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub(crate) key: i64,
    pub(crate) count: u64,
    /// `height(left) - height(right)`.
    pub(crate) balance: i8,
    pub(crate) left: NodeIndex,
    pub(crate) right: NodeIndex,
}

impl Node {
    pub(crate) fn new(key: i64, count: u64) -> Node {
        Node {
            key,
            count,
            balance: 0,
            left: NodeIndex::NONE,
            right: NodeIndex::NONE,
        }
    }

    #[inline]
    pub fn key(&self) -> i64 {
        self.key
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[inline]
    pub fn balance(&self) -> i8 {
        self.balance
    }

    #[inline]
    pub fn left(&self) -> NodeIndex {
        self.left
    }

    #[inline]
    pub fn right(&self) -> NodeIndex {
        self.right
    }

    /// Returns `true` unless the node is a tombstone.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.count > 0
    }

    #[inline]
    pub fn child(&self, direction: Direction) -> NodeIndex {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, direction: Direction, index: NodeIndex) {
        match direction {
            Direction::Left => self.left = index,
            Direction::Right => self.right = index,
        }
    }
}

//! The counted set API.

use tinyvec::ArrayVec;
use tsearch_common::{Result, error::Error};

use crate::{
    arena::NodeArena,
    lookup::{MAX_DEPTH, Path},
    node::{Node, NodeIndex},
};

/// A multiset of `i64` keys backed by an AVL tree stored in a [`NodeArena`].
///
/// Every key carries an occurrence count. Removing a key zeroes its count but keeps the
/// node in place (a tombstone), so each key occupies at most one arena slot for the
/// lifetime of the set and re-adding a removed key reuses its slot.
///
/// Counts saturate at `u64::MAX` instead of wrapping.
///
/// # Examples
///
/// ```
/// use tsearch_counted_set::CountedSet;
///
/// let mut postings = CountedSet::new();
/// postings.add(10).unwrap();
/// postings.add(20).unwrap();
/// postings.add(10).unwrap();
///
/// assert_eq!(postings.len(), 2);
/// assert_eq!(postings.count_of(10), 2);
/// assert_eq!(postings.sorted_keys().unwrap(), vec![10, 20]);
/// ```
#[derive(Clone, Default)]
pub struct CountedSet {
    arena: NodeArena,
    /// Number of nodes with a non-zero count.
    live: usize,
}

impl CountedSet {
    /// Creates an empty set.
    pub fn new() -> CountedSet {
        CountedSet {
            arena: NodeArena::new(),
            live: 0,
        }
    }

    /// Creates an empty set with room for at least `capacity` distinct keys.
    ///
    /// Fails if the requested storage cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<CountedSet> {
        Ok(CountedSet {
            arena: NodeArena::with_capacity(capacity)?,
            live: 0,
        })
    }

    /// Creates an empty set that refuses to hold more than `limit` distinct keys,
    /// tombstones included.
    pub fn with_node_limit(limit: usize) -> CountedSet {
        CountedSet {
            arena: NodeArena::new().with_node_limit(limit),
            live: 0,
        }
    }

    /// Builds a set by adding every key of `keys` once.
    pub fn from_keys(keys: impl IntoIterator<Item = i64>) -> Result<CountedSet> {
        let mut set = CountedSet::new();
        set.try_extend(keys)?;
        Ok(set)
    }

    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<CountedSet> {
        Ok(CountedSet {
            arena: self.arena.try_clone()?,
            live: self.live,
        })
    }

    /// Number of keys with a non-zero count.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of arena slots in use, tombstones included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Read-only view of the underlying arena.
    #[inline]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Returns `true` if `key` has a non-zero count.
    pub fn contains(&self, key: i64) -> bool {
        self.count_of(key) > 0
    }

    /// Returns the occurrence count of `key`, zero when absent or removed.
    pub fn count_of(&self, key: i64) -> u64 {
        if self.live == 0 {
            return 0;
        }
        self.arena.find(key).map_or(0, |index| self.arena[index].count)
    }

    /// Adds one occurrence of `key`.
    pub fn add(&mut self, key: i64) -> Result<()> {
        self.add_count(key, 1)
    }

    /// Adds `amount` occurrences of `key`.
    ///
    /// An existing node (live or tombstoned) is incremented in place, saturating at
    /// `u64::MAX`. A new key gets a fresh node which is then balanced into the tree.
    /// Adding zero occurrences of an absent key is a no-op.
    ///
    /// Fails only when a new node cannot be allocated; the set is unchanged then.
    pub fn add_count(&mut self, key: i64, amount: u64) -> Result<()> {
        let mut path = Path::new();
        let probe = self.arena.walk(key, |step| path.push(step));

        if !probe.found.is_none() {
            let node = &mut self.arena[probe.found];
            let previous = node.count;
            node.count = previous.saturating_add(amount);
            if previous == 0 && node.count > 0 {
                self.live += 1;
            }
            return Ok(());
        }

        if amount == 0 {
            return Ok(());
        }

        let index = self.arena.allocate(key, amount)?;
        if let Some(parent) = path.last() {
            self.arena[parent.index].set_child(parent.direction, index);
            self.arena.rebalance_path(&path);
        }
        self.live += 1;
        Ok(())
    }

    /// Adds one occurrence of each key, stopping at the first failure.
    pub fn try_extend(&mut self, keys: impl IntoIterator<Item = i64>) -> Result<()> {
        for key in keys {
            self.add(key)?;
        }
        Ok(())
    }

    /// Removes every occurrence of `key`. The node stays in the tree as a tombstone.
    ///
    /// Returns the count the key had before removal.
    pub fn remove(&mut self, key: i64) -> u64 {
        let Some(index) = self.arena.find(key) else {
            return 0;
        };
        let node = &mut self.arena[index];
        let previous = std::mem::take(&mut node.count);
        if previous > 0 {
            self.live -= 1;
        }
        previous
    }

    /// Lowers the count of `key` by `amount`, removing the key once nothing is left.
    pub(crate) fn reduce(&mut self, key: i64, amount: u64) {
        let Some(index) = self.arena.find(key) else {
            return;
        };
        let node = &mut self.arena[index];
        if node.count == 0 {
            return;
        }
        if amount >= node.count {
            node.count = 0;
            self.live -= 1;
        } else {
            node.count -= amount;
        }
    }

    /// Removes every key. The tree shape is preserved, with all nodes tombstoned.
    pub fn remove_all(&mut self) {
        self.arena
            .nodes_mut()
            .iter_mut()
            .for_each(|node| node.count = 0);
        self.live = 0;
    }

    /// Returns the live keys ordered by descending count.
    ///
    /// The order among keys with equal counts is unspecified.
    pub fn sorted_keys(&self) -> Result<Vec<i64>> {
        let nodes = self.sorted_live_nodes()?;
        let mut keys = Vec::new();
        keys.try_reserve_exact(nodes.len())
            .map_err(|e| Error::allocation("counted set keys", e))?;
        keys.extend(nodes.iter().map(|node| node.key));
        Ok(keys)
    }

    /// Returns the live `(key, count)` entries ordered by descending count.
    ///
    /// The order among entries with equal counts is unspecified.
    pub fn sorted_entries(&self) -> Result<Vec<(i64, u64)>> {
        let nodes = self.sorted_live_nodes()?;
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(nodes.len())
            .map_err(|e| Error::allocation("counted set entries", e))?;
        entries.extend(nodes.iter().map(|node| (node.key, node.count)));
        Ok(entries)
    }

    fn sorted_live_nodes(&self) -> Result<Vec<Node>> {
        let mut nodes = self.arena.snapshot()?;
        nodes.retain(Node::is_live);
        nodes.sort_unstable_by(|a, b| b.count.cmp(&a.count));
        debug_assert_eq!(nodes.len(), self.live);
        Ok(nodes)
    }

    /// Iterates over the live `(key, count)` entries in ascending key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.arena)
    }

    /// Verifies the internal consistency of the set. Meant for tests.
    ///
    /// # Panics
    ///
    /// Panics if the tree is misordered, a balance factor is stale or out of range,
    /// some slot is unreachable from the root, or the live count is wrong.
    #[doc(hidden)]
    pub fn verify(&self) {
        let nodes = self.arena.nodes();
        assert_eq!(nodes.iter().filter(|n| n.is_live()).count(), self.live);
        assert!(self.live <= nodes.len());
        let (_, reachable) = self.arena.verify_subtree(
            if nodes.is_empty() {
                NodeIndex::NONE
            } else {
                NodeIndex::ROOT
            },
            None,
            None,
        );
        assert_eq!(reachable, nodes.len(), "unreachable arena slots");
    }
}

impl std::fmt::Debug for CountedSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a CountedSet {
    type Item = (i64, u64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the live entries of a [`CountedSet`].
pub struct Iter<'a> {
    arena: &'a NodeArena,
    stack: ArrayVec<[NodeIndex; MAX_DEPTH]>,
}

impl<'a> Iter<'a> {
    fn new(arena: &'a NodeArena) -> Iter<'a> {
        let mut iter = Iter {
            arena,
            stack: ArrayVec::new(),
        };
        if !arena.is_empty() {
            iter.push_left_spine(NodeIndex::ROOT);
        }
        iter
    }

    fn push_left_spine(&mut self, mut index: NodeIndex) {
        while !index.is_none() {
            self.stack.push(index);
            index = self.arena[index].left;
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = (i64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.stack.pop() {
            let node = &self.arena[index];
            self.push_left_spine(node.right);
            if node.is_live() {
                return Some((node.key, node.count));
            }
        }
        None
    }
}

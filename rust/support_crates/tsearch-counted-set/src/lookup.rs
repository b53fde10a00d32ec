//! Binary search descent over the node arena.

use std::cmp::Ordering;

use tinyvec::ArrayVec;

use crate::{
    arena::NodeArena,
    node::{Direction, NodeIndex},
};

/// Upper bound on the depth of a balanced tree addressable by [`NodeIndex`].
pub(crate) const MAX_DEPTH: usize = 64;

/// One node passed through on the way down, and the side the descent continued on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PathStep {
    pub index: NodeIndex,
    pub direction: Direction,
}

/// Nodes visited from the root to the insertion parent.
pub(crate) type Path = ArrayVec<[PathStep; MAX_DEPTH]>;

/// Outcome of a key lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    /// Node holding the key, or [`NodeIndex::NONE`].
    pub found: NodeIndex,
    /// Parent of `found` when the key exists; otherwise the node a new key would be
    /// attached to. [`NodeIndex::NONE`] for the root or an empty tree.
    pub parent: NodeIndex,
    /// Side of `parent` that leads to `found` or receives the new node.
    pub side: Direction,
}

impl Probe {
    const EMPTY: Probe = Probe {
        found: NodeIndex::NONE,
        parent: NodeIndex::NONE,
        side: Direction::Left,
    };
}

impl NodeArena {
    /// Descends from the root looking for `key`.
    ///
    /// The returned probe carries either the matching node or the insertion point.
    /// Tombstones are matched like any other node.
    pub fn probe(&self, key: i64) -> Probe {
        self.walk(key, |_| ())
    }

    /// Same as [`probe`](Self::probe), reporting every node passed through (not
    /// including a matching node) to `on_step`.
    pub(crate) fn walk(&self, key: i64, mut on_step: impl FnMut(PathStep)) -> Probe {
        let mut probe = Probe::EMPTY;
        let mut current = if self.is_empty() {
            NodeIndex::NONE
        } else {
            NodeIndex::ROOT
        };
        while !current.is_none() {
            let node = &self[current];
            let direction = match key.cmp(&node.key) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => {
                    probe.found = current;
                    return probe;
                }
            };
            on_step(PathStep {
                index: current,
                direction,
            });
            probe.parent = current;
            probe.side = direction;
            current = node.child(direction);
        }
        probe
    }

    /// Returns the index of the node holding `key`, live or tombstoned.
    pub fn find(&self, key: i64) -> Option<NodeIndex> {
        let found = self.probe(key).found;
        (!found.is_none()).then_some(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //      10
    //    5    20
    //      6
    fn sample() -> NodeArena {
        let mut arena = NodeArena::new();
        let root = arena.allocate(10, 1).unwrap();
        let right = arena.allocate(20, 1).unwrap();
        let left = arena.allocate(5, 1).unwrap();
        let grandchild = arena.allocate(6, 0).unwrap();
        arena[root].set_child(Direction::Right, right);
        arena[root].set_child(Direction::Left, left);
        arena[left].set_child(Direction::Right, grandchild);
        arena
    }

    #[test]
    fn test_probe_empty() {
        let arena = NodeArena::new();
        let probe = arena.probe(1);
        assert!(probe.found.is_none());
        assert!(probe.parent.is_none());
        assert_eq!(arena.find(1), None);
    }

    #[test]
    fn test_probe_root() {
        let arena = sample();
        let probe = arena.probe(10);
        assert_eq!(probe.found, NodeIndex::ROOT);
        assert!(probe.parent.is_none());
    }

    #[test]
    fn test_probe_found_reports_parent() {
        let arena = sample();
        let probe = arena.probe(6);
        assert_eq!(probe.found, NodeIndex::new(3));
        assert_eq!(probe.parent, NodeIndex::new(2));
        assert_eq!(probe.side, Direction::Right);
    }

    #[test]
    fn test_probe_tombstone_is_found() {
        let arena = sample();
        assert_eq!(arena.find(6), Some(NodeIndex::new(3)));
    }

    #[test]
    fn test_probe_insertion_point() {
        let arena = sample();

        let probe = arena.probe(7);
        assert!(probe.found.is_none());
        assert_eq!(probe.parent, NodeIndex::new(3));
        assert_eq!(probe.side, Direction::Right);

        let probe = arena.probe(15);
        assert!(probe.found.is_none());
        assert_eq!(probe.parent, NodeIndex::new(1));
        assert_eq!(probe.side, Direction::Left);

        let probe = arena.probe(i64::MIN);
        assert_eq!(probe.parent, NodeIndex::new(2));
        assert_eq!(probe.side, Direction::Left);
    }

    #[test]
    fn test_walk_records_path() {
        let arena = sample();
        let mut path = Path::new();
        let probe = arena.walk(7, |step| path.push(step));
        assert!(probe.found.is_none());
        let visited: Vec<_> = path.iter().map(|s| (s.index, s.direction)).collect();
        assert_eq!(
            visited,
            vec![
                (NodeIndex::ROOT, Direction::Left),
                (NodeIndex::new(2), Direction::Right),
                (NodeIndex::new(3), Direction::Right),
            ]
        );

        let mut path = Path::new();
        arena.walk(5, |step| path.push(step));
        assert_eq!(path.len(), 1);
    }
}

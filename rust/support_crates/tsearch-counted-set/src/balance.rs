//! AVL maintenance for the node arena.
//!
//! Rotations never change the slot of the subtree root they operate on: node contents
//! are moved between the slots involved instead. This keeps the tree root at
//! [`NodeIndex::ROOT`] and leaves the parent's child link valid, so a rotation never
//! has to touch any node outside the rotated trio.

use crate::{
    arena::NodeArena,
    lookup::PathStep,
    node::{Direction, NodeIndex},
};

impl NodeArena {
    /// Restores the AVL invariant after a leaf was linked below the last node of `path`.
    ///
    /// `path` lists the ancestors of the new leaf from the root down, each with the side
    /// the descent took. Balance factors are updated bottom-up until a subtree height is
    /// found unchanged, or until a rotation absorbs the growth.
    pub(crate) fn rebalance_path(&mut self, path: &[PathStep]) {
        for step in path.iter().rev() {
            let node = &mut self[step.index];
            node.balance += step.direction.weight();
            match node.balance {
                0 => return,
                -1 | 1 => continue,
                _ => {
                    self.rebalance_node(step.index);
                    return;
                }
            }
        }
    }

    /// Rotates the subtree rooted at `index`, whose balance factor is `+2` or `-2`.
    fn rebalance_node(&mut self, index: NodeIndex) {
        let heavy = if self[index].balance > 0 {
            Direction::Left
        } else {
            Direction::Right
        };
        let child = self[index].child(heavy);
        // A child leaning to the opposite side needs its grandchild promoted instead.
        if self[child].balance == -heavy.weight() {
            self.rotate_double(index, heavy);
        } else {
            self.rotate_single(index, heavy);
        }
    }

    /// Promotes the `heavy` child of `index` to the subtree root.
    ///
    /// ```text
    ///       a             b
    ///     b   z   ==>   x   a
    ///    x y               y z
    /// ```
    fn rotate_single(&mut self, index: NodeIndex, heavy: Direction) {
        log::trace!("single rotation at slot {index:?} ({heavy:?}-heavy)");
        let light = heavy.opposite();
        let child_index = self[index].child(heavy);
        let root = self[index];
        let child = self[child_index];

        let w = heavy.weight();
        let (root_balance, child_balance) = if child.balance == 0 {
            (-w, w)
        } else {
            (0, 0)
        };

        let mut new_root = child;
        new_root.set_child(heavy, child.child(heavy));
        new_root.set_child(light, child_index);
        new_root.balance = root_balance;

        let mut demoted = root;
        demoted.set_child(heavy, child.child(light));
        demoted.balance = child_balance;

        self[index] = new_root;
        self[child_index] = demoted;
    }

    /// Promotes the inner grandchild of `index` (the `heavy` child's `light` child).
    ///
    /// ```text
    ///       a               c
    ///     b   z           b   a
    ///   w   c     ==>    w x y z
    ///      x y
    /// ```
    fn rotate_double(&mut self, index: NodeIndex, heavy: Direction) {
        log::trace!("double rotation at slot {index:?} ({heavy:?}-heavy)");
        let light = heavy.opposite();
        let child_index = self[index].child(heavy);
        let grandchild_index = self[child_index].child(light);
        let root = self[index];
        let grandchild = self[grandchild_index];

        let w = heavy.weight();
        let (child_balance, root_balance) = match grandchild.balance {
            b if b == w => (0, -w),
            b if b == -w => (w, 0),
            _ => (0, 0),
        };

        let mut new_root = grandchild;
        new_root.set_child(heavy, child_index);
        new_root.set_child(light, grandchild_index);
        new_root.balance = 0;

        let child = &mut self[child_index];
        child.set_child(light, grandchild.child(heavy));
        child.balance = child_balance;

        let mut demoted = root;
        demoted.set_child(heavy, grandchild.child(light));
        demoted.balance = root_balance;

        self[index] = new_root;
        self[grandchild_index] = demoted;
    }

    /// Height of the subtree rooted at `index` (zero for [`NodeIndex::NONE`]).
    pub fn height(&self, index: NodeIndex) -> usize {
        if index.is_none() {
            return 0;
        }
        let node = &self[index];
        1 + self.height(node.left).max(self.height(node.right))
    }

    /// Recursively checks the subtree rooted at `index` and returns `(height, nodes)`.
    ///
    /// Every key must lie strictly inside `(lower, upper)`, and every recorded balance
    /// factor must equal the actual height difference and be within `-1..=1`.
    ///
    /// # Panics
    ///
    /// Panics on the first violated invariant.
    pub(crate) fn verify_subtree(
        &self,
        index: NodeIndex,
        lower: Option<i64>,
        upper: Option<i64>,
    ) -> (usize, usize) {
        if index.is_none() {
            return (0, 0);
        }
        let node = &self[index];
        if let Some(lower) = lower {
            assert!(node.key > lower, "key {} not above {lower}", node.key);
        }
        if let Some(upper) = upper {
            assert!(node.key < upper, "key {} not below {upper}", node.key);
        }
        let (left_height, left_nodes) = self.verify_subtree(node.left, lower, Some(node.key));
        let (right_height, right_nodes) = self.verify_subtree(node.right, Some(node.key), upper);
        let balance = left_height as isize - right_height as isize;
        assert_eq!(
            balance, node.balance as isize,
            "stale balance factor at key {}",
            node.key
        );
        assert!(balance.abs() <= 1, "unbalanced at key {}", node.key);
        (
            1 + left_height.max(right_height),
            1 + left_nodes + right_nodes,
        )
    }
}

//! Union, intersection and difference of counted sets.
//!
//! Each operation mutates `self` and reads `other`. An operation that fails part way
//! (on allocation failure) returns the error and leaves `self` with whatever changes
//! were applied before the failure; nothing is rolled back.

use tsearch_common::Result;

use crate::counted_set::CountedSet;

impl CountedSet {
    /// Adds every live key of `other` to `self`, with its full count.
    ///
    /// Counts of keys present in both sets are summed (saturating). Keys that were
    /// removed from `self` come back with `other`'s count.
    pub fn union(&mut self, other: &CountedSet) -> Result<()> {
        for node in other.arena().nodes().iter().filter(|n| n.is_live()) {
            self.add_count(node.key, node.count)
                .inspect_err(|e| log::debug!("counted set union aborted: {e}"))?;
        }
        Ok(())
    }

    /// Keeps only the keys that are live in both sets.
    ///
    /// For every key kept, `other`'s count is **added** to the count in `self`: the
    /// result of intersecting `{1: 2, 2: 3}` with `{2: 4}` is `{2: 7}`. Summing is what
    /// query evaluation relies on to rank documents that match several terms by their
    /// total number of occurrences.
    ///
    /// Intersecting with an empty set removes every key.
    pub fn intersect(&mut self, other: &CountedSet) -> Result<()> {
        if other.is_empty() {
            self.remove_all();
            return Ok(());
        }

        // Iterate over a copy, `self` is modified along the way.
        let snapshot = self
            .arena()
            .snapshot()
            .inspect_err(|e| log::debug!("counted set intersection aborted: {e}"))?;
        for node in snapshot.iter().filter(|n| n.is_live()) {
            match other.count_of(node.key) {
                0 => {
                    self.remove(node.key);
                }
                count => self
                    .add_count(node.key, count)
                    .inspect_err(|e| log::debug!("counted set intersection aborted: {e}"))?,
            }
        }
        Ok(())
    }

    /// Subtracts the counts of `other` from `self`.
    ///
    /// A key whose count in `other` is at least its count in `self` is removed; otherwise
    /// its count is reduced by `other`'s count. Keys absent from `self` are ignored.
    pub fn minus(&mut self, other: &CountedSet) {
        if self.is_empty() {
            return;
        }
        for node in other.arena().nodes().iter().filter(|n| n.is_live()) {
            self.reduce(node.key, node.count);
        }
    }
}

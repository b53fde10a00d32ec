//! Counted sets of integer keys for posting data.
//!
//! A [`CountedSet`] records, for every `i64` key (typically a document identifier), how
//! many times it was added. Posting lists of individual terms are accumulated into
//! counted sets and then combined with [`union`](CountedSet::union),
//! [`intersect`](CountedSet::intersect) and [`minus`](CountedSet::minus) while a
//! multi-term query is evaluated; [`sorted_keys`](CountedSet::sorted_keys) finally ranks
//! the matching keys by their accumulated count.
//!
//! # Structure
//!
//! - [`arena`]: the growable node store. Nodes reference each other by [`NodeIndex`].
//! - [`lookup`]: key descent, yielding the matching node or the insertion point.
//! - `balance`: AVL retracing and rotations after an insertion.
//! - [`counted_set`]: the public API on top of the tree.
//! - `set_ops`: set algebra between two counted sets.
//!
//! Removal never frees a node. A removed key keeps its slot with a zero count, and adding
//! it again revives the same slot.

pub mod arena;
mod balance;
pub mod counted_set;
pub mod lookup;
pub mod node;
mod set_ops;
#[cfg(test)]
mod tests;

pub use counted_set::{CountedSet, Iter};
pub use node::{Direction, Node, NodeIndex};

//! # tsearch: posting-set primitives for text search
//!
//! A text search engine keeps, for every term, the identifiers of the documents the term
//! occurs in together with the number of occurrences. This crate re-exports the building
//! blocks for that posting data:
//!
//! * [`counted_set`] - counted multisets of `i64` keys with union, intersection and
//!   difference, used to combine posting lists while evaluating a multi-term query
//! * [`collections`] - plain byte buffer and integer array containers
//! * [`common`] - error and result types shared by all crates
//!
//! ## Example
//!
//! ```
//! use tsearch::counted_set::CountedSet;
//!
//! let mut apple = CountedSet::new();
//! apple.add_count(1, 4).unwrap();
//! apple.add_count(2, 1).unwrap();
//!
//! let mut pie = CountedSet::new();
//! pie.add_count(2, 2).unwrap();
//! pie.add_count(3, 1).unwrap();
//!
//! // Documents mentioning either term, ranked by total occurrences.
//! let mut either = apple.clone();
//! either.union(&pie).unwrap();
//! assert_eq!(either.sorted_keys().unwrap()[0], 1);
//!
//! // Documents mentioning both.
//! apple.intersect(&pie).unwrap();
//! assert_eq!(apple.sorted_keys().unwrap(), vec![2]);
//! ```
//!
//! None of the types synchronize internally. A set is mutated through `&mut`, so
//! sharing one between threads needs an external lock.

pub use tsearch_collections as collections;
pub use tsearch_common as common;
pub use tsearch_counted_set as counted_set;

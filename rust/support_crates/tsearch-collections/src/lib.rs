//! Plain growable containers used around the counted sets.
//!
//! - [`StringBuf`]: a byte buffer for accumulating token text.
//! - [`IntegerArray`]: a vector of `i64` values used as a generic result container.
//!
//! Neither container deduplicates, orders or counts its contents. Growth is fallible and
//! reports allocation failure through [`tsearch_common::Result`].

pub mod int_array;
pub mod string_buf;

pub use int_array::IntegerArray;
pub use string_buf::StringBuf;

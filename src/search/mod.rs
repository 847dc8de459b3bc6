//! Subset search over collections of [`FixedSet`](crate::sets::fixed::FixedSet)s.
//!
//! The index is a binary trie with one level per element of the universe;
//! see [`SubsetIndex`] for the query semantics.

mod node;
mod subset_index;

pub use node::*;
pub use subset_index::*;

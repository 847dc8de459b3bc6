//! Traversal statistics for subset queries.
//!
//! This module provides a small counter structure that subset queries can fill
//! in, so drivers can report how much of the trie each query had to touch.

mod stats;
pub use stats::*;

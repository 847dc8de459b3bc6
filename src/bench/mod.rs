//! Micro-benchmark harness.
//!
//! Compares [`FixedSet`](crate::sets::fixed::FixedSet) against the reference
//! sets of [`baseline`](crate::sets::baseline), and times the
//! [`SubsetIndex`](crate::search::SubsetIndex) operations on generated
//! workloads. Results are plain records so drivers can print or serialize them.

mod element_bench;
mod index_bench;
mod record;

pub use element_bench::*;
pub use index_bench::*;
pub use record::*;

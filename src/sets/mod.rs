//! Set data structures.
//!
//! # Submodules
//!
//! - [`fixed`]: Packed bitsets over a fixed universe `[0, capacity)`
//! - [`baseline`]: Ordered, hashed and dense reference sets used by the benchmark harness

pub mod baseline;
pub mod fixed;

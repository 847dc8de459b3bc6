//! Fixed-universe sets packed into machine words.
//!
//! A [`FixedSet`] never grows: its capacity is chosen at construction and every
//! binary operation requires both operands to share it.

mod algebra;
mod fixed_set;
mod iter;

pub use fixed_set::*;
pub use iter::*;

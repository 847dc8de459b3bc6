//! Reference set representations used to benchmark [`FixedSet`](crate::sets::fixed::FixedSet).

mod dense_set;
mod element_set;
mod integer_set;
mod ordered;

pub use dense_set::*;
pub use element_set::*;
pub use integer_set::*;

use thiserror::Error;

/// Failures reported by [`FixedSet`](crate::sets::fixed::FixedSet) and
/// [`SubsetIndex`](crate::search::SubsetIndex) operations.
///
/// No operation mutates its receiver before returning one of these.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetError {
    /// A set was explicitly constructed with capacity 0
    #[error("cannot create a set with capacity 0")]
    InvalidCapacity,

    /// Two operands (or an operand and an index) disagree on capacity
    #[error("capacity mismatch: expected {expected}, found {found}")]
    CapacityMismatch { expected: usize, found: usize },

    /// Element access on a default, zero-capacity set
    #[error("this set has a capacity of 0")]
    DomainEmpty,

    #[error("element {element} is outside of the range [0, {capacity})")]
    OutOfRange { element: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, SetError>;

/// Common surface of every element-set representation the benchmark harness
/// compares against [`FixedSet`](crate::sets::fixed::FixedSet).
///
/// Elements are always drawn from `[0, capacity)`; callers are expected to stay
/// in range, so implementations may panic otherwise.
pub trait ElementSet {
    /// Human readable name used in benchmark reports.
    const NAME: &'static str;

    fn with_capacity(capacity: usize) -> Self;

    /// Returns whether `element` was newly inserted.
    fn insert(&mut self, element: usize) -> bool;

    /// Returns whether `element` was present.
    fn remove(&mut self, element: usize) -> bool;

    fn contains(&self, element: usize) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

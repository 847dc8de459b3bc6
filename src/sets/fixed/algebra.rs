use std::ops::Not;

use crate::error::Result;
use crate::sets::fixed::FixedSet;

/// Boolean algebra and comparisons between sets over the same universe.
///
/// Every binary operation fails with
/// [`SetError::CapacityMismatch`](crate::error::SetError::CapacityMismatch)
/// when the capacities differ, leaving both operands untouched.
impl FixedSet {
    fn combine_with(&mut self, other: &FixedSet, op: impl Fn(u64, u64) -> u64) -> Result<()> {
        self.validate_same_capacity(other)?;

        for (mine, theirs) in self.words.iter_mut().zip(other.words.iter()) {
            *mine = op(*mine, *theirs);
        }
        self.recount();
        Ok(())
    }

    /// In-place union.
    pub fn union_with(&mut self, other: &FixedSet) -> Result<()> {
        self.combine_with(other, |a, b| a | b)
    }

    /// In-place intersection.
    pub fn intersect_with(&mut self, other: &FixedSet) -> Result<()> {
        self.combine_with(other, |a, b| a & b)
    }

    /// In-place difference: removes from `self` every element of `other`.
    pub fn difference_with(&mut self, other: &FixedSet) -> Result<()> {
        self.combine_with(other, |a, b| a & !b)
    }

    /// ```
    /// use binset::sets::fixed::FixedSet;
    ///
    /// let a = FixedSet::from_elements(10, [1, 3, 5]).unwrap();
    /// let b = FixedSet::from_elements(10, [3, 5, 7]).unwrap();
    /// assert_eq!(a.union(&b).unwrap().sparse().unwrap(), vec![1, 3, 5, 7]);
    /// ```
    pub fn union(&self, other: &FixedSet) -> Result<FixedSet> {
        let mut result = self.clone();
        result.union_with(other)?;
        Ok(result)
    }

    pub fn intersection(&self, other: &FixedSet) -> Result<FixedSet> {
        let mut result = self.clone();
        result.intersect_with(other)?;
        Ok(result)
    }

    /// Elements of `self` that are not in `other`.
    pub fn difference(&self, other: &FixedSet) -> Result<FixedSet> {
        let mut result = self.clone();
        result.difference_with(other)?;
        Ok(result)
    }

    /// Every element of the universe that is not in `self`.
    pub fn complement(&self) -> FixedSet {
        let mut result = FixedSet {
            words: self.words.iter().map(|word| !word).collect(),
            capacity: self.capacity,
            size: 0,
        };
        result.mask_tail();
        result.recount();
        result
    }

    /// Checked equality. Unlike `==`, comparing sets of different capacities
    /// is an error rather than `false`.
    pub fn equals(&self, other: &FixedSet) -> Result<bool> {
        self.validate_same_capacity(other)?;
        Ok(self.words == other.words)
    }

    pub fn not_equals(&self, other: &FixedSet) -> Result<bool> {
        self.equals(other).map(|equal| !equal)
    }

    /// Returns `true` if the sets share at least one element.
    pub fn intersects(&self, other: &FixedSet) -> Result<bool> {
        self.validate_same_capacity(other)?;
        Ok(self
            .words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0))
    }

    /// Returns `true` if every element of `other` is also in `self`.
    pub fn is_superset_of(&self, other: &FixedSet) -> Result<bool> {
        self.validate_same_capacity(other)?;
        Ok(self
            .words
            .iter()
            .zip(other.words.iter())
            .all(|(mine, theirs)| !mine & theirs == 0))
    }

    pub fn is_subset_of(&self, other: &FixedSet) -> Result<bool> {
        other.is_superset_of(self)
    }
}

impl Not for &FixedSet {
    type Output = FixedSet;

    fn not(self) -> FixedSet {
        self.complement()
    }
}

impl Not for FixedSet {
    type Output = FixedSet;

    fn not(self) -> FixedSet {
        self.complement()
    }
}

use std::fmt;

use crate::error::{Result, SetError};
use crate::sets::fixed::Iter;

pub(crate) const WORD_BITS: usize = u64::BITS as usize;

/// A set of elements drawn from the fixed universe `[0, capacity)`, packed
/// into a contiguous buffer of `u64` words.
///
/// Bits past `capacity` in the last word are always zero, and the element
/// count is cached so that [`len`](FixedSet::len) is `O(1)`.
///
/// # Examples
///
/// ```
/// use binset::sets::fixed::FixedSet;
///
/// let mut bs = FixedSet::new(10).unwrap();
/// assert!(!bs.contains(3).unwrap());
///
/// assert!(bs.add(3).unwrap());
/// assert!(bs.contains(3).unwrap());
/// assert_eq!(bs.to_string(), "[---X------]");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct FixedSet {
    pub(super) words: Box<[u64]>,
    pub(super) capacity: usize,
    pub(super) size: usize,
}

impl FixedSet {
    /// Constructs an empty [`FixedSet`] over `[0, capacity)`.
    ///
    /// # Errors
    /// [`SetError::InvalidCapacity`] if `capacity == 0`. A zero-capacity set can
    /// only be obtained through [`Default`].
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SetError::InvalidCapacity);
        }

        Ok(FixedSet {
            words: vec![0u64; capacity.div_ceil(WORD_BITS)].into_boxed_slice(),
            capacity,
            size: 0,
        })
    }

    /// Constructs a [`FixedSet`] holding every element of `[0, capacity)`.
    ///
    /// ```
    /// use binset::sets::fixed::FixedSet;
    ///
    /// let bs = FixedSet::filled(13).unwrap();
    /// assert_eq!(bs.len(), 13);
    /// assert_eq!(bs.to_string(), "[XXXXXXXXXXXXX]");
    /// ```
    pub fn filled(capacity: usize) -> Result<Self> {
        let mut set = Self::new(capacity)?;
        set.fill();
        Ok(set)
    }

    /// Builds a set from a list of elements. Repeated elements are fine.
    ///
    /// ```
    /// use binset::sets::fixed::FixedSet;
    ///
    /// let bs = FixedSet::from_elements(8, [1, 3, 3]).unwrap();
    /// assert_eq!(bs.sparse().unwrap(), vec![1, 3]);
    /// ```
    pub fn from_elements<I>(capacity: usize, elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::new(capacity)?;
        for element in elements {
            set.add(element)?;
        }
        Ok(set)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of elements currently present.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if no bit of the backing store is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// Adds `element`, returning whether it was absent before.
    ///
    /// # Errors
    /// [`SetError::DomainEmpty`] on a zero-capacity set,
    /// [`SetError::OutOfRange`] if `element >= capacity`.
    pub fn add(&mut self, element: usize) -> Result<bool> {
        self.validate_element(element)?;
        if self.get_bit(element) {
            return Ok(false);
        }

        self.words[element / WORD_BITS] |= 1u64 << (element % WORD_BITS);
        self.size += 1;
        Ok(true)
    }

    /// Removes `element`, returning whether it was present before.
    ///
    /// # Errors
    /// Same as [`add`](FixedSet::add).
    pub fn remove(&mut self, element: usize) -> Result<bool> {
        self.validate_element(element)?;
        if !self.get_bit(element) {
            return Ok(false);
        }

        self.words[element / WORD_BITS] &= !(1u64 << (element % WORD_BITS));
        self.size -= 1;
        Ok(true)
    }

    /// # Errors
    /// Same as [`add`](FixedSet::add).
    pub fn contains(&self, element: usize) -> Result<bool> {
        self.validate_element(element)?;
        Ok(self.get_bit(element))
    }

    /// Unchecked bit test for callers that already validated the capacity.
    #[inline]
    pub(crate) fn get_bit(&self, index: usize) -> bool {
        debug_assert!(index < self.capacity);
        self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
        self.size = 0;
    }

    pub fn fill(&mut self) {
        self.words.fill(!0u64);
        self.mask_tail();
        self.size = self.capacity;
    }

    /// All present elements, in ascending order.
    ///
    /// # Errors
    /// [`SetError::DomainEmpty`] on a zero-capacity set.
    pub fn sparse(&self) -> Result<Vec<usize>> {
        if self.capacity == 0 {
            return Err(SetError::DomainEmpty);
        }
        Ok(self.iter().collect())
    }

    /// Lazily iterates over present elements in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self, 0)
    }

    /// Like [`iter`](FixedSet::iter), but starting at `position`. If `position`
    /// is absent the iterator skips ahead to the next present element.
    ///
    /// ```
    /// use binset::sets::fixed::FixedSet;
    ///
    /// let bs = FixedSet::from_elements(10, [2, 5, 7]).unwrap();
    /// assert_eq!(bs.iter_from(3).collect::<Vec<_>>(), vec![5, 7]);
    /// ```
    pub fn iter_from(&self, position: usize) -> Iter<'_> {
        Iter::new(self, position)
    }

    /// Zeroes the pad bits of the last word.
    pub(super) fn mask_tail(&mut self) {
        let used_bits = self.capacity % WORD_BITS;
        if used_bits == 0 {
            return;
        }
        if let Some(last) = self.words.last_mut() {
            *last &= (1u64 << used_bits) - 1;
        }
    }

    /// Recomputes the cached size after a bulk word operation.
    pub(super) fn recount(&mut self) {
        self.size = self
            .words
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum();
    }

    pub(super) fn validate_same_capacity(&self, other: &FixedSet) -> Result<()> {
        if self.capacity != other.capacity {
            return Err(SetError::CapacityMismatch {
                expected: self.capacity,
                found: other.capacity,
            });
        }
        Ok(())
    }

    fn validate_element(&self, element: usize) -> Result<()> {
        if self.capacity == 0 {
            return Err(SetError::DomainEmpty);
        }
        if element >= self.capacity {
            return Err(SetError::OutOfRange {
                element,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FixedSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl fmt::Display for FixedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: String = (0..self.capacity)
            .map(|i| if self.get_bit(i) { 'X' } else { '-' })
            .collect();
        write!(f, "[{rendered}]")
    }
}

impl fmt::Debug for FixedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedSet")
            .field("capacity", &self.capacity)
            .field("size", &self.size)
            .field("bits", &format_args!("{self}"))
            .finish()
    }
}

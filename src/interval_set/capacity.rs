use super::IntervalSet;
use crate::range::Range;
use crate::raw::RawIntervalSet;

impl IntervalSet {
    /// Creates a set covering all of `universe`, with room for at least `capacity` tree nodes.
    ///
    /// Each removal that splits a remaining range allocates two nodes, so a caller expecting
    /// `n` such removals can pass `2 * n + 1` to avoid reallocating.
    ///
    /// # Panics
    ///
    /// Panics if `universe` is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use subrange_tree::{IntervalSet, Range};
    ///
    /// let set = IntervalSet::with_capacity(Range::new(0, 99), 33);
    /// assert!(set.capacity() >= 33);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(universe: Range, capacity: usize) -> Self {
        assert!(universe.is_valid(), "`IntervalSet::with_capacity()` - `universe` is invalid!");
        IntervalSet {
            raw: RawIntervalSet::with_capacity(universe, capacity),
        }
    }

    /// Returns the number of tree nodes the set can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}

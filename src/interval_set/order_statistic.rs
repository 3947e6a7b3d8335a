use super::IntervalSet;
use crate::range::{Count, Range};

impl IntervalSet {
    /// Returns the selectable sub-interval at position `k`.
    ///
    /// Positions are zero-based. Remaining ranges are visited from left to right, and the
    /// sub-intervals of each range follow [`Range::find_kth`]'s order. The set is not modified.
    ///
    /// # Panics
    ///
    /// Panics if `k >= self.total_count()`. Use [`get`](IntervalSet::get) for a non-panicking
    /// lookup.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use subrange_tree::{IntervalSet, Range};
    ///
    /// let mut set = IntervalSet::new(Range::new(0, 4));
    /// set.remove(&Range::new(1, 2));
    ///
    /// // Remaining: [0, 0] then [3, 4].
    /// assert_eq!(set.find_nth(0), Range::new(0, 0));
    /// assert_eq!(set.find_nth(1), Range::new(3, 3));
    /// assert_eq!(set.find_nth(3), Range::new(4, 4));
    /// ```
    #[must_use]
    pub fn find_nth(&self, k: Count) -> Range {
        assert!(k < self.total_count(), "`IntervalSet::find_nth()` - `k` >= total count!");
        self.raw.find_nth(k)
    }

    /// Returns the selectable sub-interval at position `k`, or `None` if `k` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use subrange_tree::{IntervalSet, Range};
    ///
    /// let set = IntervalSet::new(Range::new(0, 1));
    /// assert_eq!(set.get(2), Some(Range::new(1, 1)));
    /// assert_eq!(set.get(3), None);
    /// ```
    #[must_use]
    pub fn get(&self, k: Count) -> Option<Range> {
        (k < self.total_count()).then(|| self.raw.find_nth(k))
    }
}

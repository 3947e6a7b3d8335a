use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::range::{Count, Range};
use crate::raw::{Handle, Node, RawIntervalSet};

mod capacity;
mod order_statistic;

/// The remaining part of an integer universe, queried by sub-interval rank.
///
/// An `IntervalSet` starts out covering a universe `[A, B]` and represents what is left of it
/// as a sorted list of disjoint, maximal *remaining ranges*. Every contiguous sub-interval of a
/// remaining range is *selectable*; [`find_nth`] returns the `k`-th selectable sub-interval and
/// [`remove`] takes a sub-interval out of the set, shrinking or splitting the range that holds
/// it.
///
/// Selectable sub-intervals are ordered range by range from left to right, and within one range
/// by start ascending, then end ascending (see [`Range::find_kth`]).
///
/// Internally the remaining ranges are the leaves of an AVL tree whose nodes carry subtree
/// counts, so both operations take O(log n) time in the number of remaining ranges. Nodes live
/// in an append-only arena that grows by two slots for every removal that splits a range.
///
/// [`find_nth`]: IntervalSet::find_nth
/// [`remove`]: IntervalSet::remove
///
/// # Examples
///
/// ```
/// use subrange_tree::{IntervalSet, Range};
///
/// let mut set = IntervalSet::new(Range::new(0, 4));
/// assert_eq!(set.total_count(), 15);
///
/// // Pick a sub-interval by rank and take it out.
/// let picked = set.find_nth(6);
/// assert_eq!(picked, Range::new(1, 2));
/// assert!(set.remove(&picked));
///
/// // `[0, 0]` and `[3, 4]` remain: 1 + 3 selectable sub-intervals.
/// assert_eq!(set.total_count(), 4);
/// assert!(set.ranges().eq([Range::new(0, 0), Range::new(3, 4)]));
///
/// // A sub-interval that crosses the hole is not selectable.
/// assert!(!set.remove(&Range::new(0, 3)));
/// ```
#[derive(Clone)]
pub struct IntervalSet {
    raw: RawIntervalSet,
}

/// An iterator over the remaining ranges of an `IntervalSet`, in ascending order.
///
/// This `struct` is created by the [`ranges`] method on [`IntervalSet`].
/// See its documentation for more.
///
/// [`ranges`]: IntervalSet::ranges
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Ranges<'a> {
    raw: &'a RawIntervalSet,
    stack: SmallVec<[Handle; 64]>,
}

impl IntervalSet {
    /// Creates a set covering all of `universe`.
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
    /// let set = IntervalSet::new(Range::new(1, 3));
    /// assert_eq!(set.total_count(), 6);
    /// ```
    #[must_use]
    pub fn new(universe: Range) -> Self {
        assert!(universe.is_valid(), "`IntervalSet::new()` - `universe` is invalid!");
        Self::with_capacity(universe, 1)
    }

    /// Creates a set covering all of `universe`, or returns `None` if `universe` is invalid.
    ///
    /// This is the non-panicking form of [`IntervalSet::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use subrange_tree::{IntervalSet, Range};
    ///
    /// assert!(IntervalSet::try_new(Range::new(0, 9)).is_some());
    /// assert!(IntervalSet::try_new(Range::EMPTY).is_none());
    /// ```
    #[must_use]
    pub fn try_new(universe: Range) -> Option<Self> {
        universe.is_valid().then(|| Self::new(universe))
    }

    /// Returns the range the set was created over.
    #[must_use]
    pub fn universe(&self) -> Range {
        self.raw.universe()
    }

    /// Returns the number of selectable sub-intervals.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn total_count(&self) -> Count {
        self.raw.total_count()
    }

    /// Returns true if the whole universe has been removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// Returns true if `target` lies entirely within one remaining range, that is, if
    /// [`remove`](IntervalSet::remove) would succeed.
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
    /// let mut set = IntervalSet::new(Range::new(0, 9));
    /// set.remove(&Range::new(5, 5));
    /// assert!(set.contains(&Range::new(0, 4)));
    /// assert!(!set.contains(&Range::new(4, 6)));
    /// ```
    #[must_use]
    pub fn contains(&self, target: &Range) -> bool {
        self.raw.contains(target)
    }

    /// Removes `target` from the set.
    ///
    /// Returns true if `target` was a selectable sub-interval and has been removed. Afterwards
    /// no remaining range overlaps `target`. Returns false, leaving the set untouched, if
    /// `target` is invalid, reaches outside the universe, crosses a hole left by an earlier
    /// removal, or overlaps removed values in any other way.
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
    /// assert!(!set.remove(&Range::new(0, 5)));
    /// assert!(set.remove(&Range::new(1, 3)));
    /// assert!(!set.remove(&Range::new(1, 3)));
    /// assert_eq!(set.total_count(), 2);
    /// ```
    pub fn remove(&mut self, target: &Range) -> bool {
        self.raw.remove(target)
    }

    /// Returns the height of the underlying tree. A set with a single remaining range has
    /// height 0.
    ///
    /// The tree is kept AVL-balanced, so the height stays logarithmic in the number of
    /// remaining ranges.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.raw.height()
    }

    /// Returns the number of tree nodes allocated so far.
    ///
    /// Nodes are never reclaimed: this starts at 1 and grows by 2 for each removal that splits a
    /// range in two.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.raw.node_count()
    }

    /// Gets an iterator over the remaining ranges, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use subrange_tree::{IntervalSet, Range};
    ///
    /// let mut set = IntervalSet::new(Range::new(0, 9));
    /// set.remove(&Range::new(3, 4));
    /// set.remove(&Range::new(9, 9));
    ///
    /// let ranges: Vec<_> = set.ranges().collect();
    /// assert_eq!(ranges, [Range::new(0, 2), Range::new(5, 8)]);
    /// ```
    pub fn ranges(&self) -> Ranges<'_> {
        let mut stack = SmallVec::new();
        stack.push(Handle::ROOT);
        Ranges { raw: &self.raw, stack }
    }
}

impl fmt::Debug for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ranges()).finish()
    }
}

impl<'a> Iterator for Ranges<'a> {
    type Item = Range;

    fn next(&mut self) -> Option<Range> {
        while let Some(handle) = self.stack.pop() {
            let node: &Node = self.raw.node(handle);
            if let Some((left, right)) = node.children() {
                self.stack.push(right);
                self.stack.push(left);
            } else if !node.is_dead() {
                return Some(node.span());
            }
        }
        None
    }
}

impl FusedIterator for Ranges<'_> {}

impl fmt::Debug for Ranges<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ranges").field("pending", &self.stack.len()).finish()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = Range;
    type IntoIter = Ranges<'a>;

    fn into_iter(self) -> Ranges<'a> {
        self.ranges()
    }
}

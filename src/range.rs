use core::fmt;
use core::iter::FusedIterator;
use core::ops::RangeInclusive;

/// The type used for sub-interval counts and ranks.
///
/// A range of length `n` holds `n * (n + 1) / 2` sub-intervals, which does not fit in
/// 64 bits once `n` exceeds 2^32. `u128` covers the whole `i64` universe.
pub type Count = u128;

/// A closed integer interval `[a, b]`.
///
/// A `Range` with `a > b` is *invalid* and stands for "nothing here". Invalid ranges are
/// never rejected on construction; [`Range::EMPTY`] is the canonical one.
///
/// # Examples
///
/// ```
/// use subrange_tree::Range;
///
/// let range = Range::new(0, 4);
/// assert_eq!(range.len(), 5);
/// assert_eq!(range.sub_interval_count(), 15);
/// assert_eq!(range.find_kth(6), Range::new(1, 2));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Range {
    a: i64,
    b: i64,
}

impl Range {
    /// The canonical invalid range.
    pub const EMPTY: Self = Self::new(1, 0);

    /// Creates the range `[a, b]`. Passing `a > b` produces an invalid range.
    #[inline]
    #[must_use]
    pub const fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// Returns the lower bound.
    #[inline]
    #[must_use]
    pub const fn a(&self) -> i64 {
        self.a
    }

    /// Returns the upper bound.
    #[inline]
    #[must_use]
    pub const fn b(&self) -> i64 {
        self.b
    }

    /// Returns true if `a <= b`.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.a <= self.b
    }

    /// Returns the number of integers in the range, or 0 if it is invalid.
    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    #[allow(clippy::cast_sign_loss)]
    pub const fn len(&self) -> Count {
        if self.is_valid() {
            (self.b as i128 - self.a as i128 + 1) as Count
        } else {
            0
        }
    }

    /// Returns the number of sub-intervals `[x, y]` with `a <= x <= y <= b`.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn sub_interval_count(&self) -> Count {
        triangular(self.len())
    }

    /// Returns true if `other` lies entirely within `self`, boundaries included.
    #[inline]
    #[must_use]
    pub const fn contains(&self, other: &Range) -> bool {
        self.a <= other.a && other.b <= self.b
    }

    /// Returns true if `other` lies within `self` without touching either boundary.
    #[inline]
    #[must_use]
    pub const fn strictly_contains(&self, other: &Range) -> bool {
        self.a < other.a && other.b < self.b
    }

    /// Returns the `k`-th (zero-based) sub-interval in canonical order.
    ///
    /// Sub-intervals are ordered by start ascending, then by end ascending, so for `[0, 2]`
    /// the order is `[0,0] [0,1] [0,2] [1,1] [1,2] [2,2]`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= self.sub_interval_count()`.
    ///
    /// # Complexity
    ///
    /// O(log n) where n is the length of the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use subrange_tree::Range;
    ///
    /// assert_eq!(Range::new(3, 7).find_kth(8), Range::new(4, 7));
    /// assert_eq!(Range::new(1, 1000).find_kth(500_499), Range::new(1000, 1000));
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn find_kth(&self, k: Count) -> Range {
        assert!(k < self.sub_interval_count(), "`Range::find_kth()` - `k` >= sub-interval count!");

        let d = self.len();
        let before = |x: Count| preceding(d, x);

        // Gallop to bracket the start offset, then close in on it.
        let mut x: Count = 0;
        let mut step: Count = 1;
        while x + step < d && before(x + step) <= k {
            x += step;
            step <<= 1;
        }
        while step > 0 {
            if x + step < d && before(x + step) <= k {
                x += step;
            }
            step >>= 1;
        }

        let remainder = k - before(x);
        // Both offsets are below `d`, so the bounds stay within `[a, b]`.
        let start = (self.a as i128 + x as i128) as i64;
        let end = (start as i128 + remainder as i128) as i64;
        Range::new(start, end)
    }

    /// Returns an iterator over every sub-interval in canonical order.
    ///
    /// # Examples
    ///
    /// ```
    /// use subrange_tree::Range;
    ///
    /// let all: Vec<_> = Range::new(0, 1).sub_intervals().collect();
    /// assert_eq!(all, [Range::new(0, 0), Range::new(0, 1), Range::new(1, 1)]);
    /// ```
    pub fn sub_intervals(&self) -> SubIntervals {
        SubIntervals {
            outer: *self,
            next: if self.is_valid() { Some(Range::new(self.a, self.a)) } else { None },
        }
    }
}

/// `n * (n + 1) / 2`, halving whichever factor is even first.
#[inline]
const fn triangular(n: Count) -> Count {
    if n % 2 == 0 { (n / 2) * (n + 1) } else { n * n.div_ceil(2) }
}

/// The number of sub-intervals of a length-`d` range whose start offset is below `x`.
#[inline]
const fn preceding(d: Count, x: Count) -> Count {
    if x == 0 { 0 } else { x * d - triangular(x - 1) }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.a, self.b)
    }
}

impl From<RangeInclusive<i64>> for Range {
    fn from(range: RangeInclusive<i64>) -> Self {
        Range::new(*range.start(), *range.end())
    }
}

/// An iterator over the sub-intervals of a [`Range`] in canonical order.
///
/// This `struct` is created by [`Range::sub_intervals`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone, Debug)]
pub struct SubIntervals {
    outer: Range,
    next: Option<Range>,
}

impl Iterator for SubIntervals {
    type Item = Range;

    fn next(&mut self) -> Option<Range> {
        let current = self.next?;
        self.next = if current.b < self.outer.b {
            Some(Range::new(current.a, current.b + 1))
        } else if current.a < self.outer.b {
            Some(Range::new(current.a + 1, current.a + 1))
        } else {
            None
        };
        Some(current)
    }
}

impl FusedIterator for SubIntervals {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    #[test]
    fn find_kth_known_values() {
        assert_eq!(Range::new(0, 0).find_kth(0), Range::new(0, 0));
        assert_eq!(Range::new(0, 1).find_kth(0), Range::new(0, 0));
        assert_eq!(Range::new(0, 5).find_kth(0), Range::new(0, 0));
        assert_eq!(Range::new(3, 7).find_kth(8), Range::new(4, 7));
        assert_eq!(Range::new(1, 2).find_kth(2), Range::new(2, 2));
        assert_eq!(Range::new(1, 1000).find_kth(500_499), Range::new(1000, 1000));
    }

    #[test]
    fn find_kth_negative_bounds() {
        let range = Range::new(-3, -1);
        assert_eq!(range.find_kth(0), Range::new(-3, -3));
        assert_eq!(range.find_kth(2), Range::new(-3, -1));
        assert_eq!(range.find_kth(5), Range::new(-1, -1));
    }

    #[test]
    fn find_kth_full_universe() {
        let range = Range::new(i64::MIN, i64::MAX);
        let total = range.sub_interval_count();
        assert_eq!(range.len(), 1 << 64);
        assert_eq!(total, (1u128 << 63) * ((1u128 << 64) + 1));
        assert_eq!(range.find_kth(0), Range::new(i64::MIN, i64::MIN));
        assert_eq!(range.find_kth(total - 1), Range::new(i64::MAX, i64::MAX));
        assert_eq!(range.find_kth(total - 2), Range::new(i64::MAX - 1, i64::MAX));
    }

    #[test]
    #[should_panic(expected = "`Range::find_kth()` - `k` >= sub-interval count!")]
    fn find_kth_out_of_bounds() {
        let _ = Range::new(0, 4).find_kth(15);
    }

    #[test]
    #[should_panic(expected = "`Range::find_kth()` - `k` >= sub-interval count!")]
    fn find_kth_on_empty() {
        let _ = Range::EMPTY.find_kth(0);
    }

    #[test]
    fn contains() {
        assert!(Range::new(0, 4).contains(&Range::new(0, 0)));
        assert!(Range::new(0, 4).contains(&Range::new(4, 4)));
        assert!(Range::new(0, 4).contains(&Range::new(0, 4)));
        assert!(Range::new(0, 4).contains(&Range::new(1, 3)));
        assert!(!Range::new(0, 4).contains(&Range::new(1, 5)));
        assert!(!Range::new(0, 4).contains(&Range::new(5, 5)));
        assert!(!Range::new(2, 4).contains(&Range::new(0, 1)));
    }

    #[test]
    fn strictly_contains() {
        assert!(!Range::new(0, 4).strictly_contains(&Range::new(0, 0)));
        assert!(!Range::new(0, 4).strictly_contains(&Range::new(4, 4)));
        assert!(!Range::new(0, 4).strictly_contains(&Range::new(0, 4)));
        assert!(Range::new(0, 4).strictly_contains(&Range::new(1, 1)));
        assert!(Range::new(0, 4).strictly_contains(&Range::new(1, 2)));
        assert!(Range::new(0, 4).strictly_contains(&Range::new(1, 3)));
        assert!(Range::new(0, 4).strictly_contains(&Range::new(2, 3)));
        assert!(Range::new(0, 4).strictly_contains(&Range::new(3, 3)));
        assert!(!Range::new(0, 4).strictly_contains(&Range::new(1, 5)));
        assert!(!Range::new(0, 4).strictly_contains(&Range::new(5, 5)));
        assert!(!Range::new(2, 4).strictly_contains(&Range::new(0, 1)));
    }

    #[test]
    fn empty_range() {
        assert!(!Range::EMPTY.is_valid());
        assert_eq!(Range::EMPTY.len(), 0);
        assert_eq!(Range::EMPTY.sub_interval_count(), 0);
        assert_eq!(Range::EMPTY.sub_intervals().count(), 0);
        assert_eq!(Range::new(7, 3).sub_interval_count(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(alloc::format!("{}", Range::new(-2, 5)), "[-2, 5]");
        assert_eq!(Range::from(1..=3), Range::new(1, 3));
    }

    proptest! {
        #[test]
        fn find_kth_matches_enumeration(a in -50i64..50, len in 1i64..40) {
            let range = Range::new(a, a + len - 1);
            let all: Vec<Range> = range.sub_intervals().collect();
            prop_assert_eq!(all.len() as Count, range.sub_interval_count());
            for (k, expected) in all.iter().enumerate() {
                prop_assert_eq!(range.find_kth(k as Count), *expected);
            }
        }

        #[test]
        fn find_kth_stays_inside(a in any::<i32>(), len in 1u32..=u32::MAX, k in any::<u64>()) {
            let a = i64::from(a);
            let range = Range::new(a, a + i64::from(len) - 1);
            let k = Count::from(k) % range.sub_interval_count();
            let found = range.find_kth(k);
            prop_assert!(found.is_valid());
            prop_assert!(range.contains(&found));
        }
    }
}

//! Order-statistic selection over the sub-intervals of a shrinking integer range.
//!
//! This crate provides [`IntervalSet`], which starts out covering an integer universe `[A, B]`
//! and supports two O(log n) operations over *every contiguous sub-interval* of what remains:
//!
//! - [`find_nth`](IntervalSet::find_nth) - Get the sub-interval at a given rank
//! - [`remove`](IntervalSet::remove) - Take a sub-interval out, splitting or shrinking the
//!   remaining range that holds it
//!
//! # Example
//!
//! ```
//! use subrange_tree::{IntervalSet, Range};
//!
//! // [0, 4] has 5 + 4 + 3 + 2 + 1 = 15 sub-intervals.
//! let mut set = IntervalSet::new(Range::new(0, 4));
//! assert_eq!(set.total_count(), 15);
//!
//! // Ranks run by start, then by end: [0,0] [0,1] .. [0,4] [1,1] [1,2] ..
//! let picked = set.find_nth(6);
//! assert_eq!(picked, Range::new(1, 2));
//!
//! // Removing it leaves [0, 0] and [3, 4].
//! assert!(set.remove(&picked));
//! assert_eq!(set.total_count(), 4);
//! assert!(!set.remove(&picked));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **`invariant-checks`** (default) - Internal consistency assertions on every mutation.
//!   Disabling it is expected to make removal-heavy workloads roughly a third to a half faster
//!   and does not change results; precondition checks such as out-of-range ranks always stay
//!   on. Compare `cargo bench` against `cargo bench --no-default-features` to measure it.
//!
//! # Implementation
//!
//! The remaining ranges are the leaves of an AVL tree stored in an append-only arena. Each
//! internal node tracks the span of its subtree, the number of selectable sub-intervals below
//! it and its height. Removal walks down to the leaf holding the target, carves the target out,
//! then re-derives every ancestor bottom-up, collapsing emptied leaves into their siblings and
//! rotating where the AVL bound breaks.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod range;
mod raw;

pub mod interval_set;

pub use interval_set::IntervalSet;
pub use range::{Count, Range, SubIntervals};

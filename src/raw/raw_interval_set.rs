use log::{debug, trace};
use smallvec::SmallVec;

use crate::range::{Count, Range};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{InternalNode, Node};

/// The AVL tree backing `IntervalSet`.
#[derive(Clone)]
pub(crate) struct RawIntervalSet {
    /// Arena storing all tree nodes. The root is always at [`Handle::ROOT`].
    nodes: Arena<Node>,
    /// The range the tree was built over.
    universe: Range,
}

/// Ancestors visited on the way down, root first.
///
/// An AVL tree of height h holds at least fib(h + 2) - 1 nodes, so 64 entries cover any
/// tree a 32-bit handle can address.
type Path = SmallVec<[Handle; 64]>;

impl RawIntervalSet {
    /// Creates a tree with a single leaf covering `universe`.
    pub(crate) fn with_capacity(universe: Range, capacity: usize) -> Self {
        assert!(universe.is_valid(), "`RawIntervalSet::with_capacity()` - `universe` is invalid!");

        let mut nodes = Arena::with_capacity(capacity.max(1));
        let root = nodes.alloc(Node::new_leaf(universe));
        invariant!(root == Handle::ROOT);
        debug!("created interval set over {universe} ({} sub-intervals)", universe.sub_interval_count());

        Self { nodes, universe }
    }

    /// Returns the range the tree was built over.
    pub(crate) const fn universe(&self) -> Range {
        self.universe
    }

    /// Returns the capacity of the node arena.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of nodes ever allocated, unreachable ones included.
    pub(crate) const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    /// Returns the number of selectable sub-intervals.
    #[inline]
    pub(crate) fn total_count(&self) -> Count {
        self.node(Handle::ROOT).count()
    }

    /// Returns the height of the tree; a single leaf has height 0.
    #[inline]
    pub(crate) fn height(&self) -> u32 {
        self.node(Handle::ROOT).depth()
    }

    /// Returns the `k`-th selectable sub-interval.
    ///
    /// The caller guarantees `k < self.total_count()`.
    pub(crate) fn find_nth(&self, k: Count) -> Range {
        let mut current = Handle::ROOT;
        let mut remaining = k;

        loop {
            match self.node(current) {
                Node::Internal(internal) => {
                    invariant!(
                        remaining < internal.count(),
                        "find_nth: count invariant violated - rank {} not below subtree count {} at {:?}",
                        remaining,
                        internal.count(),
                        current
                    );
                    let left_count = self.node(internal.left()).count();
                    if remaining < left_count {
                        current = internal.left();
                    } else {
                        remaining -= left_count;
                        current = internal.right();
                    }
                }
                Node::Leaf(leaf) => return leaf.range().find_kth(remaining),
            }
        }
    }

    /// Returns true if `target` is a sub-interval of a single remaining range.
    pub(crate) fn contains(&self, target: &Range) -> bool {
        let mut path = Path::new();
        self.locate(target, &mut path).is_some()
    }

    /// Removes `target` from the remaining ranges.
    ///
    /// Returns false, leaving the tree untouched, unless `target` lies entirely within one
    /// remaining range.
    pub(crate) fn remove(&mut self, target: &Range) -> bool {
        let mut path = Path::new();
        let Some(leaf) = self.locate(target, &mut path) else {
            trace!("{target} is not present");
            return false;
        };

        self.carve(leaf, target);

        // Fix up aggregates bottom-up, collapsing dead leaves before any rotation.
        while let Some(ancestor) = path.pop() {
            self.refresh(ancestor);
        }

        true
    }

    /// Finds the leaf whose range contains `target`, recording the internal nodes visited.
    fn locate(&self, target: &Range, path: &mut Path) -> Option<Handle> {
        if !target.is_valid() {
            return None;
        }

        let mut current = Handle::ROOT;
        loop {
            let node = self.node(current);
            if !node.span().contains(target) {
                return None;
            }
            match node {
                Node::Leaf(_) => return Some(current),
                Node::Internal(internal) => {
                    path.push(current);
                    current = if self.node(internal.left()).span().contains(target) {
                        internal.left()
                    } else {
                        // Either the right child holds it, or `target` spans the gap and the
                        // containment check on the next iteration fails.
                        internal.right()
                    };
                }
            }
        }
    }

    /// Removes `target` from the leaf at `handle`, which must contain it.
    fn carve(&mut self, handle: Handle, target: &Range) {
        let range = self.node(handle).span();
        let (a, b) = (range.a(), range.b());
        let (ap, bp) = (target.a(), target.b());

        if range.strictly_contains(target) {
            let left = Node::new_leaf(Range::new(a, ap - 1));
            let right = Node::new_leaf(Range::new(bp + 1, b));
            let left_handle = self.nodes.alloc(left);
            let right_handle = self.nodes.alloc(right);
            *self.nodes.get_mut(handle) = Node::Internal(InternalNode::new(left_handle, &left, right_handle, &right));
            debug!("split {range} at {handle:?} around {target} into {left_handle:?} and {right_handle:?}");
            return;
        }

        let shrunk = if a < ap {
            invariant!(b <= bp);
            Range::new(a, ap - 1)
        } else if bp < b {
            invariant!(ap <= a);
            Range::new(bp + 1, b)
        } else {
            invariant!(ap == a && bp == b);
            Range::EMPTY
        };

        if shrunk.is_valid() {
            debug!("shrunk {range} at {handle:?} to {shrunk}");
        } else {
            debug!("exhausted {range} at {handle:?}");
        }
        *self.nodes.get_mut(handle) = Node::new_leaf(shrunk);
    }

    /// Re-derives the internal node at `handle` after one of its children changed.
    fn refresh(&mut self, handle: Handle) {
        let internal = self.node(handle).as_internal();
        let left = *self.node(internal.left());
        let right = *self.node(internal.right());

        if left.is_dead() {
            trace!("collapsing {handle:?} onto its right child");
            *self.nodes.get_mut(handle) = right;
            return;
        }
        if right.is_dead() {
            trace!("collapsing {handle:?} onto its left child");
            *self.nodes.get_mut(handle) = left;
            return;
        }

        self.nodes.get_mut(handle).as_internal_mut().update(&left, &right);
        self.rebalance(handle);
    }

    /// Recomputes the aggregates of the internal node at `handle` from its children.
    fn update(&mut self, handle: Handle) {
        let internal = self.node(handle).as_internal();
        let left = *self.node(internal.left());
        let right = *self.node(internal.right());
        self.nodes.get_mut(handle).as_internal_mut().update(&left, &right);
    }

    /// Restores the AVL balance bound at `handle`, whose children are both balanced.
    fn rebalance(&mut self, handle: Handle) {
        let internal = self.node(handle).as_internal();
        let (left, right) = (internal.left(), internal.right());
        let left_depth = self.node(left).depth();
        let right_depth = self.node(right).depth();

        if right_depth > left_depth + 1 {
            let heavy = self.node(right).as_internal();
            if self.node(heavy.left()).depth() > self.node(heavy.right()).depth() {
                self.rotate_right(right);
            }
            self.rotate_left(handle);
        } else if left_depth > right_depth + 1 {
            let heavy = self.node(left).as_internal();
            if self.node(heavy.right()).depth() > self.node(heavy.left()).depth() {
                self.rotate_left(left);
            }
            self.rotate_right(handle);
        }

        invariant!(
            {
                let internal = self.node(handle).as_internal();
                self.node(internal.left()).depth().abs_diff(self.node(internal.right()).depth()) <= 1
            },
            "rebalance: AVL bound violated at {:?}",
            handle
        );
    }

    /// Rotates the subtree at `handle` to the left, keeping its root at `handle`.
    ///
    /// `(l, (rl, rr))` becomes `((l, rl), rr)`; the old right child's slot holds the new
    /// left subtree.
    fn rotate_left(&mut self, handle: Handle) {
        let top = self.node(handle).as_internal();
        let (left, pivot) = (top.left(), top.right());
        let pivot_node = self.node(pivot).as_internal();
        let (inner, outer) = (pivot_node.left(), pivot_node.right());

        let lowered = self.nodes.get_mut(pivot).as_internal_mut();
        lowered.set_left(left);
        lowered.set_right(inner);
        self.update(pivot);

        let top = self.nodes.get_mut(handle).as_internal_mut();
        top.set_left(pivot);
        top.set_right(outer);
        self.update(handle);

        trace!("rotated left at {handle:?}");
    }

    /// Rotates the subtree at `handle` to the right, keeping its root at `handle`.
    ///
    /// `((ll, lr), r)` becomes `(ll, (lr, r))`; the old left child's slot holds the new
    /// right subtree.
    fn rotate_right(&mut self, handle: Handle) {
        let top = self.node(handle).as_internal();
        let (pivot, right) = (top.left(), top.right());
        let pivot_node = self.node(pivot).as_internal();
        let (outer, inner) = (pivot_node.left(), pivot_node.right());

        let lowered = self.nodes.get_mut(pivot).as_internal_mut();
        lowered.set_left(inner);
        lowered.set_right(right);
        self.update(pivot);

        let top = self.nodes.get_mut(handle).as_internal_mut();
        top.set_left(outer);
        top.set_right(pivot);
        self.update(handle);

        trace!("rotated right at {handle:?}");
    }
}

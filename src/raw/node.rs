use crate::range::{Count, Range};

use super::handle::Handle;

/// A node of the AVL tree.
///
/// Leaves hold one maximal remaining range each; internal nodes always have two children
/// whose leaves are non-empty. A leaf whose range is invalid is *dead*: its parent collapses
/// onto the surviving sibling on the way back up.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Node {
    Internal(InternalNode),
    Leaf(LeafNode),
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct InternalNode {
    // `[left.span().a(), right.span().b()]`, gaps between the children included.
    span: Range,
    left: Handle,
    right: Handle,
    // Selectable sub-intervals in this subtree.
    count: Count,
    depth: u32,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct LeafNode {
    range: Range,
}

impl Node {
    pub(crate) const fn new_leaf(range: Range) -> Self {
        Node::Leaf(LeafNode { range })
    }

    /// Returns the range covered by this subtree.
    #[inline]
    pub(crate) const fn span(&self) -> Range {
        match self {
            Node::Internal(internal) => internal.span,
            Node::Leaf(leaf) => leaf.range,
        }
    }

    /// Returns the number of selectable sub-intervals in this subtree.
    #[inline]
    pub(crate) const fn count(&self) -> Count {
        match self {
            Node::Internal(internal) => internal.count,
            Node::Leaf(leaf) => leaf.range.sub_interval_count(),
        }
    }

    /// Returns the height of this subtree; leaves are at 0.
    #[inline]
    pub(crate) const fn depth(&self) -> u32 {
        match self {
            Node::Internal(internal) => internal.depth,
            Node::Leaf(_) => 0,
        }
    }

    /// Returns true for a leaf whose range has been removed entirely.
    #[inline]
    pub(crate) const fn is_dead(&self) -> bool {
        matches!(self, Node::Leaf(leaf) if !leaf.range.is_valid())
    }

    /// Returns the children of an internal node.
    #[inline]
    pub(crate) const fn children(&self) -> Option<(Handle, Handle)> {
        match self {
            Node::Internal(internal) => Some((internal.left, internal.right)),
            Node::Leaf(_) => None,
        }
    }

    /// Returns the internal node, panicking if this is a leaf.
    pub(crate) fn as_internal(&self) -> &InternalNode {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("expected internal node"),
        }
    }

    /// Returns the internal node mutably, panicking if this is a leaf.
    pub(crate) fn as_internal_mut(&mut self) -> &mut InternalNode {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("expected internal node"),
        }
    }
}

impl InternalNode {
    /// Creates an internal node over two children, deriving its aggregates from them.
    pub(crate) fn new(left: Handle, left_node: &Node, right: Handle, right_node: &Node) -> Self {
        let mut internal = Self {
            span: Range::EMPTY,
            left,
            right,
            count: 0,
            depth: 0,
        };
        internal.update(left_node, right_node);
        internal
    }

    #[inline]
    pub(crate) const fn count(&self) -> Count {
        self.count
    }

    #[inline]
    pub(crate) const fn left(&self) -> Handle {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Handle {
        self.right
    }

    pub(crate) fn set_left(&mut self, left: Handle) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Handle) {
        self.right = right;
    }

    /// Recomputes span, count and depth from the current children.
    pub(crate) fn update(&mut self, left: &Node, right: &Node) {
        self.span = Range::new(left.span().a(), right.span().b());
        self.count = left.count() + right.count();
        self.depth = 1 + left.depth().max(right.depth());
    }
}

impl LeafNode {
    #[inline]
    pub(crate) const fn range(&self) -> Range {
        self.range
    }
}

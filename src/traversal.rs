//! Deterministic pre-order traversal used to drive renderers.
//!
//! Nodes come out depth-first, each node before its subtrees and the left
//! subtree before the right. Every [`Visit`] carries enough to draw the tree
//! without access to the nodes: the point, its depth and axis, and a link to
//! the parent's position in the same sequence together with the child slot
//! it occupies.

use std::iter::FusedIterator;

use crate::kdtree::Node;
use crate::point::{Axis, Point};

/// Child slot a node occupies under its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "binary tree nodes have two child slots")]
pub enum Side {
    /// Strictly-less subtree
    Left,
    /// Greater-or-equal subtree
    Right,
}

/// Reference from a visited node back to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParentLink {
    /// Position of the parent in the traversal sequence
    pub index: usize,
    /// Which child slot of the parent this node fills
    pub side: Side,
}

/// One node of the traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Visit {
    /// Position in the traversal sequence
    pub index: usize,
    /// Point stored at the node
    pub point: Point,
    /// Distance from the root, which has depth 0
    pub depth: usize,
    /// Splitting axis of the node, `depth mod 2`
    pub axis: Axis,
    /// `None` for the root
    pub parent: Option<ParentLink>,
}

impl Visit {
    /// Whether this is the first visit, the tree's root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Axis the parent compared on when this node was placed below it.
    ///
    /// `None` for the root. Otherwise the parent's level axis, which is the
    /// other axis from [`Visit::axis`].
    #[inline]
    pub fn placement_axis(&self) -> Option<Axis> {
        self.parent.map(|_| self.axis.next())
    }
}

#[derive(Debug)]
struct Pending<'a> {
    node: &'a Node,
    depth: usize,
    parent: Option<ParentLink>,
}

/// Iterator returned by [`crate::KdTree::traverse`].
///
/// Uses an explicit stack, so chain-shaped trees are walked without
/// recursion.
#[derive(Debug)]
pub struct PreOrder<'a> {
    stack: Vec<Pending<'a>>,
    next_index: usize,
}

impl<'a> PreOrder<'a> {
    pub(crate) fn new(root: Option<&'a Node>) -> Self {
        let stack = root
            .map(|node| Pending {
                node,
                depth: 0,
                parent: None,
            })
            .into_iter()
            .collect();
        Self {
            stack,
            next_index: 0,
        }
    }
}

impl Iterator for PreOrder<'_> {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        let Pending {
            node,
            depth,
            parent,
        } = self.stack.pop()?;
        let index = self.next_index;
        self.next_index += 1;

        // right first so the left subtree is popped next
        if let Some(right) = node.right() {
            self.stack.push(Pending {
                node: right,
                depth: depth + 1,
                parent: Some(ParentLink {
                    index,
                    side: Side::Right,
                }),
            });
        }
        if let Some(left) = node.left() {
            self.stack.push(Pending {
                node: left,
                depth: depth + 1,
                parent: Some(ParentLink {
                    index,
                    side: Side::Left,
                }),
            });
        }

        Some(Visit {
            index,
            point: node.point(),
            depth,
            axis: node.axis(),
            parent,
        })
    }
}

impl FusedIterator for PreOrder<'_> {}

//! Tree drawing geometry.
//!
//! Places the root at the horizontal middle of the canvas and every child
//! `level_spacing` below its parent, shifted left or right by an offset that
//! starts at a quarter of the canvas width and halves on each level. The
//! result is plain data; turning it into SVG, canvas calls or terminal art is
//! up to the caller.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::kdtree::KdTree;
use crate::traversal::{Side, Visit};

const DEFAULT_WIDTH: f64 = 1400.0;
const DEFAULT_TOP: f64 = 50.0;
const DEFAULT_LEVEL_SPACING: f64 = 100.0;

/// Canvas geometry used by [`Layout::compute`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Canvas width; the root sits at `width / 2`
    pub width: f64,
    /// Vertical position of the root
    pub top: f64,
    /// Vertical distance between consecutive levels
    pub level_spacing: f64,
}

impl LayoutConfig {
    /// Returns the config with a different canvas width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Returns the config with the root at a different height.
    #[must_use]
    pub fn with_top(mut self, top: f64) -> Self {
        self.top = top;
        self
    }

    /// Returns the config with a different distance between levels.
    #[must_use]
    pub fn with_level_spacing(mut self, level_spacing: f64) -> Self {
        self.level_spacing = level_spacing;
        self
    }

    /// Horizontal distance from the root to its children.
    #[inline]
    pub fn initial_offset(&self) -> f64 {
        self.width / 4.0
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            top: DEFAULT_TOP,
            level_spacing: DEFAULT_LEVEL_SPACING,
        }
    }
}

/// A visited node with its canvas position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedNode {
    /// Traversal record of the node
    pub visit: Visit,
    /// Horizontal canvas position
    pub x: f64,
    /// Vertical canvas position, growing downwards
    pub y: f64,
}

/// Line from a parent to one of its children.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Parent position
    pub from: (f64, f64),
    /// Child position
    pub to: (f64, f64),
    /// Child slot the edge leads to
    pub side: Side,
}

/// Positions for every node of a tree, in traversal order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    nodes: Vec<PlacedNode>,
}

impl Layout {
    /// Lays out `tree` using its pre-order traversal.
    pub fn compute(tree: &KdTree, config: &LayoutConfig) -> Self {
        let mut nodes: Vec<PlacedNode> = Vec::with_capacity(tree.len());
        // offset handed to the children of nodes[i]
        let mut child_offsets: Vec<f64> = Vec::with_capacity(tree.len());

        for visit in tree.traverse() {
            let (x, y, child_offset) = match visit.parent {
                None => (config.width / 2.0, config.top, config.initial_offset()),
                Some(link) => {
                    let parent = &nodes[link.index];
                    let offset = child_offsets[link.index];
                    let x = match link.side {
                        Side::Left => parent.x - offset,
                        Side::Right => parent.x + offset,
                    };
                    (x, parent.y + config.level_spacing, offset / 2.0)
                }
            };
            nodes.push(PlacedNode { visit, x, y });
            child_offsets.push(child_offset);
        }

        Self { nodes }
    }

    /// Placed nodes in traversal order.
    pub fn nodes(&self) -> &[PlacedNode] {
        &self.nodes
    }

    /// One edge per parent/child pair, ordered by child.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes.iter().filter_map(|node| {
            let link = node.visit.parent?;
            let parent = &self.nodes[link.index];
            Some(Edge {
                from: (parent.x, parent.y),
                to: (node.x, node.y),
                side: link.side,
            })
        })
    }

    /// Bounding box of all node positions: `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.nodes.first()?;
        let init = (first.x, first.y, first.x, first.y);
        Some(self.nodes.iter().fold(init, |(min_x, min_y, max_x, max_y), node| {
            (min_x.min(node.x), min_y.min(node.y), max_x.max(node.x), max_y.max(node.y))
        }))
    }

    /// Number of placed nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether no node was placed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

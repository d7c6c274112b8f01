//! Two-dimensional kd-tree with incremental insertion and median rebalancing.
//!
//! The tree keeps every point it was given in insertion order. That list is
//! the source of truth: the node structure is always derivable from it, either
//! by replaying insertions ([`KdTree::rebuild`]) or by a median build
//! ([`KdTree::balance`]).
//!
//! Placement rule at depth `d` with axis `a = d mod 2`: a point goes left when
//! its coordinate on `a` is strictly less than the node's, right otherwise.
//! Ties therefore always go right, and both construction paths keep
//! "left is strictly less, right is greater or equal" on every level.

use std::fmt;

use tracing::{debug, trace};

use crate::error::Result;
use crate::point::{Axis, Point};
use crate::traversal::{PreOrder, Visit};

/// A tree node. Children are owned exclusively; there are no parent links.
#[derive(Debug)]
pub struct Node {
    point: Point,
    /// Splitting axis of this node, `depth mod 2`. Not the axis its parent
    /// compared on to place it, which is the other one.
    axis: Axis,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(point: Point, axis: Axis) -> Box<Self> {
        Box::new(Self {
            point,
            axis,
            left: None,
            right: None,
        })
    }

    /// Point stored at this node.
    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    /// Axis this node splits its children on, `depth mod 2`.
    ///
    /// This is the node's own level axis, so the root reports [`Axis::X`]
    /// and its children [`Axis::Y`]. The comparison that placed a node is
    /// the one its parent made, on [`Axis::next`] of this value; see
    /// [`Visit::placement_axis`].
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Subtree holding points strictly less than this node on [`Node::axis`].
    #[inline]
    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    /// Subtree holding points greater than or equal to this node on [`Node::axis`].
    #[inline]
    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    /// Returns whether the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

// Sorted incremental input degrades the tree into a chain; the default
// recursive drop would use one stack frame per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// Change notification delivered to listeners registered with [`KdTree::on_change`].
///
/// Listeners are expected to re-fetch the traversal; the payload only says
/// what kind of mutation happened.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum TreeEvent {
    /// A point was inserted incrementally.
    PointAdded(Point),
    /// The structure was replaced by a median-balanced build.
    Balanced,
    /// The structure was replaced by replaying every insertion in order.
    Rebuilt,
}

type Listener = Box<dyn FnMut(&TreeEvent)>;

/// kd-tree over 2D points.
pub struct KdTree {
    /// Every point ever added, in insertion order
    points: Vec<Point>,
    root: Option<Box<Node>>,
    listeners: Vec<Listener>,
}

impl KdTree {
    /// Creates a new empty tree
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty tree with room for `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            root: None,
            listeners: Vec::new(),
        }
    }

    /// Builds a tree by inserting `points` one at a time, in order.
    ///
    /// The shape depends on input order and may be badly unbalanced.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        points.into_iter().collect()
    }

    /// Builds a median-balanced tree over `points`.
    ///
    /// The points are remembered in the given order, so a later
    /// [`KdTree::rebuild`] replays them as incremental insertions.
    pub fn balanced<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let points: Vec<Point> = points.into_iter().collect();
        let root = build_balanced(&points);
        Self {
            points,
            root,
            listeners: Vec::new(),
        }
    }

    /// Validates raw coordinates and inserts the resulting point.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPoint`] when either coordinate is NaN
    /// or infinite. The tree is left untouched.
    pub fn add(&mut self, x: f64, y: f64) -> Result<()> {
        let point = Point::new(x, y)?;
        self.add_point(point);
        Ok(())
    }

    /// Inserts a point without rebalancing and notifies listeners.
    ///
    /// Duplicates are allowed; an equal coordinate on the splitting axis
    /// sends the point into the right subtree.
    pub fn add_point(&mut self, point: Point) {
        let depth = insert(&mut self.root, point);
        self.points.push(point);
        trace!(%point, depth, "inserted point");
        self.notify(TreeEvent::PointAdded(point));
    }

    /// Replaces the structure with a median-balanced build over all points.
    ///
    /// Points are kept, so balancing is repeatable and balancing a balanced
    /// tree reproduces the same structure.
    #[tracing::instrument(skip_all, fields(points = self.points.len()))]
    pub fn balance(&mut self) {
        self.root = build_balanced(&self.points);
        debug!(height = self.height(), "balanced tree");
        self.notify(TreeEvent::Balanced);
    }

    /// Discards the structure and re-inserts every point incrementally, in
    /// the order the points were first added.
    #[tracing::instrument(skip_all, fields(points = self.points.len()))]
    pub fn rebuild(&mut self) {
        self.root = None;
        for &point in &self.points {
            let _ = insert(&mut self.root, point);
        }
        debug!(height = self.height(), "rebuilt tree");
        self.notify(TreeEvent::Rebuilt);
    }

    /// Registers a listener fired after every mutation.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&TreeEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Removes every registered listener.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Pre-order traversal, left subtree before right.
    pub fn traverse(&self) -> PreOrder<'_> {
        PreOrder::new(self.root())
    }

    /// Collects the full traversal.
    pub fn visits(&self) -> Vec<Visit> {
        self.traverse().collect()
    }

    /// Returns whether an equal point is stored in the tree.
    pub fn contains(&self, point: &Point) -> bool {
        let mut current = self.root();
        while let Some(node) = current {
            if node.point == *point {
                return true;
            }
            current = if point.coord(node.axis) < node.point.coord(node.axis) {
                node.left()
            } else {
                node.right()
            };
        }
        false
    }

    /// Returns the number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the tree is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of levels; 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.traverse()
            .map(|visit| visit.depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Root node, `None` while the tree is empty.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Every point added so far, in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    // --- Private helpers ---

    fn notify(&mut self, event: TreeEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KdTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdTree")
            .field("points", &self.points)
            .field("root", &self.root)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Extend<Point> for KdTree {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, points: I) {
        for point in points {
            self.add_point(point);
        }
    }
}

impl FromIterator<Point> for KdTree {
    fn from_iter<I: IntoIterator<Item = Point>>(points: I) -> Self {
        let mut tree = Self::new();
        tree.extend(points);
        tree
    }
}

/// Builds a median-balanced subtree over `points` and returns its root.
///
/// Each level sorts its slice by the level's axis (ties broken on the other
/// axis, so the result depends only on the multiset of points) and splits at
/// the median. When the median coordinate is shared by several points the
/// split moves to the first of them, so everything on the left is strictly
/// less. With distinct coordinates the split is exactly `len / 2` and the
/// height is `ceil(log2(n + 1))`.
///
/// Cost is `O(n log² n)` for distinct coordinates. A level whose slice is
/// already in order skips the sort, and a run of identical points becomes a
/// right chain directly, so all-duplicate input is built in linear time.
/// Input where one coordinate value is shared by most of the points still
/// produces a deep right spine and pays a linear scan per spine level.
pub fn build_balanced(points: &[Point]) -> Option<Box<Node>> {
    let mut scratch = points.to_vec();
    build_balanced_at(&mut scratch, 0)
}

/// Recurses on the left half only; the right spine is walked in a loop since
/// duplicate-heavy input can push almost everything to the right.
fn build_balanced_at(points: &mut [Point], mut depth: usize) -> Option<Box<Node>> {
    let mut root: Option<Box<Node>> = None;
    let mut slot = &mut root;
    let mut remaining = points;

    while !remaining.is_empty() {
        let current = std::mem::take(&mut remaining);
        let axis = Axis::at_depth(depth);
        if !current.is_sorted_by(|a, b| a.cmp_split(b, axis).is_le()) {
            current.sort_unstable_by(|a, b| a.cmp_split(b, axis));
        }

        // every point equal: each one lands right of the previous
        if current.first() == current.last() {
            for &point in current.iter() {
                let node = slot.insert(Node::leaf(point, Axis::at_depth(depth)));
                slot = &mut node.right;
                depth += 1;
            }
            break;
        }

        let median = current[current.len() / 2].coord(axis);
        let split = current.partition_point(|p| p.coord(axis) < median);
        let (before, rest) = current.split_at_mut(split);
        let Some((pivot, after)) = rest.split_first_mut() else {
            break;
        };

        let node = slot.insert(Node::leaf(*pivot, axis));
        node.left = build_balanced_at(before, depth + 1);
        slot = &mut node.right;
        remaining = after;
        depth += 1;
    }

    root
}

/// Walks from `root` with the placement rule and attaches `point` at the
/// first empty slot. Returns the depth of the new node.
fn insert(root: &mut Option<Box<Node>>, point: Point) -> usize {
    let mut slot = root;
    let mut depth = 0;
    while let Some(node) = slot {
        let axis = Axis::at_depth(depth);
        slot = if point.coord(axis) < node.point.coord(axis) {
            &mut node.left
        } else {
            &mut node.right
        };
        depth += 1;
    }
    *slot = Some(Node::leaf(point, Axis::at_depth(depth)));
    depth
}

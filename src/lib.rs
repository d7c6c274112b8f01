//! # kdtree2d - Two-dimensional kd-tree
//!
//! A binary space-partitioning index over 2D points with incremental
//! insertion, median rebalancing and a deterministic traversal for drawing.
//!
//! ## Features
//!
//! - **Incremental insertion**: points are placed by alternating x/y comparisons, ties go right
//! - **Median rebalancing**: rebuild the structure with logarithmic height at any time
//! - **Replayable history**: every point is kept in insertion order, so the tree can be rebuilt
//! - **Renderer friendly**: pre-order traversal with parent links, layout geometry and change events
//!
//! ## Quick Start
//!
//! ```rust
//! use kdtree2d::prelude::*;
//!
//! // Create an empty tree
//! let mut tree = KdTree::new();
//!
//! // Insert points one at a time (unbalanced growth)
//! tree.add(5.0, 4.0)?;
//! tree.add(3.0, 7.0)?;
//! tree.add(8.0, 2.0)?;
//! tree.add(1.0, 9.0)?;
//! assert_eq!(tree.height(), 3);
//!
//! // Rebuild with median splits
//! tree.balance();
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.root().map(|n| n.point()), Some(Point::new(5.0, 4.0)?));
//!
//! // Walk the tree in pre-order, left before right
//! for visit in tree.traverse() {
//!     println!("{} at depth {} split on {}", visit.point, visit.depth, visit.axis);
//! }
//!
//! // Malformed input is rejected
//! assert!(tree.add(f64::NAN, 1.0).is_err());
//! assert!("1,2,3".parse::<Point>().is_err());
//! # Ok::<(), kdtree2d::Error>(())
//! ```
//!
//! ## How It Works
//!
//! At depth `d` the tree compares points on axis `d mod 2` (x at the root, y
//! below it, and so on). Points strictly less than a node on its axis live
//! in its left subtree, all others in the right one.
//!
//! Incremental insertion walks from the root with that rule and attaches the
//! new point at the first free slot; sorted input makes the tree a chain.
//! [`KdTree::balance`] sorts each level by its axis and splits at the median,
//! so `n` distinct points end up `ceil(log2(n + 1))` levels deep.

pub mod error;
pub mod kdtree;
pub mod layout;
pub mod point;
pub mod prelude;
pub mod traversal;


pub use error::{Error, PointDefect, Result};
pub use kdtree::{KdTree, Node, TreeEvent, build_balanced};
pub use layout::{Edge, Layout, LayoutConfig, PlacedNode};
pub use point::{Axis, Point};
pub use traversal::{ParentLink, PreOrder, Side, Visit};

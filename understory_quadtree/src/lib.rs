// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a bounded-region quadtree for broad-phase collision.
//!
//! Understory Quadtree stores axis-aligned rectangles with owned payloads and answers
//! the two questions a simulation or game loop asks every frame:
//!
//! - Which stored objects overlap each other? See [`QuadTree::each_collision`].
//! - Which stored objects overlap this shape? See [`QuadTree::each_collision_with`]
//!   and the lazy [`QuadTree::query`].
//!
//! The tree covers a fixed root rectangle. Inserting splits a leaf into four quadrants
//! once it holds more than `max_objects` entries and is shallower than `max_level`.
//! An object always lives in the deepest node whose quadrant fully contains it, so objects
//! crossing a midline stay higher in the tree, and objects that overhang the root bound stay
//! at the root. Pair enumeration therefore checks each node against itself and against its
//! ancestors, and never against siblings or cousins.
//!
//! Nodes live in a flat arena addressed by index. Children of a node occupy four
//! consecutive slots, and nodes are never deleted except by [`QuadTree::clear`].
//! Removal is predicate based ([`QuadTree::remove_if`]) and leaves the structure alone;
//! use [`QuadTree::rebuild`] to compact after heavy removal.
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{QuadTree, Rect};
//!
//! let mut tree: QuadTree<f32, u32> = QuadTree::new(5, 10, Rect::new(0.0, 0.0, 100.0, 100.0));
//! tree.insert(Rect::new(-3.0, -3.0, 5.0, 5.0), 0);
//! tree.insert(Rect::new(2.0, 2.0, 5.0, 5.0), 1);
//! tree.insert(Rect::new(0.0, 6.0, 5.0, 5.0), 2);
//! tree.insert(Rect::new(0.0, 6.0, 5.0, 5.0), 3);
//! tree.insert(Rect::new(10.0, 10.0, 5.0, 5.0), 4);
//!
//! let mut pairs = Vec::new();
//! tree.each_collision(|a, b| pairs.push((a.obj.min(b.obj), a.obj.max(b.obj))));
//! pairs.sort();
//! assert_eq!(pairs, [(0, 1), (1, 2), (1, 3), (2, 3)]);
//!
//! // Everything touching a query rectangle.
//! let hits: Vec<u32> = tree.query(Rect::new(8.0, 8.0, 4.0, 4.0)).map(|e| e.obj).collect();
//! assert_eq!(hits, [4]);
//! ```
//!
//! ## Frame loops
//!
//! A typical per-frame loop reinitializes the tree, inserts every moving object, and
//! walks the collision pairs:
//!
//! ```rust
//! use understory_quadtree::{QuadTree, Rect};
//!
//! let world = Rect::new(0.0, 0.0, 1000.0, 1000.0);
//! let mut tree: QuadTree<f64, usize> = QuadTree::new(6, 8, world);
//! for frame in 0..3 {
//!     tree.initialize(6, 8, world);
//!     for i in 0..64 {
//!         let x = (i * 15 + frame * 3) as f64;
//!         let _ = tree.insert(Rect::new(x, x, 20.0, 20.0), i);
//!     }
//!     let mut count = 0;
//!     tree.each_collision(|_, _| count += 1);
//!     assert!(count > 0);
//! }
//! ```
//!
//! ## Features
//!
//! - `std` (default) and `libm`: forwarded to Kurbo when Kurbo interop is enabled.
//! - `kurbo`: `From` conversions between [`Rect<f64>`] and `kurbo::Rect`, and [`Collider`]
//!   impls for `kurbo::Rect`, `kurbo::Point`, and `kurbo::Circle`.
//! - `tracing`: emits `trace!` events for splits, dropped inserts, removals, and rebuilds.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Debug builds may assert.
//! Rectangle intersection is non-strict: boxes that share an edge intersect.

#![no_std]

extern crate alloc;

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

pub mod collider;
pub mod collisions;
pub mod tree;
pub mod types;

pub use collider::Collider;
pub use collisions::Query;
pub use tree::QuadTree;
pub use types::{Entry, Rect, Scalar};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Insert a handful of rectangles, print every colliding pair, then run a shape query.
//!
//! Run:
//! - `cargo run -p understory_quadtree_demos --example quadtree_basics`

use understory_quadtree::{QuadTree, Rect};

fn main() {
    let mut tree: QuadTree<f32, u32> = QuadTree::new(5, 10, Rect::new(0.0, 0.0, 100.0, 100.0));

    // The first rect hangs over the root's top-left corner but still touches it.
    let rects = [
        Rect::new(-3.0, -3.0, 5.0, 5.0),
        Rect::new(2.0, 2.0, 5.0, 5.0),
        Rect::new(0.0, 6.0, 5.0, 5.0),
        Rect::new(0.0, 6.0, 5.0, 5.0),
        Rect::new(10.0, 10.0, 5.0, 5.0),
    ];
    for (obj, bound) in (0_u32..).zip(rects) {
        let kept = tree.insert(bound, obj);
        println!("insert {obj}: {bound:?} kept={kept}");
    }
    // Entirely outside the root: dropped.
    let kept = tree.insert(Rect::new(200.0, 200.0, 5.0, 5.0), 5);
    println!("insert 5 outside the root: kept={kept}");

    tree.shrink_to_fit();
    println!("{tree:?}");

    println!("colliding pairs:");
    tree.each_collision(|l, r| println!("  {} {}", l.obj, r.obj));

    let probe = Rect::new(8.0, 8.0, 4.0, 4.0);
    let hits: Vec<u32> = tree.query(probe).map(|e| e.obj).collect();
    println!("query {probe:?} -> {hits:?}");
}

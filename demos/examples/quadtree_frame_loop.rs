// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree frame loop.
//!
//! Move a set of balls each frame, rebuild the tree, and report collisions. A circular
//! "explosion" query removes every ball it touches on the last frame.
//!
//! Run:
//! - `cargo run -p understory_quadtree_demos --example quadtree_frame_loop`

use kurbo::{Circle, Point, Shape, Vec2};
use understory_quadtree::{QuadTree, Rect};

const WORLD: f64 = 400.0;
const RADIUS: f64 = 6.0;

struct Ball {
    id: usize,
    pos: Point,
    vel: Vec2,
}

impl Ball {
    fn bounds(&self) -> Rect<f64> {
        Circle::new(self.pos, RADIUS).bounding_box().into()
    }

    fn step(&mut self) {
        self.pos += self.vel;
        if self.pos.x < RADIUS || self.pos.x > WORLD - RADIUS {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < RADIUS || self.pos.y > WORLD - RADIUS {
            self.vel.y = -self.vel.y;
        }
    }
}

fn main() {
    let world = Rect::new(0.0, 0.0, WORLD, WORLD);
    let mut balls: Vec<Ball> = (0..48)
        .map(|id| {
            let f = id as f64;
            Ball {
                id,
                pos: Point::new(20.0 + (f * 37.0) % 360.0, 20.0 + (f * 53.0) % 360.0),
                vel: Vec2::new(((f * 7.0) % 5.0) - 2.0, ((f * 11.0) % 5.0) - 2.0),
            }
        })
        .collect();

    let mut tree: QuadTree<f64, usize> = QuadTree::default();
    for frame in 0..5 {
        tree.initialize(6, 4, world);
        for ball in &mut balls {
            ball.step();
            let _ = tree.insert(ball.bounds(), ball.id);
        }

        let mut contacts = Vec::new();
        tree.each_collision_if(
            // Narrow phase: real circle distance instead of the bounding boxes.
            |a, b| {
                let pa = balls[a.obj].pos;
                let pb = balls[b.obj].pos;
                pa.distance(pb) <= 2.0 * RADIUS
            },
            |a, b| contacts.push((a.obj.min(b.obj), a.obj.max(b.obj))),
        );
        contacts.sort_unstable();
        println!(
            "frame {frame}: {} nodes, {} leaves, contacts {contacts:?}",
            tree.node_count(),
            tree.leaf_count()
        );
    }

    let blast = Circle::new((WORLD / 2.0, WORLD / 2.0), 60.0);
    let mut caught: Vec<usize> = tree.query(blast).map(|e| e.obj).collect();
    caught.sort_unstable();
    println!("blast at {:?} touches {caught:?}", blast.center);

    let removed = tree.remove_if(|e| caught.binary_search(&e.obj).is_ok());
    tree.rebuild();
    println!(
        "removed {removed}, {} left in {} nodes",
        tree.len(),
        tree.node_count()
    );
}

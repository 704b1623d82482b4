// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision enumeration: all overlapping pairs, and entries overlapping a query shape.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::collider::Collider;
use crate::tree::{Node, NodeIdx, QuadTree, Quadrant};
use crate::types::{Entry, Scalar};

impl<T: Scalar, P> QuadTree<T, P> {
    /// Call `on_collision` once for every unordered pair of stored entries whose bounds
    /// intersect.
    ///
    /// Pairs are not reported in any particular order. When the two entries live at
    /// different depths, the deeper one is passed first.
    pub fn each_collision<F>(&self, on_collision: F)
    where
        F: FnMut(&Entry<T, P>, &Entry<T, P>),
    {
        self.each_collision_if(|a, b| a.bound.intersects(&b.bound), on_collision);
    }

    /// Like [`QuadTree::each_collision`], with a caller-supplied pair test.
    ///
    /// Only pairs that can overlap are ever offered to `is_colliding`: entries in the same
    /// node, and entries in a node paired with entries in its ancestors. Entries in
    /// disjoint subtrees are separated by a midline and never compared.
    pub fn each_collision_if<C, F>(&self, mut is_colliding: C, mut on_collision: F)
    where
        C: FnMut(&Entry<T, P>, &Entry<T, P>) -> bool,
        F: FnMut(&Entry<T, P>, &Entry<T, P>),
    {
        for node in &self.nodes {
            let objects = &node.objects;
            for (i, a) in objects.iter().enumerate() {
                for b in &objects[i + 1..] {
                    if is_colliding(a, b) {
                        on_collision(a, b);
                    }
                }
            }
            if objects.is_empty() {
                continue;
            }

            let mut parent = node.parent;
            while let Some(p) = parent {
                let ancestor = &self.nodes[p.get()];
                for a in objects {
                    for b in &ancestor.objects {
                        if is_colliding(a, b) {
                            on_collision(a, b);
                        }
                    }
                }
                parent = ancestor.parent;
            }
        }
    }

    /// Call `on_match` for every stored entry whose bound intersects `collider`.
    ///
    /// Subtrees whose quadrant misses the collider are skipped entirely.
    pub fn each_collision_with<C, F>(&self, collider: C, mut on_match: F)
    where
        C: Collider<T>,
        F: FnMut(&Entry<T, P>),
    {
        for entry in self.query(collider) {
            on_match(entry);
        }
    }

    /// Lazily iterate stored entries whose bound intersects `collider`.
    ///
    /// The traversal is depth-first over an explicit stack, descending only into
    /// quadrants the collider touches. Nothing is visited if the collider misses the
    /// root bound or the tree is uninitialized.
    pub fn query<C: Collider<T>>(&self, collider: C) -> Query<'_, T, P, C> {
        let mut stack = Vec::new();
        if let Some(root) = self.nodes.first()
            && collider.intersects(&root.bound)
        {
            stack.push(NodeIdx::ROOT);
        }
        Query {
            nodes: &self.nodes,
            collider,
            stack,
            current: core::slice::Iter::default(),
        }
    }
}

/// Iterator returned by [`QuadTree::query`].
pub struct Query<'a, T, P, C> {
    nodes: &'a [Node<T, P>],
    collider: C,
    stack: Vec<NodeIdx>,
    current: core::slice::Iter<'a, Entry<T, P>>,
}

impl<T, P, C> core::fmt::Debug for Query<'_, T, P, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Query")
            .field("pending_nodes", &self.stack.len())
            .field("pending_entries", &self.current.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T: Scalar, P, C: Collider<T>> Iterator for Query<'a, T, P, C> {
    type Item = &'a Entry<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for entry in self.current.by_ref() {
                if self.collider.intersects(&entry.bound) {
                    return Some(entry);
                }
            }

            let index = self.stack.pop()?;
            let nodes = self.nodes;
            let node = &nodes[index.get()];
            if let Some(first_child) = node.children {
                for quadrant in Quadrant::ALL {
                    let child = first_child.child(quadrant);
                    if self.collider.intersects(&nodes[child.get()].bound) {
                        self.stack.push(child);
                    }
                }
            }
            self.current = node.objects.iter();
        }
    }
}

impl<T: Scalar, P, C: Collider<T>> FusedIterator for Query<'_, T, P, C> {}

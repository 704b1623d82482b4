// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node arena, insertion routing, splitting, and maintenance.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::types::{Entry, Rect, Scalar};

/// Index of a node in the arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(u32);

impl NodeIdx {
    pub(crate) const ROOT: Self = Self(0);

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Node indices are intentionally 32-bit; arenas beyond u32::MAX nodes are unsupported."
    )]
    const fn new(i: usize) -> Self {
        Self(i as u32)
    }

    pub(crate) const fn get(self) -> usize {
        self.0 as usize
    }

    /// The child slot for `quadrant`, when `self` is a node's first child.
    pub(crate) const fn child(self, quadrant: Quadrant) -> Self {
        Self(self.0 + quadrant as u32)
    }
}

/// One of the four children of a split node, in arena order.
///
/// Coordinates grow right along x and down along y.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Quadrant {
    /// `(x + w/2, y)`
    TopRight = 0,
    /// `(x, y)`
    TopLeft = 1,
    /// `(x, y + h/2)`
    BottomLeft = 2,
    /// `(x + w/2, y + h/2)`
    BottomRight = 3,
}

impl Quadrant {
    pub(crate) const ALL: [Self; 4] = [
        Self::TopRight,
        Self::TopLeft,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Classify `bound` against the midlines of a node.
    ///
    /// Returns `None` when the bound crosses or touches either line; such objects stay
    /// in the node that owns the lines.
    pub(crate) fn of<T: Scalar>(v_line: T, h_line: T, bound: &Rect<T>) -> Option<Self> {
        let right = bound.x > v_line;
        let left = bound.x < v_line && bound.max_x() < v_line;
        if bound.y < h_line && bound.max_y() < h_line {
            if right {
                return Some(Self::TopRight);
            }
            if left {
                return Some(Self::TopLeft);
            }
        }
        if bound.y > h_line {
            if right {
                return Some(Self::BottomRight);
            }
            if left {
                return Some(Self::BottomLeft);
            }
        }
        None
    }

    /// Classify `bound` against the midlines of `parent`.
    ///
    /// Returns `None` when `bound` is not fully inside `parent`, which only happens at the
    /// root for entries that extend past the root bound.
    pub(crate) fn within<T: Scalar>(parent: &Rect<T>, bound: &Rect<T>) -> Option<Self> {
        if !parent.contains_rect(bound) {
            return None;
        }
        let (v_line, h_line) = parent.midlines();
        Self::of(v_line, h_line, bound)
    }

    /// The part of `parent` covered by this quadrant.
    fn rect<T: Scalar>(self, parent: &Rect<T>) -> Rect<T> {
        let w = T::half(parent.width);
        let h = T::half(parent.height);
        let (x, y) = match self {
            Self::TopRight => (T::add(parent.x, w), parent.y),
            Self::TopLeft => (parent.x, parent.y),
            Self::BottomLeft => (parent.x, T::add(parent.y, h)),
            Self::BottomRight => (T::add(parent.x, w), T::add(parent.y, h)),
        };
        Rect::new(x, y, w, h)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T, P> {
    pub(crate) bound: Rect<T>,
    pub(crate) parent: Option<NodeIdx>,
    /// First of four consecutive children; `None` for a leaf.
    pub(crate) children: Option<NodeIdx>,
    pub(crate) objects: Vec<Entry<T, P>>,
}

impl<T, P> Node<T, P> {
    const fn new(bound: Rect<T>, parent: Option<NodeIdx>) -> Self {
        Self {
            bound,
            parent,
            children: None,
            objects: Vec::new(),
        }
    }
}

/// A bounded-region quadtree over rectangles with owned payloads.
///
/// Construct with [`QuadTree::new`], or start from [`QuadTree::default`] (no root) and call
/// [`QuadTree::initialize`]. Nodes are stored in a flat arena; node 0 is the root.
#[derive(Clone)]
pub struct QuadTree<T, P> {
    max_level: usize,
    max_objects: usize,
    pub(crate) nodes: Vec<Node<T, P>>,
}

impl<T, P> Default for QuadTree<T, P> {
    /// An uninitialized tree: inserts and queries are no-ops until [`QuadTree::initialize`].
    fn default() -> Self {
        Self {
            max_level: 0,
            max_objects: 0,
            nodes: Vec::new(),
        }
    }
}

impl<T: Debug, P> Debug for QuadTree<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self.nodes.iter().filter(|n| n.children.is_none()).count();
        let entries: usize = self.nodes.iter().map(|n| n.objects.len()).sum();
        f.debug_struct("QuadTree")
            .field("bound", &self.nodes.first().map(|n| &n.bound))
            .field("max_level", &self.max_level)
            .field("max_objects", &self.max_objects)
            .field("nodes", &self.nodes.len())
            .field("leaves", &leaves)
            .field("entries", &entries)
            .finish_non_exhaustive()
    }
}

impl<T: Scalar, P> QuadTree<T, P> {
    /// Create a tree covering `bound`.
    ///
    /// A leaf splits once it holds more than `max_objects` entries, unless it is already
    /// `max_level` levels below the root.
    pub fn new(max_level: usize, max_objects: usize, bound: Rect<T>) -> Self {
        let mut tree = Self::default();
        tree.initialize(max_level, max_objects, bound);
        tree
    }

    /// Discard all nodes and entries and start over with a single root leaf.
    pub fn initialize(&mut self, max_level: usize, max_objects: usize, bound: Rect<T>) {
        self.max_level = max_level;
        self.max_objects = max_objects;
        self.nodes.clear();
        self.nodes.push(Node::new(bound, None));
    }

    /// Insert an object with its bounding rectangle.
    ///
    /// The entry is stored in the deepest existing node whose quadrant fully contains
    /// `bound`, splitting that node if it is a leaf and now overflows. A bound that
    /// overlaps the root but extends past it stays at the root. Returns `false`
    /// (and drops `obj`) if the tree has no root or `bound` misses the root bound.
    pub fn insert(&mut self, bound: Rect<T>, obj: P) -> bool {
        let Some(root) = self.nodes.first() else {
            return false;
        };
        if !root.bound.intersects(&bound) {
            trace!(?bound, "dropped entry outside the root bound");
            return false;
        }

        let mut level = 0_usize;
        let mut index = NodeIdx::ROOT;
        loop {
            let node = &mut self.nodes[index.get()];
            let Some(first_child) = node.children else {
                node.objects.push(Entry { bound, obj });
                if node.objects.len() > self.max_objects && level < self.max_level {
                    trace!(node = index.get(), depth = level, "leaf overflow");
                    self.split(index);
                }
                return true;
            };
            match Quadrant::within(&node.bound, &bound) {
                Some(quadrant) => {
                    index = first_child.child(quadrant);
                    level += 1;
                }
                None => {
                    node.objects.push(Entry { bound, obj });
                    return true;
                }
            }
        }
    }

    /// Turn the leaf at `index` into an internal node with four fresh children and move
    /// every entry that fits a single quadrant down one level. Children are not split
    /// further here, even if they overflow.
    fn split(&mut self, index: NodeIdx) {
        let parent_bound = self.nodes[index.get()].bound;
        let first_child = NodeIdx::new(self.nodes.len());
        for quadrant in Quadrant::ALL {
            self.nodes
                .push(Node::new(quadrant.rect(&parent_bound), Some(index)));
        }
        debug_assert_eq!(
            self.nodes.len(),
            first_child.get() + Quadrant::ALL.len(),
            "a split appends exactly four children"
        );

        let (head, children) = self.nodes.split_at_mut(first_child.get());
        let parent = &mut head[index.get()];
        debug_assert!(parent.children.is_none(), "only leaves are split");
        parent.children = Some(first_child);

        let (v_line, h_line) = parent_bound.midlines();
        debug_assert!(
            v_line.partial_cmp(&v_line).is_some() && h_line.partial_cmp(&h_line).is_some(),
            "NaN midlines in {parent_bound:?}"
        );
        let mut i = 0;
        while i < parent.objects.len() {
            match Quadrant::within(&parent_bound, &parent.objects[i].bound) {
                Some(quadrant) => {
                    let entry = parent.objects.swap_remove(i);
                    children[quadrant as usize].objects.push(entry);
                }
                None => i += 1,
            }
        }
        trace!(
            node = index.get(),
            first_child = first_child.get(),
            moved = children.iter().map(|c| c.objects.len()).sum::<usize>(),
            kept = parent.objects.len(),
            "split node"
        );
    }

    /// Remove every entry for which `pred` returns `true`. Returns the number removed.
    ///
    /// Nodes are left in place: no merging, no re-routing of survivors.
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&Entry<T, P>) -> bool,
    {
        let mut removed = 0;
        for node in &mut self.nodes {
            let before = node.objects.len();
            node.objects.retain(|e| !pred(e));
            removed += before - node.objects.len();
        }
        trace!(removed, "remove_if");
        removed
    }

    /// Rebuild the tree from its current entries with the same limits and root bound.
    ///
    /// Use this to reclaim nodes after many removals; splits are otherwise permanent.
    pub fn rebuild(&mut self) {
        let Some(bound) = self.bound() else {
            return;
        };
        let entries: Vec<Entry<T, P>> = self.nodes.drain(..).flat_map(|n| n.objects).collect();
        self.nodes.push(Node::new(bound, None));
        for entry in entries {
            let _ = self.insert(entry.bound, entry.obj);
        }
        trace!(nodes = self.nodes.len(), "rebuilt tree");
    }

    /// Reserve space for at least `n` additional nodes.
    pub fn reserve(&mut self, n: usize) {
        self.nodes.reserve(n);
    }

    /// Drop every node, root included. The tree ignores inserts and queries until
    /// [`QuadTree::initialize`] is called.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Release excess capacity of the node arena and of every node's entry storage.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
        for node in &mut self.nodes {
            node.objects.shrink_to_fit();
        }
    }
}

impl<T: Copy, P> QuadTree<T, P> {
    /// The root bound, or `None` if the tree is uninitialized.
    pub fn bound(&self) -> Option<Rect<T>> {
        self.nodes.first().map(|n| n.bound)
    }
}

impl<T, P> QuadTree<T, P> {
    /// Depth limit: nodes at this level never split.
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Leaf capacity before a split is attempted.
    pub fn max_objects(&self) -> usize {
        self.max_objects
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.nodes.iter().map(|n| n.objects.len()).sum()
    }

    /// True if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.objects.is_empty())
    }

    /// Number of nodes in the arena (0 when uninitialized).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes that have not been split.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.children.is_none()).count()
    }

    /// Iterate all entries, node by node in arena order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<T, P>> + '_ {
        self.nodes.iter().flat_map(|n| n.objects.iter())
    }
}

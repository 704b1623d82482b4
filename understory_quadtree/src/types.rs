// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types: scalars, rectangles, and stored entries.

use core::fmt::Debug;

/// Numeric scalar abstraction for quadtree coordinates.
///
/// The tree only needs to add coordinates and halve extents to place midlines and
/// child quadrants. Implemented for `f32` and `f64`.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Half of a value (used for midlines and child extents).
    fn half(v: Self) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn half(v: Self) -> Self {
        v / 2.0
    }
}

impl Scalar for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn half(v: Self) -> Self {
        v / 2.0
    }
}

/// Axis-aligned rectangle given by its origin and size.
///
/// `x`/`y` is the minimum corner; `width` and `height` are expected to be non-negative.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect<T> {
    /// Minimum x (left)
    pub x: T,
    /// Minimum y (top)
    pub y: T,
    /// Extent along x
    pub width: T,
    /// Extent along y
    pub height: T,
}

impl<T> Rect<T> {
    /// Create a rectangle from origin and size.
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T: Scalar> Rect<T> {
    /// Create a rectangle from its min/max corners.
    pub fn from_points(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: T::sub(max_x, min_x),
            height: T::sub(max_y, min_y),
        }
    }

    /// Maximum x (right edge).
    #[inline]
    pub fn max_x(&self) -> T {
        T::add(self.x, self.width)
    }

    /// Maximum y (bottom edge).
    #[inline]
    pub fn max_y(&self) -> T {
        T::add(self.y, self.height)
    }

    /// Whether two rectangles overlap. Shared edges and corners count as overlapping.
    ///
    /// The comparisons are kept exactly as written so that boundary handling is
    /// reproducible across the tree's routing and enumeration.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        if self.x > other.max_x() || self.max_x() < other.x {
            return false;
        }
        if self.max_y() < other.y || self.y > other.max_y() {
            return false;
        }
        true
    }

    /// Whether `other` lies entirely inside this rectangle (edges inclusive).
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// The vertical and horizontal midlines `(x + width / 2, y + height / 2)`.
    #[inline]
    pub(crate) fn midlines(&self) -> (T, T) {
        (
            T::add(self.x, T::half(self.width)),
            T::add(self.y, T::half(self.height)),
        )
    }
}

/// A stored rectangle and the payload that owns it.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<T, P> {
    /// Bounding rectangle used for routing and collision tests.
    pub bound: Rect<T>,
    /// Caller payload, moved into the tree on insertion.
    pub obj: P,
}

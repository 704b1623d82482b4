// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query shapes accepted by [`QuadTree::query`](crate::QuadTree::query).

use crate::types::{Rect, Scalar};

/// A shape that can be tested against node quadrants and stored bounds.
///
/// The tree calls [`Collider::intersects`] on quadrant bounds to prune whole subtrees and
/// on entry bounds to decide matches. Every entry below the root lies inside its node's
/// quadrant; entries that extend past the root bound are kept at the root itself. A shape
/// that touches an entry must therefore report `true` for any rectangle containing that
/// entry's bound, or the query will miss it: a `false` for a quadrant hides everything
/// stored beneath it.
pub trait Collider<T> {
    /// Whether this shape touches `rect`.
    fn intersects(&self, rect: &Rect<T>) -> bool;
}

impl<T: Scalar> Collider<T> for Rect<T> {
    #[inline]
    fn intersects(&self, rect: &Rect<T>) -> bool {
        Self::intersects(self, rect)
    }
}

impl<T, C: Collider<T> + ?Sized> Collider<T> for &C {
    #[inline]
    fn intersects(&self, rect: &Rect<T>) -> bool {
        (**self).intersects(rect)
    }
}

#[cfg(feature = "kurbo")]
mod kurbo_impls {
    use super::Collider;
    use crate::types::Rect;

    impl From<kurbo::Rect> for Rect<f64> {
        fn from(r: kurbo::Rect) -> Self {
            let r = r.abs();
            Self::from_points(r.x0, r.y0, r.x1, r.y1)
        }
    }

    impl From<Rect<f64>> for kurbo::Rect {
        fn from(r: Rect<f64>) -> Self {
            Self::new(r.x, r.y, r.max_x(), r.max_y())
        }
    }

    impl Collider<f64> for kurbo::Rect {
        #[inline]
        fn intersects(&self, rect: &Rect<f64>) -> bool {
            Rect::from(*self).intersects(rect)
        }
    }

    impl Collider<f64> for kurbo::Point {
        #[inline]
        fn intersects(&self, rect: &Rect<f64>) -> bool {
            rect.x <= self.x && self.x <= rect.max_x() && rect.y <= self.y && self.y <= rect.max_y()
        }
    }

    impl Collider<f64> for kurbo::Circle {
        fn intersects(&self, rect: &Rect<f64>) -> bool {
            // Closest point of the rectangle to the center, compared squared.
            let cx = self.center.x.max(rect.x).min(rect.max_x());
            let cy = self.center.y.max(rect.y).min(rect.max_y());
            let dx = self.center.x - cx;
            let dy = self.center.y - cy;
            dx * dx + dy * dy <= self.radius * self.radius
        }
    }
}

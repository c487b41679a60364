//! Rectangle types for the two coordinate spaces the engine works in.
//!
//! # Coordinate Systems
//!
//! - [`Rect`] lives in pixel space: origin at the top-left of the rendered
//!   page image, y grows downwards, `right`/`bottom` are exclusive edges.
//! - [`DocumentBox`] lives in document space: origin at the bottom-left of
//!   the page, y grows upwards, expressed in document units (points).

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel space, stored as four edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Create a rectangle from its four edges.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    /// Create the normalized rectangle spanned by two arbitrary corner points.
    ///
    /// The points may be given in any order, as happens while dragging out a
    /// new selection towards the top-left.
    pub fn from_points(p1: (f64, f64), p2: (f64, f64)) -> Self {
        Self::new(p1.0.min(p2.0), p1.1.min(p2.1), p1.0.max(p2.0), p1.1.max(p2.1))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True if the rectangle encloses no area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// True if the rectangle is taller than it is wide.
    pub fn is_portrait(&self) -> bool {
        self.height() > self.width()
    }

    /// Swap edges where needed so width and height are non-negative.
    pub fn normalized(&self) -> Self {
        Self::from_points((self.left, self.top), (self.right, self.bottom))
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Move each edge by its own delta (positive values move right/down).
    pub fn adjusted(&self, d_left: f64, d_top: f64, d_right: f64, d_bottom: f64) -> Self {
        Self::new(
            self.left + d_left,
            self.top + d_top,
            self.right + d_right,
            self.bottom + d_bottom,
        )
    }

    /// Overlap of two rectangles.
    ///
    /// Disjoint inputs yield an empty rectangle collapsed onto the nearest
    /// edge rather than an inverted one.
    pub fn intersected(&self, other: &Rect) -> Self {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right).max(left);
        let bottom = self.bottom.min(other.bottom).max(top);
        Self::new(left, top, right, bottom)
    }

    /// Smallest rectangle containing both inputs.
    pub fn united(&self, other: &Rect) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// True if `other` lies completely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Largest rectangle of whole pixels inside this one.
    ///
    /// A rectangle thinner than one pixel collapses to zero width or height.
    pub fn pixel_interior(&self) -> Self {
        let left = self.left.ceil();
        let top = self.top.ceil();
        Self::new(
            left,
            top,
            self.right.floor().max(left),
            self.bottom.floor().max(top),
        )
    }

    /// Move every edge into the span of `bounds`.
    ///
    /// Unlike [`Rect::intersected`] the result always lies inside `bounds`,
    /// even when the inputs are disjoint.
    pub fn clamped_to(&self, bounds: &Rect) -> Self {
        let left = self.left.max(bounds.left).min(bounds.right);
        let top = self.top.max(bounds.top).min(bounds.bottom);
        Self::new(
            left,
            top,
            self.right.min(bounds.right).max(left),
            self.bottom.min(bounds.bottom).max(top),
        )
    }
}

/// A page box in document space: `(x0, y0)` is the lower-left corner,
/// `(x1, y1)` the upper-right one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl DocumentBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Per-edge values such as proposed or realized edge movements.
///
/// Positive values move an edge right (left/right edges) or down
/// (top/bottom edges).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeDeltas {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl EdgeDeltas {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The movement that turns `from` into `to`.
    pub fn between(from: &Rect, to: &Rect) -> Self {
        Self::new(
            to.left - from.left,
            to.top - from.top,
            to.right - from.right,
            to.bottom - from.bottom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_normalizes() {
        let r = Rect::from_points((80.0, 90.0), (10.0, 20.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 80.0, 90.0));
        assert_eq!(r.width(), 70.0);
        assert_eq!(r.height(), 70.0);
    }

    #[test]
    fn test_intersected_disjoint_is_empty() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 30.0, 30.0);
        let i = a.intersected(&b);
        assert!(i.is_empty());
        assert!(i.width() >= 0.0 && i.height() >= 0.0);
    }

    #[test]
    fn test_united_covers_both() {
        let a = Rect::new(0.0, 5.0, 10.0, 10.0);
        let b = Rect::new(5.0, 0.0, 30.0, 8.0);
        let u = a.united(&b);
        assert_eq!(u, Rect::new(0.0, 0.0, 30.0, 10.0));
        assert!(u.contains_rect(&a));
        assert!(u.contains_rect(&b));
    }

    #[test]
    fn test_pixel_interior_rounds_inward() {
        let r = Rect::new(0.4, 1.6, 10.4, 9.5);
        assert_eq!(r.pixel_interior(), Rect::new(1.0, 2.0, 10.0, 9.0));
        assert!(r.contains_rect(&r.pixel_interior()));

        let sliver = Rect::new(3.2, 0.0, 3.8, 5.0).pixel_interior();
        assert_eq!(sliver.width(), 0.0);
    }

    #[test]
    fn test_clamped_to_stays_inside() {
        let bounds = Rect::new(0.4, 0.4, 0.6, 10.0);
        let clamped = Rect::new(1.0, 0.0, 1.0, 12.0).clamped_to(&bounds);
        assert_eq!(clamped, Rect::new(0.6, 0.4, 0.6, 10.0));
        assert!(bounds.contains_rect(&clamped));

        let far = Rect::new(-20.0, -20.0, -10.0, -10.0);
        assert!(bounds.contains_rect(&far.clamped_to(&bounds)));
    }

    #[test]
    fn test_portrait() {
        assert!(Rect::from_size(0.0, 0.0, 600.0, 800.0).is_portrait());
        assert!(!Rect::from_size(0.0, 0.0, 800.0, 600.0).is_portrait());
    }

    #[test]
    fn test_edge_deltas_between() {
        let from = Rect::new(0.0, 0.0, 10.0, 10.0);
        let to = Rect::new(1.0, -2.0, 10.0, 13.0);
        let d = EdgeDeltas::between(&from, &to);
        assert_eq!(d, EdgeDeltas::new(1.0, -2.0, 0.0, 3.0));
        assert_eq!(from.adjusted(d.left, d.top, d.right, d.bottom), to);
    }

    #[test]
    fn test_document_box_size() {
        let b = DocumentBox::new(10.0, 20.0, 110.0, 320.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 300.0);
    }
}

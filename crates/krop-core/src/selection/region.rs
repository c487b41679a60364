//! A single user selection and its constraint solver.
//!
//! Every geometry change goes through [`SelectionRegion::adjust`], which
//! keeps three invariants:
//!
//! 1. The selection stays inside the page rectangle
//! 2. Width and height never drop below the configured minimum
//! 3. With an aspect-ratio lock, width / height equals the ratio
//!
//! # Anchoring
//!
//! A zero delta marks an edge as "not moved". The solver uses this to decide
//! which side to grow or shrink when it has to correct the proposed
//! rectangle: a user dragging the right handle expects the left edge to stay
//! where it is.

use serde::{Deserialize, Serialize};

use crate::geometry::{EdgeDeltas, Rect};

/// Stable identity of a selection within its [`SelectionSet`](super::SelectionSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub(crate) u64);

impl RegionId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for RegionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A rectangle marked on a page image, destined to become one output page
/// (or several, when distributed into tiles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRegion {
    id: RegionId,
    page_index: usize,
    rect: Rect,
    aspect_ratio: Option<f64>,
    min_width: f64,
    min_height: f64,
    parent_rect: Rect,
}

impl SelectionRegion {
    /// Create a selection on `page_index`.
    ///
    /// Without an explicit `rect` the selection covers the whole page. The
    /// initial rectangle is passed through the solver, so a zero-sized
    /// rectangle (a click without drag) grows to the minimum size.
    pub(crate) fn new(
        id: RegionId,
        page_index: usize,
        rect: Option<Rect>,
        page: &Rect,
        min_width: f64,
        min_height: f64,
    ) -> Self {
        let mut region = Self {
            id,
            page_index,
            rect: rect.unwrap_or(*page).normalized(),
            aspect_ratio: None,
            min_width: min_width.max(1.0),
            min_height: min_height.max(1.0),
            parent_rect: *page,
        };
        region.adjust(page, EdgeDeltas::default());
        region
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Index of the page the selection was created on.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Current rectangle in pixel space.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Page rectangle snapshotted at the last geometry change.
    ///
    /// Crop fractions are measured against this snapshot rather than the
    /// live page rectangle, so re-rendering the page at a different size
    /// mid-edit does not shift the resulting crop.
    pub fn parent_rect(&self) -> Rect {
        self.parent_rect
    }

    pub fn aspect_ratio(&self) -> Option<f64> {
        self.aspect_ratio
    }

    pub fn min_size(&self) -> (f64, f64) {
        (self.min_width, self.min_height)
    }

    /// Lock (or with `None`, unlock) width / height to `ratio` and reshape
    /// the selection around its center to satisfy it.
    ///
    /// When the page cannot hold a selection of this ratio at the minimum
    /// size, the constraints give way in a fixed order: the selection stays
    /// on the page first, keeps its minimum size second, and only then
    /// follows the ratio.
    pub fn set_aspect_ratio(&mut self, page: &Rect, ratio: Option<f64>) {
        self.aspect_ratio = ratio.filter(|r| *r > 0.0 && r.is_finite());
        self.adjust(page, EdgeDeltas::default());
    }

    /// Change the minimum size (each floored at one pixel) and re-solve.
    pub fn set_min_size(&mut self, page: &Rect, min_width: f64, min_height: f64) {
        self.min_width = min_width.max(1.0);
        self.min_height = min_height.max(1.0);
        self.adjust(page, EdgeDeltas::default());
    }

    /// Move the edges by the proposed deltas, subject to the constraints.
    ///
    /// # Arguments
    ///
    /// * `page` - Current full page rectangle in pixel space
    /// * `deltas` - Proposed movement per edge; zero means "not moved"
    ///
    /// # Returns
    ///
    /// The movement actually realized per edge. An interactive drag adds
    /// these (not the proposed values) to its anchor point so the handle
    /// stays glued to the edge when the solver corrects it.
    pub fn adjust(&mut self, page: &Rect, deltas: EdgeDeltas) -> EdgeDeltas {
        let old = self.rect;
        let mut r = old.adjusted(deltas.left, deltas.top, deltas.right, deltas.bottom);

        // stay inside the page
        r.left = r.left.max(page.left);
        r.right = r.right.min(page.right);
        r.top = r.top.max(page.top);
        r.bottom = r.bottom.min(page.bottom);

        // minimum size, grown away from the anchored edge
        (r.left, r.right) = grow_to_min(
            r.left,
            r.right,
            self.min_width,
            deltas.left == 0.0,
            deltas.right == 0.0,
        );
        (r.top, r.bottom) = grow_to_min(
            r.top,
            r.bottom,
            self.min_height,
            deltas.top == 0.0,
            deltas.bottom == 0.0,
        );

        if let Some(ratio) = self.aspect_ratio {
            let (w, h) = (r.width(), r.height());
            let mut nw = w.min(h * ratio);
            let mut nh = h.min(w / ratio);

            // the ratio may ask for a side below the minimum; scale both up
            let scale = (self.min_width / nw).max(self.min_height / nh).max(1.0);
            nw *= scale;
            nh *= scale;

            (r.left, r.right) = resize_side(r.left, r.right, nw, deltas.left, deltas.right);
            (r.top, r.bottom) = resize_side(r.top, r.bottom, nh, deltas.top, deltas.bottom);
        }

        // growing may have pushed the rectangle over the page border
        (r.left, r.right) = fit_into(r.left, r.right, page.left, page.right);
        (r.top, r.bottom) = fit_into(r.top, r.bottom, page.top, page.bottom);

        self.parent_rect = *page;
        self.rect = r;
        EdgeDeltas::between(&old, &r)
    }

    /// Translate the selection without resizing it.
    ///
    /// The movement is reduced so the selection stays inside `page`.
    /// Returns the realized `(dx, dy)`.
    pub fn move_by(&mut self, page: &Rect, dx: f64, dy: f64) -> (f64, f64) {
        let old = self.rect;
        let dx = clamp_shift(old.left, old.right, dx, page.left, page.right);
        let dy = clamp_shift(old.top, old.bottom, dy, page.top, page.bottom);

        let mut r = old.translated(dx, dy);
        (r.left, r.right) = fit_into(r.left, r.right, page.left, page.right);
        (r.top, r.bottom) = fit_into(r.top, r.bottom, page.top, page.bottom);

        self.parent_rect = *page;
        self.rect = r;
        (r.left - old.left, r.top - old.top)
    }

    /// Reshape the selection to the rectangle spanned by two points, as while
    /// dragging out a new selection.
    pub fn set_bounding_rect(&mut self, page: &Rect, p1: (f64, f64), p2: (f64, f64)) -> EdgeDeltas {
        let target = Rect::from_points(p1, p2);
        let deltas = EdgeDeltas::between(&self.rect, &target);
        self.adjust(page, deltas)
    }

    /// Reshape the selection to `target`, subject to the constraints.
    pub fn set_rect(&mut self, page: &Rect, target: &Rect) -> EdgeDeltas {
        self.set_bounding_rect(page, (target.left, target.top), (target.right, target.bottom))
    }
}

/// Grow `[lo, hi]` to at least `min`.
fn grow_to_min(lo: f64, hi: f64, min: f64, lo_anchored: bool, hi_anchored: bool) -> (f64, f64) {
    let extra = min - (hi - lo);
    if extra <= 0.0 {
        return (lo, hi);
    }
    if lo_anchored {
        (lo, lo + min)
    } else if hi_anchored {
        (hi - min, hi)
    } else {
        let center = (lo + hi) / 2.0;
        (center - min / 2.0, center + min / 2.0)
    }
}

/// Resize `[lo, hi]` to `size` on the side that was moved.
fn resize_side(lo: f64, hi: f64, size: f64, d_lo: f64, d_hi: f64) -> (f64, f64) {
    match (d_lo != 0.0, d_hi != 0.0) {
        (false, true) => (lo, lo + size),
        (true, false) => (hi - size, hi),
        _ => {
            let center = (lo + hi) / 2.0;
            (center - size / 2.0, center + size / 2.0)
        }
    }
}

/// Shift `[lo, hi]` into `[min, max]`, shrinking it only if it cannot fit.
fn fit_into(lo: f64, hi: f64, min: f64, max: f64) -> (f64, f64) {
    let size = hi - lo;
    if size >= max - min {
        (min, max)
    } else if lo < min {
        (min, (min + size).min(max))
    } else if hi > max {
        ((max - size).max(min), max)
    } else {
        (lo, hi)
    }
}

/// Reduce a translation so `[lo, hi]` stays inside `[min, max]`.
fn clamp_shift(lo: f64, hi: f64, d: f64, min: f64, max: f64) -> f64 {
    let mut d = d;
    if lo + d < min {
        d = min - lo;
    }
    if hi + d > max {
        d = max - hi;
    }
    d
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn page_strategy() -> impl Strategy<Value = Rect> {
        (100.0f64..1000.0, 100.0f64..1000.0).prop_map(|(w, h)| Rect::new(0.0, 0.0, w, h))
    }

    fn deltas_strategy() -> impl Strategy<Value = EdgeDeltas> {
        // about a third of the proposals leave an edge untouched
        let delta = prop_oneof![Just(0.0f64), -300.0f64..300.0, -300.0f64..300.0];
        (delta.clone(), delta.clone(), delta.clone(), delta)
            .prop_map(|(l, t, r, b)| EdgeDeltas::new(l, t, r, b))
    }

    fn start_region(page: &Rect, fx: f64, fy: f64, min: f64) -> SelectionRegion {
        let rect = Rect::new(
            page.width() * fx * 0.5,
            page.height() * fy * 0.5,
            page.width() * (0.5 + fx * 0.5),
            page.height() * (0.5 + fy * 0.5),
        );
        SelectionRegion::new(RegionId(1), 0, Some(rect), page, min, min)
    }

    proptest! {
        /// Property: any sequence of adjustments stays inside the page.
        #[test]
        fn prop_adjust_stays_inside(
            page in page_strategy(),
            (fx, fy) in (0.0f64..1.0, 0.0f64..1.0),
            steps in prop::collection::vec(deltas_strategy(), 1..20),
        ) {
            let mut region = start_region(&page, fx, fy, 1.0);
            for deltas in steps {
                region.adjust(&page, deltas);
                prop_assert!(page.contains_rect(&region.rect()), "{:?} escaped {:?}", region.rect(), page);
            }
        }

        /// Property: width and height never drop below the minimum.
        #[test]
        fn prop_adjust_keeps_minimum(
            page in page_strategy(),
            (fx, fy) in (0.0f64..1.0, 0.0f64..1.0),
            min in 1.0f64..50.0,
            steps in prop::collection::vec(deltas_strategy(), 1..20),
        ) {
            let mut region = start_region(&page, fx, fy, min);
            for deltas in steps {
                region.adjust(&page, deltas);
                let rect = region.rect();
                prop_assert!(rect.width() >= min - 1e-9, "width {} < {}", rect.width(), min);
                prop_assert!(rect.height() >= min - 1e-9, "height {} < {}", rect.height(), min);
            }
        }

        /// Property: with a ratio lock, every adjustment yields that ratio.
        #[test]
        fn prop_aspect_lock_holds(
            page in page_strategy(),
            (fx, fy) in (0.0f64..1.0, 0.0f64..1.0),
            ratio in 0.2f64..5.0,
            steps in prop::collection::vec(deltas_strategy(), 1..20),
        ) {
            let mut region = start_region(&page, fx, fy, 1.0);
            region.set_aspect_ratio(&page, Some(ratio));
            for deltas in steps {
                region.adjust(&page, deltas);
                let rect = region.rect();
                let actual = rect.width() / rect.height();
                prop_assert!((actual - ratio).abs() < 1e-6, "ratio {} != {}", actual, ratio);
            }
        }

        /// Property: the realized deltas describe the actual change.
        #[test]
        fn prop_realized_deltas_match(
            page in page_strategy(),
            (fx, fy) in (0.0f64..1.0, 0.0f64..1.0),
            deltas in deltas_strategy(),
        ) {
            let mut region = start_region(&page, fx, fy, 1.0);
            let before = region.rect();
            let realized = region.adjust(&page, deltas);
            let after = region.rect();
            let replayed = before.adjusted(realized.left, realized.top, realized.right, realized.bottom);
            prop_assert!((replayed.left - after.left).abs() < 1e-9);
            prop_assert!((replayed.top - after.top).abs() < 1e-9);
            prop_assert!((replayed.right - after.right).abs() < 1e-9);
            prop_assert!((replayed.bottom - after.bottom).abs() < 1e-9);
        }

        /// Property: moving never resizes and never leaves the page.
        #[test]
        fn prop_move_keeps_size(
            page in page_strategy(),
            (fx, fy) in (0.0f64..1.0, 0.0f64..1.0),
            (dx, dy) in (-2000.0f64..2000.0, -2000.0f64..2000.0),
        ) {
            let mut region = start_region(&page, fx, fy, 1.0);
            let before = region.rect();
            region.move_by(&page, dx, dy);
            let after = region.rect();
            prop_assert!((after.width() - before.width()).abs() < 1e-9);
            prop_assert!((after.height() - before.height()).abs() < 1e-9);
            prop_assert!(page.contains_rect(&after));
        }
    }
}

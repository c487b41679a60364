//! Mapping between pixel-space selections and document-space page boxes.
//!
//! A selection is measured against the snapshotted parent rectangle of the
//! page image it was drawn on and turned into a [`CropFraction`]: the share
//! of the page width/height removed from each side. Fractions are
//! independent of render resolution, so the same values apply to the page
//! box in document units.
//!
//! # Coordinate System
//!
//! - Pixel space: origin top-left, y down
//! - Document space: origin bottom-left, y up
//!
//! This is why `top` trims from `y1` and `bottom` trims from `y0` in
//! [`to_absolute_box`].

use serde::{Deserialize, Serialize};

use super::rotation::PageRotation;
use crate::geometry::{DocumentBox, Rect};

/// Fractions of the page width/height removed from each side.
///
/// For a selection of positive size, every value lies in `[0, 1)`,
/// `left + right < 1` and `top + bottom < 1`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropFraction {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl CropFraction {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A fraction that keeps the whole page.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    pub fn from_array(values: [f64; 4]) -> Self {
        let [left, top, right, bottom] = values;
        Self::new(left, top, right, bottom)
    }

    /// Re-express the fraction for a page displayed with `rotation`.
    pub fn rotated(self, rotation: PageRotation) -> Self {
        Self::from_array(rotation.permute(self.to_array()))
    }

    /// True if the remaining area is non-empty.
    pub fn is_valid(&self) -> bool {
        self.to_array().iter().all(|v| *v >= 0.0 && *v < 1.0)
            && self.left + self.right < 1.0
            && self.top + self.bottom < 1.0
    }
}

/// Convert a pixel-space selection into a rotation-corrected crop fraction.
///
/// # Arguments
///
/// * `rect` - Selection in pixel space
/// * `parent` - Full page rectangle snapshotted when the selection geometry
///   was last finalized (not the live page rectangle)
/// * `rotation` - Intrinsic rotation of the page the image was rendered from
///
/// # Example
///
/// ```ignore
/// let parent = Rect::new(0.0, 0.0, 100.0, 100.0);
/// let left_half_removed = Rect::new(50.0, 0.0, 100.0, 100.0);
/// let f = to_crop_fraction(&left_half_removed, &parent, PageRotation::Deg0);
/// assert_eq!(f, CropFraction::new(0.5, 0.0, 0.0, 0.0));
/// ```
pub fn to_crop_fraction(rect: &Rect, parent: &Rect, rotation: PageRotation) -> CropFraction {
    let pw = parent.width();
    let ph = parent.height();

    let raw = CropFraction::new(
        (rect.left - parent.left) / pw,
        (rect.top - parent.top) / ph,
        (parent.right - rect.right) / pw,
        (parent.bottom - rect.bottom) / ph,
    );

    raw.rotated(rotation)
}

/// Apply a crop fraction to a document-space page box.
///
/// A zero fraction returns the box unchanged.
pub fn to_absolute_box(fraction: &CropFraction, page_box: &DocumentBox) -> DocumentBox {
    let w = page_box.width();
    let h = page_box.height();

    DocumentBox::new(
        page_box.x0 + fraction.left * w,
        page_box.y0 + fraction.bottom * h,
        page_box.x1 - fraction.right * w,
        page_box.y1 - fraction.top * h,
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================

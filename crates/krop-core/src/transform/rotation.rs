//! Quarter-turn page rotations and the crop-value permutation they imply.
//!
//! A page may carry an intrinsic rotation in the document. The rasterizer
//! renders the page already rotated, so a crop measured on the rendered
//! image is expressed relative to the *displayed* sides. Before it can be
//! applied to the unrotated page box, the four side values have to be
//! cyclically permuted.
//!
//! # Permutation
//!
//! ```text
//!   0°: (left, top, right, bottom)
//!  90°: (top, right, bottom, left)
//! 180°: (right, bottom, left, top)
//! 270°: (bottom, left, top, right)
//! ```

use serde::{Deserialize, Serialize};

/// A rotation by a multiple of 90 degrees, clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum PageRotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl PageRotation {
    /// All four rotations in ascending order.
    pub const ALL: [PageRotation; 4] = [
        PageRotation::Deg0,
        PageRotation::Deg90,
        PageRotation::Deg180,
        PageRotation::Deg270,
    ];

    /// Convert a rotation in degrees.
    ///
    /// Multiples of 360 are folded, so -90 and 270 are the same rotation.
    /// Returns `None` for anything that is not a quarter turn.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(PageRotation::Deg0),
            90 => Some(PageRotation::Deg90),
            180 => Some(PageRotation::Deg180),
            270 => Some(PageRotation::Deg270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            PageRotation::Deg0 => 0,
            PageRotation::Deg90 => 90,
            PageRotation::Deg180 => 180,
            PageRotation::Deg270 => 270,
        }
    }

    /// The rotation that undoes this one (`360 - r`, modulo 360).
    pub fn inverse(self) -> Self {
        match self {
            PageRotation::Deg0 => PageRotation::Deg0,
            PageRotation::Deg90 => PageRotation::Deg270,
            PageRotation::Deg180 => PageRotation::Deg180,
            PageRotation::Deg270 => PageRotation::Deg90,
        }
    }

    /// Cyclically permute a `(left, top, right, bottom)` tuple.
    pub fn permute<T: Copy>(self, sides: [T; 4]) -> [T; 4] {
        let [left, top, right, bottom] = sides;
        match self {
            PageRotation::Deg0 => [left, top, right, bottom],
            PageRotation::Deg90 => [top, right, bottom, left],
            PageRotation::Deg180 => [right, bottom, left, top],
            PageRotation::Deg270 => [bottom, left, top, right],
        }
    }
}

impl TryFrom<u16> for PageRotation {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        PageRotation::from_degrees(i32::from(value))
            .ok_or_else(|| format!("rotation must be 0, 90, 180 or 270, got {}", value))
    }
}

impl From<PageRotation> for u16 {
    fn from(rotation: PageRotation) -> Self {
        rotation.degrees()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

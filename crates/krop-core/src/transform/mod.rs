//! Selection geometry transforms: tiling, rotation and crop mapping.
//!
//! # Pipeline
//!
//! For every selection that applies to an output page:
//! 1. Distribute the selection into tiles (if a distribute ratio is set)
//! 2. Measure each tile against the selection's snapshotted parent rect
//! 3. Permute the resulting fractions by the page's intrinsic rotation
//! 4. Apply the fractions to the page box in document units
//!
//! # Coordinate System
//!
//! - Selections and tiles are in pixel space (origin top-left, y down)
//! - Crop fractions are normalized (0.0 to 1.0) per side
//! - Page boxes are in document space (origin bottom-left, y up)

mod crop;
mod distribute;
mod rotation;

pub use crop::{to_absolute_box, to_crop_fraction, CropFraction};
pub use distribute::distribute;
pub use rotation::PageRotation;

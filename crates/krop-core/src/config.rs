//! Explicit configuration passed into cropping operations.
//!
//! Nothing in the engine reads ambient settings. The embedding application
//! loads a [`CropConfig`] (e.g. from its settings store, via serde) and hands
//! it to the operations that need it.

use serde::{Deserialize, Serialize};

use crate::selection::SelectionMode;
use crate::transform::PageRotation;

/// Extra space around an auto-trimmed rectangle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Create padding in CSS order (top, right, bottom, left).
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same padding on all four sides.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// A reading device whose screen ratio selections are distributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceType {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl DeviceType {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// Screen ratio (width / height), or `None` for "do not split pages".
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(f64::from(self.width) / f64::from(self.height))
        }
    }

    /// Built-in device list offered when no custom list has been stored.
    pub fn defaults() -> Vec<DeviceType> {
        vec![
            DeviceType::new("Generic (don't break pages into parts)", 0, 0),
            DeviceType::new("4:3 eReader", 4, 3),
            DeviceType::new("4:3 eReader (widescreen)", 3, 4),
            DeviceType::new("Nook 1st Ed.", 600, 730),
            DeviceType::new("Nook 1st Ed. (widescreen)", 730, 600),
        ]
    }
}

/// Settings for trimming, selection visibility, tiling and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Space kept around auto-trimmed content
    pub padding: Padding,
    /// Largest gray difference between neighbouring pixels still counted as blank
    pub sensitivity: f64,
    /// Number of larger differences tolerated per scanline
    pub allowed_changes: u32,
    /// Which pages a selection applies to
    pub selection_mode: SelectionMode,
    /// Ratio (width / height) selections are distributed into, if any
    pub distribute_ratio: Option<f64>,
    /// Clockwise rotation applied to every output page
    pub output_rotation: PageRotation,
    /// Minimum selection width in pixels (at least 1)
    pub min_width: f64,
    /// Minimum selection height in pixels (at least 1)
    pub min_height: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            padding: Padding::uniform(2.0),
            sensitivity: 5.0,
            allowed_changes: 0,
            selection_mode: SelectionMode::All,
            distribute_ratio: None,
            output_rotation: PageRotation::Deg0,
            min_width: 1.0,
            min_height: 1.0,
        }
    }
}

impl CropConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Distribute selections to the screen ratio of `device`.
    pub fn with_device(mut self, device: &DeviceType) -> Self {
        self.distribute_ratio = device.aspect_ratio();
        self
    }

    /// Clamp out-of-range values into their valid domain.
    pub fn sanitized(mut self) -> Self {
        self.min_width = self.min_width.max(1.0);
        self.min_height = self.min_height.max(1.0);
        // f64::max also replaces NaN
        self.sensitivity = self.sensitivity.max(0.0);
        for side in [
            &mut self.padding.top,
            &mut self.padding.right,
            &mut self.padding.bottom,
            &mut self.padding.left,
        ] {
            *side = side.max(0.0);
        }
        self.distribute_ratio = self.distribute_ratio.filter(|r| *r > 0.0 && r.is_finite());
        self
    }
}

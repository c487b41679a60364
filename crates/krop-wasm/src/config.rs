//! Crop settings WASM bindings.
//!
//! Settings arrive from form fields as strings. Malformed values never
//! reach the engine: they are replaced by the documented default and a
//! warning is printed to the browser console.

use krop_core::parse::{parse_aspect_ratio, parse_padding};
use krop_core::{CropConfig, DeviceType, PageRotation, Padding, SelectionMode};
use wasm_bindgen::prelude::*;

use crate::warn;

/// Crop settings wrapper for JavaScript
#[wasm_bindgen]
pub struct CropSettings {
    inner: CropConfig,
}

#[wasm_bindgen]
impl CropSettings {
    /// Create settings with default values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: CropConfig::new(),
        }
    }

    /// Get sensitivity value
    #[wasm_bindgen(getter)]
    pub fn sensitivity(&self) -> f64 {
        self.inner.sensitivity
    }

    /// Set sensitivity value
    #[wasm_bindgen(setter)]
    pub fn set_sensitivity(&mut self, value: f64) {
        self.inner.sensitivity = value.max(0.0);
    }

    /// Get allowed changes per scanline
    #[wasm_bindgen(getter)]
    pub fn allowed_changes(&self) -> u32 {
        self.inner.allowed_changes
    }

    /// Set allowed changes per scanline
    #[wasm_bindgen(setter)]
    pub fn set_allowed_changes(&mut self, value: u32) {
        self.inner.allowed_changes = value;
    }

    /// Get the selection mode ("all", "evenodd" or "individual")
    #[wasm_bindgen(getter)]
    pub fn selection_mode(&self) -> String {
        mode_name(self.inner.selection_mode).to_string()
    }

    /// Set the selection mode. Unknown names fall back to "all".
    #[wasm_bindgen(setter)]
    pub fn set_selection_mode(&mut self, value: &str) {
        self.inner.selection_mode = parse_mode(value);
    }

    /// Get the output rotation in degrees clockwise
    #[wasm_bindgen(getter)]
    pub fn output_rotation(&self) -> u16 {
        self.inner.output_rotation.degrees()
    }

    /// Set the output rotation (0, 90, 180 or 270). Other values keep 0.
    #[wasm_bindgen(setter)]
    pub fn set_output_rotation(&mut self, degrees: i32) {
        self.inner.output_rotation = PageRotation::from_degrees(degrees).unwrap_or_else(|| {
            warn(&format!("Invalid output rotation {degrees}, using 0"));
            PageRotation::Deg0
        });
    }

    /// Get the distribute ratio (width / height), if any
    #[wasm_bindgen(getter)]
    pub fn distribute_ratio(&self) -> Option<f64> {
        self.inner.distribute_ratio
    }

    /// Set the distribute ratio from an aspect string such as "4:3".
    ///
    /// An empty or unparsable string turns distribution off.
    pub fn set_distribute_aspect(&mut self, value: &str) {
        self.inner.distribute_ratio = parse_aspect_ratio(value);
    }

    /// Distribute to the screen ratio of a built-in device (see `device_types`).
    pub fn set_device(&mut self, index: usize) {
        match DeviceType::defaults().get(index) {
            Some(device) => self.inner = self.inner.clone().with_device(device),
            None => warn(&format!("Unknown device type {index}")),
        }
    }

    /// Set the padding from CSS-style shorthand ("2", "2,4", "1,2,3,4").
    ///
    /// Malformed input means no padding.
    pub fn set_padding(&mut self, value: &str) {
        self.inner.padding = parse_padding(value).unwrap_or_else(|e| {
            warn(&format!("{e}; using no padding"));
            Padding::default()
        });
    }

    /// Get padding as [top, right, bottom, left]
    pub fn padding(&self) -> Vec<f64> {
        let p = self.inner.padding;
        vec![p.top, p.right, p.bottom, p.left]
    }

    /// Serialize to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from JSON. Missing fields take their defaults.
    pub fn from_json(value: JsValue) -> Result<CropSettings, JsValue> {
        let inner: CropConfig =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner: inner.sanitized(),
        })
    }
}

impl Default for CropSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl CropSettings {
    pub(crate) fn config(&self) -> &CropConfig {
        &self.inner
    }
}

/// Built-in reading devices as `[{ name, width, height }]`.
#[wasm_bindgen]
pub fn device_types() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&DeviceType::defaults())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn mode_name(mode: SelectionMode) -> &'static str {
    match mode {
        SelectionMode::All => "all",
        SelectionMode::EvenOdd => "evenodd",
        SelectionMode::Individual => "individual",
    }
}

pub(crate) fn parse_mode(value: &str) -> SelectionMode {
    match value.trim().to_ascii_lowercase().as_str() {
        "all" => SelectionMode::All,
        "evenodd" | "even_odd" | "even-odd" => SelectionMode::EvenOdd,
        "individual" => SelectionMode::Individual,
        other => {
            warn(&format!("Unknown selection mode {other:?}, using \"all\""));
            SelectionMode::All
        }
    }
}

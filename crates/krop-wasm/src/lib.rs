//! Krop WASM - WebAssembly bindings for krop
//!
//! This crate exposes the krop-core selection and cropping engine to a
//! browser front end. The front end renders pages, draws selections and
//! writes the output PDF; everything geometric happens here.
//!
//! # Module Structure
//!
//! - `config` - Crop settings (padding, sensitivity, selection mode, devices)
//! - `types` - WASM-compatible wrapper for rendered page images
//! - `selection` - The selection set: editing, trimming and crop boxes
//!
//! # Usage
//!
//! ```typescript
//! import init, { CropSettings, JsSelectionSet, JsPageImage, page_range } from '@krop/wasm';
//!
//! await init();
//!
//! const settings = new CropSettings();
//! settings.set_padding("2, 4");
//! const selections = new JsSelectionSet(settings);
//!
//! // Auto-trim the page currently shown
//! const data = ctx.getImageData(0, 0, canvas.width, canvas.height);
//! const image = JsPageImage.from_rgba(data.width, data.height, data.data);
//! selections.trim_all(pageIndex, image, settings);
//!
//! // Boxes for the output document, four numbers per output page
//! for (const page of page_range(rangeField.value, pageCount)) {
//!   const boxes = selections.crop_boxes(page, rotationOf(page), mediaBoxOf(page));
//! }
//! ```

use wasm_bindgen::prelude::*;

mod config;
mod selection;
mod types;

// Re-export public types
pub use config::{device_types, CropSettings};
pub use selection::JsSelectionSet;
pub use types::JsPageImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Parse a page range ("1-3, 7, 10-") into 0-based page indices.
///
/// Empty or malformed input selects every page; malformed input also logs
/// a warning to the console.
#[wasm_bindgen]
pub fn page_range(s: &str, page_count: u32) -> Vec<u32> {
    let page_count = page_count as usize;
    krop_core::parse_page_range(s, page_count)
        .unwrap_or_else(|e| {
            warn(&format!("{e}; using all pages"));
            (0..page_count).collect()
        })
        .into_iter()
        .map(|page| page as u32)
        .collect()
}

/// Parse an aspect ratio ("4:3" or "1.5"). Returns undefined when the
/// selection should stay unconstrained.
#[wasm_bindgen]
pub fn aspect_ratio(s: &str) -> Option<f64> {
    krop_core::parse_aspect_ratio(s)
}

/// Report a rejected user value.
#[cfg(target_arch = "wasm32")]
pub(crate) fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Report a rejected user value.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn warn(message: &str) {
    log::warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_page_range() {
        assert_eq!(page_range("1-2, 4", 5), vec![0, 1, 3]);
        assert_eq!(page_range("", 3), vec![0, 1, 2]);
        assert_eq!(page_range("7", 3), vec![0, 1, 2]);
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio("3:4"), Some(0.75));
        assert_eq!(aspect_ratio("w : h"), None);
    }
}

//! WASM-compatible wrapper types for rendered pages.
//!
//! The browser renders PDF pages itself (e.g. into a canvas) and hands the
//! pixels over as a [`JsPageImage`]. Margin trimming samples it directly in
//! WASM memory.

use krop_core::raster::{gray_u8, Raster};
use krop_core::Rect;
use wasm_bindgen::prelude::*;

/// A rendered page for JavaScript.
///
/// # Memory Management
///
/// The pixel data is copied into WASM memory once, when the image is
/// constructed. The `free()` method releases it early; otherwise
/// wasm-bindgen's finalizer handles cleanup.
#[wasm_bindgen]
pub struct JsPageImage {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPageImage {
    /// Create a page image from RGB pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPageImage, JsValue> {
        Self::with_channels(width, height, 3, pixels)
            .map_err(|msg| JsValue::from_str(&msg))
    }

    /// Create a page image from canvas `ImageData` (RGBA, 4 bytes per pixel).
    ///
    /// Alpha is ignored.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPageImage, JsValue> {
        Self::with_channels(width, height, 4, pixels)
            .map_err(|msg| JsValue::from_str(&msg))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPageImage {
    pub(crate) fn with_channels(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<Self, String> {
        let expected = width as usize * height as usize * channels as usize;
        if pixels.len() != expected {
            return Err(format!(
                "Expected {} bytes for a {}x{} image, got {}",
                expected,
                width,
                height,
                pixels.len()
            ));
        }
        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// The full page rectangle in pixel space.
    pub(crate) fn page_rect(&self) -> Rect {
        Rect::from_size(0.0, 0.0, self.width as f64, self.height as f64)
    }
}

impl Raster for JsPageImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn gray_at(&self, x: u32, y: u32) -> u8 {
        let idx = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        gray_u8(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }
}

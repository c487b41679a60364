//! Grayscale access to rendered page images.
//!
//! Margin trimming only ever looks at single gray samples, so every pixel
//! source is reduced to the [`Raster`] trait. Gray values are computed with
//! the integer weights `(11 r + 16 g + 5 b) / 32`, which is what common
//! rendering toolkits use for their gray conversion.

use image::{GrayImage, RgbImage};

/// Weight of the red channel in the gray conversion (out of 32).
pub const GRAY_WEIGHT_R: u32 = 11;

/// Weight of the green channel in the gray conversion (out of 32).
pub const GRAY_WEIGHT_G: u32 = 16;

/// Weight of the blue channel in the gray conversion (out of 32).
pub const GRAY_WEIGHT_B: u32 = 5;

/// Calculate the gray value of an RGB pixel.
///
/// # Arguments
/// * `r` - Red channel value (0-255)
/// * `g` - Green channel value (0-255)
/// * `b` - Blue channel value (0-255)
///
/// # Returns
/// Gray value (0-255)
#[inline]
pub fn gray_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = GRAY_WEIGHT_R * r as u32 + GRAY_WEIGHT_G * g as u32 + GRAY_WEIGHT_B * b as u32;
    (sum / 32) as u8
}

/// A rendered page that can be sampled in grayscale.
pub trait Raster {
    /// Image width in pixels.
    fn width(&self) -> u32;

    /// Image height in pixels.
    fn height(&self) -> u32;

    /// Gray value of the pixel at `(x, y)`.
    ///
    /// Callers guarantee `x < width()` and `y < height()`.
    fn gray_at(&self, x: u32, y: u32) -> u8;
}

/// An RGB page image as handed over by the page rasterizer.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// RGB pixel data (3 bytes per pixel, row-major order)
    pub pixels: Vec<u8>,
}

impl PageImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 3);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a page filled with a single gray value.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self::new(width, height, vec![value; width as usize * height as usize * 3])
    }

    /// Set the pixel at `(x, y)` to a gray value.
    pub fn put_gray(&mut self, x: u32, y: u32, value: u8) {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        self.pixels[idx..idx + 3].fill(value);
    }
}

impl Raster for PageImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn gray_at(&self, x: u32, y: u32) -> u8 {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        gray_u8(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }
}

impl Raster for GrayImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    #[inline]
    fn gray_at(&self, x: u32, y: u32) -> u8 {
        self.get_pixel(x, y).0[0]
    }
}

impl Raster for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    #[inline]
    fn gray_at(&self, x: u32, y: u32) -> u8 {
        let [r, g, b] = self.get_pixel(x, y).0;
        gray_u8(r, g, b)
    }
}

impl<R: Raster + ?Sized> Raster for &R {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn gray_at(&self, x: u32, y: u32) -> u8 {
        (**self).gray_at(x, y)
    }
}

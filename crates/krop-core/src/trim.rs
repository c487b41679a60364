//! Automatic detection of blank page margins.
//!
//! Each edge of the starting rectangle is pushed inwards one pixel at a
//! time for as long as the scanline under it looks blank. A scanline is
//! blank ("trimmable") when at most `allowed_changes` neighbouring samples
//! differ by more than `sensitivity` gray levels.
//!
//! # Algorithm
//!
//! ```text
//! top    -> scan row `top`,        x in left..right, then top += 1
//! bottom -> scan row `bottom - 1`, x in left..right, then bottom -= 1
//! left   -> scan column `left`,    y in top..bottom, then left += 1
//! right  -> scan column `right-1`, y in top..bottom, then right -= 1
//! ```
//!
//! Only local jumps between adjacent samples are counted, so a slow
//! gradient with a wide overall range still counts as blank.
//!
//! Trimming several pages to one rectangle that is safe for all of them is
//! done by bounding union of the per-page results (see [`trim_pages`]).

use crate::config::{CropConfig, Padding};
use crate::geometry::Rect;
use crate::raster::Raster;

/// Decide whether a scanline contains no content.
///
/// An empty scanline is trimmable.
pub fn is_trimmable<I>(samples: I, sensitivity: f64, allowed_changes: u32) -> bool
where
    I: IntoIterator<Item = u8>,
{
    let mut samples = samples.into_iter();
    let Some(mut prev) = samples.next() else {
        return true;
    };

    let mut changes = 0u32;
    for sample in samples {
        if f64::from((i16::from(sample) - i16::from(prev)).abs()) > sensitivity {
            changes += 1;
            if changes > allowed_changes {
                return false;
            }
        }
        prev = sample;
    }
    true
}

/// Shrink `start` to the content bounding box of `image`.
///
/// # Arguments
///
/// * `image` - Rendered page to scan
/// * `start` - Rectangle to trim, in pixel coordinates of `image`
/// * `union` - Optional rectangle (e.g. the trim result of other pages) the
///   result must not be smaller than
/// * `sensitivity` - Largest gray difference between neighbours still
///   considered blank
/// * `allowed_changes` - Number of larger differences tolerated per scanline
///
/// # Returns
///
/// A rectangle inside `start`. Scanning starts from the whole pixels inside
/// `start` that also lie on the image. A fully blank region collapses to
/// zero width or height. An image with no pixels returns `start` unmodified.
pub fn trim_margins<R: Raster + ?Sized>(
    image: &R,
    start: &Rect,
    union: Option<&Rect>,
    sensitivity: f64,
    allowed_changes: u32,
) -> Rect {
    if image.width() == 0 || image.height() == 0 {
        return *start;
    }

    let bounds = Rect::new(0.0, 0.0, image.width() as f64, image.height() as f64);
    let clipped = start.pixel_interior().intersected(&bounds);

    let mut left = clipped.left as u32;
    let mut top = clipped.top as u32;
    let mut right = clipped.right as u32;
    let mut bottom = clipped.bottom as u32;

    while top < bottom && union.map_or(true, |u| (top as f64) < u.top) {
        let row = (left..right).map(move |x| image.gray_at(x, top));
        if !is_trimmable(row, sensitivity, allowed_changes) {
            break;
        }
        top += 1;
    }
    while top < bottom && union.map_or(true, |u| (bottom as f64) > u.bottom) {
        let y = bottom - 1;
        let row = (left..right).map(move |x| image.gray_at(x, y));
        if !is_trimmable(row, sensitivity, allowed_changes) {
            break;
        }
        bottom -= 1;
    }
    while left < right && union.map_or(true, |u| (left as f64) < u.left) {
        let column = (top..bottom).map(move |y| image.gray_at(left, y));
        if !is_trimmable(column, sensitivity, allowed_changes) {
            break;
        }
        left += 1;
    }
    while left < right && union.map_or(true, |u| (right as f64) > u.right) {
        let x = right - 1;
        let column = (top..bottom).map(move |y| image.gray_at(x, y));
        if !is_trimmable(column, sensitivity, allowed_changes) {
            break;
        }
        right -= 1;
    }

    let trimmed = Rect::new(left as f64, top as f64, right as f64, bottom as f64);
    let result = match union {
        Some(u) => trimmed.united(u).intersected(&clipped),
        None => trimmed,
    }
    .clamped_to(start);

    log::debug!(
        "trimmed ({:.0}, {:.0}, {:.0}, {:.0}) to ({:.0}, {:.0}, {:.0}, {:.0})",
        clipped.left,
        clipped.top,
        clipped.right,
        clipped.bottom,
        result.left,
        result.top,
        result.right,
        result.bottom
    );

    result
}

/// Grow a trimmed rectangle by `padding`, without leaving `start`.
pub fn apply_padding(trimmed: &Rect, start: &Rect, padding: &Padding) -> Rect {
    trimmed
        .adjusted(-padding.left, -padding.top, padding.right, padding.bottom)
        .intersected(start)
}

/// Trim `start` on one page using the thresholds and padding from `config`.
pub fn trim_with_padding<R: Raster + ?Sized>(image: &R, start: &Rect, config: &CropConfig) -> Rect {
    let trimmed = trim_margins(
        image,
        start,
        None,
        config.sensitivity,
        config.allowed_changes,
    );
    apply_padding(&trimmed, start, &config.padding)
}

/// Trim `start` on every page and combine the results.
///
/// Every page is trimmed on its own and the returned rectangle is the
/// bounding union of the per-page results, so it keeps the content of all
/// pages, with the configured padding applied. With the `parallel` feature
/// the pages are scanned on the rayon thread pool. Returns `None` when
/// `images` is empty.
pub fn trim_pages<R: Raster + Sync>(images: &[R], start: &Rect, config: &CropConfig) -> Option<Rect> {
    let trim = |image: &R| {
        trim_margins(
            image,
            start,
            None,
            config.sensitivity,
            config.allowed_changes,
        )
    };

    #[cfg(feature = "parallel")]
    let combined = {
        use rayon::prelude::*;
        images.par_iter().map(trim).reduce_with(|a, b| a.united(&b))
    };
    #[cfg(not(feature = "parallel"))]
    let combined = images.iter().map(trim).reduce(|a, b| a.united(&b));

    combined.map(|r| apply_padding(&r, start, &config.padding))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::raster::PageImage;
    use proptest::prelude::*;

    /// Random page of gray values in a few distinct levels.
    fn page_strategy() -> impl Strategy<Value = PageImage> {
        (4u32..=40, 4u32..=40).prop_flat_map(|(w, h)| {
            prop::collection::vec(prop::sample::select(vec![0u8, 128, 255]), (w * h) as usize)
                .prop_map(move |grays| {
                    let pixels = grays.iter().flat_map(|g| [*g, *g, *g]).collect();
                    PageImage::new(w, h, pixels)
                })
        })
    }

    proptest! {
        /// Property: trimming never grows the rectangle.
        #[test]
        fn prop_trim_within_start(
            img in page_strategy(),
            (l, t) in (-0.1f64..0.5, -0.1f64..0.5),
            (r, b) in (0.6f64..1.1, 0.6f64..1.1),
            sensitivity in 0.0f64..50.0,
            allowed in 0u32..3,
        ) {
            let start = Rect::new(
                l * img.width as f64,
                t * img.height as f64,
                r * img.width as f64,
                b * img.height as f64,
            );
            let result = trim_margins(&img, &start, None, sensitivity, allowed);

            prop_assert!(start.contains_rect(&result), "{:?} not in {:?}", result, start);
            prop_assert!(result.width() >= 0.0 && result.height() >= 0.0);
        }

        /// Property: a fractional union never pushes the result outside start.
        #[test]
        fn prop_trim_with_union_within_start(
            img in page_strategy(),
            offset in 0.0f64..1.0,
        ) {
            let start = Rect::new(
                offset,
                offset,
                img.width as f64 - offset,
                img.height as f64 - offset,
            );
            let union = Rect::new(1.5, 1.5, 2.5, 2.5);
            let result = trim_margins(&img, &start, Some(&union), 5.0, 0);

            prop_assert!(start.contains_rect(&result), "{:?} not in {:?}", result, start);
        }

        /// Property: with a union rect the result covers it.
        #[test]
        fn prop_trim_covers_union(img in page_strategy()) {
            let start = Rect::new(0.0, 0.0, img.width as f64, img.height as f64);
            let union = Rect::new(1.0, 1.0, 3.0, 3.0);
            let result = trim_margins(&img, &start, Some(&union), 5.0, 0);

            prop_assert!(result.contains_rect(&union));
            prop_assert!(start.contains_rect(&result));
        }

        /// Property: trimming is deterministic.
        #[test]
        fn prop_trim_deterministic(img in page_strategy()) {
            let start = Rect::new(0.0, 0.0, img.width as f64, img.height as f64);
            let a = trim_margins(&img, &start, None, 5.0, 0);
            let b = trim_margins(&img, &start, None, 5.0, 0);
            prop_assert_eq!(a, b);
        }
    }
}

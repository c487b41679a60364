//! Splitting one selection into fixed-aspect-ratio output tiles.
//!
//! Small reading devices cannot show a tall page region legibly on one
//! screen. Distributing cuts the region into horizontal strips whose
//! width/height equals the device ratio. The strips overlap evenly so that
//! the first starts at the region's top and the last ends at its bottom.

use crate::geometry::Rect;

/// Split `rect` into tiles of aspect ratio `ratio` (width / height).
///
/// # Returns
///
/// The tiles ordered top to bottom. Without a usable ratio, or when one
/// tile already covers the region, the result is `[rect]`.
///
/// # Guarantees
///
/// - The first tile's top equals `rect.top`, the last tile's bottom equals
///   `rect.bottom`
/// - Consecutive tiles overlap by the same non-negative amount
/// - All tiles share the region's left and right edges
pub fn distribute(rect: &Rect, ratio: Option<f64>) -> Vec<Rect> {
    let ratio = match ratio {
        Some(r) if r > 0.0 && r.is_finite() => r,
        _ => return vec![*rect],
    };
    if rect.width() <= 0.0 {
        return vec![*rect];
    }

    let piece_height = rect.width() / ratio;
    let count = (rect.height() / piece_height).ceil();
    if count <= 1.0 || !count.is_finite() {
        return vec![*rect];
    }

    let overlap = (count * piece_height - rect.height()) / (count - 1.0);
    let step = piece_height - overlap;
    let count = count as usize;

    log::debug!(
        "distributing {:.1}x{:.1} into {} tiles (overlap {:.2})",
        rect.width(),
        rect.height(),
        count,
        overlap
    );

    (0..count)
        .map(|i| {
            let top = rect.top + i as f64 * step;
            // pin the outer edges so rounding cannot drift off the region
            let (top, bottom) = match i {
                0 => (rect.top, rect.top + piece_height),
                _ if i == count - 1 => (rect.bottom - piece_height, rect.bottom),
                _ => (top, top + piece_height),
            };
            Rect::new(rect.left, top, rect.right, bottom)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ratio_returns_rect() {
        let r = Rect::new(0.0, 0.0, 100.0, 300.0);
        assert_eq!(distribute(&r, None), vec![r]);
        assert_eq!(distribute(&r, Some(0.0)), vec![r]);
        assert_eq!(distribute(&r, Some(-1.0)), vec![r]);
    }

    #[test]
    fn test_single_tile_when_region_is_short() {
        // 100 wide at 4:3 gives 75 high tiles; 60 fits in one
        let r = Rect::new(0.0, 0.0, 100.0, 60.0);
        assert_eq!(distribute(&r, Some(4.0 / 3.0)), vec![r]);
    }

    #[test]
    fn test_exact_fit_has_no_overlap() {
        // 100 wide, ratio 1 -> 100 high tiles, 300 / 100 = 3 tiles
        let r = Rect::new(10.0, 0.0, 110.0, 300.0);
        let tiles = distribute(&r, Some(1.0));
        assert_eq!(tiles.len(), 3);
        assert_eq!(tiles[0], Rect::new(10.0, 0.0, 110.0, 100.0));
        assert_eq!(tiles[1], Rect::new(10.0, 100.0, 110.0, 200.0));
        assert_eq!(tiles[2], Rect::new(10.0, 200.0, 110.0, 300.0));
    }

    #[test]
    fn test_overlapping_tiles() {
        // 100 wide, ratio 1 -> 100 high; 250 needs 3 tiles with 25 overlap
        let r = Rect::new(0.0, 0.0, 100.0, 250.0);
        let tiles = distribute(&r, Some(1.0));
        assert_eq!(tiles.len(), 3);
        assert_eq!(tiles[0].top, 0.0);
        assert!((tiles[1].top - 75.0).abs() < 1e-9);
        assert_eq!(tiles[2].bottom, 250.0);
        assert!((tiles[0].bottom - tiles[1].top - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_tiles_keep_ratio() {
        let r = Rect::new(0.0, 0.0, 600.0, 2000.0);
        let ratio = 600.0 / 730.0;
        for tile in distribute(&r, Some(ratio)) {
            assert!((tile.width() / tile.height() - ratio).abs() < 1e-9);
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

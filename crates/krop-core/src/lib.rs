//! Krop Core - PDF page cropping geometry
//!
//! This crate provides the geometry engine behind a PDF cropping tool:
//! selections with a constraint solver, selection modes, splitting
//! selections into screen-sized tiles, automatic margin trimming on
//! rendered pages, and mapping selections onto document page boxes.
//!
//! Rendering pages and reading or writing PDF files are left to the
//! embedding application, which plugs them in through [`PageRasterizer`]
//! and [`DocumentEditor`].

pub mod config;
pub mod export;
pub mod geometry;
pub mod grid;
pub mod parse;
pub mod raster;
pub mod selection;
pub mod transform;
pub mod trim;

pub use config::{CropConfig, DeviceType, Padding};
pub use export::{
    export_cropped, trim_across_pages, DocumentEditor, ExportError, ExportSummary, PageRasterizer,
};
pub use geometry::{DocumentBox, EdgeDeltas, Rect};
pub use grid::{grid_rects, GridSpec};
pub use parse::{
    parse_aspect_ratio, parse_grid_spec, parse_padding, parse_page_range, ParseError,
};
pub use raster::{PageImage, Raster};
pub use selection::{RegionId, SelectionMode, SelectionRegion, SelectionSet};
pub use transform::{distribute, to_absolute_box, to_crop_fraction, CropFraction, PageRotation};
pub use trim::{trim_margins, trim_pages, trim_with_padding};

#[cfg(test)]
mod tests {
    use super::*;

    fn bordered_page() -> PageImage {
        // 10px uniform border, noisy interior
        let mut img = PageImage::filled(100, 100, 200);
        for y in 10..90 {
            for x in 10..90 {
                img.put_gray(x, y, if (x + y) % 2 == 0 { 20 } else { 240 });
            }
        }
        img
    }

    #[test]
    fn test_trim_scenario() {
        let start = Rect::new(0.0, 0.0, 100.0, 100.0);
        let trimmed = trim_margins(&bordered_page(), &start, None, 5.0, 0);
        assert_eq!(trimmed, Rect::new(10.0, 10.0, 90.0, 90.0));
    }

    #[test]
    fn test_select_trim_and_map() {
        let page = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut config = CropConfig::new();
        config.padding = parse_padding("0").unwrap();

        let mut set = SelectionSet::from_config(&config);
        let ids = set.trim_visible(0, &bordered_page(), &page, &config);
        assert_eq!(ids.len(), 1);

        let values = set.crop_values(0, PageRotation::Deg0);
        assert_eq!(values, vec![CropFraction::new(0.1, 0.1, 0.1, 0.1)]);

        let bx = to_absolute_box(&values[0], &DocumentBox::new(0.0, 0.0, 500.0, 500.0));
        assert_eq!(bx, DocumentBox::new(50.0, 50.0, 450.0, 450.0));
    }

    #[test]
    fn test_device_config_distributes() {
        let device = &DeviceType::defaults()[1];
        let config = CropConfig::new().with_device(device);
        let mut set = SelectionSet::from_config(&config);
        let id = set.create_region(0, &Rect::new(0.0, 0.0, 300.0, 400.0), None);
        // 300 wide at 4:3 gives 225 high tiles, two of them for 400
        assert_eq!(set.tiles(id).len(), 2);
        assert_eq!(set.crop_values(5, PageRotation::Deg0).len(), 2);
    }
}

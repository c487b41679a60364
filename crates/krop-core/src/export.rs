//! Writing cropped pages through the document backends.
//!
//! The engine never touches PDF bytes. Reading page images and editing page
//! boxes happen behind two collaborator traits, so any rendering or PDF
//! library can be plugged in:
//!
//! - [`PageRasterizer`] renders pages for display and margin trimming
//! - [`DocumentEditor`] copies pages into an output document and sets their
//!   boxes and rotation
//!
//! # Coordinate System
//!
//! Selections live in pixel space (origin top-left, y down) of the rendered
//! and possibly rotated page. Document boxes live in the backend's space
//! (origin bottom-left, y up) of the unrotated page. [`SelectionSet::crop_values`]
//! bridges the two with rotation-corrected crop fractions, and
//! [`to_absolute_box`] applies a fraction to the page box.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::config::CropConfig;
use crate::geometry::{DocumentBox, Rect};
use crate::raster::Raster;
use crate::selection::{RegionId, SelectionSet};
use crate::transform::{to_absolute_box, PageRotation};

/// Error types for document access and export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The caller asked to stop before all pages were written.
    #[error("Export cancelled")]
    Cancelled,

    /// A page index beyond the end of the document.
    #[error("Page index {page} is out of range (document has {page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },

    /// The rasterizer failed to render a page.
    #[error("Failed to render page: {0}")]
    Render(String),

    /// The document backend rejected an operation.
    #[error("Document backend error: {0}")]
    Backend(String),
}

/// Renders document pages to images.
pub trait PageRasterizer {
    type Image: Raster;

    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Intrinsic rotation of a page, as displayed.
    fn rotation(&self, page_index: usize) -> PageRotation;

    /// Render a page (with its intrinsic rotation applied).
    fn render(&self, page_index: usize) -> Result<Self::Image, ExportError>;
}

/// Edits page boxes and assembles the output document.
pub trait DocumentEditor {
    /// Handle to a page that is not yet part of the output.
    type Page;

    /// A fresh copy of a source page. Every call returns an independent
    /// copy, so one source page can become several output pages.
    fn source_page(&mut self, page_index: usize) -> Result<Self::Page, ExportError>;

    /// The page's visible box in document space.
    fn get_box(&self, page: &Self::Page) -> DocumentBox;

    /// Replace the page's visible box.
    fn set_box(&mut self, page: &mut Self::Page, bx: DocumentBox);

    /// Rotate the page clockwise.
    fn rotate(&mut self, page: &mut Self::Page, rotation: PageRotation);

    /// Append the page to the output document.
    fn add_page(&mut self, page: Self::Page) -> Result<(), ExportError>;
}

/// Outcome of an export pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Output pages written
    pub pages_written: usize,
    /// Source pages without any visible selection
    pub pages_skipped: usize,
}

/// Write one output page per crop of every selected source page.
///
/// For each page in `pages` (0-based, in order), the crop fractions of the
/// visible selections are applied to a fresh copy of the page, which is then
/// rotated by the configured output rotation and appended to the output. Pages without a
/// visible selection are skipped.
///
/// `cancel` is checked before every source page; once it is set, the pass
/// stops with [`ExportError::Cancelled`]. Pages already added stay in the
/// output.
pub fn export_cropped<P, E>(
    rasterizer: &P,
    editor: &mut E,
    selections: &SelectionSet,
    pages: &[usize],
    config: &CropConfig,
    cancel: &AtomicBool,
) -> Result<ExportSummary, ExportError>
where
    P: PageRasterizer + ?Sized,
    E: DocumentEditor + ?Sized,
{
    let page_count = rasterizer.page_count();
    let output_rotation = config.output_rotation;
    let mut summary = ExportSummary::default();

    for &page_index in pages {
        if cancel.load(Ordering::Relaxed) {
            log::debug!("export cancelled after {} pages", summary.pages_written);
            return Err(ExportError::Cancelled);
        }
        if page_index >= page_count {
            return Err(ExportError::PageOutOfRange {
                page: page_index,
                page_count,
            });
        }

        let crops = selections.crop_values(page_index, rasterizer.rotation(page_index));
        if crops.is_empty() {
            summary.pages_skipped += 1;
            continue;
        }

        for crop in &crops {
            let mut page = editor.source_page(page_index)?;
            let page_box = editor.get_box(&page);
            editor.set_box(&mut page, to_absolute_box(crop, &page_box));
            if output_rotation != PageRotation::Deg0 {
                editor.rotate(&mut page, output_rotation);
            }
            editor.add_page(page)?;
            summary.pages_written += 1;
        }
        log::debug!("page {}: {} crops written", page_index + 1, crops.len());
    }

    Ok(summary)
}

/// Trim a selection so it keeps the content of all `pages`.
///
/// Each page is rendered and scanned; the selection is shrunk to the union
/// of the per-page results plus padding. Pages are expected to render at
/// the size of the page the selection was drawn on.
///
/// Returns the new rectangle, or `None` for an unknown id or empty `pages`.
pub fn trim_across_pages<P>(
    rasterizer: &P,
    selections: &mut SelectionSet,
    id: RegionId,
    pages: &[usize],
    config: &CropConfig,
) -> Result<Option<Rect>, ExportError>
where
    P: PageRasterizer + ?Sized,
    P::Image: Sync,
{
    let page_count = rasterizer.page_count();
    let images = pages
        .iter()
        .map(|&page| {
            if page >= page_count {
                Err(ExportError::PageOutOfRange { page, page_count })
            } else {
                rasterizer.render(page)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let page_rect = match images.first() {
        Some(image) => Rect::from_size(0.0, 0.0, image.width() as f64, image.height() as f64),
        None => return Ok(None),
    };

    Ok(selections.trim_region_pages(id, &images, &page_rect, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PageImage;
    use crate::selection::SelectionMode;

    struct FakeRasterizer {
        pages: Vec<PageImage>,
        rotations: Vec<PageRotation>,
    }

    impl FakeRasterizer {
        fn blank(count: usize) -> Self {
            Self {
                pages: (0..count).map(|_| PageImage::filled(100, 200, 255)).collect(),
                rotations: vec![PageRotation::Deg0; count],
            }
        }
    }

    impl PageRasterizer for FakeRasterizer {
        type Image = PageImage;

        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn rotation(&self, page_index: usize) -> PageRotation {
            self.rotations[page_index]
        }

        fn render(&self, page_index: usize) -> Result<PageImage, ExportError> {
            self.pages
                .get(page_index)
                .cloned()
                .ok_or_else(|| ExportError::Render(format!("no page {page_index}")))
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct FakePage {
        source: usize,
        bx: DocumentBox,
        rotation: u16,
    }

    #[derive(Default)]
    struct FakeEditor {
        output: Vec<FakePage>,
        reject_adds: bool,
    }

    impl DocumentEditor for FakeEditor {
        type Page = FakePage;

        fn source_page(&mut self, page_index: usize) -> Result<FakePage, ExportError> {
            Ok(FakePage {
                source: page_index,
                bx: DocumentBox::new(0.0, 0.0, 200.0, 400.0),
                rotation: 0,
            })
        }

        fn get_box(&self, page: &FakePage) -> DocumentBox {
            page.bx
        }

        fn set_box(&mut self, page: &mut FakePage, bx: DocumentBox) {
            page.bx = bx;
        }

        fn rotate(&mut self, page: &mut FakePage, rotation: PageRotation) {
            page.rotation = (page.rotation + rotation.degrees()) % 360;
        }

        fn add_page(&mut self, page: FakePage) -> Result<(), ExportError> {
            if self.reject_adds {
                return Err(ExportError::Backend("read-only output".to_string()));
            }
            self.output.push(page);
            Ok(())
        }
    }

    fn page_rect() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 200.0)
    }

    #[test]
    fn test_export_left_half() {
        let rasterizer = FakeRasterizer::blank(2);
        let mut editor = FakeEditor::default();
        let mut set = SelectionSet::new();
        set.create_region(0, &page_rect(), Some(Rect::new(50.0, 0.0, 100.0, 200.0)));

        let cancel = AtomicBool::new(false);
        let summary =
            export_cropped(&rasterizer, &mut editor, &set, &[0, 1], &CropConfig::default(), &cancel)
                .unwrap();

        assert_eq!(summary.pages_written, 2);
        assert_eq!(editor.output[0].bx, DocumentBox::new(100.0, 0.0, 200.0, 400.0));
        assert_eq!(editor.output[1].source, 1);
    }

    #[test]
    fn test_export_one_page_per_crop() {
        let rasterizer = FakeRasterizer::blank(1);
        let mut editor = FakeEditor::default();
        let mut set = SelectionSet::new();
        set.create_region(0, &page_rect(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        set.create_region(0, &page_rect(), Some(Rect::new(0.0, 100.0, 100.0, 200.0)));

        let config = CropConfig {
            output_rotation: PageRotation::Deg90,
            ..CropConfig::default()
        };
        let cancel = AtomicBool::new(false);
        export_cropped(&rasterizer, &mut editor, &set, &[0], &config, &cancel).unwrap();

        assert_eq!(editor.output.len(), 2);
        // top half of the image is the upper half of the box
        assert_eq!(editor.output[0].bx, DocumentBox::new(0.0, 200.0, 200.0, 400.0));
        assert_eq!(editor.output[1].bx, DocumentBox::new(0.0, 0.0, 200.0, 200.0));
        assert!(editor.output.iter().all(|p| p.rotation == 90));
    }

    #[test]
    fn test_export_corrects_intrinsic_rotation() {
        let mut rasterizer = FakeRasterizer::blank(1);
        rasterizer.rotations[0] = PageRotation::Deg90;
        let mut editor = FakeEditor::default();
        let mut set = SelectionSet::new();
        // remove the left half of the displayed (rotated) page
        set.create_region(0, &page_rect(), Some(Rect::new(50.0, 0.0, 100.0, 200.0)));

        let cancel = AtomicBool::new(false);
        export_cropped(&rasterizer, &mut editor, &set, &[0], &CropConfig::default(), &cancel).unwrap();

        // left fraction moves to the bottom side of the unrotated box
        assert_eq!(editor.output[0].bx, DocumentBox::new(0.0, 200.0, 200.0, 400.0));
    }

    #[test]
    fn test_export_skips_pages_without_selection() {
        let rasterizer = FakeRasterizer::blank(3);
        let mut editor = FakeEditor::default();
        let mut set = SelectionSet::new();
        set.set_mode(SelectionMode::Individual);
        set.create_region(1, &page_rect(), None);

        let cancel = AtomicBool::new(false);
        let summary =
            export_cropped(&rasterizer, &mut editor, &set, &[0, 1, 2], &CropConfig::default(), &cancel)
                .unwrap();

        assert_eq!(
            summary,
            ExportSummary {
                pages_written: 1,
                pages_skipped: 2
            }
        );
        assert_eq!(editor.output[0].source, 1);
        assert_eq!(editor.output[0].bx, DocumentBox::new(0.0, 0.0, 200.0, 400.0));
    }

    #[test]
    fn test_export_cancelled() {
        let rasterizer = FakeRasterizer::blank(2);
        let mut editor = FakeEditor::default();
        let mut set = SelectionSet::new();
        set.create_region(0, &page_rect(), None);

        let cancel = AtomicBool::new(true);
        let result = export_cropped(&rasterizer, &mut editor, &set, &[0, 1], &CropConfig::default(), &cancel);
        assert_eq!(result, Err(ExportError::Cancelled));
        assert!(editor.output.is_empty());
    }

    #[test]
    fn test_export_errors() {
        let rasterizer = FakeRasterizer::blank(2);
        let mut set = SelectionSet::new();
        set.create_region(0, &page_rect(), None);
        let cancel = AtomicBool::new(false);

        let mut editor = FakeEditor::default();
        let result = export_cropped(&rasterizer, &mut editor, &set, &[5], &CropConfig::default(), &cancel);
        assert_eq!(
            result,
            Err(ExportError::PageOutOfRange {
                page: 5,
                page_count: 2
            })
        );

        let mut editor = FakeEditor {
            reject_adds: true,
            ..Default::default()
        };
        let result = export_cropped(&rasterizer, &mut editor, &set, &[0], &CropConfig::default(), &cancel);
        assert!(matches!(result, Err(ExportError::Backend(_))));
    }

    #[test]
    fn test_trim_across_pages() {
        let mut rasterizer = FakeRasterizer::blank(2);
        for (x, y) in [(20, 30), (21, 30), (60, 150), (61, 150), (20, 31), (61, 151)] {
            rasterizer.pages[0].put_gray(x, y, 0);
        }
        // a checkerboard patch on the second page reaches further down
        for y in 160..170 {
            for x in 40..50 {
                rasterizer.pages[1].put_gray(x, y, if (x + y) % 2 == 0 { 0 } else { 255 });
            }
        }

        let mut set = SelectionSet::new();
        let id = set.create_region(0, &page_rect(), None);
        let mut config = CropConfig::default();
        config.padding = crate::config::Padding::default();

        let rect = trim_across_pages(&rasterizer, &mut set, id, &[0, 1], &config).unwrap();
        let rect = rect.unwrap();
        assert_eq!(rect.bottom, 170.0);
        assert!(rect.top <= 30.0);
        assert!(rect.right >= 50.0);

        assert_eq!(trim_across_pages(&rasterizer, &mut set, id, &[], &config), Ok(None));
        assert!(matches!(
            trim_across_pages(&rasterizer, &mut set, id, &[9], &config),
            Err(ExportError::PageOutOfRange { .. })
        ));
    }
}

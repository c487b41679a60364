//! The collection of selections for one open document.
//!
//! A [`SelectionSet`] owns its regions in creation order. Other code refers
//! to a region only through its [`RegionId`], including the "current"
//! selection, so there are no shared references into the set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::region::{RegionId, SelectionRegion};
use super::visibility::{is_visible, SelectionMode};
use crate::config::CropConfig;
use crate::geometry::Rect;
use crate::grid::{grid_rects, GridSpec};
use crate::raster::Raster;
use crate::transform::{distribute, to_crop_fraction, CropFraction, PageRotation};
use crate::trim::{trim_pages, trim_with_padding};

/// All selections of a document, plus the rules deciding where they apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionSet {
    regions: Vec<SelectionRegion>,
    next_id: u64,
    mode: SelectionMode,
    exceptions: BTreeSet<usize>,
    distribute_ratio: Option<f64>,
    current: Option<RegionId>,
    min_width: f64,
    min_height: f64,
}

impl SelectionSet {
    /// Create an empty set with default rules.
    pub fn new() -> Self {
        Self::from_config(&CropConfig::default())
    }

    /// Create an empty set using the mode, distribute ratio and minimum
    /// size from `config`.
    pub fn from_config(config: &CropConfig) -> Self {
        let mut set = Self {
            next_id: 1,
            ..Default::default()
        };
        set.apply_config(config);
        set
    }

    /// Take over the selection rules from `config`.
    ///
    /// Existing regions keep their geometry; the new minimum size applies
    /// from their next adjustment on.
    pub fn apply_config(&mut self, config: &CropConfig) {
        let config = config.clone().sanitized();
        self.mode = config.selection_mode;
        self.distribute_ratio = config.distribute_ratio;
        self.min_width = config.min_width;
        self.min_height = config.min_height;
    }

    /// Add a selection on `page_index`.
    ///
    /// `rect` defaults to the whole page. The new region becomes current.
    pub fn create_region(&mut self, page_index: usize, page: &Rect, rect: Option<Rect>) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        let region = SelectionRegion::new(
            id,
            page_index,
            rect,
            page,
            self.min_width.max(1.0),
            self.min_height.max(1.0),
        );
        log::debug!("created selection {} on page {}", id.0, page_index);
        self.regions.push(region);
        self.current = Some(id);
        id
    }

    /// Remove a selection. Returns it if it existed.
    pub fn remove_region(&mut self, id: RegionId) -> Option<SelectionRegion> {
        let pos = self.regions.iter().position(|r| r.id() == id)?;
        if self.current == Some(id) {
            self.current = None;
        }
        Some(self.regions.remove(pos))
    }

    /// Remove every selection, as when a new document is loaded.
    pub fn clear(&mut self) {
        self.regions.clear();
        self.current = None;
    }

    pub fn region(&self, id: RegionId) -> Option<&SelectionRegion> {
        self.regions.iter().find(|r| r.id() == id)
    }

    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut SelectionRegion> {
        self.regions.iter_mut().find(|r| r.id() == id)
    }

    /// All selections in creation order.
    pub fn regions(&self) -> &[SelectionRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn current(&self) -> Option<RegionId> {
        self.current
    }

    /// Make `id` the current selection. Unknown ids clear it.
    pub fn set_current(&mut self, id: Option<RegionId>) {
        self.current = id.filter(|id| self.region(*id).is_some());
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// Pages (0-based) on which only their own selections apply.
    pub fn exceptions(&self) -> &BTreeSet<usize> {
        &self.exceptions
    }

    pub fn set_exceptions(&mut self, exceptions: impl IntoIterator<Item = usize>) {
        self.exceptions = exceptions.into_iter().collect();
    }

    pub fn distribute_ratio(&self) -> Option<f64> {
        self.distribute_ratio
    }

    pub fn set_distribute_ratio(&mut self, ratio: Option<f64>) {
        self.distribute_ratio = ratio.filter(|r| *r > 0.0 && r.is_finite());
    }

    /// Check whether selection `id` applies to `page_index`.
    pub fn is_visible(&self, id: RegionId, page_index: usize) -> bool {
        self.region(id)
            .is_some_and(|r| self.region_visible(r, page_index))
    }

    fn region_visible(&self, region: &SelectionRegion, page_index: usize) -> bool {
        is_visible(region.page_index(), page_index, self.mode, &self.exceptions)
    }

    /// Selections applying to `page_index`, in creation order.
    pub fn visible_regions(&self, page_index: usize) -> impl Iterator<Item = &SelectionRegion> + '_ {
        self.regions
            .iter()
            .filter(move |r| self.region_visible(r, page_index))
    }

    /// 1-based position of `id` among the selections visible on
    /// `page_index`, or `None` if it is not visible there.
    pub fn order_index(&self, id: RegionId, page_index: usize) -> Option<usize> {
        self.visible_regions(page_index)
            .position(|r| r.id() == id)
            .map(|i| i + 1)
    }

    /// Output tiles of a selection after distribution.
    pub fn tiles(&self, id: RegionId) -> Vec<Rect> {
        self.region(id)
            .map(|r| distribute(&r.rect(), self.distribute_ratio))
            .unwrap_or_default()
    }

    /// Crop fractions for one page of the document.
    ///
    /// Every visible selection contributes one fraction per distributed
    /// tile, in creation order. Fractions are expressed in the intrinsic
    /// frame of a page displayed with `rotation`.
    pub fn crop_values(&self, page_index: usize, rotation: PageRotation) -> Vec<CropFraction> {
        self.visible_regions(page_index)
            .flat_map(|region| {
                let parent = region.parent_rect();
                distribute(&region.rect(), self.distribute_ratio)
                    .into_iter()
                    .map(move |tile| to_crop_fraction(&tile, &parent, rotation))
            })
            .collect()
    }

    /// Tile `rect` with a grid of selections on `page_index`.
    ///
    /// Regions are created in row-major order; the last one becomes current.
    pub fn add_grid(&mut self, page_index: usize, page: &Rect, rect: &Rect, spec: GridSpec) -> Vec<RegionId> {
        grid_rects(rect, spec)
            .into_iter()
            .map(|cell| self.create_region(page_index, page, Some(cell)))
            .collect()
    }

    /// Trim the margins of one selection on a single page image.
    ///
    /// Returns the new rectangle, or `None` for an unknown id.
    pub fn trim_region<R: Raster + ?Sized>(
        &mut self,
        id: RegionId,
        image: &R,
        page: &Rect,
        config: &CropConfig,
    ) -> Option<Rect> {
        let region = self.region_mut(id)?;
        let trimmed = trim_with_padding(image, &region.rect(), config);
        region.set_rect(page, &trimmed);
        Some(region.rect())
    }

    /// Trim the margins of one selection so that the content of every page
    /// in `images` stays inside it.
    pub fn trim_region_pages<R: Raster + Sync>(
        &mut self,
        id: RegionId,
        images: &[R],
        page: &Rect,
        config: &CropConfig,
    ) -> Option<Rect> {
        let region = self.region_mut(id)?;
        let trimmed = trim_pages(images, &region.rect(), config)?;
        region.set_rect(page, &trimmed);
        Some(region.rect())
    }

    /// Trim every selection visible on `page_index`.
    ///
    /// If none is visible, a selection covering the whole page is created
    /// first. Returns the trimmed selections.
    pub fn trim_visible<R: Raster + ?Sized>(
        &mut self,
        page_index: usize,
        image: &R,
        page: &Rect,
        config: &CropConfig,
    ) -> Vec<RegionId> {
        let mut ids: Vec<RegionId> = self.visible_regions(page_index).map(|r| r.id()).collect();
        if ids.is_empty() {
            ids.push(self.create_region(page_index, page, None));
        }
        for id in &ids {
            self.trim_region(*id, image, page, config);
        }
        ids
    }
}

//! Selection WASM bindings.
//!
//! The front end draws selections and handles, and forwards every user
//! gesture to a [`JsSelectionSet`]. All geometry (clamping, minimum size,
//! aspect lock, trimming, distribution, crop mapping) runs here; the front
//! end only re-reads the resulting rectangles.
//!
//! Selections are addressed by numeric ids. Rectangles are passed to
//! JavaScript as `{ left, top, right, bottom }` objects in page pixels.

use krop_core::parse::{parse_aspect_ratio, parse_grid_spec, parse_page_range};
use krop_core::{
    to_absolute_box, DocumentBox, EdgeDeltas, PageRotation, Rect, RegionId, SelectionSet,
};
use wasm_bindgen::prelude::*;

use crate::config::{mode_name, parse_mode, CropSettings};
use crate::types::JsPageImage;
use crate::warn;

/// The selections of one open document
#[wasm_bindgen]
pub struct JsSelectionSet {
    inner: SelectionSet,
}

#[wasm_bindgen]
impl JsSelectionSet {
    /// Create an empty set using the mode, distribute ratio and minimum
    /// size from `settings`.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: &CropSettings) -> Self {
        Self {
            inner: SelectionSet::from_config(settings.config()),
        }
    }

    /// Take over changed settings.
    pub fn apply_settings(&mut self, settings: &CropSettings) {
        self.inner.apply_config(settings.config());
    }

    /// Create a selection covering a whole page of `page_width` x
    /// `page_height` pixels.
    pub fn create(
        &mut self,
        page_index: usize,
        page_width: f64,
        page_height: f64,
    ) -> Result<u32, JsValue> {
        let page = Rect::from_size(0.0, 0.0, page_width, page_height);
        js_id(self.inner.create_region(page_index, &page, None))
    }

    /// Create a selection from a rectangle, as when a drag ends.
    #[allow(clippy::too_many_arguments)]
    pub fn create_rect(
        &mut self,
        page_index: usize,
        page_width: f64,
        page_height: f64,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    ) -> Result<u32, JsValue> {
        let page = Rect::from_size(0.0, 0.0, page_width, page_height);
        let rect = Rect::new(left, top, right, bottom);
        js_id(self.inner.create_region(page_index, &page, Some(rect)))
    }

    /// Delete a selection. Returns false if it did not exist.
    pub fn remove(&mut self, id: u32) -> bool {
        self.inner.remove_region(region_id(id)).is_some()
    }

    /// Delete all selections (e.g. when another document is opened).
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Number of selections
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Id of the current selection, if any
    #[wasm_bindgen(getter)]
    pub fn current(&self) -> Result<Option<u32>, JsValue> {
        self.inner.current().map(js_id).transpose()
    }

    /// Make a selection current. Unknown ids clear the current selection.
    #[wasm_bindgen(setter)]
    pub fn set_current(&mut self, id: Option<u32>) {
        self.inner.set_current(id.map(region_id));
    }

    /// Get the selection mode ("all", "evenodd" or "individual")
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        mode_name(self.inner.mode()).to_string()
    }

    /// Set the selection mode. Unknown names fall back to "all".
    #[wasm_bindgen(setter)]
    pub fn set_mode(&mut self, value: &str) {
        self.inner.set_mode(parse_mode(value));
    }

    /// Pages on which only their own selections apply, as a page range
    /// string ("3, 7-9"). Malformed input clears the exceptions.
    pub fn set_exceptions(&mut self, pages: &str, page_count: usize) {
        let pages = if pages.trim().is_empty() {
            Vec::new()
        } else {
            parse_page_range(pages, page_count).unwrap_or_else(|e| {
                warn(&format!("{e}; no exceptions"));
                Vec::new()
            })
        };
        self.inner.set_exceptions(pages);
    }

    /// Lock a selection to an aspect ratio ("w:h", or "" to unlock).
    pub fn set_aspect_ratio(
        &mut self,
        id: u32,
        page_width: f64,
        page_height: f64,
        ratio: &str,
    ) -> Result<JsValue, JsValue> {
        let page = Rect::from_size(0.0, 0.0, page_width, page_height);
        let ratio = parse_aspect_ratio(ratio);
        let region = self.region_mut(id)?;
        region.set_aspect_ratio(&page, ratio);
        rect_to_js(&region.rect())
    }

    /// Move selection edges while a handle is dragged.
    ///
    /// Returns the realized `{ left, top, right, bottom }` deltas.
    #[allow(clippy::too_many_arguments)]
    pub fn adjust(
        &mut self,
        id: u32,
        page_width: f64,
        page_height: f64,
        d_left: f64,
        d_top: f64,
        d_right: f64,
        d_bottom: f64,
    ) -> Result<JsValue, JsValue> {
        let page = Rect::from_size(0.0, 0.0, page_width, page_height);
        let deltas = EdgeDeltas::new(d_left, d_top, d_right, d_bottom);
        let realized = self.region_mut(id)?.adjust(&page, deltas);
        serde_wasm_bindgen::to_value(&realized).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Move a whole selection. Returns the realized `[dx, dy]`.
    pub fn move_by(
        &mut self,
        id: u32,
        page_width: f64,
        page_height: f64,
        dx: f64,
        dy: f64,
    ) -> Result<Vec<f64>, JsValue> {
        let page = Rect::from_size(0.0, 0.0, page_width, page_height);
        let (dx, dy) = self.region_mut(id)?.move_by(&page, dx, dy);
        Ok(vec![dx, dy])
    }

    /// Reshape a selection to the rectangle spanned by two points.
    #[allow(clippy::too_many_arguments)]
    pub fn set_bounding_rect(
        &mut self,
        id: u32,
        page_width: f64,
        page_height: f64,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    ) -> Result<JsValue, JsValue> {
        let page = Rect::from_size(0.0, 0.0, page_width, page_height);
        let region = self.region_mut(id)?;
        region.set_bounding_rect(&page, (x1, y1), (x2, y2));
        rect_to_js(&region.rect())
    }

    /// Current rectangle of a selection
    pub fn rect(&self, id: u32) -> Result<JsValue, JsValue> {
        let region = self
            .inner
            .region(region_id(id))
            .ok_or_else(|| unknown(id))?;
        rect_to_js(&region.rect())
    }

    /// Ids of the selections shown on `page_index`, in drawing order
    pub fn visible(&self, page_index: usize) -> Result<Vec<u32>, JsValue> {
        self.inner
            .visible_regions(page_index)
            .map(|r| js_id(r.id()))
            .collect()
    }

    /// 1-based label of a selection on `page_index`
    pub fn order_index(&self, id: u32, page_index: usize) -> Option<usize> {
        self.inner.order_index(region_id(id), page_index)
    }

    /// Output tiles of a selection as an array of rectangles
    pub fn tiles(&self, id: u32) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.tiles(region_id(id)))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Create a grid of selections ("CxR" or a single number) covering the
    /// page. Malformed input creates nothing.
    pub fn add_grid(
        &mut self,
        page_index: usize,
        page_width: f64,
        page_height: f64,
        spec: &str,
    ) -> Result<Vec<u32>, JsValue> {
        let page = Rect::from_size(0.0, 0.0, page_width, page_height);
        match parse_grid_spec(spec, page.is_portrait()) {
            Ok(spec) => self
                .inner
                .add_grid(page_index, &page, &page, spec)
                .into_iter()
                .map(js_id)
                .collect(),
            Err(e) => {
                warn(&format!("{e}; no grid created"));
                Ok(Vec::new())
            }
        }
    }

    /// Trim the margins of one selection on the rendered page.
    pub fn trim(
        &mut self,
        id: u32,
        image: &JsPageImage,
        settings: &CropSettings,
    ) -> Result<JsValue, JsValue> {
        let rect = self
            .inner
            .trim_region(region_id(id), image, &image.page_rect(), settings.config())
            .ok_or_else(|| unknown(id))?;
        rect_to_js(&rect)
    }

    /// Trim every selection shown on `page_index`, creating a full-page
    /// selection first if there is none. Returns the trimmed ids.
    pub fn trim_all(
        &mut self,
        page_index: usize,
        image: &JsPageImage,
        settings: &CropSettings,
    ) -> Result<Vec<u32>, JsValue> {
        self.inner
            .trim_visible(page_index, image, &image.page_rect(), settings.config())
            .into_iter()
            .map(js_id)
            .collect()
    }

    /// Crop fractions for a page as `[{ left, top, right, bottom }]`.
    ///
    /// `rotation` is the page's intrinsic rotation (0, 90, 180 or 270).
    pub fn crop_values(&self, page_index: usize, rotation: i32) -> Result<JsValue, JsValue> {
        let rotation = page_rotation(rotation)?;
        serde_wasm_bindgen::to_value(&self.inner.crop_values(page_index, rotation))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Document-space boxes for a page whose box is `[x0, y0, x1, y1]`.
    ///
    /// Returns a flat array with four numbers per output page.
    pub fn crop_boxes(
        &self,
        page_index: usize,
        rotation: i32,
        page_box: Vec<f64>,
    ) -> Result<Vec<f64>, JsValue> {
        let rotation = page_rotation(rotation)?;
        let [x0, y0, x1, y1]: [f64; 4] = page_box
            .try_into()
            .map_err(|_| JsValue::from_str("Page box needs four numbers"))?;
        let page_box = DocumentBox::new(x0, y0, x1, y1);

        Ok(self
            .inner
            .crop_values(page_index, rotation)
            .iter()
            .flat_map(|fraction| {
                let b = to_absolute_box(fraction, &page_box);
                [b.x0, b.y0, b.x1, b.y1]
            })
            .collect())
    }

    /// Serialize all selections (for undo or session restore)
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Restore selections saved with `to_json`
    pub fn from_json(value: JsValue) -> Result<JsSelectionSet, JsValue> {
        let inner: SelectionSet =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl JsSelectionSet {
    fn region_mut(&mut self, id: u32) -> Result<&mut krop_core::SelectionRegion, JsValue> {
        self.inner
            .region_mut(region_id(id))
            .ok_or_else(|| unknown(id))
    }
}

fn region_id(id: u32) -> RegionId {
    RegionId::from(u64::from(id))
}

fn js_id(id: RegionId) -> Result<u32, JsValue> {
    u32::try_from(id.value())
        .map_err(|_| JsValue::from_str(&format!("Selection id {} is out of range", id.value())))
}

fn unknown(id: u32) -> JsValue {
    JsValue::from_str(&format!("Unknown selection {id}"))
}

fn page_rotation(degrees: i32) -> Result<PageRotation, JsValue> {
    PageRotation::from_degrees(degrees)
        .ok_or_else(|| JsValue::from_str(&format!("Invalid page rotation {degrees}")))
}

fn rect_to_js(rect: &Rect) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(rect).map_err(|e| JsValue::from_str(&e.to_string()))
}

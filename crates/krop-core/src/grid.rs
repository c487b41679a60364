//! Splitting a rectangle into a grid of equally sized cells.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Number of columns and rows of a selection grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
}

impl GridSpec {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// Cells of `rect` in row-major order (left to right, then top to bottom).
///
/// A grid with zero columns or rows yields no cells. The outer cells share
/// the edges of `rect` exactly.
pub fn grid_rects(rect: &Rect, spec: GridSpec) -> Vec<Rect> {
    if spec.columns == 0 || spec.rows == 0 {
        return Vec::new();
    }

    let x_edge = |i: u32| {
        if i == spec.columns {
            rect.right
        } else {
            rect.left + rect.width() * f64::from(i) / f64::from(spec.columns)
        }
    };
    let y_edge = |j: u32| {
        if j == spec.rows {
            rect.bottom
        } else {
            rect.top + rect.height() * f64::from(j) / f64::from(spec.rows)
        }
    };

    let mut cells = Vec::with_capacity(spec.cell_count());
    for row in 0..spec.rows {
        for col in 0..spec.columns {
            cells.push(Rect::new(x_edge(col), y_edge(row), x_edge(col + 1), y_edge(row + 1)));
        }
    }
    cells
}

//! Grid-based spatial hash over feature bounding boxes.
//!
//! # Algorithm
//!
//! 1. Divide lon/lat space into uniform square cells of `cell_size` degrees
//! 2. Each feature is stored in every cell its bounding box overlaps
//! 3. A query collects the features of every cell touched by the search
//!    window, plus a one-cell ring so that rounding at cell edges cannot
//!    hide a feature
//!
//! The result is a superset of the true candidates; the caller applies the
//! exact box test afterwards.
//!
//! # Performance
//!
//! - Build: O(m × overlap) where m = number of features
//! - Query: O(k) where k = features in the touched cells
//!
//! Features spanning more than [`MAX_CELLS_PER_FEATURE`] cells are kept in a
//! side list that every query scans, which bounds memory for very long
//! geometries.

use std::collections::HashMap;

use crate::core::Bounds;

/// Features covering more cells than this are not rasterized.
pub const MAX_CELLS_PER_FEATURE: i64 = 4096;

/// Grid cell coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i32,
    y: i32,
}

impl CellCoord {
    #[inline]
    fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Inclusive cell range covered by a box.
#[derive(Clone, Copy, Debug)]
struct CellSpan {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl CellSpan {
    fn cell_count(&self) -> i64 {
        (self.max_x as i64 - self.min_x as i64 + 1) * (self.max_y as i64 - self.min_y as i64 + 1)
    }

    fn grown(&self, ring: i32) -> Self {
        Self {
            min_x: self.min_x.saturating_sub(ring),
            min_y: self.min_y.saturating_sub(ring),
            max_x: self.max_x.saturating_add(ring),
            max_y: self.max_y.saturating_add(ring),
        }
    }

    fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (self.min_x..=self.max_x)
            .flat_map(move |x| (self.min_y..=self.max_y).map(move |y| CellCoord::new(x, y)))
    }
}

/// Spatial hash from cell to entry indices.
#[derive(Clone, Debug)]
pub(crate) struct GridCells {
    /// Inverse cell size for fast coordinate conversion
    inv_cell_size: f64,
    /// Map from cell coordinate to entry indices in that cell
    grid: HashMap<CellCoord, Vec<usize>>,
    /// Entries too large to rasterize
    oversized: Vec<usize>,
}

impl GridCells {
    /// Build from entry bounds, where the slice position is the entry index.
    pub fn build(bounds: &[Bounds], cell_size: f64) -> Self {
        let inv_cell_size = 1.0 / cell_size;
        let mut grid: HashMap<CellCoord, Vec<usize>> = HashMap::new();
        let mut oversized = Vec::new();

        for (i, b) in bounds.iter().enumerate() {
            let span = span_of(b, inv_cell_size);
            if span.cell_count() > MAX_CELLS_PER_FEATURE {
                oversized.push(i);
                continue;
            }
            for cell in span.cells() {
                grid.entry(cell).or_default().push(i);
            }
        }

        Self {
            inv_cell_size,
            grid,
            oversized,
        }
    }

    /// Collect entries whose cells touch `window` into `buffer`.
    ///
    /// Returns `false` without touching the buffer when the window covers
    /// more than `scan_limit` cells; a linear scan is cheaper then.
    /// Results are sorted and deduplicated.
    pub fn query_into(&self, window: &Bounds, scan_limit: usize, buffer: &mut Vec<usize>) -> bool {
        let span = span_of(window, self.inv_cell_size).grown(1);
        if span.cell_count() > scan_limit as i64 {
            return false;
        }

        buffer.clear();
        for cell in span.cells() {
            if let Some(indices) = self.grid.get(&cell) {
                buffer.extend(indices.iter().copied());
            }
        }
        buffer.extend(self.oversized.iter().copied());

        // Entries can appear in several cells
        if buffer.len() > 1 {
            buffer.sort_unstable();
            buffer.dedup();
        }
        true
    }

    /// Number of non-empty cells
    pub fn num_cells(&self) -> usize {
        self.grid.len()
    }

    /// Number of entries kept outside the grid
    pub fn num_oversized(&self) -> usize {
        self.oversized.len()
    }
}

#[inline]
fn span_of(b: &Bounds, inv_cell_size: f64) -> CellSpan {
    // Float-to-int `as` saturates, so far-out coordinates clamp instead of wrapping
    CellSpan {
        min_x: (b.min_lon * inv_cell_size).floor() as i32,
        min_y: (b.min_lat * inv_cell_size).floor() as i32,
        max_x: (b.max_lon * inv_cell_size).floor() as i32,
        max_y: (b.max_lat * inv_cell_size).floor() as i32,
    }
}

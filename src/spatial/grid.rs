//! Mosaic grid geometry and cell records
//!
//! The grid is sized so that its cell count equals the total piece supply
//! exactly, choosing among the factor pairs of that count the shape whose
//! aspect ratio is closest to the target image.

use crate::io::configuration::MAX_CELLS;
use crate::io::error::{Result, invalid_parameter};

/// Grid shape in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    /// Number of cells across
    pub cols: usize,
    /// Number of cells down
    pub rows: usize,
}

impl GridDimensions {
    /// Create a grid shape
    pub const fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Width divided by height
    pub const fn aspect_ratio(&self) -> f64 {
        self.cols as f64 / self.rows as f64
    }

    /// Row-major index of a cell
    pub const fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Position of a row-major index
    pub const fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Pick the factor pair of `cell_count` whose aspect ratio is closest to `aspect_ratio`
    ///
    /// The first pair (in increasing width) wins ties.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `cell_count` is zero or exceeds the cell limit
    /// - `aspect_ratio` is not a positive finite number
    pub fn closest_to_aspect(cell_count: usize, aspect_ratio: f64) -> Result<Self> {
        if cell_count == 0 || cell_count > MAX_CELLS {
            return Err(invalid_parameter(
                "cell_count",
                &cell_count,
                &format!("must be between 1 and {MAX_CELLS}"),
            ));
        }
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(invalid_parameter(
                "aspect_ratio",
                &aspect_ratio,
                &"must be positive and finite",
            ));
        }

        let mut best = Self::new(cell_count, 1);
        let mut best_diff = f64::INFINITY;
        for (cols, rows) in factor_pairs(cell_count) {
            let candidate = Self::new(cols, rows);
            let diff = (aspect_ratio - candidate.aspect_ratio()).abs();
            if diff < best_diff {
                best_diff = diff;
                best = candidate;
            }
        }
        Ok(best)
    }
}

/// All `(a, n / a)` with `a` dividing `n`, in increasing `a`
pub fn factor_pairs(n: usize) -> Vec<(usize, usize)> {
    (1..=n)
        .filter(|a| n % a == 0)
        .map(|a| (a, n / a))
        .collect()
}

/// One grid position with the brightness of its target region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Grid row
    pub row: usize,
    /// Grid column
    pub col: usize,
    /// Mean gray level of the target region, in `[0, 255]`
    pub brightness: f64,
}

impl Cell {
    /// Create a cell record
    pub const fn new(row: usize, col: usize, brightness: f64) -> Self {
        Self {
            row,
            col,
            brightness,
        }
    }
}

/// Build row-major cells from a brightness per position
///
/// # Errors
///
/// Returns an error if the number of values differs from the cell count
pub fn cells_from_brightness(grid: GridDimensions, values: &[f64]) -> Result<Vec<Cell>> {
    if values.len() != grid.cell_count() {
        return Err(invalid_parameter(
            "brightness values",
            &values.len(),
            &format!("expected {} for a {}x{} grid", grid.cell_count(), grid.cols, grid.rows),
        ));
    }
    Ok(values
        .iter()
        .enumerate()
        .map(|(index, &brightness)| {
            let (row, col) = grid.position(index);
            Cell::new(row, col, brightness)
        })
        .collect())
}

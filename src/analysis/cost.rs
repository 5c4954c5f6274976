//! Dense squared-brightness-difference cost matrix

use crate::io::configuration::MAX_BRIGHTNESS;
use crate::io::error::{BrightnessSubject, MosaicError, Result, computation_error};
use crate::math::statistics::{is_valid_brightness, squared_difference};
use crate::pieces::variant::PieceVariant;
use crate::spatial::grid::Cell;
use ndarray::{Array2, ArrayView1};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

/// Cost of placing each variant in each cell
///
/// Rows are cells and columns are variants, in input order. Every entry is
/// `(variant brightness - cell brightness)^2`.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    costs: Array2<f64>,
}

impl CostMatrix {
    /// Build from cell and variant brightness
    ///
    /// Rows are filled in parallel; each row is written by exactly one worker.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first cell, then the first variant, whose
    /// brightness is non-finite or outside `[0, 255]`
    pub fn build(cells: &[Cell], variants: &[PieceVariant]) -> Result<Self> {
        let cell_brightness: Vec<f64> = cells.iter().map(|c| c.brightness).collect();
        let variant_brightness: Vec<f64> = variants.iter().map(|v| v.brightness).collect();
        validate_cells(cells)?;
        validate_variants(&variant_brightness)?;
        Self::from_validated(&cell_brightness, &variant_brightness)
    }

    /// Build from raw brightness slices
    ///
    /// Cells have no grid position here, so an invalid cell is reported by
    /// its index in `cells`.
    ///
    /// # Errors
    ///
    /// Returns an error if any brightness is non-finite or outside `[0, 255]`
    pub fn from_brightness(cells: &[f64], variants: &[f64]) -> Result<Self> {
        for (index, &value) in cells.iter().enumerate() {
            if !is_valid_brightness(value, MAX_BRIGHTNESS) {
                return Err(MosaicError::InvalidBrightness {
                    subject: BrightnessSubject::Sample { index },
                    value,
                });
            }
        }
        validate_variants(variants)?;
        Self::from_validated(cells, variants)
    }

    /// Wrap a precomputed matrix of non-negative finite costs
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is negative or non-finite
    pub fn from_array(costs: Array2<f64>) -> Result<Self> {
        if let Some(((cell, variant), &value)) = costs
            .indexed_iter()
            .find(|(_, value)| !value.is_finite() || **value < 0.0)
        {
            return Err(computation_error(
                "cost matrix",
                &format!("entry ({cell}, {variant}) = {value} is not a non-negative finite cost"),
            ));
        }
        Ok(Self { costs })
    }

    fn from_validated(cells: &[f64], variants: &[f64]) -> Result<Self> {
        let width = variants.len();
        let mut buffer = vec![0.0; cells.len() * width];
        if width > 0 {
            buffer
                .par_chunks_mut(width)
                .zip(cells.par_iter())
                .for_each(|(row, &cell)| {
                    for (slot, &variant) in row.iter_mut().zip(variants) {
                        *slot = squared_difference(variant, cell);
                    }
                });
        }
        let costs = Array2::from_shape_vec((cells.len(), width), buffer)?;
        tracing::debug!(cells = cells.len(), variants = width, "Built cost matrix");
        Ok(Self { costs })
    }

    /// Number of cells
    pub fn cell_count(&self) -> usize {
        self.costs.nrows()
    }

    /// Number of variants
    pub fn variant_count(&self) -> usize {
        self.costs.ncols()
    }

    /// Cost of one (cell, variant) pair
    pub fn get(&self, cell: usize, variant: usize) -> Option<f64> {
        self.costs.get((cell, variant)).copied()
    }

    /// Costs of every variant for one cell
    pub fn row(&self, cell: usize) -> Option<ArrayView1<'_, f64>> {
        (cell < self.cell_count()).then(|| self.costs.row(cell))
    }

    /// Underlying array
    pub const fn as_array(&self) -> &Array2<f64> {
        &self.costs
    }
}

fn validate_cells(cells: &[Cell]) -> Result<()> {
    match cells
        .iter()
        .find(|c| !is_valid_brightness(c.brightness, MAX_BRIGHTNESS))
    {
        Some(cell) => Err(MosaicError::InvalidBrightness {
            subject: BrightnessSubject::Cell {
                row: cell.row,
                col: cell.col,
            },
            value: cell.brightness,
        }),
        None => Ok(()),
    }
}

fn validate_variants(variants: &[f64]) -> Result<()> {
    match variants
        .iter()
        .enumerate()
        .find(|(_, value)| !is_valid_brightness(**value, MAX_BRIGHTNESS))
    {
        Some((index, &value)) => Err(MosaicError::InvalidBrightness {
            subject: BrightnessSubject::Variant { index },
            value,
        }),
        None => Ok(()),
    }
}

//! End-to-end mosaic construction from a target image and a piece set

use crate::algorithm::assignment::Assignment;
use crate::algorithm::transport::{CancellationToken, SolveProgress, TransportationSolver};
use crate::analysis::brightness::{extract_cells, piece_brightnesses, resample_target};
use crate::analysis::cost::CostMatrix;
use crate::analysis::demand::{Catalog, DemandVector, PieceTypeRule, ShadeRounding};
use crate::io::configuration::{DEFAULT_SAMPLE_SIZE, DEFAULT_SETS};
use crate::io::error::{Result, WithContext, invalid_parameter};
use crate::pieces::normalize::{PieceArtwork, normalize_pieces};
use crate::pieces::variant::{BackgroundScheme, PieceVariant};
use crate::spatial::assembly::assemble;
use crate::spatial::grid::{Cell, GridDimensions};
use image::{GrayImage, RgbaImage};

/// Run configuration for one mosaic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Number of complete piece sets to consume
    pub sets: usize,
    /// Target pixels per cell edge when measuring cell brightness
    pub sample_size: u32,
    /// Edge length of rendered tiles; the cropped artwork size when unset
    pub tile_size: Option<u32>,
    /// Board shading behind the pieces; a single white background when unset
    pub background: Option<BackgroundScheme>,
    /// Which shade rounds down when a shade-split count is odd
    pub shade_rounding: ShadeRounding,
    /// Replacement piece-count rules for the catalog
    pub rules: Option<Vec<PieceTypeRule>>,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            sets: DEFAULT_SETS,
            sample_size: DEFAULT_SAMPLE_SIZE,
            tile_size: None,
            background: None,
            shade_rounding: ShadeRounding::default(),
            rules: None,
        }
    }
}

/// Everything the solver and renderer need for one target
#[derive(Debug, Clone)]
pub struct PreparedMosaic {
    /// Chosen grid shape
    pub grid: GridDimensions,
    /// Row-major cells with target brightness
    pub cells: Vec<Cell>,
    /// Variants with brightness and demand, in catalog order
    pub variants: Vec<PieceVariant>,
    /// Normalized tile for each variant
    pub tiles: Vec<GrayImage>,
    /// Edge length of every tile
    pub tile_size: u32,
    /// Grayscale target resampled to the grid
    pub resampled: GrayImage,
}

impl PreparedMosaic {
    /// Per-variant demand
    pub fn demand(&self) -> DemandVector {
        DemandVector::new(self.variants.iter().map(|v| v.demand).collect())
    }

    /// Solve the cell to variant assignment of a prepared mosaic
    ///
    /// # Errors
    ///
    /// Returns an error if a brightness is invalid, supply and demand differ,
    /// or `cancellation` fires before the solve completes
    pub fn solve(
        &self,
        progress: &dyn SolveProgress,
        cancellation: Option<CancellationToken>,
    ) -> Result<Assignment> {
        let cost = CostMatrix::build(&self.cells, &self.variants)?;
        let demand = self.demand();
        let solver = match cancellation {
            Some(token) => TransportationSolver::new().with_cancellation(token),
            None => TransportationSolver::new(),
        };
        let assignment = solver.solve_with_progress(&cost, &demand, progress)?;
        assignment.verify(&demand)?;
        Ok(assignment)
    }

    /// Compose the mosaic canvas
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not fit the prepared grid and tiles
    pub fn render(&self, assignment: &Assignment) -> Result<GrayImage> {
        assemble(assignment, self.grid, &self.tiles, self.tile_size)
            .with_operation("mosaic rendering")
    }
}

/// Prepares, solves and renders mosaics under one configuration
#[derive(Debug, Clone, Default)]
pub struct MosaicPipeline {
    config: MosaicConfig,
}

impl MosaicPipeline {
    /// Create a pipeline
    pub const fn new(config: MosaicConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub const fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Catalog implied by the background and rule overrides
    pub fn catalog(&self) -> Catalog {
        let catalog = if self.config.background.is_some() {
            Catalog::standard()
        } else {
            Catalog::unshaded()
        };
        let catalog = catalog.with_rounding(self.config.shade_rounding);
        match &self.config.rules {
            Some(rules) => catalog.with_rules(rules.clone()),
            None => catalog,
        }
    }

    /// Normalize pieces, size the grid and measure every cell and variant
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `sets` is zero or the catalog rules are malformed
    /// - The piece set is missing artwork for a catalog piece
    /// - The target has no pixels or the grid exceeds the cell limit
    pub fn prepare(&self, target: &RgbaImage, artwork: &PieceArtwork) -> Result<PreparedMosaic> {
        if self.config.sets == 0 {
            return Err(invalid_parameter("sets", &0, &"must be positive"));
        }

        let catalog = self.catalog();
        let demand = catalog.allocate(self.config.sets)?;
        let cell_count = demand.total().ok_or_else(|| {
            invalid_parameter("sets", &self.config.sets, &"total demand overflows")
        })?;
        let keys = catalog.variant_keys();

        let normalized = normalize_pieces(
            artwork,
            &keys,
            self.config.background.as_ref(),
            self.config.tile_size,
        )?;
        let levels = piece_brightnesses(&normalized.tiles)?;
        let variants: Vec<PieceVariant> = keys
            .iter()
            .zip(levels)
            .zip(demand.as_slice())
            .map(|((&key, brightness), &count)| PieceVariant {
                key,
                brightness,
                demand: count,
            })
            .collect();

        let aspect_ratio = f64::from(target.width()) / f64::from(target.height());
        let grid = GridDimensions::closest_to_aspect(cell_count, aspect_ratio)?;
        tracing::info!(
            cols = grid.cols,
            rows = grid.rows,
            variants = variants.len(),
            "Selected mosaic grid"
        );

        let resampled = resample_target(target, grid, self.config.sample_size)?;
        let cells = extract_cells(&resampled, grid, self.config.sample_size)?;

        Ok(PreparedMosaic {
            grid,
            cells,
            variants,
            tiles: normalized.tiles,
            tile_size: normalized.size,
            resampled,
        })
    }
}

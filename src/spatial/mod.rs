//! Spatial data structures for the mosaic grid
//!
//! This module contains spatial-related functionality including:
//! - Grid shape selection from a target aspect ratio
//! - Cell records carrying target brightness
//! - Canvas assembly of a solved layout

/// Canvas composition of solved layouts
pub mod assembly;
/// Grid geometry and cell records
pub mod grid;

pub use grid::{Cell, GridDimensions};

//! Brightness-matched mosaics built from an exact inventory of chess piece tiles
//!
//! A target image is divided into a grid with exactly as many cells as there
//! are pieces in the chosen number of sets. Each cell is matched to a piece
//! variant (kind, color and board shade) by solving a minimum-cost
//! transportation problem, so every piece is used exactly as often as the
//! sets provide while the total squared brightness error is minimal.

#![forbid(unsafe_code)]

/// Exact transportation solver, solution records and the end-to-end pipeline
pub mod algorithm;
/// Brightness extraction, demand allocation and cost matrix construction
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Numeric helpers for ordering, summation and averaging
pub mod math;
/// Piece identities, background schemes and artwork normalization
pub mod pieces;
/// Grid geometry, cell records and canvas assembly
pub mod spatial;

pub use io::error::{MosaicError, Result};

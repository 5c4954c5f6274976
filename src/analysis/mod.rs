//! Brightness analysis, demand allocation and cost construction

/// Brightness of target cells and piece tiles
pub mod brightness;
/// Squared brightness difference cost matrix
pub mod cost;
/// Per-variant demand from piece-count rules
pub mod demand;

//! Numeric utilities shared by the analysis and solver layers

/// Total ordering wrapper for floating-point path costs
pub mod ordered;
/// Means and squared differences over pixel intensities
pub mod statistics;

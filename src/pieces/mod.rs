//! Piece catalog types and artwork normalization
//!
//! This module contains:
//! - Piece kinds, colors, shades and background schemes
//! - Variant keys and records carrying brightness and demand
//! - Cropping, compositing and resampling of piece artwork

/// Square cropping and background compositing of piece artwork
pub mod normalize;
/// Piece identities and renderable variants
pub mod variant;

pub use variant::{PieceVariant, VariantKey};

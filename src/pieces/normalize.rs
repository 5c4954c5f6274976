//! Piece artwork normalization: common square crop, background compositing and grayscale
//!
//! Every piece of a set is cropped to the same square so that brightness
//! values are comparable across pieces, then flattened onto the gray level
//! of the board square it will be rendered on.

use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::pieces::variant::{BackgroundScheme, PieceColor, PieceKind, VariantKey, background_level};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use std::collections::BTreeMap;

/// Pixel rectangle with exclusive right and bottom edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    /// First column inside the rectangle
    pub left: u32,
    /// First row inside the rectangle
    pub top: u32,
    /// First column past the rectangle
    pub right: u32,
    /// First row past the rectangle
    pub bottom: u32,
}

impl PixelBounds {
    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Smallest rectangle containing both
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Square spanning `min(left, top)` to `max(right, bottom)` on both axes
    #[must_use]
    pub fn to_square(&self) -> Self {
        let low = self.left.min(self.top);
        let high = self.right.max(self.bottom);
        Self {
            left: low,
            top: low,
            right: high,
            bottom: high,
        }
    }
}

/// Source artwork for one piece set, keyed by color and kind
#[derive(Debug, Clone, Default)]
pub struct PieceArtwork {
    images: BTreeMap<(PieceColor, PieceKind), RgbaImage>,
}

impl PieceArtwork {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the artwork for one piece
    pub fn insert(&mut self, color: PieceColor, kind: PieceKind, image: RgbaImage) {
        self.images.insert((color, kind), image);
    }

    /// Artwork for one piece
    pub fn get(&self, color: PieceColor, kind: PieceKind) -> Option<&RgbaImage> {
        self.images.get(&(color, kind))
    }

    /// Number of pieces with artwork
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no artwork has been added
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Piece kinds that have artwork in at least one color
    pub fn kinds(&self) -> Vec<PieceKind> {
        let mut kinds: Vec<PieceKind> = self.images.keys().map(|&(_, kind)| kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        kinds
    }

    fn iter(&self) -> impl Iterator<Item = &RgbaImage> {
        self.images.values()
    }
}

/// Bounding box of pixels with non-zero alpha
pub fn opaque_bounds(image: &RgbaImage) -> Option<PixelBounds> {
    let mut bounds: Option<PixelBounds> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] == 0 {
            continue;
        }
        let point = PixelBounds {
            left: x,
            top: y,
            right: x + 1,
            bottom: y + 1,
        };
        bounds = Some(bounds.map_or(point, |b| b.union(&point)));
    }
    bounds
}

/// Common square crop covering the opaque pixels of every image
///
/// Fully transparent images do not contribute.
pub fn common_square_bounds<'a, I>(images: I) -> Option<PixelBounds>
where
    I: IntoIterator<Item = &'a RgbaImage>,
{
    images
        .into_iter()
        .filter_map(opaque_bounds)
        .reduce(|acc, b| acc.union(&b))
        .map(|b| b.to_square())
}

/// Crop to `bounds`, padding with transparent pixels outside the source
pub fn crop_padded(image: &RgbaImage, bounds: PixelBounds) -> RgbaImage {
    let mut cropped = RgbaImage::from_pixel(bounds.width(), bounds.height(), Rgba([0, 0, 0, 0]));
    for (x, y, pixel) in cropped.enumerate_pixels_mut() {
        let source_x = bounds.left + x;
        let source_y = bounds.top + y;
        if let Some(source) = image.get_pixel_checked(source_x, source_y) {
            *pixel = *source;
        }
    }
    cropped
}

/// ITU-R 601 luma of an RGB triple, using the fixed-point rounding of common image libraries
pub const fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    let weighted = r as u32 * 19_595 + g as u32 * 38_470 + b as u32 * 7_471 + 0x8000;
    (weighted >> 16) as u8
}

fn blend_channel(channel: u8, background: u8, alpha: u8) -> u8 {
    let alpha = u32::from(alpha);
    let mixed = u32::from(channel) * alpha + u32::from(background) * (255 - alpha) + 127;
    (mixed / 255) as u8
}

/// Alpha-composite onto a solid gray background and convert to grayscale
pub fn flatten_to_gray(image: &RgbaImage, background: u8) -> GrayImage {
    let mut gray = GrayImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let level = luma_601(
            blend_channel(r, background, a),
            blend_channel(g, background, a),
            blend_channel(b, background, a),
        );
        gray.put_pixel(x, y, Luma([level]));
    }
    gray
}

/// Resample to a `size` square with a Lanczos3 filter
pub fn resize_square(image: &GrayImage, size: u32) -> GrayImage {
    if image.width() == size && image.height() == size {
        return image.clone();
    }
    imageops::resize(image, size, size, FilterType::Lanczos3)
}

/// Grayscale tiles for every requested variant, all of identical square size
#[derive(Debug, Clone)]
pub struct NormalizedPieces {
    /// Variant identities, aligned with `tiles`
    pub keys: Vec<VariantKey>,
    /// Tile images, aligned with `keys`
    pub tiles: Vec<GrayImage>,
    /// Edge length of every tile
    pub size: u32,
}

/// Normalize artwork into one tile per variant key
///
/// # Errors
///
/// Returns an error if:
/// - A variant has no artwork for its color and kind
/// - No artwork contains an opaque pixel
/// - `tile_size` is zero
pub fn normalize_pieces(
    artwork: &PieceArtwork,
    keys: &[VariantKey],
    scheme: Option<&BackgroundScheme>,
    tile_size: Option<u32>,
) -> Result<NormalizedPieces> {
    if tile_size == Some(0) {
        return Err(invalid_parameter("tile_size", &0, &"must be positive"));
    }

    let bounds = common_square_bounds(artwork.iter()).ok_or_else(|| {
        computation_error("piece normalization", &"no piece artwork has opaque pixels")
    })?;

    let mut cropped = BTreeMap::new();
    for key in keys {
        if cropped.contains_key(&(key.color, key.kind)) {
            continue;
        }
        let image = artwork.get(key.color, key.kind).ok_or_else(|| {
            invalid_parameter("pieces", &format!("{}-{}", key.color, key.kind), &"missing artwork")
        })?;
        cropped.insert((key.color, key.kind), crop_padded(image, bounds));
    }

    let size = tile_size.unwrap_or_else(|| bounds.width());
    let mut tiles = Vec::with_capacity(keys.len());
    for key in keys {
        let source = cropped.get(&(key.color, key.kind)).ok_or_else(|| {
            computation_error("piece normalization", &format!("no crop for {key}"))
        })?;
        let flat = flatten_to_gray(source, background_level(scheme, key.shade));
        tiles.push(resize_square(&flat, size));
    }

    tracing::debug!(
        variants = keys.len(),
        crop = bounds.width(),
        size,
        "Normalized piece artwork"
    );

    Ok(NormalizedPieces {
        keys: keys.to_vec(),
        tiles,
        size,
    })
}

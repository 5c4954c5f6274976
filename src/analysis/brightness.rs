//! Brightness extraction for target cells and normalized pieces

use crate::io::configuration::UNSHADED_BACKGROUND;
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::math::statistics::mean;
use crate::pieces::normalize::flatten_to_gray;
use crate::spatial::grid::{Cell, GridDimensions};
use image::imageops::{self, FilterType};
use image::{GrayImage, RgbaImage};
use ndarray::ArrayView2;

/// Mean gray level of a whole image
///
/// # Errors
///
/// Returns an error if the image has no pixels
pub fn image_brightness(image: &GrayImage) -> Result<f64> {
    mean(image.as_raw()).ok_or_else(|| computation_error("image brightness", &"image has no pixels"))
}

/// Mean gray level of every tile, in order
///
/// # Errors
///
/// Returns an error if any tile has no pixels
pub fn piece_brightnesses(tiles: &[GrayImage]) -> Result<Vec<f64>> {
    tiles.iter().map(image_brightness).collect()
}

/// Flatten the target onto white and resample it to the grid's pixel size
///
/// # Errors
///
/// Returns an error if `sample_size` is zero or the target has no pixels
pub fn resample_target(
    target: &RgbaImage,
    grid: GridDimensions,
    sample_size: u32,
) -> Result<GrayImage> {
    if sample_size == 0 {
        return Err(invalid_parameter("sample_size", &sample_size, &"must be positive"));
    }
    if target.width() == 0 || target.height() == 0 {
        return Err(invalid_parameter(
            "target",
            &format!("{}x{}", target.width(), target.height()),
            &"image has no pixels",
        ));
    }

    let gray = flatten_to_gray(target, UNSHADED_BACKGROUND);
    let width = grid.cols as u32 * sample_size;
    let height = grid.rows as u32 * sample_size;
    Ok(imageops::resize(&gray, width, height, FilterType::Lanczos3))
}

/// Mean brightness of each `sample_size` block, as row-major cells
///
/// # Errors
///
/// Returns an error if the resampled target does not match the grid size
pub fn extract_cells(
    resampled: &GrayImage,
    grid: GridDimensions,
    sample_size: u32,
) -> Result<Vec<Cell>> {
    let block = sample_size as usize;
    let expected = (grid.cols * block, grid.rows * block);
    let actual = (resampled.width() as usize, resampled.height() as usize);
    if block == 0 || expected != actual {
        return Err(invalid_parameter(
            "resampled target",
            &format!("{}x{}", actual.0, actual.1),
            &format!("expected {}x{}", expected.0, expected.1),
        ));
    }

    let pixels = ArrayView2::from_shape((actual.1, actual.0), resampled.as_raw().as_slice())?;

    // Blocks come out row-major, matching the grid's cell order
    pixels
        .exact_chunks((block, block))
        .into_iter()
        .enumerate()
        .map(|(index, region)| {
            let (row, col) = grid.position(index);
            let brightness = mean(region.iter())
                .ok_or_else(|| computation_error("cell brightness", &"empty cell region"))?;
            Ok(Cell::new(row, col, brightness))
        })
        .collect()
}

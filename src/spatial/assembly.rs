//! Canvas composition of a solved layout

use crate::algorithm::assignment::Assignment;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::spatial::grid::GridDimensions;
use image::GrayImage;
use image::imageops;

/// Tile each cell's piece image onto a canvas
///
/// Cells tile the canvas exactly, so no two pieces overlap.
///
/// # Errors
///
/// Returns an error if:
/// - The assignment does not cover every cell of the grid
/// - A piece image is not `cell_size` square
/// - The assignment references a variant without an image
pub fn assemble(
    assignment: &Assignment,
    grid: GridDimensions,
    piece_images: &[GrayImage],
    cell_size: u32,
) -> Result<GrayImage> {
    if assignment.len() != grid.cell_count() {
        return Err(invalid_parameter(
            "assignment",
            &assignment.len(),
            &format!("expected {} cells", grid.cell_count()),
        ));
    }
    if cell_size == 0 {
        return Err(invalid_parameter("cell_size", &cell_size, &"must be positive"));
    }
    if let Some((index, piece)) = piece_images
        .iter()
        .enumerate()
        .find(|(_, piece)| piece.width() != cell_size || piece.height() != cell_size)
    {
        return Err(invalid_parameter(
            "piece image",
            &format!("{index} ({}x{})", piece.width(), piece.height()),
            &format!("must be {cell_size}x{cell_size}"),
        ));
    }

    let width = grid.cols as u32 * cell_size;
    let height = grid.rows as u32 * cell_size;
    let mut canvas = GrayImage::new(width, height);

    for (cell_index, variant) in assignment.iter().enumerate() {
        let piece = piece_images
            .get(variant)
            .ok_or(MosaicError::InvalidParameter {
                parameter: "assignment",
                value: variant.to_string(),
                reason: format!("only {} piece images", piece_images.len()),
            })?;
        let (row, col) = grid.position(cell_index);
        let x = i64::from(col as u32 * cell_size);
        let y = i64::from(row as u32 * cell_size);
        imageops::replace(&mut canvas, piece, x, y);
    }

    Ok(canvas)
}

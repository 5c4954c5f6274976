//! Tests for target resampling and cell and piece brightness extraction

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma, Rgba, RgbaImage};
    use piecemosaic::analysis::brightness::{
        extract_cells, image_brightness, piece_brightnesses, resample_target,
    };
    use piecemosaic::spatial::grid::GridDimensions;

    // Tests whole-image brightness is the pixel mean
    // Verified by summing without dividing
    #[test]
    fn test_image_brightness() {
        let mut image = GrayImage::from_pixel(2, 2, Luma([0]));
        image.put_pixel(1, 1, Luma([200]));
        assert_eq!(image_brightness(&image).unwrap(), 50.0);
        assert!(image_brightness(&GrayImage::new(0, 0)).is_err());
    }

    // Tests piece brightness keeps tile order
    // Verified by sorting the result
    #[test]
    fn test_piece_brightnesses_keep_order() {
        let tiles = vec![
            GrayImage::from_pixel(2, 2, Luma([200])),
            GrayImage::from_pixel(2, 2, Luma([10])),
        ];
        assert_eq!(piece_brightnesses(&tiles).unwrap(), vec![200.0, 10.0]);
    }

    // Tests transparent target pixels count as white
    // Verified by compositing onto black
    #[test]
    fn test_resample_target_flattens_on_white() {
        let target = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        let grid = GridDimensions::new(2, 2);

        let resampled = resample_target(&target, grid, 1).unwrap();
        assert_eq!(resampled.dimensions(), (2, 2));
        assert!(resampled.pixels().all(|p| p.0[0] == 255));
    }

    // Tests the resampled size follows the grid and sample size
    // Verified by ignoring the sample size
    #[test]
    fn test_resample_target_size() {
        let target = RgbaImage::from_pixel(30, 20, Rgba([128, 128, 128, 255]));
        let grid = GridDimensions::new(3, 2);

        let resampled = resample_target(&target, grid, 4).unwrap();
        assert_eq!(resampled.dimensions(), (12, 8));
        assert!(resample_target(&target, grid, 0).is_err());
    }

    // Tests each cell averages its own block of pixels
    // Verified by reading blocks column-major
    #[test]
    fn test_extract_cells_block_means() {
        let mut image = GrayImage::from_pixel(4, 2, Luma([0]));
        image.put_pixel(2, 0, Luma([100]));
        image.put_pixel(3, 1, Luma([100]));
        let grid = GridDimensions::new(2, 1);

        let cells = extract_cells(&image, grid, 2).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!((cells[0].row, cells[0].col, cells[0].brightness), (0, 0, 0.0));
        assert_eq!((cells[1].row, cells[1].col, cells[1].brightness), (0, 1, 50.0));
    }

    // Tests blocks of a multi-row grid come out in row-major order
    // Verified by walking blocks column by column
    #[test]
    fn test_extract_cells_row_major() {
        let mut image = GrayImage::from_pixel(6, 4, Luma([0]));
        // Fill the block at row 0, col 2 and the block at row 1, col 0
        for (x, y) in [(4, 0), (5, 0), (4, 1), (5, 1), (0, 2), (1, 2), (0, 3), (1, 3)] {
            image.put_pixel(x, y, Luma([200]));
        }
        let grid = GridDimensions::new(3, 2);

        let cells = extract_cells(&image, grid, 2).unwrap();
        let summary: Vec<_> = cells.iter().map(|c| (c.row, c.col, c.brightness)).collect();
        assert_eq!(
            summary,
            vec![
                (0, 0, 0.0),
                (0, 1, 0.0),
                (0, 2, 200.0),
                (1, 0, 200.0),
                (1, 1, 0.0),
                (1, 2, 0.0),
            ]
        );
    }

    // Tests a resampled image of the wrong size is rejected
    // Verified by truncating extra pixels
    #[test]
    fn test_extract_cells_rejects_wrong_size() {
        let image = GrayImage::new(5, 2);
        assert!(extract_cells(&image, GridDimensions::new(2, 1), 2).is_err());
    }
}

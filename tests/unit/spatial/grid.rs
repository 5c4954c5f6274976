//! Tests for grid shape selection and row-major cell construction

#[cfg(test)]
mod tests {
    use piecemosaic::MosaicError;
    use piecemosaic::spatial::grid::{GridDimensions, cells_from_brightness, factor_pairs};

    // Tests factor pairs are complete and ordered by width
    // Verified by stopping the search at the square root
    #[test]
    fn test_factor_pairs() {
        assert_eq!(factor_pairs(12), vec![(1, 12), (2, 6), (3, 4), (4, 3), (6, 2), (12, 1)]);
        assert_eq!(factor_pairs(7), vec![(1, 7), (7, 1)]);
        assert_eq!(factor_pairs(1), vec![(1, 1)]);
    }

    // Tests a square target picks the squarest grid
    // Verified by picking the last factor pair
    #[test]
    fn test_closest_to_aspect_square() {
        let grid = GridDimensions::closest_to_aspect(1600, 1.0).unwrap();
        assert_eq!(grid, GridDimensions::new(40, 40));
        assert_eq!(grid.cell_count(), 1600);
    }

    // Tests a wide target picks a wide grid
    // Verified by inverting width and height
    #[test]
    fn test_closest_to_aspect_landscape() {
        let grid = GridDimensions::closest_to_aspect(32, 2.0).unwrap();
        assert_eq!(grid, GridDimensions::new(8, 4));
    }

    // Tests the first of two equally close pairs wins
    // Verified by replacing on equal differences
    #[test]
    fn test_closest_to_aspect_tie_keeps_first() {
        // 2x3 is off by 1/3 and 3x2 by 1/2
        let grid = GridDimensions::closest_to_aspect(6, 1.0).unwrap();
        assert_eq!(grid, GridDimensions::new(2, 3));

        // 1x2 and 2x1 are both off by exactly 0.75
        let tied = GridDimensions::closest_to_aspect(2, 1.25).unwrap();
        assert_eq!(tied, GridDimensions::new(1, 2));
    }

    // Tests invalid cell counts and ratios are rejected
    // Verified by removing the parameter checks
    #[test]
    fn test_closest_to_aspect_rejects_invalid_input() {
        assert!(matches!(
            GridDimensions::closest_to_aspect(0, 1.0),
            Err(MosaicError::InvalidParameter { .. })
        ));
        assert!(GridDimensions::closest_to_aspect(10, 0.0).is_err());
        assert!(GridDimensions::closest_to_aspect(10, f64::NAN).is_err());
    }

    // Tests row-major index and position are inverse
    // Verified by swapping row and column in position
    #[test]
    fn test_index_position_roundtrip() {
        let grid = GridDimensions::new(5, 3);
        assert_eq!(grid.index(2, 4), 14);
        assert_eq!(grid.position(14), (2, 4));
        assert_eq!(grid.position(5), (1, 0));
    }

    // Tests cells are created row-major with their brightness
    // Verified by iterating column-major
    #[test]
    fn test_cells_from_brightness() {
        let grid = GridDimensions::new(2, 2);
        let cells = cells_from_brightness(grid, &[10.0, 20.0, 30.0, 40.0]).unwrap();

        assert_eq!(cells.len(), 4);
        assert_eq!((cells[1].row, cells[1].col, cells[1].brightness), (0, 1, 20.0));
        assert_eq!((cells[2].row, cells[2].col, cells[2].brightness), (1, 0, 30.0));

        assert!(cells_from_brightness(grid, &[1.0, 2.0]).is_err());
    }
}

//! Tests for piece brightness reports and their CSV output

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use piecemosaic::io::report::BrightnessReport;
    use piecemosaic::pieces::normalize::PieceArtwork;
    use piecemosaic::pieces::variant::{
        BackgroundScheme, PieceColor, PieceKind, PieceVariant, Shade, VariantKey,
    };

    fn artwork() -> PieceArtwork {
        let mut artwork = PieceArtwork::new();
        for color in PieceColor::ALL {
            let ink = match color {
                PieceColor::Black => Rgba([0, 0, 0, 255]),
                PieceColor::White => Rgba([255, 255, 255, 255]),
            };
            for kind in PieceKind::ALL {
                let mut image = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
                image.put_pixel(0, 0, ink);
                image.put_pixel(1, 1, ink);
                artwork.insert(color, kind, image);
            }
        }
        artwork
    }

    fn variant(kind: PieceKind, brightness: f64) -> PieceVariant {
        PieceVariant {
            key: VariantKey {
                kind,
                color: PieceColor::Black,
                shade: Shade::Light,
            },
            brightness,
            demand: 1,
        }
    }

    // Tests rows are kept sorted by brightness
    // Verified by keeping insertion order
    #[test]
    fn test_rows_sorted_by_brightness() {
        let mut report = BrightnessReport::new();
        report.add_variants(
            "set",
            &[variant(PieceKind::Pawn, 90.0), variant(PieceKind::King, 30.0)],
        );

        let levels: Vec<f64> = report.rows().iter().map(|r| r.brightness).collect();
        assert_eq!(levels, vec![30.0, 90.0]);
        assert_eq!(report.range("set"), Some((30.0, 90.0)));
        assert_eq!(report.range("other"), None);
    }

    // Tests each scheme and set contributes a labelled block of rows
    // Verified by labelling rows with the set name only
    #[test]
    fn test_measure_all() {
        let sets = vec![("plain".to_string(), artwork())];
        let report = BrightnessReport::measure_all(&sets, &BackgroundScheme::ALL).unwrap();

        assert_eq!(report.len(), 3 * 24);
        // Half of every tile is ink, half is the square
        let (low, high) = report.range("minmax-plain").unwrap();
        assert_eq!(low, 0.0);
        assert_eq!(high, 255.0);
        assert!(report.range("dark-plain").is_some());
    }

    // Tests measuring without a scheme uses the unshaded catalog
    // Verified by measuring both shades on white
    #[test]
    fn test_measure_unshaded() {
        let mut report = BrightnessReport::new();
        report.measure("plain", &artwork(), None).unwrap();
        assert_eq!(report.len(), 12);
        assert_eq!(report.range("plain"), Some((127.5, 255.0)));
    }

    // Tests the CSV header and row format
    // Verified by omitting the header line
    #[test]
    fn test_write_csv() {
        let mut report = BrightnessReport::new();
        report.add_variants("merida", &[variant(PieceKind::Rook, 12.3456)]);

        let mut buffer = Vec::new();
        report.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(
            text,
            "label,variant,brightness\nmerida,Black-Rook-light,12.346\n"
        );
    }

    // Tests saving writes the CSV file
    // Verified by disabling the file write
    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let mut report = BrightnessReport::new();
        report.add_variants("s", &[variant(PieceKind::Pawn, 1.0)]);

        report.save(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("label,variant,brightness"));
        assert!(report.save(&dir.path().join("missing/report.csv")).is_err());
    }
}

//! Tests for piece identities, parsing and background levels

#[cfg(test)]
mod tests {
    use piecemosaic::pieces::variant::{
        BackgroundScheme, PieceColor, PieceKind, Shade, VariantKey, background_level,
    };

    // Tests piece kinds parse case-insensitively
    // Verified by comparing names exactly
    #[test]
    fn test_piece_kind_parsing() {
        assert_eq!("knight".parse::<PieceKind>().unwrap(), PieceKind::Knight);
        assert_eq!(" QUEEN ".parse::<PieceKind>().unwrap(), PieceKind::Queen);
        assert!("archbishop".parse::<PieceKind>().is_err());
    }

    // Tests kinds are listed in file-name order
    // Verified by reordering ALL
    #[test]
    fn test_kind_order_matches_file_names() {
        let names: Vec<&str> = PieceKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["Bishop", "King", "Knight", "Pawn", "Queen", "Rook"]);
        assert_eq!(PieceColor::ALL, [PieceColor::Black, PieceColor::White]);
    }

    // Tests built-in background schemes and their levels
    // Verified by swapping light and dark levels
    #[test]
    fn test_background_schemes() {
        let dark: BackgroundScheme = "dark".parse().unwrap();
        assert_eq!(dark.level(Shade::Light), 169);
        assert_eq!(dark.level(Shade::Dark), 134);

        let minmax: BackgroundScheme = "MinMax".parse().unwrap();
        assert_eq!((minmax.light, minmax.dark), (255, 0));

        assert_eq!(BackgroundScheme::LIGHT.level(Shade::Dark), 171);
        assert!("sepia".parse::<BackgroundScheme>().is_err());
    }

    // Tests pieces without a scheme sit on white
    // Verified by defaulting to the dark level
    #[test]
    fn test_background_level_without_scheme() {
        assert_eq!(background_level(None, Shade::Dark), 255);
        assert_eq!(
            background_level(Some(&BackgroundScheme::MINMAX), Shade::Dark),
            0
        );
    }

    // Tests shades parse from their lowercase names
    // Verified by mapping both names to Light
    #[test]
    fn test_shade_parsing() {
        assert_eq!("Dark".parse::<Shade>().unwrap(), Shade::Dark);
        assert_eq!("light".parse::<Shade>().unwrap(), Shade::Light);
        assert!("medium".parse::<Shade>().is_err());
    }

    // Tests variant keys display as color, kind and shade
    // Verified by omitting the shade
    #[test]
    fn test_variant_key_display() {
        let key = VariantKey {
            kind: PieceKind::Rook,
            color: PieceColor::White,
            shade: Shade::Dark,
        };
        assert_eq!(key.to_string(), "White-Rook-dark");
    }
}

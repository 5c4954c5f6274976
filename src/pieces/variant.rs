//! Piece identities and the renderable variants built from them

use crate::io::configuration::{
    DARK_BACKGROUND, LIGHT_BACKGROUND, MINMAX_BACKGROUND, UNSHADED_BACKGROUND,
};
use crate::io::error::{MosaicError, invalid_parameter};
use std::fmt;
use std::str::FromStr;

/// Chess piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    /// Bishop
    Bishop,
    /// King
    King,
    /// Knight
    Knight,
    /// Pawn
    Pawn,
    /// Queen
    Queen,
    /// Rook
    Rook,
}

impl PieceKind {
    /// All kinds in file-name order
    pub const ALL: [Self; 6] = [
        Self::Bishop,
        Self::King,
        Self::Knight,
        Self::Pawn,
        Self::Queen,
        Self::Rook,
    ];

    /// Capitalized name as used in piece file names
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bishop => "Bishop",
            Self::King => "King",
            Self::Knight => "Knight",
            Self::Pawn => "Pawn",
            Self::Queen => "Queen",
            Self::Rook => "Rook",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PieceKind {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| invalid_parameter("piece kind", &s, &"unknown chess piece"))
    }
}

/// Piece color
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceColor {
    /// Black pieces
    Black,
    /// White pieces
    White,
}

impl PieceColor {
    /// Both colors in file-name order
    pub const ALL: [Self; 2] = [Self::Black, Self::White];

    /// Capitalized name as used in piece file names
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::White => "White",
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Board square shade a piece is composited onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shade {
    /// Light square
    Light,
    /// Dark square
    Dark,
}

impl Shade {
    /// Lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shade {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(invalid_parameter("shade", &s, &"expected 'light' or 'dark'")),
        }
    }
}

/// Gray levels of the two board shades pieces are composited onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundScheme {
    /// Scheme name
    pub name: &'static str,
    /// Level of the light square
    pub light: u8,
    /// Level of the dark square
    pub dark: u8,
}

impl BackgroundScheme {
    /// White and black squares
    pub const MINMAX: Self = Self {
        name: "minmax",
        light: MINMAX_BACKGROUND.0,
        dark: MINMAX_BACKGROUND.1,
    };

    /// Mid-gray squares
    pub const DARK: Self = Self {
        name: "dark",
        light: DARK_BACKGROUND.0,
        dark: DARK_BACKGROUND.1,
    };

    /// Pale squares
    pub const LIGHT: Self = Self {
        name: "light",
        light: LIGHT_BACKGROUND.0,
        dark: LIGHT_BACKGROUND.1,
    };

    /// Every built-in scheme
    pub const ALL: [Self; 3] = [Self::MINMAX, Self::DARK, Self::LIGHT];

    /// Gray level for a shade
    pub const fn level(&self, shade: Shade) -> u8 {
        match shade {
            Shade::Light => self.light,
            Shade::Dark => self.dark,
        }
    }
}

impl FromStr for BackgroundScheme {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name.eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                invalid_parameter("background", &s, &"expected 'minmax', 'dark' or 'light'")
            })
    }
}

/// Gray level for a shade, falling back to white when no scheme is active
pub fn background_level(scheme: Option<&BackgroundScheme>, shade: Shade) -> u8 {
    scheme.map_or(UNSHADED_BACKGROUND, |s| s.level(shade))
}

/// Composite key identifying one renderable tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariantKey {
    /// Piece kind
    pub kind: PieceKind,
    /// Piece color
    pub color: PieceColor,
    /// Square shade behind the piece
    pub shade: Shade,
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.color, self.kind, self.shade)
    }
}

/// A renderable tile with its brightness and required usage count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceVariant {
    /// Identity of the tile
    pub key: VariantKey,
    /// Mean gray level of the normalized tile
    pub brightness: f64,
    /// Exact number of cells this tile must fill
    pub demand: usize,
}

//! PNG loading of targets and piece sets, and grayscale PNG export

use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::pieces::normalize::PieceArtwork;
use crate::pieces::variant::{PieceColor, PieceKind};
use image::{GrayImage, RgbaImage};
use std::path::{Path, PathBuf};

/// Load any supported image as RGBA
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|image| image.to_rgba8())
        .map_err(|e| MosaicError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// File name of one piece's artwork inside a piece directory
pub fn piece_file_name(color: PieceColor, kind: PieceKind) -> String {
    format!("{color}-{kind}.png")
}

/// Load `{Color}-{Kind}.png` for every color and the given kinds
///
/// # Errors
///
/// Returns an error if any piece file is missing or cannot be decoded
pub fn load_piece_artwork(directory: &Path, kinds: &[PieceKind]) -> Result<PieceArtwork> {
    let mut artwork = PieceArtwork::new();
    for color in PieceColor::ALL {
        for &kind in kinds {
            let path = directory.join(piece_file_name(color, kind));
            artwork.insert(color, kind, load_rgba(&path)?);
        }
    }
    tracing::debug!(
        directory = %directory.display(),
        pieces = artwork.len(),
        "Loaded piece artwork"
    );
    Ok(artwork)
}

/// Whether `directory` holds artwork for every color and kind
pub fn is_piece_set(directory: &Path) -> bool {
    PieceColor::ALL.into_iter().all(|color| {
        PieceKind::ALL
            .into_iter()
            .all(|kind| directory.join(piece_file_name(color, kind)).is_file())
    })
}

/// Named piece sets found at `root`
///
/// `root` is either one complete piece set, named after the directory, or a
/// directory whose complete piece-set subdirectories are returned in name order.
///
/// # Errors
///
/// Returns an error if `root` cannot be read or holds no complete piece set
pub fn find_piece_sets(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    let name_of = |path: &Path| {
        path.file_name()
            .map_or_else(|| "pieces".to_string(), |n| n.to_string_lossy().to_string())
    };

    if is_piece_set(root) {
        return Ok(vec![(name_of(root), root.to_path_buf())]);
    }

    let mut sets = Vec::new();
    if root.is_dir() {
        for entry in std::fs::read_dir(root)? {
            let path = entry?.path();
            if path.is_dir() && is_piece_set(&path) {
                sets.push((name_of(&path), path));
            }
        }
    }
    if sets.is_empty() {
        return Err(invalid_parameter(
            "piece sets",
            &root.display(),
            &"no directory with a complete {Color}-{Kind}.png set",
        ));
    }
    sets.sort();
    Ok(sets)
}

/// Save a grayscale image as PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_gray_png(image: &GrayImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Sibling path of `input_path` with `suffix` appended to the stem
pub fn suffixed_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

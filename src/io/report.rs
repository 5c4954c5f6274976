//! Piece brightness reports across piece sets and background schemes
//!
//! A report lists the mean brightness of every variant of one or more piece
//! sets, each set measured under a background scheme. Rows are kept sorted
//! by brightness so the spread of a set is visible at a glance.

use crate::analysis::brightness::piece_brightnesses;
use crate::analysis::demand::Catalog;
use crate::io::error::{MosaicError, Result};
use crate::pieces::normalize::{PieceArtwork, normalize_pieces};
use crate::pieces::variant::{BackgroundScheme, PieceVariant, VariantKey};
use std::io::Write;
use std::path::Path;

/// Brightness of one variant of one labelled piece set
#[derive(Debug, Clone, PartialEq)]
pub struct BrightnessRow {
    /// Piece set and background, e.g. `dark-merida`
    pub label: String,
    /// Variant measured
    pub variant: VariantKey,
    /// Mean gray level of the normalized tile
    pub brightness: f64,
}

/// Sorted brightness rows for one or more piece sets
#[derive(Debug, Clone, Default)]
pub struct BrightnessReport {
    rows: Vec<BrightnessRow>,
}

impl BrightnessReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rows for already measured variants
    pub fn add_variants(&mut self, label: &str, variants: &[PieceVariant]) {
        self.rows.extend(variants.iter().map(|v| BrightnessRow {
            label: label.to_string(),
            variant: v.key,
            brightness: v.brightness,
        }));
        self.sort();
    }

    /// Measure one piece set under a background scheme and add its rows
    ///
    /// Without a scheme the pieces are measured on white. The label is
    /// `{scheme}-{set_name}`, or `set_name` alone without a scheme.
    ///
    /// # Errors
    ///
    /// Returns an error if the artwork lacks a piece or has no opaque pixels
    pub fn measure(
        &mut self,
        set_name: &str,
        artwork: &PieceArtwork,
        scheme: Option<&BackgroundScheme>,
    ) -> Result<()> {
        let catalog = if scheme.is_some() {
            Catalog::standard()
        } else {
            Catalog::unshaded()
        };
        let keys = catalog.variant_keys();
        let normalized = normalize_pieces(artwork, &keys, scheme, None)?;
        let levels = piece_brightnesses(&normalized.tiles)?;

        let label = scheme.map_or_else(
            || set_name.to_string(),
            |s| format!("{}-{set_name}", s.name),
        );
        self.rows
            .extend(keys.into_iter().zip(levels).map(|(variant, brightness)| {
                BrightnessRow {
                    label: label.clone(),
                    variant,
                    brightness,
                }
            }));
        self.sort();
        tracing::debug!(label = %label, rows = self.rows.len(), "Measured piece set");
        Ok(())
    }

    /// Measure every set under every scheme, scheme-major
    ///
    /// # Errors
    ///
    /// Returns the first measurement error
    pub fn measure_all(
        sets: &[(String, PieceArtwork)],
        schemes: &[BackgroundScheme],
    ) -> Result<Self> {
        let mut report = Self::new();
        for scheme in schemes {
            for (name, artwork) in sets {
                report.measure(name, artwork, Some(scheme))?;
            }
        }
        Ok(report)
    }

    /// Rows ordered by brightness, then label, then variant
    pub const fn rows(&self) -> &[BrightnessRow] {
        self.rows.as_slice()
    }

    /// Number of rows
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the report has no rows
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Darkest and brightest value for one label
    pub fn range(&self, label: &str) -> Option<(f64, f64)> {
        let mut values = self
            .rows
            .iter()
            .filter(|row| row.label == label)
            .map(|row| row.brightness);
        let first = values.next()?;
        Some(values.fold((first, first), |(low, high), v| (low.min(v), high.max(v))))
    }

    /// Write `label,variant,brightness` CSV with a header line
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails
    pub fn write_csv<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "label,variant,brightness")?;
        for row in &self.rows {
            writeln!(writer, "{},{},{:.3}", row.label, row.variant, row.brightness)?;
        }
        writer.flush()
    }

    /// Write the CSV report to a file
    ///
    /// # Errors
    ///
    /// Returns a file system error if the file cannot be created or written
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| MosaicError::FileSystem {
            path: path.to_path_buf(),
            operation: "create report",
            source: e,
        })?;
        self.write_csv(std::io::BufWriter::new(file))
            .map_err(|e| MosaicError::FileSystem {
                path: path.to_path_buf(),
                operation: "write report",
                source: e,
            })
    }

    fn sort(&mut self) {
        self.rows.sort_by(|a, b| {
            a.brightness
                .total_cmp(&b.brightness)
                .then_with(|| a.label.cmp(&b.label))
                .then_with(|| a.variant.cmp(&b.variant))
        });
    }
}

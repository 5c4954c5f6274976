//! Command-line interface for batch processing PNG targets into piece mosaics

use crate::algorithm::pipeline::{MosaicConfig, MosaicPipeline};
use crate::analysis::demand::{ShadeRounding, parse_rules};
use crate::io::configuration::{
    ANALYSIS_REPORT_FILE, DEFAULT_PIECE_DIR, DEFAULT_SAMPLE_SIZE, DEFAULT_SETS, OUTPUT_SUFFIX,
    REPORT_SUFFIX, TARGET_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{
    find_piece_sets, load_piece_artwork, load_rgba, save_gray_png, suffixed_path,
};
use crate::io::progress::{FileProgress, ProgressManager};
use crate::io::report::BrightnessReport;
use crate::pieces::normalize::PieceArtwork;
use crate::pieces::variant::{BackgroundScheme, PieceKind, Shade};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "piecemosaic")]
#[command(
    author,
    version,
    about = "Render images as brightness-matched mosaics of chess pieces"
)]
/// Command-line arguments for the mosaic tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    ///
    /// With --analyze, a piece-set directory or a directory of piece sets.
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory holding {Color}-{Kind}.png piece images
    #[arg(short, long, default_value = DEFAULT_PIECE_DIR)]
    pub pieces: PathBuf,

    /// Number of complete piece sets the mosaic uses
    #[arg(short = 'n', long, default_value_t = DEFAULT_SETS)]
    pub sets: usize,

    /// Target pixels per cell edge when measuring brightness
    #[arg(short = 'S', long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: u32,

    /// Rendered tile edge in pixels (defaults to the cropped piece size)
    #[arg(short, long)]
    pub tile_size: Option<u32>,

    /// Board shading behind pieces: minmax, dark or light
    #[arg(short, long)]
    pub background: Option<BackgroundScheme>,

    /// Shade that receives the smaller share of an odd split
    #[arg(long, default_value = "dark")]
    pub floor_shade: Shade,

    /// Piece-count rules replacing the defaults, e.g. "pawn=4,king=split:1"
    #[arg(short, long)]
    pub rules: Option<String>,

    /// Also save the resampled grayscale target
    #[arg(long)]
    pub save_target: bool,

    /// Also write a CSV report of piece brightness
    #[arg(long)]
    pub report: bool,

    /// Compare piece-set brightness under each background instead of building mosaics
    #[arg(short, long)]
    pub analyze: bool,

    /// Report path for --analyze (defaults to TARGET/piece_brightness.csv)
    #[arg(short, long, requires = "analyze")]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Background schemes to measure with --analyze: the chosen one, or all
    pub fn analysis_schemes(&self) -> Vec<BackgroundScheme> {
        self.background
            .map_or_else(|| BackgroundScheme::ALL.to_vec(), |scheme| vec![scheme])
    }

    /// Where --analyze writes its report
    pub fn analysis_output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.target.join(ANALYSIS_REPORT_FILE))
    }

    /// Mosaic configuration described by the arguments
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `--rules` cannot be parsed
    pub fn mosaic_config(&self) -> Result<MosaicConfig> {
        let rules = self.rules.as_deref().map(parse_rules).transpose()?;
        Ok(MosaicConfig {
            sets: self.sets,
            sample_size: self.sample_size,
            tile_size: self.tile_size,
            background: self.background,
            shade_rounding: ShadeRounding {
                floor_shade: self.floor_shade,
            },
            rules,
        })
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, piece loading or file processing fails
    pub fn process(&mut self) -> Result<()> {
        if self.cli.analyze {
            return self.analyze();
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        let pipeline = MosaicPipeline::new(self.cli.mosaic_config()?);
        let artwork = load_piece_artwork(&self.cli.pieces, pipeline.catalog().kinds())?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(&pipeline, &artwork, file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Measure every piece set under every scheme and write the sorted report
    ///
    /// # Errors
    ///
    /// Returns an error if no piece set is found, a set cannot be measured,
    /// or the report cannot be written
    pub fn analyze(&self) -> Result<()> {
        let mut sets = Vec::new();
        for (name, dir) in find_piece_sets(&self.cli.target)? {
            sets.push((name, load_piece_artwork(&dir, &PieceKind::ALL)?));
        }
        let schemes = self.cli.analysis_schemes();

        let report = BrightnessReport::measure_all(&sets, &schemes)?;
        let output = self.cli.analysis_output();
        report.save(&output)?;

        for scheme in &schemes {
            for (name, _) in &sets {
                let label = format!("{}-{name}", scheme.name);
                if let Some((darkest, brightest)) = report.range(&label) {
                    tracing::info!(label = %label, darkest, brightest, "Piece set brightness range");
                }
            }
        }
        tracing::info!(
            report = %output.display(),
            sets = sets.len(),
            schemes = schemes.len(),
            rows = report.len(),
            "Wrote brightness comparison"
        );
        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && !is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(
        &self,
        pipeline: &MosaicPipeline,
        artwork: &PieceArtwork,
        input_path: &Path,
        index: usize,
    ) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        let reporter = self
            .progress_manager
            .as_ref()
            .map_or_else(FileProgress::hidden, |pm| pm.start_file(index, input_path));

        let target = load_rgba(input_path)?;
        let prepared = pipeline.prepare(&target, artwork)?;
        let assignment = prepared.solve(&reporter, None)?;
        let mosaic = prepared.render(&assignment)?;
        save_gray_png(&mosaic, &output_path)?;

        if self.cli.save_target {
            save_gray_png(
                &prepared.resampled,
                &suffixed_path(input_path, TARGET_SUFFIX, "png"),
            )?;
        }

        if self.cli.report {
            let mut report = BrightnessReport::new();
            let label = self
                .cli
                .pieces
                .file_name()
                .map_or_else(|| "pieces".to_string(), |n| n.to_string_lossy().to_string());
            report.add_variants(&label, &prepared.variants);
            report.save(&suffixed_path(input_path, REPORT_SUFFIX, "csv"))?;
        }

        tracing::info!(
            file = %input_path.display(),
            total_cost = assignment.total_cost(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Wrote mosaic"
        );

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file(index, input_path, start_time.elapsed());
        }

        Ok(())
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        suffixed_path(input_path, OUTPUT_SUFFIX, "png")
    }
}

// Mosaics and saved targets written next to their inputs
fn is_generated_output(path: &Path) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX) || stem.ends_with(TARGET_SUFFIX))
}

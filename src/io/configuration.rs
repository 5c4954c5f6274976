//! Mosaic constants and runtime configuration defaults

// Defaults for configurable parameters
/// Number of complete piece sets the mosaic consumes
pub const DEFAULT_SETS: usize = 50;

/// Target pixels per cell edge when resampling the target image
pub const DEFAULT_SAMPLE_SIZE: u32 = 1;

/// Directory searched for piece images when none is given
pub const DEFAULT_PIECE_DIR: &str = "pieces";

// Brightness domain
/// Largest valid brightness value
pub const MAX_BRIGHTNESS: f64 = 255.0;

/// Background level used when pieces are composited without shading
pub const UNSHADED_BACKGROUND: u8 = 255;

// Background schemes as (light square, dark square) levels
/// Pure white and pure black squares
pub const MINMAX_BACKGROUND: (u8, u8) = (255, 0);
/// Mid-gray board squares
pub const DARK_BACKGROUND: (u8, u8) = (169, 134);
/// Pale board squares
pub const LIGHT_BACKGROUND: (u8, u8) = (220, 171);

// Safety limit to prevent excessive memory allocation
/// Maximum number of cells a single mosaic may contain
pub const MAX_CELLS: usize = 1_000_000;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

// Output settings
/// Suffix added to mosaic output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Suffix added to the saved resampled target
pub const TARGET_SUFFIX: &str = "_target";
/// Suffix added to brightness report filenames
pub const REPORT_SUFFIX: &str = "_brightness";
/// File name of the piece-set comparison report written by `--analyze`
pub const ANALYSIS_REPORT_FILE: &str = "piece_brightness.csv";

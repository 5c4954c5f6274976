//! Error types and context management for mosaic operations

use std::fmt;
use std::path::PathBuf;

/// Identifies which input carried an invalid brightness value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessSubject {
    /// A grid cell at (row, col)
    Cell {
        /// Grid row of the cell
        row: usize,
        /// Grid column of the cell
        col: usize,
    },
    /// A cell given only by its index in a flat brightness list
    Sample {
        /// Index of the cell in the list
        index: usize,
    },
    /// A piece variant by its index in the variant list
    Variant {
        /// Index of the variant
        index: usize,
    },
}

impl fmt::Display for BrightnessSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell { row, col } => write!(f, "cell ({row}, {col})"),
            Self::Sample { index } => write!(f, "cell {index}"),
            Self::Variant { index } => write!(f, "variant {index}"),
        }
    }
}

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Piece-count rules are malformed
    ///
    /// Raised when a piece kind has no rule, has more than one rule,
    /// or a multiplicity is negative.
    Configuration {
        /// The rule or piece kind at fault
        rule: String,
        /// Explanation of what is wrong with it
        reason: String,
    },

    /// A brightness value is non-finite or outside `[0, 255]`
    InvalidBrightness {
        /// Where the value came from
        subject: BrightnessSubject,
        /// The offending value
        value: f64,
    },

    /// Supply and demand cannot be balanced
    ///
    /// Detected before any flow network is built.
    Infeasible {
        /// Description of the mismatch
        reason: String,
    },

    /// A solve was cancelled through its cancellation token
    Cancelled {
        /// Augmentations completed before the cancellation was observed
        completed: usize,
        /// Augmentations the full solve needs
        total: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::Configuration { rule, reason } => {
                write!(f, "Invalid piece rule '{rule}': {reason}")
            }
            Self::InvalidBrightness { subject, value } => {
                write!(
                    f,
                    "Invalid brightness {value} for {subject}: must be finite and within [0, 255]"
                )
            }
            Self::Infeasible { reason } => {
                write!(f, "Infeasible assignment: {reason}")
            }
            Self::Cancelled { completed, total } => {
                write!(f, "Solve cancelled after {completed} of {total} augmentations")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Enriches computation errors with the name of the failing operation
pub trait WithContext<T> {
    /// Replace the operation name on a `Computation` error
    ///
    /// # Errors
    ///
    /// Propagates the original error with the operation applied
    fn with_operation(self, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<MosaicError>,
{
    fn with_operation(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            if let MosaicError::Computation { operation: op, .. } = &mut error {
                *op = operation;
            }
            error
        })
    }
}

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<ndarray::ShapeError> for MosaicError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::Computation {
            operation: "array shape",
            reason: err.to_string(),
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> MosaicError {
    MosaicError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a piece rule configuration error
pub fn configuration_error(rule: &impl ToString, reason: &impl ToString) -> MosaicError {
    MosaicError::Configuration {
        rule: rule.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an infeasibility error
pub fn infeasible(reason: &impl ToString) -> MosaicError {
    MosaicError::Infeasible {
        reason: reason.to_string(),
    }
}

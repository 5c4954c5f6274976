//! File handling, user interface and shared error types

/// Command-line parsing and batch file processing
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types and constructors
pub mod error;
/// PNG loading and export
pub mod image;
/// Terminal progress bars
pub mod progress;
/// Piece brightness reports
pub mod report;

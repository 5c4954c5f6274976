pub mod error;
pub mod progress;
pub mod report;

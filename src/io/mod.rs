//! Input/output surfaces around the synthesis engine

/// Command-line parsing and batch file processing
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error type shared by the whole crate
pub mod error;
/// PNG loading and export
pub mod image;
/// Terminal progress bars
pub mod progress;
/// Fill animation capture and GIF export
pub mod visualization;

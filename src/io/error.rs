//! Error types and context management for synthesis operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all synthesis operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Configuration rejected before any state was touched
    ///
    /// Raised when:
    /// - The exemplar region leaves the source bounds
    /// - The exemplar region is narrower or shorter than one patch
    /// - The patch radius is zero
    Configuration {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Source raster and hole mask disagree in size
    DimensionMismatch {
        /// Source dimensions (rows, cols)
        source_dimensions: (usize, usize),
        /// Mask dimensions (rows, cols)
        mask_dimensions: (usize, usize),
    },

    /// A step was requested while the engine was not running
    NotRunning {
        /// Name of the state the engine was in
        state: &'static str,
    },

    /// Lifecycle action not permitted from the current state
    InvalidTransition {
        /// Name of the state the engine was in
        from: &'static str,
        /// Action that was attempted
        action: &'static str,
    },

    /// Internal invariant broken; indicates a defect rather than bad input
    Invariant {
        /// Operation during which the invariant failed
        operation: &'static str,
        /// Description of the failure
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
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::Configuration {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid configuration '{parameter}' = '{value}': {reason}")
            }
            Self::DimensionMismatch {
                source_dimensions,
                mask_dimensions,
            } => {
                write!(
                    f,
                    "Mask size {}x{} does not match source size {}x{}",
                    mask_dimensions.1, mask_dimensions.0, source_dimensions.1, source_dimensions.0
                )
            }
            Self::NotRunning { state } => {
                write!(f, "Cannot step while the engine is {state}")
            }
            Self::InvalidTransition { from, action } => {
                write!(f, "Cannot {action} while the engine is {from}")
            }
            Self::Invariant { operation, reason } => {
                write!(f, "Invariant violated in {operation}: {reason}")
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
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl AlgorithmError {
    /// Whether this error came from validating caller-supplied configuration
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::DimensionMismatch { .. }
        )
    }
}

/// Convenience type alias for synthesis results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a configuration error
pub fn configuration_error(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::Configuration {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invariant violation error
pub fn invariant_error(operation: &'static str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::Invariant {
        operation,
        reason: reason.to_string(),
    }
}

/// Create an error for an unusable command-line target path
pub fn target_error(path: PathBuf, reason: &str) -> AlgorithmError {
    AlgorithmError::FileSystem {
        path,
        operation: "resolve target",
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, reason.to_string()),
    }
}

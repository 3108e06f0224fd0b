//! Error types for partitioning, refinement and document export

use std::collections::TryReserveError;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all stippling operations
#[derive(Debug)]
pub enum StippleError {
    /// Failed to decode the source image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Configuration value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Geometric precondition violated
    ///
    /// Raised for an empty site set, a zero-sized density field, or density
    /// data that does not describe a valid field.
    InvalidGeometry {
        /// Description of the violated precondition
        reason: String,
    },

    /// Storage for a per-pass buffer could not be reserved
    Allocation {
        /// Buffer that was being reserved
        buffer: &'static str,
        /// Number of elements requested
        requested: usize,
        /// Underlying reservation error
        source: TryReserveError,
    },

    /// Failed to write a vector document
    SvgExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
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

impl fmt::Display for StippleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidGeometry { reason } => {
                write!(f, "Invalid geometry: {reason}")
            }
            Self::Allocation {
                buffer,
                requested,
                source,
            } => {
                write!(
                    f,
                    "Failed to allocate {buffer} ({requested} elements): {source}"
                )
            }
            Self::SvgExport { path, source } => {
                write!(
                    f,
                    "Failed to export document to '{}': {source}",
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

impl std::error::Error for StippleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::SvgExport { source, .. } | Self::FileSystem { source, .. } => Some(source),
            Self::Allocation { source, .. } => Some(source),
            Self::InvalidParameter { .. } | Self::InvalidGeometry { .. } => None,
        }
    }
}

/// Convenience type alias for stippling results
pub type Result<T> = std::result::Result<T, StippleError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> StippleError {
    StippleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid geometry error
pub fn invalid_geometry(reason: &impl ToString) -> StippleError {
    StippleError::InvalidGeometry {
        reason: reason.to_string(),
    }
}

/// Reserve exactly `requested` elements, mapping failure to [`StippleError::Allocation`]
///
/// # Errors
///
/// Returns an allocation error if the reservation cannot be satisfied
pub fn reserve_buffer<T>(buffer: &'static str, requested: usize) -> Result<Vec<T>> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(requested)
        .map_err(|source| StippleError::Allocation {
            buffer,
            requested,
            source,
        })?;
    Ok(storage)
}

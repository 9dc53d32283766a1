//! Error types and context management for generation and persistence

use std::fmt;
use std::path::PathBuf;

use crate::spatial::tiles::SpawnKind;

/// Main error type for all level operations
#[derive(Debug)]
pub enum MapError {
    /// No flat run could hold a mandatory spawnpoint
    ///
    /// Recoverable: the pipeline rerolls the heightmap and retries.
    MissingSpawnpoint {
        /// Spawnpoint that could not be placed
        kind: SpawnKind,
        /// Generation attempt when this occurred (1-based)
        attempt: usize,
    },

    /// Every generation attempt failed mandatory spawnpoint placement
    GenerationExhausted {
        /// Number of attempts made
        attempts: usize,
        /// Spawnpoint missing on the final attempt
        last_missing: SpawnKind,
    },

    /// Generator parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Persisted tilemap is structurally valid JSON but not a valid tilemap
    MalformedTilemap {
        /// File the tilemap was read from
        path: PathBuf,
        /// Description of the defect
        reason: String,
    },

    /// JSON encoding or decoding failed
    Serialization {
        /// File being read or written
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Tilemap has no grid tiles to work with
    EmptyTilemap {
        /// Operation that needed tiles
        operation: &'static str,
    },

    /// Failed to save a preview image to disk
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

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSpawnpoint { kind, attempt } => {
                write!(
                    f,
                    "No flat run for the {kind} spawnpoint on attempt {attempt}"
                )
            }
            Self::GenerationExhausted {
                attempts,
                last_missing,
            } => {
                write!(
                    f,
                    "Generation failed after {attempts} attempts (last missing: {last_missing} spawnpoint)"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MalformedTilemap { path, reason } => {
                write!(f, "Malformed tilemap '{}': {reason}", path.display())
            }
            Self::Serialization { path, source } => {
                write!(f, "JSON error in '{}': {source}", path.display())
            }
            Self::EmptyTilemap { operation } => {
                write!(f, "Cannot {operation}: tilemap has no grid tiles")
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

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for level results
pub type Result<T> = std::result::Result<T, MapError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current generation attempt
    pub attempt: Option<usize>,
    /// File the operation was working on
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches errors with generation state and file information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the attempt number
    ///
    /// # Errors
    ///
    /// Propagates the original error with the attempt applied
    fn with_attempt(self, attempt: usize) -> Result<T>;

    /// Add the file path and operation
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<MapError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                MapError::MissingSpawnpoint { attempt, .. } => {
                    if let Some(current) = context.attempt {
                        *attempt = current;
                    }
                }
                MapError::Serialization { path, .. } | MapError::MalformedTilemap { path, .. } => {
                    if let Some(ref new_path) = context.path {
                        path.clone_from(new_path);
                    }
                }
                MapError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(ref new_path) = context.path {
                        path.clone_from(new_path);
                    }
                    if let Some(new_operation) = context.operation {
                        *operation = new_operation;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_attempt(self, attempt: usize) -> Result<T> {
        self.with_context(ErrorContext {
            attempt: Some(attempt),
            ..Default::default()
        })
    }

    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.into()),
            operation: Some(operation),
            ..Default::default()
        })
    }
}

impl From<std::io::Error> for MapError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MapError {
    MapError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

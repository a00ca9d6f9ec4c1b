//! Error types for ninepatch-render

use crate::layer::LayerId;
use ninepatch_io::IoError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rendering or exporting a 9-patch
#[derive(Debug, Error)]
pub enum RenderError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ninepatch_core::Error),

    /// Resampling error
    #[error("transform error: {0}")]
    Transform(#[from] ninepatch_transform::TransformError),

    /// Image I/O error outside of a density target
    #[error("image I/O error: {0}")]
    Io(#[from] IoError),

    /// A line-activity set or canvas does not match the geometry it is
    /// paired with
    #[error("geometry mismatch for {what}: expected {expected}, got {actual}")]
    Geometry {
        what: &'static str,
        expected: u32,
        actual: u32,
    },

    /// Density target with an unusable scale factor or resolution
    #[error("invalid density target: {0}")]
    InvalidDensity(String),

    /// Output directory could not be created
    #[error("failed to create directory '{}': {source}", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Output file could not be written
    #[error("failed to write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: IoError },

    /// A layer handle does not belong to the image
    #[error("layer {0} not found")]
    LayerNotFound(LayerId),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

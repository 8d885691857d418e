//! Error types for terrain configuration, config loading, export and presentation.

use thiserror::Error;

/// Invalid generation or rendering parameters, reported before any work starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TerrainError {
    #[error("grid size {size} is invalid: size - 1 must be a power of two and size at least 3")]
    InvalidSize { size: usize },
    #[error("roughness {roughness} is outside (0, 1]")]
    InvalidRoughness { roughness: f64 },
    #[error("viewport {width}x{height} must be non-empty")]
    InvalidViewport { width: usize, height: usize },
    #[error("water alpha band {min}..={max} is empty")]
    InvalidWaterAlpha { min: u8, max: u8 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] TerrainError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("pixel buffer of {len} bytes does not fit {width}x{height}")]
    BufferSize { width: u32, height: u32, len: usize },
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),
    #[error(transparent)]
    Terrain(#[from] TerrainError),
}

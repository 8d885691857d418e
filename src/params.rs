//! Generation and rendering parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TerrainError};

/// Parameters for height field generation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Grid dimension N; N - 1 must be a power of two
    pub size: usize,
    /// Random offset scale per subdivision level, in (0, 1]
    pub roughness: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            size: 513,
            roughness: 0.3,
        }
    }
}

impl TerrainParams {
    pub fn new(size: usize, roughness: f64) -> Self {
        Self { size, roughness }
    }

    /// Check the size and roughness before generation begins.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !is_valid_size(self.size) {
            return Err(TerrainError::InvalidSize { size: self.size });
        }
        if !(self.roughness.is_finite() && self.roughness > 0.0 && self.roughness <= 1.0) {
            return Err(TerrainError::InvalidRoughness {
                roughness: self.roughness,
            });
        }
        Ok(())
    }
}

/// True when `size` has the form 2^k + 1 with k >= 1.
pub fn is_valid_size(size: usize) -> bool {
    size >= 3 && (size - 1).is_power_of_two()
}

/// Parameters for rasterizing a height field into a pixel buffer
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Viewport width in pixels
    pub width: usize,
    /// Viewport height in pixels
    pub height: usize,
    /// Base terrain color
    pub terrain_rgb: [u8; 3],
    /// Base water color
    pub water_rgb: [u8; 3],
    /// Alpha used for cells on the last row or column
    pub border_alpha: u8,
    /// Inclusive lower bound of the water shimmer alpha
    pub water_alpha_min: u8,
    /// Inclusive upper bound of the water shimmer alpha
    pub water_alpha_max: u8,
    /// Water plane height as a fraction of the grid size
    pub water_level: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 800,
            terrain_rgb: [192, 154, 98],
            water_rgb: [50, 150, 200],
            border_alpha: 20,
            water_alpha_min: 145,
            water_alpha_max: 160,
            water_level: 0.05,
        }
    }
}

impl RenderParams {
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        if self.water_alpha_min > self.water_alpha_max {
            return Err(TerrainError::InvalidWaterAlpha {
                min: self.water_alpha_min,
                max: self.water_alpha_max,
            });
        }
        Ok(())
    }
}

/// Full configuration as read from a JSON file
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub terrain: TerrainParams,
    pub render: RenderParams,
}

impl Config {
    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), TerrainError> {
        self.terrain.validate()?;
        self.render.validate()
    }
}

//! Sandbox configuration, stored as JSON.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SandboxError};
use crate::geometry::DEFAULT_CURVE_OFFSET;
use crate::grid::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
use crate::image::{CannyParams, DEFAULT_BINARIZE_THRESHOLD};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Side length of the drawing grid
    pub grid_size: usize,
    /// Vertical lift of the synthesized curve control point
    pub curve_offset: i32,
    pub binarize_threshold: u8,
    pub canny: CannyParams,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            curve_offset: DEFAULT_CURVE_OFFSET,
            binarize_threshold: DEFAULT_BINARIZE_THRESHOLD,
            canny: CannyParams::default(),
        }
    }
}

impl SandboxConfig {
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(SandboxError::Config("grid_size must be at least 1".into()));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(SandboxError::Config(format!(
                "grid_size {} exceeds the maximum of {}",
                self.grid_size, MAX_GRID_SIZE
            )));
        }
        let CannyParams {
            low_ratio,
            high_ratio,
            ..
        } = self.canny;
        if !(0.0..=1.0).contains(&low_ratio) || !(0.0..=1.0).contains(&high_ratio) {
            return Err(SandboxError::Config(format!(
                "canny ratios must lie in [0, 1], got low {} high {}",
                low_ratio, high_ratio
            )));
        }
        if low_ratio > high_ratio {
            return Err(SandboxError::Config(format!(
                "canny low_ratio {} exceeds high_ratio {}",
                low_ratio, high_ratio
            )));
        }
        Ok(())
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

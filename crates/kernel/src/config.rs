use std::path::Path;

use gridwave_common::{ManipulationMode, ViewConfig};
use serde::{Deserialize, Serialize};

use crate::controller::DEFAULT_SCALE;
use crate::error::GridError;

/// Construction-time settings for a [`GridAnimator`](crate::GridAnimator).
///
/// Every field has a default, so a YAML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of instanced cells (`N`).
    pub cell_count: usize,
    /// Uniform scale applied to the whole grid at start.
    pub initial_scale: f32,
    pub initial_mode: ManipulationMode,
    pub view: ViewConfig,
    /// Initial output size used for the first projection.
    pub output_width: u32,
    pub output_height: u32,
    /// Spread the per-cell loop across the rayon pool.
    pub parallel: bool,
    /// Grids smaller than this run sequentially even when `parallel` is set.
    pub parallel_threshold: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_count: 400,
            initial_scale: DEFAULT_SCALE,
            initial_mode: ManipulationMode::Flat,
            view: ViewConfig::default(),
            output_width: 1280,
            output_height: 720,
            parallel: true,
            parallel_threshold: 1024,
        }
    }
}

impl GridConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GridError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let path = path.as_ref();
        tracing::info!(?path, "loading grid config");
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        gridwave_common::GridDims::new(self.cell_count)?;
        if !(self.initial_scale > 0.0 && self.initial_scale.is_finite()) {
            return Err(GridError::NonPositiveScale(self.initial_scale));
        }
        Ok(())
    }
}

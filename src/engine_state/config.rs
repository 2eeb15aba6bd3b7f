//! # Engine Configuration
//!
//! Tunable parameters for world generation, frustum extraction and the headless frame
//! loop, loaded from an optional JSON file.
//!
//! Every field has a default, so a config file only needs the keys it overrides:
//!
//! ```json
//! { "generation_radius": 4, "cull_near_far": true }
//! ```

use std::{fs::File, io::BufReader, path::Path};

use log::{info, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use super::camera_state::frustum::{FrustumSettings, DEFAULT_FAR_DISTANCE, DEFAULT_NEAR_DISTANCE};
use super::voxels::chunk::VoxelColoring;
use super::voxels::terrain::{DEFAULT_NOISE_SCALE, DEFAULT_TERRAIN_AMPLITUDE};

/// Environment variable holding the path of the JSON config file.
pub const CONFIG_PATH_ENV: &str = "VOXEL_FRUSTUM_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Reads and deserializes a JSON file.
pub fn load_config<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

/// All engine settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Half width, in chunks, of the square neighbourhood generated at startup
    pub generation_radius: u32,
    /// Multiplier from world voxel coordinates to noise space
    pub noise_scale: f64,
    /// Maximum surface deviation from mid height, in voxels
    pub terrain_amplitude: f64,
    pub near_distance: f32,
    pub far_distance: f32,
    /// Also cull against the near and far planes
    pub cull_near_far: bool,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Number of frames the headless driver runs before exiting
    pub frames: u32,
    pub voxel_coloring: VoxelColoring,
    /// Seed for chunk debug colours; random when absent
    pub color_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            generation_radius: 2,
            noise_scale: DEFAULT_NOISE_SCALE,
            terrain_amplitude: DEFAULT_TERRAIN_AMPLITUDE,
            near_distance: DEFAULT_NEAR_DISTANCE,
            far_distance: DEFAULT_FAR_DISTANCE,
            cull_near_far: false,
            fov_y_degrees: 45.0,
            viewport_width: 800,
            viewport_height: 600,
            frames: 3,
            voxel_coloring: VoxelColoring::ChunkDebug,
            color_seed: None,
        }
    }
}

impl EngineConfig {
    /// Loads and validates a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: EngineConfig = load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config named by `VOXEL_FRUSTUM_CONFIG`.
    ///
    /// Falls back to the defaults when the variable is unset or the file is unusable.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_PATH_ENV) else {
            info!("{} not set, using default config", CONFIG_PATH_ENV);
            return EngineConfig::default();
        };

        match EngineConfig::load(&path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(err) => {
                warn!("Failed to load config from {:?}: {}; using defaults", path, err);
                EngineConfig::default()
            }
        }
    }

    /// Rejects settings that would produce a degenerate frustum or viewport.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.near_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "near_distance must be positive, got {}",
                self.near_distance
            )));
        }
        if !(self.far_distance > self.near_distance) {
            return Err(ConfigError::Invalid(format!(
                "far_distance {} must exceed near_distance {}",
                self.far_distance, self.near_distance
            )));
        }
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_y_degrees must be in (0, 180), got {}",
                self.fov_y_degrees
            )));
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if !self.noise_scale.is_finite() || !self.terrain_amplitude.is_finite() {
            return Err(ConfigError::Invalid(
                "noise_scale and terrain_amplitude must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn frustum_settings(&self) -> FrustumSettings {
        FrustumSettings {
            near_distance: self.near_distance,
            far_distance: self.far_distance,
            cull_near_far: self.cull_near_far,
        }
    }
}

//! Sandbox Configuration
//!
//! Centralized tuning for the sphere, the camera and the player actions.
//! Every section falls back to its defaults, so a config file only needs
//! the values it changes:
//!
//! ```json
//! { "sphere": { "gravity": -9.81 }, "camera": { "max_pitch": 1.5 } }
//! ```

use std::path::Path;

use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::CameraConfig;
use crate::input::MovementConfig;
use crate::physics::{PhysicsError, SphereConfig};

/// Where and how big the player sphere starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub position: Vec3,
    pub radius: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(3.5, 10.5, 0.5),
            radius: 1.0,
        }
    }
}

/// All tuning for one sandbox run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub spawn: SpawnConfig,
    pub sphere: SphereConfig,
    pub camera: CameraConfig,
    pub movement: MovementConfig,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid JSON for this schema
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Values parsed but are physically unusable
    #[error("invalid configuration: {0}")]
    Invalid(#[from] PhysicsError),
}

impl SandboxConfig {
    /// Check every section for values the core would reject.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.spawn.radius.is_finite() && self.spawn.radius > 0.0) {
            return Err(PhysicsError::InvalidRadius(self.spawn.radius));
        }
        if !self.spawn.position.is_finite() {
            return Err(PhysicsError::NonFinite("spawn position"));
        }
        self.sphere.validate()?;

        let camera = &self.camera;
        let camera_finite = camera.rotation_speed.is_finite()
            && camera.eye_height.is_finite()
            && camera.fovy.is_finite()
            && camera.max_pitch.is_none_or(f32::is_finite);
        if !camera_finite {
            return Err(PhysicsError::NonFinite("camera config"));
        }

        let movement = &self.movement;
        if !(movement.ground_speed.is_finite()
            && movement.jump_force.is_finite()
            && movement.swoosh_speed.is_finite())
        {
            return Err(PhysicsError::NonFinite("movement config"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        info!("loaded sandbox config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

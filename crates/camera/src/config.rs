use std::path::Path;

use glam::Vec3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraError, MAX_FIELD_OF_VIEW, MIN_FIELD_OF_VIEW};

/// Errors from loading or saving configuration files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Initial camera state. Missing fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Horizontal look angle in degrees.
    pub yaw: f32,
    /// Vertical look angle in degrees; positive looks down.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub field_of_view: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Viewport width divided by height.
    pub aspect_ratio: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 4.0),
            yaw: 0.0,
            pitch: 0.0,
            field_of_view: 50.0,
            near_plane: 0.1,
            far_plane: 10.0,
            aspect_ratio: 640.0 / 480.0,
        }
    }
}

impl CameraConfig {
    /// Check the projection parameters and reject non-finite values.
    pub fn validate(&self) -> Result<(), CameraError> {
        let invalid = |msg: String| Err(CameraError::InvalidConfig(msg));

        if !self.position.is_finite() {
            return invalid(format!("position {:?} is not finite", self.position));
        }
        if !self.yaw.is_finite() || !self.pitch.is_finite() {
            return invalid(format!(
                "orientation yaw={} pitch={} is not finite",
                self.yaw, self.pitch
            ));
        }
        if !(MIN_FIELD_OF_VIEW..=MAX_FIELD_OF_VIEW).contains(&self.field_of_view) {
            return invalid(format!(
                "field_of_view {} must be inside [{}, {}] degrees",
                self.field_of_view, MIN_FIELD_OF_VIEW, MAX_FIELD_OF_VIEW
            ));
        }
        if !(self.near_plane > 0.0 && self.near_plane.is_finite()) {
            return invalid(format!("near_plane {} must be positive", self.near_plane));
        }
        if !(self.far_plane > self.near_plane && self.far_plane.is_finite()) {
            return invalid(format!(
                "far_plane {} must be greater than near_plane {}",
                self.far_plane, self.near_plane
            ));
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return invalid(format!(
                "aspect_ratio {} must be positive",
                self.aspect_ratio
            ));
        }
        Ok(())
    }

    /// Load and validate a camera configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        save_json(self, path)
    }
}

/// Read any serde type from a JSON file.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let value = serde_json::from_reader(std::io::BufReader::new(file))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(value)
}

/// Write any serde type to a JSON file, pretty-printed.
pub fn save_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

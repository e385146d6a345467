use std::path::Path;

use cratecam_camera::CameraConfig;
use cratecam_camera::config::{ConfigError, load_json, save_json};
use serde::{Deserialize, Serialize};

/// Input sensitivities and frame pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// Camera speed in world units per second.
    pub move_speed: f32,
    /// Mouse pixels per degree of rotation.
    pub mouse_sensitivity: f32,
    /// Degrees of field of view per scroll line.
    pub fov_sensitivity: f32,
    /// Rotation speed of the crate.
    pub spin_degrees_per_second: f32,
    /// Longest frame delta applied in one update, in seconds.
    pub max_frame_delta: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            mouse_sensitivity: 20.0,
            fov_sensitivity: 1.2,
            spin_degrees_per_second: 180.0,
            max_frame_delta: 0.1,
        }
    }
}

impl Controls {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("move_speed", self.move_speed),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("max_frame_delta", self.max_frame_delta),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("fov_sensitivity", self.fov_sensitivity),
            ("spin_degrees_per_second", self.spin_degrees_per_second),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Window settings for the desktop viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Wooden Crate".into(),
            width: 640,
            height: 480,
        }
    }
}

/// Everything needed to start a viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub controls: Controls,
    pub window: WindowConfig,
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        self.controls.validate()?;
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be non-zero",
                self.window.width, self.window.height
            )));
        }
        Ok(())
    }

    /// Load and validate a viewer configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        save_json(self, path)
    }

    /// Load from `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

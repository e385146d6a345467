//! First-person camera: yaw/pitch orientation, camera-local movement, view-projection.
//!
//! # Invariants
//! - `yaw` is in `[0, 360)` and `pitch` in `[-85, 85]` after every mutation.
//! - Orientation is pitch about X, then yaw about Y; the camera looks down -Z.
//! - Movement maps a camera-local axis to world space through the inverse orientation.

mod camera;
pub mod config;

pub use camera::{
    Camera, CameraError, Direction, MAX_FIELD_OF_VIEW, MAX_PITCH, MIN_FIELD_OF_VIEW,
};
pub use config::{CameraConfig, ConfigError};

pub fn crate_info() -> &'static str {
    "cratecam-camera v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("camera"));
    }
}

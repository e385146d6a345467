use cratecam_camera::{Camera, Direction};
use cratecam_camera::config::ConfigError;
use glam::Mat4;

use crate::action::Action;
use crate::config::{Controls, ViewerConfig};

/// Per-frame application context: the camera plus everything the input
/// handlers mutate between frames.
///
/// Owned by a single frame loop. Actions are applied as events arrive and
/// `update` advances state once per frame.
#[derive(Debug, Clone)]
pub struct Viewer {
    camera: Camera,
    controls: Controls,
    /// Held movement keys, most recent last. Only the last one moves the camera.
    held: Vec<Direction>,
    running: bool,
    spinning: bool,
    spin_degrees: f32,
}

impl Viewer {
    pub fn new(config: &ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            camera: Camera::new(&config.camera)?,
            controls: config.controls.clone(),
            held: Vec::new(),
            running: true,
            spinning: true,
            spin_degrees: 0.0,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Current crate rotation about Y, in `[0, 360)` degrees.
    pub fn spin_degrees(&self) -> f32 {
        self.spin_degrees
    }

    /// The direction the next `update` will move in, if any.
    pub fn active_direction(&self) -> Option<Direction> {
        self.held.last().copied()
    }

    /// Apply one input action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Move(direction) => {
                self.held.retain(|d| *d != direction);
                self.held.push(direction);
            }
            Action::Look { dx, dy } => {
                let sensitivity = self.controls.mouse_sensitivity;
                self.camera.offset_orientation(dx / sensitivity, dy / sensitivity);
            }
            Action::Zoom(lines) => {
                self.camera
                    .offset_field_of_view(-lines * self.controls.fov_sensitivity);
            }
            Action::ToggleSpin => {
                self.spinning = !self.spinning;
                tracing::debug!(spinning = self.spinning, "toggled crate spin");
            }
            Action::Quit => {
                tracing::info!("quit requested");
                self.running = false;
            }
            Action::Noop => {}
        }
    }

    /// Stop moving along `direction`.
    pub fn release(&mut self, direction: Direction) {
        self.held.retain(|d| *d != direction);
    }

    /// Stop all movement, e.g. when the window loses focus and key releases
    /// may never arrive.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            tracing::debug!(held = self.held.len(), "releasing all movement keys");
            self.held.clear();
        }
    }

    /// Advance one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(self.controls.max_frame_delta);

        if self.spinning {
            let advanced = self.spin_degrees + dt * self.controls.spin_degrees_per_second;
            self.spin_degrees = advanced.rem_euclid(360.0);
            if self.spin_degrees >= 360.0 {
                self.spin_degrees = 0.0;
            }
        }

        if let Some(direction) = self.active_direction() {
            self.camera.move_by(direction, dt * self.controls.move_speed);
            tracing::trace!(%direction, position = ?self.camera.position, "camera moved");
        }
    }

    /// Model matrix of the spinning crate.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.spin_degrees.to_radians())
    }

    pub fn view_projection(&self) -> Mat4 {
        self.camera.view_projection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn viewer() -> Viewer {
        Viewer::new(&ViewerConfig::default()).unwrap()
    }

    #[test]
    fn look_is_scaled_by_sensitivity() {
        let mut v = viewer();
        v.apply(Action::Look { dx: 40.0, dy: 20.0 });
        assert!(approx_eq(v.camera().yaw(), 2.0));
        assert!(approx_eq(v.camera().pitch(), 1.0));
    }

    #[test]
    fn scrolling_up_zooms_in() {
        let mut v = viewer();
        v.apply(Action::Zoom(1.0));
        assert!(approx_eq(v.camera().field_of_view(), 48.8));
        v.apply(Action::Zoom(-2.0));
        assert!(approx_eq(v.camera().field_of_view(), 51.2));
    }

    #[test]
    fn held_key_moves_every_frame() {
        let mut v = viewer();
        v.apply(Action::Move(Direction::Forward));
        v.update(0.1);
        assert!(approx_eq(v.camera().position.z, 3.5));
        v.update(0.1);
        assert!(approx_eq(v.camera().position.z, 3.0));

        v.release(Direction::Forward);
        v.update(0.1);
        assert!(approx_eq(v.camera().position.z, 3.0));
        assert_eq!(v.active_direction(), None);
    }

    #[test]
    fn most_recent_key_wins() {
        let mut v = viewer();
        v.apply(Action::Move(Direction::Forward));
        v.apply(Action::Move(Direction::Left));
        assert_eq!(v.active_direction(), Some(Direction::Left));

        v.update(0.1);
        assert!(approx_eq(v.camera().position.x, -0.5));
        assert!(approx_eq(v.camera().position.z, 4.0));

        v.release(Direction::Left);
        assert_eq!(v.active_direction(), Some(Direction::Forward));
    }

    #[test]
    fn repeated_press_needs_one_release() {
        let mut v = viewer();
        v.apply(Action::Move(Direction::Up));
        v.apply(Action::Move(Direction::Up));
        v.release(Direction::Up);
        assert_eq!(v.active_direction(), None);
    }

    #[test]
    fn release_all_stops_movement() {
        let mut v = viewer();
        v.apply(Action::Move(Direction::Forward));
        v.apply(Action::Move(Direction::Up));
        v.release_all();
        assert_eq!(v.active_direction(), None);

        v.update(0.1);
        assert_eq!(v.camera().position, Vec3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut v = viewer();
        v.apply(Action::Move(Direction::Backward));
        v.update(5.0);
        assert!(approx_eq(v.camera().position.z, 4.5));
    }

    #[test]
    fn invalid_frame_delta_is_ignored() {
        let mut v = viewer();
        v.apply(Action::Move(Direction::Right));
        v.update(f32::NAN);
        v.update(-1.0);
        assert_eq!(v.camera().position, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(v.spin_degrees(), 0.0);
    }

    #[test]
    fn spin_wraps_and_toggles() {
        let mut v = viewer();
        for _ in 0..25 {
            v.update(0.1);
        }
        assert!((v.spin_degrees() - 90.0).abs() < 1e-2);

        v.apply(Action::ToggleSpin);
        assert!(!v.is_spinning());
        let frozen = v.spin_degrees();
        v.update(0.1);
        assert_eq!(v.spin_degrees(), frozen);
    }

    #[test]
    fn quit_stops_running() {
        let mut v = viewer();
        assert!(v.is_running());
        v.apply(Action::Noop);
        assert!(v.is_running());
        v.apply(Action::Quit);
        assert!(!v.is_running());
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = ViewerConfig::default();
        config.controls.move_speed = -1.0;
        assert!(Viewer::new(&config).is_err());
    }

    #[test]
    fn keeps_configured_controls() {
        let mut config = ViewerConfig::default();
        config.controls.move_speed = 2.0;
        let mut v = Viewer::new(&config).unwrap();
        assert_eq!(v.controls(), &config.controls);

        v.apply(Action::Move(Direction::Forward));
        v.update(0.1);
        assert!(approx_eq(v.camera().position.z, 4.0 - 0.1 * v.controls().move_speed));
    }

    #[test]
    fn view_projection_matches_camera() {
        let mut v = viewer();
        v.apply(Action::Look { dx: 100.0, dy: -60.0 });
        assert_eq!(v.view_projection(), v.camera().view_projection());
    }
}

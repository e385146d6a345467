use std::fmt;
use std::str::FromStr;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;

/// Pitch is clamped to this many degrees either side of the horizon.
pub const MAX_PITCH: f32 = 85.0;
/// Lower bound applied to the field of view by the zoom setters, in degrees.
pub const MIN_FIELD_OF_VIEW: f32 = 1.0;
/// Upper bound applied to the field of view by the zoom setters, in degrees.
pub const MAX_FIELD_OF_VIEW: f32 = 179.0;

/// Errors from camera construction and targeting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("invalid camera configuration: {0}")]
    InvalidConfig(String),
    #[error("look-at target coincides with the camera position")]
    DegenerateTarget,
    #[error("unknown direction: {0:?}")]
    UnknownDirection(String),
}

/// Camera-local movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Forward,
    Backward,
}

/// Unit vectors in camera space, indexed by `Direction` discriminant.
/// The camera looks down -Z, so `Forward` is negative.
const LOCAL_AXES: [Vec3; 6] = [
    Vec3::NEG_X, // Left
    Vec3::X,     // Right
    Vec3::Y,     // Up
    Vec3::NEG_Y, // Down
    Vec3::NEG_Z, // Forward
    Vec3::Z,     // Backward
];

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
        Direction::Forward,
        Direction::Backward,
    ];

    /// Unit vector for this direction in camera space.
    pub fn local_axis(self) -> Vec3 {
        LOCAL_AXES[self as usize]
    }

    /// The other member of this direction's pair.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

impl FromStr for Direction {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CameraError::UnknownDirection(s.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First-person camera with position, yaw, pitch, and projection parameters.
///
/// Angles are stored in degrees. Every mutation keeps `yaw` in `[0, 360)` and
/// `pitch` in `[-MAX_PITCH, MAX_PITCH]`; positive pitch looks down.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    field_of_view: f32,
    near_plane: f32,
    far_plane: f32,
    aspect_ratio: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    /// Build a camera from a validated configuration.
    pub fn new(config: &CameraConfig) -> Result<Self, CameraError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self {
            position: config.position,
            yaw: config.yaw,
            pitch: config.pitch,
            field_of_view: config.field_of_view,
            near_plane: config.near_plane,
            far_plane: config.far_plane,
            aspect_ratio: config.aspect_ratio,
        };
        camera.normalize_angles();
        camera
    }

    /// Snapshot of the current state as a configuration.
    pub fn to_config(&self) -> CameraConfig {
        CameraConfig {
            position: self.position,
            yaw: self.yaw,
            pitch: self.pitch,
            field_of_view: self.field_of_view,
            near_plane: self.near_plane,
            far_plane: self.far_plane,
            aspect_ratio: self.aspect_ratio,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    pub fn near_plane(&self) -> f32 {
        self.near_plane
    }

    pub fn far_plane(&self) -> f32 {
        self.far_plane
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Rotation-only matrix: pitch about X, then yaw about Y.
    pub fn orientation(&self) -> Mat4 {
        Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_rotation_y(self.yaw.to_radians())
    }

    /// Replace both angles, then normalize.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        if !yaw.is_finite() || !pitch.is_finite() {
            tracing::warn!(yaw, pitch, "ignoring non-finite orientation");
            return;
        }
        self.yaw = yaw;
        self.pitch = pitch;
        self.normalize_angles();
    }

    /// Add to both angles, then normalize.
    pub fn offset_orientation(&mut self, delta_yaw: f32, delta_pitch: f32) {
        if !delta_yaw.is_finite() || !delta_pitch.is_finite() {
            tracing::warn!(
                delta_yaw,
                delta_pitch,
                "ignoring non-finite orientation offset"
            );
            return;
        }
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;
        self.normalize_angles();
    }

    /// Aim the camera at `target`.
    ///
    /// Pitch is still clamped, so a target almost straight above or below is
    /// only approached. Fails without touching the camera when `target` is
    /// the camera position.
    pub fn look_at(&mut self, target: Vec3) -> Result<(), CameraError> {
        let direction = (target - self.position)
            .try_normalize()
            .ok_or(CameraError::DegenerateTarget)?;

        self.pitch = (-direction.y).clamp(-1.0, 1.0).asin().to_degrees();
        self.yaw = -(-direction.x).atan2(-direction.z).to_degrees();
        self.normalize_angles();
        Ok(())
    }

    /// Move `distance` units along a camera-local direction.
    pub fn move_by(&mut self, direction: Direction, distance: f32) {
        if !distance.is_finite() {
            tracing::warn!(%direction, distance, "ignoring non-finite move distance");
            return;
        }
        self.position += self.local_to_world(direction.local_axis()) * distance;
    }

    /// Map a camera-space vector into world space through the inverse orientation.
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        self.orientation().inverse().transform_vector3(local)
    }

    pub fn forward(&self) -> Vec3 {
        self.local_to_world(Direction::Forward.local_axis())
    }

    pub fn right(&self) -> Vec3 {
        self.local_to_world(Direction::Right.local_axis())
    }

    pub fn up(&self) -> Vec3 {
        self.local_to_world(Direction::Up.local_axis())
    }

    /// Set the field of view in degrees, clamped to
    /// `[MIN_FIELD_OF_VIEW, MAX_FIELD_OF_VIEW]`.
    pub fn set_field_of_view(&mut self, degrees: f32) {
        if !degrees.is_finite() {
            tracing::warn!(degrees, "ignoring non-finite field of view");
            return;
        }
        self.field_of_view = degrees.clamp(MIN_FIELD_OF_VIEW, MAX_FIELD_OF_VIEW);
    }

    pub fn offset_field_of_view(&mut self, delta: f32) {
        self.set_field_of_view(self.field_of_view + delta);
    }

    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if !aspect.is_finite() || aspect <= 0.0 {
            tracing::warn!(aspect, "ignoring invalid aspect ratio");
            return;
        }
        self.aspect_ratio = aspect;
    }

    /// Update the aspect ratio from a viewport size in pixels.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.set_aspect_ratio(width as f32 / height.max(1) as f32);
    }

    pub fn view(&self) -> Mat4 {
        self.orientation() * Mat4::from_translation(-self.position)
    }

    /// Right-handed perspective projection with a `[0, 1]` depth range.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.field_of_view.to_radians(),
            self.aspect_ratio,
            self.near_plane,
            self.far_plane,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    fn normalize_angles(&mut self) {
        self.yaw = self.yaw.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to exactly 360
        if self.yaw >= 360.0 {
            self.yaw = 0.0;
        }
        self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pos=({:.3}, {:.3}, {:.3}) yaw={:.2} pitch={:.2} fov={:.1}",
            self.position.x,
            self.position.y,
            self.position.z,
            self.yaw,
            self.pitch,
            self.field_of_view
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(cam.yaw(), 0.0);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.field_of_view(), 50.0);
        assert_eq!(cam.near_plane(), 0.1);
        assert_eq!(cam.far_plane(), 10.0);
        assert!(approx_eq(cam.aspect_ratio(), 640.0 / 480.0));
        assert!(!cam.view_projection().is_nan());
    }

    #[test]
    fn yaw_stays_in_range() {
        let mut cam = Camera::default();
        for delta in [370.0, -15.0, 720.5, -1000.0, 359.999, -0.0001, 1e6, 45.0] {
            cam.offset_orientation(delta, 0.0);
            assert!(
                (0.0..360.0).contains(&cam.yaw()),
                "yaw {} out of range after offset {delta}",
                cam.yaw()
            );
        }
    }

    #[test]
    fn yaw_wraps_past_full_turn() {
        let mut cam = Camera::default();
        cam.offset_orientation(370.0, 0.0);
        assert!(approx_eq(cam.yaw(), 10.0));

        cam.offset_orientation(-20.0, 0.0);
        assert!(approx_eq(cam.yaw(), 350.0));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera::default();
        cam.offset_orientation(0.0, 200.0);
        assert_eq!(cam.pitch(), MAX_PITCH);

        cam.offset_orientation(0.0, -1000.0);
        assert_eq!(cam.pitch(), -MAX_PITCH);

        cam.set_orientation(0.0, 30.0);
        assert_eq!(cam.pitch(), 30.0);
    }

    #[test]
    fn non_finite_offsets_are_ignored() {
        let mut cam = Camera::default();
        cam.set_orientation(12.0, 3.0);
        let before = cam.clone();

        cam.offset_orientation(f32::NAN, 0.0);
        cam.offset_orientation(0.0, f32::INFINITY);
        cam.move_by(Direction::Forward, f32::NAN);
        cam.set_field_of_view(f32::NAN);

        assert_eq!(cam, before);
    }

    #[test]
    fn orientation_has_no_translation() {
        let mut cam = Camera::default();
        cam.position = Vec3::new(5.0, -2.0, 7.0);
        cam.set_orientation(33.0, -12.0);
        let m = cam.orientation();
        assert!(approx_eq_vec3(m.w_axis.truncate(), Vec3::ZERO));
        assert!(approx_eq(m.w_axis.w, 1.0));
    }

    #[test]
    fn orientation_applies_pitch_then_yaw() {
        let mut cam = Camera::default();
        cam.set_orientation(90.0, 30.0);
        let expected = Mat4::from_rotation_x(30f32.to_radians())
            * Mat4::from_rotation_y(90f32.to_radians());
        assert!(cam.orientation().abs_diff_eq(expected, EPS));

        let swapped = Mat4::from_rotation_y(90f32.to_radians())
            * Mat4::from_rotation_x(30f32.to_radians());
        assert!(!cam.orientation().abs_diff_eq(swapped, EPS));
    }

    #[test]
    fn move_forward_from_start() {
        let mut cam = Camera::default();
        cam.move_by(Direction::Forward, 1.0);
        assert!(approx_eq_vec3(cam.position, Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn movement_follows_yaw() {
        let mut cam = Camera::default();
        cam.set_orientation(90.0, 0.0);

        assert!(approx_eq_vec3(cam.forward(), Vec3::X));
        assert!(approx_eq_vec3(cam.right(), Vec3::Z));
        assert!(approx_eq_vec3(cam.up(), Vec3::Y));

        cam.move_by(Direction::Forward, 1.0);
        assert!(approx_eq_vec3(cam.position, Vec3::new(1.0, 0.0, 4.0)));
    }

    #[test]
    fn positive_pitch_looks_down() {
        let mut cam = Camera::default();
        cam.set_orientation(0.0, 45.0);
        assert!(cam.forward().y < 0.0);
        cam.move_by(Direction::Forward, 1.0);
        assert!(cam.position.y < 0.0);
    }

    #[test]
    fn forward_then_backward_returns() {
        for (yaw, pitch) in [(0.0, 0.0), (37.0, -20.0), (250.0, 80.0)] {
            let mut cam = Camera::default();
            cam.set_orientation(yaw, pitch);
            let start = cam.position;
            cam.move_by(Direction::Forward, 2.5);
            cam.move_by(Direction::Backward, 2.5);
            assert!(approx_eq_vec3(cam.position, start));
        }
    }

    #[test]
    fn move_distances_compose() {
        let mut split = Camera::default();
        split.set_orientation(123.0, 17.0);
        let mut once = split.clone();

        split.move_by(Direction::Right, 1.25);
        split.move_by(Direction::Right, 0.75);
        once.move_by(Direction::Right, 2.0);

        assert!(approx_eq_vec3(split.position, once.position));
        assert!(split.view_projection().abs_diff_eq(once.view_projection(), EPS));
    }

    #[test]
    fn look_at_points_forward_axis_at_target() {
        let targets = [
            Vec3::new(3.0, 1.0, -2.0),
            Vec3::new(-5.0, 0.5, 4.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(1.0, -2.0, 0.0),
        ];
        for target in targets {
            let mut cam = Camera::default();
            cam.position = Vec3::new(0.5, 0.0, 1.0);
            cam.look_at(target).unwrap();

            let expected = (target - cam.position).normalize();
            assert!(
                approx_eq_vec3(cam.forward(), expected),
                "forward {:?} != {:?} for target {target:?}",
                cam.forward(),
                expected
            );
            assert!((0.0..360.0).contains(&cam.yaw()));
        }
    }

    #[test]
    fn look_at_straight_up_clamps_pitch() {
        let mut cam = Camera::default();
        let target = cam.position + Vec3::new(0.0, 10.0, 0.0);
        cam.look_at(target).unwrap();
        assert_eq!(cam.pitch(), -MAX_PITCH);
    }

    #[test]
    fn look_at_own_position_fails() {
        let mut cam = Camera::default();
        cam.set_orientation(40.0, 10.0);
        let before = cam.clone();
        assert_eq!(cam.look_at(cam.position), Err(CameraError::DegenerateTarget));
        assert_eq!(cam, before);
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let mut cam = Camera::default();
        cam.position = Vec3::new(2.0, 3.0, -1.0);
        cam.set_orientation(200.0, -30.0);

        let view = cam.view();
        assert!(approx_eq_vec3(view.transform_point3(cam.position), Vec3::ZERO));

        let ahead = cam.position + cam.forward() * 3.0;
        assert!(approx_eq_vec3(
            view.transform_point3(ahead),
            Vec3::new(0.0, 0.0, -3.0)
        ));
    }

    #[test]
    fn point_ahead_projects_to_screen_center() {
        let mut cam = Camera::default();
        cam.set_orientation(75.0, 10.0);
        let ahead = cam.position + cam.forward() * 5.0;
        let ndc = cam.view_projection().project_point3(ahead);
        assert!(approx_eq(ndc.x, 0.0));
        assert!(approx_eq(ndc.y, 0.0));
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn view_projection_is_projection_times_view() {
        let mut cam = Camera::default();
        cam.set_orientation(10.0, 5.0);
        let expected = cam.projection() * cam.view();
        assert!(cam.view_projection().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn field_of_view_is_clamped() {
        let mut cam = Camera::default();
        cam.offset_field_of_view(-1.2);
        assert!(approx_eq(cam.field_of_view(), 48.8));

        cam.offset_field_of_view(500.0);
        assert_eq!(cam.field_of_view(), MAX_FIELD_OF_VIEW);

        cam.set_field_of_view(-5.0);
        assert_eq!(cam.field_of_view(), MIN_FIELD_OF_VIEW);
    }

    #[test]
    fn viewport_updates_aspect() {
        let mut cam = Camera::default();
        cam.set_viewport(1920, 1080);
        assert!(approx_eq(cam.aspect_ratio(), 16.0 / 9.0));

        cam.set_viewport(0, 600);
        assert!(approx_eq(cam.aspect_ratio(), 16.0 / 9.0));

        cam.set_viewport(800, 0);
        assert!(approx_eq(cam.aspect_ratio(), 800.0));
    }

    #[test]
    fn direction_table() {
        assert_eq!(Direction::Forward.local_axis(), Vec3::NEG_Z);
        assert_eq!(Direction::Left.local_axis(), Vec3::NEG_X);
        assert_eq!(Direction::Down.local_axis(), Vec3::NEG_Y);
        for d in Direction::ALL {
            assert!(approx_eq(d.local_axis().length(), 1.0));
            assert_eq!(d.local_axis() + d.opposite().local_axis(), Vec3::ZERO);
        }
    }

    #[test]
    fn direction_parse() {
        assert_eq!("Forward".parse::<Direction>(), Ok(Direction::Forward));
        assert_eq!(" left ".parse::<Direction>(), Ok(Direction::Left));
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(CameraError::UnknownDirection(_))
        ));
        for d in Direction::ALL {
            assert_eq!(d.to_string().parse::<Direction>(), Ok(d));
        }
    }

    #[test]
    fn display_reports_state() {
        let cam = Camera::default();
        let text = cam.to_string();
        assert!(text.contains("pos=(0.000, 0.000, 4.000)"));
        assert!(text.contains("fov=50.0"));
    }
}

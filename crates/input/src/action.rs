use cratecam_camera::Direction;

/// A high-level action produced from raw window input.
///
/// The viewer consumes actions, never raw input events, so the desktop app
/// and the headless CLI drive the camera through the same path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Start moving along a camera-local direction.
    Move(Direction),
    /// Relative mouse motion in pixels.
    Look { dx: f32, dy: f32 },
    /// Scroll wheel motion in lines; positive scrolls up.
    Zoom(f32),
    /// Pause or resume the spinning crate.
    ToggleSpin,
    /// Leave the frame loop.
    Quit,
    /// No-op (used for keys that are not bound).
    Noop,
}

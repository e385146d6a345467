use cratecam_camera::Direction;
use winit::keyboard::KeyCode;

use crate::action::Action;

/// Map a physical key to the action it triggers when pressed.
pub fn action_for_key(key: KeyCode) -> Action {
    match key {
        KeyCode::KeyW => Action::Move(Direction::Forward),
        KeyCode::KeyS => Action::Move(Direction::Backward),
        KeyCode::KeyA => Action::Move(Direction::Left),
        KeyCode::KeyD => Action::Move(Direction::Right),
        KeyCode::KeyZ => Action::Move(Direction::Up),
        KeyCode::KeyX => Action::Move(Direction::Down),
        KeyCode::Space => Action::ToggleSpin,
        KeyCode::Escape => Action::Quit,
        _ => Action::Noop,
    }
}

/// Direction bound to a key, for stopping movement on release.
pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    match action_for_key(key) {
        Action::Move(direction) => Some(direction),
        _ => None,
    }
}

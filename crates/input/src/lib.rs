//! Input: window events mapped to camera actions, and the per-frame viewer state.
//!
//! # Invariants
//! - The desktop app and the headless CLI share the same action path.
//! - At most one movement direction is applied per frame.
//! - A `Viewer` is mutated from one frame loop only.

pub mod action;
pub mod bindings;
pub mod config;
mod viewer;

pub use action::Action;
pub use bindings::{action_for_key, direction_for_key};
pub use config::{Controls, ViewerConfig, WindowConfig};
pub use viewer::Viewer;

pub fn crate_info() -> &'static str {
    "cratecam-input v0.1.0"
}

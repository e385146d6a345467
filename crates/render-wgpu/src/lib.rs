//! wgpu render backend for the crate viewer.
//!
//! Draws a grid floor and a lit cube. The camera's view-projection and the
//! cube's model matrix arrive as plain matrices once per frame.
//!
//! # Invariants
//! - The renderer never mutates camera or viewer state.
//! - Exactly one uniform upload per frame, before any draw call.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;

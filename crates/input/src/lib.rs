//! Input handling that does not depend on the windowing backend.
//!
//! # Invariants
//! - Movement keys and mouse look only act in FPS mode.
//! - Picking only happens in GUI mode.
//! - The first mouse sample after entering FPS mode never rotates the camera.

pub mod action;
pub mod state;

pub use action::Action;
pub use state::{InputMode, InputState, MouseLook, MoveKey};

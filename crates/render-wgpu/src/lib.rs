//! wgpu render backend for the sandbox.
//!
//! Draws the frame's draw list with a single flat-color pipeline, one
//! instanced call per mesh kind. The fly camera also turns cursor positions
//! into world-space picking rays.
//!
//! # Invariants
//! - Renderer never mutates physics state.
//! - Camera motion is independent of the physics tick.

mod camera;
mod gpu;
mod shaders;

pub use camera::FlyCamera;
pub use gpu::WgpuRenderer;

//! Rendering Adapter: renderer-agnostic scene description.
//!
//! # Invariants
//! - Renderers never mutate the physics world.
//! - Draw lists derive only from physics state and scene config.
//! - The ground is always the first draw item.

mod mesh;
mod renderer;
mod scene;

pub use mesh::{MeshData, MeshError, cube_mesh, sphere_mesh};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use scene::{DrawItem, MeshKind, extract_draw_list, mvp};

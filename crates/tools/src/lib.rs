//! Developer Tooling: read-only views of the simulated scene.

mod inspector;

pub use inspector::{BodyInfo, SceneInspector, SceneSummary};

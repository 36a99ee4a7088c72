//! Shared types used by every sandbox crate.

pub mod types;

pub use types::{BodyId, Color, ShapeKind, Transform};

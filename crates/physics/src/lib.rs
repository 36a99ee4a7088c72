//! Physics: the rapier world behind the sandbox, plus scene configuration.
//!
//! # Invariants
//! - The ground is a static half-space at y = 0 and is never pickable.
//! - At most one pick constraint exists at a time.
//! - Every mutation is recorded in the event log.

pub mod config;
mod convert;
pub mod error;
pub mod world;

pub use config::SceneConfig;
pub use error::PhysicsError;
pub use world::{BodyState, PhysicsEvent, PhysicsWorld, RayHit};

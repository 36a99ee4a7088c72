use sandbox_common::{BodyId, ShapeKind};
use sandbox_physics::PhysicsWorld;
use serde::Serialize;

/// Scene inspector for developer tooling.
///
/// Provides read-only queries against the physics world for debugging and
/// the editor window.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary(world: &PhysicsWorld) -> SceneSummary {
        let bodies = world.bodies();
        let boxes = bodies.iter().filter(|b| b.shape == ShapeKind::Box).count();
        SceneSummary {
            tick: world.tick(),
            bodies: bodies.len(),
            boxes,
            spheres: bodies.len() - boxes,
            picked: world.picked(),
            pending_events: world.events().len(),
        }
    }

    pub fn inspect_body(world: &PhysicsWorld, id: BodyId) -> Option<BodyInfo> {
        world.body(id).map(|body| {
            let p = body.transform.position;
            let r = body.transform.rotation;
            BodyInfo {
                id,
                shape: body.shape,
                position: [p.x, p.y, p.z],
                rotation: [r.x, r.y, r.z, r.w],
            }
        })
    }

    /// Details for every body, in spawn order.
    pub fn list_bodies(world: &PhysicsWorld) -> Vec<BodyInfo> {
        world
            .bodies()
            .iter()
            .filter_map(|b| Self::inspect_body(world, b.id))
            .collect()
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub tick: u64,
    pub bodies: usize,
    pub boxes: usize,
    pub spheres: usize,
    pub picked: Option<BodyId>,
    pub pending_events: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: tick={} bodies={} (boxes={} spheres={}) picked={} pending_events={}",
            self.tick,
            self.bodies,
            self.boxes,
            self.spheres,
            self.picked
                .map(|id| id.to_string())
                .unwrap_or_else(|| "none".into()),
            self.pending_events
        )
    }
}

/// Detailed info about a single body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyInfo {
    pub id: BodyId,
    pub shape: ShapeKind,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
}

impl std::fmt::Display for BodyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:<6} pos=({:.2}, {:.2}, {:.2})",
            self.id,
            self.shape.label(),
            self.position[0],
            self.position[1],
            self.position[2],
        )
    }
}

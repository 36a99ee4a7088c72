use crate::config::SceneConfig;
use crate::convert;
use crate::error::{PhysicsError, Result};
use glam::Vec3;
use rapier3d::prelude::*;
use sandbox_common::{BodyId, ShapeKind, Transform};
use serde::{Deserialize, Serialize};

/// An event record produced by every mutation of the physics world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PhysicsEvent {
    Spawned { id: BodyId, shape: ShapeKind },
    Removed { id: BodyId },
    /// All dynamic bodies were removed at once.
    Cleared { count: usize },
    Picked { id: BodyId, pivot: Vec3 },
    Released { id: BodyId },
    Stepped { tick: u64 },
}

/// Snapshot of one dynamic body, as the renderer and tools see it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub id: BodyId,
    pub shape: ShapeKind,
    pub transform: Transform,
}

/// Closest hit of a ray cast. `body` is `None` for static geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub body: Option<BodyId>,
    pub point: Vec3,
    pub distance: f32,
}

#[derive(Debug, Clone, Copy)]
struct DynamicBody {
    id: BodyId,
    handle: RigidBodyHandle,
    shape: ShapeKind,
}

/// A held body: a spherical joint between the body and a kinematic pivot
/// that follows the mouse.
#[derive(Debug, Clone, Copy)]
struct Pick {
    id: BodyId,
    body: RigidBodyHandle,
    pivot_body: RigidBodyHandle,
    joint: ImpulseJointHandle,
    pivot: Vec3,
}

/// The simulated scene: a static ground plane plus any number of dynamic
/// boxes and spheres.
///
/// Dynamic bodies are kept in spawn order so rendering and inspection are
/// stable from frame to frame.
pub struct PhysicsWorld {
    config: SceneConfig,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    dynamic: Vec<DynamicBody>,
    pick: Option<Pick>,
    tick: u64,
    event_log: Vec<PhysicsEvent>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl PhysicsWorld {
    /// Create a world holding only the ground plane.
    pub fn new(config: SceneConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        let mut collider_set = ColliderSet::new();
        collider_set.insert(ColliderBuilder::halfspace(Vector::y_axis()).build());

        let mut query_pipeline = QueryPipeline::new();
        query_pipeline.update(&collider_set);

        Self {
            gravity: convert::vector(config.gravity()),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set,
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline,
            dynamic: Vec::new(),
            pick: None,
            tick: 0,
            event_log: Vec::new(),
            config,
        }
    }

    /// Create a world with the initial rows of boxes and spheres.
    pub fn with_scene(config: SceneConfig) -> Self {
        let boxes = config.initial_boxes;
        let spheres = config.initial_spheres;
        let mut world = Self::new(config);
        for i in 0..boxes {
            world.spawn(ShapeKind::Box, SceneConfig::initial_box_position(i));
        }
        for i in 0..spheres {
            world.spawn(ShapeKind::Sphere, SceneConfig::initial_sphere_position(i));
        }
        tracing::info!("scene ready with {boxes} boxes and {spheres} spheres");
        world
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of live dynamic bodies.
    pub fn body_count(&self) -> usize {
        self.dynamic.len()
    }

    /// Number of active pick constraints (zero or one).
    pub fn constraint_count(&self) -> usize {
        self.impulse_joint_set.len()
    }

    /// The body currently held by the mouse, if any.
    pub fn picked(&self) -> Option<BodyId> {
        self.pick.map(|p| p.id)
    }

    /// Current world-space target of the pick constraint.
    pub fn pivot(&self) -> Option<Vec3> {
        self.pick.map(|p| p.pivot)
    }

    pub fn events(&self) -> &[PhysicsEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<PhysicsEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Add a dynamic body of the given shape. Returns its id.
    pub fn spawn(&mut self, shape: ShapeKind, position: Vec3) -> BodyId {
        let body = RigidBodyBuilder::dynamic()
            .translation(convert::vector(position))
            .build();
        let handle = self.rigid_body_set.insert(body);

        let collider = match shape {
            ShapeKind::Box => {
                let h = self.config.box_half_extent;
                ColliderBuilder::cuboid(h, h, h)
            }
            ShapeKind::Sphere => ColliderBuilder::ball(self.config.sphere_radius),
        }
        .mass(self.config.body_mass)
        .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        self.query_pipeline.update(&self.collider_set);

        let id = convert::body_id(handle);
        self.dynamic.push(DynamicBody { id, handle, shape });
        self.event_log.push(PhysicsEvent::Spawned { id, shape });
        tracing::debug!("spawned {} {id} at {position}", shape.label());
        id
    }

    /// Remove one dynamic body, releasing it first if it is held.
    pub fn remove(&mut self, id: BodyId) -> Result<()> {
        let index = self
            .dynamic
            .iter()
            .position(|b| b.id == id)
            .ok_or(PhysicsError::UnknownBody(id))?;
        if self.picked() == Some(id) {
            self.release();
        }
        let body = self.dynamic.remove(index);
        self.remove_rigid_body(body.handle);
        self.query_pipeline.update(&self.collider_set);
        self.event_log.push(PhysicsEvent::Removed { id });
        tracing::debug!("removed {id}");
        Ok(())
    }

    /// Remove every dynamic body. The ground stays. Returns how many were removed.
    pub fn clear_dynamic(&mut self) -> usize {
        self.release();
        let removed = std::mem::take(&mut self.dynamic);
        for body in &removed {
            self.remove_rigid_body(body.handle);
        }
        self.query_pipeline.update(&self.collider_set);
        let count = removed.len();
        self.event_log.push(PhysicsEvent::Cleared { count });
        tracing::info!("cleared {count} bodies");
        count
    }

    /// Advance the simulation by one fixed timestep.
    pub fn step(&mut self) {
        if let Some(pick) = self.pick {
            if let Some(body) = self.rigid_body_set.get_mut(pick.body) {
                body.wake_up(true);
            }
        }

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        self.tick += 1;
        self.event_log.push(PhysicsEvent::Stepped { tick: self.tick });
    }

    /// Closest hit along a ray against every collider, ground included.
    pub fn cast_ray(&self, origin: Vec3, dir: Vec3, max_len: f32) -> Option<RayHit> {
        let dir = dir.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }
        let ray = Ray::new(convert::point(origin), convert::vector(dir));
        let (collider, toi) = self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_len,
            true,
            QueryFilter::default(),
        )?;

        let body = self
            .collider_set
            .get(collider)
            .and_then(|c| c.parent())
            .filter(|handle| {
                self.rigid_body_set
                    .get(*handle)
                    .is_some_and(|rb| rb.is_dynamic())
            })
            .map(convert::body_id);

        Some(RayHit {
            body,
            point: convert::point_to_vec3(&ray.point_at(toi)),
            distance: toi,
        })
    }

    /// Grab the dynamic body under the ray, if any. The body is tied to a
    /// pivot at the hit point until [`release`](Self::release).
    pub fn pick(&mut self, origin: Vec3, dir: Vec3) -> Option<BodyId> {
        let hit = self.cast_ray(origin, dir, self.config.ray_length)?;
        let id = hit.body?;
        let handle = convert::body_handle(id);
        let local_anchor = self
            .rigid_body_set
            .get(handle)?
            .position()
            .inverse_transform_point(&convert::point(hit.point));

        self.release();

        let pivot_body = self.rigid_body_set.insert(
            RigidBodyBuilder::kinematic_position_based()
                .translation(convert::vector(hit.point))
                .build(),
        );
        let joint = SphericalJointBuilder::new()
            .local_anchor1(convert::point(Vec3::ZERO))
            .local_anchor2(local_anchor)
            .build();
        let joint = self
            .impulse_joint_set
            .insert(pivot_body, handle, joint, true);

        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.wake_up(true);
        }

        self.pick = Some(Pick {
            id,
            body: handle,
            pivot_body,
            joint,
            pivot: hit.point,
        });
        self.event_log.push(PhysicsEvent::Picked {
            id,
            pivot: hit.point,
        });
        tracing::debug!("picked {id} at {}", hit.point);
        Some(id)
    }

    /// Move the pick pivot to `pick_distance` along the given ray.
    pub fn drag_to(&mut self, origin: Vec3, dir: Vec3) {
        let Some(pick) = self.pick.as_mut() else {
            return;
        };
        let pivot = origin + dir.normalize_or_zero() * self.config.pick_distance;
        pick.pivot = pivot;
        if let Some(pivot_body) = self.rigid_body_set.get_mut(pick.pivot_body) {
            pivot_body.set_next_kinematic_translation(convert::vector(pivot));
        }
        if let Some(body) = self.rigid_body_set.get_mut(pick.body) {
            body.wake_up(true);
        }
    }

    /// Drop the held body. Returns which body was released.
    pub fn release(&mut self) -> Option<BodyId> {
        let pick = self.pick.take()?;
        self.impulse_joint_set.remove(pick.joint, true);
        self.remove_rigid_body(pick.pivot_body);
        if let Some(body) = self.rigid_body_set.get_mut(pick.body) {
            body.wake_up(true);
        }
        self.event_log.push(PhysicsEvent::Released { id: pick.id });
        tracing::debug!("released {}", pick.id);
        Some(pick.id)
    }

    /// All dynamic bodies in spawn order.
    pub fn bodies(&self) -> Vec<BodyState> {
        self.dynamic
            .iter()
            .filter_map(|b| self.body_state(b))
            .collect()
    }

    pub fn body(&self, id: BodyId) -> Option<BodyState> {
        self.dynamic
            .iter()
            .find(|b| b.id == id)
            .and_then(|b| self.body_state(b))
    }

    fn body_state(&self, body: &DynamicBody) -> Option<BodyState> {
        let rb = self.rigid_body_set.get(body.handle)?;
        Some(BodyState {
            id: body.id,
            shape: body.shape,
            transform: Transform {
                position: convert::vec3(rb.translation()),
                rotation: convert::quat(rb.rotation()),
                ..Transform::default()
            },
        })
    }

    fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }
}

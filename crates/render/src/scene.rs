use glam::{Mat4, Vec3};
use sandbox_common::{Color, ShapeKind};
use sandbox_physics::PhysicsWorld;

/// Radius of the unit sphere mesh the renderers upload.
const MESH_SPHERE_RADIUS: f32 = 0.5;

/// Ground slab drawn under the physics half-space.
const GROUND_CENTER: Vec3 = Vec3::new(0.0, -0.05, 0.0);
const GROUND_SIZE: Vec3 = Vec3::new(50.0, 0.1, 50.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Cube,
    Sphere,
}

/// One flat-colored mesh instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshKind,
    pub model: Mat4,
    pub color: Color,
}

/// Build the frame's draw list: the ground slab, then every dynamic body in
/// spawn order. Meshes are unit-sized, so each model matrix carries the
/// collider size as scale.
pub fn extract_draw_list(world: &PhysicsWorld) -> Vec<DrawItem> {
    let config = world.config();
    let bodies = world.bodies();

    let mut draws = Vec::with_capacity(bodies.len() + 1);
    draws.push(DrawItem {
        mesh: MeshKind::Cube,
        model: Mat4::from_translation(GROUND_CENTER) * Mat4::from_scale(GROUND_SIZE),
        color: Color::GROUND,
    });

    for body in bodies {
        let (mesh, scale) = match body.shape {
            ShapeKind::Box => (MeshKind::Cube, 2.0 * config.box_half_extent),
            ShapeKind::Sphere => (MeshKind::Sphere, config.sphere_radius / MESH_SPHERE_RADIUS),
        };
        draws.push(DrawItem {
            mesh,
            model: body.transform.matrix() * Mat4::from_scale(Vec3::splat(scale)),
            color: Color::for_shape(body.shape),
        });
    }
    draws
}

/// Model-view-projection matrix for one draw.
pub fn mvp(view_proj: Mat4, model: Mat4) -> Mat4 {
    view_proj * model
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox_physics::SceneConfig;

    #[test]
    fn empty_world_draws_ground_only() {
        let world = PhysicsWorld::new(SceneConfig::default());
        let draws = extract_draw_list(&world);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].mesh, MeshKind::Cube);
        assert_eq!(draws[0].color, Color::GROUND);
        let top = draws[0].model.transform_point3(Vec3::new(0.0, 0.5, 0.0));
        assert!(top.y.abs() < 1e-6);
    }

    #[test]
    fn bodies_follow_ground_in_spawn_order() {
        let world = PhysicsWorld::with_scene(SceneConfig::default());
        let draws = extract_draw_list(&world);
        assert_eq!(draws.len(), 11);
        assert!(draws[1..6].iter().all(|d| d.mesh == MeshKind::Cube));
        assert!(draws[6..].iter().all(|d| d.mesh == MeshKind::Sphere));
        assert_eq!(draws[1].color, Color::BOX);
        assert_eq!(draws[6].color, Color::SPHERE);
    }

    #[test]
    fn box_scale_matches_collider() {
        let mut world = PhysicsWorld::new(SceneConfig::default());
        world.spawn(ShapeKind::Box, Vec3::new(0.0, 5.0, 0.0));
        let draws = extract_draw_list(&world);
        // Unit cube corner lands on the collider corner (half-extent 1).
        let corner = draws[1].model.transform_point3(Vec3::splat(0.5));
        assert!((corner - Vec3::new(1.0, 6.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn sphere_scale_matches_radius() {
        let config = SceneConfig {
            sphere_radius: 1.5,
            ..SceneConfig::default()
        };
        let mut world = PhysicsWorld::new(config);
        world.spawn(ShapeKind::Sphere, Vec3::new(0.0, 3.0, 0.0));
        let draws = extract_draw_list(&world);
        let surface = draws[1].model.transform_point3(Vec3::new(0.0, 0.5, 0.0));
        assert!((surface.y - 4.5).abs() < 1e-5);
    }

    #[test]
    fn mvp_applies_model_first() {
        let model = Mat4::from_translation(Vec3::X);
        let view_proj = Mat4::from_scale(Vec3::splat(2.0));
        let p = mvp(view_proj, model).transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(2.0, 0.0, 0.0));
    }
}

use crate::scene::{DrawItem, MeshKind};
use glam::{Mat4, Vec3};

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 10.0, 20.0),
            target: Vec3::new(0.0, 7.0, 10.0),
            fov_degrees: 45.0,
            aspect: 1280.0 / 720.0,
        }
    }
}

impl RenderView {
    pub fn view_projection(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, 0.1, 1000.0);
        proj * Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a prepared draw list and a view configuration, then
/// produces output. It never touches the physics world.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given draws and view.
    fn render(&self, draws: &[DrawItem], view: &RenderView) -> Self::Output;
}

/// Produces a human-readable dump of a frame. Used by the CLI and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, draws: &[DrawItem], view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Frame ({} draws) ===\n", draws.len()));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        let view_proj = view.view_projection();
        for (i, draw) in draws.iter().enumerate() {
            let (scale, _, pos) = draw.model.to_scale_rotation_translation();
            let clip = crate::scene::mvp(view_proj, draw.model).project_point3(Vec3::ZERO);
            let mesh = match draw.mesh {
                MeshKind::Cube => "cube",
                MeshKind::Sphere => "sphere",
            };
            out.push_str(&format!(
                "  [{i:>3}] {mesh:<6} pos=({:.2}, {:.2}, {:.2}) size=({:.2}, {:.2}, {:.2}) ndc=({:.2}, {:.2})\n",
                pos.x, pos.y, pos.z, scale.x, scale.y, scale.z, clip.x, clip.y
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox_common::ShapeKind;
    use sandbox_physics::{PhysicsWorld, SceneConfig};

    #[test]
    fn debug_renderer_empty_scene() {
        let renderer = DebugTextRenderer::new();
        let output = renderer.render(&[], &RenderView::default());

        assert!(output.contains("0 draws"));
        assert!(output.contains("fov=45"));
    }

    #[test]
    fn debug_renderer_lists_each_draw() {
        let mut world = PhysicsWorld::new(SceneConfig::default());
        world.spawn(ShapeKind::Sphere, Vec3::new(1.0, 2.0, 3.0));
        let draws = crate::extract_draw_list(&world);

        let output = DebugTextRenderer::new().render(&draws, &RenderView::default());
        assert!(output.contains("2 draws"));
        assert!(output.contains("cube"));
        assert!(output.contains("sphere pos=(1.00, 2.00, 3.00)"));
    }

    #[test]
    fn target_projects_to_screen_center() {
        let view = RenderView::default();
        let ndc = view.view_projection().project_point3(view.target);
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}

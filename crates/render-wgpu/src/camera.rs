use glam::{Mat4, Vec2, Vec3, Vec4};

const START_POSITION: Vec3 = Vec3::new(0.0, 10.0, 20.0);
const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Fly camera with position, yaw, pitch, and projection parameters.
/// Angles are stored in radians; yaw -90 degrees looks down -Z.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Units per second.
    pub speed: f32,
    /// Radians of rotation per pixel of mouse motion.
    pub sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: START_POSITION,
            yaw: -90.0_f32.to_radians(),
            // Looks slightly down: front = (0, -0.3, -1).
            pitch: (-0.3_f32).atan2(1.0),
            fov: 45.0_f32.to_radians(),
            aspect: 1280.0 / 720.0,
            near: 0.1,
            far: 1000.0,
            speed: 10.0,
            sensitivity: 0.1_f32.to_radians(),
        }
    }
}

impl FlyCamera {
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn move_forward(&mut self, dt: f32) {
        let fwd = self.forward();
        self.position += fwd * self.speed * dt;
    }

    pub fn move_backward(&mut self, dt: f32) {
        let fwd = self.forward();
        self.position -= fwd * self.speed * dt;
    }

    pub fn move_left(&mut self, dt: f32) {
        let right = self.right();
        self.position -= right * self.speed * dt;
    }

    pub fn move_right(&mut self, dt: f32) {
        let right = self.right();
        self.position += right * self.speed * dt;
    }

    /// Move along the camera axes. `forward` and `right` are in -1..=1.
    pub fn translate(&mut self, forward: f32, right: f32, dt: f32) {
        let delta = self.forward() * forward + self.right() * right;
        self.position += delta * self.speed * dt;
    }

    /// Mouse look. `dx`/`dy` are pixel deltas; screen y grows downward.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(
            -PITCH_LIMIT_DEGREES.to_radians(),
            PITCH_LIMIT_DEGREES.to_radians(),
        );
    }

    /// Back to the start position and orientation. Projection is kept.
    pub fn reset(&mut self) {
        let start = Self::default();
        self.position = start.position;
        self.yaw = start.yaw;
        self.pitch = start.pitch;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space direction of the ray through a cursor position.
    ///
    /// `cursor` is in window pixels with the origin at the top left,
    /// `viewport` is the window size in pixels.
    pub fn screen_ray(&self, cursor: Vec2, viewport: Vec2) -> Vec3 {
        let viewport = viewport.max(Vec2::ONE);
        let x = 2.0 * cursor.x / viewport.x - 1.0;
        let y = 1.0 - 2.0 * cursor.y / viewport.y;

        let ray_clip = Vec4::new(x, y, -1.0, 1.0);
        let ray_eye = self.projection_matrix().inverse() * ray_clip;
        let ray_eye = Vec4::new(ray_eye.x, ray_eye.y, -1.0, 0.0);
        let ray_world = self.view_matrix().inverse() * ray_eye;
        ray_world.truncate().normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn default_camera() {
        let cam = FlyCamera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 10.0, 20.0));
        assert!(approx(cam.forward(), Vec3::new(0.0, -0.3, -1.0).normalize()));
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn camera_movement() {
        let mut cam = FlyCamera::default();
        let start = cam.position;
        cam.move_forward(1.0);
        assert!(approx(cam.position, start + cam.forward() * 10.0));
        cam.move_backward(1.0);
        assert!(approx(cam.position, start));
        cam.move_right(0.5);
        assert!(cam.position.x > start.x);
    }

    #[test]
    fn translate_combines_axes() {
        let mut a = FlyCamera::default();
        let mut b = FlyCamera::default();
        a.translate(1.0, -1.0, 0.1);
        b.move_forward(0.1);
        b.move_left(0.1);
        assert!(approx(a.position, b.position));
    }

    #[test]
    fn rotate_uses_tenth_degree_per_pixel() {
        let mut cam = FlyCamera::default();
        cam.pitch = 0.0;
        cam.rotate(100.0, -50.0);
        assert!((cam.yaw.to_degrees() - (-80.0)).abs() < 1e-3);
        assert!((cam.pitch.to_degrees() - 5.0).abs() < 1e-3);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = FlyCamera::default();
        cam.rotate(0.0, -10_000.0);
        assert!((cam.pitch.to_degrees() - 89.0).abs() < 1e-3);
        cam.rotate(0.0, 10_000.0);
        assert!((cam.pitch.to_degrees() + 89.0).abs() < 1e-3);
    }

    #[test]
    fn reset_restores_pose_only() {
        let mut cam = FlyCamera::default();
        cam.aspect = 2.0;
        cam.move_forward(3.0);
        cam.rotate(40.0, 40.0);
        cam.reset();
        let fresh = FlyCamera::default();
        assert_eq!(cam.position, fresh.position);
        assert_eq!(cam.yaw, fresh.yaw);
        assert_eq!(cam.pitch, fresh.pitch);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn center_ray_is_forward() {
        let cam = FlyCamera::default();
        let ray = cam.screen_ray(Vec2::new(640.0, 360.0), Vec2::new(1280.0, 720.0));
        assert!(approx(ray, cam.forward()));
    }

    #[test]
    fn corner_rays_point_outward() {
        let mut cam = FlyCamera::default();
        cam.pitch = 0.0;
        let viewport = Vec2::new(1280.0, 720.0);
        let top_left = cam.screen_ray(Vec2::ZERO, viewport);
        let bottom_right = cam.screen_ray(viewport, viewport);
        assert!(top_left.x < 0.0 && top_left.y > 0.0);
        assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);
        assert!((top_left.length() - 1.0).abs() < 1e-5);
        // Top edge sits half the vertical fov above the view axis.
        let top = cam.screen_ray(Vec2::new(640.0, 0.0), viewport);
        let angle = top.angle_between(cam.forward()).to_degrees();
        assert!((angle - 22.5).abs() < 1e-2);
    }
}

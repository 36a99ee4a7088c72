use egui::Context as EguiContext;
use glam::Vec2;
use sandbox_common::ShapeKind;
use sandbox_input::{Action, InputMode, InputState, MoveKey};
use sandbox_physics::{PhysicsEvent, PhysicsWorld, SceneConfig};
use sandbox_render_wgpu::FlyCamera;
use sandbox_tools::SceneInspector;
use std::time::Instant;
use winit::keyboard::KeyCode;

/// Upper bound on physics steps per frame, so a long stall does not
/// snowball into an ever longer catch-up.
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Everything the sandbox simulates and shows, minus the GPU.
pub struct AppState {
    pub physics: PhysicsWorld,
    pub camera: FlyCamera,
    pub input: InputState,
    pub show_settings: bool,
    /// Last known cursor position in window pixels.
    pub cursor: Vec2,
    /// Window size in pixels.
    pub viewport: Vec2,
    pub last_frame: Instant,
    tick_accumulator: f64,
    cursor_change: Option<InputMode>,
}

impl AppState {
    pub fn new(config: SceneConfig, mode: InputMode, viewport: Vec2) -> Self {
        let mut camera = FlyCamera::default();
        camera.aspect = viewport.x / viewport.y.max(1.0);
        Self {
            physics: PhysicsWorld::with_scene(config),
            camera,
            input: InputState::new(mode),
            show_settings: false,
            cursor: viewport * 0.5,
            viewport,
            last_frame: Instant::now(),
            tick_accumulator: 0.0,
            cursor_change: Some(mode),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        self.camera.aspect = self.viewport.x / self.viewport.y;
    }

    /// Advance one frame: camera movement with the real frame time, physics
    /// at its fixed timestep.
    pub fn update(&mut self, dt: f32) {
        let (forward, right) = self.input.movement();
        if forward != 0.0 || right != 0.0 {
            self.camera.translate(forward, right, dt);
        }

        let tick_rate = self.physics.config().timestep as f64;
        self.tick_accumulator += dt as f64;
        let mut steps = 0;
        while self.tick_accumulator >= tick_rate {
            self.tick_accumulator -= tick_rate;
            if steps < MAX_STEPS_PER_FRAME {
                self.physics.step();
                steps += 1;
            }
        }

        for event in self.physics.drain_events() {
            match event {
                PhysicsEvent::Stepped { .. } => {}
                other => tracing::debug!("physics: {other:?}"),
            }
        }
    }

    /// Switch input mode. A held body is dropped when the mouse leaves the GUI.
    pub fn set_mode(&mut self, mode: InputMode) {
        if self.input.set_mode(mode) {
            if mode == InputMode::Fps {
                self.physics.release();
            }
            self.cursor_change = Some(mode);
        }
    }

    /// Cursor visibility/grab the window should adopt, if it changed.
    pub fn take_cursor_change(&mut self) -> Option<InputMode> {
        self.cursor_change.take()
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        let move_key = match key {
            KeyCode::KeyW => Some(MoveKey::Forward),
            KeyCode::KeyS => Some(MoveKey::Back),
            KeyCode::KeyA => Some(MoveKey::Left),
            KeyCode::KeyD => Some(MoveKey::Right),
            _ => None,
        };
        if let Some(move_key) = move_key {
            self.input.key(move_key, pressed);
        }
        if key == KeyCode::Escape && pressed {
            self.set_mode(InputMode::Gui);
        }
    }

    pub fn mouse_look(&mut self, dx: f32, dy: f32) {
        if let Some((dx, dy)) = self.input.look(dx, dy) {
            self.camera.rotate(dx, dy);
        }
    }

    fn mouse_ray(&self) -> glam::Vec3 {
        self.camera.screen_ray(self.cursor, self.viewport)
    }

    pub fn cursor_moved(&mut self, position: Vec2) {
        self.cursor = position;
        if self.input.picking_enabled() && self.physics.picked().is_some() {
            let dir = self.mouse_ray();
            self.physics.drag_to(self.camera.position, dir);
        }
    }

    pub fn press(&mut self) {
        if !self.input.picking_enabled() {
            return;
        }
        let dir = self.mouse_ray();
        if let Some(id) = self.physics.pick(self.camera.position, dir) {
            tracing::info!("grabbed body {id}");
        }
    }

    pub fn release(&mut self) {
        if let Some(id) = self.physics.release() {
            tracing::info!("released body {id}");
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetMode(mode) => self.set_mode(mode),
            Action::SpawnBox => self.spawn(ShapeKind::Box),
            Action::SpawnSphere => self.spawn(ShapeKind::Sphere),
            Action::DeleteObjects => {
                self.physics.clear_dynamic();
            }
            Action::ResetCamera => self.camera.reset(),
        }
    }

    fn spawn(&mut self, shape: ShapeKind) {
        let position = self.camera.position + self.physics.config().spawn_offset();
        let id = self.physics.spawn(shape, position);
        tracing::info!("spawned {} {id}", shape.label());
    }

    /// Build the GUI for this frame. Requests are collected and applied
    /// once the GUI pass is done.
    pub fn draw_ui(&mut self, ctx: &EguiContext) {
        let mut actions = Vec::new();
        let mode = self.input.mode();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Mode", |ui| {
                    for target in [InputMode::Fps, InputMode::Gui] {
                        if ui.selectable_label(mode == target, target.label()).clicked() {
                            actions.push(Action::SetMode(target));
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("Add Object", |ui| {
                    if ui.button("Add Box").clicked() {
                        actions.push(Action::SpawnBox);
                        ui.close_menu();
                    }
                    if ui.button("Add Sphere").clicked() {
                        actions.push(Action::SpawnSphere);
                        ui.close_menu();
                    }
                    if ui.button("Delete Objects").clicked() {
                        actions.push(Action::DeleteObjects);
                        ui.close_menu();
                    }
                });
                ui.menu_button("Options", |ui| {
                    ui.checkbox(&mut self.show_settings, "Settings Window");
                });
            });
        });

        if self.show_settings {
            egui::Window::new("Settings")
                .open(&mut self.show_settings)
                .vscroll(true)
                .show(ctx, |ui| {
                    ctx.settings_ui(ui);
                });
        }

        let summary = SceneInspector::summary(&self.physics);
        let p = self.camera.position;
        egui::Window::new("Scene Editor")
            .default_pos([10.0, 40.0])
            .show(ctx, |ui| {
                ui.label(format!(
                    "Camera Position: ({:.2}, {:.2}, {:.2})",
                    p.x, p.y, p.z
                ));
                ui.label(format!("Mode: {}", mode.label()));
                ui.label(format!(
                    "Bodies: {} (boxes {}, spheres {})",
                    summary.bodies, summary.boxes, summary.spheres
                ));
                ui.label(format!("Tick: {}", summary.tick));
                if let Some(id) = summary.picked {
                    ui.label(format!("Holding body {id}"));
                }
                if ui.button("Reset Camera").clicked() {
                    actions.push(Action::ResetCamera);
                }
                ui.separator();
                ui.small("ESC: GUI mode | WASD: Move | LMB: Grab (GUI mode)");
            });

        for action in actions {
            self.apply(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn state(mode: InputMode) -> AppState {
        AppState::new(SceneConfig::default(), mode, Vec2::new(1280.0, 720.0))
    }

    #[test]
    fn starts_with_default_scene_and_requested_cursor() {
        let mut s = state(InputMode::Fps);
        assert_eq!(s.physics.body_count(), 10);
        assert_eq!(s.take_cursor_change(), Some(InputMode::Fps));
        assert_eq!(s.take_cursor_change(), None);
    }

    #[test]
    fn escape_switches_to_gui() {
        let mut s = state(InputMode::Fps);
        s.take_cursor_change();
        s.handle_key(KeyCode::Escape, true);
        assert_eq!(s.input.mode(), InputMode::Gui);
        assert_eq!(s.take_cursor_change(), Some(InputMode::Gui));
    }

    #[test]
    fn wasd_moves_only_in_fps() {
        let mut s = state(InputMode::Fps);
        let start = s.camera.position;
        s.handle_key(KeyCode::KeyW, true);
        s.update(0.1);
        assert!((s.camera.position - start).length() > 0.9);

        s.handle_key(KeyCode::Escape, true);
        let after = s.camera.position;
        s.handle_key(KeyCode::KeyW, true);
        s.update(0.1);
        assert_eq!(s.camera.position, after);
    }

    #[test]
    fn update_steps_at_fixed_rate() {
        let mut s = state(InputMode::Gui);
        s.update(0.06);
        assert_eq!(s.physics.tick(), 3);
        // A long stall is capped.
        s.update(1.0);
        assert_eq!(s.physics.tick(), 3 + MAX_STEPS_PER_FRAME as u64);
    }

    #[test]
    fn spawn_actions_place_bodies_in_front_of_camera() {
        let mut s = state(InputMode::Gui);
        s.apply(Action::SpawnBox);
        s.apply(Action::SpawnSphere);
        let bodies = s.physics.bodies();
        assert_eq!(bodies.len(), 12);
        assert_eq!(bodies[10].shape, ShapeKind::Box);
        assert_eq!(bodies[11].transform.position, Vec3::new(0.0, 10.0, 15.0));
    }

    #[test]
    fn delete_objects_clears_scene() {
        let mut s = state(InputMode::Gui);
        s.apply(Action::DeleteObjects);
        assert_eq!(s.physics.body_count(), 0);
    }

    #[test]
    fn reset_camera_action() {
        let mut s = state(InputMode::Fps);
        s.mouse_look(1.0, 1.0);
        s.mouse_look(200.0, 50.0);
        s.apply(Action::ResetCamera);
        assert_eq!(s.camera.yaw, FlyCamera::default().yaw);
        assert_eq!(s.camera.position, FlyCamera::default().position);
    }

    #[test]
    fn mouse_look_ignored_in_gui_mode() {
        let mut s = state(InputMode::Gui);
        let yaw = s.camera.yaw;
        s.mouse_look(100.0, 0.0);
        s.mouse_look(100.0, 0.0);
        assert_eq!(s.camera.yaw, yaw);
    }

    #[test]
    fn click_drag_release_in_gui_mode() {
        let mut s = state(InputMode::Gui);
        s.apply(Action::DeleteObjects);
        // Put a box straight ahead of the camera and aim at its center.
        let target = s.camera.position + s.camera.forward() * 8.0;
        let id = s.physics.spawn(ShapeKind::Box, target);
        s.cursor_moved(Vec2::new(640.0, 360.0));

        s.press();
        assert_eq!(s.physics.picked(), Some(id));

        s.cursor_moved(Vec2::new(640.0, 100.0));
        let pivot = s.physics.pivot().unwrap();
        assert!(((pivot - s.camera.position).length() - 10.0).abs() < 1e-3);
        assert!(pivot.y > target.y);

        s.release();
        assert!(s.physics.picked().is_none());
    }

    #[test]
    fn press_in_fps_mode_does_not_pick() {
        let mut s = state(InputMode::Fps);
        s.press();
        assert!(s.physics.picked().is_none());
    }

    #[test]
    fn leaving_gui_mode_drops_held_body() {
        let mut s = state(InputMode::Gui);
        s.apply(Action::DeleteObjects);
        let target = s.camera.position + s.camera.forward() * 8.0;
        s.physics.spawn(ShapeKind::Sphere, target);
        s.press();
        assert!(s.physics.picked().is_some());

        s.apply(Action::SetMode(InputMode::Fps));
        assert!(s.physics.picked().is_none());
        assert_eq!(s.physics.constraint_count(), 0);
    }
}

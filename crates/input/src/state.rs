use std::collections::HashSet;

/// What the mouse and keyboard currently drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    /// Cursor hidden, mouse looks around, WASD moves.
    #[default]
    Fps,
    /// Cursor visible, mouse drives the GUI and picks bodies.
    Gui,
}

impl InputMode {
    pub fn cursor_visible(self) -> bool {
        self == InputMode::Gui
    }

    pub fn label(self) -> &'static str {
        match self {
            InputMode::Fps => "FPS Camera Mode",
            InputMode::Gui => "GUI/Interaction Mode",
        }
    }
}

/// Camera movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

/// Swallows the first mouse delta after the cursor is grabbed, which would
/// otherwise contain the jump from wherever the cursor used to be.
#[derive(Debug, Clone)]
pub struct MouseLook {
    first_mouse: bool,
}

impl Default for MouseLook {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseLook {
    pub fn new() -> Self {
        Self { first_mouse: true }
    }

    pub fn arm(&mut self) {
        self.first_mouse = true;
    }

    pub fn is_armed(&self) -> bool {
        self.first_mouse
    }

    pub fn filter(&mut self, dx: f32, dy: f32) -> (f32, f32) {
        if self.first_mouse {
            self.first_mouse = false;
            return (0.0, 0.0);
        }
        (dx, dy)
    }
}

/// Input mode plus everything that depends on it.
#[derive(Debug, Clone)]
pub struct InputState {
    mode: InputMode,
    held: HashSet<MoveKey>,
    look: MouseLook,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(InputMode::default())
    }
}

impl InputState {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            held: HashSet::new(),
            look: MouseLook::new(),
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Switch modes. Returns true if the mode changed.
    pub fn set_mode(&mut self, mode: InputMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        match mode {
            InputMode::Fps => self.look.arm(),
            InputMode::Gui => self.held.clear(),
        }
        tracing::debug!("input mode: {}", mode.label());
        true
    }

    /// ESC always hands the mouse back to the GUI.
    pub fn escape(&mut self) -> bool {
        self.set_mode(InputMode::Gui)
    }

    pub fn key(&mut self, key: MoveKey, pressed: bool) {
        if pressed && self.mode == InputMode::Fps {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    /// Movement axes `(forward, right)`, each in -1..=1. Zero outside FPS mode.
    pub fn movement(&self) -> (f32, f32) {
        if self.mode != InputMode::Fps {
            return (0.0, 0.0);
        }
        let axis = |pos: MoveKey, neg: MoveKey| {
            self.held.contains(&pos) as i32 as f32 - self.held.contains(&neg) as i32 as f32
        };
        (
            axis(MoveKey::Forward, MoveKey::Back),
            axis(MoveKey::Right, MoveKey::Left),
        )
    }

    /// Filtered look delta, or `None` when the mouse belongs to the GUI.
    pub fn look(&mut self, dx: f32, dy: f32) -> Option<(f32, f32)> {
        match self.mode {
            InputMode::Fps => Some(self.look.filter(dx, dy)),
            InputMode::Gui => None,
        }
    }

    pub fn picking_enabled(&self) -> bool {
        self.mode == InputMode::Gui
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_fps_with_hidden_cursor() {
        let state = InputState::default();
        assert_eq!(state.mode(), InputMode::Fps);
        assert!(!state.mode().cursor_visible());
        assert!(!state.picking_enabled());
    }

    #[test]
    fn first_look_sample_is_swallowed() {
        let mut state = InputState::new(InputMode::Fps);
        assert_eq!(state.look(300.0, -40.0), Some((0.0, 0.0)));
        assert_eq!(state.look(3.0, 4.0), Some((3.0, 4.0)));
    }

    #[test]
    fn reentering_fps_rearms_first_mouse() {
        let mut state = InputState::new(InputMode::Fps);
        state.look(1.0, 1.0);
        assert!(state.escape());
        assert_eq!(state.look(5.0, 5.0), None);
        assert!(state.set_mode(InputMode::Fps));
        assert_eq!(state.look(5.0, 5.0), Some((0.0, 0.0)));
        assert_eq!(state.look(5.0, 5.0), Some((5.0, 5.0)));
    }

    #[test]
    fn escape_is_idempotent() {
        let mut state = InputState::new(InputMode::Gui);
        assert!(!state.escape());
        assert!(state.picking_enabled());
        assert!(state.mode().cursor_visible());
    }

    #[test]
    fn movement_axes() {
        let mut state = InputState::new(InputMode::Fps);
        state.key(MoveKey::Forward, true);
        state.key(MoveKey::Left, true);
        assert_eq!(state.movement(), (1.0, -1.0));
        state.key(MoveKey::Back, true);
        assert_eq!(state.movement(), (0.0, -1.0));
        state.key(MoveKey::Left, false);
        assert_eq!(state.movement(), (0.0, 0.0));
    }

    #[test]
    fn gui_mode_ignores_movement() {
        let mut state = InputState::new(InputMode::Fps);
        state.key(MoveKey::Forward, true);
        state.escape();
        assert_eq!(state.movement(), (0.0, 0.0));
        state.key(MoveKey::Right, true);
        state.set_mode(InputMode::Fps);
        // Keys pressed while in GUI mode are not remembered.
        assert_eq!(state.movement(), (0.0, 0.0));
    }

    #[test]
    fn mouse_look_arm_cycle() {
        let mut look = MouseLook::new();
        assert!(look.is_armed());
        look.filter(1.0, 1.0);
        assert!(!look.is_armed());
        look.arm();
        assert_eq!(look.filter(9.0, 9.0), (0.0, 0.0));
    }
}

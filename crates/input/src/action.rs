use crate::state::InputMode;

/// A GUI request, queued while the GUI is built and applied afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Switch between camera control and GUI interaction.
    SetMode(InputMode),
    /// Spawn a box in front of the camera.
    SpawnBox,
    /// Spawn a sphere in front of the camera.
    SpawnSphere,
    /// Remove every dynamic body.
    DeleteObjects,
    /// Put the camera back at its start pose.
    ResetCamera,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_mode_carries_target() {
        let a = Action::SetMode(InputMode::Gui);
        assert!(matches!(a, Action::SetMode(InputMode::Gui)));
        assert_ne!(a, Action::SetMode(InputMode::Fps));
    }

    #[test]
    fn spawn_actions_are_distinct() {
        assert_ne!(Action::SpawnBox, Action::SpawnSphere);
        assert!(matches!(Action::DeleteObjects, Action::DeleteObjects));
    }
}

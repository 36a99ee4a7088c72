use crate::error::{PhysicsError, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable scene parameters. Every field has a default, so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub gravity: [f32; 3],
    /// Fixed simulation step in seconds.
    pub timestep: f32,
    pub box_half_extent: f32,
    pub sphere_radius: f32,
    pub body_mass: f32,
    pub initial_boxes: usize,
    pub initial_spheres: usize,
    /// Offset from the camera at which GUI-spawned bodies appear.
    pub spawn_offset: [f32; 3],
    /// Distance along the mouse ray at which a held body is dragged.
    pub pick_distance: f32,
    pub ray_length: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            timestep: 1.0 / 60.0,
            box_half_extent: 1.0,
            sphere_radius: 0.5,
            body_mass: 1.0,
            initial_boxes: 5,
            initial_spheres: 5,
            spawn_offset: [0.0, 0.0, -5.0],
            pick_distance: 10.0,
            ray_length: 1000.0,
        }
    }
}

impl SceneConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!("loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(PhysicsError::InvalidConfig("gravity must be finite".into()));
        }
        let positive = [
            ("timestep", self.timestep),
            ("box_half_extent", self.box_half_extent),
            ("sphere_radius", self.sphere_radius),
            ("body_mass", self.body_mass),
            ("pick_distance", self.pick_distance),
            ("ray_length", self.ray_length),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(PhysicsError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }

    pub fn spawn_offset(&self) -> Vec3 {
        Vec3::from_array(self.spawn_offset)
    }

    /// Starting position of the i-th initial box.
    pub fn initial_box_position(i: usize) -> Vec3 {
        Vec3::new(-5.0 + i as f32 * 2.5, 5.0, 0.0)
    }

    /// Starting position of the i-th initial sphere.
    pub fn initial_sphere_position(i: usize) -> Vec3 {
        Vec3::new(-5.0 + i as f32 * 2.5, 8.0, 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gravity(), Vec3::new(0.0, -9.81, 0.0));
        assert_eq!(config.initial_boxes, 5);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = SceneConfig::from_yaml_str("initial_boxes: 2\nsphere_radius: 0.75\n").unwrap();
        assert_eq!(config.initial_boxes, 2);
        assert_eq!(config.sphere_radius, 0.75);
        assert_eq!(config.initial_spheres, 5);
        assert_eq!(config.timestep, 1.0 / 60.0);
    }

    #[test]
    fn rejects_non_positive_timestep() {
        let err = SceneConfig::from_yaml_str("timestep: 0.0\n").unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_each_invalid_field() {
        let cases = [
            "gravity: [0.0, .nan, 0.0]",
            "gravity: [.inf, -9.81, 0.0]",
            "gravity: [0.0, 0.0, -.inf]",
            "timestep: -0.01",
            "timestep: .inf",
            "box_half_extent: -1.0",
            "box_half_extent: 0.0",
            "sphere_radius: -0.5",
            "sphere_radius: .nan",
            "body_mass: -2.0",
            "body_mass: 0.0",
            "pick_distance: 0.0",
            "pick_distance: .inf",
            "ray_length: 0.0",
            "ray_length: -1000.0",
        ];
        for yaml in cases {
            match SceneConfig::from_yaml_str(yaml) {
                Err(PhysicsError::InvalidConfig(_)) => {}
                other => panic!("{yaml:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn invalid_config_names_the_field() {
        let err = SceneConfig::from_yaml_str("body_mass: -2.0").unwrap_err();
        assert!(err.to_string().contains("body_mass"));
    }

    #[test]
    fn rejects_bad_yaml() {
        let err = SceneConfig::from_yaml_str("initial_boxes: [1, 2").unwrap_err();
        assert!(matches!(err, PhysicsError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gravity: [0.0, -1.62, 0.0]").unwrap();
        let config = SceneConfig::load(file.path()).unwrap();
        assert_eq!(config.gravity[1], -1.62);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SceneConfig::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, PhysicsError::Io(_)));
    }

    #[test]
    fn initial_layout_matches_row_spacing() {
        assert_eq!(SceneConfig::initial_box_position(0), Vec3::new(-5.0, 5.0, 0.0));
        assert_eq!(SceneConfig::initial_sphere_position(4), Vec3::new(5.0, 8.0, 3.0));
    }
}

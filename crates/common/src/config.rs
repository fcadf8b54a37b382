use crate::types::Direction;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("cube side must be positive and finite, got {0}")]
    InvalidSide(f32),
    #[error("rotation speed must be positive and finite, got {0}")]
    InvalidSpeed(f32),
    #[error("{field} must be finite, got {value}")]
    InvalidOffset { field: &'static str, value: f32 },
    #[error("key {key:?} is bound to both {first} and {second}")]
    ConflictingBinding {
        key: String,
        first: Direction,
        second: Direction,
    },
}

/// Geometry and timing of the rolling cube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    /// Edge length of the cube, also the size of one grid cell.
    pub side: f32,
    /// Speed multiplier: 1.0 rolls 360 degrees per second.
    pub speed: f32,
    /// World Y of the floor plane.
    pub floor_y_offset: f32,
    /// World Z of grid row zero.
    pub floor_z_offset: f32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            side: 10.0,
            speed: 1.0,
            floor_y_offset: -20.0,
            floor_z_offset: -40.0,
        }
    }
}

impl CubeConfig {
    /// Degrees rotated per second of frame time.
    pub fn degrees_per_second(&self) -> f32 {
        360.0 * self.speed
    }

    /// Half the face diagonal: distance from the pivot edge to the cube centre.
    pub fn pivot_radius(&self) -> f32 {
        std::f32::consts::SQRT_2 * self.side / 2.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.side > 0.0 && self.pivot_radius().is_finite()) {
            return Err(ConfigError::InvalidSide(self.side));
        }
        if !(self.speed > 0.0 && self.degrees_per_second().is_finite()) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        for (field, value) in [
            ("floor_y_offset", self.floor_y_offset),
            ("floor_z_offset", self.floor_z_offset),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidOffset { field, value });
            }
        }
        Ok(())
    }
}

/// Host key names bound to each rolling direction.
///
/// Names are compared case-insensitively, so `"w"` matches both `w` and `W`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Vec<String>,
    pub back: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: vec!["s".into(), "ArrowDown".into()],
            back: vec!["w".into(), "ArrowUp".into()],
            left: vec!["a".into(), "ArrowLeft".into()],
            right: vec!["d".into(), "ArrowRight".into()],
        }
    }
}

impl KeyBindings {
    fn keys_for(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Back => &self.back,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::None => &[],
        }
    }

    /// Direction bound to `key`, or `None` for keys that do not roll the cube.
    pub fn direction_for(&self, key: &str) -> Option<Direction> {
        Direction::MOVING.into_iter().find(|d| {
            self.keys_for(*d)
                .iter()
                .any(|bound| bound.eq_ignore_ascii_case(key))
        })
    }

    /// Reject tables where one key would roll in two directions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, first) in Direction::MOVING.into_iter().enumerate() {
            for second in Direction::MOVING.into_iter().skip(i + 1) {
                for key in self.keys_for(first) {
                    if self
                        .keys_for(second)
                        .iter()
                        .any(|k| k.eq_ignore_ascii_case(key))
                    {
                        return Err(ConfigError::ConflictingBinding {
                            key: key.clone(),
                            first,
                            second,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Top-level settings file.
///
/// Every field is optional in YAML; missing values fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cube: CubeConfig,
    pub keys: KeyBindings,
}

impl Settings {
    /// Parse and validate settings from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_yaml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Load settings from `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cube.validate()?;
        self.keys.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cube_geometry() {
        let c = CubeConfig::default();
        assert_eq!(c.side, 10.0);
        assert_eq!(c.degrees_per_second(), 360.0);
        assert_eq!(c.floor_y_offset, -20.0);
        assert_eq!(c.floor_z_offset, -40.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn pivot_radius_is_half_diagonal() {
        let c = CubeConfig::default();
        let expected = (200.0_f32).sqrt() / 2.0;
        assert!((c.pivot_radius() - expected).abs() < 1e-5);
    }

    #[test]
    fn invalid_side_rejected() {
        let c = CubeConfig {
            side: 0.0,
            ..CubeConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidSide(_))));

        let c = CubeConfig {
            side: f32::NAN,
            ..CubeConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidSide(_))));
    }

    #[test]
    fn invalid_speed_rejected() {
        let c = CubeConfig {
            speed: -1.0,
            ..CubeConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidSpeed(_))));
    }

    #[test]
    fn speed_that_overflows_degrees_rejected() {
        let c = CubeConfig {
            speed: 1.0e37,
            ..CubeConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidSpeed(_))));

        let c = CubeConfig {
            side: f32::MAX,
            ..CubeConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidSide(_))));
    }

    #[test]
    fn non_finite_floor_offset_rejected() {
        let c = CubeConfig {
            floor_z_offset: f32::INFINITY,
            ..CubeConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidOffset {
                field: "floor_z_offset",
                ..
            })
        ));

        let err = Settings::from_yaml_str("cube:\n  floor_y_offset: .nan\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOffset {
                field: "floor_y_offset",
                ..
            }
        ));
    }

    #[test]
    fn default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.direction_for("w"), Some(Direction::Back));
        assert_eq!(keys.direction_for("S"), Some(Direction::Forward));
        assert_eq!(keys.direction_for("a"), Some(Direction::Left));
        assert_eq!(keys.direction_for("ArrowRight"), Some(Direction::Right));
        assert_eq!(keys.direction_for("q"), None);
        assert!(keys.validate().is_ok());
    }

    #[test]
    fn conflicting_binding_rejected() {
        let keys = KeyBindings {
            left: vec!["a".into(), "x".into()],
            right: vec!["X".into()],
            ..KeyBindings::default()
        };
        let err = keys.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingBinding { .. }));
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let settings = Settings::from_yaml_str("cube:\n  speed: 2.0\n").unwrap();
        assert_eq!(settings.cube.speed, 2.0);
        assert_eq!(settings.cube.side, 10.0);
        assert_eq!(settings.keys, KeyBindings::default());
    }

    #[test]
    fn yaml_rebinds_keys() {
        let yaml = "keys:\n  forward: [k]\n  back: [i]\n  left: [j]\n  right: [l]\n";
        let settings = Settings::from_yaml_str(yaml).unwrap();
        assert_eq!(settings.keys.direction_for("i"), Some(Direction::Back));
        assert_eq!(settings.keys.direction_for("w"), None);
    }

    #[test]
    fn invalid_yaml_value_rejected() {
        let err = Settings::from_yaml_str("cube:\n  side: -3\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSide(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn no_path_gives_defaults() {
        assert_eq!(Settings::load_or_default(None).unwrap(), Settings::default());
    }
}

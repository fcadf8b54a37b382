use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Direction of a quarter turn.
///
/// `None` means no motion is requested or in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards +Z (towards the camera).
    Forward,
    /// Towards -Z (away from the camera).
    Back,
    /// Towards -X.
    Left,
    /// Towards +X.
    Right,
    #[default]
    None,
}

impl Direction {
    /// The four moving directions.
    pub const MOVING: [Direction; 4] = [
        Direction::Forward,
        Direction::Back,
        Direction::Left,
        Direction::Right,
    ];

    pub fn is_none(self) -> bool {
        self == Direction::None
    }

    /// Grid step `(dx, dz)` committed when a quarter turn in this direction completes.
    pub const fn step(self) -> (i32, i32) {
        match self {
            Self::Forward => (0, 1),
            Self::Back => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::None => (0, 0),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Forward => "forward",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// Resting cell of the cube on the floor grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub z: i32,
}

impl GridPos {
    pub const ORIGIN: GridPos = GridPos { x: 0, z: 0 };

    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The neighbouring cell one quarter turn away in `direction`.
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dz) = direction.step();
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn each_moving_direction_steps_one_axis() {
        for d in Direction::MOVING {
            let (dx, dz) = d.step();
            assert_eq!(dx.abs() + dz.abs(), 1, "{d} must move exactly one cell");
        }
        assert_eq!(Direction::None.step(), (0, 0));
    }

    #[test]
    fn opposite_steps_cancel() {
        for (a, b) in [
            (Direction::Forward, Direction::Back),
            (Direction::Left, Direction::Right),
        ] {
            assert_eq!(GridPos::ORIGIN.stepped(a).stepped(b), GridPos::ORIGIN);
        }
    }

    #[test]
    fn direction_defaults_to_none() {
        assert!(Direction::default().is_none());
    }

    #[test]
    fn direction_serializes_lowercase() {
        let yaml = serde_yaml::to_string(&Direction::Forward).unwrap();
        assert_eq!(yaml.trim(), "forward");
    }
}

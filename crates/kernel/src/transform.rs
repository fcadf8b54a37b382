use glam::{Quat, Vec3};
use rollcube_common::{CubeConfig, Direction, GridPos, Transform};

/// Degrees in one quarter turn.
pub const QUARTER_TURN: f32 = 90.0;

/// Quadratic ease-in between `start` and `end` for progress `t` in `[0, 1]`.
///
/// Makes the cube look heavy: it picks up speed through the turn.
pub fn ease_in(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t * t
}

/// Transform of a cube resting on `grid` and rolled `angle` degrees towards
/// `direction`.
///
/// The centre of the cube traces a quarter circle around the pivot edge, so the
/// translation is the point on that circle plus a per-direction correction.
/// With `Direction::None` the cube sits flush on its cell with no rotation.
pub fn roll_transform(
    config: &CubeConfig,
    grid: GridPos,
    direction: Direction,
    angle: f32,
) -> Transform {
    let angle = if direction.is_none() { 0.0 } else { angle };
    let eased = ease_in(0.0, QUARTER_TURN, angle / QUARTER_TURN);

    let side = config.side;
    let radius = config.pivot_radius();
    let arc = (eased + 45.0).to_radians();
    let vertical = radius * arc.sin();
    let horizontal = radius * arc.cos() - side / 2.0;

    let mut position = Vec3::new(
        grid.x as f32 * side,
        vertical + config.floor_y_offset,
        grid.z as f32 * side + config.floor_z_offset,
    );

    let rotation = match direction {
        Direction::Forward => {
            position.z -= horizontal;
            Quat::from_axis_angle(Vec3::X, eased.to_radians())
        }
        Direction::Back => {
            position.z += horizontal;
            Quat::from_axis_angle(Vec3::X, -eased.to_radians())
        }
        Direction::Right => {
            position.x -= horizontal;
            Quat::from_axis_angle(Vec3::Z, -eased.to_radians())
        }
        Direction::Left => {
            position.x += horizontal;
            Quat::from_axis_angle(Vec3::Z, eased.to_radians())
        }
        Direction::None => Quat::IDENTITY,
    };

    Transform {
        position,
        rotation,
        scale: Vec3::splat(side),
    }
}

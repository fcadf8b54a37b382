use rollcube_common::{Direction, GridPos};
use rollcube_kernel::{RollEvent, RollingCube};
use serde::Serialize;

/// Cube inspector for developer tooling.
///
/// Read-only queries against engine state for the HUD and the CLI trace.
pub struct CubeInspector;

impl CubeInspector {
    /// Snapshot the engine state.
    pub fn summary(cube: &RollingCube) -> CubeSummary {
        let t = cube.transform();
        let (_, angle) = t.rotation.to_axis_angle();
        CubeSummary {
            frame: cube.frame(),
            grid: cube.grid(),
            direction: cube.active_direction(),
            angle: cube.angle(),
            turns_completed: cube.turns_completed(),
            pending_events: cube.events().len(),
            position: t.position.to_array(),
            rotation_degrees: angle.to_degrees(),
        }
    }

    /// Distinct cells reached since `start`, in visiting order, read from the event log.
    pub fn visited_cells(cube: &RollingCube, start: GridPos) -> Vec<GridPos> {
        let reached = cube.events().iter().filter_map(|event| match event {
            RollEvent::TurnCompleted { to, .. } => Some(*to),
            _ => None,
        });
        let mut cells = vec![start];
        for cell in reached {
            if !cells.contains(&cell) {
                cells.push(cell);
            }
        }
        cells
    }
}

/// Summary of engine state for the inspector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CubeSummary {
    pub frame: u64,
    pub grid: GridPos,
    pub direction: Direction,
    /// Raw (uneased) degrees into the current quarter turn.
    pub angle: f32,
    pub turns_completed: u64,
    pub pending_events: usize,
    pub position: [f32; 3],
    /// Eased rotation actually applied to the cube.
    pub rotation_degrees: f32,
}

impl std::fmt::Display for CubeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cube: frame={} grid={} direction={} angle={:.1} turns={} pos=({:.2}, {:.2}, {:.2})",
            self.frame,
            self.grid,
            self.direction,
            self.angle,
            self.turns_completed,
            self.position[0],
            self.position[1],
            self.position[2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_resting_cube() {
        let cube = RollingCube::default();
        let summary = CubeInspector::summary(&cube);
        assert_eq!(summary.frame, 0);
        assert_eq!(summary.grid, GridPos::ORIGIN);
        assert_eq!(summary.direction, Direction::None);
        assert_eq!(summary.rotation_degrees, 0.0);
        assert!((summary.position[1] + 15.0).abs() < 1e-4);
        assert_eq!(summary.position[2], -40.0);
    }

    #[test]
    fn summary_mid_turn() {
        let mut cube = RollingCube::default();
        cube.update(0.125, Direction::Back);
        let summary = CubeInspector::summary(&cube);
        assert_eq!(summary.frame, 1);
        assert_eq!(summary.direction, Direction::Back);
        assert_eq!(summary.angle, 45.0);
        // Eased: 90 * 0.5^2
        assert!((summary.rotation_degrees - 22.5).abs() < 1e-3);
        assert_eq!(summary.pending_events, 1);
    }

    #[test]
    fn summary_display() {
        let cube = RollingCube::default();
        let text = CubeInspector::summary(&cube).to_string();
        assert!(text.contains("grid=(0, 0)"));
        assert!(text.contains("direction=none"));
    }

    #[test]
    fn visited_cells_follow_log() {
        let mut cube = RollingCube::default();
        for d in [Direction::Right, Direction::Left, Direction::Forward] {
            cube.update(0.0625, d);
            for _ in 0..3 {
                cube.update(0.0625, Direction::None);
            }
        }
        let cells = CubeInspector::visited_cells(&cube, GridPos::ORIGIN);
        assert_eq!(
            cells,
            vec![GridPos::ORIGIN, GridPos::new(1, 0), GridPos::new(0, 1)]
        );
    }
}

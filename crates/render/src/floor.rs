use glam::Vec3;
use rollcube_common::CubeConfig;

/// Static floor drawn under the cube: a square line grid of `cells` x `cells`
/// squares, one cube side each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorGrid {
    /// Centre of the grid in world space.
    pub center: Vec3,
    /// Edge length of one cell.
    pub spacing: f32,
    /// Number of cells along each axis.
    pub cells: u32,
}

impl FloorGrid {
    pub const DEFAULT_CELLS: u32 = 10;

    /// Floor matching `config`: centred on x = 0 and the grid's row zero,
    /// one unit below the floor plane so the lines don't fight the cube's
    /// bottom face.
    pub fn from_config(config: &CubeConfig) -> Self {
        Self {
            center: Vec3::new(0.0, config.floor_y_offset - 1.0, config.floor_z_offset),
            spacing: config.side,
            cells: Self::DEFAULT_CELLS,
        }
    }

    pub fn half_extent(&self) -> f32 {
        self.cells as f32 * self.spacing / 2.0
    }

    /// Line segments making up the grid, `cells + 1` along each axis.
    pub fn segments(&self) -> Vec<(Vec3, Vec3)> {
        let half = self.half_extent();
        let c = self.center;
        let mut lines = Vec::with_capacity(2 * (self.cells as usize + 1));
        for i in 0..=self.cells {
            let offset = -half + i as f32 * self.spacing;
            lines.push((
                c + Vec3::new(offset, 0.0, -half),
                c + Vec3::new(offset, 0.0, half),
            ));
            lines.push((
                c + Vec3::new(-half, 0.0, offset),
                c + Vec3::new(half, 0.0, offset),
            ));
        }
        lines
    }
}

impl Default for FloorGrid {
    fn default() -> Self {
        Self::from_config(&CubeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_floor_sits_under_cube() {
        let floor = FloorGrid::default();
        assert_eq!(floor.center, Vec3::new(0.0, -21.0, -40.0));
        assert_eq!(floor.spacing, 10.0);
        assert_eq!(floor.half_extent(), 50.0);
    }

    #[test]
    fn segment_count_and_bounds() {
        let floor = FloorGrid::default();
        let segs = floor.segments();
        assert_eq!(segs.len(), 22);
        for (a, b) in &segs {
            assert_eq!(a.y, -21.0);
            assert_eq!(b.y, -21.0);
            assert!(a.x.abs() <= 50.0 && b.x.abs() <= 50.0);
            assert!((a.z + 40.0).abs() <= 50.0 && (b.z + 40.0).abs() <= 50.0);
        }
    }

    #[test]
    fn lines_follow_cube_side() {
        let config = CubeConfig {
            side: 4.0,
            ..CubeConfig::default()
        };
        let floor = FloorGrid::from_config(&config);
        let segs = floor.segments();
        // Consecutive lines along X are one cube side apart.
        assert_eq!(segs[2].0.x - segs[0].0.x, 4.0);
    }
}

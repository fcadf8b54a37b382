use glam::Vec3;
use rollcube_kernel::{Phase, RollingCube};

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl RenderView {
    /// Camera at `eye` looking along -Z, tilted down by `pitch_degrees`.
    pub fn pitched(eye: Vec3, pitch_degrees: f32, fov_degrees: f32) -> Self {
        let pitch = pitch_degrees.to_radians();
        let forward = Vec3::new(0.0, -pitch.sin(), -pitch.cos());
        Self {
            eye,
            target: eye + forward,
            fov_degrees,
        }
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }
}

impl Default for RenderView {
    /// Fixed game camera: at the origin, 30 degrees down, facing -Z.
    fn default() -> Self {
        Self::pitched(Vec3::ZERO, 30.0, 67.0)
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads cube state and a view configuration, then produces
/// output. It never advances the engine.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given cube state and view.
    fn render(&self, cube: &RollingCube, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable description of the cube state.
///
/// Used by the CLI trace and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, cube: &RollingCube, view: &RenderView) -> String {
        let t = cube.transform();
        let (axis, angle) = t.rotation.to_axis_angle();
        let mut out = String::new();
        out.push_str(&format!(
            "=== Cube (frame={}, turns={}) ===\n",
            cube.frame(),
            cube.turns_completed()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));
        let phase = match cube.phase() {
            Phase::Resting => "resting".to_string(),
            Phase::Rotating(d) => format!("rolling {d} {:.1}deg", cube.angle()),
        };
        out.push_str(&format!("  grid={} {}\n", cube.grid(), phase));
        out.push_str(&format!(
            "  pos=({:.2}, {:.2}, {:.2}) rot={:.1}deg about ({:.0}, {:.0}, {:.0})\n",
            t.position.x,
            t.position.y,
            t.position.z,
            angle.to_degrees(),
            axis.x,
            axis.y,
            axis.z
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcube_common::Direction;

    #[test]
    fn debug_renderer_resting_cube() {
        let cube = RollingCube::default();
        let output = DebugTextRenderer::new().render(&cube, &RenderView::default());

        assert!(output.contains("frame=0"));
        assert!(output.contains("grid=(0, 0) resting"));
        assert!(output.contains("pos=(0.00, -15.00, -40.00)"));
    }

    #[test]
    fn debug_renderer_rolling_cube() {
        let mut cube = RollingCube::default();
        cube.update(0.0625, Direction::Right);
        let output = DebugTextRenderer::new().render(&cube, &RenderView::default());

        assert!(output.contains("frame=1"));
        assert!(output.contains("rolling right 22.5deg"));
    }

    #[test]
    fn render_view_default_looks_down_negative_z() {
        let view = RenderView::default();
        assert_eq!(view.eye, Vec3::ZERO);
        let f = view.forward();
        assert!(f.z < 0.0 && f.y < 0.0);
        assert!((f.y + 0.5).abs() < 1e-5);
        assert_eq!(view.fov_degrees, 67.0);
    }
}

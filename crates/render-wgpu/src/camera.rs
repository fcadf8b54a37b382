use glam::{Mat4, Vec3};
use rollcube_render::RenderView;

/// Width over height of the visible world; the scene is letterboxed to keep it.
pub const WORLD_ASPECT: f32 = 108.0 / 72.0;

/// Pixel rectangle of the surface the scene is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Largest `aspect` rectangle centred in a `width` x `height` surface.
    pub fn fit(width: u32, height: u32, aspect: f32) -> Self {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let (fit_w, fit_h) = if w / h > aspect {
            (h * aspect, h)
        } else {
            (w, w / aspect)
        };
        Self {
            x: ((w - fit_w) / 2.0).floor(),
            y: ((h - fit_h) / 2.0).floor(),
            width: fit_w,
            height: fit_h,
        }
    }
}

/// Perspective camera parked at a fixed pose.
pub struct FixedCamera {
    pub view: RenderView,
    pub near: f32,
    pub far: f32,
    viewport: Viewport,
}

impl Default for FixedCamera {
    fn default() -> Self {
        Self {
            view: RenderView::default(),
            near: 1.0,
            far: 300.0,
            viewport: Viewport::fit(108, 72, WORLD_ASPECT),
        }
    }
}

impl FixedCamera {
    /// Letterbox into a `width` x `height` surface.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.viewport = Viewport::fit(width, height, WORLD_ASPECT);
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.view.eye, self.view.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.view.fov_degrees.to_radians(),
            WORLD_ASPECT,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_ndc(cam: &FixedCamera, p: Vec3) -> Vec3 {
        let clip = cam.view_projection() * p.extend(1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn default_camera() {
        let cam = FixedCamera::default();
        assert_eq!(cam.view.eye, Vec3::ZERO);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn resting_cube_is_on_screen() {
        let cam = FixedCamera::default();
        let ndc = to_ndc(&cam, Vec3::new(0.0, -15.0, -40.0));
        assert!(ndc.x.abs() < 1.0 && ndc.y.abs() < 1.0);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn wide_window_gets_side_bars() {
        let vp = Viewport::fit(1600, 800, WORLD_ASPECT);
        assert_eq!(vp.height, 800.0);
        assert_eq!(vp.width, 1200.0);
        assert_eq!(vp.x, 200.0);
        assert_eq!(vp.y, 0.0);
    }

    #[test]
    fn tall_window_gets_top_bars() {
        let vp = Viewport::fit(600, 800, WORLD_ASPECT);
        assert_eq!(vp.width, 600.0);
        assert_eq!(vp.height, 400.0);
        assert_eq!(vp.y, 200.0);
    }

    #[test]
    fn projection_ignores_window_shape() {
        let mut cam = FixedCamera::default();
        let before = cam.view_projection();
        cam.set_viewport(1920, 480);
        assert_eq!(cam.view_projection(), before);
        assert_eq!(cam.viewport().width, 720.0);
        cam.set_viewport(0, 480);
        assert_eq!(cam.viewport().width, 720.0);
    }
}

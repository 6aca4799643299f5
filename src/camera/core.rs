use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters. This is the pose handed to the render backend each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in render space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera at `eye` looking at `target`, projection from `options`.
    #[must_use]
    pub fn new(eye: Vec3, target: Vec3, options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: stable_up(target - eye),
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix. Uses the [0,1] depth range.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Recompute the aspect ratio for a new viewport size. A zero-sized
    /// viewport (minimized window) keeps the previous aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Project a render-space point to viewport pixel coordinates
    /// (origin top-left). `None` when the point is behind the camera.
    #[must_use]
    pub fn world_to_screen(&self, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.build_matrix() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }

    /// Convert viewport pixel coordinates to a render-space ray
    /// `(origin, unit direction)` starting on the near plane.
    #[must_use]
    pub fn screen_to_ray(&self, pixel: Vec2, viewport: Vec2) -> (Vec3, Vec3) {
        // Convert to NDC (-1 to 1), y flipped for screen coordinates
        let ndc_x = (pixel.x / viewport.x) * 2.0 - 1.0;
        let ndc_y = 1.0 - (pixel.y / viewport.y) * 2.0;

        let inv_view_proj = self.build_matrix().inverse();

        let world_near = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let world_far = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        // Perspective divide
        let ray_origin = world_near.truncate() / world_near.w;
        let far = world_far.truncate() / world_far.w;

        (ray_origin, (far - ray_origin).normalize_or_zero())
    }
}

/// World up, unless looking straight along it.
pub(crate) fn stable_up(forward: Vec3) -> Vec3 {
    if forward.normalize_or_zero().cross(Vec3::Y).length_squared() < 1e-8 {
        Vec3::Z
    } else {
        Vec3::Y
    }
}

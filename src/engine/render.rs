//! Render handoff: the backend seam and the per-frame report.

use glam::{Mat4, Vec3};

use crate::bodies::{BodyId, BodyTransform};
use crate::camera::Camera;

/// Handle to a primitive created by a [`RenderBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveId(pub u32);

/// Camera pose handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position in render space.
    pub eye: Vec3,
    /// Look-at point.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Combined view-projection matrix.
    pub view_proj: Mat4,
    /// Whether a fly-to is in progress.
    pub transitioning: bool,
}

impl CameraPose {
    /// Pose of `camera`.
    #[must_use]
    pub fn new(camera: &Camera, transitioning: bool) -> Self {
        Self {
            eye: camera.eye,
            target: camera.target,
            up: camera.up,
            fovy: camera.fovy,
            aspect: camera.aspect,
            view_proj: camera.build_matrix(),
            transitioning,
        }
    }
}

/// Everything produced by one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Simulated seconds since start.
    pub sim_time: f64,
    /// Simulated seconds applied this frame.
    pub scaled_dt: f64,
    /// Whether orbits are advancing.
    pub playing: bool,
    /// Simulated seconds per wall-clock second.
    pub time_scale: f64,
    /// Per-body transforms in id order.
    pub transforms: Vec<BodyTransform>,
    /// Camera pose after this frame's update.
    pub camera: CameraPose,
    /// Selected body, if any.
    pub selection: Option<BodyId>,
}

impl FrameReport {
    /// Bodies whose state was clamped this frame.
    #[must_use]
    pub fn degenerate_count(&self) -> usize {
        self.transforms.iter().filter(|t| t.degenerate).count()
    }
}

/// The renderer the scheduler drives.
///
/// Primitives start at the origin with no rotation; the central body's
/// primitive is never moved.
pub trait RenderBackend {
    /// Current drawable size in pixels. `None` when there is no surface to
    /// draw into.
    fn surface_size(&self) -> Option<(u32, u32)>;

    /// Create a sphere primitive of `radius` render units.
    fn create_body_primitive(&mut self, radius: f32, color: [f32; 3]) -> PrimitiveId;

    /// Place a primitive.
    fn set_transform(&mut self, primitive: PrimitiveId, transform: &BodyTransform);

    /// Set the view for the next draw.
    fn set_camera(&mut self, pose: &CameraPose);

    /// The drawable changed size.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw the frame.
    fn draw(&mut self);
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Radians of yaw/pitch per pixel of drag.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Render units of orbit radius per unit of wheel delta.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Closest free-orbit radius.
    #[schemars(skip)]
    pub min_radius: f32,
    /// Farthest free-orbit radius.
    #[schemars(skip)]
    pub max_radius: f32,
    /// Camera position at startup and after a reset.
    #[schemars(skip)]
    pub initial_position: [f32; 3],
    /// Fraction of the remaining distance covered per frame while flying
    /// to a body.
    #[schemars(title = "Fly-to Smoothing", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub smoothing: f32,
    /// Distance to target at which a fly-to ends.
    #[schemars(skip)]
    pub arrival_epsilon: f32,
    /// Fly-to standoff distance as a multiple of the body's visual radius.
    #[schemars(skip)]
    pub approach_factor: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 2000.0,
            rotate_speed: 0.005,
            zoom_speed: 0.05,
            min_radius: 10.0,
            max_radius: 1000.0,
            initial_position: [0.0, 50.0, 100.0],
            smoothing: 0.05,
            arrival_epsilon: 0.1,
            approach_factor: 4.0,
        }
    }
}

impl CameraOptions {
    /// Copy with out-of-range values replaced by defaults.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let positive = |v: f32, fallback: f32| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                fallback
            }
        };
        let min_radius = positive(self.min_radius, d.min_radius);
        let max_radius = positive(self.max_radius, d.max_radius).max(min_radius);
        let smoothing = if self.smoothing.is_finite() && self.smoothing > 0.0 {
            self.smoothing.min(1.0)
        } else {
            d.smoothing
        };
        let initial_position = if self.initial_position.iter().all(|c| c.is_finite())
            && self.initial_position.iter().any(|&c| c != 0.0)
        {
            self.initial_position
        } else {
            d.initial_position
        };
        Self {
            fovy: positive(self.fovy, d.fovy).min(179.0),
            znear: positive(self.znear, d.znear),
            zfar: positive(self.zfar, d.zfar),
            rotate_speed: positive(self.rotate_speed, d.rotate_speed),
            zoom_speed: positive(self.zoom_speed, d.zoom_speed),
            min_radius,
            max_radius,
            initial_position,
            smoothing,
            arrival_epsilon: positive(self.arrival_epsilon, d.arrival_epsilon),
            approach_factor: positive(self.approach_factor, d.approach_factor),
        }
    }
}

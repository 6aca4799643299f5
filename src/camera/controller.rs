use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use super::core::{stable_up, Camera};
use crate::options::CameraOptions;

/// Spherical camera placement around the world origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitAngles {
    /// Distance from the origin.
    pub radius: f32,
    /// Rotation about the world Y axis, radians. Zero looks down -Z.
    pub yaw: f32,
    /// Elevation above the XZ plane, radians, in `[-π/2, π/2]`.
    pub pitch: f32,
}

impl OrbitAngles {
    /// Derive angles from a camera position. `None` at (or numerically
    /// at) the origin, where the angles are undefined.
    #[must_use]
    pub fn from_position(p: Vec3) -> Option<Self> {
        let radius = p.length();
        if !(radius.is_finite() && radius > f32::EPSILON) {
            return None;
        }
        Some(Self {
            radius,
            yaw: p.x.atan2(p.z),
            pitch: (p.y / radius).clamp(-1.0, 1.0).asin(),
        })
    }

    /// Camera position for these angles.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            self.radius * sin_yaw * cos_pitch,
            self.radius * sin_pitch,
            self.radius * cos_yaw * cos_pitch,
        )
    }

    /// Tangent pointing toward increasing pitch. Stays well defined at
    /// the poles, where world Y is parallel to the view direction.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * sin_pitch, cos_pitch, -cos_yaw * sin_pitch)
    }
}

/// An in-progress fly-to. Target position and look-at always travel
/// together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTo {
    /// Eye position when the transition began.
    pub source_eye: Vec3,
    /// Look-at point when the transition began.
    pub source_look_at: Vec3,
    /// Current interpolated eye position.
    pub eye: Vec3,
    /// Current interpolated look-at point.
    pub look_at: Vec3,
    /// Where the eye is heading.
    pub target_eye: Vec3,
    /// Where the look-at point is heading.
    pub target_look_at: Vec3,
    /// Fraction of the remaining distance covered per update.
    pub smoothing: f32,
}

impl FlyTo {
    /// Distance from the current eye to the target eye.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.eye.distance(self.target_eye)
    }

    /// Completed fraction of the eye's journey, `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let total = self.source_eye.distance(self.target_eye);
        if total <= f32::EPSILON {
            return 1.0;
        }
        (1.0 - self.remaining() / total).clamp(0.0, 1.0)
    }

    /// One exponential-smoothing step. Returns `false` once the step is
    /// too small to move the eye at f32 precision.
    fn advance(&mut self) -> bool {
        let before = self.eye;
        self.eye += (self.target_eye - self.eye) * self.smoothing;
        self.look_at += (self.target_look_at - self.look_at) * self.smoothing;
        self.eye != before
    }

    /// Jump straight to the target pose.
    fn snap(&mut self) {
        self.eye = self.target_eye;
        self.look_at = self.target_look_at;
    }
}

/// Which mode drives the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraState {
    /// User-controlled orbit around the origin.
    FreeOrbit(OrbitAngles),
    /// Smoothly flying toward a selected body.
    Transitioning(FlyTo),
}

/// Camera state machine: free orbit under drag/wheel input, or a fly-to
/// toward a picked body. Any user input pre-empts a fly-to immediately,
/// continuing from its current interpolated position.
#[derive(Debug, Clone)]
pub struct CameraController {
    state: CameraState,
    camera: Camera,
    options: CameraOptions,
    initial: OrbitAngles,
}

impl CameraController {
    /// Start in free orbit at `options.initial_position`.
    #[must_use]
    pub fn new(options: &CameraOptions, viewport: (u32, u32)) -> Self {
        let options = options.sanitized();
        let initial = initial_angles(&options);
        let aspect = if viewport.0 > 0 && viewport.1 > 0 {
            viewport.0 as f32 / viewport.1 as f32
        } else {
            1.0
        };
        let camera = Camera::new(initial.position(), Vec3::ZERO, &options, aspect);
        let mut controller = Self {
            state: CameraState::FreeOrbit(initial),
            camera,
            options,
            initial,
        };
        controller.sync_camera();
        controller
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Pose and projection reflecting the current state.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Whether a fly-to is in progress.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, CameraState::Transitioning(_))
    }

    /// Active (sanitized) options.
    #[must_use]
    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    /// Replace control/projection options. The current pose is kept.
    pub fn set_options(&mut self, options: &CameraOptions) {
        self.options = options.sanitized();
        self.initial = initial_angles(&self.options);
        self.camera.fovy = self.options.fovy;
        self.camera.znear = self.options.znear;
        self.camera.zfar = self.options.zfar;
    }

    /// Recompute projection parameters for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Orbit by a drag delta in pixels. Pitch is clamped to `[-π/2, π/2]`.
    pub fn rotate(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            log::warn!("ignoring non-finite drag delta {delta:?}");
            return;
        }
        let mut angles = self.preempt();
        angles.yaw += delta.x * self.options.rotate_speed;
        angles.pitch = (angles.pitch + delta.y * self.options.rotate_speed)
            .clamp(-FRAC_PI_2, FRAC_PI_2);
        self.state = CameraState::FreeOrbit(angles);
        self.sync_camera();
    }

    /// Move along the orbit radius by a wheel delta (positive = farther).
    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            log::warn!("ignoring non-finite wheel delta {delta}");
            return;
        }
        let mut angles = self.preempt();
        angles.radius = (angles.radius + delta * self.options.zoom_speed)
            .clamp(self.options.min_radius, self.options.max_radius);
        self.state = CameraState::FreeOrbit(angles);
        self.sync_camera();
    }

    /// Begin flying toward a body at `body_position` (render space). The
    /// standoff distance scales with the body's visual radius.
    pub fn fly_to(&mut self, body_position: Vec3, visual_radius: f32) {
        if !body_position.is_finite() {
            log::warn!("ignoring fly-to toward non-finite position");
            return;
        }
        let distance = visual_radius.max(0.0) * self.options.approach_factor;
        let offset = Vec3::new(distance, distance * 0.5, distance);
        let fly = FlyTo {
            source_eye: self.camera.eye,
            source_look_at: self.camera.target,
            eye: self.camera.eye,
            look_at: self.camera.target,
            target_eye: body_position + offset,
            target_look_at: body_position,
            smoothing: self.options.smoothing,
        };
        log::debug!(
            "fly-to {:?} (look at {:?}), {:.2} away",
            fly.target_eye,
            fly.target_look_at,
            fly.remaining()
        );
        self.state = CameraState::Transitioning(fly);
        self.sync_camera();
    }

    /// Abort any fly-to, continuing in free orbit from where it is now.
    pub fn cancel_transition(&mut self) {
        let angles = self.preempt();
        self.state = CameraState::FreeOrbit(angles);
        self.sync_camera();
    }

    /// Return to the initial free-orbit pose.
    pub fn reset(&mut self) {
        self.state = CameraState::FreeOrbit(self.initial);
        self.sync_camera();
    }

    /// Per-frame update: advance an active fly-to and refresh the pose.
    ///
    /// A fly-to ends once the eye is within `arrival_epsilon` of its
    /// target, or snaps onto the target when smoothing can no longer move
    /// it; free orbit resumes with angles re-derived from the final eye
    /// position.
    pub fn update(&mut self) -> &Camera {
        if let CameraState::Transitioning(mut fly) = self.state {
            if !fly.advance() {
                fly.snap();
            }
            self.state = if fly.remaining() < self.options.arrival_epsilon
                || fly.eye == fly.target_eye
            {
                log::debug!("fly-to arrived at {:?}", fly.eye);
                CameraState::FreeOrbit(
                    OrbitAngles::from_position(fly.eye).unwrap_or(self.initial),
                )
            } else {
                CameraState::Transitioning(fly)
            };
        }
        self.sync_camera();
        &self.camera
    }

    /// Leave any fly-to, returning free-orbit angles seeded from the
    /// current interpolated eye.
    fn preempt(&self) -> OrbitAngles {
        match self.state {
            CameraState::FreeOrbit(angles) => angles,
            CameraState::Transitioning(fly) => {
                log::debug!("fly-to pre-empted at {:.0}%", fly.progress() * 100.0);
                OrbitAngles::from_position(fly.eye).unwrap_or(self.initial)
            }
        }
    }

    fn sync_camera(&mut self) {
        match self.state {
            CameraState::FreeOrbit(angles) => {
                self.camera.eye = angles.position();
                self.camera.target = Vec3::ZERO;
                self.camera.up = angles.up();
            }
            CameraState::Transitioning(fly) => {
                self.camera.eye = fly.eye;
                self.camera.target = fly.look_at;
                self.camera.up = stable_up(fly.look_at - fly.eye);
            }
        }
    }
}

fn initial_angles(options: &CameraOptions) -> OrbitAngles {
    let p = Vec3::from_array(options.initial_position);
    OrbitAngles::from_position(p).unwrap_or(OrbitAngles {
        radius: options.min_radius,
        yaw: 0.0,
        pitch: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn controller() -> CameraController {
        CameraController::new(&CameraOptions::default(), (1600, 900))
    }

    fn free_angles(c: &CameraController) -> OrbitAngles {
        match c.state() {
            CameraState::FreeOrbit(a) => *a,
            CameraState::Transitioning(_) => panic!("expected free orbit"),
        }
    }

    #[test]
    fn starts_in_free_orbit_at_initial_position() {
        let c = controller();
        assert!(!c.is_transitioning());
        assert!(c.camera().eye.distance(Vec3::new(0.0, 50.0, 100.0)) < 1e-3);
        assert_eq!(c.camera().target, Vec3::ZERO);
    }

    #[test]
    fn angles_round_trip_through_position() {
        let a = OrbitAngles {
            radius: 42.0,
            yaw: 0.7,
            pitch: -0.3,
        };
        let b = OrbitAngles::from_position(a.position()).unwrap();
        assert!((a.radius - b.radius).abs() < 1e-4);
        assert!((a.yaw - b.yaw).abs() < 1e-5);
        assert!((a.pitch - b.pitch).abs() < 1e-5);
    }

    #[test]
    fn pitch_never_leaves_half_pi_under_random_drags() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut c = controller();
        for _ in 0..5_000 {
            let delta = Vec2::new(
                rng.random_range(-800.0..800.0),
                rng.random_range(-800.0..800.0),
            );
            c.rotate(delta);
            let pitch = free_angles(&c).pitch;
            assert!(
                (-FRAC_PI_2..=FRAC_PI_2).contains(&pitch),
                "pitch {pitch} escaped"
            );
            assert!(c.camera().up.length() > 0.5);
        }
    }

    #[test]
    fn zoom_clamps_radius() {
        let mut c = controller();
        c.zoom(1.0e6);
        assert_eq!(free_angles(&c).radius, 1000.0);
        c.zoom(-1.0e6);
        assert_eq!(free_angles(&c).radius, 10.0);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut c = controller();
        let before = *c.camera();
        c.rotate(Vec2::new(f32::NAN, 1.0));
        c.zoom(f32::INFINITY);
        assert_eq!(*c.camera(), before);
    }

    #[test]
    fn fly_to_carries_target_and_look_at() {
        let mut c = controller();
        let body = Vec3::new(-114.0, 0.0, -90.0);
        c.fly_to(body, 1.3);
        let CameraState::Transitioning(fly) = *c.state() else {
            panic!("expected transition");
        };
        let d = 1.3 * 4.0;
        assert_eq!(fly.target_look_at, body);
        assert_eq!(fly.target_eye, body + Vec3::new(d, d * 0.5, d));
        assert_eq!(fly.eye, fly.source_eye);
    }

    #[test]
    fn transition_converges_within_log_bound() {
        let mut c = controller();
        c.fly_to(Vec3::new(300.0, -20.0, 150.0), 0.9);
        let CameraState::Transitioning(fly) = *c.state() else {
            panic!("expected transition");
        };
        let eps = c.options().arrival_epsilon;
        let s = fly.smoothing;
        let initial = fly.remaining();
        let bound = ((initial / eps).ln() / (1.0 / (1.0 - s)).ln()).ceil() as usize;

        let mut last = initial;
        let mut steps = 0;
        while c.is_transitioning() {
            let _ = c.update();
            steps += 1;
            if let CameraState::Transitioning(fly) = c.state() {
                assert!(fly.remaining() <= last, "distance increased");
                last = fly.remaining();
            }
            assert!(steps <= bound + 1, "took {steps} steps, bound {bound}");
        }
        let angles = free_angles(&c);
        assert!((angles.position() - c.camera().eye).length() < 1e-3);
        assert!(angles.radius > 0.0);
    }

    #[test]
    fn tiny_arrival_epsilon_still_finishes() {
        let options = CameraOptions {
            arrival_epsilon: 1e-5,
            ..CameraOptions::default()
        };
        let mut c = CameraController::new(&options, (1600, 900));
        c.fly_to(Vec3::new(300.0, -20.0, 150.0), 0.9);
        let CameraState::Transitioning(fly) = *c.state() else {
            panic!("expected transition");
        };
        let target = fly.target_eye;
        let s = fly.smoothing;
        let bound = ((fly.remaining() / 1e-5).ln() / (1.0 / (1.0 - s)).ln()).ceil() as usize;

        let mut steps = 0;
        while c.is_transitioning() {
            let _ = c.update();
            steps += 1;
            assert!(steps <= bound + 1, "took {steps} steps, bound {bound}");
        }
        assert!(c.camera().eye.distance(target) < 1e-3);
    }

    #[test]
    fn arrival_rederives_angles_from_final_eye() {
        let mut c = controller();
        let body = Vec3::new(100.0, 0.0, 0.0);
        let target_eye = body + Vec3::new(4.0, 2.0, 4.0);
        c.fly_to(body, 1.0);
        while c.is_transitioning() {
            let _ = c.update();
        }
        let angles = free_angles(&c);
        let eye = c.camera().eye;
        assert!(eye.distance(target_eye) < 0.1 + 1e-3);
        assert!((angles.radius - eye.length()).abs() < 1e-3);
        assert_eq!(c.camera().target, Vec3::ZERO);
    }

    #[test]
    fn drag_preempts_transition_without_jump() {
        let mut c = controller();
        c.fly_to(Vec3::new(200.0, 0.0, -150.0), 1.2);
        for _ in 0..10 {
            let _ = c.update();
        }
        let before = c.camera().eye;
        let _ = c.update();
        let interpolated = c.camera().eye;
        let last_step = interpolated.distance(before);

        c.rotate(Vec2::new(1.0, 0.0));
        assert!(!c.is_transitioning());
        let jump = c.camera().eye.distance(interpolated);
        assert!(
            jump <= last_step,
            "jump {jump} exceeded prior step {last_step}"
        );
    }

    #[test]
    fn wheel_preempts_transition() {
        let mut c = controller();
        c.fly_to(Vec3::new(50.0, 0.0, 50.0), 1.0);
        let _ = c.update();
        let eye = c.camera().eye;
        c.zoom(0.0);
        assert!(!c.is_transitioning());
        assert!(c.camera().eye.distance(eye) < 1e-3);
    }

    #[test]
    fn new_pick_retargets_from_current_position() {
        let mut c = controller();
        c.fly_to(Vec3::new(80.0, 0.0, 0.0), 1.0);
        for _ in 0..5 {
            let _ = c.update();
        }
        let eye = c.camera().eye;
        c.fly_to(Vec3::new(-80.0, 0.0, 0.0), 1.0);
        let CameraState::Transitioning(fly) = *c.state() else {
            panic!("expected transition");
        };
        assert_eq!(fly.source_eye, eye);
        assert_eq!(fly.target_look_at, Vec3::new(-80.0, 0.0, 0.0));
    }

    #[test]
    fn reset_returns_to_initial_pose() {
        let mut c = controller();
        c.rotate(Vec2::new(120.0, -40.0));
        c.zoom(300.0);
        c.reset();
        assert!(c.camera().eye.distance(Vec3::new(0.0, 50.0, 100.0)) < 1e-3);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut c = controller();
        c.resize(1000, 500);
        assert_eq!(c.camera().aspect, 2.0);
    }
}

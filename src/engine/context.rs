//! Simulation state owned by the scheduler.

use glam::Vec2;

use crate::bodies::{Body, BodyId, BodyRegistry};
use crate::camera::CameraController;
use crate::error::OrreryError;
use crate::input::PointerGesture;
use crate::options::Options;
use crate::physics::constants::{AU_TO_M, MU_SUN};
use crate::physics::OrbitIntegrator;
use crate::picking::PickingService;

/// Bodies, camera, selection and playback state.
///
/// Only the scheduler's frame step mutates this; the picking service and
/// render backend read it.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    bodies: BodyRegistry,
    integrator: OrbitIntegrator,
    camera: CameraController,
    picking: PickingService,
    selection: Option<BodyId>,
    time_scale: f64,
    playing: bool,
    viewport: (u32, u32),
    sim_time: f64,
}

impl SimulationContext {
    /// Build the built-in inner solar system for a viewport.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::InvalidBody`] if the catalog fails
    /// validation.
    pub fn new(
        options: &Options,
        viewport: (u32, u32),
    ) -> Result<Self, OrreryError> {
        let bodies =
            BodyRegistry::from_catalog(options.simulation.distance_scale)?;
        Ok(Self::with_bodies(bodies, options, viewport))
    }

    /// Context over an existing registry.
    #[must_use]
    pub fn with_bodies(
        bodies: BodyRegistry,
        options: &Options,
        viewport: (u32, u32),
    ) -> Self {
        let sim = &options.simulation;
        let time_scale = if sim.time_scale.is_finite() && sim.time_scale >= 0.0 {
            sim.time_scale
        } else {
            log::warn!(
                "invalid time scale {} in options, using default",
                sim.time_scale
            );
            crate::options::SimulationOptions::default().time_scale
        };
        Self {
            bodies,
            integrator: integrator_from(options),
            camera: CameraController::new(&options.camera, viewport),
            picking: PickingService::new(),
            selection: None,
            time_scale,
            playing: sim.playing,
            viewport,
            sim_time: 0.0,
        }
    }

    /// Body registry.
    #[must_use]
    pub fn bodies(&self) -> &BodyRegistry {
        &self.bodies
    }

    /// Camera controller.
    #[must_use]
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// Integrator settings.
    #[must_use]
    pub fn integrator(&self) -> &OrbitIntegrator {
        &self.integrator
    }

    /// Selected body id.
    #[must_use]
    pub fn selection(&self) -> Option<BodyId> {
        self.selection
    }

    /// Selected body.
    #[must_use]
    pub fn selected_body(&self) -> Option<&Body> {
        self.selection.and_then(|id| self.bodies.get(id))
    }

    /// Simulated seconds per wall-clock second.
    #[must_use]
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Whether orbits advance.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Simulated seconds since start.
    #[must_use]
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Set the time scale. Non-finite or negative values are rejected and
    /// the previous scale is kept.
    pub fn set_time_scale(&mut self, time_scale: f64) -> bool {
        if time_scale.is_finite() && time_scale >= 0.0 {
            self.time_scale = time_scale;
            true
        } else {
            log::warn!("ignoring invalid time scale {time_scale}");
            false
        }
    }

    /// Play or pause orbital motion.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Select a body, or clear with `None`. Unknown ids clear.
    pub fn select(&mut self, id: Option<BodyId>) {
        self.selection = id.filter(|&id| self.bodies.get(id).is_some());
    }

    /// Text describing the selected body for the chat assistant.
    #[must_use]
    pub fn assistant_context(&self) -> Option<String> {
        let body = self.selected_body()?;
        Some(format!(
            "{} ({}): {} It is currently {:.3} AU from the {}, moving at {:.2} km/s.",
            body.name,
            body.local_name,
            body.description,
            body.state().radius() / AU_TO_M,
            self.bodies.central().name,
            body.state().velocity.length() / 1000.0,
        ))
    }

    pub(crate) fn apply_options(&mut self, options: &Options) {
        self.integrator = integrator_from(options);
        self.camera.set_options(&options.camera);
        let _ = self.set_time_scale(options.simulation.time_scale);
        self.playing = options.simulation.playing;
    }

    pub(crate) fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            log::debug!("ignoring zero-sized viewport {width}x{height}");
            return false;
        }
        self.viewport = (width, height);
        self.camera.resize(width, height);
        true
    }

    /// Advance orbits and spins by `wall_dt` wall-clock seconds. Returns
    /// the simulated seconds applied, zero when paused or when the delta
    /// or scale is unusable.
    pub(crate) fn advance(&mut self, wall_dt: f64) -> f64 {
        if !(wall_dt.is_finite() && wall_dt >= 0.0) {
            log::warn!("ignoring invalid frame delta {wall_dt}");
            return 0.0;
        }
        if !self.playing {
            return 0.0;
        }
        let dt = wall_dt * self.time_scale;
        if !dt.is_finite() {
            log::warn!("ignoring non-finite scaled delta {dt}");
            return 0.0;
        }
        let _ = self.bodies.step_orbits(&self.integrator, dt);
        self.bodies.advance_rotation(dt);
        self.sim_time += dt;
        dt
    }

    /// Apply one frame's pointer gesture: drag, then wheel, then click.
    pub(crate) fn apply_gesture(&mut self, gesture: PointerGesture) {
        if gesture.drag != Vec2::ZERO {
            self.camera.rotate(gesture.drag);
        }
        if gesture.wheel != 0.0 {
            self.camera.zoom(gesture.wheel);
        }
        if let Some(pointer) = gesture.click {
            self.click(pointer);
        }
    }

    /// Pick at `pointer`; a hit selects the body and flies to it, a miss
    /// clears the selection.
    fn click(&mut self, pointer: Vec2) {
        let viewport = Vec2::new(self.viewport.0 as f32, self.viewport.1 as f32);
        let hit = self.picking.pick(
            pointer,
            viewport,
            self.camera.camera(),
            &self.bodies,
        );
        self.selection = hit;
        let Some(body) = hit.and_then(|id| self.bodies.get(id)) else {
            log::debug!("click at {pointer:?} missed");
            return;
        };
        let position = self.bodies.to_render_space(body.state().position);
        log::info!("selected {} ({})", body.name, body.id);
        self.camera.fly_to(position, body.visual_radius);
    }

    #[cfg(test)]
    pub(crate) fn bodies_mut(&mut self) -> &mut BodyRegistry {
        &mut self.bodies
    }
}

fn integrator_from(options: &Options) -> OrbitIntegrator {
    let sim = &options.simulation;
    let mu = sim.gravitational_parameter;
    let mu = if mu.is_finite() && mu > 0.0 {
        mu
    } else {
        log::warn!("invalid gravitational parameter {mu}, using {MU_SUN}");
        MU_SUN
    };
    OrbitIntegrator::new(mu)
        .with_min_radius(sim.min_radius_m)
        .with_max_substep(sim.max_substep_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraState;

    fn context() -> SimulationContext {
        SimulationContext::new(&Options::default(), (1600, 900)).unwrap()
    }

    fn pixel_of(ctx: &SimulationContext, name: &str) -> Vec2 {
        let body = ctx.bodies().find(name).unwrap();
        let p = ctx.bodies().to_render_space(body.state().position);
        ctx.camera()
            .camera()
            .world_to_screen(p, Vec2::new(1600.0, 900.0))
            .unwrap()
    }

    #[test]
    fn click_on_body_selects_and_flies() {
        let mut ctx = context();
        let pixel = pixel_of(&ctx, "Earth");
        ctx.apply_gesture(PointerGesture {
            click: Some(pixel),
            ..PointerGesture::default()
        });
        assert_eq!(ctx.selected_body().unwrap().name, "Earth");
        assert!(matches!(
            ctx.camera().state(),
            CameraState::Transitioning(_)
        ));
    }

    #[test]
    fn click_on_empty_space_clears_selection() {
        let mut ctx = context();
        ctx.select(Some(BodyId(1)));
        ctx.apply_gesture(PointerGesture {
            click: Some(Vec2::new(2.0, 2.0)),
            ..PointerGesture::default()
        });
        assert_eq!(ctx.selection(), None);
        assert!(!ctx.camera().is_transitioning());
    }

    #[test]
    fn paused_context_does_not_move_bodies() {
        let mut ctx = context();
        ctx.set_playing(false);
        let before = ctx.bodies().transforms();
        assert_eq!(ctx.advance(0.016), 0.0);
        assert_eq!(ctx.bodies().transforms(), before);
    }

    #[test]
    fn invalid_inputs_have_zero_effect() {
        let mut ctx = context();
        let before = ctx.bodies().transforms();
        assert!(!ctx.set_time_scale(f64::NAN));
        assert!(!ctx.set_time_scale(-1.0));
        assert_eq!(ctx.time_scale(), 1.0e5);
        assert_eq!(ctx.advance(f64::INFINITY), 0.0);
        assert_eq!(ctx.advance(-0.5), 0.0);
        assert_eq!(ctx.bodies().transforms(), before);
        assert_eq!(ctx.sim_time(), 0.0);
    }

    #[test]
    fn advance_scales_wall_time() {
        let mut ctx = context();
        let dt = ctx.advance(0.5);
        assert_eq!(dt, 0.5e5);
        assert_eq!(ctx.sim_time(), 0.5e5);
    }

    #[test]
    fn assistant_context_describes_selection() {
        let mut ctx = context();
        assert!(ctx.assistant_context().is_none());
        let earth = ctx.bodies().find("Earth").unwrap().id;
        ctx.select(Some(earth));
        let text = ctx.assistant_context().unwrap();
        assert!(text.starts_with("Earth ("));
        assert!(text.contains("AU from the Sun"));
        let speed = ctx.selected_body().unwrap().state().velocity.length() / 1000.0;
        assert!(speed > 25.0 && speed < 40.0);
        assert!(text.ends_with(&format!("moving at {speed:.2} km/s.")));
    }

    #[test]
    fn invalid_gravitational_parameter_falls_back_to_sun() {
        for mu in [f64::NAN, f64::INFINITY, -1.0e20, 0.0] {
            let mut options = Options::default();
            options.simulation.gravitational_parameter = mu;
            let ctx = SimulationContext::new(&options, (1600, 900)).unwrap();
            assert_eq!(ctx.integrator().mu, MU_SUN);

            let mut ctx = context();
            ctx.apply_options(&options);
            assert_eq!(ctx.integrator().mu, MU_SUN);
        }

        let mut options = Options::default();
        options.simulation.gravitational_parameter = 3.986e14;
        assert_eq!(integrator_from(&options).mu, 3.986e14);
    }

    #[test]
    fn unknown_selection_is_cleared() {
        let mut ctx = context();
        ctx.select(Some(BodyId(99)));
        assert_eq!(ctx.selection(), None);
    }

    #[test]
    fn zero_resize_keeps_viewport() {
        let mut ctx = context();
        assert!(!ctx.resize(0, 400));
        assert_eq!(ctx.viewport(), (1600, 900));
        assert!(ctx.resize(800, 400));
        assert_eq!(ctx.camera().camera().aspect, 2.0);
    }

    #[test]
    fn degenerate_body_is_contained_during_advance() {
        let mut ctx = context();
        ctx.bodies_mut().set_state(
            BodyId(0),
            crate::physics::StateVector::new(
                glam::DVec3::ZERO,
                glam::DVec3::new(1.0, 0.0, 0.0),
            ),
        );
        let _ = ctx.advance(0.016);
        assert!(ctx.bodies().get(BodyId(0)).unwrap().is_degenerate());
        assert!(ctx.bodies().iter().all(|b| b.state().is_finite()));
    }
}

//! The frame loop and everything it owns: simulation context, render
//! handoff, and snapshot publishing.

mod context;
mod input;
mod options;
mod render;
mod snapshot;

pub use context::SimulationContext;
pub use render::{CameraPose, FrameReport, PrimitiveId, RenderBackend};
pub use snapshot::SnapshotReader;

use self::snapshot::SnapshotPublisher;
use crate::bodies::catalog::color_to_rgb;
use crate::error::OrreryError;
use crate::input::{InputPort, InputProcessor};
use crate::options::Options;
use crate::util::frame_timing::FrameTiming;

/// Frame pacing target for [`SimulationScheduler::frame`].
const TARGET_FPS: u32 = 60;

/// Drives the frame loop.
///
/// # Frame step
///
/// Each [`frame`](Self::frame) runs to completion on the calling thread:
///
/// 1. drain queued input and fold it into one frame's worth
///    (resize, key actions, pointer gesture)
/// 2. if playing, advance every orbit by wall-clock delta × time-scale,
///    then every body's spin
/// 3. apply the pointer gesture to the camera and, for a click, pick
///    (both run while paused)
/// 4. advance any camera fly-to
/// 5. push transforms and camera pose to the [`RenderBackend`] and draw
/// 6. publish the [`FrameReport`] for [`SnapshotReader`]s
///
/// # Teardown
///
/// [`shutdown`](Self::shutdown) (also run on drop) stops further frames
/// and deregisters every input listener.
pub struct SimulationScheduler<B: RenderBackend> {
    context: SimulationContext,
    backend: B,
    /// Primitive per body, indexed by body id.
    primitives: Vec<PrimitiveId>,
    central_primitive: PrimitiveId,
    port: InputPort,
    processor: InputProcessor,
    timing: FrameTiming,
    publisher: SnapshotPublisher,
    reader: Option<SnapshotReader>,
    options: Options,
    frame: u64,
    running: bool,
}

impl<B: RenderBackend> SimulationScheduler<B> {
    /// Build the default inner solar system and attach it to `backend`.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::MissingSurface`] if the backend has no
    /// drawable surface, or [`OrreryError::InvalidBody`] if the body
    /// catalog fails validation.
    pub fn start(backend: B, mut options: Options) -> Result<Self, OrreryError> {
        let Some(viewport) =
            backend.surface_size().filter(|&(w, h)| w > 0 && h > 0)
        else {
            log::error!("no render surface available, simulation not started");
            return Err(OrreryError::MissingSurface);
        };
        options.keybindings.rebuild_reverse_map();
        let context = SimulationContext::new(&options, viewport)?;
        Ok(Self::with_context(backend, context, options))
    }

    /// Attach an existing context to `backend`.
    #[must_use]
    pub fn with_context(
        mut backend: B,
        context: SimulationContext,
        options: Options,
    ) -> Self {
        let central = context.bodies().central();
        let central_primitive = backend.create_body_primitive(
            central.visual_radius,
            color_to_rgb(central.color),
        );
        let primitives = context
            .bodies()
            .iter()
            .map(|body| backend.create_body_primitive(body.visual_radius, body.color))
            .collect();
        let (publisher, reader) = SnapshotPublisher::new();

        log::info!(
            "simulation started: {} bodies, viewport {}x{}",
            context.bodies().len(),
            context.viewport().0,
            context.viewport().1
        );
        Self {
            context,
            backend,
            primitives,
            central_primitive,
            port: InputPort::new(),
            processor: InputProcessor::new(),
            timing: FrameTiming::new(TARGET_FPS),
            publisher,
            reader: Some(reader),
            options,
            frame: 0,
            running: true,
        }
    }

    /// Run one frame using the wall-clock time since the previous frame.
    /// Returns `None` once shut down.
    pub fn frame(&mut self) -> Option<FrameReport> {
        if !self.running {
            return None;
        }
        let wall_dt = self.timing.tick();
        self.frame_with_delta(wall_dt)
    }

    /// Run one frame with an explicit wall-clock delta in seconds. A
    /// non-finite or negative delta leaves orbits untouched for the frame.
    pub fn frame_with_delta(&mut self, wall_dt: f64) -> Option<FrameReport> {
        if !self.running {
            log::trace!("frame requested after shutdown");
            return None;
        }

        let input = self.collect_input();
        if let Some((width, height)) = input.resize {
            self.apply_resize(width, height);
        }
        for action in input.actions {
            self.apply_key_action(action);
        }

        let scaled_dt = self.context.advance(wall_dt);

        self.context.apply_gesture(input.gesture);
        let _ = self.context.camera_mut().update();

        self.frame += 1;
        let report = self.build_report(scaled_dt);
        self.render(&report);
        self.publisher.publish(report.clone());
        Some(report)
    }

    /// Stop future frames and deregister all input listeners. Idempotent.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.port.close();
        log::info!("simulation stopped after {} frames", self.frame);
    }

    /// Whether frames still run.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Simulation state.
    #[must_use]
    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    /// Render backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable render backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Frames run so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Smoothed frames per second over [`frame`](Self::frame) calls.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// Frame pacing helper for hosts without their own vsync.
    #[must_use]
    pub fn frame_timing(&self) -> &FrameTiming {
        &self.timing
    }

    /// Primitive drawn at the origin for the central body.
    #[must_use]
    pub fn central_primitive(&self) -> PrimitiveId {
        self.central_primitive
    }

    /// Take the snapshot reader. Only one exists; later calls return
    /// `None`.
    pub fn snapshot_reader(&mut self) -> Option<SnapshotReader> {
        self.reader.take()
    }

    /// Set the time scale. See [`SimulationContext::set_time_scale`].
    pub fn set_time_scale(&mut self, time_scale: f64) -> bool {
        self.context.set_time_scale(time_scale)
    }

    /// Play or pause orbital motion.
    pub fn set_playing(&mut self, playing: bool) {
        self.context.set_playing(playing);
    }

    fn build_report(&self, scaled_dt: f64) -> FrameReport {
        let camera = self.context.camera();
        FrameReport {
            frame: self.frame,
            sim_time: self.context.sim_time(),
            scaled_dt,
            playing: self.context.is_playing(),
            time_scale: self.context.time_scale(),
            transforms: self.context.bodies().transforms(),
            camera: CameraPose::new(camera.camera(), camera.is_transitioning()),
            selection: self.context.selection(),
        }
    }

    fn render(&mut self, report: &FrameReport) {
        for transform in &report.transforms {
            if let Some(&primitive) = self.primitives.get(transform.id.0 as usize) {
                self.backend.set_transform(primitive, transform);
            }
        }
        self.backend.set_camera(&report.camera);
        self.backend.draw();
    }
}

impl<B: RenderBackend> Drop for SimulationScheduler<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<B: RenderBackend> std::fmt::Debug for SimulationScheduler<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationScheduler")
            .field("frame", &self.frame)
            .field("running", &self.running)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

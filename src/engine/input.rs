//! Input methods for SimulationScheduler

use super::render::RenderBackend;
use super::SimulationScheduler;
use crate::input::{FrameInput, InputPort, InputRegistration, KeyAction};
use crate::options::{MAX_TIME_SCALE, MIN_TIME_SCALE};

impl<B: RenderBackend> SimulationScheduler<B> {
    /// Port hosts push input through.
    #[must_use]
    pub fn input_port(&self) -> &InputPort {
        &self.port
    }

    /// Register an input listener. Dropping the registration, or shutting
    /// the scheduler down, deregisters it.
    #[must_use]
    pub fn register_input(&self) -> InputRegistration {
        self.port.register()
    }

    /// Apply a key action immediately.
    pub fn apply_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::TogglePlayback => {
                let playing = !self.context.is_playing();
                self.context.set_playing(playing);
                log::info!("{}", if playing { "playing" } else { "paused" });
            }
            KeyAction::ClearSelection => self.context.select(None),
            KeyAction::ResetCamera => self.context.camera_mut().reset(),
            KeyAction::FasterTime => self.rescale_time(2.0),
            KeyAction::SlowerTime => self.rescale_time(0.5),
        }
    }

    /// Fold everything queued on the port into this frame's input.
    pub(crate) fn collect_input(&mut self) -> FrameInput {
        for event in self.port.drain() {
            self.processor.handle_event(event);
        }
        self.processor.take_frame()
    }

    /// Resize the viewport, camera projection, and backend together.
    pub(crate) fn apply_resize(&mut self, width: u32, height: u32) {
        if self.context.resize(width, height) {
            self.backend.resize(width, height);
        }
    }

    fn rescale_time(&mut self, factor: f64) {
        let scaled =
            (self.context.time_scale() * factor).clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
        if self.context.set_time_scale(scaled) {
            log::info!("time scale {scaled:.0}x");
        }
    }
}

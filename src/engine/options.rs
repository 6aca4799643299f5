//! Options methods for SimulationScheduler

use super::render::RenderBackend;
use super::SimulationScheduler;
use crate::input::KeyAction;
use crate::options::Options;

impl<B: RenderBackend> SimulationScheduler<B> {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and apply them to the running simulation.
    ///
    /// Integrator, camera, playback and time-scale settings take effect on
    /// the next frame. The distance scale is fixed when the body registry
    /// is built and is not re-applied.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to the simulation context.
    pub fn apply_options(&mut self) {
        self.options.keybindings.rebuild_reverse_map();
        self.context.apply_options(&self.options);
    }

    /// Action bound to a physical key string (e.g. `"Space"`).
    #[must_use]
    pub fn lookup_key(&self, key: &str) -> Option<KeyAction> {
        self.options.keybindings.lookup(key)
    }
}

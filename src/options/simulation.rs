use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::physics::constants::{DEFAULT_MIN_RADIUS, MU_SUN};

/// Smallest time-scale the UI offers.
pub const MIN_TIME_SCALE: f64 = 1.0e3;
/// Largest time-scale the UI offers.
pub const MAX_TIME_SCALE: f64 = 1.0e6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Simulation", inline)]
#[serde(default)]
/// Physics and playback parameters.
pub struct SimulationOptions {
    /// Simulated seconds per wall-clock second.
    #[schemars(title = "Time Scale", range(min = 1000.0, max = 1000000.0), extend("step" = 1000.0))]
    pub time_scale: f64,
    /// Whether orbits advance at startup.
    #[schemars(title = "Playing")]
    pub playing: bool,
    /// Gravitational parameter of the central body (m³/s²).
    #[schemars(skip)]
    pub gravitational_parameter: f64,
    /// Meters per render unit.
    #[schemars(skip)]
    pub distance_scale: f64,
    /// Largest integration step in simulated seconds; 0 takes one
    /// variable-size step per frame.
    #[schemars(title = "Max Sub-step (s)", range(min = 0.0, max = 86400.0), extend("step" = 600.0))]
    pub max_substep_seconds: f64,
    /// Radius below which a body's state is clamped and flagged (m).
    #[schemars(skip)]
    pub min_radius_m: f64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            time_scale: 1.0e5,
            playing: true,
            gravitational_parameter: MU_SUN,
            distance_scale: 1.0e9,
            max_substep_seconds: 0.0,
            min_radius_m: DEFAULT_MIN_RADIUS,
        }
    }
}

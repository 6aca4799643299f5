//! Kick-drift-kick (velocity-Verlet) integration under central gravity.
//!
//! The step is symplectic, so specific orbital energy oscillates within a
//! bound instead of drifting the way explicit Euler does, even when one
//! wall-clock frame covers hours of simulated time.

use std::f64::consts::TAU;

use glam::DVec3;

use super::constants::DEFAULT_MIN_RADIUS;

/// Upper bound on sub-steps taken for a single frame.
const MAX_SUBSTEPS: u32 = 10_000;

/// Position (m) and velocity (m/s) of a body at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StateVector {
    /// Position relative to the central body, meters.
    pub position: DVec3,
    /// Velocity relative to the central body, meters per second.
    pub velocity: DVec3,
}

impl StateVector {
    /// Build a state vector from position and velocity.
    #[must_use]
    pub const fn new(position: DVec3, velocity: DVec3) -> Self {
        Self { position, velocity }
    }

    /// Build from a flat `[rx, ry, rz, vx, vy, vz]` array.
    #[must_use]
    pub const fn from_array(y: [f64; 6]) -> Self {
        Self {
            position: DVec3::new(y[0], y[1], y[2]),
            velocity: DVec3::new(y[3], y[4], y[5]),
        }
    }

    /// Distance from the central body.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.position.length()
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Result of advancing a state vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// The advanced state. Always finite with a strictly positive radius.
    pub state: StateVector,
    /// Set when the radius had to be clamped (or a non-finite value was
    /// discarded) during the step.
    pub degenerate: bool,
}

/// Inverse-square acceleration toward the origin: `-(μ / |r|³) · r`.
///
/// The caller is responsible for keeping `r` away from zero; see
/// [`step`] for the clamped version used by the simulation.
#[must_use]
pub fn acceleration(r: DVec3, mu: f64) -> DVec3 {
    let r_sq = r.length_squared();
    let r_len = r_sq.sqrt();
    r * (-mu / (r_sq * r_len))
}

/// Push `r` out to `min_radius` along its own direction if it is too close
/// to the origin. Zero or non-finite input falls back to the +X axis.
fn clamp_radius(r: DVec3, min_radius: f64) -> (DVec3, bool) {
    let len = r.length();
    if len.is_finite() && len >= min_radius {
        return (r, false);
    }
    let dir = r.try_normalize().unwrap_or(DVec3::X);
    (dir * min_radius, true)
}

/// Advance `state` by `dt` seconds under gravitational parameter `mu`.
///
/// Pure and deterministic: identical arguments always give bit-identical
/// output. Uses [`DEFAULT_MIN_RADIUS`] as the degenerate threshold.
#[must_use]
pub fn step(state: &StateVector, dt: f64, mu: f64) -> Step {
    step_with_min_radius(state, dt, mu, DEFAULT_MIN_RADIUS)
}

/// [`step`] with an explicit degenerate-radius threshold.
///
/// A non-finite `dt` is a caller error; the state is returned unchanged.
#[must_use]
pub fn step_with_min_radius(
    state: &StateVector,
    dt: f64,
    mu: f64,
    min_radius: f64,
) -> Step {
    if !dt.is_finite() {
        return Step {
            state: *state,
            degenerate: false,
        };
    }

    let (r0, clamped_start) = clamp_radius(state.position, min_radius);
    let v0 = if state.velocity.is_finite() {
        state.velocity
    } else {
        DVec3::ZERO
    };

    let a0 = acceleration(r0, mu);
    let v_half = v0 + a0 * (0.5 * dt);
    let (r1, clamped_end) = clamp_radius(r0 + v_half * dt, min_radius);
    let a1 = acceleration(r1, mu);
    let v1 = v_half + a1 * (0.5 * dt);

    let velocity_ok = v1.is_finite() && state.velocity.is_finite();
    Step {
        state: StateVector {
            position: r1,
            velocity: if v1.is_finite() { v1 } else { DVec3::ZERO },
        },
        degenerate: clamped_start || clamped_end || !velocity_ok,
    }
}

/// Specific orbital energy `|v|²/2 - μ/|r|` (J/kg).
#[must_use]
pub fn specific_energy(state: &StateVector, mu: f64) -> f64 {
    0.5 * state.velocity.length_squared() - mu / state.radius()
}

/// Keplerian period of the orbit through `state`, or `None` when the orbit
/// is unbound (non-negative energy).
#[must_use]
pub fn orbital_period(state: &StateVector, mu: f64) -> Option<f64> {
    let energy = specific_energy(state, mu);
    if !energy.is_finite() || energy >= 0.0 {
        return None;
    }
    let semi_major = -mu / (2.0 * energy);
    Some(TAU * (semi_major.powi(3) / mu).sqrt())
}

/// Integrator configuration shared by every body in a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitIntegrator {
    /// Gravitational parameter of the central body (m³/s²).
    pub mu: f64,
    /// Degenerate-radius threshold (m).
    pub min_radius: f64,
    /// Largest single step (s). `None` takes one step per call.
    pub max_substep: Option<f64>,
}

impl OrbitIntegrator {
    /// One variable-size step per call, default degenerate threshold.
    #[must_use]
    pub const fn new(mu: f64) -> Self {
        Self {
            mu,
            min_radius: DEFAULT_MIN_RADIUS,
            max_substep: None,
        }
    }

    /// Split each call into equal steps no longer than `max_substep`.
    /// Non-positive or non-finite values disable sub-stepping.
    #[must_use]
    pub fn with_max_substep(mut self, max_substep: f64) -> Self {
        self.max_substep =
            (max_substep.is_finite() && max_substep > 0.0).then_some(max_substep);
        self
    }

    /// Override the degenerate-radius threshold. Non-positive or
    /// non-finite values keep the default.
    #[must_use]
    pub fn with_min_radius(mut self, min_radius: f64) -> Self {
        self.min_radius = if min_radius.is_finite() && min_radius > 0.0 {
            min_radius
        } else {
            log::warn!("invalid minimum radius {min_radius}, using {DEFAULT_MIN_RADIUS}");
            DEFAULT_MIN_RADIUS
        };
        self
    }

    /// Number of equal steps used to cover `dt`.
    #[must_use]
    pub fn substeps(&self, dt: f64) -> u32 {
        match self.max_substep {
            Some(max) if dt.is_finite() && dt.abs() > max => {
                let n = (dt.abs() / max).ceil();
                if n >= f64::from(MAX_SUBSTEPS) {
                    MAX_SUBSTEPS
                } else {
                    n as u32
                }
            }
            _ => 1,
        }
    }

    /// Advance `state` by `dt`, sub-stepping if configured.
    #[must_use]
    pub fn advance(&self, state: &StateVector, dt: f64) -> Step {
        let n = self.substeps(dt);
        let h = dt / f64::from(n);
        let mut current = Step {
            state: *state,
            degenerate: false,
        };
        for _ in 0..n {
            let next =
                step_with_min_radius(&current.state, h, self.mu, self.min_radius);
            current = Step {
                state: next.state,
                degenerate: current.degenerate || next.degenerate,
            };
        }
        current
    }
}

//! Central-body orbital dynamics.
//!
//! Bodies move under inverse-square acceleration toward a single central
//! mass at the origin. Everything here is pure `f64` math in SI units;
//! render-space scaling happens in [`crate::bodies`].

/// Physical constants shared by the catalog and the integrator.
pub mod constants;
/// Velocity-Verlet stepping and orbital diagnostics.
pub mod integrator;

pub use integrator::{
    acceleration, orbital_period, specific_energy, step, OrbitIntegrator,
    StateVector, Step,
};

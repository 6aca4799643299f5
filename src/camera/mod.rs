//! Camera system for viewing the orrery.
//!
//! Provides a perspective camera, an orbit controller driven by drag and
//! wheel input, and smooth fly-to transitions toward picked bodies.

/// Free-orbit / fly-to state machine.
pub mod controller;
/// Core camera struct and screen/world conversions.
pub mod core;

pub use controller::{CameraController, CameraState, FlyTo, OrbitAngles};
pub use core::Camera;

//! Simulated bodies: the catalog they are created from and the registry
//! that owns their state for the lifetime of a session.

/// Built-in body catalog.
pub mod catalog;
mod registry;

pub use catalog::{BodySpec, CentralBody};
pub use registry::{
    Body, BodyId, BodyRegistry, BodyTransform, DEFAULT_DISTANCE_SCALE,
};

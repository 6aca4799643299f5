// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive inner-solar-system simulation core.
//!
//! Orrery advances planets around a central mass with a symplectic
//! integrator, drives an orbit camera that can fly to a clicked body, and
//! hands per-frame transforms to a pluggable renderer.
//!
//! # Key entry points
//!
//! - [`engine::SimulationScheduler`] - the frame loop
//! - [`engine::RenderBackend`] - the seam a renderer implements
//! - [`bodies::BodyRegistry`] - simulated bodies and their state
//! - [`camera::CameraController`] - free orbit and fly-to state machine
//! - [`options::Options`] - runtime configuration (simulation, camera,
//!   keybindings)
//!
//! # Architecture
//!
//! All per-frame work runs on the caller's thread inside
//! [`engine::SimulationScheduler::frame`]. Hosts push input from any thread
//! through an [`input::InputRegistration`]; queued events are folded into
//! one gesture per frame. Each frame's [`engine::FrameReport`] is published
//! through a lock-free triple buffer so another thread can read a
//! consistent post-frame snapshot.

pub mod assistant;
pub mod bodies;
pub mod camera;
pub mod engine;
pub mod error;
pub mod input;
pub mod options;
pub mod physics;
pub mod picking;
pub mod util;

pub use engine::{FrameReport, RenderBackend, SimulationScheduler};
pub use error::OrreryError;
pub use options::Options;

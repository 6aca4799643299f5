//! Shared utilities for the frame loop.

/// Wall-clock frame deltas and FPS smoothing.
pub mod frame_timing;

/// Gravitational parameter of the Sun (m³/s²).
pub const MU_SUN: f64 = 1.327_124_400_18e20;

/// One astronomical unit in meters.
pub const AU_TO_M: f64 = 149_597_870_700.0;

/// Seconds per day.
pub const DAY_TO_S: f64 = 86_400.0;

/// Radius below which a state is treated as degenerate (meters).
///
/// Well inside the Sun's photosphere, so no physical orbit gets here.
pub const DEFAULT_MIN_RADIUS: f64 = 1.0e6;

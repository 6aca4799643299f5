//! Built-in body catalog: the Sun and the four inner planets.

use crate::physics::constants::DAY_TO_S;
use crate::physics::StateVector;

/// Static description of a body, before it enters a registry.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    /// Display name (English).
    pub name: String,
    /// Localized display name.
    pub local_name: String,
    /// Visual radius in render units. Also the picking sphere radius.
    pub visual_radius: f32,
    /// Packed `0xRRGGBB` display color.
    pub color: u32,
    /// Seconds for one self-revolution; negative means retrograde spin.
    /// Zero disables rotation.
    pub rotation_period: f64,
    /// Initial heliocentric state.
    pub initial_state: StateVector,
    /// Short descriptive text for the info panel and assistant context.
    pub description: String,
}

/// The central mass. Rendered at the origin, never integrated.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralBody {
    /// Display name.
    pub name: String,
    /// Visual radius in render units.
    pub visual_radius: f32,
    /// Packed `0xRRGGBB` display color.
    pub color: u32,
}

impl Default for CentralBody {
    fn default() -> Self {
        Self {
            name: "Sun".into(),
            visual_radius: 5.0,
            color: 0x00ff_cc00,
        }
    }
}

fn planet(
    name: &str,
    local_name: &str,
    color: u32,
    visual_radius: f32,
    state: [f64; 6],
    rotation_days: f64,
    description: &str,
) -> BodySpec {
    BodySpec {
        name: name.to_owned(),
        local_name: local_name.to_owned(),
        visual_radius,
        color,
        rotation_period: rotation_days * DAY_TO_S,
        initial_state: StateVector::from_array(state),
        description: description.to_owned(),
    }
}

/// Mercury, Venus, Earth and Mars with literal initial state vectors.
#[must_use]
pub fn inner_planets() -> Vec<BodySpec> {
    vec![
        planet(
            "Mercury",
            "수성",
            0x008c_7853,
            0.8,
            [
                4.91225e10, -3.95155e10, -7.02633e9, 3.48316e4, 4.09539e4,
                2.76008e3,
            ],
            58.6,
            "The planet closest to the Sun; its surface temperature swings \
             to extremes between day and night.",
        ),
        planet(
            "Venus",
            "금성",
            0x00ff_c649,
            1.2,
            [
                -3.49841e10, -9.62386e10, -2.57004e9, 3.27914e4, -1.18944e4,
                -1.97059e3,
            ],
            -243.0,
            "The hottest planet in the solar system, wrapped in a thick \
             atmosphere.",
        ),
        planet(
            "Earth",
            "지구",
            0x004a_90e2,
            1.3,
            [
                -1.13988e11, -9.00639e10, 1.83944e6, 2.14668e4, -2.69850e4,
                -3.99201e-1,
            ],
            1.0,
            "The blue planet we live on and the only one known to host life.",
        ),
        planet(
            "Mars",
            "화성",
            0x00e2_7b58,
            0.9,
            [
                -3.05355e11, 8.44825e10, -6.64901e9, -5.98991e3, -2.00030e4,
                -4.51061e2,
            ],
            1.026,
            "The red planet, a leading candidate for future human settlement.",
        ),
    ]
}

/// Unpack `0xRRGGBB` into linear-ish `[r, g, b]` in `0.0..=1.0`.
#[must_use]
pub fn color_to_rgb(color: u32) -> [f32; 3] {
    let r = (color >> 16) & 0xff;
    let g = (color >> 8) & 0xff;
    let b = color & 0xff;
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_four_planets_in_order() {
        let names: Vec<_> =
            inner_planets().into_iter().map(|b| b.name).collect();
        assert_eq!(names, ["Mercury", "Venus", "Earth", "Mars"]);
    }

    #[test]
    fn venus_spins_retrograde() {
        let venus = &inner_planets()[1];
        assert!(venus.rotation_period < 0.0);
        assert_eq!(venus.rotation_period, -243.0 * DAY_TO_S);
    }

    #[test]
    fn color_unpacks_channels() {
        assert_eq!(color_to_rgb(0x00ff_0000), [1.0, 0.0, 0.0]);
        assert_eq!(color_to_rgb(0x0000_00ff), [0.0, 0.0, 1.0]);
    }
}

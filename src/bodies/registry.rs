use std::f64::consts::TAU;
use std::fmt;

use glam::{DVec3, Vec3};
use rustc_hash::FxHashMap;

use super::catalog::{color_to_rgb, inner_planets, BodySpec, CentralBody};
use crate::error::OrreryError;
use crate::physics::{OrbitIntegrator, StateVector};

/// Stable body identifier. Ids are dense and assigned in catalog order,
/// which is also the registry's iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// A simulated body: static parameters plus mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Identifier.
    pub id: BodyId,
    /// English display name.
    pub name: String,
    /// Localized display name.
    pub local_name: String,
    /// Visual (and picking) radius in render units.
    pub visual_radius: f32,
    /// Display color, `[r, g, b]` in `0.0..=1.0`.
    pub color: [f32; 3],
    /// Seconds per self-revolution; sign encodes spin direction.
    pub rotation_period: f64,
    /// Descriptive text.
    pub description: String,
    state: StateVector,
    rotation_angle: f64,
    degenerate: bool,
}

impl Body {
    /// Current heliocentric state.
    #[must_use]
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Self-rotation angle in `[0, 2π)`.
    #[must_use]
    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    /// Whether the last integration step had to clamp this body's state.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}

/// Per-body render transform, pushed to the render backend once a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransform {
    /// Which body.
    pub id: BodyId,
    /// Render-space position.
    pub position: Vec3,
    /// Rotation about the render-space Y axis, radians.
    pub rotation_y: f32,
    /// Degenerate flag carried through for diagnostics overlays.
    pub degenerate: bool,
}

/// Owns every simulated body and its current state.
///
/// Physics uses SI units; [`to_render_space`](Self::to_render_space)
/// divides by a fixed distance scale and swaps the Y/Z axes so the
/// ecliptic lies in the render XZ plane.
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    by_name: FxHashMap<String, BodyId>,
    central: CentralBody,
    distance_scale: f64,
}

impl BodyRegistry {
    /// Build a registry from body specs. Ids follow `specs` order.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::InvalidBody`] if a spec has a non-finite or
    /// zero-radius initial state, a non-positive visual radius, a
    /// non-finite rotation period, or a duplicate name.
    pub fn new(
        specs: Vec<BodySpec>,
        central: CentralBody,
        distance_scale: f64,
    ) -> Result<Self, OrreryError> {
        let mut bodies = Vec::with_capacity(specs.len());
        let mut by_name = FxHashMap::default();

        for (i, spec) in specs.into_iter().enumerate() {
            validate(&spec)?;
            let id = BodyId(i as u32);
            if by_name.insert(spec.name.clone(), id).is_some() {
                return Err(OrreryError::InvalidBody(format!(
                    "duplicate body name {:?}",
                    spec.name
                )));
            }
            bodies.push(Body {
                id,
                name: spec.name,
                local_name: spec.local_name,
                visual_radius: spec.visual_radius,
                color: color_to_rgb(spec.color),
                rotation_period: spec.rotation_period,
                description: spec.description,
                state: spec.initial_state,
                rotation_angle: 0.0,
                degenerate: false,
            });
        }

        let distance_scale = if distance_scale.is_finite() && distance_scale > 0.0
        {
            distance_scale
        } else {
            log::warn!(
                "invalid distance scale {distance_scale}, using {DEFAULT_DISTANCE_SCALE}"
            );
            DEFAULT_DISTANCE_SCALE
        };

        log::debug!("body registry: {} bodies", bodies.len());
        Ok(Self {
            bodies,
            by_name,
            central,
            distance_scale,
        })
    }

    /// Registry populated from the built-in inner-planet catalog.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn from_catalog(distance_scale: f64) -> Result<Self, OrreryError> {
        Self::new(inner_planets(), CentralBody::default(), distance_scale)
    }

    /// Number of simulated bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the registry holds no simulated bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Bodies in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Look up a body by id.
    #[must_use]
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0 as usize)
    }

    /// Look up a body by its English name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Body> {
        self.by_name.get(name).and_then(|&id| self.get(id))
    }

    /// The non-simulated central body.
    #[must_use]
    pub fn central(&self) -> &CentralBody {
        &self.central
    }

    /// Physical-to-render distance divisor.
    #[must_use]
    pub fn distance_scale(&self) -> f64 {
        self.distance_scale
    }

    /// Advance every body's state vector by `dt` seconds.
    ///
    /// Each body is stepped independently; a degenerate body is clamped,
    /// flagged and logged once, and never stops the others from updating.
    /// Returns the number of bodies that are degenerate after the step.
    pub fn step_orbits(&mut self, integrator: &OrbitIntegrator, dt: f64) -> usize {
        let mut degenerate = 0;
        for body in &mut self.bodies {
            let step = integrator.advance(&body.state, dt);
            if step.degenerate && !body.degenerate {
                log::warn!(
                    "{} ({}) reached a degenerate state; clamped to r = {:.3e} m",
                    body.name,
                    body.id,
                    step.state.radius()
                );
            }
            body.state = step.state;
            body.degenerate = step.degenerate;
            if step.degenerate {
                degenerate += 1;
            }
        }
        degenerate
    }

    /// Advance each body's self-rotation by `(2π / period) · dt`.
    pub fn advance_rotation(&mut self, dt: f64) {
        if !dt.is_finite() {
            return;
        }
        for body in &mut self.bodies {
            if body.rotation_period == 0.0 {
                continue;
            }
            let delta = TAU / body.rotation_period * dt;
            body.rotation_angle = (body.rotation_angle + delta).rem_euclid(TAU);
        }
    }

    /// Map a physical position (m) into render space.
    #[must_use]
    pub fn to_render_space(&self, p: DVec3) -> Vec3 {
        let s = p / self.distance_scale;
        Vec3::new(s.x as f32, s.z as f32, s.y as f32)
    }

    /// Render-space position of a body.
    #[must_use]
    pub fn render_position(&self, id: BodyId) -> Option<Vec3> {
        self.get(id).map(|b| self.to_render_space(b.state.position))
    }

    /// Render transforms for every body, in id order.
    #[must_use]
    pub fn transforms(&self) -> Vec<BodyTransform> {
        self.bodies
            .iter()
            .map(|b| BodyTransform {
                id: b.id,
                position: self.to_render_space(b.state.position),
                rotation_y: b.rotation_angle as f32,
                degenerate: b.degenerate,
            })
            .collect()
    }

    /// Overwrite a body's state. Used by tests and scenario setup.
    pub(crate) fn set_state(&mut self, id: BodyId, state: StateVector) {
        if let Some(body) = self.bodies.get_mut(id.0 as usize) {
            body.state = state;
        }
    }
}

/// Default physical-to-render distance divisor (1 render unit = 10⁹ m).
pub const DEFAULT_DISTANCE_SCALE: f64 = 1.0e9;

fn validate(spec: &BodySpec) -> Result<(), OrreryError> {
    let fail = |why: &str| {
        Err(OrreryError::InvalidBody(format!("{}: {why}", spec.name)))
    };
    if !spec.initial_state.is_finite() {
        return fail("non-finite initial state");
    }
    if spec.initial_state.radius() <= 0.0 {
        return fail("initial position at the origin");
    }
    if !(spec.visual_radius.is_finite() && spec.visual_radius > 0.0) {
        return fail("visual radius must be positive");
    }
    if !spec.rotation_period.is_finite() {
        return fail("non-finite rotation period");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::constants::{DAY_TO_S, MU_SUN};

    fn registry() -> BodyRegistry {
        BodyRegistry::from_catalog(DEFAULT_DISTANCE_SCALE).unwrap()
    }

    #[test]
    fn ids_follow_catalog_order() {
        let reg = registry();
        let ids: Vec<_> = reg.iter().map(|b| b.id.0).collect();
        assert_eq!(ids, [0, 1, 2, 3]);
        assert_eq!(reg.find("Earth").unwrap().id, BodyId(2));
        assert!(reg.find("Pluto").is_none());
    }

    #[test]
    fn render_space_swaps_y_and_z() {
        let reg = registry();
        let p = reg.to_render_space(DVec3::new(1.0e9, 2.0e9, 3.0e9));
        assert_eq!(p, Vec3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn quarter_day_turns_earth_a_quarter() {
        let mut reg = registry();
        reg.advance_rotation(DAY_TO_S * 0.25);
        let earth = reg.find("Earth").unwrap();
        assert!((earth.rotation_angle() - TAU * 0.25).abs() < 1e-9);
    }

    #[test]
    fn retrograde_rotation_wraps_into_range() {
        let mut reg = registry();
        reg.advance_rotation(DAY_TO_S);
        let venus = reg.find("Venus").unwrap();
        let expected = (-TAU / 243.0).rem_euclid(TAU);
        assert!((venus.rotation_angle() - expected).abs() < 1e-9);
        assert!(venus.rotation_angle() >= 0.0 && venus.rotation_angle() < TAU);
    }

    #[test]
    fn degenerate_body_does_not_stop_others() {
        let mut reg = registry();
        reg.set_state(
            BodyId(0),
            StateVector::new(DVec3::ZERO, DVec3::new(0.0, 1.0, 0.0)),
        );
        let earth_before = *reg.find("Earth").unwrap().state();

        let integrator = OrbitIntegrator::new(MU_SUN);
        let degenerate = reg.step_orbits(&integrator, 3600.0);

        assert_eq!(degenerate, 1);
        let mercury = reg.get(BodyId(0)).unwrap();
        assert!(mercury.is_degenerate());
        assert!(mercury.state().is_finite());
        let earth = reg.find("Earth").unwrap();
        assert!(!earth.is_degenerate());
        assert_ne!(*earth.state(), earth_before);
    }

    #[test]
    fn rejects_zero_initial_position() {
        let mut specs = inner_planets();
        specs[2].initial_state.position = DVec3::ZERO;
        let err = BodyRegistry::new(specs, CentralBody::default(), 1.0e9)
            .unwrap_err();
        assert!(matches!(err, OrreryError::InvalidBody(_)));
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut specs = inner_planets();
        specs[1].name = "Mercury".into();
        assert!(BodyRegistry::new(specs, CentralBody::default(), 1.0e9).is_err());
    }

    #[test]
    fn invalid_distance_scale_falls_back() {
        let reg =
            BodyRegistry::new(inner_planets(), CentralBody::default(), 0.0)
                .unwrap();
        assert_eq!(reg.distance_scale(), DEFAULT_DISTANCE_SCALE);
    }
}

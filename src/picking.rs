//! CPU ray picking against body bounding spheres.
//!
//! A pointer position is unprojected through the camera into a render-space
//! ray, which is tested against every body's sphere (center = current
//! render position, radius = visual radius). The nearest hit along the ray
//! wins. Equal distances resolve to the lowest body id, since bodies are
//! visited in id order and only a strictly nearer hit replaces the current
//! one.

use glam::{Vec2, Vec3};

use crate::bodies::{BodyId, BodyRegistry};
use crate::camera::Camera;

/// A successful pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// The body hit.
    pub id: BodyId,
    /// Distance along the ray to the sphere surface.
    pub distance: f32,
}

/// Maps pointer coordinates to bodies.
#[derive(Debug, Default, Clone, Copy)]
pub struct PickingService;

impl PickingService {
    /// Create a picking service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Body under `pointer` (viewport pixels, origin top-left), if any.
    /// A miss is not an error; callers treat it as "clear selection".
    #[must_use]
    pub fn pick(
        &self,
        pointer: Vec2,
        viewport: Vec2,
        camera: &Camera,
        bodies: &BodyRegistry,
    ) -> Option<BodyId> {
        self.pick_hit(pointer, viewport, camera, bodies).map(|hit| hit.id)
    }

    /// Like [`pick`](Self::pick), also reporting the hit distance.
    #[must_use]
    pub fn pick_hit(
        &self,
        pointer: Vec2,
        viewport: Vec2,
        camera: &Camera,
        bodies: &BodyRegistry,
    ) -> Option<PickHit> {
        if !pointer.is_finite() || !(viewport.x > 0.0 && viewport.y > 0.0) {
            log::debug!("pick skipped: pointer {pointer:?}, viewport {viewport:?}");
            return None;
        }
        let (origin, dir) = camera.screen_to_ray(pointer, viewport);
        if !origin.is_finite() || dir == Vec3::ZERO {
            return None;
        }
        let hit = self.ray_pick(origin, dir, bodies);
        if let Some(hit) = hit {
            log::debug!("pick hit {} at {:.2}", hit.id, hit.distance);
        }
        hit
    }

    /// Nearest body whose bounding sphere the ray enters.
    #[must_use]
    pub fn ray_pick(
        &self,
        origin: Vec3,
        dir: Vec3,
        bodies: &BodyRegistry,
    ) -> Option<PickHit> {
        let mut closest: Option<PickHit> = None;
        for body in bodies.iter() {
            let center = bodies.to_render_space(body.state().position);
            let Some(t) =
                ray_sphere_intersect(origin, dir, center, body.visual_radius)
            else {
                continue;
            };
            if closest.is_none_or(|c| t < c.distance) {
                closest = Some(PickHit {
                    id: body.id,
                    distance: t,
                });
            }
        }
        closest
    }
}

/// Ray-sphere intersection test.
///
/// Returns the distance along the ray to the first intersection in front of
/// the origin (the exit point when the origin is inside the sphere), or
/// `None` on a miss.
#[must_use]
pub fn ray_sphere_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let oc = ray_origin - center;
    let a = ray_dir.dot(ray_dir);
    let b = 2.0 * oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if a <= 0.0 || discriminant.is_nan() || discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = (-b - sqrt_d) / (2.0 * a);
    if near > 0.0 {
        return Some(near);
    }
    // Origin inside the sphere
    let far = (-b + sqrt_d) / (2.0 * a);
    (far > 0.0).then_some(far)
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::bodies::{BodySpec, CentralBody};
    use crate::options::CameraOptions;
    use crate::physics::StateVector;

    const VIEWPORT: Vec2 = Vec2::new(1600.0, 900.0);

    /// Body at a render-space position (distance scale 1, Y/Z swapped).
    fn spec(name: &str, render: Vec3, radius: f32) -> BodySpec {
        BodySpec {
            name: name.into(),
            local_name: name.into(),
            visual_radius: radius,
            color: 0x00ff_ffff,
            rotation_period: 0.0,
            initial_state: StateVector::new(
                DVec3::new(render.x.into(), render.z.into(), render.y.into()),
                DVec3::ZERO,
            ),
            description: String::new(),
        }
    }

    fn registry(specs: Vec<BodySpec>) -> BodyRegistry {
        BodyRegistry::new(specs, CentralBody::default(), 1.0).unwrap()
    }

    fn camera() -> Camera {
        Camera::new(
            Vec3::new(0.0, 0.0, 100.0),
            Vec3::ZERO,
            &CameraOptions::default(),
            VIEWPORT.x / VIEWPORT.y,
        )
    }

    #[test]
    fn ray_through_center_hits_that_body() {
        let bodies = registry(vec![
            spec("a", Vec3::new(-30.0, 0.0, 0.0), 2.0),
            spec("b", Vec3::new(0.0, 20.0, 0.5), 2.0),
            spec("c", Vec3::new(25.0, -10.0, -5.0), 2.0),
        ]);
        let cam = camera();
        let picker = PickingService::new();
        for body in bodies.iter() {
            let center = bodies.to_render_space(body.state().position);
            let pixel = cam.world_to_screen(center, VIEWPORT).unwrap();
            assert_eq!(picker.pick(pixel, VIEWPORT, &cam, &bodies), Some(body.id));
        }
    }

    #[test]
    fn empty_space_returns_none() {
        let bodies = registry(vec![
            spec("a", Vec3::new(-30.0, 0.0, 0.0), 2.0),
            spec("b", Vec3::new(30.0, 0.0, 0.0), 2.0),
        ]);
        let picker = PickingService::new();
        assert_eq!(
            picker.pick(Vec2::new(5.0, 5.0), VIEWPORT, &camera(), &bodies),
            None
        );
    }

    #[test]
    fn overlapping_spheres_return_nearer_body() {
        let bodies = registry(vec![
            spec("far", Vec3::new(0.0, 0.0, -10.0), 3.0),
            spec("near", Vec3::new(0.0, 0.5, 10.0), 3.0),
        ]);
        let hit = PickingService::new()
            .pick_hit(VIEWPORT * 0.5, VIEWPORT, &camera(), &bodies)
            .unwrap();
        assert_eq!(hit.id, BodyId(1));
        assert!(hit.distance < 90.0);
    }

    #[test]
    fn exact_tie_resolves_to_first_id() {
        let bodies = registry(vec![
            spec("first", Vec3::new(0.0, 0.0, 1.0), 2.0),
            spec("second", Vec3::new(0.0, 0.0, 1.0), 2.0),
        ]);
        let picker = PickingService::new();
        for _ in 0..10 {
            assert_eq!(
                picker.pick(VIEWPORT * 0.5, VIEWPORT, &camera(), &bodies),
                Some(BodyId(0))
            );
        }
    }

    #[test]
    fn degenerate_viewport_or_pointer_misses() {
        let bodies = registry(vec![spec("a", Vec3::new(0.0, 0.0, 1.0), 5.0)]);
        let picker = PickingService::new();
        let cam = camera();
        assert_eq!(picker.pick(Vec2::ZERO, Vec2::ZERO, &cam, &bodies), None);
        assert_eq!(
            picker.pick(Vec2::new(f32::NAN, 1.0), VIEWPORT, &cam, &bodies),
            None
        );
    }

    #[test]
    fn sphere_behind_ray_is_missed() {
        let hit = ray_sphere_intersect(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 1.0);
        assert_eq!(hit, None);
    }

    #[test]
    fn origin_inside_sphere_reports_exit() {
        let t = ray_sphere_intersect(Vec3::ZERO, Vec3::X, Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-6);
    }
}

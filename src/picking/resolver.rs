//! Ray-to-body resolution

use bevy::math::bounding::{BoundingSphere, RayCast3d};
use bevy::prelude::*;

use crate::scene::{BodyId, HoverTransition, SolarSystem};

/// One pointer observation over the primary window
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum PointerSample {
    /// World-space ray under the pointer, as cast by the main camera
    Over { ray: Ray3d, pointer: Vec2 },
    /// The pointer left the window
    Left,
}

/// Nearest orbiting body hit by `ray`.
///
/// Only body spheres are candidates; the central body, glow shells and orbit
/// guides never are. Equal distances resolve to the earlier catalog entry.
pub fn nearest_hit(system: &SolarSystem, ray: Ray3d) -> Option<BodyId> {
    let cast = RayCast3d::from_ray(ray, f32::MAX);
    system
        .bodies()
        .iter()
        .filter_map(|body| {
            let sphere = BoundingSphere::new(body.position, body.mesh_radius);
            cast.sphere_intersection_at(&sphere).map(|t| (t, body.id))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id)
}

/// Fold one pointer sample into the hover state.
///
/// Returns the transition to report, if the hovered body changed.
pub fn resolve_sample(system: &mut SolarSystem, sample: &PointerSample) -> Option<HoverTransition> {
    let hit = match sample {
        PointerSample::Over { ray, .. } => nearest_hit(system, *ray),
        PointerSample::Left => None,
    };
    system.hover.update(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BodyCatalog, BodyDescriptor, Rgb8};
    use crate::scene::test_support::single_body_catalog;
    use crate::viewport::{DEFAULT_EYE, DEFAULT_FOV_Y, DEFAULT_NEAR};

    /// Perspective eye using the same projection as Bevy's `PerspectiveProjection`
    struct Eye {
        transform: Transform,
        aspect: f32,
    }

    impl Eye {
        fn looking_at_origin(position: Vec3) -> Self {
            Self {
                transform: Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
                aspect: 16.0 / 9.0,
            }
        }

        fn clip_from_view(&self) -> Mat4 {
            Mat4::perspective_infinite_reverse_rh(DEFAULT_FOV_Y, self.aspect, DEFAULT_NEAR)
        }

        fn world_to_ndc(&self, point: Vec3) -> Vec2 {
            let world_from_view =
                Mat4::from_rotation_translation(self.transform.rotation, self.transform.translation);
            let clip = self.clip_from_view() * world_from_view.inverse() * point.extend(1.0);
            assert!(clip.w > 0.0, "{:?} is behind the eye", point);
            Vec2::new(clip.x / clip.w, clip.y / clip.w)
        }

        fn ray_through_ndc(&self, ndc: Vec2) -> Ray3d {
            // Reversed z: the near plane sits at ndc z = 1.
            let on_near_plane = self.clip_from_view().inverse().project_point3(ndc.extend(1.0));
            let direction = self.transform.rotation * on_near_plane;
            Ray3d::new(self.transform.translation, Dir3::new(direction).unwrap())
        }

        fn ray_at(&self, point: Vec3) -> PointerSample {
            let ndc = self.world_to_ndc(point);
            PointerSample::Over {
                ray: self.ray_through_ndc(ndc),
                pointer: ndc,
            }
        }
    }

    fn system_with(catalog: &BodyCatalog) -> SolarSystem {
        let mut system = SolarSystem::default();
        system.populate(catalog, 1.5).unwrap();
        system
    }

    fn pick(system: &SolarSystem, sample: PointerSample) -> Option<BodyId> {
        match sample {
            PointerSample::Over { ray, .. } => nearest_hit(system, ray),
            PointerSample::Left => None,
        }
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let eye = Eye::looking_at_origin(DEFAULT_EYE);
        let ray = eye.ray_through_ndc(Vec2::ZERO);
        assert!(ray.origin.distance(DEFAULT_EYE) < 1e-3);
        assert!(ray.direction.dot((-DEFAULT_EYE).normalize()) > 0.9999);
        assert!(eye.world_to_ndc(Vec3::ZERO).length() < 1e-4);
    }

    #[test]
    fn test_pick_body_at_projected_position() {
        let system = system_with(&single_body_catalog(30.0, 0.03));
        assert_eq!(system.bodies()[0].position, Vec3::new(30.0, 0.0, 0.0));

        let eye = Eye::looking_at_origin(DEFAULT_EYE);
        let sample = eye.ray_at(Vec3::new(30.0, 0.0, 0.0));
        assert_eq!(pick(&system, sample), Some(BodyId(0)));
    }

    #[test]
    fn test_pick_far_from_bodies_is_none() {
        let system = system_with(&single_body_catalog(30.0, 0.03));
        let eye = Eye::looking_at_origin(DEFAULT_EYE);
        let corner = eye.ray_through_ndc(Vec2::new(-0.95, 0.95));
        assert_eq!(nearest_hit(&system, corner), None);
        let opposite = eye.ray_at(Vec3::new(-30.0, 0.0, 0.0));
        assert_eq!(pick(&system, opposite), None);
    }

    #[test]
    fn test_pick_through_silhouette_edge() {
        let system = system_with(&single_body_catalog(30.0, 0.03));
        let radius = system.bodies()[0].mesh_radius;
        let eye = Eye::looking_at_origin(DEFAULT_EYE);
        let inside = eye.ray_at(Vec3::new(30.0, 0.0, radius * 0.9));
        let outside = eye.ray_at(Vec3::new(30.0, 0.0, radius * 3.0));
        assert_eq!(pick(&system, inside), Some(BodyId(0)));
        assert_eq!(pick(&system, outside), None);
    }

    #[test]
    fn test_nearest_body_wins() {
        // Two bodies on the line of sight; the nearer one must be reported.
        let body = |name: &str, orbit_radius: f32| BodyDescriptor {
            name: name.to_string(),
            radius: 2.0,
            orbit_radius,
            color: Rgb8::new(200, 200, 200),
            speed: 0.0,
            description: String::new(),
        };
        let catalog = BodyCatalog::new(vec![body("far", 10.0), body("near", 40.0)]).unwrap();
        let system = system_with(&catalog);
        let eye = Eye::looking_at_origin(Vec3::new(80.0, 0.0, 0.0));

        let ray = eye.ray_through_ndc(Vec2::ZERO);
        assert_eq!(nearest_hit(&system, ray), system.id_of("near"));
    }

    #[test]
    fn test_no_candidates_is_no_hover() {
        let mut system = SolarSystem::default();
        let ray = Eye::looking_at_origin(DEFAULT_EYE).ray_through_ndc(Vec2::ZERO);
        assert_eq!(nearest_hit(&system, ray), None);
        let sample = PointerSample::Over {
            ray,
            pointer: Vec2::ZERO,
        };
        assert_eq!(resolve_sample(&mut system, &sample), None);
    }

    #[test]
    fn test_hover_transitions_fire_once() {
        let mut system = system_with(&single_body_catalog(30.0, 0.03));
        let eye = Eye::looking_at_origin(DEFAULT_EYE);
        let on_body = eye.ray_at(Vec3::new(30.0, 0.0, 0.0));
        let near_center = eye.ray_at(Vec3::new(30.0, 0.0, 0.2));
        let off_body = PointerSample::Over {
            ray: eye.ray_through_ndc(Vec2::new(-0.95, 0.95)),
            pointer: Vec2::new(-0.95, 0.95),
        };

        let mut transitions = Vec::new();
        for sample in [on_body, on_body, near_center, on_body] {
            transitions.extend(resolve_sample(&mut system, &sample));
        }
        assert_eq!(transitions, vec![HoverTransition::Entered(BodyId(0))]);

        transitions.clear();
        for _ in 0..3 {
            transitions.extend(resolve_sample(&mut system, &off_body));
        }
        assert_eq!(transitions, vec![HoverTransition::Cleared]);
        assert_eq!(system.hover.current(), None);
    }

    #[test]
    fn test_pointer_leaving_counts_as_off_all_bodies() {
        let mut system = system_with(&single_body_catalog(30.0, 0.03));
        let eye = Eye::looking_at_origin(DEFAULT_EYE);
        let on_body = eye.ray_at(Vec3::new(30.0, 0.0, 0.0));

        assert_eq!(
            resolve_sample(&mut system, &on_body),
            Some(HoverTransition::Entered(BodyId(0)))
        );
        assert_eq!(
            resolve_sample(&mut system, &PointerSample::Left),
            Some(HoverTransition::Cleared)
        );
        assert_eq!(resolve_sample(&mut system, &PointerSample::Left), None);
    }
}

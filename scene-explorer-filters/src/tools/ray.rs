use bevy::prelude::*;

/// Ray test against an oriented box given in a node's local space.
pub fn ray_hits_obb(
    origin: Vec3,
    direction: Vec3,
    transform: &GlobalTransform,
    center: Vec3,
    half_extents: Vec3,
) -> Option<f32> {
    let inverse = transform.compute_matrix().inverse();
    let local_origin = inverse.transform_point3(origin);
    let local_direction = inverse.transform_vector3(direction);
    ray_aabb_hit_t(
        local_origin,
        local_direction,
        center - half_extents,
        center + half_extents,
    )
}

/// Slab-method ray-AABB intersection, returns the entry distance (or the exit
/// distance when the ray starts inside the box).
pub fn ray_aabb_hit_t(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let mut t0 = (min[axis] - o) / d;
        let mut t1 = (max[axis] - o) / d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_hit_reports_entry_distance() {
        let t = ray_aabb_hit_t(
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        )
        .unwrap();
        assert!((t - 9.0).abs() < 1.0e-5);
    }

    #[test]
    fn parallel_miss_and_behind_are_rejected() {
        // Parallel to the box, offset outside.
        assert!(
            ray_aabb_hit_t(
                Vec3::new(5.0, 0.0, -10.0),
                Vec3::Z,
                Vec3::splat(-1.0),
                Vec3::splat(1.0),
            )
            .is_none()
        );
        // Box entirely behind the origin.
        assert!(
            ray_aabb_hit_t(
                Vec3::new(0.0, 0.0, 10.0),
                Vec3::Z,
                Vec3::splat(-1.0),
                Vec3::splat(1.0),
            )
            .is_none()
        );
    }

    #[test]
    fn origin_inside_box_reports_exit() {
        let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0)).unwrap();
        assert!((t - 1.0).abs() < 1.0e-5);
    }

    #[test]
    fn obb_test_respects_transform_and_offset_center() {
        let transform = GlobalTransform::from(Transform::from_xyz(10.0, 0.0, 0.0));
        // Box centered 2 units above the node origin.
        let hit = ray_hits_obb(
            Vec3::new(10.0, 2.0, -5.0),
            Vec3::Z,
            &transform,
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::splat(1.0),
        );
        assert!(hit.is_some());

        // Same ray against the untranslated node misses.
        let miss = ray_hits_obb(
            Vec3::new(10.0, 2.0, -5.0),
            Vec3::Z,
            &GlobalTransform::default(),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::splat(1.0),
        );
        assert!(miss.is_none());
    }
}

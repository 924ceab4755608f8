use bevy::prelude::*;
use bevy::render::primitives::Aabb;

const CORNER_SIGNS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Accumulate the world-space AABB over every render volume in a subtree.
/// Returns `None` when nothing below `root` carries a mesh.
pub fn subtree_world_aabb(
    root: Entity,
    children: &Query<&Children>,
    volumes: &Query<(&GlobalTransform, &Aabb)>,
) -> Option<(Vec3, Vec3)> {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    let mut any = false;

    let mut stack = vec![root];
    while let Some(entity) = stack.pop() {
        if let Ok((transform, aabb)) = volumes.get(entity) {
            let center = Vec3::from(aabb.center);
            let half_extents = Vec3::from(aabb.half_extents);
            for sign in CORNER_SIGNS {
                let corner = transform.transform_point(center + half_extents * sign);
                min = min.min(corner);
                max = max.max(corner);
            }
            any = true;
        }
        if let Ok(kids) = children.get(entity) {
            stack.extend(kids.iter());
        }
    }

    any.then_some((min, max))
}

/// Footprint area (width x depth) in square meters for a world AABB.
pub fn footprint_area_sqm(min: Vec3, max: Vec3, meters_per_unit: f32) -> f32 {
    let size = (max - min).max(Vec3::ZERO);
    (size.x * meters_per_unit) * (size.z * meters_per_unit)
}

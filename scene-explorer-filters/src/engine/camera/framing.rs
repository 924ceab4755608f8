use bevy::prelude::*;
use bevy::render::primitives::Aabb;

use super::viewport_camera::ViewportCamera;
use crate::engine::scene::bounds::subtree_world_aabb;
use crate::engine::scene::builder::BoundsHint;

const DEFAULT_FRAME_RADIUS: f32 = 5.0;

/// Request to frame an object in the viewport.
#[derive(Event, Debug, Clone, Copy)]
pub struct FrameRequest {
    pub entity: Entity,
}

/// Which probe produced the framing extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSource {
    Hint,
    ComputedAabb,
    Translation,
}

/// Probe chain for "frame this object": authored extent hint, then render
/// bounds accumulated over the subtree, then the bare translation. Each probe
/// may come up empty; the next one runs.
pub fn resolve_frame_extent(
    entity: Entity,
    hints: &Query<&BoundsHint>,
    children: &Query<&Children>,
    volumes: &Query<(&GlobalTransform, &Aabb)>,
    transforms: &Query<&GlobalTransform>,
) -> Option<(Vec3, f32, FrameSource)> {
    if let Ok(BoundsHint(bounds)) = hints.get(entity) {
        let radius = bounds.size().length() * 0.5;
        if radius.is_finite() && radius > 0.0 {
            return Some((bounds.center(), radius, FrameSource::Hint));
        }
        debug!("degenerate bounds hint on {entity:?}, probing render bounds");
    }

    if let Some((min, max)) = subtree_world_aabb(entity, children, volumes) {
        let radius = ((max - min).length() * 0.5).max(f32::EPSILON);
        return Some(((min + max) * 0.5, radius, FrameSource::ComputedAabb));
    }

    transforms.get(entity).ok().map(|transform| {
        (
            transform.translation(),
            DEFAULT_FRAME_RADIUS,
            FrameSource::Translation,
        )
    })
}

pub fn frame_requested_objects(
    mut requests: EventReader<FrameRequest>,
    viewport_camera: Option<ResMut<ViewportCamera>>,
    hints: Query<&BoundsHint>,
    children: Query<&Children>,
    volumes: Query<(&GlobalTransform, &Aabb)>,
    transforms: Query<&GlobalTransform>,
) {
    let Some(mut camera) = viewport_camera else {
        if !requests.is_empty() {
            warn!("viewport camera not ready, dropping frame requests");
            requests.clear();
        }
        return;
    };

    for request in requests.read() {
        match resolve_frame_extent(request.entity, &hints, &children, &volumes, &transforms) {
            Some((center, radius, source)) => {
                camera.frame(center, radius);
                debug!(
                    "framed {:?} via {:?} (radius {:.2})",
                    request.entity, source, radius
                );
            }
            None => warn!("cannot frame {:?}: object has no transform", request.entity),
        }
    }
}

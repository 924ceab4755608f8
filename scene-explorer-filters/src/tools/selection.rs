use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::window::PrimaryWindow;

use crate::engine::scene::builder::SceneObject;
use crate::engine::scene::path::SceneIndex;
use crate::tools::filter_panel::state::PanelUiState;
use crate::tools::ray::ray_hits_obb;

/// The object the Info tab mirrors when no filter override is active.
#[derive(Resource, Default)]
pub struct SelectedObject {
    pub entity: Option<Entity>,
    pub path: Option<String>,
}

/// Left click picks the closest scene object under the cursor; clicking empty
/// space clears the selection. Clicks over the side panel are ignored.
pub fn select_object_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    panel: Res<PanelUiState>,
    index: Option<Res<SceneIndex>>,
    targets: Query<(Entity, &GlobalTransform, &Aabb), With<SceneObject>>,
    mut selected: ResMut<SelectedObject>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };

    let panel_width = if panel.collapsed {
        panel.closed_width
    } else {
        panel.open_width
    };
    if cursor_pos.x >= window.width() - panel_width {
        return;
    }

    let Ok((camera_transform, camera)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        return;
    };
    let origin = ray.origin;
    let direction = ray.direction.as_vec3();

    let mut best: Option<(Entity, f32)> = None;
    for (entity, transform, aabb) in &targets {
        let center = Vec3::from(aabb.center);
        let half_extents = Vec3::from(aabb.half_extents);
        if let Some(t) = ray_hits_obb(origin, direction, transform, center, half_extents) {
            if t > 0.0 && best.is_none_or(|(_, best_t)| t < best_t) {
                best = Some((entity, t));
            }
        }
    }

    match best {
        Some((entity, _)) => {
            let path = index
                .as_ref()
                .and_then(|index| index.path_of(entity))
                .map(str::to_string);
            debug!(
                "selected {:?} at {}",
                entity,
                path.as_deref().unwrap_or("<unindexed>")
            );
            selected.entity = Some(entity);
            selected.path = path;
        }
        None => {
            selected.entity = None;
            selected.path = None;
        }
    }
}

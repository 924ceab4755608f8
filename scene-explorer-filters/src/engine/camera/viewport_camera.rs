use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::engine::assets::scene_manifest::BoundsData;

const MIN_HEIGHT: f32 = 1.5;
const MAX_HEIGHT: f32 = 2000.0;
const ORBIT_SPEED: f32 = 0.005;
const PAN_SPEED: f32 = 0.0015;
const ZOOM_STEP: f32 = 0.1;

/// Orbit camera state: a focus point on the ground plus distance and angles.
#[derive(Resource)]
pub struct ViewportCamera {
    pub focus_point: Vec3,
    pub height: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub ground_height: f32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            focus_point: Vec3::ZERO,
            height: 40.0,
            pitch: -0.6,
            yaw: 0.0,
            ground_height: 0.0,
        }
    }
}

impl ViewportCamera {
    /// Initial placement covering the authored scene extents.
    pub fn with_scene_bounds(bounds: &BoundsData) -> Self {
        Self {
            focus_point: bounds.center(),
            height: (bounds.size().length() * 0.6).clamp(MIN_HEIGHT, MAX_HEIGHT),
            ground_height: bounds.ground_height(),
            ..default()
        }
    }

    /// Move the focus to `center` and back off far enough to show `radius`.
    pub fn frame(&mut self, center: Vec3, radius: f32) {
        self.focus_point = center;
        self.height = (radius * 2.2).clamp(MIN_HEIGHT, MAX_HEIGHT);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Right-drag orbits, middle-drag pans on the ground plane, scroll zooms.
pub fn camera_controller(
    viewport_camera: Option<ResMut<ViewportCamera>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let Some(mut camera) = viewport_camera else {
        motion.clear();
        wheel.clear();
        return;
    };

    let mut drag = Vec2::ZERO;
    for event in motion.read() {
        drag += event.delta;
    }

    let mut scroll = 0.0;
    for event in wheel.read() {
        scroll += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * 0.01,
        };
    }

    if buttons.pressed(MouseButton::Right) && drag != Vec2::ZERO {
        camera.yaw -= drag.x * ORBIT_SPEED;
        camera.pitch = (camera.pitch - drag.y * ORBIT_SPEED).clamp(-1.5, -0.05);
    }

    if buttons.pressed(MouseButton::Middle) && drag != Vec2::ZERO {
        let rotation = camera.rotation();
        let right = rotation * Vec3::X;
        let mut forward = rotation * Vec3::NEG_Z;
        forward.y = 0.0;
        let forward = forward.normalize_or_zero();
        let scale = camera.height * PAN_SPEED;
        let offset = (-right * drag.x + forward * drag.y) * scale;
        camera.focus_point += offset;
        camera.focus_point.y = camera.focus_point.y.max(camera.ground_height);
    }

    if scroll != 0.0 {
        camera.height = (camera.height * (1.0 - scroll * ZOOM_STEP)).clamp(MIN_HEIGHT, MAX_HEIGHT);
    }

    let position = camera.focus_point + camera.rotation() * Vec3::new(0.0, 0.0, camera.height);
    for mut transform in &mut cameras {
        *transform = Transform::from_translation(position).looking_at(camera.focus_point, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_clamps_distance() {
        let mut camera = ViewportCamera::default();
        camera.frame(Vec3::new(1.0, 2.0, 3.0), 10.0);
        assert_eq!(camera.focus_point, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.height, 22.0);

        camera.frame(Vec3::ZERO, 0.0);
        assert_eq!(camera.height, MIN_HEIGHT);

        camera.frame(Vec3::ZERO, 1.0e6);
        assert_eq!(camera.height, MAX_HEIGHT);
    }

    #[test]
    fn scene_bounds_placement_targets_center() {
        let bounds = BoundsData {
            min_x: -10.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 4.0,
            min_z: -10.0,
            max_z: 10.0,
        };
        let camera = ViewportCamera::with_scene_bounds(&bounds);
        assert_eq!(camera.focus_point, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(camera.ground_height, 0.0);
        assert!(camera.height > MIN_HEIGHT && camera.height < MAX_HEIGHT);
    }
}

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::records::{FilterRecordsLoader, FilterRegistry};
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::camera::framing::{FrameRequest, frame_requested_objects};
use crate::engine::camera::{ViewportCamera, camera_controller};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{ManifestLoader, spawn_scene_when_ready, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::records_loader::{RecordsLoader, warn_records_load_failure};
use crate::rpc::stream_bridge::StreamBridgePlugin;
use crate::tools::filter_panel::FilterPanelPlugin;
use crate::tools::filter_panel::state::apply_remote_toggles;
use crate::tools::highlight::{
    HighlightMaterial, HighlightState, apply_filter_toggles, handle_clear_filters,
    restore_highlights_on_exit,
};
use crate::tools::info_panel::{InfoPanelState, poll_inspected_object};
use crate::tools::selection::{SelectedObject, select_object_on_click};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(JsonAssetPlugin::<SceneManifest>::new(&["json"]))
        .init_asset::<FilterRegistry>()
        .register_asset_loader(FilterRecordsLoader)
        .init_state::<AppState>()
        .init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<RecordsLoader>()
        .init_resource::<HighlightMaterial>()
        .init_resource::<HighlightState>()
        .init_resource::<InfoPanelState>()
        .init_resource::<SelectedObject>()
        .add_event::<FrameRequest>()
        .add_plugins(FilterPanelPlugin)
        .add_plugins(StreamBridgePlugin)
        .add_systems(Startup, (setup, start_loading))
        .add_systems(
            Update,
            (spawn_scene_when_ready, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(Update, warn_records_load_failure)
        .add_systems(
            Update,
            (
                camera_controller,
                select_object_on_click,
                (
                    apply_remote_toggles,
                    apply_filter_toggles,
                    handle_clear_filters,
                    frame_requested_objects,
                )
                    .chain(),
                poll_inspected_object,
            )
                .run_if(in_state(AppState::Running)),
        )
        .add_systems(Last, restore_highlights_on_exit);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

/// Lighting and the viewport camera; the scene itself arrives with the
/// manifest.
fn setup(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            illuminance: 12_000.0,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
        ..default()
    });

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-20.0, 30.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(ViewportCamera::default());
}

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::camera::ViewportCamera;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::records_loader::RecordsLoader;
use crate::engine::scene::builder::spawn_scene;
use crate::engine::scene::path::SceneIndex;
use crate::tools::highlight::{HighlightMaterial, create_highlight_material};
use constants::path::{RELATIVE_MANIFEST_PATH, RELATIVE_RECORDS_PATH};

/// Holds the manifest asset handle while it loads.
#[derive(Resource, Default)]
pub struct ManifestLoader {
    pub handle: Option<Handle<SceneManifest>>,
}

/// Kick off both asset loads.
pub fn start_loading(
    mut manifest_loader: ResMut<ManifestLoader>,
    mut records_loader: ResMut<RecordsLoader>,
    asset_server: Res<AssetServer>,
) {
    manifest_loader.handle = Some(asset_server.load(RELATIVE_MANIFEST_PATH));
    records_loader.handle = Some(asset_server.load(RELATIVE_RECORDS_PATH));
}

/// Build the scene once the manifest is in. The loaded manifest is cloned into
/// a resource; the camera is re-placed from the authored scene bounds. A load
/// failure degrades to an empty scene instead of stalling the app.
pub fn spawn_scene_when_ready(
    mut progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<SceneManifest>>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut highlight_material: ResMut<HighlightMaterial>,
    mut commands: Commands,
) {
    if progress.scene_spawned {
        return;
    }
    let Some(handle) = &manifest_loader.handle else {
        return;
    };

    if let Some(manifest) = manifests.get(handle) {
        let index = spawn_scene(&mut commands, &mut meshes, &mut materials, manifest);
        highlight_material.0 = Some(create_highlight_material(&mut materials));
        commands.insert_resource(ViewportCamera::with_scene_bounds(&manifest.scene_bounds));
        commands.insert_resource(index);
        commands.insert_resource(manifest.clone());
        progress.scene_spawned = true;
        return;
    }

    if matches!(asset_server.load_state(handle.id()), LoadState::Failed(_)) {
        warn!("scene manifest missing at {RELATIVE_MANIFEST_PATH}, starting with an empty scene");
        highlight_material.0 = Some(create_highlight_material(&mut materials));
        commands.insert_resource(SceneIndex::default());
        commands.insert_resource(ViewportCamera::default());
        progress.scene_spawned = true;
    }
}

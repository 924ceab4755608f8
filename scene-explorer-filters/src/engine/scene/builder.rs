use bevy::prelude::*;
use constants::highlight::default_object_color;
use constants::path::SCENE_ROOT;

use crate::engine::assets::scene_manifest::{BoundsData, SceneManifest, SceneNodeSpec};
use crate::engine::scene::metadata::ObjectMetadata;
use crate::engine::scene::path::{self, SceneIndex};

/// Marker for every object spawned from the scene manifest.
#[derive(Component)]
pub struct SceneObject;

/// Explicit framing extent authored on a manifest node.
#[derive(Component, Debug, Clone, Copy)]
pub struct BoundsHint(pub BoundsData);

/// Spawn the authored scene tree and return the path index for it.
pub fn spawn_scene(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    manifest: &SceneManifest,
) -> SceneIndex {
    let mut index = SceneIndex::default();

    let root = commands
        .spawn((
            Name::new("World"),
            SceneObject,
            Transform::default(),
            Visibility::default(),
        ))
        .id();
    index.insert(SCENE_ROOT, root);

    for node in &manifest.nodes {
        spawn_node(commands, meshes, materials, node, root, SCENE_ROOT, &mut index);
    }

    info!("spawned {} scene objects from manifest", index.len());
    index
}

fn spawn_node(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    spec: &SceneNodeSpec,
    parent: Entity,
    parent_path: &str,
    index: &mut SceneIndex,
) {
    let node_path = path::join(parent_path, &spec.name);
    let translation = spec.position.map(Vec3::from).unwrap_or(Vec3::ZERO);

    let mut entity = commands.spawn((
        Name::new(spec.name.clone()),
        SceneObject,
        Transform::from_translation(translation),
        Visibility::default(),
        ChildOf(parent),
    ));

    if let Some([width, height, depth]) = spec.dims {
        let color = spec
            .color
            .map(|[r, g, b]| Color::srgb(r, g, b))
            .unwrap_or_else(default_object_color);
        entity.insert((
            Mesh3d(meshes.add(Cuboid::new(width, height, depth))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.85,
                ..default()
            })),
        ));
    }

    if !spec.metadata.is_empty() {
        entity.insert(ObjectMetadata::from_map(spec.metadata.clone()));
    }

    if let Some(bounds) = spec.bounds {
        entity.insert(BoundsHint(bounds));
    }

    let id = entity.id();
    index.insert(node_path.clone(), id);

    for child in &spec.children {
        spawn_node(commands, meshes, materials, child, id, &node_path, index);
    }
}

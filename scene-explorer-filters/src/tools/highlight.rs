use bevy::prelude::*;
use std::collections::HashMap;

use crate::engine::assets::records::{FilterRecord, FilterRegistry};
use crate::engine::camera::framing::FrameRequest;
use crate::engine::scene::metadata::ObjectMetadata;
use crate::engine::scene::path::SceneIndex;
use crate::tools::filter_panel::state::{ClearFiltersEvent, FilterPanelState, FilterToggleEvent};
use crate::tools::info_panel::InfoPanelState;
use constants::highlight::{highlight_color, highlight_emissive};
use constants::metadata::{KEY_CONTACT, KEY_TYPE};

/// Shared highlight material, created when the scene is spawned.
#[derive(Resource, Default)]
pub struct HighlightMaterial(pub Option<Handle<StandardMaterial>>);

pub fn create_highlight_material(
    materials: &mut Assets<StandardMaterial>,
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: highlight_color(),
        emissive: highlight_emissive(),
        perceptual_roughness: 0.4,
        ..default()
    })
}

/// Original material bindings for every object a highlight has touched.
/// Entries survive individual restores; only a clear-all sweep empties the
/// map, so re-toggling never re-caches a highlight as an "original".
#[derive(Resource, Default)]
pub struct HighlightState {
    originals: HashMap<Entity, Option<Handle<StandardMaterial>>>,
}

impl HighlightState {
    pub fn touched_count(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }
}

/// Apply toggle events from the panel or the remote bridge: swap or restore
/// subtree materials, write record metadata, move the Info override, and ask
/// the viewport to frame the first target.
pub fn apply_filter_toggles(
    mut events: EventReader<FilterToggleEvent>,
    registry: Option<Res<FilterRegistry>>,
    index: Option<Res<SceneIndex>>,
    highlight_material: Res<HighlightMaterial>,
    mut state: ResMut<HighlightState>,
    mut info: ResMut<InfoPanelState>,
    mut frames: EventWriter<FrameRequest>,
    children: Query<&Children>,
    bound_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    mesh_objects: Query<(), With<Mesh3d>>,
    mut metadata: Query<&mut ObjectMetadata>,
    mut commands: Commands,
) {
    if events.is_empty() {
        return;
    }
    let (Some(registry), Some(index)) = (registry, index) else {
        warn!("scene not ready, dropping filter toggles");
        events.clear();
        return;
    };

    for event in events.read() {
        let Some(record) = registry.get(&event.name) else {
            warn!("no record found for filter '{}'", event.name);
            continue;
        };

        let mut resolved: Vec<(&str, Entity)> = Vec::new();
        for target in &record.targets {
            match index.get(target) {
                Some(entity) => resolved.push((target.as_str(), entity)),
                None => warn!("object not found for filter '{}': {}", event.name, target),
            }
        }

        for &(_, entity) in &resolved {
            set_subtree_highlight(
                entity,
                event.active,
                &highlight_material,
                &mut state,
                &children,
                &bound_materials,
                &mesh_objects,
                &mut commands,
            );
        }

        if event.active {
            let Some(&(first_path, first_entity)) = resolved.first() else {
                warn!("filter '{}' has no resolvable targets", event.name);
                continue;
            };
            for &(_, entity) in &resolved {
                apply_record_metadata(record, entity, &mut metadata, &mut commands);
            }
            info.set_override(first_path.to_string(), record.name.clone());
            frames.write(FrameRequest {
                entity: first_entity,
            });
        } else {
            info.clear_override_if_owner(&record.name);
        }
    }
}

/// Walk `root` and its descendants; bind the highlight material to every
/// mesh-bearing object, or restore the cached originals. The original binding
/// is cached only the first time an object is touched.
fn set_subtree_highlight(
    root: Entity,
    highlighted: bool,
    highlight_material: &HighlightMaterial,
    state: &mut HighlightState,
    children: &Query<&Children>,
    bound_materials: &Query<&MeshMaterial3d<StandardMaterial>>,
    mesh_objects: &Query<(), With<Mesh3d>>,
    commands: &mut Commands,
) {
    let material = if highlighted {
        match &highlight_material.0 {
            Some(handle) => Some(handle.clone()),
            None => {
                warn!("highlight material not available yet");
                return;
            }
        }
    } else {
        None
    };

    let mut stack = vec![root];
    while let Some(entity) = stack.pop() {
        if let Ok(kids) = children.get(entity) {
            stack.extend(kids.iter());
        }
        if mesh_objects.get(entity).is_err() {
            continue;
        }

        if let Some(handle) = &material {
            state
                .originals
                .entry(entity)
                .or_insert_with(|| bound_materials.get(entity).ok().map(|bound| bound.0.clone()));
            commands.entity(entity).insert(MeshMaterial3d(handle.clone()));
        } else {
            // Restore only what we changed; a cached None means the object
            // had no direct binding before.
            let Some(original) = state.originals.get(&entity) else {
                continue;
            };
            match original {
                Some(handle) => {
                    commands.entity(entity).insert(MeshMaterial3d(handle.clone()));
                }
                None => {
                    commands
                        .entity(entity)
                        .remove::<MeshMaterial3d<StandardMaterial>>();
                }
            }
        }
    }
}

/// Copy a record's contact/type values onto the target's metadata so the
/// inspector can read them off the object.
fn apply_record_metadata(
    record: &FilterRecord,
    entity: Entity,
    metadata: &mut Query<&mut ObjectMetadata>,
    commands: &mut Commands,
) {
    if record.contact.is_empty() && record.kind.is_empty() {
        return;
    }

    if let Ok(mut data) = metadata.get_mut(entity) {
        if !record.contact.is_empty() {
            data.set(KEY_CONTACT, record.contact.as_str());
        }
        if !record.kind.is_empty() {
            data.set(KEY_TYPE, record.kind.as_str());
        }
    } else {
        let mut data = ObjectMetadata::default();
        if !record.contact.is_empty() {
            data.set(KEY_CONTACT, record.contact.as_str());
        }
        if !record.kind.is_empty() {
            data.set(KEY_TYPE, record.kind.as_str());
        }
        commands.entity(entity).insert(data);
    }
}

/// Restore every cached binding and empty the cache.
pub fn restore_all_highlights(
    state: &mut HighlightState,
    alive: &Query<Entity>,
    commands: &mut Commands,
) {
    let restored = state.originals.len();
    for (entity, original) in state.originals.drain() {
        if alive.get(entity).is_err() {
            continue;
        }
        match original {
            Some(handle) => {
                commands.entity(entity).insert(MeshMaterial3d(handle));
            }
            None => {
                commands
                    .entity(entity)
                    .remove::<MeshMaterial3d<StandardMaterial>>();
            }
        }
    }
    if restored > 0 {
        info!("restored original materials on {restored} objects");
    }
}

/// Clear-all from the panel button or a registry reload: restore materials,
/// uncheck every filter, drop the Info override.
pub fn handle_clear_filters(
    mut events: EventReader<ClearFiltersEvent>,
    mut state: ResMut<HighlightState>,
    mut panel: ResMut<FilterPanelState>,
    mut info: ResMut<InfoPanelState>,
    alive: Query<Entity>,
    mut commands: Commands,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    restore_all_highlights(&mut state, &alive, &mut commands);
    panel.uncheck_all();
    info.clear_override();
}

/// Leave the scene the way we found it when the app shuts down.
pub fn restore_highlights_on_exit(
    mut exits: EventReader<AppExit>,
    mut state: ResMut<HighlightState>,
    alive: Query<Entity>,
    mut commands: Commands,
) {
    if exits.is_empty() {
        return;
    }
    exits.clear();
    restore_all_highlights(&mut state, &alive, &mut commands);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::filter_panel::state::ToggleSource;
    use bevy::ecs::system::RunSystemOnce;

    const HIGHLIGHT_ID: u128 = 0x71;

    fn material_handle(id: u128) -> Handle<StandardMaterial> {
        Handle::weak_from_u128(id)
    }

    struct Fixture {
        world: World,
        root: Entity,
        leaf_bound: Entity,
        leaf_bare: Entity,
    }

    /// Scene: root (no mesh) with one material-bound leaf and one bare-mesh
    /// leaf; a registry with a filter per subtree plus one overlapping both.
    fn fixture() -> Fixture {
        let mut world = World::new();
        world.init_resource::<Events<FilterToggleEvent>>();
        world.init_resource::<Events<FrameRequest>>();
        world.init_resource::<HighlightState>();
        world.init_resource::<InfoPanelState>();
        world.insert_resource(HighlightMaterial(Some(material_handle(HIGHLIGHT_ID))));

        let root = world.spawn(Transform::default()).id();
        let leaf_bound = world
            .spawn((
                Mesh3d(Handle::default()),
                MeshMaterial3d(material_handle(0xA)),
                ChildOf(root),
            ))
            .id();
        let leaf_bare = world
            .spawn((Mesh3d(Handle::default()), ChildOf(root)))
            .id();

        let mut index = SceneIndex::default();
        index.insert("/World/Area", root);
        index.insert("/World/Area/Bound", leaf_bound);
        index.insert("/World/Area/Bare", leaf_bare);
        world.insert_resource(index);

        world.insert_resource(FilterRegistry::from_records([
            FilterRecord {
                name: "Area".to_string(),
                targets: vec!["/World/Area".to_string()],
                category: "Production".to_string(),
                kind: "Robotics".to_string(),
                contact: "Jane Doe".to_string(),
            },
            FilterRecord {
                name: "Bound Only".to_string(),
                targets: vec!["/World/Area/Bound".to_string()],
                category: "Production".to_string(),
                kind: String::new(),
                contact: String::new(),
            },
            FilterRecord {
                name: "Ghost".to_string(),
                targets: vec!["/World/Missing".to_string()],
                category: "Other".to_string(),
                kind: String::new(),
                contact: String::new(),
            },
        ]));

        Fixture {
            world,
            root,
            leaf_bound,
            leaf_bare,
        }
    }

    fn toggle(world: &mut World, name: &str, active: bool) {
        world.send_event(FilterToggleEvent {
            name: name.to_string(),
            active,
            source: ToggleSource::Panel,
        });
        world.run_system_once(apply_filter_toggles).unwrap();
        // Age out the consumed event so the next run starts clean.
        let mut events = world.resource_mut::<Events<FilterToggleEvent>>();
        events.update();
        events.update();
    }

    fn bound_material(world: &World, entity: Entity) -> Option<Handle<StandardMaterial>> {
        world
            .get::<MeshMaterial3d<StandardMaterial>>(entity)
            .map(|bound| bound.0.clone())
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut fx = fixture();
        let highlight = material_handle(HIGHLIGHT_ID);

        toggle(&mut fx.world, "Area", true);
        assert_eq!(bound_material(&fx.world, fx.leaf_bound), Some(highlight.clone()));
        assert_eq!(bound_material(&fx.world, fx.leaf_bare), Some(highlight));
        // The meshless root is never touched.
        assert!(bound_material(&fx.world, fx.root).is_none());
        assert_eq!(fx.world.resource::<HighlightState>().touched_count(), 2);

        toggle(&mut fx.world, "Area", false);
        assert_eq!(
            bound_material(&fx.world, fx.leaf_bound),
            Some(material_handle(0xA))
        );
        assert!(bound_material(&fx.world, fx.leaf_bare).is_none());
        // Cache entries persist after restore.
        assert_eq!(fx.world.resource::<HighlightState>().touched_count(), 2);
    }

    #[test]
    fn overlapping_filters_never_overwrite_cached_originals() {
        let mut fx = fixture();

        toggle(&mut fx.world, "Area", true);
        toggle(&mut fx.world, "Bound Only", true);
        toggle(&mut fx.world, "Area", false);
        toggle(&mut fx.world, "Bound Only", false);

        // Had the second toggle re-cached, this would now be the highlight.
        assert_eq!(
            bound_material(&fx.world, fx.leaf_bound),
            Some(material_handle(0xA))
        );
    }

    #[test]
    fn unknown_labels_and_missing_targets_are_no_ops() {
        let mut fx = fixture();

        toggle(&mut fx.world, "Nobody", true);
        toggle(&mut fx.world, "Ghost", true);

        assert!(fx.world.resource::<HighlightState>().is_empty());
        assert_eq!(
            bound_material(&fx.world, fx.leaf_bound),
            Some(material_handle(0xA))
        );
        // Neither produced an override or a frame request.
        assert!(fx.world.resource::<InfoPanelState>().override_path().is_none());
    }

    #[test]
    fn activation_writes_metadata_and_override_and_frames_target() {
        let mut fx = fixture();
        toggle(&mut fx.world, "Area", true);

        let data = fx.world.get::<ObjectMetadata>(fx.root).unwrap();
        assert_eq!(data.get(KEY_CONTACT), Some("Jane Doe"));
        assert_eq!(data.get(KEY_TYPE), Some("Robotics"));

        let info = fx.world.resource::<InfoPanelState>();
        assert_eq!(info.override_path(), Some("/World/Area"));
        assert_eq!(info.owner(), Some("Area"));

        let frames = fx.world.resource::<Events<FrameRequest>>();
        let mut cursor = frames.get_cursor();
        let requests: Vec<_> = cursor.read(frames).collect();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].entity, fx.root);
    }

    #[test]
    fn deactivating_non_owner_keeps_override() {
        let mut fx = fixture();
        toggle(&mut fx.world, "Bound Only", true);
        toggle(&mut fx.world, "Area", true);

        // "Area" owns the override now; turning "Bound Only" off must not clear it.
        toggle(&mut fx.world, "Bound Only", false);
        let info = fx.world.resource::<InfoPanelState>();
        assert_eq!(info.owner(), Some("Area"));

        toggle(&mut fx.world, "Area", false);
        let info = fx.world.resource::<InfoPanelState>();
        assert!(info.owner().is_none());
        assert!(info.override_path().is_none());
    }

    #[test]
    fn clear_all_restores_everything_and_empties_cache() {
        let mut fx = fixture();
        fx.world.init_resource::<Events<ClearFiltersEvent>>();
        fx.world.init_resource::<FilterPanelState>();

        toggle(&mut fx.world, "Area", true);
        fx.world.send_event(ClearFiltersEvent);
        fx.world.run_system_once(handle_clear_filters).unwrap();

        assert!(fx.world.resource::<HighlightState>().is_empty());
        assert_eq!(
            bound_material(&fx.world, fx.leaf_bound),
            Some(material_handle(0xA))
        );
        assert!(bound_material(&fx.world, fx.leaf_bare).is_none());
        assert!(fx.world.resource::<InfoPanelState>().override_path().is_none());
    }
}

use bevy::prelude::*;
use bevy::render::primitives::Aabb;

use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::scene::bounds::{footprint_area_sqm, subtree_world_aabb};
use crate::engine::scene::metadata::{ObjectMetadata, find_metadata};
use crate::engine::scene::path::SceneIndex;
use crate::tools::selection::SelectedObject;
use constants::metadata::{KEY_AREA_SQM, KEY_CONTACT, KEY_TYPE};

/// Values shown by the Info tab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoFields {
    pub path: String,
    pub kind: String,
    pub contact: String,
    pub area: String,
}

impl InfoFields {
    fn blank() -> Self {
        Self {
            path: String::new(),
            kind: "-".to_string(),
            contact: "-".to_string(),
            area: "-".to_string(),
        }
    }

    fn unresolved(path: String) -> Self {
        Self {
            path,
            ..Self::blank()
        }
    }
}

/// Inspector state: what is shown, and which filter owns the override.
#[derive(Resource, Default)]
pub struct InfoPanelState {
    override_path: Option<String>,
    owner: Option<String>,
    last_target: Option<Option<String>>,
    pub fields: InfoFields,
}

impl InfoPanelState {
    /// Point the Info tab at a filter's target, ignoring click selection.
    pub fn set_override(&mut self, path: String, owner: String) {
        self.override_path = Some(path);
        self.owner = Some(owner);
        self.last_target = None;
    }

    /// Only the filter that owns the override may clear it by deactivating.
    pub fn clear_override_if_owner(&mut self, name: &str) {
        match self.owner.as_deref() {
            None => self.clear_override(),
            Some(owner) if owner == name => self.clear_override(),
            Some(_) => {}
        }
    }

    pub fn clear_override(&mut self) {
        self.override_path = None;
        self.owner = None;
        self.last_target = None;
    }

    pub fn override_path(&self) -> Option<&str> {
        self.override_path.as_deref()
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

/// Per-frame poll: the override wins over click selection, and the fields
/// only recompute when the effective target changes.
pub fn poll_inspected_object(
    mut info: ResMut<InfoPanelState>,
    selected: Res<SelectedObject>,
    index: Option<Res<SceneIndex>>,
    manifest: Option<Res<SceneManifest>>,
    metadata: Query<&ObjectMetadata>,
    parents: Query<&ChildOf>,
    children: Query<&Children>,
    volumes: Query<(&GlobalTransform, &Aabb)>,
) {
    let target = info
        .override_path
        .clone()
        .or_else(|| selected.path.clone());
    if info.last_target.as_ref() == Some(&target) {
        return;
    }
    info.last_target = Some(target.clone());

    let Some(path) = target else {
        info.fields = InfoFields::blank();
        return;
    };

    let Some(entity) = index.as_ref().and_then(|index| index.get(&path)) else {
        info.fields = InfoFields::unresolved(path);
        return;
    };

    let kind =
        find_metadata(entity, KEY_TYPE, &metadata, &parents).unwrap_or_else(|| "-".to_string());
    let contact =
        find_metadata(entity, KEY_CONTACT, &metadata, &parents).unwrap_or_else(|| "-".to_string());

    let meters_per_unit = manifest
        .as_ref()
        .map(|manifest| manifest.meters_per_unit)
        .unwrap_or(1.0);
    let area = find_metadata(entity, KEY_AREA_SQM, &metadata, &parents)
        .and_then(|authored| authored.parse::<f32>().ok())
        .or_else(|| {
            subtree_world_aabb(entity, &children, &volumes)
                .map(|(min, max)| footprint_area_sqm(min, max, meters_per_unit))
        });

    info.fields = InfoFields {
        path,
        kind,
        contact,
        area: area
            .map(|value| format!("{value:.2}"))
            .unwrap_or_else(|| "-".to_string()),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn override_ownership() {
        let mut info = InfoPanelState::default();
        info.set_override("/World/A".to_string(), "Alpha".to_string());
        assert_eq!(info.override_path(), Some("/World/A"));

        // A non-owner deactivating leaves the override alone.
        info.clear_override_if_owner("Beta");
        assert_eq!(info.owner(), Some("Alpha"));

        info.clear_override_if_owner("Alpha");
        assert!(info.owner().is_none());
        assert!(info.override_path().is_none());

        // With no owner recorded, any deactivation clears.
        info.set_override("/World/B".to_string(), "Beta".to_string());
        info.clear_override();
        info.clear_override_if_owner("Gamma");
        assert!(info.override_path().is_none());
    }

    fn poll_world() -> (World, Entity) {
        let mut world = World::new();
        world.init_resource::<InfoPanelState>();
        world.init_resource::<SelectedObject>();

        let mut root_data = ObjectMetadata::default();
        root_data.set(KEY_TYPE, "Robotics");
        root_data.set(KEY_CONTACT, "Jane Doe");
        let root = world.spawn(root_data).id();
        let leaf = world
            .spawn((
                GlobalTransform::default(),
                Aabb::from_min_max(Vec3::new(-2.0, 0.0, -3.0), Vec3::new(2.0, 1.0, 3.0)),
                ChildOf(root),
            ))
            .id();

        let mut index = SceneIndex::default();
        index.insert("/World/Area", root);
        index.insert("/World/Area/Leaf", leaf);
        world.insert_resource(index);
        (world, leaf)
    }

    fn poll(world: &mut World) {
        world.run_system_once(poll_inspected_object).unwrap();
    }

    #[test]
    fn selection_fields_come_from_ancestors_and_bounds() {
        let (mut world, leaf) = poll_world();
        world.resource_mut::<SelectedObject>().entity = Some(leaf);
        world.resource_mut::<SelectedObject>().path = Some("/World/Area/Leaf".to_string());

        poll(&mut world);
        let fields = &world.resource::<InfoPanelState>().fields;
        assert_eq!(fields.path, "/World/Area/Leaf");
        assert_eq!(fields.kind, "Robotics");
        assert_eq!(fields.contact, "Jane Doe");
        // 4 x 6 footprint.
        assert_eq!(fields.area, "24.00");
    }

    #[test]
    fn override_wins_over_selection() {
        let (mut world, leaf) = poll_world();
        world.resource_mut::<SelectedObject>().path = Some("/World/Area/Leaf".to_string());
        world.resource_mut::<SelectedObject>().entity = Some(leaf);
        world
            .resource_mut::<InfoPanelState>()
            .set_override("/World/Area".to_string(), "Alpha".to_string());

        poll(&mut world);
        assert_eq!(
            world.resource::<InfoPanelState>().fields.path,
            "/World/Area"
        );
    }

    #[test]
    fn authored_area_beats_computed_estimate() {
        let (mut world, leaf) = poll_world();
        let mut data = ObjectMetadata::default();
        data.set(KEY_AREA_SQM, "1234.5");
        world.entity_mut(leaf).insert(data);
        world.resource_mut::<SelectedObject>().path = Some("/World/Area/Leaf".to_string());

        poll(&mut world);
        assert_eq!(
            world.resource::<InfoPanelState>().fields.area,
            "1234.50"
        );
    }

    #[test]
    fn empty_selection_blanks_fields() {
        let (mut world, _) = poll_world();
        poll(&mut world);
        let fields = &world.resource::<InfoPanelState>().fields;
        assert_eq!(fields.path, "");
        assert_eq!(fields.kind, "-");
        assert_eq!(fields.area, "-");
    }

    #[test]
    fn unresolved_path_keeps_path_with_dashes() {
        let (mut world, _) = poll_world();
        world.resource_mut::<SelectedObject>().path = Some("/World/Gone".to_string());
        poll(&mut world);
        let fields = &world.resource::<InfoPanelState>().fields;
        assert_eq!(fields.path, "/World/Gone");
        assert_eq!(fields.contact, "-");
    }
}

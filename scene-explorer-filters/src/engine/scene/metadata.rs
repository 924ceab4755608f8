use bevy::prelude::*;
use std::collections::HashMap;

/// Arbitrary key/value metadata attached to a scene object.
#[derive(Component, Debug, Clone, Default)]
pub struct ObjectMetadata {
    map: HashMap<String, String>,
}

impl ObjectMetadata {
    pub fn from_map(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Walk from `start` up the hierarchy until some ancestor carries `key`.
pub fn find_metadata(
    start: Entity,
    key: &str,
    metadata: &Query<&ObjectMetadata>,
    parents: &Query<&ChildOf>,
) -> Option<String> {
    let mut current = Some(start);
    while let Some(entity) = current {
        if let Ok(data) = metadata.get(entity) {
            if let Some(value) = data.get(key) {
                return Some(value.to_string());
            }
        }
        current = parents.get(entity).ok().map(|child_of| child_of.parent());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn lookup(world: &mut World, start: Entity, key: &'static str) -> Option<String> {
        world
            .run_system_once(
                move |metadata: Query<&ObjectMetadata>, parents: Query<&ChildOf>| {
                    find_metadata(start, key, &metadata, &parents)
                },
            )
            .unwrap()
    }

    #[test]
    fn lookup_walks_up_to_ancestors() {
        let mut world = World::new();
        let mut root_data = ObjectMetadata::default();
        root_data.set("partner:type", "Robotics");

        let root = world.spawn(root_data).id();
        let mid = world.spawn(ChildOf(root)).id();
        let mut leaf_data = ObjectMetadata::default();
        leaf_data.set("partner:contact", "Jane Doe");
        let leaf = world.spawn((leaf_data, ChildOf(mid))).id();

        // Own data wins, missing keys fall back to the chain.
        assert_eq!(
            lookup(&mut world, leaf, "partner:contact").as_deref(),
            Some("Jane Doe")
        );
        assert_eq!(
            lookup(&mut world, leaf, "partner:type").as_deref(),
            Some("Robotics")
        );
        assert_eq!(lookup(&mut world, leaf, "info:area_sqm"), None);
        assert_eq!(lookup(&mut world, root, "partner:contact"), None);
    }
}

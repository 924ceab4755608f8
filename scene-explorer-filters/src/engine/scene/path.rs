use bevy::prelude::*;
use std::collections::HashMap;

/// Join a parent scene path with a node name.
pub fn join(parent: &str, name: &str) -> String {
    format!("{parent}/{name}")
}

/// Lookup table between scene paths ("/World/Factory/AreaA") and spawned
/// entities; the "object at path" seam everything else resolves through.
#[derive(Resource, Default)]
pub struct SceneIndex {
    by_path: HashMap<String, Entity>,
    by_entity: HashMap<Entity, String>,
}

impl SceneIndex {
    pub fn insert(&mut self, path: impl Into<String>, entity: Entity) {
        let path = path.into();
        self.by_entity.insert(entity, path.clone());
        self.by_path.insert(path, entity);
    }

    pub fn get(&self, path: &str) -> Option<Entity> {
        self.by_path.get(path).copied()
    }

    pub fn path_of(&self, entity: Entity) -> Option<&str> {
        self.by_entity.get(&entity).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

use bevy::prelude::*;

/// Startup loading progress; flips once and stays set.
#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub scene_spawned: bool,
}

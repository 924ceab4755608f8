use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

/// Top-level app lifecycle.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

// Transition once the scene exists; tools and picking run from there.
pub fn transition_to_running(
    progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if progress.scene_spawned {
        info!("scene ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

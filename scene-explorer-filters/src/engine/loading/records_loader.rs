use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::records::FilterRegistry;
use constants::path::RELATIVE_RECORDS_PATH;

/// Holds the records asset handle so reloads keep flowing to the same id.
#[derive(Resource, Default)]
pub struct RecordsLoader {
    pub handle: Option<Handle<FilterRegistry>>,
}

/// A missing or unreadable records file is not fatal; the panel just stays
/// empty. Warn once so the gap is visible.
pub fn warn_records_load_failure(
    records_loader: Res<RecordsLoader>,
    asset_server: Res<AssetServer>,
    mut warned: Local<bool>,
) {
    if *warned {
        return;
    }
    let Some(handle) = &records_loader.handle else {
        return;
    };
    if matches!(asset_server.load_state(handle.id()), LoadState::Failed(_)) {
        warn!("records file not found or unreadable: {RELATIVE_RECORDS_PATH}");
        *warned = true;
    }
}

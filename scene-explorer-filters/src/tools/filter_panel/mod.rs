pub mod interactions;
pub mod state;
pub mod ui;

use bevy::prelude::*;

use interactions::{
    clear_all_button_interaction, collapse_button_interaction, filter_row_interaction,
    reload_button_interaction, tab_button_interaction,
};
use state::{ClearFiltersEvent, FilterPanelState, FilterToggleEvent, PanelUiState};
use ui::{
    apply_active_tab, apply_collapse_state, rebuild_filter_rows, reflect_filter_checkboxes,
    reflect_info_fields, spawn_side_panel,
};

// Registers the side panel, its state resources, and UI systems.
pub struct FilterPanelPlugin;

impl Plugin for FilterPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanelUiState>()
            .init_resource::<FilterPanelState>()
            .add_event::<FilterToggleEvent>()
            .add_event::<ClearFiltersEvent>()
            .add_systems(Startup, spawn_side_panel)
            .add_systems(
                Update,
                (
                    collapse_button_interaction,
                    tab_button_interaction,
                    filter_row_interaction,
                    reload_button_interaction,
                    clear_all_button_interaction,
                    apply_collapse_state,
                    apply_active_tab,
                    rebuild_filter_rows,
                    reflect_filter_checkboxes,
                    reflect_info_fields,
                ),
            );
    }
}

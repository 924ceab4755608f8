use bevy::prelude::*;

use super::state::{
    ClearFiltersEvent, FilterPanelState, FilterToggleEvent, PanelUiState, ToggleSource,
};
use super::ui::{ClearAllButton, CollapseButton, FilterRow, ReloadButton, TabButton};
use constants::path::RELATIVE_RECORDS_PATH;

// Chevron toggles the collapse state
pub fn collapse_button_interaction(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<CollapseButton>),
    >,
    mut state: ResMut<PanelUiState>,
) {
    for (interaction, mut background) in &mut buttons {
        match *interaction {
            Interaction::Pressed => {
                state.collapsed = !state.collapsed;
                *background = BackgroundColor(Color::srgb(0.18, 0.20, 0.24));
            }
            Interaction::Hovered => *background = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None => *background = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
        }
    }
}

// Tab header clicks switch the visible tab body
pub fn tab_button_interaction(
    mut buttons: Query<(&Interaction, &TabButton), (Changed<Interaction>, With<Button>)>,
    mut state: ResMut<PanelUiState>,
) {
    for (interaction, tab) in &mut buttons {
        if *interaction == Interaction::Pressed && state.active_tab != tab.0 {
            state.active_tab = tab.0;
        }
    }
}

// Checkbox row clicks flip the filter and fire the toggle event
pub fn filter_row_interaction(
    mut rows: Query<(&Interaction, &FilterRow, &mut BackgroundColor), Changed<Interaction>>,
    mut panel: ResMut<FilterPanelState>,
    mut toggles: EventWriter<FilterToggleEvent>,
) {
    for (interaction, row, mut background) in &mut rows {
        match *interaction {
            Interaction::Pressed => {
                match panel.toggle(&row.name) {
                    Some(active) => {
                        info!("filter '{}' changed to {}", row.name, active);
                        toggles.write(FilterToggleEvent {
                            name: row.name.clone(),
                            active,
                            source: ToggleSource::Panel,
                        });
                    }
                    // Stale row from a previous registry generation.
                    None => warn!("no panel state for filter '{}'", row.name),
                }
                *background = BackgroundColor(Color::srgb(0.16, 0.18, 0.22));
            }
            Interaction::Hovered => *background = BackgroundColor(Color::srgb(0.16, 0.17, 0.20)),
            Interaction::None => *background = BackgroundColor(Color::srgb(0.12, 0.13, 0.15)),
        }
    }
}

// Reload re-reads the records file wholesale; row rebuild follows the asset event
pub fn reload_button_interaction(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<ReloadButton>),
    >,
    asset_server: Res<AssetServer>,
) {
    for (interaction, mut background) in &mut buttons {
        match *interaction {
            Interaction::Pressed => {
                info!("reloading records from {RELATIVE_RECORDS_PATH}");
                asset_server.reload(RELATIVE_RECORDS_PATH);
                *background = BackgroundColor(Color::srgb(0.18, 0.20, 0.24));
            }
            Interaction::Hovered => *background = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None => *background = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
        }
    }
}

// Clear All restores every highlight and unchecks the panel
pub fn clear_all_button_interaction(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<ClearAllButton>),
    >,
    mut clear: EventWriter<ClearFiltersEvent>,
) {
    for (interaction, mut background) in &mut buttons {
        match *interaction {
            Interaction::Pressed => {
                clear.write(ClearFiltersEvent);
                *background = BackgroundColor(Color::srgb(0.20, 0.12, 0.12));
            }
            Interaction::Hovered => *background = BackgroundColor(Color::srgb(0.34, 0.14, 0.14)),
            Interaction::None => *background = BackgroundColor(Color::srgb(0.28, 0.10, 0.10)),
        }
    }
}

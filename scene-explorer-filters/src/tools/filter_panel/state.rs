use bevy::prelude::*;
use std::collections::HashMap;

use crate::engine::assets::records::FilterRegistry;
use crate::rpc::stream_bridge::RemoteToggleEvent;
use constants::panel::{PANEL_CLOSED_WIDTH, PANEL_OPEN_WIDTH};

/// Where a toggle originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleSource {
    Panel,
    Remote,
}

/// Fired whenever a filter changes state, from any source.
#[derive(Event, Debug, Clone)]
pub struct FilterToggleEvent {
    pub name: String,
    pub active: bool,
    pub source: ToggleSource,
}

/// Restore every highlight and uncheck all filters.
#[derive(Event, Debug, Clone, Copy)]
pub struct ClearFiltersEvent;

/// The panel's tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTab {
    Filters,
    Info,
}

/// Layout state of the side panel.
#[derive(Resource)]
pub struct PanelUiState {
    pub collapsed: bool,
    pub active_tab: PanelTab,
    pub open_width: f32,
    pub closed_width: f32,
}

impl Default for PanelUiState {
    fn default() -> Self {
        Self {
            collapsed: false,
            active_tab: PanelTab::Filters,
            open_width: PANEL_OPEN_WIDTH,
            closed_width: PANEL_CLOSED_WIDTH,
        }
    }
}

/// Outcome of a programmatic toggle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Applied,
    Redundant,
    Unknown,
}

/// Checkbox state for every known filter label.
#[derive(Resource, Default)]
pub struct FilterPanelState {
    checked: HashMap<String, bool>,
}

impl FilterPanelState {
    /// Reset to the registry's labels, everything unchecked.
    pub fn rebuild_from(&mut self, registry: &FilterRegistry) {
        self.checked = registry
            .iter()
            .map(|record| (record.name.clone(), false))
            .collect();
    }

    pub fn is_checked(&self, name: &str) -> Option<bool> {
        self.checked.get(name).copied()
    }

    /// Flip a known label, returning the new value.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let value = self.checked.get_mut(name)?;
        *value = !*value;
        Some(*value)
    }

    /// Programmatic set with the original guard semantics: unknown labels are
    /// refused, values already current are skipped.
    pub fn request(&mut self, name: &str, active: bool) -> ToggleOutcome {
        match self.checked.get_mut(name) {
            None => ToggleOutcome::Unknown,
            Some(current) if *current == active => ToggleOutcome::Redundant,
            Some(current) => {
                *current = active;
                ToggleOutcome::Applied
            }
        }
    }

    pub fn uncheck_all(&mut self) {
        for value in self.checked.values_mut() {
            *value = false;
        }
    }

    /// Labels currently checked, for clear-all restore sweeps.
    pub fn checked_labels(&self) -> Vec<String> {
        self.checked
            .iter()
            .filter(|&(_, &checked)| checked)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Forward remote bridge toggles through the same path as checkbox clicks.
pub fn apply_remote_toggles(
    mut remote: EventReader<RemoteToggleEvent>,
    mut panel: ResMut<FilterPanelState>,
    mut toggles: EventWriter<FilterToggleEvent>,
) {
    for event in remote.read() {
        match panel.request(&event.name, event.active) {
            ToggleOutcome::Applied => {
                info!("remote set filter '{}' to {}", event.name, event.active);
                toggles.write(FilterToggleEvent {
                    name: event.name.clone(),
                    active: event.active,
                    source: ToggleSource::Remote,
                });
            }
            ToggleOutcome::Redundant => {
                debug!("filter '{}' already {}", event.name, event.active);
            }
            ToggleOutcome::Unknown => {
                warn!("cannot set state for unknown filter: '{}'", event.name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::records::{FilterRecord, FilterRegistry};
    use bevy::ecs::system::RunSystemOnce;

    fn registry() -> FilterRegistry {
        FilterRegistry::from_records([
            FilterRecord {
                name: "Bosch Rexroth".to_string(),
                targets: vec!["/World/Factory/AreaA".to_string()],
                category: "Production".to_string(),
                kind: "Robotics".to_string(),
                contact: "Jane Doe".to_string(),
            },
            FilterRecord {
                name: "Festo".to_string(),
                targets: vec!["/World/Factory/AreaB".to_string()],
                category: "Production".to_string(),
                kind: "Pneumatics".to_string(),
                contact: String::new(),
            },
        ])
    }

    #[test]
    fn request_distinguishes_outcomes() {
        let mut panel = FilterPanelState::default();
        panel.rebuild_from(&registry());

        assert_eq!(panel.request("Nobody", true), ToggleOutcome::Unknown);
        assert_eq!(panel.request("Festo", false), ToggleOutcome::Redundant);
        assert_eq!(panel.request("Festo", true), ToggleOutcome::Applied);
        assert_eq!(panel.is_checked("Festo"), Some(true));
        assert_eq!(panel.request("Festo", true), ToggleOutcome::Redundant);
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut panel = FilterPanelState::default();
        panel.rebuild_from(&registry());

        assert_eq!(panel.toggle("Festo"), Some(true));
        assert_eq!(panel.toggle("Festo"), Some(false));
        assert_eq!(panel.toggle("Nobody"), None);
    }

    #[test]
    fn uncheck_all_and_checked_labels() {
        let mut panel = FilterPanelState::default();
        panel.rebuild_from(&registry());
        panel.request("Festo", true);
        panel.request("Bosch Rexroth", true);

        let mut checked = panel.checked_labels();
        checked.sort();
        assert_eq!(checked, vec!["Bosch Rexroth", "Festo"]);

        panel.uncheck_all();
        assert!(panel.checked_labels().is_empty());
        assert_eq!(panel.is_checked("Festo"), Some(false));
    }

    #[test]
    fn remote_toggles_route_through_guard() {
        let mut world = World::new();
        world.init_resource::<Events<RemoteToggleEvent>>();
        world.init_resource::<Events<FilterToggleEvent>>();

        let mut panel = FilterPanelState::default();
        panel.rebuild_from(&registry());
        world.insert_resource(panel);

        world.send_event(RemoteToggleEvent {
            name: "Festo".to_string(),
            active: true,
        });
        // Unknown label: warned, dropped.
        world.send_event(RemoteToggleEvent {
            name: "Nobody".to_string(),
            active: true,
        });
        // Redundant with the first: skipped.
        world.send_event(RemoteToggleEvent {
            name: "Festo".to_string(),
            active: true,
        });

        world.run_system_once(apply_remote_toggles).unwrap();

        let events = world.resource::<Events<FilterToggleEvent>>();
        let mut cursor = events.get_cursor();
        let forwarded: Vec<_> = cursor.read(events).collect();
        assert_eq!(forwarded.len(), 1);
        assert_eq!(forwarded[0].name, "Festo");
        assert!(forwarded[0].active);
        assert_eq!(forwarded[0].source, ToggleSource::Remote);
    }
}

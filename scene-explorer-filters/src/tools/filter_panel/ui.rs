use bevy::prelude::*;

use super::state::{ClearFiltersEvent, FilterPanelState, PanelTab, PanelUiState};
use crate::engine::assets::records::FilterRegistry;
use crate::engine::loading::records_loader::RecordsLoader;
use crate::tools::info_panel::InfoPanelState;
use constants::panel::{
    CHECKBOX_SIZE, HINT_FONT_SIZE, ROW_FONT_SIZE, ROW_HEIGHT, TAB_FONT_SIZE, TITLE_FONT_SIZE,
};

// Markers
#[derive(Component)]
pub struct PanelRoot;
#[derive(Component)]
pub struct PanelBody;
#[derive(Component)]
pub struct HeaderNode;
#[derive(Component)]
pub struct TitleText;
#[derive(Component)]
pub struct CollapseButton;
#[derive(Component)]
pub struct CollapseLabel;
#[derive(Component)]
pub struct TabButton(pub PanelTab);
#[derive(Component)]
pub struct FiltersTabBody;
#[derive(Component)]
pub struct InfoTabBody;
#[derive(Component)]
pub struct FilterRowsHost;
#[derive(Component)]
pub struct FilterRow {
    pub name: String,
}
#[derive(Component)]
pub struct CheckGlyph;
#[derive(Component)]
pub struct CheckMark;
#[derive(Component)]
pub struct CategoryLabel;
#[derive(Component)]
pub struct ReloadButton;
#[derive(Component)]
pub struct ClearAllButton;
#[derive(Component)]
pub struct InfoPathText;
#[derive(Component)]
pub struct InfoTypeText;
#[derive(Component)]
pub struct InfoContactText;
#[derive(Component)]
pub struct InfoAreaText;

// Spawns the side panel: header, tab row, Filters tab, Info tab
pub fn spawn_side_panel(mut commands: Commands, state: Res<PanelUiState>) {
    let width = if state.collapsed {
        state.closed_width
    } else {
        state.open_width
    };
    let body_display = if state.collapsed {
        Display::None
    } else {
        Display::Flex
    };

    commands
        .spawn((
            PanelRoot,
            Name::new("FilterPanel"),
            BackgroundColor(Color::srgb(0.10, 0.11, 0.13)),
            Node {
                width: Val::Px(width),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|parent| {
            // ---- header with title and collapse chevron ----
            parent
                .spawn((
                    HeaderNode,
                    Name::new("Header"),
                    BackgroundColor(Color::srgb(0.14, 0.16, 0.20)),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(12.0)),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::SpaceBetween,
                        ..default()
                    },
                ))
                .with_children(|header| {
                    header.spawn((
                        TitleText,
                        Text::new("Scene Filters"),
                        TextFont {
                            font_size: TITLE_FONT_SIZE,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 1.0, 1.0)),
                    ));
                    header
                        .spawn((
                            CollapseButton,
                            Button,
                            BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                            Node {
                                width: Val::Px(28.0),
                                height: Val::Px(28.0),
                                display: Display::Flex,
                                align_items: AlignItems::Center,
                                justify_content: JustifyContent::Center,
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                        ))
                        .with_children(|button| {
                            button.spawn((
                                CollapseLabel,
                                Text::new(if state.collapsed { "<" } else { ">" }),
                                TextFont {
                                    font_size: TITLE_FONT_SIZE,
                                    ..default()
                                },
                                TextColor(Color::srgb(1.0, 1.0, 1.0)),
                            ));
                        });
                });

            // ---- everything below the header hides when collapsed ----
            parent
                .spawn((
                    PanelBody,
                    Name::new("Body"),
                    BackgroundColor(Color::srgb(0.12, 0.13, 0.15)),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        display: body_display,
                        flex_direction: FlexDirection::Column,
                        overflow: Overflow::clip_y(),
                        ..default()
                    },
                ))
                .with_children(|body| {
                    // ---- tab row ----
                    body.spawn((
                        Name::new("TabRow"),
                        Node {
                            width: Val::Percent(100.0),
                            display: Display::Flex,
                            column_gap: Val::Px(2.0),
                            padding: UiRect::axes(Val::Px(8.0), Val::Px(6.0)),
                            ..default()
                        },
                    ))
                    .with_children(|tabs| {
                        for (tab, label) in [(PanelTab::Filters, "Filter"), (PanelTab::Info, "Info")]
                        {
                            tabs.spawn((
                                TabButton(tab),
                                Button,
                                BackgroundColor(Color::srgb(0.14, 0.16, 0.20)),
                                Node {
                                    flex_grow: 1.0,
                                    height: Val::Px(28.0),
                                    display: Display::Flex,
                                    align_items: AlignItems::Center,
                                    justify_content: JustifyContent::Center,
                                    ..default()
                                },
                            ))
                            .with_children(|tab_button| {
                                tab_button.spawn((
                                    Text::new(label),
                                    TextFont {
                                        font_size: TAB_FONT_SIZE,
                                        ..default()
                                    },
                                    TextColor(Color::srgb(0.85, 0.86, 0.88)),
                                ));
                            });
                        }
                    });

                    // ---- Filters tab ----
                    body.spawn((
                        FiltersTabBody,
                        Name::new("FiltersTab"),
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                            row_gap: Val::Px(8.0),
                            display: Display::Flex,
                            flex_direction: FlexDirection::Column,
                            overflow: Overflow::clip_y(),
                            ..default()
                        },
                    ))
                    .with_children(|filters| {
                        filters
                            .spawn((
                                FilterRowsHost,
                                Name::new("FilterRows"),
                                Node {
                                    width: Val::Percent(100.0),
                                    display: Display::Flex,
                                    flex_direction: FlexDirection::Column,
                                    row_gap: Val::Px(4.0),
                                    flex_grow: 1.0,
                                    overflow: Overflow::clip_y(),
                                    ..default()
                                },
                            ))
                            .with_children(|rows| {
                                rows.spawn((
                                    Text::new("Loading records..."),
                                    TextFont {
                                        font_size: HINT_FONT_SIZE,
                                        ..default()
                                    },
                                    TextColor(Color::srgb(0.55, 0.56, 0.58)),
                                ));
                            });

                        // Footer buttons
                        filters
                            .spawn((Name::new("Footer"), Node {
                                width: Val::Percent(100.0),
                                display: Display::Flex,
                                column_gap: Val::Px(8.0),
                                ..default()
                            },))
                            .with_children(|footer| {
                                for (marker, label) in [("reload", "Reload"), ("clear", "Clear All")]
                                {
                                    let mut button = footer.spawn((
                                        Button,
                                        BackgroundColor(if marker == "clear" {
                                            Color::srgb(0.28, 0.10, 0.10)
                                        } else {
                                            Color::srgb(0.22, 0.24, 0.28)
                                        }),
                                        BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                                        Node {
                                            flex_grow: 1.0,
                                            height: Val::Px(32.0),
                                            display: Display::Flex,
                                            align_items: AlignItems::Center,
                                            justify_content: JustifyContent::Center,
                                            border: UiRect::all(Val::Px(1.0)),
                                            ..default()
                                        },
                                    ));
                                    if marker == "reload" {
                                        button.insert(ReloadButton);
                                    } else {
                                        button.insert(ClearAllButton);
                                    }
                                    button.with_children(|text| {
                                        text.spawn((
                                            Text::new(label),
                                            TextFont {
                                                font_size: ROW_FONT_SIZE,
                                                ..default()
                                            },
                                            TextColor(Color::srgb(1.0, 1.0, 1.0)),
                                        ));
                                    });
                                }
                            });

                        filters.spawn((
                            Text::new("Toggle filters to highlight partner\nareas in the scene."),
                            TextFont {
                                font_size: HINT_FONT_SIZE,
                                ..default()
                            },
                            TextColor(Color::srgb(0.55, 0.56, 0.58)),
                        ));
                    });

                    // ---- Info tab (hidden until selected) ----
                    body.spawn((
                        InfoTabBody,
                        Name::new("InfoTab"),
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                            row_gap: Val::Px(6.0),
                            display: Display::None,
                            flex_direction: FlexDirection::Column,
                            overflow: Overflow::clip_y(),
                            ..default()
                        },
                    ))
                    .with_children(|info| {
                        info.spawn((
                            Text::new("Selected Object"),
                            TextFont {
                                font_size: TITLE_FONT_SIZE,
                                ..default()
                            },
                            TextColor(Color::srgb(1.0, 1.0, 1.0)),
                        ));

                        for (index, label) in ["Path", "Type", "Contact", "Area (m2)"]
                            .into_iter()
                            .enumerate()
                        {
                            info.spawn((Name::new("InfoRow"), Node {
                                width: Val::Percent(100.0),
                                display: Display::Flex,
                                column_gap: Val::Px(6.0),
                                ..default()
                            },))
                            .with_children(|row| {
                                row.spawn((
                                    Text::new(label),
                                    TextFont {
                                        font_size: ROW_FONT_SIZE,
                                        ..default()
                                    },
                                    TextColor(Color::srgb(0.62, 0.64, 0.66)),
                                    Node {
                                        width: Val::Px(78.0),
                                        ..default()
                                    },
                                ));
                                let mut value = row.spawn((
                                    Text::new("-"),
                                    TextFont {
                                        font_size: ROW_FONT_SIZE,
                                        ..default()
                                    },
                                    TextColor(Color::srgb(0.92, 0.93, 0.94)),
                                ));
                                match index {
                                    0 => value.insert(InfoPathText),
                                    1 => value.insert(InfoTypeText),
                                    2 => value.insert(InfoContactText),
                                    _ => value.insert(InfoAreaText),
                                };
                            });
                        }

                        info.spawn((
                            Text::new(
                                "Object custom data keys:\n  partner:contact = \"Name, phone\"\n  partner:type = \"Production\" / \"Robotics\"\n  info:area_sqm = 1234.5",
                            ),
                            TextFont {
                                font_size: HINT_FONT_SIZE,
                                ..default()
                            },
                            TextColor(Color::srgb(0.55, 0.56, 0.58)),
                        ));
                    });
                });
        });
}

// Rebuilds the checkbox rows whenever the records asset loads or changes.
// A reload is wholesale: highlights restore, every filter starts unchecked.
pub fn rebuild_filter_rows(
    mut events: EventReader<AssetEvent<FilterRegistry>>,
    registries: Res<Assets<FilterRegistry>>,
    loader: Res<RecordsLoader>,
    mut panel: ResMut<FilterPanelState>,
    mut clear: EventWriter<ClearFiltersEvent>,
    hosts: Query<Entity, With<FilterRowsHost>>,
    mut commands: Commands,
) {
    let mut dirty = false;
    for event in events.read() {
        match event {
            AssetEvent::LoadedWithDependencies { id } | AssetEvent::Modified { id } => {
                if loader.handle.as_ref().map(|handle| handle.id()) == Some(*id) {
                    dirty = true;
                }
            }
            _ => {}
        }
    }
    if !dirty {
        return;
    }
    let Some(registry) = loader
        .handle
        .as_ref()
        .and_then(|handle| registries.get(handle))
    else {
        return;
    };

    clear.write(ClearFiltersEvent);
    panel.rebuild_from(registry);
    commands.insert_resource(registry.clone());

    let Ok(host) = hosts.single() else {
        return;
    };
    commands.entity(host).despawn_related::<Children>();
    let record_count = registry.len();
    let registry = registry.clone();
    commands.entity(host).with_children(move |rows| {
        if registry.is_empty() {
            rows.spawn((
                Text::new("No usable rows in the records file."),
                TextFont {
                    font_size: HINT_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.55, 0.56, 0.58)),
            ));
            return;
        }

        for (category, records) in registry.grouped_by_category() {
            rows.spawn((
                CategoryLabel,
                Text::new(category),
                TextFont {
                    font_size: TAB_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.75, 0.77, 0.80)),
                Node {
                    margin: UiRect::top(Val::Px(6.0)),
                    ..default()
                },
            ));

            for record in records {
                rows.spawn((
                    FilterRow {
                        name: record.name.clone(),
                    },
                    Button,
                    BackgroundColor(Color::srgb(0.12, 0.13, 0.15)),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(ROW_HEIGHT),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(8.0),
                        padding: UiRect::left(Val::Px(6.0)),
                        ..default()
                    },
                ))
                .with_children(|row| {
                    row.spawn((
                        CheckGlyph,
                        BackgroundColor(Color::srgb(0.18, 0.20, 0.24)),
                        BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.4)),
                        Node {
                            width: Val::Px(CHECKBOX_SIZE),
                            height: Val::Px(CHECKBOX_SIZE),
                            display: Display::Flex,
                            align_items: AlignItems::Center,
                            justify_content: JustifyContent::Center,
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                    ))
                    .with_children(|glyph| {
                        glyph.spawn((
                            CheckMark,
                            Text::new(""),
                            TextFont {
                                font_size: ROW_FONT_SIZE,
                                ..default()
                            },
                            TextColor(Color::srgb(0.98, 0.60, 0.08)),
                        ));
                    });
                    row.spawn((
                        Text::new(record.name.clone()),
                        TextFont {
                            font_size: ROW_FONT_SIZE,
                            ..default()
                        },
                        TextColor(Color::srgb(0.90, 0.91, 0.92)),
                    ));
                });
            }
        }
    });

    info!("rebuilt filter rows ({record_count} records)");
}

// Width/visibility swap driven by the collapse state
pub fn apply_collapse_state(
    state: Res<PanelUiState>,
    mut nodes: ParamSet<(
        Query<&mut Node, With<PanelRoot>>,
        Query<&mut Node, With<PanelBody>>,
        Query<&mut Node, With<TitleText>>,
    )>,
    mut chevrons: Query<&mut Text, With<CollapseLabel>>,
) {
    if !state.is_changed() {
        return;
    }

    if let Ok(mut node) = nodes.p0().single_mut() {
        node.width = Val::Px(if state.collapsed {
            state.closed_width
        } else {
            state.open_width
        });
    }
    if let Ok(mut node) = nodes.p1().single_mut() {
        node.display = if state.collapsed {
            Display::None
        } else {
            Display::Flex
        };
    }
    if let Ok(mut node) = nodes.p2().single_mut() {
        node.display = if state.collapsed {
            Display::None
        } else {
            Display::Flex
        };
    }
    for mut chevron in &mut chevrons {
        *chevron = Text::new(if state.collapsed { "<" } else { ">" });
    }
}

// Shows the active tab's container and tints the tab buttons
pub fn apply_active_tab(
    state: Res<PanelUiState>,
    mut bodies: ParamSet<(
        Query<&mut Node, With<FiltersTabBody>>,
        Query<&mut Node, With<InfoTabBody>>,
    )>,
    mut tabs: Query<(&TabButton, &mut BackgroundColor)>,
) {
    if !state.is_changed() {
        return;
    }

    if let Ok(mut node) = bodies.p0().single_mut() {
        node.display = if state.active_tab == PanelTab::Filters {
            Display::Flex
        } else {
            Display::None
        };
    }
    if let Ok(mut node) = bodies.p1().single_mut() {
        node.display = if state.active_tab == PanelTab::Info {
            Display::Flex
        } else {
            Display::None
        };
    }
    for (tab, mut background) in &mut tabs {
        *background = BackgroundColor(if tab.0 == state.active_tab {
            Color::srgb(0.22, 0.24, 0.28)
        } else {
            Color::srgb(0.14, 0.16, 0.20)
        });
    }
}

// Mirrors checkbox state into the row glyphs
pub fn reflect_filter_checkboxes(
    panel: Res<FilterPanelState>,
    rows: Query<(&FilterRow, &Children)>,
    glyphs: Query<&Children, With<CheckGlyph>>,
    mut marks: Query<&mut Text, With<CheckMark>>,
) {
    if !panel.is_changed() {
        return;
    }

    for (row, children) in &rows {
        let checked = panel.is_checked(&row.name).unwrap_or(false);
        let glyph_text = if checked { "x" } else { "" };
        for child in children.iter() {
            let Ok(glyph_children) = glyphs.get(child) else {
                continue;
            };
            for glyph_child in glyph_children.iter() {
                if let Ok(mut mark) = marks.get_mut(glyph_child) {
                    if mark.0 != glyph_text {
                        *mark = Text::new(glyph_text);
                    }
                }
            }
        }
    }
}

// Mirrors the inspector fields into the Info tab values
pub fn reflect_info_fields(
    info: Res<InfoPanelState>,
    mut texts: ParamSet<(
        Query<&mut Text, With<InfoPathText>>,
        Query<&mut Text, With<InfoTypeText>>,
        Query<&mut Text, With<InfoContactText>>,
        Query<&mut Text, With<InfoAreaText>>,
    )>,
) {
    if !info.is_changed() {
        return;
    }

    if let Ok(mut text) = texts.p0().single_mut() {
        if text.0 != info.fields.path {
            *text = Text::new(info.fields.path.clone());
        }
    }
    if let Ok(mut text) = texts.p1().single_mut() {
        if text.0 != info.fields.kind {
            *text = Text::new(info.fields.kind.clone());
        }
    }
    if let Ok(mut text) = texts.p2().single_mut() {
        if text.0 != info.fields.contact {
            *text = Text::new(info.fields.contact.clone());
        }
    }
    if let Ok(mut text) = texts.p3().single_mut() {
        if text.0 != info.fields.area {
            *text = Text::new(info.fields.area.clone());
        }
    }
}
